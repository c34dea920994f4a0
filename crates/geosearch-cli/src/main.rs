//! geosearch: command-line interface for geosearch-core
//!
//! Resolves free-text place queries the way the map's search box does:
//! partial matches from the local cache while typing, an exact cache hit or
//! a provider request on submit, and a map move on selection.
//!
//! Usage examples
//! --------------
//!
//! - One-shot search, biased toward a map center
//!   $ geosearch --center -25.43,-49.27 search "Rua XV de Novembro"
//!
//! - Search and pick the first result
//!   $ geosearch search Curitiba --pick 1
//!
//! - What the cache would suggest while typing
//!   $ geosearch suggest curi
//!
//! - Cache maintenance
//!   $ geosearch cache stats
//!   $ geosearch cache list
//!   $ geosearch cache sweep
//!   $ geosearch cache clear
//!
//! - A line-by-line session (`:pick N`, `:clear`, `:quit`)
//!   $ geosearch interactive
//!
//! Configuration
//! -------------
//!
//! Defaults can be replaced with `--config <file.json>` (a serialized
//! `SearchConfig`); individual flags override the file. The cache lives in
//! the platform cache directory unless `--cache-dir` is given.

use anyhow::Context;
use clap::Parser;
use geosearch_cli::args::{CacheAction, CliArgs, Commands, GlobalArgs};
use geosearch_cli::render;
use geosearch_core::clock::{Clock, SystemClock};
use geosearch_core::{
    FileStore, HttpTransport, RecordingViewport, RemoteSearchClient, ResultCache, SearchConfig,
    SearchController,
};
use std::io::{self, BufRead, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Controller = SearchController<HttpTransport, FileStore, RecordingViewport>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.global.verbose);

    let config = load_config(&args.global)?;
    let store = FileStore::new(
        args.global
            .cache_dir
            .clone()
            .unwrap_or_else(FileStore::default_dir),
    );
    debug!(dir = %store.dir().display(), "using cache directory");

    match args.command {
        Commands::Search { query, json, pick } => {
            let mut controller = build_controller(&args.global, config, store)?;
            controller.set_query(query);
            let outcome = controller.search().await;

            if json {
                println!("{}", serde_json::to_string_pretty(controller.results())?);
            } else {
                println!("{}", render::outcome_line(&outcome));
                print_lines(render::result_lines(controller.results()));
            }

            if let Some(n) = pick {
                pick_result(&mut controller, n)?;
            }
        }

        Commands::Suggest { fragment } => {
            let cache = ResultCache::new(store, config.cache.clone(), config.max_display);
            match cache.search_partial(&fragment) {
                Some(hits) => print_lines(render::result_lines(&hits)),
                None => println!("No cached results match: {fragment}"),
            }
        }

        Commands::Cache { action } => {
            let mut cache = ResultCache::new(store, config.cache.clone(), config.max_display);
            match action {
                CacheAction::Stats => print_lines(render::stats_lines(&cache.stats())),
                CacheAction::List => {
                    let now = SystemClock.now_millis();
                    let entries = cache.load();
                    if entries.is_empty() {
                        println!("Cache is empty");
                    }
                    for entry in &entries {
                        println!("{}", render::entry_line(entry, now, config.cache.ttl()));
                    }
                }
                CacheAction::Clear => {
                    cache.clear();
                    println!("Cache cleared");
                }
                CacheAction::Sweep => {
                    let removed = cache.sweep();
                    println!("Removed {removed} expired entr{}", if removed == 1 { "y" } else { "ies" });
                }
            }
        }

        Commands::Interactive => {
            let controller = build_controller(&args.global, config, store)?;
            interactive(controller).await?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(global: &GlobalArgs) -> anyhow::Result<SearchConfig> {
    let mut config = match &global.config {
        Some(path) => SearchConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(lang) = &global.lang {
        config.provider.language = Some(lang.clone());
    }
    if global.no_lang {
        config.provider.language = None;
    }
    if let Some(endpoint) = &global.endpoint {
        config.provider.endpoint = endpoint.clone();
    }
    if let Some(limit) = global.limit {
        config.provider.limit = limit;
    }

    config.validate()?;
    Ok(config)
}

fn build_controller(
    global: &GlobalArgs,
    config: SearchConfig,
    store: FileStore,
) -> anyhow::Result<Controller> {
    let transport = HttpTransport::new(&config.provider)?;
    let client = RemoteSearchClient::new(transport, &config.provider);
    let cache = ResultCache::new(store, config.cache.clone(), config.max_display);
    let map = RecordingViewport::new(global.center);

    let mut controller = SearchController::new(client, cache, map, config);
    controller.subscribe(|change, session| {
        debug!(?change, query = %session.query, results = session.results.len(), "session changed");
    });
    Ok(controller)
}

fn pick_result(controller: &mut Controller, n: usize) -> anyhow::Result<()> {
    let picked = n
        .checked_sub(1)
        .and_then(|i| controller.select_index(i))
        .with_context(|| format!("no result #{n} to pick"))?;

    println!("Selected: {picked}");
    if let Some(m) = controller.map().last_move() {
        println!("{}", render::viewport_move_line(m));
    }
    Ok(())
}

/// Each plain line is typed into the box and then submitted, so the
/// provisional cache suggestions are printed before the resolved list.
async fn interactive(mut controller: Controller) -> anyhow::Result<()> {
    controller.set_focused(true);
    println!("Type a place and press Enter. Commands: :pick N, :clear, :quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim();

        match line.split_once(' ').unwrap_or((line, "")) {
            (":quit", _) | (":q", _) => break,
            (":clear", _) => {
                controller.clear();
                controller.set_focused(true);
            }
            (":pick", n) => match n.trim().parse::<usize>() {
                Ok(n) => {
                    if let Err(e) = pick_result(&mut controller, n) {
                        eprintln!("{e}");
                    }
                }
                Err(_) => eprintln!("usage: :pick N"),
            },
            _ if line.is_empty() => {}
            _ => {
                controller.set_focused(true);
                controller.set_query(line);
                if !controller.results().is_empty() {
                    println!("suggestions:");
                    print_lines(render::result_lines(controller.results()));
                }

                let outcome = controller.search().await;
                println!("{}", render::outcome_line(&outcome));
                print_lines(render::result_lines(controller.results()));
            }
        }
    }
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
