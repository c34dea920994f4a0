// crates/geosearch-core/src/remote/mod.rs

//! # Remote Search
//!
//! Talks to the geocoding provider. The HTTP layer sits behind
//! [`GeocodeTransport`] so the retry policy here can be exercised without a
//! network; [`http::HttpTransport`] is the real one.

use crate::config::ProviderConfig;
use crate::error::NetworkError;
use crate::model::{LatLon, SearchResult};
use async_trait::async_trait;
use tracing::{debug, info, warn};

#[cfg(feature = "http")]
pub mod http;
mod photon;

/// One provider request, before it is turned into URL parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeRequest {
    pub query: String,
    pub limit: usize,
    pub language: Option<String>,
    pub bias: Option<LatLon>,
}

impl GeocodeRequest {
    /// URL query parameters: `q`, `limit`, then `lang`, `lat`, `lon` when set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("q", self.query.clone()), ("limit", self.limit.to_string())];
        if let Some(lang) = &self.language {
            pairs.push(("lang", lang.clone()));
        }
        if let Some(bias) = self.bias {
            pairs.push(("lat", bias.lat.to_string()));
            pairs.push(("lon", bias.lon.to_string()));
        }
        pairs
    }

    /// The same request with `lang` dropped, so the provider uses its
    /// default language.
    pub fn without_language(&self) -> Self {
        Self {
            language: None,
            ..self.clone()
        }
    }
}

/// Raw provider answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a [`GeocodeRequest`] to the provider.
///
/// Futures are not `Send`: the search subsystem runs on a single thread.
#[async_trait(?Send)]
pub trait GeocodeTransport {
    async fn get(&self, request: &GeocodeRequest) -> Result<TransportResponse, NetworkError>;
}

/// Provider client with a one-shot language fallback.
pub struct RemoteSearchClient<T: GeocodeTransport> {
    transport: T,
    limit: usize,
    language: Option<String>,
}

impl<T: GeocodeTransport> RemoteSearchClient<T> {
    pub fn new(transport: T, config: &ProviderConfig) -> Self {
        Self {
            transport,
            limit: config.limit,
            language: config.language.clone(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the first-attempt request. A bias with a non-finite component
    /// is dropped.
    pub fn request(&self, query: &str, bias: Option<LatLon>) -> GeocodeRequest {
        GeocodeRequest {
            query: query.to_owned(),
            limit: self.limit,
            language: self.language.clone(),
            bias: bias.filter(LatLon::is_finite),
        }
    }

    /// Fetches results, retrying once without `lang` if the first attempt
    /// carried one and failed. Returns the last error when both fail.
    pub async fn try_fetch(
        &self,
        query: &str,
        bias: Option<LatLon>,
    ) -> Result<Vec<SearchResult>, NetworkError> {
        let request = self.request(query, bias);
        debug!(?request, "geocode request");

        match self.send(&request).await {
            Ok(results) => Ok(results),
            Err(e) if request.language.is_some() => {
                warn!(error = %e, query, "geocode failed, retrying in provider default language");
                self.send(&request.without_language()).await
            }
            Err(e) => Err(e),
        }
    }

    /// [`try_fetch`](Self::try_fetch), with failure degraded to no results.
    pub async fn fetch(&self, query: &str, bias: Option<LatLon>) -> Vec<SearchResult> {
        match self.try_fetch(query, bias).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, query, "geocode failed");
                Vec::new()
            }
        }
    }

    async fn send(&self, request: &GeocodeRequest) -> Result<Vec<SearchResult>, NetworkError> {
        let response = self.transport.get(request).await?;
        if !response.is_success() {
            return Err(NetworkError::Status {
                status: response.status,
            });
        }
        let results = photon::parse_features(&response.body)?;
        info!(query = %request.query, count = results.len(), "geocode response");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Plays back canned answers and records every request.
    #[derive(Default)]
    struct Scripted {
        answers: RefCell<VecDeque<Result<TransportResponse, NetworkError>>>,
        seen: RefCell<Vec<GeocodeRequest>>,
    }

    impl Scripted {
        fn new(answers: Vec<Result<TransportResponse, NetworkError>>) -> Self {
            Self {
                answers: RefCell::new(answers.into()),
                seen: RefCell::default(),
            }
        }
    }

    #[async_trait(?Send)]
    impl GeocodeTransport for Scripted {
        async fn get(&self, request: &GeocodeRequest) -> Result<TransportResponse, NetworkError> {
            self.seen.borrow_mut().push(request.clone());
            self.answers
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(NetworkError::Transport {
                    message: "script exhausted".into(),
                }))
        }
    }

    const ONE: &str = r#"{"features":[{"geometry":{"coordinates":[-49.27,-25.43]},"properties":{"osm_id":1,"name":"Curitiba"}}]}"#;

    fn client(answers: Vec<Result<TransportResponse, NetworkError>>) -> RemoteSearchClient<Scripted> {
        RemoteSearchClient::new(Scripted::new(answers), &ProviderConfig::default())
    }

    fn status(code: u16) -> Result<TransportResponse, NetworkError> {
        Ok(TransportResponse {
            status: code,
            body: String::new(),
        })
    }

    #[test]
    fn query_pairs_include_bias_only_when_given() {
        let c = client(vec![]);
        let plain = c.request("Curitiba", None).query_pairs();
        assert_eq!(
            plain,
            vec![
                ("q", "Curitiba".to_string()),
                ("limit", "10".to_string()),
                ("lang", "pt-BR".to_string()),
            ]
        );

        let biased = c.request("Curitiba", Some(LatLon::new(-25.5, -49.25))).query_pairs();
        assert!(biased.contains(&("lat", "-25.5".to_string())));
        assert!(biased.contains(&("lon", "-49.25".to_string())));

        let nan = c.request("Curitiba", Some(LatLon::new(f64::NAN, 1.0)));
        assert_eq!(nan.bias, None);
    }

    #[tokio::test]
    async fn success_needs_one_request() {
        let c = client(vec![Ok(TransportResponse::ok(ONE))]);
        let results = c.try_fetch("Curitiba", None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(c.transport().seen.borrow().len(), 1);
    }

    #[tokio::test]
    async fn server_error_retries_once_without_lang() {
        let c = client(vec![status(500), Ok(TransportResponse::ok(ONE))]);
        let results = c.try_fetch("Curitiba", None).await.unwrap();
        assert_eq!(results[0].name, "Curitiba");

        let seen = c.transport().seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].language.as_deref(), Some("pt-BR"));
        assert_eq!(seen[1].language, None);
        assert_eq!(seen[1].query, "Curitiba");
    }

    #[tokio::test]
    async fn double_failure_is_empty_from_fetch() {
        let c = client(vec![
            Err(NetworkError::Transport {
                message: "reset".into(),
            }),
            status(503),
        ]);
        assert!(c.fetch("Curitiba", None).await.is_empty());
        assert_eq!(c.transport().seen.borrow().len(), 2);
    }

    #[tokio::test]
    async fn no_retry_without_language() {
        let config = ProviderConfig {
            language: None,
            ..ProviderConfig::default()
        };
        let c = RemoteSearchClient::new(Scripted::new(vec![status(500)]), &config);
        let err = c.try_fetch("Curitiba", None).await.unwrap_err();
        assert_eq!(err, NetworkError::Status { status: 500 });
        assert_eq!(c.transport().seen.borrow().len(), 1);
    }

    #[tokio::test]
    async fn undecodable_body_triggers_fallback() {
        let c = client(vec![
            Ok(TransportResponse::ok("not json")),
            Ok(TransportResponse::ok(ONE)),
        ]);
        assert_eq!(c.try_fetch("Curitiba", None).await.unwrap().len(), 1);
    }
}
