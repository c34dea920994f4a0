// crates/geosearch-core/src/remote/http.rs
#![cfg(feature = "http")]

use super::{GeocodeRequest, GeocodeTransport, TransportResponse};
use crate::config::ProviderConfig;
use crate::error::NetworkError;
use async_trait::async_trait;
use reqwest::Client;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// `reqwest`-backed transport issuing `GET <endpoint>?q=..&limit=..`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &ProviderConfig) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NetworkError::Transport {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl GeocodeTransport for HttpTransport {
    async fn get(&self, request: &GeocodeRequest) -> Result<TransportResponse, NetworkError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&request.query_pairs())
            .send()
            .await
            .map_err(|e| NetworkError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| NetworkError::Transport {
            message: format!("failed to read response body: {e}"),
        })?;

        Ok(TransportResponse { status, body })
    }
}
