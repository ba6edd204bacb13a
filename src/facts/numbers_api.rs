//! Numbers API (via `RapidAPI`) provider implementation

use super::{FactError, FactService};
use crate::config::FactConfig;
use crate::selection::DatePair;
use async_trait::async_trait;
use reqwest::Client;

/// Numbers API date-fact service
///
/// No timeout and no retry: a hung request simply never resolves, and the
/// runtime drops it once the selection moves on.
pub struct NumbersApiService {
    client: Client,
    api_key: Option<String>,
    api_host: String,
    base_url: String,
}

impl NumbersApiService {
    pub fn new(config: &FactConfig) -> Result<Self, FactError> {
        let client = Client::builder()
            .user_agent(concat!("datefact/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FactError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, pair: DatePair) -> String {
        format!("{}/{}/{}/date", self.base_url, pair.month, pair.day)
    }
}

#[async_trait]
impl FactService for NumbersApiService {
    async fn fetch(&self, pair: DatePair) -> Result<String, FactError> {
        let mut request = self
            .client
            .get(self.url_for(pair))
            .header("x-rapidapi-host", &self.api_host);
        if let Some(key) = &self.api_key {
            request = request.header("x-rapidapi-key", key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                FactError::transport(format!("Connection failed: {e}"))
            } else {
                FactError::transport(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FactError::decode(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(FactError::from_status(status.as_u16(), &body));
        }

        Ok(body)
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}
