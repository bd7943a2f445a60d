//! HTTP client for the bincodes.com issuer lookup API.

use crate::config::TokenizerConfig;
use crate::domain::bin::IssuerLookupResponse;
use crate::domain::ports::{IssuerLookup, LookupError, LookupResult};
use crate::error::{Result, TokenizeError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::debug;

const USER_AGENT_VALUE: &str = concat!("cardvault/", env!("CARGO_PKG_VERSION"));

/// Issuer lookup over `GET {base}/bin/?format=json&api_key=..&bin=..`.
///
/// Transport errors are stripped of their URL before being reported, since
/// the URL carries the API key.
#[derive(Clone)]
pub struct BincodesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BincodesClient {
    pub fn new(config: &TokenizerConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.lookup_timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| TokenizeError::internal(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.bincodes_url.trim_end_matches('/').to_string(),
            api_key: config.bincodes_api_key.clone().unwrap_or_default(),
        })
    }
}

#[async_trait]
impl IssuerLookup for BincodesClient {
    async fn lookup(&self, bin_short: &str) -> LookupResult {
        let url = format!("{}/bin/", self.base_url);
        debug!(bin = bin_short, "querying issuer lookup service");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json"),
                ("api_key", self.api_key.as_str()),
                ("bin", bin_short),
            ])
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        response
            .json::<IssuerLookupResponse>()
            .await
            .map_err(|e| LookupError::Decode(e.without_url().to_string()))
    }
}
