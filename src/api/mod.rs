//! Blockchain-data API client.
//!
//! Fetches the two wallet resources (owned NFTs, NFT transactions) from the
//! REST API. Every response body is wrapped in a `{ "data": [...] }`
//! envelope; the client unwraps it and returns the typed records.
//!
//! Authentication is a static key sent as the `x-api-key` header on every
//! request. Fetch failures come back as a typed `FetchError` so the caller
//! decides what a degraded report looks like.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// An NFT ownership record for the wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct NftHolding {
    pub collection_address: String,
    pub collection_name: String,
    #[serde(default)]
    pub token_ids: Vec<String>,
}

/// A single NFT transfer touching the wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRecord {
    pub collection_address: String,
    pub collection_name: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub token_ids: Vec<String>,
    pub address_from: String,
    pub address_to: String,
    /// Sale price in ETH; 0 for gratis transfers.
    #[serde(default)]
    pub value: f64,
}

/// The `{ "data": [...] }` wrapper every endpoint responds with.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed response envelope: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Fetch the NFTs currently owned by `wallet`.
    pub async fn fetch_nfts(&self, wallet: &str) -> Result<Vec<NftHolding>, FetchError> {
        self.fetch("nfts", wallet).await
    }

    /// Fetch the NFT transactions involving `wallet`.
    pub async fn fetch_transactions(
        &self,
        wallet: &str,
    ) -> Result<Vec<TransferRecord>, FetchError> {
        self.fetch("transactions", wallet).await
    }

    /// GET `{base_url}{resource}?wallet={wallet}` and unwrap the envelope.
    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &str,
        wallet: &str,
    ) -> Result<Vec<T>, FetchError> {
        let url = format!("{}{}", self.base_url, resource);

        let resp = self
            .client
            .get(&url)
            .query(&[("wallet", wallet)])
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body = resp.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;

        debug!(
            resource = resource,
            records = envelope.data.len(),
            "fetched wallet resource"
        );

        Ok(envelope.data)
    }
}
