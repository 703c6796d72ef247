// HTTP client for the contract store REST API

use crate::contract::Contract;
use crate::requirement::SearchRequest;
use crate::store::{AvailabilityResult, ContractStore, StoreError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/contracts".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

pub struct HttpContractStore {
    client: Client,
    base_url: Url,
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            StoreError::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            StoreError::status(status.as_u16(), error.to_string())
        } else {
            StoreError::Network(error.to_string())
        }
    }
}

impl HttpContractStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| StoreError::InvalidRequest(format!("base url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidRequest(format!(
                "base url cannot carry a path: {}",
                config.base_url
            )));
        }

        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, base_url })
    }

    // Base url with extra path segments, each percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

// Turn a non-success response into StoreError::Status, keeping the body as the message
async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, body))
}

fn status_error(status: StatusCode, body: String) -> StoreError {
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_string()
    } else {
        body
    };
    StoreError::status(status.as_u16(), message)
}

#[async_trait]
impl ContractStore for HttpContractStore {
    async fn search_availability(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<AvailabilityResult>, StoreError> {
        let url = self.endpoint(&["available"]);
        debug!(%url, rows = request.len(), "posting availability search");
        let response = self.client.post(url).json(request).send().await?;
        Self::read_json(response).await
    }

    async fn list_contracts(&self) -> Result<Vec<Contract>, StoreError> {
        let response = self.client.get(self.endpoint(&[])).send().await?;
        Self::read_json(response).await
    }

    async fn create_contract(&self, contract: Contract) -> Result<Contract, StoreError> {
        let response = self
            .client
            .post(self.endpoint(&[]))
            .json(&contract)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn search_contracts(&self, term: &str) -> Result<Vec<Contract>, StoreError> {
        let response = self.client.get(self.endpoint(&[term])).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(term, "no contracts for search term");
            return Ok(Vec::new());
        }
        Self::read_json(response).await
    }

    async fn delete_contract(&self, contract_id: i32) -> Result<(), StoreError> {
        let id = contract_id.to_string();
        let response = self.client.delete(self.endpoint(&[id.as_str()])).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
