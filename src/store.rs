// Contract store boundary: the collaborator that owns contracts and computes availability

use crate::contract::Contract;
use crate::requirement::SearchRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Status the store answers with when no contract matches a search
pub const NO_MATCH_STATUS: u16 = 400;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("API error: {status_code} - {message}")]
    Status { status_code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl StoreError {
    pub fn status(status_code: u16, message: impl Into<String>) -> Self {
        StoreError::Status {
            status_code,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            StoreError::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    // The store signals "no matching contracts" with a 400, so a 400 cannot be told
    // apart from a malformed request. This is the only place that mapping lives.
    pub fn is_no_match(&self) -> bool {
        self.status_code() == Some(NO_MATCH_STATUS)
    }
}

// One matched room type and price for a requirement row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableOffer {
    // 1-based position of the requirement row this offer satisfies
    pub requirement_id: i32,
    pub room_type: String,
    pub total_price: f64,
}

// All offers from one hotel whose contract satisfies the search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub hotel_name: String,
    pub available_rooms: Vec<AvailableOffer>,
}

#[async_trait]
pub trait ContractStore: Send + Sync {
    // POST /contracts/available
    async fn search_availability(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<AvailabilityResult>, StoreError>;

    async fn list_contracts(&self) -> Result<Vec<Contract>, StoreError>;

    async fn create_contract(&self, contract: Contract) -> Result<Contract, StoreError>;

    // Contracts for a hotel name; no match is an empty list
    async fn search_contracts(&self, term: &str) -> Result<Vec<Contract>, StoreError>;

    async fn delete_contract(&self, contract_id: i32) -> Result<(), StoreError>;
}
