// Hotel contract availability search: request validation, search orchestration and result grouping

pub mod contract;
pub mod grouping;
pub mod http_store;
pub mod memory_store;
pub mod requirement;
pub mod search;
pub mod store;
pub mod validation;

// Re-export key types for convenience
pub use contract::{validate_contract, Contract, ContractError, RoomDetail};
pub use grouping::{group, DetailView, GroupedOffers};
pub use http_store::{HttpContractStore, StoreConfig};
pub use memory_store::InMemoryContractStore;
pub use requirement::{lookup_requirement, RoomRequirement, SearchRequest};
pub use search::{SearchForm, SearchPhase, SubmitError};
pub use store::{AvailabilityResult, AvailableOffer, ContractStore, StoreError};
pub use validation::{validate, FieldError, RowReport, ValidationReport};
