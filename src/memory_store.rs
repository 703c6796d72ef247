// In-process contract store holding contracts in memory.
// Answers availability searches with the same matching rules as the REST backend.

use crate::contract::{validate_contract, Contract, RoomDetail};
use crate::requirement::SearchRequest;
use crate::store::{AvailabilityResult, AvailableOffer, ContractStore, StoreError};
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use tracing::{debug, info};

pub struct InMemoryContractStore {
    contracts: RwLock<Vec<Contract>>,
    next_id: AtomicI32,
    search_count: AtomicUsize,
    today: NaiveDate,
}

impl Default for InMemoryContractStore {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

impl InMemoryContractStore {
    // `today` is the reference date for rejecting contracts that start or end in the past
    pub fn new(today: NaiveDate) -> Self {
        Self {
            contracts: RwLock::new(Vec::new()),
            next_id: AtomicI32::new(1),
            search_count: AtomicUsize::new(0),
            today,
        }
    }

    // Number of availability searches answered so far
    pub fn search_count(&self) -> usize {
        self.search_count.load(Ordering::SeqCst)
    }
}

// Stay parameters once the request passed the store's own checks
struct Stay {
    check_in: NaiveDate,
    check_out: NaiveDate,
    nights: i32,
    // (number_of_rooms, max_adults) per requirement row
    rows: Vec<(i32, i32)>,
}

fn bad_request(message: &str) -> StoreError {
    StoreError::status(400, message)
}

fn parse_stay(request: &SearchRequest) -> Result<Stay, StoreError> {
    let check_in = request
        .check_in_date
        .ok_or_else(|| bad_request("Check in date is required"))?;
    let nights = request
        .no_of_nights
        .ok_or_else(|| bad_request("No of nights required"))?;
    let check_out = request
        .check_out_date()
        .ok_or_else(|| bad_request("No of nights out of range"))?;

    let rows = request
        .requirements()
        .iter()
        .map(|row| match (row.number_of_rooms, row.max_adults) {
            (Some(rooms), Some(adults)) => Ok((rooms, adults)),
            (None, _) => Err(bad_request("No. of rooms are required")),
            (_, None) => Err(bad_request("No. of adults are required")),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Stay {
        check_in,
        check_out,
        nights,
        rows,
    })
}

// Price of `rooms` units of `room` for the stay, with the contract markup applied
fn total_price(room: &RoomDetail, rooms: i32, nights: i32, mark_up_rate: f64) -> f64 {
    let base = room.price_per_person * f64::from(nights) * f64::from(room.max_adults) * f64::from(rooms);
    base * (100.0 + mark_up_rate) / 100.0
}

// Offers for one contract, or None when some requirement row has no matching room
fn match_contract(contract: &Contract, stay: &Stay) -> Option<AvailabilityResult> {
    let mut available_rooms = Vec::new();

    for (index, &(rooms, adults)) in stay.rows.iter().enumerate() {
        let requirement_id = index as i32 + 1;
        let before = available_rooms.len();

        available_rooms.extend(
            contract
                .room_details
                .iter()
                .filter(|room| room.max_adults == adults && room.number_of_rooms >= rooms)
                .map(|room| AvailableOffer {
                    requirement_id,
                    room_type: room.room_type.clone(),
                    total_price: total_price(room, rooms, stay.nights, contract.mark_up_rate),
                }),
        );

        if available_rooms.len() == before {
            return None;
        }
    }

    Some(AvailabilityResult {
        hotel_name: contract.hotel_name.clone(),
        available_rooms,
    })
}

#[async_trait]
impl ContractStore for InMemoryContractStore {
    async fn search_availability(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<AvailabilityResult>, StoreError> {
        self.search_count.fetch_add(1, Ordering::SeqCst);
        let stay = parse_stay(request)?;

        let contracts = self.contracts.read();
        let results: Vec<AvailabilityResult> = contracts
            .iter()
            .filter(|contract| contract.covers(stay.check_in, stay.check_out))
            .filter_map(|contract| match_contract(contract, &stay))
            .collect();

        debug!(
            check_in = %stay.check_in,
            nights = stay.nights,
            matches = results.len(),
            "availability search answered"
        );
        Ok(results)
    }

    async fn list_contracts(&self) -> Result<Vec<Contract>, StoreError> {
        Ok(self.contracts.read().clone())
    }

    async fn create_contract(&self, mut contract: Contract) -> Result<Contract, StoreError> {
        validate_contract(&contract, self.today)
            .map_err(|e| StoreError::status(400, e.to_string()))?;

        contract.contract_id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        info!(
            contract_id = ?contract.contract_id,
            hotel = %contract.hotel_name,
            "contract created"
        );
        self.contracts.write().push(contract.clone());
        Ok(contract)
    }

    async fn search_contracts(&self, term: &str) -> Result<Vec<Contract>, StoreError> {
        Ok(self
            .contracts
            .read()
            .iter()
            .filter(|contract| contract.hotel_name == term)
            .cloned()
            .collect())
    }

    async fn delete_contract(&self, contract_id: i32) -> Result<(), StoreError> {
        let mut contracts = self.contracts.write();
        let position = contracts
            .iter()
            .position(|contract| contract.contract_id == Some(contract_id))
            .ok_or_else(|| {
                StoreError::status(404, format!("No contract with id {}", contract_id))
            })?;
        contracts.remove(position);
        info!(contract_id, "contract deleted");
        Ok(())
    }
}
