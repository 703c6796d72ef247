// Hotel room-rate contracts as held by the contract store

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("Hotel name is required")]
    MissingHotelName,

    #[error("Mark up should be between 0 and 100, got {0}")]
    MarkUpOutOfRange(f64),

    #[error("Room details are required")]
    MissingRoomDetails,

    #[error("Room {}: room type is required", .0 + 1)]
    MissingRoomType(usize),

    #[error("Room {}: price per person must be positive", .0 + 1)]
    NegativePrice(usize),

    #[error("Room {}: number of rooms must be at least 1", .0 + 1)]
    TooFewRooms(usize),

    #[error("Room {}: maximum adults must be at least 1", .0 + 1)]
    TooFewAdults(usize),

    #[error("Start date cannot be in the past")]
    StartInPast,

    #[error("End date must be after start date")]
    EndBeforeStart,

    #[error("End date cannot be in the past")]
    EndInPast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetail {
    pub room_type: String,
    pub price_per_person: f64,
    pub number_of_rooms: i32,
    pub max_adults: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    // Assigned by the store on creation
    pub contract_id: Option<i32>,
    pub hotel_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    // Percentage, 0..=100
    pub mark_up_rate: f64,
    pub room_details: Vec<RoomDetail>,
}

impl Contract {
    // Whether the contract term overlaps the stay [check_in, check_out]
    pub fn covers(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.start_date <= check_out && self.end_date >= check_in
    }
}

// Checks applied before a contract is accepted. Dates are judged against `today`.
pub fn validate_contract(contract: &Contract, today: NaiveDate) -> Result<(), ContractError> {
    if contract.hotel_name.trim().is_empty() {
        return Err(ContractError::MissingHotelName);
    }
    if !(0.0..=100.0).contains(&contract.mark_up_rate) {
        return Err(ContractError::MarkUpOutOfRange(contract.mark_up_rate));
    }
    if contract.room_details.is_empty() {
        return Err(ContractError::MissingRoomDetails);
    }

    for (index, room) in contract.room_details.iter().enumerate() {
        if room.room_type.trim().is_empty() {
            return Err(ContractError::MissingRoomType(index));
        }
        if room.price_per_person < 0.0 {
            return Err(ContractError::NegativePrice(index));
        }
        if room.number_of_rooms < 1 {
            return Err(ContractError::TooFewRooms(index));
        }
        if room.max_adults < 1 {
            return Err(ContractError::TooFewAdults(index));
        }
    }

    if contract.start_date < today {
        return Err(ContractError::StartInPast);
    }
    if contract.end_date < contract.start_date {
        return Err(ContractError::EndBeforeStart);
    }
    if contract.end_date < today {
        return Err(ContractError::EndInPast);
    }

    Ok(())
}
