// Search request validation
// Every rule is evaluated on every call so the report is complete even when the request already fails.

use crate::requirement::SearchRequest;
use std::collections::HashSet;
use thiserror::Error;

// Validity flags for one requirement row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowReport {
    pub rooms_filled: bool,
    pub rooms_valid: bool,
    pub adults_filled: bool,
    pub adults_valid: bool,
    // Set when an earlier row already asked for the same occupancy
    pub adults_duplicate: bool,
}

impl Default for RowReport {
    // Nothing flagged until the row is validated
    fn default() -> Self {
        Self {
            rooms_filled: true,
            rooms_valid: true,
            adults_filled: true,
            adults_valid: true,
            adults_duplicate: false,
        }
    }
}

impl RowReport {
    pub fn is_valid(&self) -> bool {
        self.rooms_filled
            && self.rooms_valid
            && self.adults_filled
            && self.adults_valid
            && !self.adults_duplicate
    }
}

// One flag set for the request-level fields and one RowReport per requirement row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub check_in_date_filled: bool,
    pub no_of_nights_filled: bool,
    pub no_of_nights_valid: bool,
    pub rows: Vec<RowReport>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            check_in_date_filled: true,
            no_of_nights_filled: true,
            no_of_nights_valid: true,
            rows: vec![RowReport::default()],
        }
    }
}

// A single failed rule, with the 0-based row index for row-level rules
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Check in date is required")]
    CheckInDateMissing,

    #[error("No of nights required")]
    NightsMissing,

    #[error("No of nights must be greater than 0")]
    NightsNotPositive,

    #[error("Room {}: no. of rooms are required", .0 + 1)]
    RoomsMissing(usize),

    #[error("Room {}: no. of rooms must be greater than 0", .0 + 1)]
    RoomsNotPositive(usize),

    #[error("Room {}: no. of adults are required", .0 + 1)]
    AdultsMissing(usize),

    #[error("Room {}: no. of adults must be greater than 0", .0 + 1)]
    AdultsNotPositive(usize),

    #[error("Room {}: another room already requests this no. of adults", .0 + 1)]
    DuplicateAdults(usize),
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.check_in_date_filled
            && self.no_of_nights_filled
            && self.no_of_nights_valid
            && self.rows.iter().all(|row| !row.adults_duplicate)
            && self.rows.iter().all(|row| row.rooms_filled)
            && self.rows.iter().all(|row| row.rooms_valid)
            && self.rows.iter().all(|row| row.adults_filled)
            && self.rows.iter().all(|row| row.adults_valid)
    }

    pub fn row(&self, index: usize) -> Option<&RowReport> {
        self.rows.get(index)
    }

    // Failed rules in field order, for rendering messages next to the inputs
    pub fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !self.check_in_date_filled {
            errors.push(FieldError::CheckInDateMissing);
        }
        if !self.no_of_nights_filled {
            errors.push(FieldError::NightsMissing);
        } else if !self.no_of_nights_valid {
            errors.push(FieldError::NightsNotPositive);
        }

        for (index, row) in self.rows.iter().enumerate() {
            if !row.rooms_filled {
                errors.push(FieldError::RoomsMissing(index));
            } else if !row.rooms_valid {
                errors.push(FieldError::RoomsNotPositive(index));
            }
            if !row.adults_filled {
                errors.push(FieldError::AdultsMissing(index));
            } else if !row.adults_valid {
                errors.push(FieldError::AdultsNotPositive(index));
            }
            if row.adults_duplicate {
                errors.push(FieldError::DuplicateAdults(index));
            }
        }
        errors
    }
}

fn is_positive(value: Option<i32>) -> bool {
    value.map_or(false, |v| v > 0)
}

// Validate a search request. Never fails; a malformed request just yields false flags.
pub fn validate(request: &SearchRequest) -> (ValidationReport, bool) {
    let mut seen_adults = HashSet::new();

    let rows = request
        .requirements()
        .iter()
        .map(|room| {
            let adults_valid = is_positive(room.max_adults);
            // Only filled, valid occupancies take part in the duplicate check
            let adults_duplicate = match room.max_adults {
                Some(adults) if adults_valid => !seen_adults.insert(adults),
                _ => false,
            };

            RowReport {
                rooms_filled: room.number_of_rooms.is_some(),
                rooms_valid: is_positive(room.number_of_rooms),
                adults_filled: room.max_adults.is_some(),
                adults_valid,
                adults_duplicate,
            }
        })
        .collect();

    let report = ValidationReport {
        check_in_date_filled: request.check_in_date.is_some(),
        no_of_nights_filled: request.no_of_nights.is_some(),
        no_of_nights_valid: is_positive(request.no_of_nights),
        rows,
    };

    let valid = report.is_valid();
    (report, valid)
}
