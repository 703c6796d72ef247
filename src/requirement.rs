// Search request data model: the check-in criteria and the ordered list of room requirements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// One requested room configuration. Its identity is its 1-based position in the owning request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequirement {
    pub number_of_rooms: Option<i32>,
    pub max_adults: Option<i32>,
}

impl RoomRequirement {
    pub fn new(number_of_rooms: i32, max_adults: i32) -> Self {
        Self {
            number_of_rooms: Some(number_of_rooms),
            max_adults: Some(max_adults),
        }
    }
}

// The body posted to the contract store. `room_requirements` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub check_in_date: Option<NaiveDate>,
    pub no_of_nights: Option<i32>,
    room_requirements: Vec<RoomRequirement>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            check_in_date: None,
            no_of_nights: None,
            room_requirements: vec![RoomRequirement::default()],
        }
    }
}

impl SearchRequest {
    // A blank request with a single blank requirement row
    pub fn new() -> Self {
        Self::default()
    }

    // Build a request from existing rows; an empty list still yields one blank row
    pub fn with_requirements(
        check_in_date: Option<NaiveDate>,
        no_of_nights: Option<i32>,
        requirements: Vec<RoomRequirement>,
    ) -> Self {
        let mut request = Self {
            check_in_date,
            no_of_nights,
            room_requirements: requirements,
        };
        if request.room_requirements.is_empty() {
            request.room_requirements.push(RoomRequirement::default());
        }
        request
    }

    pub fn requirements(&self) -> &[RoomRequirement] {
        &self.room_requirements
    }

    pub fn len(&self) -> usize {
        self.room_requirements.len()
    }

    // Always false, kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.room_requirements.is_empty()
    }

    pub fn add_room(&mut self) {
        self.room_requirements.push(RoomRequirement::default());
    }

    // Removing the last remaining row, or an out-of-range index, is a no-op
    pub fn remove_room(&mut self, index: usize) -> bool {
        if self.room_requirements.len() > 1 && index < self.room_requirements.len() {
            self.room_requirements.remove(index);
            true
        } else {
            false
        }
    }

    pub fn room_mut(&mut self, index: usize) -> Option<&mut RoomRequirement> {
        self.room_requirements.get_mut(index)
    }

    pub fn set_room(&mut self, index: usize, requirement: RoomRequirement) -> bool {
        match self.room_requirements.get_mut(index) {
            Some(row) => {
                *row = requirement;
                true
            }
            None => false,
        }
    }

    // Back to a blank request with one blank row
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn check_out_date(&self) -> Option<NaiveDate> {
        let nights = self.no_of_nights?;
        let check_in = self.check_in_date?;
        check_in.checked_add_days(chrono::Days::new(u64::try_from(nights).ok()?))
    }
}

// Map a 1-based requirement id back into the request's rows.
// Stale ids from a superseded search resolve to None instead of failing.
pub fn lookup_requirement(request: &SearchRequest, requirement_id: i32) -> Option<&RoomRequirement> {
    let index = usize::try_from(requirement_id).ok()?.checked_sub(1)?;
    request.room_requirements.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn two_rows() -> SearchRequest {
        SearchRequest::with_requirements(
            NaiveDate::from_ymd_opt(2025, 6, 1),
            Some(3),
            vec![RoomRequirement::new(1, 2), RoomRequirement::new(2, 3)],
        )
    }

    #[test]
    fn test_new_request_has_one_blank_row() {
        let request = SearchRequest::new();
        assert_eq!(request.len(), 1);
        assert_eq!(request.requirements()[0], RoomRequirement::default());
        assert!(request.check_in_date.is_none());
        assert!(request.no_of_nights.is_none());
    }

    #[test]
    fn test_empty_requirement_list_gets_a_blank_row() {
        let request = SearchRequest::with_requirements(None, None, vec![]);
        assert_eq!(request.len(), 1);
        assert!(!request.is_empty());
    }

    #[test]
    fn test_removing_only_row_is_noop() {
        let mut request = SearchRequest::new();
        assert!(!request.remove_room(0));
        assert_eq!(request.len(), 1);
    }

    #[test]
    fn test_add_and_remove_rows() {
        let mut request = two_rows();
        request.add_room();
        assert_eq!(request.len(), 3);

        assert!(request.remove_room(0));
        assert_eq!(request.len(), 2);
        assert_eq!(request.requirements()[0], RoomRequirement::new(2, 3));

        assert!(!request.remove_room(5));
        assert_eq!(request.len(), 2);
    }

    #[test]
    fn test_edit_row_in_place() {
        let mut request = SearchRequest::new();
        if let Some(row) = request.room_mut(0) {
            row.max_adults = Some(4);
        }
        assert_eq!(request.requirements()[0].max_adults, Some(4));
        assert!(request.set_room(0, RoomRequirement::new(2, 2)));
        assert!(!request.set_room(1, RoomRequirement::new(2, 2)));
    }

    #[test]
    fn test_reset_restores_blank_request() {
        let mut request = two_rows();
        request.reset();
        assert_eq!(request, SearchRequest::new());
    }

    #[test_case(1, Some(RoomRequirement::new(1, 2)); "first row")]
    #[test_case(2, Some(RoomRequirement::new(2, 3)); "second row")]
    #[test_case(3, None; "past the end")]
    #[test_case(0, None; "zero id")]
    #[test_case(-1, None; "negative id")]
    fn test_lookup_requirement(id: i32, expected: Option<RoomRequirement>) {
        let request = two_rows();
        assert_eq!(lookup_requirement(&request, id).copied(), expected);
    }

    #[test]
    fn test_check_out_date() {
        let request = two_rows();
        assert_eq!(request.check_out_date(), NaiveDate::from_ymd_opt(2025, 6, 4));

        let mut negative = two_rows();
        negative.no_of_nights = Some(-2);
        assert_eq!(negative.check_out_date(), None);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(two_rows()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "checkInDate": "2025-06-01",
                "noOfNights": 3,
                "roomRequirements": [
                    {"numberOfRooms": 1, "maxAdults": 2},
                    {"numberOfRooms": 2, "maxAdults": 3}
                ]
            })
        );

        let blank = serde_json::to_value(SearchRequest::new()).unwrap();
        assert_eq!(
            blank,
            serde_json::json!({
                "checkInDate": null,
                "noOfNights": null,
                "roomRequirements": [{"numberOfRooms": null, "maxAdults": null}]
            })
        );
    }
}
