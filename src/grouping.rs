// Re-associating matched offers with the requirement rows they satisfy

use crate::requirement::{lookup_requirement, RoomRequirement, SearchRequest};
use crate::store::{AvailabilityResult, AvailableOffer};
use std::collections::BTreeMap;

// requirement_id -> offers for that row, in the order the store returned them
pub type GroupedOffers = BTreeMap<i32, Vec<AvailableOffer>>;

// Builds a fresh mapping on every call, so nothing carries over between results
pub fn group(result: &AvailabilityResult) -> GroupedOffers {
    let mut groups = GroupedOffers::new();
    for offer in &result.available_rooms {
        groups
            .entry(offer.requirement_id)
            .or_insert_with(Vec::new)
            .push(offer.clone());
    }
    groups
}

// Detail view of one hotel's result, grouped per requirement row.
// Opening another result builds a new view; closing hands the result back.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    result: AvailabilityResult,
    search: Option<SearchRequest>,
    groups: GroupedOffers,
}

impl DetailView {
    // `search` is the request that produced the result, used to label each group
    pub fn open(result: AvailabilityResult, search: Option<SearchRequest>) -> Self {
        let groups = group(&result);
        Self {
            result,
            search,
            groups,
        }
    }

    pub fn hotel_name(&self) -> &str {
        &self.result.hotel_name
    }

    pub fn result(&self) -> &AvailabilityResult {
        &self.result
    }

    pub fn groups(&self) -> &GroupedOffers {
        &self.groups
    }

    // The requirement row an id refers to, if the originating search still has it
    pub fn requirement(&self, requirement_id: i32) -> Option<&RoomRequirement> {
        self.search
            .as_ref()
            .and_then(|search| lookup_requirement(search, requirement_id))
    }

    // (requirement_id, requirement row if known, offers) in requirement order
    pub fn sections(&self) -> impl Iterator<Item = (i32, Option<&RoomRequirement>, &[AvailableOffer])> {
        self.groups
            .iter()
            .map(move |(&id, offers)| (id, self.requirement(id), offers.as_slice()))
    }

    // Drops the grouping and returns the result it was built from
    pub fn close(self) -> AvailabilityResult {
        self.result
    }
}
