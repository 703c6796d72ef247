// Availability search form: validation gate, single-flight submission and result state

use crate::grouping::DetailView;
use crate::requirement::SearchRequest;
use crate::store::{AvailabilityResult, ContractStore, StoreError};
use crate::validation::{validate, ValidationReport};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, error, info, warn};

// Idle -> Submitting -> {Success, NotFound, Failed} -> Idle
// Only Submitting rejects a new submission; the finished phases behave like Idle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Submitting,
    Success,
    NotFound,
    Failed(String),
}

impl SearchPhase {
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            SearchPhase::Success | SearchPhase::NotFound | SearchPhase::Failed(_)
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("A search is already in flight")]
    InFlight,

    #[error("Search request is invalid ({} field errors)", .0.errors().len())]
    Invalid(ValidationReport),
}

#[derive(Debug, Default)]
struct FormState {
    request: SearchRequest,
    report: ValidationReport,
    phase: SearchPhase,
    results: Vec<AvailabilityResult>,
    // Copy of the request behind the current results
    last_search: Option<SearchRequest>,
}

// How a finished store call maps onto the form
fn classify(outcome: Result<Vec<AvailabilityResult>, StoreError>) -> (SearchPhase, Vec<AvailabilityResult>) {
    match outcome {
        Ok(results) if results.is_empty() => (SearchPhase::NotFound, results),
        Ok(results) => (SearchPhase::Success, results),
        Err(e) if e.is_no_match() => (SearchPhase::NotFound, Vec::new()),
        Err(e) => (SearchPhase::Failed(e.to_string()), Vec::new()),
    }
}

// Moves the form out of Submitting when `submit` is dropped before the store answers
struct InFlightGuard<'a> {
    state: &'a Mutex<FormState>,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock();
        if state.phase == SearchPhase::Submitting {
            warn!("search dropped before the store answered");
            state.phase = SearchPhase::Failed("search cancelled".to_string());
        }
    }
}

// One search form session. Owns its request and report exclusively.
#[derive(Debug, Default)]
pub struct SearchForm {
    state: Mutex<FormState>,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    // Edit the in-progress request
    pub fn edit<R>(&self, f: impl FnOnce(&mut SearchRequest) -> R) -> R {
        f(&mut self.state.lock().request)
    }

    pub fn add_room(&self) {
        self.state.lock().request.add_room();
    }

    pub fn remove_room(&self, index: usize) -> bool {
        self.state.lock().request.remove_room(index)
    }

    pub fn request(&self) -> SearchRequest {
        self.state.lock().request.clone()
    }

    // Report from the most recent validation; stale after a request reset
    pub fn report(&self) -> ValidationReport {
        self.state.lock().report.clone()
    }

    pub fn phase(&self) -> SearchPhase {
        self.state.lock().phase.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.lock().phase == SearchPhase::Submitting
    }

    pub fn is_not_found(&self) -> bool {
        self.state.lock().phase == SearchPhase::NotFound
    }

    // Set only when the last search returned at least one result
    pub fn success_message(&self) -> bool {
        self.state.lock().phase == SearchPhase::Success
    }

    pub fn results(&self) -> Vec<AvailabilityResult> {
        self.state.lock().results.clone()
    }

    pub fn last_search(&self) -> Option<SearchRequest> {
        self.state.lock().last_search.clone()
    }

    // Re-run validation on the current request and keep the report
    pub fn validate(&self) -> bool {
        let mut state = self.state.lock();
        let (report, valid) = validate(&state.request);
        state.report = report;
        valid
    }

    // Move a finished search back to Idle, e.g. when its banner is dismissed
    pub fn acknowledge(&self) {
        let mut state = self.state.lock();
        if state.phase.is_finished() {
            state.phase = SearchPhase::Idle;
        }
    }

    // Open the detail view for one of the current results
    pub fn open_result(&self, index: usize) -> Option<DetailView> {
        let state = self.state.lock();
        let result = state.results.get(index)?.clone();
        Some(DetailView::open(result, state.last_search.clone()))
    }

    // Validate and, when valid, run the search against `store`.
    // Rejected while another submission is in flight; the store is not called for invalid requests.
    pub async fn submit<S>(&self, store: &S) -> Result<SearchPhase, SubmitError>
    where
        S: ContractStore + ?Sized,
    {
        let snapshot = {
            let mut state = self.state.lock();
            if state.phase == SearchPhase::Submitting {
                warn!("search submitted while another is in flight, ignoring");
                return Err(SubmitError::InFlight);
            }

            let (report, valid) = validate(&state.request);
            state.report = report;
            if !valid {
                info!(errors = state.report.errors().len(), "validation failed");
                state.results.clear();
                return Err(SubmitError::Invalid(state.report.clone()));
            }

            state.phase = SearchPhase::Submitting;
            state.request.clone()
        };

        let mut guard = InFlightGuard {
            state: &self.state,
            armed: true,
        };
        debug!(rows = snapshot.len(), "searching available contracts");
        let outcome = store.search_availability(&snapshot).await;
        guard.armed = false;
        let (phase, results) = classify(outcome);

        let mut state = self.state.lock();
        match &phase {
            SearchPhase::Failed(message) => {
                // Keep the request and the previous results so the user can retry
                error!(%message, "error searching contracts");
            }
            _ => {
                info!(hotels = results.len(), not_found = (phase == SearchPhase::NotFound), "search finished");
                state.results = results;
                state.last_search = Some(snapshot);
                state.request.reset();
            }
        }
        state.phase = phase.clone();
        Ok(phase)
    }
}
