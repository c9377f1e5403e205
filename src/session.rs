use crate::constants;
use crate::error::GeoError;
use crate::types::{AddressCandidate, AddressDocument, PlaceDocument, SearchMode};
use tracing::debug;

/// Where a resolution session currently stands. Search and device-location
/// paths share the terminal states; every path returns to `Idle` on
/// selection or an explicit clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Searching,
    Results,
    NoResults,
    Error,
    LocatingDevice,
}

/// Monotonic per-session identifier for one dispatched search. Responses
/// carrying a stale token are discarded, so a superseded request can never
/// overwrite the results of a newer one.
pub type RequestToken = u64;

/// Result payload handed back to the session when a gateway call finishes.
#[derive(Debug, Clone)]
pub enum SearchResults {
    Structured(Vec<AddressDocument>),
    Keyword(Vec<PlaceDocument>),
}

/// Pure selection reducer: the canonical display string for one candidate.
/// Road-form address wins when present, lot-form is the fallback; the
/// keyword endpoint sends an empty string rather than null for a missing
/// road address, so empty counts as absent.
pub fn select_address(candidate: &AddressCandidate) -> String {
    match candidate {
        AddressCandidate::Structured(doc) => doc
            .road_address
            .as_ref()
            .map(|road| road.address_name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| doc.address.address_name.clone()),
        AddressCandidate::Place(place) => {
            if place.road_address_name.is_empty() {
                place.address_name.clone()
            } else {
                place.road_address_name.clone()
            }
        }
    }
}

/// Per-session state for the address widget: the query text, both candidate
/// lists, and the active mode, owned in one place so `clear` is a single
/// operation instead of scattered field resets.
pub struct SearchSession {
    mode: SearchMode,
    query: String,
    address_results: Vec<AddressDocument>,
    keyword_results: Vec<PlaceDocument>,
    state: SessionState,
    error: Option<String>,
    token: RequestToken,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            mode: SearchMode::Structured,
            query: String::new(),
            address_results: Vec::new(),
            keyword_results: Vec::new(),
            state: SessionState::Idle,
            error: None,
            token: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn address_results(&self) -> &[AddressDocument] {
        &self.address_results
    }

    pub fn keyword_results(&self) -> &[PlaceDocument] {
        &self.keyword_results
    }

    /// Switches the active search tab. Does not touch pending results; each
    /// tab keeps its own list until the next dispatch or clear.
    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    /// Query Dispatcher. Empty or whitespace-only text is a no-op: nothing
    /// is dispatched, no list changes, no state transition. Otherwise the
    /// session enters `Searching` and hands back the token the caller must
    /// echo into `complete_search`.
    pub fn dispatch(&mut self, text: &str, mode: SearchMode) -> Option<(RequestToken, SearchMode)> {
        if text.trim().is_empty() {
            return None;
        }
        self.query = text.to_string();
        self.mode = mode;
        self.error = None;
        self.state = SessionState::Searching;
        self.token += 1;
        debug!("Dispatched search request {}", self.token);
        Some((self.token, mode))
    }

    /// Dispatch with the currently active mode (Enter-key submission).
    pub fn submit(&mut self, text: &str) -> Option<(RequestToken, SearchMode)> {
        self.dispatch(text, self.mode)
    }

    /// Applies the outcome of a dispatched search. Outcomes whose token is
    /// not the current one belong to a superseded request and are dropped.
    /// Returns whether the outcome was applied.
    pub fn complete_search(
        &mut self,
        token: RequestToken,
        outcome: Result<SearchResults, GeoError>,
    ) -> bool {
        if token != self.token {
            debug!("Dropping stale search response {} (current {})", token, self.token);
            return false;
        }

        match outcome {
            Ok(SearchResults::Structured(documents)) => {
                if documents.is_empty() {
                    self.address_results.clear();
                    self.error = Some(constants::MSG_NO_RESULTS_STRUCTURED.to_string());
                    self.state = SessionState::NoResults;
                } else {
                    self.address_results = documents;
                    self.error = None;
                    self.state = SessionState::Results;
                }
            }
            Ok(SearchResults::Keyword(documents)) => {
                if documents.is_empty() {
                    self.keyword_results.clear();
                    self.error = Some(constants::MSG_NO_RESULTS_KEYWORD.to_string());
                    self.state = SessionState::NoResults;
                } else {
                    self.keyword_results = documents;
                    self.error = None;
                    self.state = SessionState::Results;
                }
            }
            Err(e) => {
                match self.mode {
                    SearchMode::Structured => self.address_results.clear(),
                    SearchMode::Keyword => self.keyword_results.clear(),
                }
                self.error = Some(e.to_string());
                self.state = SessionState::Error;
            }
        }
        true
    }

    /// Marks the start of the device-location path.
    pub fn begin_locating(&mut self) {
        self.error = None;
        self.state = SessionState::LocatingDevice;
    }

    /// Applies the outcome of the device-location path: a resolved address
    /// string, or any failure from coordinate acquisition or reverse
    /// geocoding. A resolved address behaves like a selection (both lists
    /// and the query are cleared); a failure leaves the lists untouched.
    pub fn complete_locating(&mut self, outcome: Result<String, GeoError>) -> Option<String> {
        match outcome {
            Ok(address) => {
                self.reset_candidates();
                self.state = SessionState::Idle;
                Some(address)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.state = SessionState::Error;
                None
            }
        }
    }

    /// Selects one candidate: emits its canonical address string and
    /// atomically clears both candidate lists, the query text, and any
    /// error. Idempotent when the lists are already empty.
    pub fn select(&mut self, candidate: &AddressCandidate) -> String {
        let resolved = select_address(candidate);
        self.reset_candidates();
        self.state = SessionState::Idle;
        resolved
    }

    /// Resets the whole session to `Idle`. Also invalidates any in-flight
    /// request: its response will arrive with a stale token.
    pub fn clear(&mut self) {
        self.reset_candidates();
        self.state = SessionState::Idle;
        self.token += 1;
    }

    fn reset_candidates(&mut self) {
        self.address_results.clear();
        self.keyword_results.clear();
        self.query.clear();
        self.error = None;
    }
}
