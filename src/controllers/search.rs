//! Global search controller: the server-backed path, separate from
//! the synchronous local filters on the list pages.

use crate::gateway::ClinicApi;
use crate::models::{GlobalSearchResults, Patient};

use super::CancelToken;

const SEARCH_ERROR: &str = "No se pudo completar la búsqueda.";

/// Page size for the paginated patient search.
const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Default)]
pub struct SearchController {
    query: String,
    page: u32,
    patients: Vec<Patient>,
    global: Option<GlobalSearchResults>,
    loading: bool,
    load_error: Option<String>,
}

impl SearchController {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the query locally; nothing is sent until a search is
    /// dispatched.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn global(&self) -> Option<&GlobalSearchResults> {
        self.global.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Run the paginated patient search. An empty query clears the
    /// results locally without a round trip.
    pub async fn search_patients<A: ClinicApi>(&mut self, api: &A, cancel: &CancelToken) {
        if self.query.trim().is_empty() {
            self.patients.clear();
            self.load_error = None;
            return;
        }

        self.loading = true;
        self.load_error = None;
        let result = api
            .search_patients(&self.query, self.page, DEFAULT_PAGE_SIZE)
            .await;
        if cancel.is_cancelled() {
            return;
        }
        self.loading = false;

        match result {
            Ok(patients) => self.patients = patients,
            Err(err) => {
                tracing::error!(error = %err, query = %self.query, "patient search failed");
                self.patients.clear();
                self.load_error = Some(SEARCH_ERROR.into());
            }
        }
    }

    /// Run the global search across record families.
    pub async fn search_global<A: ClinicApi>(&mut self, api: &A, cancel: &CancelToken) {
        if self.query.trim().is_empty() {
            self.global = None;
            self.load_error = None;
            return;
        }

        self.loading = true;
        self.load_error = None;
        let result = api.search_global(&self.query).await;
        if cancel.is_cancelled() {
            return;
        }
        self.loading = false;

        match result {
            Ok(results) => self.global = Some(results),
            Err(err) => {
                tracing::error!(error = %err, query = %self.query, "global search failed");
                self.global = None;
                self.load_error = Some(SEARCH_ERROR.into());
            }
        }
    }
}
