//! REST gateway: the boundary translating domain operations into HTTP
//! calls against the clinic backend.
//!
//! `ClinicApi` is the seam the controllers program against; `ApiClient`
//! is the reqwest-backed implementation and `MockApi` the in-memory
//! test double. Response-shape probing is confined to `normalize`.

pub mod http;
pub mod mock;
pub mod normalize;

pub use http::ApiClient;
pub use mock::MockApi;

use thiserror::Error;

use crate::models::{
    DashboardStats, DocumentRecord, Evaluation, EvaluationDraft, GlobalSearchResults, Patient,
    PatientDraft,
};

/// Gateway-level failures. Display strings are log-facing; controllers
/// translate them into the user-visible messages.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot reach backend at {0}")]
    Connect(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP transport error: {0}")]
    Http(String),
    /// Non-2xx response. `message` carries the backend's `error` field
    /// when the body had one, otherwise it is empty.
    #[error("backend responded {status}: {message}")]
    Status { status: u16, message: String },
    #[error("cannot decode backend response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The human-readable message the backend attached to a failed
    /// write, surfaced verbatim by the forms when present.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Typed surface of the clinic REST backend.
///
/// One method per endpoint the pages consume. Implementations must not
/// retry; the controllers own the retry/reload policy.
#[allow(async_fn_in_trait)]
pub trait ClinicApi {
    // ── Patients ────────────────────────────────────────────

    async fn list_patients(&self) -> Result<Vec<Patient>, ApiError>;
    async fn get_patient(&self, id: &str) -> Result<Patient, ApiError>;
    async fn create_patient(&self, draft: &PatientDraft) -> Result<Patient, ApiError>;
    async fn update_patient(&self, id: &str, draft: &PatientDraft) -> Result<Patient, ApiError>;
    async fn delete_patient(&self, id: &str) -> Result<(), ApiError>;

    // ── Evaluations ─────────────────────────────────────────

    async fn list_evaluations(&self) -> Result<Vec<Evaluation>, ApiError>;
    async fn get_evaluation(&self, id: &str) -> Result<Evaluation, ApiError>;
    async fn evaluations_for_patient(&self, patient_id: &str)
        -> Result<Vec<Evaluation>, ApiError>;
    async fn create_evaluation(&self, draft: &EvaluationDraft) -> Result<Evaluation, ApiError>;
    async fn update_evaluation(
        &self,
        id: &str,
        draft: &EvaluationDraft,
    ) -> Result<Evaluation, ApiError>;
    async fn delete_evaluation(&self, id: &str) -> Result<(), ApiError>;

    // ── Documents ───────────────────────────────────────────

    async fn documents_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Vec<DocumentRecord>, ApiError>;
    async fn download_document(&self, id: &str) -> Result<Vec<u8>, ApiError>;
    async fn delete_document(&self, id: &str) -> Result<(), ApiError>;

    // ── Dashboard & search ──────────────────────────────────

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;
    async fn search_patients(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Patient>, ApiError>;
    async fn search_global(&self, query: &str) -> Result<GlobalSearchResults, ApiError>;
}

/// Download a document and write the payload to `path`.
pub async fn download_to<A: ClinicApi>(
    api: &A,
    id: &str,
    path: &std::path::Path,
) -> Result<(), ApiError> {
    let bytes = api.download_document(id).await?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| ApiError::Http(format!("cannot write download: {e}")))
}
