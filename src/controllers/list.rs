//! List page controllers: load-on-mount, synchronous filtering,
//! confirm-gated deletes, and full reload after every mutation.
//!
//! A load failure never aborts the page: the patients page falls back
//! to the fixed illustrative dataset, every other list degrades to
//! empty, and a dismissable banner message records what happened.

use crate::demo;
use crate::derived::{matches_search, status_counts, StatusCounts};
use crate::gateway::ClinicApi;
use crate::models::{Evaluation, EvaluationFilter, EvaluationStatus, Patient, PatientFilter};

use super::CancelToken;

const PATIENTS_LOAD_ERROR: &str =
    "No se pudo conectar con el servidor. Mostrando datos de ejemplo.";
const EVALUATIONS_LOAD_ERROR: &str = "No se pudieron cargar las evaluaciones.";
const PATIENT_DELETE_ERROR: &str = "Error al eliminar el paciente";
const EVALUATION_DELETE_ERROR: &str = "Error al eliminar la evaluación";

// ═══════════════════════════════════════════════════════════
// Patients page
// ═══════════════════════════════════════════════════════════

#[derive(Default)]
pub struct PatientListController {
    patients: Vec<Patient>,
    filter: PatientFilter,
    loading: bool,
    load_error: Option<String>,
    delete_error: Option<String>,
    pending_delete: Option<String>,
}

impl PatientListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the full list. On failure the page stays usable: the
    /// fixed demo dataset is shown and a banner message is recorded.
    ///
    /// Also the mutation reload: callers re-invoke this after any
    /// successful create/update/delete instead of patching in place.
    pub async fn load<A: ClinicApi>(&mut self, api: &A, cancel: &CancelToken) {
        self.loading = true;
        self.load_error = None;

        let result = api.list_patients().await;
        if cancel.is_cancelled() {
            return;
        }
        self.loading = false;

        match result {
            Ok(patients) => {
                tracing::debug!(count = patients.len(), "patients loaded");
                self.patients = patients;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load patients, using demo data");
                self.patients = demo::sample_patients();
                self.load_error = Some(PATIENTS_LOAD_ERROR.into());
            }
        }
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn dismiss_load_error(&mut self) {
        self.load_error = None;
    }

    pub fn delete_error(&self) -> Option<&str> {
        self.delete_error.as_deref()
    }

    /// Recomputed synchronously from the loaded set on every keystroke;
    /// local filtering never makes a server round trip.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
    }

    pub fn filtered(&self) -> Vec<&Patient> {
        self.patients
            .iter()
            .filter(|patient| matches_search(Some(patient), &self.filter.search))
            .collect()
    }

    // ── delete flow ─────────────────────────────────────────

    /// First step of the two-step delete: remember what the user asked
    /// to remove and wait for confirmation.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Execute the confirmed delete, then re-fetch the whole list. A
    /// failure surfaces an alert message and leaves the list unchanged.
    pub async fn confirm_delete<A: ClinicApi>(&mut self, api: &A, cancel: &CancelToken) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        self.delete_error = None;

        match api.delete_patient(&id).await {
            Ok(()) => {
                tracing::info!(patient_id = %id, "patient deleted");
                self.load(api, cancel).await;
            }
            Err(err) => {
                if cancel.is_cancelled() {
                    return;
                }
                tracing::error!(error = %err, patient_id = %id, "failed to delete patient");
                self.delete_error = Some(PATIENT_DELETE_ERROR.into());
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Evaluations page
// ═══════════════════════════════════════════════════════════

#[derive(Default)]
pub struct EvaluationListController {
    evaluations: Vec<Evaluation>,
    patients: Vec<Patient>,
    filter: EvaluationFilter,
    loading: bool,
    load_error: Option<String>,
    delete_error: Option<String>,
    pending_delete: Option<String>,
}

impl EvaluationListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch evaluations and the patient lookup concurrently. The two
    /// loads are independent: failure of one degrades that list to
    /// empty without blocking the other.
    pub async fn load<A: ClinicApi>(&mut self, api: &A, cancel: &CancelToken) {
        self.loading = true;
        self.load_error = None;

        let (evaluations, patients) = tokio::join!(api.list_evaluations(), api.list_patients());
        if cancel.is_cancelled() {
            return;
        }
        self.loading = false;

        self.evaluations = match evaluations {
            Ok(evaluations) => evaluations,
            Err(err) => {
                tracing::error!(error = %err, "failed to load evaluations");
                self.load_error = Some(EVALUATIONS_LOAD_ERROR.into());
                Vec::new()
            }
        };
        self.patients = match patients {
            Ok(patients) => patients,
            Err(err) => {
                tracing::error!(error = %err, "failed to load patient lookup");
                Vec::new()
            }
        };
    }

    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn dismiss_load_error(&mut self) {
        self.load_error = None;
    }

    pub fn delete_error(&self) -> Option<&str> {
        self.delete_error.as_deref()
    }

    /// Resolve an evaluation's weak patient reference. `None` renders
    /// as the "Paciente no encontrado" placeholder, never an error.
    pub fn patient_for(&self, evaluation: &Evaluation) -> Option<&Patient> {
        self.patients
            .iter()
            .find(|patient| patient.id == evaluation.patient_id)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
    }

    pub fn set_status_filter(&mut self, status: Option<EvaluationStatus>) {
        self.filter.status = status;
    }

    /// Search matches against the resolved patient; the status filter
    /// is exact. Both recomputed synchronously from the loaded set.
    pub fn filtered(&self) -> Vec<&Evaluation> {
        self.evaluations
            .iter()
            .filter(|evaluation| {
                matches_search(self.patient_for(evaluation), &self.filter.search)
                    && self
                        .filter
                        .status
                        .map_or(true, |status| evaluation.status == status)
            })
            .collect()
    }

    /// Counts for the page's stat tiles, over the unfiltered set.
    pub fn counts(&self) -> StatusCounts {
        status_counts(&self.evaluations)
    }

    // ── delete flow ─────────────────────────────────────────

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete<A: ClinicApi>(&mut self, api: &A, cancel: &CancelToken) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        self.delete_error = None;

        match api.delete_evaluation(&id).await {
            Ok(()) => {
                tracing::info!(evaluation_id = %id, "evaluation deleted");
                self.load(api, cancel).await;
            }
            Err(err) => {
                if cancel.is_cancelled() {
                    return;
                }
                tracing::error!(error = %err, evaluation_id = %id, "failed to delete evaluation");
                self.delete_error = Some(EVALUATION_DELETE_ERROR.into());
            }
        }
    }
}
