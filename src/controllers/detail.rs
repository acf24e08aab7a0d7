//! Detail page controllers: a single record plus its related data.
//!
//! A missing primary record renders as an explicit "not found"
//! placeholder, never a page-level failure; related lists are loaded
//! independently and degrade to empty on their own errors.

use crate::gateway::ClinicApi;
use crate::models::{DocumentRecord, Evaluation, Patient};

use super::CancelToken;

const DOWNLOAD_ERROR: &str = "Error al descargar el documento";
const EVALUATION_DELETE_ERROR: &str = "Error al eliminar la evaluación";

// ═══════════════════════════════════════════════════════════
// Patient detail
// ═══════════════════════════════════════════════════════════

#[derive(Default)]
pub struct PatientDetailController {
    patient: Option<Patient>,
    evaluations: Vec<Evaluation>,
    documents: Vec<DocumentRecord>,
    loading: bool,
    not_found: bool,
    download_error: Option<String>,
    delete_error: Option<String>,
    pending_delete: Option<String>,
}

impl PatientDetailController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the patient, then its evaluations and documents
    /// concurrently. The child loads are independent of each other;
    /// a missing patient short-circuits into the not-found state.
    pub async fn load<A: ClinicApi>(&mut self, api: &A, id: &str, cancel: &CancelToken) {
        self.loading = true;
        self.not_found = false;

        let patient = api.get_patient(id).await;
        if cancel.is_cancelled() {
            return;
        }
        let patient = match patient {
            Ok(patient) => patient,
            Err(err) => {
                tracing::warn!(error = %err, patient_id = %id, "patient unavailable");
                self.loading = false;
                self.patient = None;
                self.not_found = true;
                self.evaluations.clear();
                self.documents.clear();
                return;
            }
        };

        let (evaluations, documents) = tokio::join!(
            api.evaluations_for_patient(id),
            api.documents_for_patient(id)
        );
        if cancel.is_cancelled() {
            return;
        }
        self.loading = false;
        self.patient = Some(patient);
        self.evaluations = match evaluations {
            Ok(evaluations) => evaluations,
            Err(err) => {
                tracing::error!(error = %err, "failed to load patient evaluations");
                Vec::new()
            }
        };
        self.documents = match documents {
            Ok(documents) => documents,
            Err(err) => {
                tracing::error!(error = %err, "failed to load patient documents");
                Vec::new()
            }
        };
    }

    pub fn patient(&self) -> Option<&Patient> {
        self.patient.as_ref()
    }

    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True when the page should render the "Paciente no encontrado"
    /// placeholder instead of the record.
    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    pub fn download_error(&self) -> Option<&str> {
        self.download_error.as_deref()
    }

    pub fn delete_error(&self) -> Option<&str> {
        self.delete_error.as_deref()
    }

    /// Fetch a document's payload for saving. Failures surface an
    /// alert message and return nothing.
    pub async fn download_document<A: ClinicApi>(
        &mut self,
        api: &A,
        id: &str,
    ) -> Option<Vec<u8>> {
        self.download_error = None;
        match api.download_document(id).await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::error!(error = %err, document_id = %id, "document download failed");
                self.download_error = Some(DOWNLOAD_ERROR.into());
                None
            }
        }
    }

    // ── evaluation delete from the detail page ──────────────

    pub fn request_delete_evaluation(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete_evaluation(&mut self) {
        self.pending_delete = None;
    }

    /// Execute the confirmed delete, then reload the whole detail
    /// page so counts and tabs stay consistent with the store.
    pub async fn confirm_delete_evaluation<A: ClinicApi>(
        &mut self,
        api: &A,
        cancel: &CancelToken,
    ) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        self.delete_error = None;

        match api.delete_evaluation(&id).await {
            Ok(()) => {
                tracing::info!(evaluation_id = %id, "evaluation deleted");
                if let Some(patient_id) = self.patient.as_ref().map(|p| p.id.clone()) {
                    self.load(api, &patient_id, cancel).await;
                }
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

// ═══════════════════════════════════════════════════════════
// Evaluation detail
// ═══════════════════════════════════════════════════════════

#[derive(Default)]
pub struct EvaluationDetailController {
    evaluation: Option<Evaluation>,
    patient: Option<Patient>,
    loading: bool,
    not_found: bool,
}

impl EvaluationDetailController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the evaluation, then resolve its patient. A patient that
    /// was deleted since leaves a placeholder; the page still renders.
    pub async fn load<A: ClinicApi>(&mut self, api: &A, id: &str, cancel: &CancelToken) {
        self.loading = true;
        self.not_found = false;

        let evaluation = api.get_evaluation(id).await;
        if cancel.is_cancelled() {
            return;
        }
        let evaluation = match evaluation {
            Ok(evaluation) => evaluation,
            Err(err) => {
                tracing::warn!(error = %err, evaluation_id = %id, "evaluation unavailable");
                self.loading = false;
                self.evaluation = None;
                self.patient = None;
                self.not_found = true;
                return;
            }
        };

        let patient = if evaluation.patient_id.is_empty() {
            None
        } else {
            match api.get_patient(&evaluation.patient_id).await {
                Ok(patient) => Some(patient),
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        patient_id = %evaluation.patient_id,
                        "referenced patient missing"
                    );
                    None
                }
            }
        };
        if cancel.is_cancelled() {
            return;
        }
        self.loading = false;
        self.patient = patient;
        self.evaluation = Some(evaluation);
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// The resolved patient; `None` renders the "Paciente no
    /// encontrado" placeholder next to the evaluation data.
    pub fn patient(&self) -> Option<&Patient> {
        self.patient.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_not_found(&self) -> bool {
        self.not_found
    }
}
