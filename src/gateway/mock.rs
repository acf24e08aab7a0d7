//! In-memory `ClinicApi` double for controller and form tests.
//!
//! Holds records behind a mutex, assigns ids on create, and can be
//! configured to fail specific resource families so degradation paths
//! are testable without a network.

use std::sync::Mutex;

use uuid::Uuid;

use crate::derived;
use crate::models::{
    DashboardStats, DocumentRecord, Evaluation, EvaluationDraft, EvaluationStatus,
    GlobalSearchResults, Patient, PatientDraft,
};

use super::{ApiError, ClinicApi};

#[derive(Default)]
struct MockState {
    patients: Vec<Patient>,
    evaluations: Vec<Evaluation>,
    documents: Vec<DocumentRecord>,
    stats: DashboardStats,
    payloads: Vec<(String, Vec<u8>)>,
    fail_patient_list: bool,
    fail_evaluation_list: bool,
    fail_document_list: bool,
    fail_stats: bool,
    fail_search: bool,
    fail_downloads: bool,
    /// When set, every write fails with a 500 carrying this message.
    write_error: Option<String>,
    create_calls: u32,
    update_calls: u32,
    delete_calls: u32,
}

/// Configurable in-memory backend double.
#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patients(self, patients: Vec<Patient>) -> Self {
        self.state.lock().expect("mock state").patients = patients;
        self
    }

    pub fn with_evaluations(self, evaluations: Vec<Evaluation>) -> Self {
        self.state.lock().expect("mock state").evaluations = evaluations;
        self
    }

    pub fn with_documents(self, documents: Vec<DocumentRecord>) -> Self {
        self.state.lock().expect("mock state").documents = documents;
        self
    }

    pub fn with_stats(self, stats: DashboardStats) -> Self {
        self.state.lock().expect("mock state").stats = stats;
        self
    }

    pub fn with_document_payload(self, id: &str, bytes: Vec<u8>) -> Self {
        self.state
            .lock()
            .expect("mock state")
            .payloads
            .push((id.to_string(), bytes));
        self
    }

    pub fn failing_patient_list(self) -> Self {
        self.state.lock().expect("mock state").fail_patient_list = true;
        self
    }

    pub fn failing_evaluation_list(self) -> Self {
        self.state.lock().expect("mock state").fail_evaluation_list = true;
        self
    }

    pub fn failing_document_list(self) -> Self {
        self.state.lock().expect("mock state").fail_document_list = true;
        self
    }

    pub fn failing_stats(self) -> Self {
        self.state.lock().expect("mock state").fail_stats = true;
        self
    }

    pub fn failing_search(self) -> Self {
        self.state.lock().expect("mock state").fail_search = true;
        self
    }

    pub fn failing_downloads(self) -> Self {
        self.state.lock().expect("mock state").fail_downloads = true;
        self
    }

    pub fn failing_writes(self, message: &str) -> Self {
        self.state.lock().expect("mock state").write_error = Some(message.to_string());
        self
    }

    // ── Introspection for assertions ────────────────────────

    pub fn create_calls(&self) -> u32 {
        self.state.lock().expect("mock state").create_calls
    }

    pub fn update_calls(&self) -> u32 {
        self.state.lock().expect("mock state").update_calls
    }

    pub fn delete_calls(&self) -> u32 {
        self.state.lock().expect("mock state").delete_calls
    }

    pub fn patients(&self) -> Vec<Patient> {
        self.state.lock().expect("mock state").patients.clone()
    }

    fn transport() -> ApiError {
        ApiError::Connect("http://mock.invalid/api".into())
    }

    fn not_found(what: &str) -> ApiError {
        ApiError::Status {
            status: 404,
            message: format!("{what} no encontrado"),
        }
    }

    fn write_gate(state: &mut MockState) -> Result<(), ApiError> {
        if let Some(message) = &state.write_error {
            return Err(ApiError::Status {
                status: 500,
                message: message.clone(),
            });
        }
        Ok(())
    }
}

fn patient_from_draft(id: String, draft: &PatientDraft) -> Patient {
    let optional = |value: &str| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };
    Patient {
        id,
        first_name: draft.first_name.clone(),
        last_name: draft.last_name.clone(),
        date_of_birth: optional(&draft.date_of_birth),
        document_number: None,
        diagnosis: optional(&draft.diagnosis),
        reason_for_consult: draft.reason_for_consult.clone(),
        general_notes: optional(&draft.general_notes),
        is_active: true,
        admission_date: Some("2025-01-10".into()),
        updated_at: Some("2025-01-10T09:00:00.000Z".into()),
    }
}

fn evaluation_from_draft(id: String, draft: &EvaluationDraft) -> Evaluation {
    let optional = |value: &str| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };
    Evaluation {
        id,
        patient_id: draft.patient_id.clone(),
        evaluation_date: optional(&draft.evaluation_date),
        status: EvaluationStatus::Completed,
        voice_quality: optional(&draft.voice_quality),
        voice_intensity: optional(&draft.voice_intensity),
        voice_notes: optional(&draft.voice_notes),
        comprehension: optional(&draft.comprehension),
        expression: optional(&draft.expression),
        language_notes: optional(&draft.language_notes),
        hearing_result: optional(&draft.hearing_result),
        hearing_notes: optional(&draft.hearing_notes),
        oral_phase: optional(&draft.oral_phase),
        pharyngeal_phase: optional(&draft.pharyngeal_phase),
        swallowing_notes: optional(&draft.swallowing_notes),
        general_observations: optional(&draft.general_observations),
        recommendations: optional(&draft.recommendations),
    }
}

impl ClinicApi for MockApi {
    async fn list_patients(&self) -> Result<Vec<Patient>, ApiError> {
        let state = self.state.lock().expect("mock state");
        if state.fail_patient_list {
            return Err(Self::transport());
        }
        Ok(state.patients.clone())
    }

    async fn get_patient(&self, id: &str) -> Result<Patient, ApiError> {
        let state = self.state.lock().expect("mock state");
        if state.fail_patient_list {
            return Err(Self::transport());
        }
        state
            .patients
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Paciente"))
    }

    async fn create_patient(&self, draft: &PatientDraft) -> Result<Patient, ApiError> {
        let mut state = self.state.lock().expect("mock state");
        state.create_calls += 1;
        Self::write_gate(&mut state)?;
        let patient = patient_from_draft(Uuid::new_v4().to_string(), draft);
        state.patients.push(patient.clone());
        Ok(patient)
    }

    async fn update_patient(&self, id: &str, draft: &PatientDraft) -> Result<Patient, ApiError> {
        let mut state = self.state.lock().expect("mock state");
        state.update_calls += 1;
        Self::write_gate(&mut state)?;
        let existing = state
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Self::not_found("Paciente"))?;
        let mut updated = patient_from_draft(id.to_string(), draft);
        updated.document_number = existing.document_number.clone();
        updated.admission_date = existing.admission_date.clone();
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete_patient(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().expect("mock state");
        state.delete_calls += 1;
        Self::write_gate(&mut state)?;
        let before = state.patients.len();
        state.patients.retain(|p| p.id != id);
        if state.patients.len() == before {
            return Err(Self::not_found("Paciente"));
        }
        Ok(())
    }

    async fn list_evaluations(&self) -> Result<Vec<Evaluation>, ApiError> {
        let state = self.state.lock().expect("mock state");
        if state.fail_evaluation_list {
            return Err(Self::transport());
        }
        Ok(state.evaluations.clone())
    }

    async fn get_evaluation(&self, id: &str) -> Result<Evaluation, ApiError> {
        let state = self.state.lock().expect("mock state");
        if state.fail_evaluation_list {
            return Err(Self::transport());
        }
        state
            .evaluations
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("Evaluación"))
    }

    async fn evaluations_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Vec<Evaluation>, ApiError> {
        let state = self.state.lock().expect("mock state");
        if state.fail_evaluation_list {
            return Err(Self::transport());
        }
        Ok(state
            .evaluations
            .iter()
            .filter(|e| e.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn create_evaluation(&self, draft: &EvaluationDraft) -> Result<Evaluation, ApiError> {
        let mut state = self.state.lock().expect("mock state");
        state.create_calls += 1;
        Self::write_gate(&mut state)?;
        // The backend rejects evaluations for unknown patients.
        if !state.patients.iter().any(|p| p.id == draft.patient_id) {
            return Err(ApiError::Status {
                status: 422,
                message: "El paciente seleccionado no existe".into(),
            });
        }
        let evaluation = evaluation_from_draft(Uuid::new_v4().to_string(), draft);
        state.evaluations.push(evaluation.clone());
        Ok(evaluation)
    }

    async fn update_evaluation(
        &self,
        id: &str,
        draft: &EvaluationDraft,
    ) -> Result<Evaluation, ApiError> {
        let mut state = self.state.lock().expect("mock state");
        state.update_calls += 1;
        Self::write_gate(&mut state)?;
        let existing = state
            .evaluations
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Self::not_found("Evaluación"))?;
        let mut updated = evaluation_from_draft(id.to_string(), draft);
        updated.status = existing.status;
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete_evaluation(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().expect("mock state");
        state.delete_calls += 1;
        Self::write_gate(&mut state)?;
        let before = state.evaluations.len();
        state.evaluations.retain(|e| e.id != id);
        if state.evaluations.len() == before {
            return Err(Self::not_found("Evaluación"));
        }
        Ok(())
    }

    async fn documents_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Vec<DocumentRecord>, ApiError> {
        let state = self.state.lock().expect("mock state");
        if state.fail_document_list {
            return Err(Self::transport());
        }
        Ok(state
            .documents
            .iter()
            .filter(|d| d.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn download_document(&self, id: &str) -> Result<Vec<u8>, ApiError> {
        let state = self.state.lock().expect("mock state");
        if state.fail_downloads {
            return Err(Self::transport());
        }
        state
            .payloads
            .iter()
            .find(|(payload_id, _)| payload_id == id)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| Self::not_found("Documento"))
    }

    async fn delete_document(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().expect("mock state");
        state.delete_calls += 1;
        Self::write_gate(&mut state)?;
        let before = state.documents.len();
        state.documents.retain(|d| d.id != id);
        if state.documents.len() == before {
            return Err(Self::not_found("Documento"));
        }
        Ok(())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let state = self.state.lock().expect("mock state");
        if state.fail_stats {
            return Err(Self::transport());
        }
        Ok(state.stats.clone())
    }

    async fn search_patients(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Patient>, ApiError> {
        let state = self.state.lock().expect("mock state");
        if state.fail_search {
            return Err(Self::transport());
        }
        let start = (page.saturating_sub(1) * limit) as usize;
        Ok(state
            .patients
            .iter()
            .filter(|p| derived::matches_search(Some(p), query))
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn search_global(&self, query: &str) -> Result<GlobalSearchResults, ApiError> {
        let state = self.state.lock().expect("mock state");
        if state.fail_search {
            return Err(Self::transport());
        }
        let pacientes: Vec<Patient> = state
            .patients
            .iter()
            .filter(|p| derived::matches_search(Some(p), query))
            .cloned()
            .collect();
        let evaluaciones = state
            .evaluations
            .iter()
            .filter(|e| {
                let patient = state.patients.iter().find(|p| p.id == e.patient_id);
                derived::matches_search(patient, query)
            })
            .cloned()
            .collect();
        Ok(GlobalSearchResults {
            pacientes,
            evaluaciones,
            documentos: Vec::new(),
        })
    }
}
