//! Create/edit form controllers for patients and evaluations.
//!
//! Lifecycle per instance: open (blank or from a record) → field
//! edits → validation-gated submit → Saved, with submit failures
//! returning to Editing and never closing the form. Editing a field
//! clears only that field's validation error; full validation is
//! deferred to submit time.

use chrono::Local;

use crate::gateway::{ApiError, ClinicApi};
use crate::models::{
    Evaluation, EvaluationDraft, EvaluationField, Patient, PatientDraft, PatientField,
};
use crate::validation::{self, ValidationErrors};

use super::{FormPhase, SubmitOutcome};

const PATIENT_SAVE_FALLBACK: &str =
    "Error al guardar el paciente. Por favor, intenta nuevamente.";
const EVALUATION_SAVE_FALLBACK: &str =
    "Error al guardar la evaluación. Por favor, intenta nuevamente.";

/// The backend's own error message when it sent one, otherwise the
/// page's generic fallback.
fn submit_message(err: &ApiError, fallback: &str) -> String {
    err.server_message().unwrap_or(fallback).to_string()
}

// ═══════════════════════════════════════════════════════════
// Patient form
// ═══════════════════════════════════════════════════════════

pub struct PatientFormController {
    draft: PatientDraft,
    /// Id of the record being edited; `None` in create mode.
    editing_id: Option<String>,
    errors: ValidationErrors<PatientField>,
    submit_error: Option<String>,
    phase: FormPhase,
}

impl PatientFormController {
    /// Open in create mode with blank defaults.
    pub fn create() -> Self {
        Self {
            draft: PatientDraft::default(),
            editing_id: None,
            errors: ValidationErrors::new(),
            submit_error: None,
            phase: FormPhase::Editing,
        }
    }

    /// Open in edit mode, populated from an existing record.
    pub fn edit(patient: &Patient) -> Self {
        Self {
            draft: PatientDraft::from_patient(patient),
            editing_id: Some(patient.id.clone()),
            errors: ValidationErrors::new(),
            submit_error: None,
            phase: FormPhase::Editing,
        }
    }

    pub fn draft(&self) -> &PatientDraft {
        &self.draft
    }

    pub fn is_editing_existing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// True while a submission is outstanding; the view disables the
    /// save action.
    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn error(&self, field: PatientField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &ValidationErrors<PatientField> {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Update one field, clearing only that field's validation error.
    pub fn set_field(&mut self, field: PatientField, value: impl Into<String>) {
        self.draft.set(field, value.into());
        self.errors.remove(&field);
    }

    /// Validate and persist the draft.
    ///
    /// Idempotent against double-submission: anything but the Editing
    /// phase is a no-op.
    pub async fn submit<A: ClinicApi>(&mut self, api: &A) -> SubmitOutcome {
        if self.phase != FormPhase::Editing {
            return SubmitOutcome::Ignored;
        }

        let errors = validation::validate_patient(&self.draft, Local::now().date_naive());
        if !errors.is_empty() {
            self.errors = errors;
            return SubmitOutcome::Invalid;
        }

        self.phase = FormPhase::Submitting;
        self.submit_error = None;

        let result = match &self.editing_id {
            Some(id) => api.update_patient(id, &self.draft).await,
            None => api.create_patient(&self.draft).await,
        };

        match result {
            Ok(patient) => {
                tracing::info!(patient_id = %patient.id, "patient saved");
                self.phase = FormPhase::Saved;
                SubmitOutcome::Saved
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to save patient");
                self.submit_error = Some(submit_message(&err, PATIENT_SAVE_FALLBACK));
                self.phase = FormPhase::Editing;
                SubmitOutcome::Failed
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Evaluation form
// ═══════════════════════════════════════════════════════════

pub struct EvaluationFormController {
    draft: EvaluationDraft,
    editing_id: Option<String>,
    /// Set when the patient was pre-bound from navigation context; the
    /// field is then immutable for the session.
    locked_patient: bool,
    errors: ValidationErrors<EvaluationField>,
    submit_error: Option<String>,
    phase: FormPhase,
}

impl EvaluationFormController {
    /// Open in create mode: today's date, and when a patient id is
    /// supplied by the calling page, that selection locked in.
    pub fn create(patient_id: Option<&str>) -> Self {
        let draft = EvaluationDraft {
            patient_id: patient_id.unwrap_or_default().to_string(),
            evaluation_date: Local::now().date_naive().to_string(),
            ..EvaluationDraft::default()
        };
        Self {
            draft,
            editing_id: None,
            locked_patient: patient_id.is_some(),
            errors: ValidationErrors::new(),
            submit_error: None,
            phase: FormPhase::Editing,
        }
    }

    /// Open in edit mode, populated from an existing record.
    pub fn edit(evaluation: &Evaluation, locked_patient_id: Option<&str>) -> Self {
        let mut draft = EvaluationDraft::from_evaluation(evaluation);
        if draft.patient_id.is_empty() {
            draft.patient_id = locked_patient_id.unwrap_or_default().to_string();
        }
        Self {
            draft,
            editing_id: Some(evaluation.id.clone()),
            locked_patient: locked_patient_id.is_some(),
            errors: ValidationErrors::new(),
            submit_error: None,
            phase: FormPhase::Editing,
        }
    }

    pub fn draft(&self) -> &EvaluationDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// True when the patient selector must render disabled.
    pub fn patient_is_locked(&self) -> bool {
        self.locked_patient
    }

    pub fn error(&self, field: EvaluationField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &ValidationErrors<EvaluationField> {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Update one field, clearing only that field's validation error.
    /// Edits to a locked patient selection are dropped.
    pub fn set_field(&mut self, field: EvaluationField, value: impl Into<String>) {
        if self.locked_patient && field == EvaluationField::PatientId {
            return;
        }
        self.draft.set(field, value.into());
        self.errors.remove(&field);
    }

    /// Validate and persist the draft. No-op outside the Editing phase.
    pub async fn submit<A: ClinicApi>(&mut self, api: &A) -> SubmitOutcome {
        if self.phase != FormPhase::Editing {
            return SubmitOutcome::Ignored;
        }

        let errors = validation::validate_evaluation(&self.draft);
        if !errors.is_empty() {
            self.errors = errors;
            return SubmitOutcome::Invalid;
        }

        self.phase = FormPhase::Submitting;
        self.submit_error = None;

        let result = match &self.editing_id {
            Some(id) => api.update_evaluation(id, &self.draft).await,
            None => api.create_evaluation(&self.draft).await,
        };

        match result {
            Ok(evaluation) => {
                tracing::info!(evaluation_id = %evaluation.id, "evaluation saved");
                self.phase = FormPhase::Saved;
                SubmitOutcome::Saved
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to save evaluation");
                self.submit_error = Some(submit_message(&err, EVALUATION_SAVE_FALLBACK));
                self.phase = FormPhase::Editing;
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockApi;
    use crate::models::Patient;

    fn fill_valid_patient(form: &mut PatientFormController) {
        form.set_field(PatientField::FirstName, "Ana");
        form.set_field(PatientField::LastName, "Ruiz");
        form.set_field(PatientField::DateOfBirth, "2015-01-01");
        form.set_field(PatientField::ReasonForConsult, "Retraso del habla");
    }

    fn seed_patient(id: &str) -> Patient {
        Patient {
            id: id.into(),
            first_name: "Juan".into(),
            last_name: "Pérez".into(),
            date_of_birth: Some("2016-03-12".into()),
            document_number: None,
            diagnosis: None,
            reason_for_consult: "Control".into(),
            general_notes: None,
            is_active: true,
            admission_date: None,
            updated_at: None,
        }
    }

    // ── patient form ────────────────────────────────────────

    #[tokio::test]
    async fn valid_create_saves_and_parks_in_saved() {
        let api = MockApi::new();
        let mut form = PatientFormController::create();
        fill_valid_patient(&mut form);

        assert_eq!(form.submit(&api).await, SubmitOutcome::Saved);
        assert_eq!(form.phase(), FormPhase::Saved);
        assert_eq!(api.create_calls(), 1);
    }

    #[tokio::test]
    async fn invalid_draft_blocks_submission() {
        let api = MockApi::new();
        let mut form = PatientFormController::create();

        assert_eq!(form.submit(&api).await, SubmitOutcome::Invalid);
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(api.create_calls(), 0);
        assert!(form.error(PatientField::FirstName).is_some());
        assert!(form.error(PatientField::ReasonForConsult).is_some());
    }

    #[tokio::test]
    async fn editing_a_field_clears_only_its_error() {
        let api = MockApi::new();
        let mut form = PatientFormController::create();
        form.submit(&api).await;
        assert!(form.error(PatientField::FirstName).is_some());
        assert!(form.error(PatientField::LastName).is_some());

        form.set_field(PatientField::FirstName, "Ana");
        assert!(form.error(PatientField::FirstName).is_none());
        assert!(form.error(PatientField::LastName).is_some());
    }

    #[tokio::test]
    async fn backend_message_is_surfaced_verbatim() {
        let api = MockApi::new().failing_writes("El paciente ya existe");
        let mut form = PatientFormController::create();
        fill_valid_patient(&mut form);

        assert_eq!(form.submit(&api).await, SubmitOutcome::Failed);
        assert_eq!(form.submit_error(), Some("El paciente ya existe"));
        // The form stays open for correction.
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[tokio::test]
    async fn empty_server_message_uses_generic_fallback() {
        let api = MockApi::new().failing_writes("");
        let mut form = PatientFormController::create();
        fill_valid_patient(&mut form);

        form.submit(&api).await;
        assert_eq!(
            form.submit_error(),
            Some("Error al guardar el paciente. Por favor, intenta nuevamente.")
        );
    }

    #[tokio::test]
    async fn double_submit_issues_exactly_one_create() {
        let api = MockApi::new();
        let mut form = PatientFormController::create();
        fill_valid_patient(&mut form);

        assert_eq!(form.submit(&api).await, SubmitOutcome::Saved);
        assert_eq!(form.submit(&api).await, SubmitOutcome::Ignored);
        assert_eq!(api.create_calls(), 1);
    }

    #[tokio::test]
    async fn submit_is_noop_while_submitting() {
        let api = MockApi::new();
        let mut form = PatientFormController::create();
        fill_valid_patient(&mut form);
        form.phase = FormPhase::Submitting;

        assert_eq!(form.submit(&api).await, SubmitOutcome::Ignored);
        assert_eq!(api.create_calls(), 0);
    }

    #[tokio::test]
    async fn edit_mode_updates_instead_of_creating() {
        let api = MockApi::new().with_patients(vec![seed_patient("p-7")]);
        let patient = seed_patient("p-7");
        let mut form = PatientFormController::edit(&patient);
        form.set_field(PatientField::Diagnosis, "Disfonía");

        assert_eq!(form.submit(&api).await, SubmitOutcome::Saved);
        assert_eq!(api.create_calls(), 0);
        assert_eq!(api.update_calls(), 1);
        assert_eq!(
            api.patients()[0].diagnosis.as_deref(),
            Some("Disfonía")
        );
    }

    #[tokio::test]
    async fn failed_submit_can_be_retried() {
        let api = MockApi::new().failing_writes("Intenta más tarde");
        let mut form = PatientFormController::create();
        fill_valid_patient(&mut form);

        assert_eq!(form.submit(&api).await, SubmitOutcome::Failed);
        // Back in Editing, a second attempt reaches the gateway again.
        assert_eq!(form.submit(&api).await, SubmitOutcome::Failed);
        assert_eq!(api.create_calls(), 2);
    }

    // ── evaluation form ─────────────────────────────────────

    #[tokio::test]
    async fn create_mode_defaults_to_today() {
        let form = EvaluationFormController::create(None);
        assert_eq!(
            form.draft().evaluation_date,
            Local::now().date_naive().to_string()
        );
        assert!(!form.patient_is_locked());
    }

    #[tokio::test]
    async fn prebound_patient_is_locked_against_edits() {
        let mut form = EvaluationFormController::create(Some("p-1"));
        assert!(form.patient_is_locked());

        form.set_field(EvaluationField::PatientId, "p-other");
        assert_eq!(form.draft().patient_id, "p-1");

        // Other fields stay editable.
        form.set_field(EvaluationField::VoiceQuality, "Ronca");
        assert_eq!(form.draft().voice_quality, "Ronca");
    }

    #[tokio::test]
    async fn locked_but_empty_patient_still_fails_validation() {
        let api = MockApi::new();
        let mut form = EvaluationFormController::create(Some(""));
        form.set_field(EvaluationField::GeneralObservations, "Sin hallazgos");

        assert_eq!(form.submit(&api).await, SubmitOutcome::Invalid);
        assert!(form.error(EvaluationField::PatientId).is_some());
    }

    #[tokio::test]
    async fn valid_evaluation_saves_against_existing_patient() {
        let api = MockApi::new().with_patients(vec![seed_patient("p-1")]);
        let mut form = EvaluationFormController::create(Some("p-1"));
        form.set_field(EvaluationField::GeneralObservations, "Progreso notable");

        assert_eq!(form.submit(&api).await, SubmitOutcome::Saved);
        assert_eq!(api.create_calls(), 1);
    }

    #[tokio::test]
    async fn unknown_patient_is_rejected_by_backend_and_surfaced() {
        let api = MockApi::new();
        let mut form = EvaluationFormController::create(Some("ghost"));
        form.set_field(EvaluationField::GeneralObservations, "Sin hallazgos");

        assert_eq!(form.submit(&api).await, SubmitOutcome::Failed);
        assert_eq!(
            form.submit_error(),
            Some("El paciente seleccionado no existe")
        );
    }
}
