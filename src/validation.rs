//! Pure, deterministic draft validation.
//!
//! Each function maps a draft to field-keyed error messages. An empty
//! map signals the draft is submit-eligible; a non-empty map blocks
//! submission and each entry is rendered beside its field.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::derived::parse_calendar_date;
use crate::models::{EvaluationDraft, EvaluationField, PatientDraft, PatientField};

pub type ValidationErrors<F> = BTreeMap<F, String>;

/// Validate a patient draft against `today`.
///
/// Names and the reason for consult must be non-empty after trimming;
/// the birth date must parse and must not lie in the future. Diagnosis
/// and general notes are free-form.
pub fn validate_patient(
    draft: &PatientDraft,
    today: NaiveDate,
) -> ValidationErrors<PatientField> {
    let mut errors = ValidationErrors::new();

    if draft.first_name.trim().is_empty() {
        errors.insert(PatientField::FirstName, "El nombre es requerido".into());
    }
    if draft.last_name.trim().is_empty() {
        errors.insert(PatientField::LastName, "El apellido es requerido".into());
    }
    if draft.date_of_birth.trim().is_empty() {
        errors.insert(
            PatientField::DateOfBirth,
            "La fecha de nacimiento es requerida".into(),
        );
    } else {
        match parse_calendar_date(&draft.date_of_birth) {
            Some(birth) if birth > today => {
                errors.insert(
                    PatientField::DateOfBirth,
                    "La fecha de nacimiento no puede ser futura".into(),
                );
            }
            Some(_) => {}
            None => {
                errors.insert(
                    PatientField::DateOfBirth,
                    "La fecha de nacimiento no es válida".into(),
                );
            }
        }
    }
    if draft.reason_for_consult.trim().is_empty() {
        errors.insert(
            PatientField::ReasonForConsult,
            "El motivo de consulta es requerido".into(),
        );
    }

    errors
}

/// Validate an evaluation draft.
///
/// The patient selection, evaluation date and general observations are
/// required; a pre-bound patient id is locked against edits but must
/// still be non-empty. Every assessment area field is unconstrained
/// because absence means "not evaluated".
pub fn validate_evaluation(draft: &EvaluationDraft) -> ValidationErrors<EvaluationField> {
    let mut errors = ValidationErrors::new();

    if draft.patient_id.trim().is_empty() {
        errors.insert(EvaluationField::PatientId, "Selecciona un paciente".into());
    }
    if draft.evaluation_date.trim().is_empty() {
        errors.insert(
            EvaluationField::EvaluationDate,
            "La fecha de evaluación es requerida".into(),
        );
    } else if parse_calendar_date(&draft.evaluation_date).is_none() {
        errors.insert(
            EvaluationField::EvaluationDate,
            "La fecha de evaluación no es válida".into(),
        );
    }
    if draft.general_observations.trim().is_empty() {
        errors.insert(
            EvaluationField::GeneralObservations,
            "Las observaciones generales son requeridas".into(),
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn valid_patient_draft() -> PatientDraft {
        PatientDraft {
            first_name: "Ana".into(),
            last_name: "Ruiz".into(),
            date_of_birth: "2015-01-01".into(),
            diagnosis: String::new(),
            reason_for_consult: "Retraso del habla".into(),
            general_notes: String::new(),
        }
    }

    fn valid_evaluation_draft() -> EvaluationDraft {
        EvaluationDraft {
            patient_id: "p-1".into(),
            evaluation_date: "2025-06-01".into(),
            voice_quality: "Ronca".into(),
            general_observations: "Voz tensa en conversación espontánea".into(),
            ..EvaluationDraft::default()
        }
    }

    // ── patient drafts ──────────────────────────────────────

    #[test]
    fn complete_patient_draft_passes() {
        assert!(validate_patient(&valid_patient_draft(), today()).is_empty());
    }

    #[test]
    fn whitespace_only_names_fail() {
        let mut draft = valid_patient_draft();
        draft.first_name = "   ".into();
        draft.last_name = "\t".into();
        let errors = validate_patient(&draft, today());
        assert!(errors.contains_key(&PatientField::FirstName));
        assert!(errors.contains_key(&PatientField::LastName));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn missing_birth_date_fails_as_required() {
        let mut draft = valid_patient_draft();
        draft.date_of_birth = String::new();
        let errors = validate_patient(&draft, today());
        assert_eq!(
            errors.get(&PatientField::DateOfBirth).map(String::as_str),
            Some("La fecha de nacimiento es requerida")
        );
    }

    #[test]
    fn birth_date_one_day_in_the_future_fails() {
        let mut draft = valid_patient_draft();
        draft.date_of_birth = "2025-06-16".into();
        let errors = validate_patient(&draft, today());
        assert_eq!(
            errors.get(&PatientField::DateOfBirth).map(String::as_str),
            Some("La fecha de nacimiento no puede ser futura")
        );
    }

    #[test]
    fn birth_date_today_passes() {
        let mut draft = valid_patient_draft();
        draft.date_of_birth = "2025-06-15".into();
        assert!(validate_patient(&draft, today()).is_empty());
    }

    #[test]
    fn unparseable_birth_date_fails() {
        let mut draft = valid_patient_draft();
        draft.date_of_birth = "15/01/2015".into();
        let errors = validate_patient(&draft, today());
        assert!(errors.contains_key(&PatientField::DateOfBirth));
    }

    #[test]
    fn missing_reason_fails() {
        let mut draft = valid_patient_draft();
        draft.reason_for_consult = " ".into();
        let errors = validate_patient(&draft, today());
        assert!(errors.contains_key(&PatientField::ReasonForConsult));
    }

    #[test]
    fn optional_fields_are_never_validated() {
        let mut draft = valid_patient_draft();
        draft.diagnosis = String::new();
        draft.general_notes = String::new();
        assert!(validate_patient(&draft, today()).is_empty());
    }

    // ── evaluation drafts ───────────────────────────────────

    #[test]
    fn complete_evaluation_draft_passes() {
        assert!(validate_evaluation(&valid_evaluation_draft()).is_empty());
    }

    #[test]
    fn missing_observations_is_the_only_error() {
        let mut draft = valid_evaluation_draft();
        draft.general_observations = String::new();
        let errors = validate_evaluation(&draft);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&EvaluationField::GeneralObservations));
    }

    #[test]
    fn missing_patient_selection_fails() {
        let mut draft = valid_evaluation_draft();
        draft.patient_id = String::new();
        let errors = validate_evaluation(&draft);
        assert_eq!(
            errors.get(&EvaluationField::PatientId).map(String::as_str),
            Some("Selecciona un paciente")
        );
    }

    #[test]
    fn missing_evaluation_date_fails() {
        let mut draft = valid_evaluation_draft();
        draft.evaluation_date = String::new();
        let errors = validate_evaluation(&draft);
        assert!(errors.contains_key(&EvaluationField::EvaluationDate));
    }

    #[test]
    fn area_fields_are_unconstrained() {
        let mut draft = valid_evaluation_draft();
        draft.voice_quality = String::new();
        draft.hearing_result = "texto libre cualquiera".into();
        assert!(validate_evaluation(&draft).is_empty());
    }
}
