use serde::{Deserialize, Serialize};

use super::date_only;

/// A patient record as persisted by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Opaque id assigned by the remote store on creation.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Identity document number. Read by the detail and search views;
    /// never part of the editable form.
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub reason_for_consult: String,
    #[serde(default)]
    pub general_notes: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub admission_date: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The editable subset of a patient, as entered in the form.
///
/// No id and no server-assigned fields; optional fields are plain
/// strings where empty means "not provided", mirroring the form inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub diagnosis: String,
    pub reason_for_consult: String,
    pub general_notes: String,
}

/// Editable patient form fields, used to key validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatientField {
    FirstName,
    LastName,
    DateOfBirth,
    Diagnosis,
    ReasonForConsult,
    GeneralNotes,
}

impl PatientDraft {
    /// Populate a draft from an existing record, normalizing date
    /// fields to calendar-day granularity.
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            date_of_birth: patient
                .date_of_birth
                .as_deref()
                .map(|d| date_only(d).to_string())
                .unwrap_or_default(),
            diagnosis: patient.diagnosis.clone().unwrap_or_default(),
            reason_for_consult: patient.reason_for_consult.clone(),
            general_notes: patient.general_notes.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: PatientField, value: String) {
        match field {
            PatientField::FirstName => self.first_name = value,
            PatientField::LastName => self.last_name = value,
            PatientField::DateOfBirth => self.date_of_birth = value,
            PatientField::Diagnosis => self.diagnosis = value,
            PatientField::ReasonForConsult => self.reason_for_consult = value,
            PatientField::GeneralNotes => self.general_notes = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_patient() -> Patient {
        Patient {
            id: "p-1".into(),
            first_name: "Ana".into(),
            last_name: "Ruiz".into(),
            date_of_birth: Some("2015-01-01T00:00:00.000Z".into()),
            document_number: None,
            diagnosis: Some("Retraso del lenguaje".into()),
            reason_for_consult: "Dificultades de pronunciación".into(),
            general_notes: None,
            is_active: true,
            admission_date: Some("2024-01-15".into()),
            updated_at: None,
        }
    }

    #[test]
    fn draft_from_patient_strips_time_of_day() {
        let draft = PatientDraft::from_patient(&make_patient());
        assert_eq!(draft.date_of_birth, "2015-01-01");
        assert_eq!(draft.first_name, "Ana");
        assert_eq!(draft.general_notes, "");
    }

    #[test]
    fn set_updates_only_the_named_field() {
        let mut draft = PatientDraft::from_patient(&make_patient());
        draft.set(PatientField::Diagnosis, "Disfonía".into());
        assert_eq!(draft.diagnosis, "Disfonía");
        assert_eq!(draft.last_name, "Ruiz");
    }

    #[test]
    fn patient_deserializes_with_missing_optionals() {
        let patient: Patient = serde_json::from_str(
            r#"{"id":"7","firstName":"Juan","lastName":"Pérez"}"#,
        )
        .unwrap();
        assert!(patient.is_active, "isActive defaults to true");
        assert!(patient.date_of_birth.is_none());
        assert_eq!(patient.full_name(), "Juan Pérez");
    }

    #[test]
    fn draft_serializes_camel_case() {
        let draft = PatientDraft {
            first_name: "Ana".into(),
            ..PatientDraft::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["firstName"], "Ana");
        assert_eq!(json["reasonForConsult"], "");
    }
}
