use serde::{Deserialize, Serialize};

use super::date_only;
use super::enums::EvaluationStatus;

/// A speech-therapy evaluation as persisted by the remote store.
///
/// Four assessment areas (voice, language, hearing, swallowing), each a
/// set of enumerated free-text categories where absence means "not
/// evaluated", which is distinct from a validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: String,
    /// Weak reference to the evaluated patient; the patient may have
    /// been deleted since.
    pub patient_id: String,
    #[serde(default)]
    pub evaluation_date: Option<String>,
    #[serde(default)]
    pub status: EvaluationStatus,
    #[serde(default)]
    pub voice_quality: Option<String>,
    #[serde(default)]
    pub voice_intensity: Option<String>,
    #[serde(default)]
    pub voice_notes: Option<String>,
    #[serde(default)]
    pub comprehension: Option<String>,
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub language_notes: Option<String>,
    #[serde(default)]
    pub hearing_result: Option<String>,
    #[serde(default)]
    pub hearing_notes: Option<String>,
    #[serde(default)]
    pub oral_phase: Option<String>,
    #[serde(default)]
    pub pharyngeal_phase: Option<String>,
    #[serde(default)]
    pub swallowing_notes: Option<String>,
    #[serde(default)]
    pub general_observations: Option<String>,
    #[serde(default)]
    pub recommendations: Option<String>,
}

/// The editable subset of an evaluation, as entered in the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDraft {
    pub patient_id: String,
    pub evaluation_date: String,
    pub voice_quality: String,
    pub voice_intensity: String,
    pub voice_notes: String,
    pub comprehension: String,
    pub expression: String,
    pub language_notes: String,
    pub hearing_result: String,
    pub hearing_notes: String,
    pub oral_phase: String,
    pub pharyngeal_phase: String,
    pub swallowing_notes: String,
    pub general_observations: String,
    pub recommendations: String,
}

/// Editable evaluation form fields, used to key validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EvaluationField {
    PatientId,
    EvaluationDate,
    VoiceQuality,
    VoiceIntensity,
    VoiceNotes,
    Comprehension,
    Expression,
    LanguageNotes,
    HearingResult,
    HearingNotes,
    OralPhase,
    PharyngealPhase,
    SwallowingNotes,
    GeneralObservations,
    Recommendations,
}

impl EvaluationDraft {
    /// Populate a draft from an existing record, normalizing the
    /// evaluation date to calendar-day granularity.
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            patient_id: evaluation.patient_id.clone(),
            evaluation_date: evaluation
                .evaluation_date
                .as_deref()
                .map(|d| date_only(d).to_string())
                .unwrap_or_default(),
            voice_quality: text(&evaluation.voice_quality),
            voice_intensity: text(&evaluation.voice_intensity),
            voice_notes: text(&evaluation.voice_notes),
            comprehension: text(&evaluation.comprehension),
            expression: text(&evaluation.expression),
            language_notes: text(&evaluation.language_notes),
            hearing_result: text(&evaluation.hearing_result),
            hearing_notes: text(&evaluation.hearing_notes),
            oral_phase: text(&evaluation.oral_phase),
            pharyngeal_phase: text(&evaluation.pharyngeal_phase),
            swallowing_notes: text(&evaluation.swallowing_notes),
            general_observations: text(&evaluation.general_observations),
            recommendations: text(&evaluation.recommendations),
        }
    }

    pub fn set(&mut self, field: EvaluationField, value: String) {
        match field {
            EvaluationField::PatientId => self.patient_id = value,
            EvaluationField::EvaluationDate => self.evaluation_date = value,
            EvaluationField::VoiceQuality => self.voice_quality = value,
            EvaluationField::VoiceIntensity => self.voice_intensity = value,
            EvaluationField::VoiceNotes => self.voice_notes = value,
            EvaluationField::Comprehension => self.comprehension = value,
            EvaluationField::Expression => self.expression = value,
            EvaluationField::LanguageNotes => self.language_notes = value,
            EvaluationField::HearingResult => self.hearing_result = value,
            EvaluationField::HearingNotes => self.hearing_notes = value,
            EvaluationField::OralPhase => self.oral_phase = value,
            EvaluationField::PharyngealPhase => self.pharyngeal_phase = value,
            EvaluationField::SwallowingNotes => self.swallowing_notes = value,
            EvaluationField::GeneralObservations => self.general_observations = value,
            EvaluationField::Recommendations => self.recommendations = value,
        }
    }
}
