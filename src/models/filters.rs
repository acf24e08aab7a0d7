use super::enums::EvaluationStatus;

#[derive(Debug, Default, Clone)]
pub struct PatientFilter {
    pub search: String,
}

#[derive(Debug, Default, Clone)]
pub struct EvaluationFilter {
    pub search: String,
    pub status: Option<EvaluationStatus>,
}
