use serde::Deserialize;

use super::document::DocumentRecord;
use super::evaluation::Evaluation;
use super::patient::Patient;

/// Result of the server-backed global search across record families.
/// Sections the backend omits read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSearchResults {
    #[serde(default)]
    pub pacientes: Vec<Patient>,
    #[serde(default)]
    pub evaluaciones: Vec<Evaluation>,
    #[serde(default)]
    pub documentos: Vec<DocumentRecord>,
}

impl GlobalSearchResults {
    pub fn is_empty(&self) -> bool {
        self.pacientes.is_empty() && self.evaluaciones.is_empty() && self.documentos.is_empty()
    }
}
