use serde::{Deserialize, Serialize};

use super::evaluation::Evaluation;

/// Server-computed dashboard snapshot, refreshed on each page load.
///
/// Treated as opaque: nothing here is derived client-side, and field
/// names follow the backend's Spanish naming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_pacientes: u64,
    #[serde(default)]
    pub total_evaluaciones: u64,
    #[serde(default)]
    pub total_documentos: u64,
    #[serde(default)]
    pub evaluaciones_este_mes: u64,
    #[serde(default)]
    pub recent_evaluations: Vec<Evaluation>,
}
