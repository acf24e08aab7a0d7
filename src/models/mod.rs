//! Wire-faithful domain records, editable drafts, and list filters.
//!
//! Field names serialize in the camelCase form the REST backend uses
//! (`firstName`, `evaluationDate`, ...). Date fields travel as strings
//! because the backend is inconsistent about date-only vs full ISO
//! timestamps; parsing happens defensively in `derived` and
//! `validation`.

pub mod dashboard;
pub mod document;
pub mod enums;
pub mod evaluation;
pub mod filters;
pub mod patient;
pub mod search;

pub use dashboard::DashboardStats;
pub use document::DocumentRecord;
pub use enums::{AreaStatus, EvaluationStatus, InvalidEnumValue};
pub use evaluation::{Evaluation, EvaluationDraft, EvaluationField};
pub use filters::{EvaluationFilter, PatientFilter};
pub use patient::{Patient, PatientDraft, PatientField};
pub use search::GlobalSearchResults;

/// Truncate an ISO timestamp to its calendar-day part.
///
/// The backend sometimes returns `2024-01-15T00:00:00.000Z` where the
/// forms expect `2024-01-15`; date-only values pass through unchanged.
pub(crate) fn date_only(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}
