//! Pure calculators over raw records: calendar age, area status
//! classification, search matching, status counts, and the display
//! formatting the pages share.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{date_only, AreaStatus, Evaluation, EvaluationStatus, Patient};

/// Parse a form or wire date down to calendar-day granularity.
/// Accepts `YYYY-MM-DD` and full ISO timestamps.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_only(value.trim()), "%Y-%m-%d").ok()
}

/// Calendar age in whole years as of `as_of`.
///
/// Subtract the birth year, then take one year off when the birthday
/// has not yet occurred in `as_of`'s year. Missing or unparseable
/// input and births after `as_of` yield `None`, never a panic.
pub fn age_in_years(birth_date: &str, as_of: NaiveDate) -> Option<u32> {
    let birth = parse_calendar_date(birth_date)?;
    if birth > as_of {
        return None;
    }
    let mut age = as_of.year() - birth.year();
    if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// Age rendered for the patient views ("8 años" / "No disponible").
pub fn age_label(birth_date: Option<&str>, as_of: NaiveDate) -> String {
    match birth_date.and_then(|d| age_in_years(d, as_of)) {
        Some(age) => format!("{age} años"),
        None => "No disponible".to_string(),
    }
}

/// Classify an assessment area value for the summary chips.
///
/// A closed heuristic over the form's known category values, not a
/// clinical judgment: exactly "Normal", "Excelente" and "Eficiente"
/// read as normal; anything else that was filled in needs attention.
pub fn area_status(value: Option<&str>) -> AreaStatus {
    match value.map(str::trim) {
        None | Some("") => AreaStatus::Unassessed,
        Some("Normal" | "Excelente" | "Eficiente") => AreaStatus::Normal,
        Some(_) => AreaStatus::NeedsAttention,
    }
}

/// Case-insensitive substring match against the resolved patient's
/// names and document number. An empty query matches everything; a
/// non-empty query never matches an unresolved patient.
pub fn matches_search(patient: Option<&Patient>, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    let Some(patient) = patient else {
        return false;
    };
    patient.first_name.to_lowercase().contains(&query)
        || patient.last_name.to_lowercase().contains(&query)
        || patient
            .document_number
            .as_deref()
            .is_some_and(|number| number.to_lowercase().contains(&query))
}

/// Exact per-status counts for the evaluations page stat tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub completed: usize,
    pub pending: usize,
    pub cancelled: usize,
    pub total: usize,
}

/// Single pass over the full list. Records without a stored status
/// deserialize as completed, matching the display default.
pub fn status_counts(evaluations: &[Evaluation]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for evaluation in evaluations {
        counts.total += 1;
        match evaluation.status {
            EvaluationStatus::Completed => counts.completed += 1,
            EvaluationStatus::Pending => counts.pending += 1,
            EvaluationStatus::Cancelled => counts.cancelled += 1,
        }
    }
    counts
}

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long-form date for the detail views ("15 de enero de 2024").
pub fn format_long_date(value: Option<&str>) -> String {
    match value.and_then(|v| parse_calendar_date(v)) {
        Some(date) => format!(
            "{} de {} de {}",
            date.day(),
            MONTHS_ES[date.month0() as usize],
            date.year()
        ),
        None => "No registrada".to_string(),
    }
}

/// Document size shown next to the file name.
pub fn format_file_size(bytes: u64) -> String {
    let kb = (bytes as f64 / 1024.0).round() as u64;
    format!("{kb} KB")
}

/// Last six characters of an opaque id, for compact headers
/// ("Evaluación #a3f29b").
pub fn short_id(id: &str) -> &str {
    let start = id
        .char_indices()
        .rev()
        .nth(5)
        .map(|(index, _)| index)
        .unwrap_or(0);
    &id[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn make_patient(first: &str, last: &str, document: Option<&str>) -> Patient {
        Patient {
            id: "p-1".into(),
            first_name: first.into(),
            last_name: last.into(),
            date_of_birth: None,
            document_number: document.map(Into::into),
            diagnosis: None,
            reason_for_consult: "Control".into(),
            general_notes: None,
            is_active: true,
            admission_date: None,
            updated_at: None,
        }
    }

    fn make_evaluation(status: EvaluationStatus) -> Evaluation {
        serde_json::from_str::<Evaluation>(r#"{"id":"e-1","patientId":"p-1"}"#)
            .map(|mut e| {
                e.status = status;
                e
            })
            .unwrap()
    }

    // ── age_in_years ────────────────────────────────────────

    #[test]
    fn age_counts_whole_years() {
        assert_eq!(age_in_years("2015-01-01", date("2024-06-15")), Some(9));
    }

    #[test]
    fn age_decrements_before_birthday() {
        // Exactly one year minus a day vs exactly one year.
        assert_eq!(age_in_years("2023-06-16", date("2024-06-15")), Some(0));
        assert_eq!(age_in_years("2023-06-15", date("2024-06-15")), Some(1));
    }

    #[test]
    fn age_on_birthday_counts_the_year() {
        assert_eq!(age_in_years("2016-02-29", date("2024-02-29")), Some(8));
    }

    #[test]
    fn age_of_future_birth_is_unavailable() {
        assert_eq!(age_in_years("2025-01-01", date("2024-06-15")), None);
    }

    #[test]
    fn age_of_unparseable_input_is_unavailable() {
        assert_eq!(age_in_years("", date("2024-06-15")), None);
        assert_eq!(age_in_years("mañana", date("2024-06-15")), None);
    }

    #[test]
    fn age_accepts_iso_timestamps() {
        assert_eq!(
            age_in_years("2015-01-01T00:00:00.000Z", date("2024-06-15")),
            Some(9)
        );
    }

    #[test]
    fn age_label_renders_years_or_placeholder() {
        assert_eq!(age_label(Some("2016-03-12"), date("2024-06-15")), "8 años");
        assert_eq!(age_label(None, date("2024-06-15")), "No disponible");
    }

    // ── area_status ─────────────────────────────────────────

    #[test]
    fn normal_values_are_exactly_three() {
        for value in ["Normal", "Excelente", "Eficiente"] {
            assert_eq!(area_status(Some(value)), AreaStatus::Normal, "{value}");
        }
    }

    #[test]
    fn empty_or_absent_is_unassessed() {
        assert_eq!(area_status(None), AreaStatus::Unassessed);
        assert_eq!(area_status(Some("")), AreaStatus::Unassessed);
        assert_eq!(area_status(Some("   ")), AreaStatus::Unassessed);
    }

    #[test]
    fn any_other_value_needs_attention() {
        assert_eq!(area_status(Some("Ronca")), AreaStatus::NeedsAttention);
        assert_eq!(
            area_status(Some("Pérdida leve")),
            AreaStatus::NeedsAttention
        );
    }

    // ── matches_search ──────────────────────────────────────

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches_search(None, ""));
        assert!(matches_search(None, "   "));
    }

    #[test]
    fn query_matches_names_case_insensitively() {
        let patient = make_patient("María", "García", None);
        assert!(matches_search(Some(&patient), "mar"));
        assert!(matches_search(Some(&patient), "GARC"));
        assert!(!matches_search(Some(&patient), "lópez"));
    }

    #[test]
    fn query_matches_document_number() {
        let patient = make_patient("Juan", "Pérez", Some("30123456"));
        assert!(matches_search(Some(&patient), "30123"));
    }

    #[test]
    fn unresolved_patient_never_matches_nonempty_query() {
        assert!(!matches_search(None, "juan"));
    }

    // ── status_counts ───────────────────────────────────────

    #[test]
    fn counts_every_status_in_one_pass() {
        let evaluations = vec![
            make_evaluation(EvaluationStatus::Completed),
            make_evaluation(EvaluationStatus::Completed),
            make_evaluation(EvaluationStatus::Pending),
            make_evaluation(EvaluationStatus::Cancelled),
        ];
        let counts = status_counts(&evaluations);
        assert_eq!(
            counts,
            StatusCounts {
                completed: 2,
                pending: 1,
                cancelled: 1,
                total: 4
            }
        );
    }

    #[test]
    fn absent_status_counts_as_completed() {
        let evaluation: Evaluation =
            serde_json::from_str(r#"{"id":"e-9","patientId":"p-1"}"#).unwrap();
        let counts = status_counts(&[evaluation]);
        assert_eq!(counts.completed, 1);
    }

    #[test]
    fn empty_list_counts_zero() {
        assert_eq!(status_counts(&[]), StatusCounts::default());
    }

    // ── formatting ──────────────────────────────────────────

    #[test]
    fn long_date_in_spanish() {
        assert_eq!(format_long_date(Some("2024-01-15")), "15 de enero de 2024");
        assert_eq!(
            format_long_date(Some("2024-12-03T08:00:00Z")),
            "3 de diciembre de 2024"
        );
    }

    #[test]
    fn missing_date_has_placeholder() {
        assert_eq!(format_long_date(None), "No registrada");
        assert_eq!(format_long_date(Some("no-date")), "No registrada");
    }

    #[test]
    fn file_sizes_round_to_kilobytes() {
        assert_eq!(format_file_size(2048), "2 KB");
        assert_eq!(format_file_size(1536), "2 KB");
        assert_eq!(format_file_size(100), "0 KB");
    }

    #[test]
    fn short_id_keeps_last_six_chars() {
        assert_eq!(short_id("6f9a02b4-e2"), "2b4-e2");
        assert_eq!(short_id("abc"), "abc");
    }
}
