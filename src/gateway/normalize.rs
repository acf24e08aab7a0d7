//! Response-shape normalization for list endpoints.
//!
//! The backend's list endpoints are inconsistent: some return a bare
//! JSON array, others wrap it under `data`, `evaluations`,
//! `evaluaciones` or `documents`. All shape probing lives here so the
//! controllers only ever see one canonical `Vec<T>`.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Wrapper keys observed across the backend's list endpoints, probed
/// in order.
const LIST_KEYS: &[&str] = &["data", "evaluations", "evaluaciones", "documents"];

/// Map any known list payload shape to a canonical vector.
///
/// Unknown shapes and undecodable elements degrade to an empty or
/// shorter list with a warning; this function never fails.
pub fn extract_list<T: DeserializeOwned>(payload: Value) -> Vec<T> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let wrapped = LIST_KEYS.iter().find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            });
            match wrapped {
                Some(items) => items,
                None => {
                    tracing::warn!("list payload has no recognized wrapper key");
                    return Vec::new();
                }
            }
        }
        _ => {
            tracing::warn!("list payload is neither an array nor an object");
            return Vec::new();
        }
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if records.len() < total {
        tracing::warn!(
            skipped = total - records.len(),
            "skipped undecodable list elements"
        );
    }
    records
}
