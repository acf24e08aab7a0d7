use serde::{Deserialize, Serialize};

/// Metadata for a file stored against a patient. Upload, download and
/// deletion are handled entirely by the backend; the client only
/// formats this record for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: String,
    pub patient_id: String,
    pub file_name: String,
    #[serde(default)]
    pub file_type: String,
    /// Size in bytes.
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub upload_date: Option<String>,
}
