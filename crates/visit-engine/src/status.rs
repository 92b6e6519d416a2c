//! Active/inactive status of listed records.
//!
//! Attraction and feedback-category records come from the backend as loose
//! JSON objects whose "is this active?" flag may live under several keys.
//! [`canonicalize_status`] reads them once, in a fixed priority order, and
//! produces a [`RecordStatus`]; list views then filter with a
//! [`StatusFilter`] instead of probing fields themselves.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys probed by [`canonicalize_status`], highest priority first.
pub const STATUS_KEYS: [&str; 5] = ["status", "active", "isActive", "is_active", "enabled"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Active,
    Inactive,
    Unknown,
}

/// The list view's status toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    /// Whether a record with `status` is shown under this filter.
    ///
    /// [`RecordStatus::Unknown`] records only show under [`StatusFilter::All`].
    pub fn matches(self, status: RecordStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == RecordStatus::Active,
            StatusFilter::Inactive => status == RecordStatus::Inactive,
        }
    }
}

/// Derive the status of a JSON record.
///
/// The first key of [`STATUS_KEYS`] whose value is a recognizable boolean or
/// status word decides. Unrecognized values are skipped, so a record with
/// `"status": "pending", "active": true` is active. Non-objects and records
/// without any recognizable flag are [`RecordStatus::Unknown`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use visit_engine::status::{canonicalize_status, RecordStatus};
///
/// assert_eq!(canonicalize_status(&json!({"isActive": false})), RecordStatus::Inactive);
/// assert_eq!(canonicalize_status(&json!({"status": "ACTIVE"})), RecordStatus::Active);
/// assert_eq!(canonicalize_status(&json!({"name": "Zoo"})), RecordStatus::Unknown);
/// ```
pub fn canonicalize_status(record: &Value) -> RecordStatus {
    let Some(fields) = record.as_object() else {
        return RecordStatus::Unknown;
    };
    STATUS_KEYS
        .iter()
        .filter_map(|key| fields.get(*key))
        .find_map(status_from_value)
        .unwrap_or(RecordStatus::Unknown)
}

/// Records shown under `filter`, in their original order.
pub fn filter_by_status(records: &[Value], filter: StatusFilter) -> Vec<&Value> {
    records
        .iter()
        .filter(|record| filter.matches(canonicalize_status(record)))
        .collect()
}

fn status_from_value(value: &Value) -> Option<RecordStatus> {
    match value {
        Value::Bool(true) => Some(RecordStatus::Active),
        Value::Bool(false) => Some(RecordStatus::Inactive),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(RecordStatus::Active),
            Some(0) => Some(RecordStatus::Inactive),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "active" | "enabled" | "true" | "1" => Some(RecordStatus::Active),
            "inactive" | "disabled" | "false" | "0" => Some(RecordStatus::Inactive),
            _ => None,
        },
        _ => None,
    }
}
