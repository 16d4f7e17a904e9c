use crate::batch::RecordStatus;
use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};

/// Column order of the audit CSV. Serialization follows the field order of
/// [`AuditEntry`], which must stay in sync with this list.
pub const AUDIT_COLUMNS: [&str; 6] = [
    "timestamp",
    "subscription_id",
    "old_delivery_price",
    "new_delivery_price",
    "status",
    "error",
];

/// One durable row of the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: String,
    pub subscription_id: String,
    pub old_delivery_price: String,
    pub new_delivery_price: String,
    pub status: RecordStatus,
    #[serde(default)]
    pub error: String,
}

/// Local time with offset and millisecond precision, e.g. `2024-05-01T10:15:30.123+02:00`.
pub fn timestamp_now() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Millis, false)
}

pub mod logger;
pub use logger::AuditLogger;
