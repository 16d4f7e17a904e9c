//! Batch update orchestration.
//!
//! | Module     | Responsibility                                             |
//! |------------|------------------------------------------------------------|
//! | `source`   | Load `UpdateRequest`s from a CSV batch file                |
//! | `workflow` | Fetch, confirm, update and audit a single request          |
//! | `runner`   | Drive the workflow over a batch with throttle pauses       |
//! | `summary`  | Render the end-of-run report                               |

use serde::{Deserialize, Serialize};

pub mod runner;
pub mod source;
pub mod summary;
pub mod workflow;

pub use runner::{BatchRunner, ThrottleConfig};
pub use source::read_batch;
pub use summary::RunSummary;
pub use workflow::RecordWorkflow;

/// Placeholder recorded when the current delivery price is unknown.
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of work: set `subscription_id`'s delivery price to `new_delivery_price`.
///
/// The price stays a string end to end so no precision is lost between the
/// batch file and the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateRequest {
    pub subscription_id: String,
    pub new_delivery_price: String,
}

impl UpdateRequest {
    pub fn new(subscription_id: impl Into<String>, new_delivery_price: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            new_delivery_price: new_delivery_price.into(),
        }
    }
}

/// Final classification of one processed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Success,
    Skipped,
    Error,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Success => "success",
            RecordStatus::Skipped => "skipped",
            RecordStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-memory result of processing one `UpdateRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub subscription_id: String,
    pub status: RecordStatus,
    pub error: Option<String>,
}

/// Everything a batch run produced, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<Outcome>,
    /// Number of throttle pauses taken between records.
    pub pauses: usize,
}
