use super::{BatchReport, UpdateRequest, workflow::RecordWorkflow};
use crate::errors::AuditError;
use std::time::Duration;
use tracing::info;

/// Rate-limit policy: pause for `pause` after every `batch_size` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    pub batch_size: usize,
    pub pause: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            batch_size: 30,
            pause: Duration::from_secs(60),
        }
    }
}

impl ThrottleConfig {
    pub fn new(batch_size: usize, pause: Duration) -> Self {
        Self { batch_size, pause }
    }

    /// Whether to pause after `processed` of `total` records have completed.
    ///
    /// Every completed record counts, whatever its status. No pause follows the
    /// final record.
    pub fn should_pause(&self, processed: usize, total: usize) -> bool {
        self.batch_size > 0 && processed % self.batch_size == 0 && processed < total
    }
}

/// Drives the record workflow over a batch, strictly one record at a time.
pub struct BatchRunner {
    throttle: ThrottleConfig,
}

impl BatchRunner {
    pub fn new(throttle: ThrottleConfig) -> Self {
        Self { throttle }
    }

    /// Process every request in input order.
    ///
    /// Returns early only if the audit trail cannot be written; records after
    /// that point are left unprocessed.
    pub async fn run(
        &self,
        requests: &[UpdateRequest],
        workflow: &RecordWorkflow<'_>,
    ) -> Result<BatchReport, AuditError> {
        let ui = workflow.ui();
        let total = requests.len();
        let mut report = BatchReport {
            outcomes: Vec::with_capacity(total),
            pauses: 0,
        };

        for (index, request) in requests.iter().enumerate() {
            let outcome = workflow.process(request).await?;
            report.outcomes.push(outcome);

            let processed = index + 1;
            if self.throttle.should_pause(processed, total) {
                info!(
                    processed,
                    total,
                    pause_secs = self.throttle.pause.as_secs(),
                    "throttle pause"
                );
                ui.print_throttle_pause(processed, self.throttle.pause);
                tokio::time::sleep(self.throttle.pause).await;
                report.pauses += 1;
                ui.print_resume();
            }
        }

        Ok(report)
    }
}
