//! Per-record update workflow: fetch → show → confirm → update → audit.

use super::{NOT_AVAILABLE, Outcome, RecordStatus, UpdateRequest};
use crate::audit::{AuditEntry, AuditLogger, timestamp_now};
use crate::client::SubscriptionApi;
use crate::errors::AuditError;
use crate::gates::ConfirmationGate;
use crate::ui::OperatorUI;
use tracing::{debug, info, warn};

/// What an attempt produced before it is written to the audit trail.
struct Attempt {
    old_delivery_price: String,
    status: RecordStatus,
    error: Option<String>,
}

impl Attempt {
    fn failed(old_delivery_price: String, message: String) -> Self {
        Self {
            old_delivery_price,
            status: RecordStatus::Error,
            error: Some(message),
        }
    }
}

/// Processes one `UpdateRequest` to completion.
///
/// Billing API failures are contained here and become `error` outcomes. The
/// only error that escapes is a failed audit append, which must stop the run.
pub struct RecordWorkflow<'a> {
    api: &'a dyn SubscriptionApi,
    gate: &'a ConfirmationGate,
    audit: &'a AuditLogger,
    ui: OperatorUI,
}

impl<'a> RecordWorkflow<'a> {
    pub fn new(
        api: &'a dyn SubscriptionApi,
        gate: &'a ConfirmationGate,
        audit: &'a AuditLogger,
        ui: OperatorUI,
    ) -> Self {
        Self {
            api,
            gate,
            audit,
            ui,
        }
    }

    pub fn ui(&self) -> OperatorUI {
        self.ui
    }

    /// Run the request and append exactly one audit entry for it.
    pub async fn process(&self, request: &UpdateRequest) -> Result<Outcome, AuditError> {
        let timestamp = timestamp_now();
        self.ui.print_record_header(&request.subscription_id);

        let attempt = self.attempt(request).await;

        let entry = AuditEntry {
            timestamp,
            subscription_id: request.subscription_id.clone(),
            old_delivery_price: attempt.old_delivery_price,
            new_delivery_price: request.new_delivery_price.clone(),
            status: attempt.status,
            error: attempt.error.clone().unwrap_or_default(),
        };
        self.audit.record(&entry)?;

        info!(
            subscription_id = %request.subscription_id,
            status = %attempt.status,
            "record processed"
        );

        Ok(Outcome {
            subscription_id: request.subscription_id.clone(),
            status: attempt.status,
            error: attempt.error,
        })
    }

    async fn attempt(&self, request: &UpdateRequest) -> Attempt {
        let id = request.subscription_id.as_str();

        // A failed fetch never reaches the confirmation step.
        let snapshot = match self.api.fetch_subscription(id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(subscription_id = id, "fetch failed: {e}");
                self.ui.print_error(&e.0);
                return Attempt::failed(NOT_AVAILABLE.to_string(), e.0);
            }
        };

        let old_delivery_price = snapshot.price_or_placeholder();
        debug!(
            subscription_id = id,
            old = %old_delivery_price,
            new = %request.new_delivery_price,
            "fetched"
        );
        self.ui.print_prices(&old_delivery_price, &request.new_delivery_price);

        if self.gate.skips_confirmation() {
            self.ui.print_auto_confirmed();
        }
        if !self.gate.confirm().await {
            self.ui.print_skipped();
            return Attempt {
                old_delivery_price,
                status: RecordStatus::Skipped,
                error: None,
            };
        }

        match self
            .api
            .update_subscription(id, &request.new_delivery_price)
            .await
        {
            Ok(()) => {
                self.ui.print_success();
                Attempt {
                    old_delivery_price,
                    status: RecordStatus::Success,
                    error: None,
                }
            }
            Err(e) => {
                warn!(subscription_id = id, "update failed: {e}");
                self.ui.print_error(&e.0);
                Attempt::failed(old_delivery_price, e.0)
            }
        }
    }
}
