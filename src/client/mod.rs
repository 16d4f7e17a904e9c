//! Billing API collaborator.
//!
//! The orchestrator only ever talks to [`SubscriptionApi`]; [`PayWhirlClient`]
//! is the HTTP implementation used by the binary.

use crate::batch::NOT_AVAILABLE;
use crate::errors::{FetchError, UpdateError};
use async_trait::async_trait;

pub mod paywhirl;
pub use paywhirl::PayWhirlClient;

/// Current state of a subscription as returned by a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubscriptionSnapshot {
    /// `None` when the API response carried no delivery price.
    pub delivery_price: Option<String>,
}

impl SubscriptionSnapshot {
    pub fn with_price(price: impl Into<String>) -> Self {
        Self {
            delivery_price: Some(price.into()),
        }
    }

    /// The delivery price as recorded in the audit trail.
    pub fn price_or_placeholder(&self) -> String {
        self.delivery_price
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

/// Read and mutate subscriptions on the billing service.
/// Real implementation: `PayWhirlClient`. Test double: `MockApi`.
#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    async fn fetch_subscription(&self, id: &str) -> Result<SubscriptionSnapshot, FetchError>;

    async fn update_subscription(&self, id: &str, new_delivery_price: &str)
    -> Result<(), UpdateError>;
}
