//! In-memory collaborators for unit tests.

use crate::client::{SubscriptionApi, SubscriptionSnapshot};
use crate::errors::{FetchError, UpdateError};
use crate::gates::Prompter;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Billing API double backed by a map of subscription prices.
///
/// Unknown ids fail to fetch with `"not found"`. Every update call is recorded,
/// including failing ones.
#[derive(Default)]
pub struct MockApi {
    prices: HashMap<String, String>,
    fetch_failures: HashMap<String, String>,
    update_failures: HashMap<String, String>,
    updates: Arc<Mutex<Vec<(String, String)>>>,
    fetches: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscription(mut self, id: &str, price: &str) -> Self {
        self.prices.insert(id.to_string(), price.to_string());
        self
    }

    pub fn failing_fetch(mut self, id: &str, message: &str) -> Self {
        self.fetch_failures
            .insert(id.to_string(), message.to_string());
        self
    }

    pub fn failing_update(mut self, id: &str, message: &str) -> Self {
        self.update_failures
            .insert(id.to_string(), message.to_string());
        self
    }

    pub fn updates(&self) -> Vec<(String, String)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubscriptionApi for MockApi {
    async fn fetch_subscription(&self, id: &str) -> Result<SubscriptionSnapshot, FetchError> {
        self.fetches.lock().unwrap().push(id.to_string());
        if let Some(message) = self.fetch_failures.get(id) {
            return Err(FetchError(message.clone()));
        }
        match self.prices.get(id) {
            Some(price) => Ok(SubscriptionSnapshot::with_price(price.clone())),
            None => Err(FetchError("not found".to_string())),
        }
    }

    async fn update_subscription(
        &self,
        id: &str,
        new_delivery_price: &str,
    ) -> Result<(), UpdateError> {
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), new_delivery_price.to_string()));
        match self.update_failures.get(id) {
            Some(message) => Err(UpdateError(message.clone())),
            None => Ok(()),
        }
    }
}

/// Prompter double that replays canned answers and fails once they run out.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to every prompt shown so far.
    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn read_line(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no scripted answer left"))
    }
}
