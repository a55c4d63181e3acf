//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::state::App;
use crate::inference::{
    Completion, CompletionClient, CompletionError, CompletionRequest, Tuning,
};

/// A client that answers every prompt by echoing it back.
pub struct EchoClient;

#[async_trait]
impl CompletionClient for EchoClient {
    fn name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        Completion::from_texts([request.prompt.clone()]).ok_or(CompletionError::EmptyResponse)
    }
}

/// A client that takes `delay` to answer and records how many calls overlap.
pub struct SlowClient {
    pub delay: Duration,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl SlowClient {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }
}

/// Decrements the in-flight counter even when the task is aborted mid-sleep.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CompletionClient for SlowClient {
    fn name(&self) -> &str {
        "slow"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        tokio::time::sleep(self.delay).await;
        Completion::from_texts([format!("answer: {}", request.prompt)])
            .ok_or(CompletionError::EmptyResponse)
    }
}

/// A client that always fails with the given error.
pub struct FailingClient(pub CompletionError);

#[async_trait]
impl CompletionClient for FailingClient {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<Completion, CompletionError> {
        Err(self.0.clone())
    }
}

/// Creates a test App in the Entering phase.
pub fn test_app() -> App {
    App::new("test-model".to_string(), Tuning::default(), 156)
}

/// Creates a test App with `text` already typed.
pub fn app_with_query(text: &str) -> App {
    let mut app = test_app();
    app.query.insert_str(text);
    app
}
