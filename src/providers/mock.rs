/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::echo()` - Returns the prompt unchanged
 * - `MockProvider::working()` - Always succeeds with tagged text
 * - `MockProvider::fail_on_call(n)` - Succeeds except for the n-th request
 * - `MockProvider::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Returns the prompt as the response
    Echo,
    /// Always succeeds with a tagged response
    Working,
    /// Fails on the given 1-based request number, succeeds otherwise
    FailOnCall { call: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter
    request_count: Arc<AtomicUsize>,
    /// Prompts received, in order
    prompts: Arc<Mutex<Vec<String>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&str) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a mock provider that answers with the prompt itself
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock provider that fails on the n-th request (1-based)
    pub fn fail_on_call(call: usize) -> Self {
        Self::new(MockBehavior::FailOnCall { call })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator used by successful requests
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn respond(&self, prompt: &str, default: impl FnOnce() -> String) -> String {
        match self.custom_response {
            Some(generator) => generator(prompt),
            None => default(),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            prompts: Arc::clone(&self.prompts),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn generate(&self, _model: &str, prompt: &str) -> Result<String, ProviderError> {
        let call = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match self.behavior {
            MockBehavior::Echo => Ok(self.respond(prompt, || prompt.to_string())),

            MockBehavior::Working => Ok(self.respond(prompt, || format!("[TRANSLATED] {}", prompt))),

            MockBehavior::FailOnCall { call: failing_call } if call == failing_call => {
                Err(ProviderError::ApiError {
                    status_code: 500,
                    message: format!("Simulated failure on request {}", call),
                })
            }

            MockBehavior::FailOnCall { .. } => Ok(self.respond(prompt, || prompt.to_string())),

            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),

            MockBehavior::Empty => Err(ProviderError::EmptyResponse),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
