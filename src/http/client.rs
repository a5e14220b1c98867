//! Breaker-gated HTTP client.
//!
//! # Responsibilities
//! - Gate every outgoing request through one `CircuitBreaker`
//! - Treat non-success statuses as errors, as the wrapped dependency reports them
//! - Classify errors as faults (default: status >= 500)

use std::sync::Arc;

use reqwest::{Client, IntoUrl, RequestBuilder, Response};

use crate::resilience::circuit_breaker::CircuitBreaker;
use crate::resilience::error::CallError;
use crate::resilience::guard::FaultClassifier;

/// Counts server errors (status >= 500) as faults.
///
/// Connection errors and timeouts carry no status and are not counted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerErrorFault;

impl FaultClassifier<reqwest::Error> for ServerErrorFault {
    fn is_fault(&self, error: &reqwest::Error) -> bool {
        error.status().is_some_and(|status| status.is_server_error())
    }
}

/// A `reqwest::Client` with a circuit breaker in front of it.
pub struct BreakerClient {
    client: Client,
    breaker: Arc<CircuitBreaker>,
    classifier: Box<dyn FaultClassifier<reqwest::Error>>,
}

impl BreakerClient {
    /// Wrap `client`, classifying faults with [`ServerErrorFault`].
    pub fn new(client: Client, breaker: Arc<CircuitBreaker>) -> Self {
        Self::with_classifier(client, breaker, ServerErrorFault)
    }

    pub fn with_classifier<C>(client: Client, breaker: Arc<CircuitBreaker>, classifier: C) -> Self
    where
        C: FaultClassifier<reqwest::Error> + 'static,
    {
        Self {
            client,
            breaker,
            classifier: Box::new(classifier),
        }
    }

    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    /// Underlying client, for building requests.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    pub async fn get<U: IntoUrl>(&self, url: U) -> Result<Response, CallError<reqwest::Error>> {
        self.send(self.client.get(url)).await
    }

    /// Send a request through the breaker.
    ///
    /// Returns `CallError::Rejected` without touching the network when the
    /// breaker refuses the call.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, CallError<reqwest::Error>> {
        self.breaker
            .call(
                || async move { request.send().await?.error_for_status() },
                self.classifier.as_ref(),
            )
            .await
    }
}
