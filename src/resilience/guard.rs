//! Gating a single call through a breaker.
//!
//! # Responsibilities
//! - Run the admission check before the operation starts
//! - Report exactly one outcome once the operation resolves
//! - Let the caller decide which errors count as faults
//!
//! # Design Decisions
//! - Errors not classified as faults leave the breaker untouched and pass through
//! - A rejected call never constructs the operation's future

use std::future::Future;

use crate::resilience::circuit_breaker::CircuitBreaker;
use crate::resilience::error::CallError;

/// Decides whether a failed call counts against the dependency.
pub trait FaultClassifier<E>: Send + Sync {
    fn is_fault(&self, error: &E) -> bool;
}

impl<E, F> FaultClassifier<E> for F
where
    F: Fn(&E) -> bool + Send + Sync,
{
    fn is_fault(&self, error: &E) -> bool {
        self(error)
    }
}

/// Counts every error as a fault.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllErrors;

impl<E> FaultClassifier<E> for AllErrors {
    fn is_fault(&self, _error: &E) -> bool {
        true
    }
}

impl CircuitBreaker {
    /// Run `f` if the breaker admits it and report its outcome.
    pub async fn call<F, Fut, T, E, C>(&self, f: F, classifier: &C) -> Result<T, CallError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        C: FaultClassifier<E> + ?Sized,
    {
        self.try_admit()?;

        match f().await {
            Ok(value) => {
                self.on_success();
                Ok(value)
            }
            Err(e) => {
                if classifier.is_fault(&e) {
                    self.on_fault();
                }
                Err(CallError::Inner(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::BreakerSettings;
    use crate::resilience::error::BreakerError;
    use crate::resilience::state::CircuitState;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn breaker(threshold: u32) -> CircuitBreaker {
        CircuitBreaker::new(BreakerSettings {
            id: Some("guarded".into()),
            threshold,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_call_success() {
        let cb = breaker(3);
        let result: Result<i32, CallError<String>> = cb.call(|| async { Ok(42) }, &AllErrors).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_call_reports_faults() {
        let cb = breaker(2);
        for _ in 0..2 {
            let result: Result<(), _> = cb.call(|| async { Err("boom") }, &AllErrors).await;
            assert!(matches!(result, Err(CallError::Inner("boom"))));
        }
        assert_eq!(cb.state(), CircuitState::Open);
    }

    #[tokio::test]
    async fn test_call_rejects_without_running() {
        let cb = breaker(1);
        cb.on_fault();

        let runs = AtomicU32::new(0);
        let result: Result<(), CallError<&str>> = cb
            .call(
                || {
                    runs.fetch_add(1, Ordering::SeqCst);
                    async { Ok(()) }
                },
                &AllErrors,
            )
            .await;

        assert_eq!(runs.load(Ordering::SeqCst), 0);
        let err = result.unwrap_err();
        assert!(matches!(err.rejection(), Some(BreakerError::Open { .. })));
    }

    #[tokio::test]
    async fn test_unclassified_errors_pass_through() {
        let cb = breaker(1);
        let only_server_errors = |status: &u16| *status >= 500;

        let result: Result<(), _> = cb.call(|| async { Err(404u16) }, &only_server_errors).await;
        assert_eq!(result.unwrap_err().into_inner(), Some(404));
        assert_eq!(cb.state(), CircuitState::Closed);

        let _: Result<(), _> = cb.call(|| async { Err(503u16) }, &only_server_errors).await;
        assert_eq!(cb.state(), CircuitState::Open);
    }
}
