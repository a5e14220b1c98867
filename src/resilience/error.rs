//! Rejection and construction errors.

use thiserror::Error;

use crate::config::validation::ValidationError;
use crate::resilience::state::CircuitState;

/// Why the breaker refused to admit a call.
///
/// Returned before the remote dependency is contacted, so a rejection never
/// has partial side effects. Retrying is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreakerError {
    /// The circuit is open and the reset period has not elapsed.
    #[error("Request was cancelled by circuit breaker {id}. State={state}")]
    Open { id: String, state: CircuitState },

    /// The circuit is half-open and every probe slot is taken.
    #[error("Request was cancelled by circuit breaker {id}: no free probe slot. State={state}")]
    HalfOpen { id: String, state: CircuitState },
}

impl BreakerError {
    pub fn breaker_id(&self) -> &str {
        match self {
            BreakerError::Open { id, .. } | BreakerError::HalfOpen { id, .. } => id,
        }
    }

    /// State of the breaker at the moment of rejection.
    pub fn state(&self) -> CircuitState {
        match self {
            BreakerError::Open { state, .. } | BreakerError::HalfOpen { state, .. } => *state,
        }
    }

    /// Both rejections clear on their own once the dependency recovers.
    pub fn is_retryable(&self) -> bool {
        true
    }
}

/// The breaker could not be built from the given settings.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid circuit breaker settings: {}", join(.0))]
    InvalidSettings(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of a gated call that did not produce a value.
#[derive(Debug, Error)]
pub enum CallError<E> {
    /// The breaker refused the call; the operation never ran.
    #[error(transparent)]
    Rejected(#[from] BreakerError),

    /// The operation ran and failed. Passed through untouched.
    #[error("{0}")]
    Inner(E),
}

impl<E> CallError<E> {
    pub fn rejection(&self) -> Option<&BreakerError> {
        match self {
            CallError::Rejected(e) => Some(e),
            CallError::Inner(_) => None,
        }
    }

    pub fn into_inner(self) -> Option<E> {
        match self {
            CallError::Inner(e) => Some(e),
            CallError::Rejected(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_carries_id_and_state() {
        let err = BreakerError::HalfOpen {
            id: "users".into(),
            state: CircuitState::HalfOpen,
        };
        assert_eq!(err.breaker_id(), "users");
        assert_eq!(err.state(), CircuitState::HalfOpen);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("HALF_OPEN"));
    }

    #[test]
    fn test_build_error_lists_every_violation() {
        let err = BuildError::InvalidSettings(vec![
            ValidationError::NotPositive("threshold"),
            ValidationError::NotPositive("reset_period_ms"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("threshold"));
        assert!(msg.contains("reset_period_ms"));
    }
}
