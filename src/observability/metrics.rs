//! Metrics collection.
//!
//! # Metrics
//! - `circuit_breaker_transitions_total` (counter): state changes by breaker, from, to
//! - `circuit_breaker_rejections_total` (counter): refused admissions by breaker, state
//! - `circuit_breaker_outcomes_total` (counter): reported outcomes by breaker, outcome
//! - `circuit_breaker_state` (gauge): 0=closed, 1=half-open, 2=open
//!
//! # Design Decisions
//! - Only the `metrics` facade is used; installing a recorder/exporter is up to the binary
//! - Without a recorder every call is a cheap no-op

use crate::resilience::state::CircuitState;

/// Reported call outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Fault,
}

impl Outcome {
    fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Fault => "fault",
        }
    }
}

/// Record a state transition and update the state gauge.
pub fn record_transition(breaker: &str, from: CircuitState, to: CircuitState) {
    metrics::counter!(
        "circuit_breaker_transitions_total",
        "breaker" => breaker.to_string(),
        "from" => from.as_str(),
        "to" => to.as_str()
    )
    .increment(1);
    record_state(breaker, to);
}

/// Record a refused admission.
pub fn record_rejection(breaker: &str, state: CircuitState) {
    metrics::counter!(
        "circuit_breaker_rejections_total",
        "breaker" => breaker.to_string(),
        "state" => state.as_str()
    )
    .increment(1);
}

pub fn record_outcome(breaker: &str, outcome: Outcome) {
    metrics::counter!(
        "circuit_breaker_outcomes_total",
        "breaker" => breaker.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

pub fn record_state(breaker: &str, state: CircuitState) {
    metrics::gauge!("circuit_breaker_state", "breaker" => breaker.to_string()).set(state.as_gauge());
}
