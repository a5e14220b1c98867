//! Circuit breaker for dependency protection.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: dependency assumed down, calls fail fast
//! - Half-Open: a bounded number of probes test whether it recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: fault_count >= threshold within threshold_period_ms
//! Open → Half-Open: on the first admission attempt after reset_period_ms
//! Half-Open → Closed: num_requests_to_close_circuit probes succeed
//! Half-Open → Open: any probe fails
//! ```
//!
//! # Design Decisions
//! - One breaker per protected dependency, never shared between dependencies
//! - Open → Half-Open is evaluated lazily, no timers or background tasks
//! - Probe concurrency is capped by num_requests_to_close_circuit
//! - Outcome reports for a superseded episode are ignored
//! - A probe that never reports an outcome holds its slot until the next transition

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::schema::BreakerSettings;
use crate::config::validation::validate_settings;
use crate::observability::metrics::{self, Outcome};
use crate::resilience::clock::{Clock, SystemClock};
use crate::resilience::error::{BreakerError, BuildError};
use crate::resilience::id::{random_id, IdGenerator};
use crate::resilience::state::{BreakerSnapshot, CircuitState};

/// Mutable part of the breaker, guarded by a single lock.
#[derive(Debug)]
struct Inner {
    state: CircuitState,
    fault_count: u32,
    fault_window_start: Option<u64>,
    success_count: u32,
    in_flight_probes: u32,
    opened_at: Option<u64>,
}

impl Inner {
    fn new() -> Self {
        Self {
            state: CircuitState::Closed,
            fault_count: 0,
            fault_window_start: None,
            success_count: 0,
            in_flight_probes: 0,
            opened_at: None,
        }
    }
}

/// Gate in front of one remote dependency.
///
/// Callers ask [`try_admit`](Self::try_admit) before issuing a call and report
/// exactly one outcome per admitted call through [`on_success`](Self::on_success)
/// or [`on_fault`](Self::on_fault). The breaker never issues calls itself.
pub struct CircuitBreaker {
    id: String,
    settings: BreakerSettings,
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("id", &self.id)
            .field("settings", &self.settings)
            .field("inner", &*self.lock())
            .finish()
    }
}

/// Builder for [`CircuitBreaker`].
pub struct CircuitBreakerBuilder<'a> {
    settings: BreakerSettings,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<&'a IdGenerator>,
}

impl<'a> CircuitBreakerBuilder<'a> {
    /// Time source; defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Draw the id from `ids` when the settings carry none.
    pub fn ids(mut self, ids: &'a IdGenerator) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Validate the settings and build the breaker.
    pub fn build(self) -> Result<CircuitBreaker, BuildError> {
        validate_settings(&self.settings).map_err(BuildError::InvalidSettings)?;

        let id = match (&self.settings.id, self.ids) {
            (Some(id), _) => id.clone(),
            (None, Some(ids)) => ids.next_id(),
            (None, None) => random_id(),
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        tracing::debug!(
            breaker = %id,
            threshold = self.settings.threshold,
            threshold_period_ms = self.settings.threshold_period_ms,
            reset_period_ms = self.settings.reset_period_ms,
            num_requests_to_close_circuit = self.settings.num_requests_to_close_circuit,
            "Circuit breaker created"
        );
        metrics::record_state(&id, CircuitState::Closed);

        Ok(CircuitBreaker {
            id,
            settings: self.settings,
            clock,
            inner: Mutex::new(Inner::new()),
        })
    }
}

impl CircuitBreaker {
    pub fn builder<'a>(settings: BreakerSettings) -> CircuitBreakerBuilder<'a> {
        CircuitBreakerBuilder {
            settings,
            clock: None,
            ids: None,
        }
    }

    /// Build with the system clock.
    pub fn new(settings: BreakerSettings) -> Result<Self, BuildError> {
        Self::builder(settings).build()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn settings(&self) -> &BreakerSettings {
        &self.settings
    }

    /// Current state, without evaluating a pending Open → Half-Open transition.
    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    pub fn snapshot(&self) -> BreakerSnapshot {
        let inner = self.lock();
        BreakerSnapshot {
            id: self.id.clone(),
            state: inner.state,
            fault_count: inner.fault_count,
            fault_window_start: inner.fault_window_start,
            success_count: inner.success_count,
            in_flight_probes: inner.in_flight_probes,
            opened_at: inner.opened_at,
        }
    }

    /// May a call proceed now?
    pub fn try_admit(&self) -> Result<(), BreakerError> {
        self.try_admit_at(self.clock.now_millis())
    }

    /// Admission check at an explicit time.
    pub fn try_admit_at(&self, now: u64) -> Result<(), BreakerError> {
        let mut inner = self.lock();
        tracing::trace!(breaker = %self.id, state = %inner.state, "Call to dependency");

        match inner.state {
            CircuitState::Closed => Ok(()),
            CircuitState::Open => {
                let reopens_at = inner
                    .opened_at
                    .unwrap_or(now)
                    .saturating_add(self.settings.reset_period_ms);
                if now >= reopens_at {
                    inner.fault_count = 0;
                    self.transition(&mut inner, CircuitState::HalfOpen);
                    tracing::info!(breaker = %self.id, state = %inner.state, "Reset period elapsed, probing dependency");
                    self.admit_probe(&mut inner)
                } else {
                    tracing::debug!(breaker = %self.id, state = %inner.state, "Rejecting call, circuit open");
                    metrics::record_rejection(&self.id, inner.state);
                    Err(BreakerError::Open {
                        id: self.id.clone(),
                        state: inner.state,
                    })
                }
            }
            CircuitState::HalfOpen => self.admit_probe(&mut inner),
        }
    }

    /// Report a call classified as a fault.
    pub fn on_fault(&self) {
        self.on_fault_at(self.clock.now_millis());
    }

    /// Report a fault observed at an explicit time.
    pub fn on_fault_at(&self, now: u64) {
        let mut inner = self.lock();
        tracing::debug!(breaker = %self.id, state = %inner.state, "Processing fault");
        metrics::record_outcome(&self.id, Outcome::Fault);

        match inner.state {
            CircuitState::Closed => {
                match inner.fault_window_start {
                    None => inner.fault_window_start = Some(now),
                    Some(start) if now > start.saturating_add(self.settings.threshold_period_ms) => {
                        tracing::debug!(breaker = %self.id, "Threshold period passed, resetting fault count");
                        inner.fault_count = 0;
                        inner.fault_window_start = Some(now);
                    }
                    Some(_) => {}
                }

                inner.fault_count += 1;
                if inner.fault_count >= self.settings.threshold {
                    tracing::warn!(
                        breaker = %self.id,
                        faults = inner.fault_count,
                        threshold = self.settings.threshold,
                        "Fault threshold crossed, opening circuit"
                    );
                    self.open(&mut inner, now);
                }
            }
            CircuitState::HalfOpen => {
                tracing::warn!(breaker = %self.id, "Probe failed, reopening circuit");
                self.open(&mut inner, now);
            }
            // Nothing admitted while open can report back.
            CircuitState::Open => {}
        }
    }

    /// Report a successful call.
    pub fn on_success(&self) {
        let mut inner = self.lock();
        tracing::trace!(breaker = %self.id, state = %inner.state, "Processing success");
        metrics::record_outcome(&self.id, Outcome::Success);

        if inner.state != CircuitState::HalfOpen {
            return;
        }

        inner.success_count += 1;
        tracing::debug!(
            breaker = %self.id,
            successes = inner.success_count,
            required = self.settings.num_requests_to_close_circuit,
            "Probe succeeded"
        );

        if inner.success_count >= self.settings.num_requests_to_close_circuit {
            inner.success_count = 0;
            inner.in_flight_probes = 0;
            inner.fault_count = 0;
            inner.fault_window_start = None;
            self.transition(&mut inner, CircuitState::Closed);
            tracing::info!(breaker = %self.id, state = %inner.state, "Dependency recovered, circuit closed");
        }
    }

    fn admit_probe(&self, inner: &mut Inner) -> Result<(), BreakerError> {
        if inner.in_flight_probes < self.settings.num_requests_to_close_circuit {
            inner.in_flight_probes += 1;
            tracing::debug!(
                breaker = %self.id,
                probes = inner.in_flight_probes,
                cap = self.settings.num_requests_to_close_circuit,
                "Admitting probe"
            );
            Ok(())
        } else {
            tracing::debug!(breaker = %self.id, state = %inner.state, "Rejecting call, probe slots exhausted");
            metrics::record_rejection(&self.id, inner.state);
            Err(BreakerError::HalfOpen {
                id: self.id.clone(),
                state: inner.state,
            })
        }
    }

    fn open(&self, inner: &mut Inner, now: u64) {
        inner.success_count = 0;
        inner.in_flight_probes = 0;
        inner.fault_count = 0;
        inner.fault_window_start = None;
        inner.opened_at = Some(now);
        self.transition(inner, CircuitState::Open);
    }

    fn transition(&self, inner: &mut Inner, to: CircuitState) {
        let from = inner.state;
        inner.state = to;
        if to != CircuitState::Open {
            inner.opened_at = None;
        }
        metrics::record_transition(&self.id, from, to);
    }

    // Every critical section leaves Inner consistent, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
