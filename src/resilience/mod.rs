//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to dependency:
//!     → circuit_breaker.rs (admission check, may reject fast)
//!     → caller issues the call
//!     → guard.rs / caller classifies the outcome
//!     → circuit_breaker.rs (report success or fault, maybe transition)
//! ```
//!
//! # Design Decisions
//! - The breaker gates and observes; it never issues or retries calls
//! - Time comes from an injected Clock, ids from an optional IdGenerator
//! - Rejections are ordinary `Result` errors carrying breaker id and state

pub mod circuit_breaker;
pub mod clock;
pub mod error;
pub mod guard;
pub mod id;
pub mod state;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerBuilder};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{BreakerError, BuildError, CallError};
pub use guard::{AllErrors, FaultClassifier};
pub use id::IdGenerator;
pub use state::{BreakerSnapshot, CircuitState};
