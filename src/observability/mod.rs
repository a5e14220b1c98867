//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! CircuitBreaker produces:
//!     → tracing events (admissions, rejections, transitions)
//!     → metrics.rs (counters, state gauge)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, pretty or JSON)
//!     → whatever metrics recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - Every event carries the breaker id and current state as fields
//! - Transitions log at info/warn, per-call decisions at debug/trace
//! - Nothing is emitted anywhere unless the host installs a subscriber/recorder

pub mod logging;
pub mod metrics;
