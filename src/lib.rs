//! Circuit breaker for calls to remote dependencies.

pub mod config;
pub mod http;
pub mod observability;
pub mod resilience;

pub use config::{BreakerSettings, GateConfig};
pub use http::BreakerClient;
pub use resilience::{
    BreakerError, CallError, CircuitBreaker, CircuitState, Clock, FaultClassifier, IdGenerator,
    ManualClock, SystemClock,
};
