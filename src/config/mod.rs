//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GateConfig (validated, immutable)
//!     → BreakerSettings handed to CircuitBreaker::builder
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once a breaker is built; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Builders validate again, so settings constructed in code get the same checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{BreakerSettings, GateConfig, LogFormat, ObservabilityConfig};
pub use validation::ValidationError;
