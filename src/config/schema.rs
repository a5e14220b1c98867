//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration file layout.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    /// Settings of the breaker protecting the dependency.
    pub breaker: BreakerSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Circuit breaker settings. Immutable once a breaker is built from them.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct BreakerSettings {
    /// Identity used in logs and metrics (e.g. "user_service").
    /// Generated when absent.
    pub id: Option<String>,

    /// Number of faults within `threshold_period_ms` that opens the circuit.
    pub threshold: u32,

    /// Length of the fault counting window in milliseconds.
    pub threshold_period_ms: u64,

    /// How long the circuit stays open before probing, in milliseconds.
    pub reset_period_ms: u64,

    /// Successful probes needed to close the circuit again.
    /// Also caps the number of concurrent probes.
    pub num_requests_to_close_circuit: u32,
}

impl Default for BreakerSettings {
    fn default() -> Self {
        Self {
            id: None,
            threshold: 50,
            threshold_period_ms: 5_000,
            reset_period_ms: 10_000,
            num_requests_to_close_circuit: 20,
        }
    }
}

impl BreakerSettings {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Pretty for development, json for production.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
