//! HTTP client binding.
//!
//! # Data Flow
//! ```text
//! caller
//!     → BreakerClient::send
//!     → CircuitBreaker::try_admit (reject early: no request leaves the process)
//!     → reqwest::Client (request to dependency)
//!     → error_for_status (non-2xx becomes an error)
//!     → FaultClassifier (ServerErrorFault by default)
//!     → CircuitBreaker::on_success / on_fault
//! ```
//!
//! # Design Decisions
//! - One breaker per client, i.e. per protected dependency
//! - 4xx responses are errors for the caller but not faults of the dependency

pub mod client;

pub use client::{BreakerClient, ServerErrorFault};
