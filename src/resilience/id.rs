//! Breaker identity.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out ids for breakers constructed without one.
///
/// Owned by the caller and passed to each builder that should draw from it,
/// so two independent sets of breakers never share a sequence.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Sequence starting at "0".
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Fallback id when neither an explicit id nor a generator is supplied.
pub(crate) fn random_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
