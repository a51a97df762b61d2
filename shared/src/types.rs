//! Common types used across the analytics core

use serde::{Deserialize, Serialize};

/// Outcome of a calculation that needs a minimum amount of history
///
/// Keeps "not enough data" distinct from a genuine zero. Callers that want
/// the conservative default use [`Analysis::unwrap_or_default`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Analysis<T> {
    Computed(T),
    InsufficientData { required: usize, available: usize },
}

impl<T> Analysis<T> {
    /// `Computed(value)` when `available >= required`, otherwise insufficient
    pub fn require(required: usize, available: usize, compute: impl FnOnce() -> T) -> Self {
        if available < required {
            Analysis::InsufficientData {
                required,
                available,
            }
        } else {
            Analysis::Computed(compute())
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Analysis::Computed(_))
    }

    pub fn computed(self) -> Option<T> {
        match self {
            Analysis::Computed(value) => Some(value),
            Analysis::InsufficientData { .. } => None,
        }
    }
}

impl<T: Default> Analysis<T> {
    pub fn unwrap_or_default(self) -> T {
        self.computed().unwrap_or_default()
    }
}
