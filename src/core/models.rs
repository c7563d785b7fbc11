//! Output configuration shared by the writers.

use serde::{Deserialize, Serialize};

/// Controls which columns the writers emit.
///
/// `timestamp`, `author` and `body` are always written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include `date`, `hour`, `weekday` and `length`
    pub include_derived: bool,
    /// Include `normalized_body`
    pub include_normalized: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits every field of [`Message`](crate::Message).
    pub fn all() -> Self {
        Self {
            include_derived: true,
            include_normalized: true,
        }
    }

    #[must_use]
    pub fn with_derived(mut self) -> Self {
        self.include_derived = true;
        self
    }

    #[must_use]
    pub fn with_normalized(mut self) -> Self {
        self.include_normalized = true;
        self
    }
}
