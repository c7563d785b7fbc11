//! Filter parsed messages by day range and author.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for narrowing a parsed sequence.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after day |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before day |
//! | Author | [`with_author`](FilterConfig::with_author) | Messages from one author |
//!
//! # Example
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::Message;
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> chatlens::Result<()> {
//! let messages = vec![
//!     Message::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(), "Alice", "Old"),
//!     Message::new(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(), "Alice", "New"),
//!     Message::new(Utc.with_ymd_and_hms(2024, 6, 16, 9, 0, 0).unwrap(), "Bob", "Hi"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_author("alice");
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body, "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Day bounds are inclusive and compare against [`Message::date`]
//! - Author matching is case-insensitive
//! - Multiple filters are combined with AND logic
//! - Order of the input is preserved

use chrono::NaiveDate;

use crate::Message;
use crate::error::{ChatlensError, Result};

/// Configuration for filtering messages by day and author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Include only messages on or after this day.
    pub after: Option<NaiveDate>,

    /// Include only messages on or before this day.
    pub before: Option<NaiveDate>,

    /// Include only messages from this author (case-insensitive).
    pub author: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first day to include. Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the last day to include. Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        self.before = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the author filter.
    ///
    /// ```
    /// use chatlens::core::filter::FilterConfig;
    ///
    /// // Matches "Alice", "alice", "ALICE"
    /// let config = FilterConfig::new().with_author("Alice");
    /// assert!(config.is_active());
    /// ```
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.author.is_some()
    }

    /// Returns `true` if `msg` passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if self.after.is_some_and(|after| msg.date < after) {
            return false;
        }
        if self.before.is_some_and(|before| msg.date > before) {
            return false;
        }
        match self.author {
            Some(ref author) => author_matches(&msg.author, author),
            None => true,
        }
    }
}

/// Parses a `YYYY-MM-DD` filter date.
pub(crate) fn parse_filter_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| ChatlensError::invalid_date(date_str))
}

fn author_matches(author: &str, wanted: &str) -> bool {
    author.eq_ignore_ascii_case(wanted) || author.to_lowercase() == wanted.to_lowercase()
}

/// Keeps only the messages that match all active filters.
///
/// If no filters are active, returns the original messages unchanged.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }

    messages
        .into_iter()
        .filter(|msg| config.matches(msg))
        .collect()
}
