//! Parser configuration.
//!
//! [`ParserConfig`] is a plain serde-friendly struct with builder methods and
//! no CLI framework dependencies.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{DateFallback, ParserConfig};
//! use chatlens::parser::ChatParser;
//! use chrono::NaiveDate;
//!
//! let config = ParserConfig::new()
//!     .with_skip_system_messages(true)
//!     .with_date_fallback(DateFallback::Fixed(
//!         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     ));
//!
//! let parser = ChatParser::with_config(config);
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// What to do with a header whose date token matches none of the known layouts.
///
/// Numeric dates in exports carry no locale hint, so a token can be
/// unparseable under every layout. The default keeps the record and pins it
/// to the current day, which makes replays of such files time dependent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFallback {
    /// Use the current local date, resolved once per parse call.
    #[default]
    Today,
    /// Use a fixed date. Makes parsing fully deterministic.
    Fixed(NaiveDate),
    /// Leave the timestamp unset so the record is dropped by the post-filter.
    Drop,
}

impl DateFallback {
    /// Resolves the fallback to a concrete date, or `None` for [`DateFallback::Drop`].
    pub fn resolve(&self) -> Option<NaiveDate> {
        match self {
            DateFallback::Today => Some(Local::now().date_naive()),
            DateFallback::Fixed(date) => Some(*date),
            DateFallback::Drop => None,
        }
    }
}

/// Configuration for chat log parsing.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_extra_system_phrase("pinned a message");
/// assert!(config.skip_system_messages);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Drop membership changes, deletion notices, encryption banners, etc. (default: true)
    pub skip_system_messages: bool,

    /// Additional notice phrases, matched like the built-in ones (default: empty)
    pub extra_system_phrases: Vec<String>,

    /// Handling of unparseable date tokens (default: [`DateFallback::Today`])
    pub date_fallback: DateFallback,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            skip_system_messages: true,
            extra_system_phrases: Vec::new(),
            date_fallback: DateFallback::Today,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to skip system notices.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }

    /// Adds a phrase to the system-notice filter.
    #[must_use]
    pub fn with_extra_system_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.extra_system_phrases.push(phrase.into());
        self
    }

    /// Sets the fallback used for unparseable dates.
    #[must_use]
    pub fn with_date_fallback(mut self, fallback: DateFallback) -> Self {
        self.date_fallback = fallback;
        self
    }
}
