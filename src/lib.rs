//! # Chatlens
//!
//! A Rust library that turns exported chat logs into clean, time-ordered
//! message records ready for analytics.
//!
//! ## Overview
//!
//! A chat export is a plain-text file where every message starts with a
//! header line (`date, time - Author: text`) and long messages spill over
//! onto further lines. Chatlens:
//!
//! - decodes the file (UTF-8, with a BOM-driven UTF-16 retry)
//! - classifies every line as a message header or a continuation
//! - normalizes ambiguous date and time tokens into a single timestamp
//! - folds continuations into the message they belong to
//! - drops system notices and incomplete records, sorts by time, and adds
//!   derived fields (`date`, `hour`, `weekday`, `length`, `normalized_body`)
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! let log = "\
//! 1/15/24, 10:30 AM - Alice: Hey everyone!
//! 1/15/24, 10:31 AM - Bob: Hi Alice
//! this is a second line
//! 1/15/24, 10:32 AM - Charlie: Charlie left";
//!
//! let messages = ChatParser::new().parse_str(log);
//!
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[1].body, "Hi Alice this is a second line");
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatParser`](parser::ChatParser), [`ParseStats`](parser::ParseStats)
//! - [`parsing`] - the individual stages (decode, classify, timestamps, notices, text)
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`DateFallback`](config::DateFallback)
//! - [`message`] - the [`Message`] record
//! - [`core`] - post-parse filtering and output writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`cli`] - command-line arguments (feature `cli`)
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{ChatlensError, Result};

    pub use crate::parser::{ChatParser, ParseReport, ParseStats};

    pub use crate::config::{DateFallback, ParserConfig};

    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
