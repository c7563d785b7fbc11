//! Post-parse processing for chatlens.
//!
//! This module contains:
//! - [`models`] - Output configuration
//! - [`filter`] - Message filtering by day and author
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::{FilterConfig, OutputConfig, apply_filters, to_csv, to_jsonl};
//! use chatlens::parser::ChatParser;
//!
//! let log = "1/15/24, 10:30 AM - Alice: Hello!\n1/16/24, 9:00 AM - Bob: Morning";
//! let messages = ChatParser::new().parse_str(log);
//!
//! let filter = FilterConfig::new().with_date_from("2024-01-16")?;
//! let recent = apply_filters(messages, &filter);
//! assert_eq!(recent.len(), 1);
//! assert_eq!(recent[0].author, "Bob");
//!
//! let config = OutputConfig::new();
//! assert_eq!(to_csv(&recent, &config)?.lines().count(), 2);
//! assert_eq!(to_jsonl(&recent, &config)?.lines().count(), 1);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

pub mod filter;
pub mod models;
pub mod output;

// Re-export main types for convenience
pub use filter::{FilterConfig, apply_filters};
pub use models::OutputConfig;

pub use crate::Message;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
