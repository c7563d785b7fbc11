//! Command-line interface definition using clap.
//!
//! [`Args`] maps one-to-one onto the library configuration types, so the
//! binary stays a thin pipeline: parse, filter, write, summarize.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{DateFallback, ParserConfig};
use crate::core::filter::{FilterConfig, parse_filter_date};
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Stem of the output file when `--output` is not given.
pub const DEFAULT_OUTPUT_STEM: &str = "chat_messages";

/// Parse an exported chat log into clean, time-ordered message records.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens chat.txt
    chatlens chat.txt -f json --derived --normalized
    chatlens chat.txt -o alice.csv --from Alice --after 2024-01-01
    chatlens chat.txt --fallback-date 2024-01-01 -v")]
pub struct Args {
    /// Path to the exported chat log
    pub input: String,

    /// Path to output file [default: chat_messages.<format extension>]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Keep messages on or after this day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages from this author only (case-insensitive)
    #[arg(long, value_name = "AUTHOR")]
    pub from: Option<String>,

    /// Include date, hour, weekday and length columns
    #[arg(long)]
    pub derived: bool,

    /// Include the normalized body column
    #[arg(long)]
    pub normalized: bool,

    /// Keep system notices (joins, deletions, encryption banners)
    #[arg(long)]
    pub keep_system: bool,

    /// Date used when a header's date cannot be parsed (YYYY-MM-DD) [default: today]
    #[arg(long, value_name = "DATE", conflicts_with = "drop_undated")]
    pub fallback_date: Option<String>,

    /// Drop messages whose date cannot be parsed
    #[arg(long)]
    pub drop_undated: bool,

    /// Log parser decisions to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the parser configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`](crate::ChatlensError::InvalidDate)
    /// for a malformed `--fallback-date`.
    pub fn parser_config(&self) -> Result<ParserConfig> {
        let fallback = match (&self.fallback_date, self.drop_undated) {
            (_, true) => DateFallback::Drop,
            (Some(date), false) => DateFallback::Fixed(parse_filter_date(date)?),
            (None, false) => DateFallback::Today,
        };

        Ok(ParserConfig::new()
            .with_skip_system_messages(!self.keep_system)
            .with_date_fallback(fallback))
    }

    /// Builds the post-parse filter.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`](crate::ChatlensError::InvalidDate)
    /// for a malformed `--after` or `--before`.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_author(from.clone());
        }
        Ok(filter)
    }

    /// Builds the writer configuration.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            include_derived: self.derived,
            include_normalized: self.normalized,
        }
    }

    /// Returns `--output`, or `chat_messages.<ext>` for the chosen format.
    pub fn output_path(&self) -> String {
        match self.output {
            Some(ref path) => path.clone(),
            None => format!("{DEFAULT_OUTPUT_STEM}.{}", self.format.extension()),
        }
    }
}

/// Output format options accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON array of messages
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
