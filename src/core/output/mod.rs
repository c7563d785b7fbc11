//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter, requires `csv-output`
//! - [`write_json`] / [`to_json`] - pretty JSON array, requires `json-output`
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON object per line, requires `json-output`
//!
//! All writers render timestamps as naive wall-clock time. The CSV writer
//! uses `%Y-%m-%d %H:%M:%S`, the JSON writers `%Y-%m-%dT%H:%M:%S`.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::output::{to_csv, write_json};
//! use chatlens::core::models::OutputConfig;
//! use chatlens::parser::ChatParser;
//!
//! let messages = ChatParser::new().parse_str("1/15/24, 10:30 - Alice: Hello!");
//! let config = OutputConfig::new().with_derived();
//!
//! write_json(&messages, "messages.json", &config)?;
//! let csv_string = to_csv(&messages, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(feature = "json-output")]
mod record {
    use serde::Serialize;

    use crate::Message;
    use crate::core::models::OutputConfig;

    const JSON_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S";

    /// Borrowed view of a message with only the configured fields.
    #[derive(Serialize)]
    pub(super) struct JsonRecord<'a> {
        timestamp: String,
        author: &'a str,
        body: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        date: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        hour: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        weekday: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        length: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        normalized_body: Option<&'a str>,
    }

    impl<'a> JsonRecord<'a> {
        pub(super) fn new(msg: &'a Message, config: &OutputConfig) -> Self {
            let derived = config.include_derived;
            Self {
                timestamp: msg.timestamp.format(JSON_TIMESTAMP).to_string(),
                author: &msg.author,
                body: &msg.body,
                date: derived.then(|| msg.date.format("%Y-%m-%d").to_string()),
                hour: derived.then_some(msg.hour),
                weekday: derived.then(|| msg.weekday_name()),
                length: derived.then_some(msg.length),
                normalized_body: config
                    .include_normalized
                    .then_some(msg.normalized_body.as_str()),
            }
        }
    }
}
