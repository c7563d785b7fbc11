//! JSON output writer.

use std::fs::File;
use std::io::Write;

use super::record::JsonRecord;
use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Writes messages to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"timestamp": "2024-01-15T10:30:00", "author": "Alice", "body": "Hello"},
///   {"timestamp": "2024-01-15T10:31:00", "author": "Bob", "body": "Hi"}
/// ]
/// ```
pub fn write_json(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to a JSON array string.
///
/// Same format as [`write_json`], but returns a String instead of writing to file.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let records: Vec<JsonRecord<'_>> = messages
        .iter()
        .map(|msg| JsonRecord::new(msg, config))
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
