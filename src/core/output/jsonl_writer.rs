//! JSON Lines (JSONL) output writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::record::JsonRecord;
use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"timestamp":"2024-01-15T10:30:00","author":"Alice","body":"Hello"}
/// {"timestamp":"2024-01-15T10:31:00","author":"Bob","body":"Hi"}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, messages, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
///
/// Same format as [`write_jsonl`], but returns a String instead of writing to file.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut out = String::new();
    for msg in messages {
        out.push_str(&serde_json::to_string(&JsonRecord::new(msg, config))?);
        out.push('\n');
    }
    Ok(out)
}

fn write_lines<W: Write>(writer: &mut W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    for msg in messages {
        serde_json::to_writer(&mut *writer, &JsonRecord::new(msg, config))?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
