//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::{ChatlensError, Result};

const CSV_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: depend on [`OutputConfig`]
///   - Always: `Timestamp`, `Author`, `Body`
///   - With derived fields: `Date`, `Hour`, `Weekday`, `Length`
///   - With normalized text: `NormalizedBody`
/// - Encoding: UTF-8
pub fn write_csv(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_records(&mut buf, messages, config)?;
    String::from_utf8(buf).map_err(|e| ChatlensError::invalid_format("csv", e.to_string()))
}

fn write_records<W: Write>(out: W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["Timestamp", "Author", "Body"];

    if config.include_derived {
        header.extend(["Date", "Hour", "Weekday", "Length"]);
    }
    if config.include_normalized {
        header.push("NormalizedBody");
    }

    header
}

/// Build CSV record for a single message.
fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = vec![
        msg.timestamp.format(CSV_TIMESTAMP).to_string(),
        msg.author.clone(),
        msg.body.clone(),
    ];

    if config.include_derived {
        record.push(msg.date.format("%Y-%m-%d").to_string());
        record.push(msg.hour.to_string());
        record.push(msg.weekday_name().to_string());
        record.push(msg.length.to_string());
    }
    if config.include_normalized {
        record.push(msg.normalized_body.clone());
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    fn sample() -> Vec<Message> {
        vec![
            Message::new(
                Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
                "Alice",
                "Hello 😀",
            ),
            Message::new(
                Utc.with_ymd_and_hms(2024, 1, 15, 10, 31, 0).unwrap(),
                "Bob",
                "Hi; there",
            ),
        ]
    }

    #[test]
    fn test_write_csv_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_csv(&sample(), path, &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("Timestamp;Author;Body"));
        assert_eq!(lines.next(), Some("2024-01-15 10:30:00;Alice;Hello 😀"));
    }

    #[test]
    fn test_delimiter_in_body_is_quoted() {
        let csv = to_csv(&sample(), &OutputConfig::new()).unwrap();
        assert!(csv.contains("Bob;\"Hi; there\""));
    }

    #[test]
    fn test_derived_and_normalized_columns() {
        let csv = to_csv(&sample(), &OutputConfig::all()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Timestamp;Author;Body;Date;Hour;Weekday;Length;NormalizedBody")
        );
        assert_eq!(
            lines.next(),
            Some("2024-01-15 10:30:00;Alice;Hello 😀;2024-01-15;10;Monday;7;hello :grinning_face:")
        );
    }

    #[test]
    fn test_empty_sequence_writes_header_only() {
        let csv = to_csv(&[], &OutputConfig::new()).unwrap();
        assert_eq!(csv.lines().collect::<Vec<_>>(), vec!["Timestamp;Author;Body"]);
    }
}
