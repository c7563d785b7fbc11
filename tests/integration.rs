//! Integration tests: parsing real files from disk.

use std::fs;
use std::path::PathBuf;

use chatlens::prelude::*;
use chrono::{NaiveDate, TimeZone, Utc, Weekday};
use tempfile::{TempDir, tempdir};

const US_EXPORT: &str = "\
1/15/2024, 10:30 AM - Alice: Hey everyone! 😀
1/15/2024, 10:31 AM - Bob: Morning
1/15/2024, 10:32 AM - Bob: Great! Working on the project
still going, see https://example.com/plan
1/16/2024, 2:00 PM - Alice: ready for the meeting?
1/16/2024, 2:01 PM - Charlie: <Media omitted>
";

const EU_EXPORT: &str = "\
15/01/2024, 10:30 - Alice: Hey everyone!
15/01/2024, 10:32 - Bob: Great! Working on the project
16/01/2024, 14:00 - Alice: ready for the meeting?
";

const BRACKETED_EXPORT: &str = "\
[1/15/24, 10:30:15 AM] Alice: Hey everyone!
[1/15/24, 10:32:00 AM] Bob: Great! Working on the project
[1/16/24, 2:00:00 PM] Alice: ready for the meeting?
";

const ISO_EXPORT: &str = "\
2024-01-15, 10:30 - Alice: Hey everyone!
2024-01-15, 10:32 - Bob: Great! Working on the project
2024-01-16, 14:00 - Alice: ready for the meeting?
";

const GROUP_EXPORT: &str = "\
1/15/24, 9:00 AM - Messages and calls are end-to-end encrypted. No one outside of this chat can read them.
1/15/24, 9:01 AM - Alice: Alice created group \"Trip\"
1/15/24, 9:02 AM - Alice: Alice added Bob
1/15/24, 9:05 AM - Bob: Hi all
1/15/24, 9:06 AM - Bob: This message was deleted
1/15/24, 9:07 AM - Charlie: Charlie left
1/15/24, 9:08 AM - Alice: Who is bringing snacks?
";

fn write_fixture(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn fixed_parser() -> ChatParser {
    let fallback = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    ChatParser::with_config(ParserConfig::new().with_date_fallback(DateFallback::Fixed(fallback)))
}

fn bodies(messages: &[Message]) -> Vec<&str> {
    messages.iter().map(Message::body).collect()
}

// ============================================================================
// Header shapes
// ============================================================================

#[test]
fn test_us_export_from_file() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "us.txt", US_EXPORT.as_bytes());

    let report = fixed_parser().parse_with_stats(&path).unwrap();
    let messages = &report.messages;

    assert_eq!(messages.len(), 5);
    assert_eq!(
        messages[0].timestamp,
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    );
    assert_eq!(
        messages[2].body,
        "Great! Working on the project still going, see https://example.com/plan"
    );
    assert_eq!(messages[2].normalized_body, "great! working on the project still going, see");
    assert_eq!(messages[3].hour, 14);
    assert_eq!(messages[3].weekday, Weekday::Tue);
    assert_eq!(messages[4].body, "<Media omitted>");

    assert_eq!(report.stats.headers, 5);
    assert_eq!(report.stats.continuations, 1);
    assert_eq!(report.stats.emitted, 5);
    assert!(!report.stats.used_fallbacks());
}

#[test]
fn test_every_header_shape_yields_the_same_timeline() {
    let expected = [
        ("Alice", "Hey everyone!", 2024, 1, 15, 10, 30),
        ("Bob", "Great! Working on the project", 2024, 1, 15, 10, 32),
        ("Alice", "ready for the meeting?", 2024, 1, 16, 14, 0),
    ];

    for export in [EU_EXPORT, ISO_EXPORT, BRACKETED_EXPORT] {
        let messages = fixed_parser().parse_str(export);
        assert_eq!(messages.len(), 3, "export:\n{export}");

        for (msg, (author, body, y, mo, d, h, mi)) in messages.iter().zip(expected) {
            assert_eq!(msg.author, author);
            assert_eq!(msg.body, body);
            assert_eq!(msg.date, NaiveDate::from_ymd_opt(y, mo, d).unwrap());
            assert_eq!(msg.hour, h);
            assert_eq!(msg.timestamp.format("%M").to_string(), format!("{mi:02}"));
        }
    }
}

#[test]
fn test_bracketed_keeps_seconds() {
    let messages = fixed_parser().parse_str(BRACKETED_EXPORT);
    assert_eq!(
        messages[0].timestamp,
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 15).unwrap()
    );
}

#[test]
fn test_dotted_export() {
    let log = "26.10.2025, 21:15 - Anna: Guten Abend\n[27.10.25, 08:00:00] Ben: Morgen";
    let messages = fixed_parser().parse_str(log);

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].date, NaiveDate::from_ymd_opt(2025, 10, 26).unwrap());
    assert_eq!(messages[1].date, NaiveDate::from_ymd_opt(2025, 10, 27).unwrap());
}

// ============================================================================
// Post-filter
// ============================================================================

#[test]
fn test_group_notices_are_dropped() {
    let report = fixed_parser().parse_str_with_stats(GROUP_EXPORT);

    assert_eq!(bodies(&report.messages), vec!["Hi all", "Who is bringing snacks?"]);
    // The author-less banner is not a header and precedes every header.
    assert_eq!(report.stats.orphan_lines, 1);
    assert_eq!(report.stats.system_notices, 4);
}

#[test]
fn test_keep_system_notices() {
    let parser = ChatParser::with_config(
        ParserConfig::new()
            .with_skip_system_messages(false)
            .with_date_fallback(DateFallback::Drop),
    );
    let messages = parser.parse_str(GROUP_EXPORT);

    assert_eq!(messages.len(), 6);
    assert!(messages.iter().any(|m| m.body == "Charlie left"));
}

#[test]
fn test_output_is_sorted_even_if_file_is_not() {
    let log = "\
1/16/24, 9:00 AM - Alice: second day
1/15/24, 9:00 AM - Bob: first day
1/15/24, 9:00 AM - Carol: same minute as bob";
    let messages = fixed_parser().parse_str(log);

    assert_eq!(
        bodies(&messages),
        vec!["first day", "same minute as bob", "second day"]
    );
}

// ============================================================================
// Fallbacks
// ============================================================================

#[test]
fn test_unparseable_date_uses_fixed_fallback() {
    let log = "13/13/2024, 10:30 - Alice: impossible date\n1/15/24, 25:00 - Bob: impossible time";
    let report = fixed_parser().parse_str_with_stats(log);

    assert_eq!(report.messages.len(), 2);
    assert_eq!(
        report.messages[0].timestamp,
        Utc.with_ymd_and_hms(2000, 1, 1, 10, 30, 0).unwrap()
    );
    assert_eq!(
        report.messages[1].timestamp,
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
    );
    assert_eq!(report.stats.date_fallbacks, 1);
    assert_eq!(report.stats.time_fallbacks, 1);
}

#[test]
fn test_drop_undated() {
    let parser =
        ChatParser::with_config(ParserConfig::new().with_date_fallback(DateFallback::Drop));
    let log = "13/13/2024, 10:30 - Alice: impossible date\n1/15/24, 10:31 - Bob: fine";
    let report = parser.parse_str_with_stats(log);

    assert_eq!(bodies(&report.messages), vec!["fine"]);
    assert_eq!(report.stats.undated_dropped, 1);
}

#[test]
fn test_today_fallback() {
    let before = chrono::Local::now().date_naive();
    let messages = ChatParser::new().parse_str("99/99/9999, 10:00 - Alice: when?");
    let after = chrono::Local::now().date_naive();

    assert_eq!(messages.len(), 1);
    assert!(messages[0].date == before || messages[0].date == after);
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_utf8_bom_file() {
    let dir = tempdir().unwrap();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(EU_EXPORT.as_bytes());
    let path = write_fixture(&dir, "bom.txt", &bytes);

    let messages = fixed_parser().parse(&path).unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].author, "Alice");
}

#[test]
fn test_utf16_file() {
    let dir = tempdir().unwrap();
    let mut bytes = vec![0xFF, 0xFE];
    for unit in EU_EXPORT.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let path = write_fixture(&dir, "utf16.txt", &bytes);

    let messages = fixed_parser().parse(&path).unwrap();
    assert_eq!(bodies(&messages).len(), 3);
}

#[test]
fn test_crlf_file() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "crlf.txt", US_EXPORT.replace('\n', "\r\n").as_bytes());

    let messages = fixed_parser().parse(&path).unwrap();
    assert_eq!(messages.len(), 5);
    assert!(messages.iter().all(|m| !m.body.contains('\r')));
}

#[test]
fn test_invalid_bytes_are_fatal() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "binary.txt", &[0x31, 0x2F, 0xC3, 0x28, 0xFF]);

    let err = ChatParser::new().parse(&path).unwrap_err();
    assert!(err.is_decode());
    assert!(err.to_string().contains("binary.txt"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = ChatParser::new()
        .parse(&dir.path().join("nope.txt"))
        .unwrap_err();
    assert!(err.is_io());
}

#[test]
fn test_empty_file() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "empty.txt", b"");

    let report = ChatParser::new().parse_with_stats(&path).unwrap();
    assert!(report.is_empty());
    assert_eq!(report.stats, ParseStats::default());
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn test_parse_filter_write() {
    let dir = tempdir().unwrap();
    let input = write_fixture(&dir, "chat.txt", US_EXPORT.as_bytes());
    let output = dir.path().join("alice.jsonl");

    let messages = fixed_parser().parse(&input).unwrap();
    let filter = FilterConfig::new()
        .with_author("alice")
        .with_date_from("2024-01-16")
        .unwrap();
    let filtered = apply_filters(messages, &filter);

    let output_str = output.to_str().unwrap();
    let format = OutputFormat::from_path(output_str).unwrap();
    write_to_format(&filtered, output_str, format, &OutputConfig::all()).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);

    let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(value["author"], "Alice");
    assert_eq!(value["timestamp"], "2024-01-16T14:00:00");
    assert_eq!(value["weekday"], "Tuesday");
    assert_eq!(value["normalized_body"], "ready for the meeting?");
}
