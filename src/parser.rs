//! Chat log parser.
//!
//! Reconstructs an exported chat log into an ordered sequence of
//! [`Message`] records:
//!
//! 1. decode the file ([`read_chat_file`])
//! 2. classify each line as header or continuation ([`classify_line`])
//! 3. fold continuation lines into the open message
//! 4. drop system notices and empty records
//! 5. sort by timestamp and compute derived fields
//!
//! Only step 1 can fail. Everything else degrades: unknown lines are folded
//! or dropped, bad dates and times fall back, and an export with nothing
//! usable in it yields an empty `Vec`.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::ChatParser;
//!
//! let log = "\
//! 1/15/2024, 10:30 AM - Alice: Hey everyone!
//! 1/15/2024, 10:32 AM - Bob: Great! Working on the project
//! and almost done
//! 1/16/2024, 2:00 PM - Alice: ready for the meeting?";
//!
//! let messages = ChatParser::new().parse_str(log);
//! assert_eq!(messages.len(), 3);
//! assert_eq!(messages[1].body, "Great! Working on the project and almost done");
//! ```

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::parsing::decode::read_chat_file;
use crate::parsing::header::{HeaderMatch, LineKind, classify_line, clean_line};
use crate::parsing::system::is_system_notice;
use crate::parsing::timestamp::normalize_timestamp;

/// Counters collected during one parse call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Non-blank input lines.
    pub lines: usize,
    /// Lines that opened a new message.
    pub headers: usize,
    /// Lines folded into an open message.
    pub continuations: usize,
    /// Non-header lines seen before any header, discarded.
    pub orphan_lines: usize,
    /// Records removed as system notices.
    pub system_notices: usize,
    /// Records removed for an empty author or body.
    pub empty_dropped: usize,
    /// Records removed because their date could not be resolved.
    pub undated_dropped: usize,
    /// Headers whose date token matched no layout.
    pub date_fallbacks: usize,
    /// Headers whose time token matched no layout.
    pub time_fallbacks: usize,
    /// Messages in the final sequence.
    pub emitted: usize,
}

impl ParseStats {
    /// Returns `true` if any timestamp had to be guessed.
    pub fn used_fallbacks(&self) -> bool {
        self.date_fallbacks > 0 || self.time_fallbacks > 0
    }

    /// Records assembled before filtering.
    pub fn assembled(&self) -> usize {
        self.headers
    }
}

/// Messages together with the statistics of the parse that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    /// Final, timestamp-ordered messages.
    pub messages: Vec<Message>,
    /// Counters for the parse.
    pub stats: ParseStats,
}

impl ParseReport {
    /// Returns `true` if no message survived filtering.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// A message under construction.
#[derive(Debug)]
struct PendingMessage {
    timestamp: Option<DateTime<Utc>>,
    author: String,
    body: String,
}

impl PendingMessage {
    fn from_header(
        header: &HeaderMatch<'_>,
        fallback_date: Option<NaiveDate>,
        stats: &mut ParseStats,
    ) -> Self {
        let normalized =
            normalize_timestamp(header.date, &header.time_with_meridiem(), fallback_date);
        if normalized.date_fallback {
            stats.date_fallbacks += 1;
        }
        if normalized.time_fallback {
            stats.time_fallbacks += 1;
        }

        Self {
            timestamp: normalized.timestamp,
            author: header.author.to_owned(),
            body: header.body.to_owned(),
        }
    }

    fn append(&mut self, line: &str) {
        if !self.body.is_empty() {
            self.body.push(' ');
        }
        self.body.push_str(line);
    }
}

/// Record assembler states.
enum AssemblerState {
    NoOpenMessage,
    MessageOpen(PendingMessage),
}

/// Parser for exported chat logs.
///
/// Stateless between calls: the same parser can be shared across threads
/// and used on many files.
///
/// # Example
///
/// ```rust,no_run
/// use chatlens::parser::ChatParser;
///
/// let parser = ChatParser::new();
/// let messages = parser.parse("chat.txt".as_ref())?;
/// if messages.is_empty() {
///     println!("no parseable messages");
/// }
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParserConfig,
}

impl ChatParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads and parses a chat export file.
    ///
    /// # Errors
    ///
    /// Fails only if the file cannot be read or decoded.
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        Ok(self.parse_with_stats(path)?.messages)
    }

    /// Like [`parse`](Self::parse), also returning [`ParseStats`].
    pub fn parse_with_stats(&self, path: &Path) -> Result<ParseReport> {
        let content = read_chat_file(path)?;
        Ok(self.parse_str_with_stats(&content))
    }

    /// Parses already decoded text.
    pub fn parse_str(&self, content: &str) -> Vec<Message> {
        self.parse_str_with_stats(content).messages
    }

    /// Like [`parse_str`](Self::parse_str), also returning [`ParseStats`].
    pub fn parse_str_with_stats(&self, content: &str) -> ParseReport {
        let mut stats = ParseStats::default();
        let fallback_date = self.config.date_fallback.resolve();

        let assembled = assemble(content, fallback_date, &mut stats);
        let messages = self.finish(assembled, &mut stats);

        tracing::debug!(
            lines = stats.lines,
            headers = stats.headers,
            continuations = stats.continuations,
            orphan_lines = stats.orphan_lines,
            system_notices = stats.system_notices,
            empty_dropped = stats.empty_dropped,
            undated_dropped = stats.undated_dropped,
            date_fallbacks = stats.date_fallbacks,
            time_fallbacks = stats.time_fallbacks,
            emitted = stats.emitted,
            "parsed chat log"
        );

        ParseReport { messages, stats }
    }

    /// Filters, sorts and enriches assembled records.
    fn finish(&self, assembled: Vec<PendingMessage>, stats: &mut ParseStats) -> Vec<Message> {
        let mut kept: Vec<(DateTime<Utc>, PendingMessage)> =
            Vec::with_capacity(assembled.len());

        for pending in assembled {
            if self.config.skip_system_messages
                && is_system_notice(&pending.body, &self.config.extra_system_phrases)
            {
                stats.system_notices += 1;
                continue;
            }
            if pending.author.is_empty() || pending.body.is_empty() {
                stats.empty_dropped += 1;
                continue;
            }
            let Some(timestamp) = pending.timestamp else {
                stats.undated_dropped += 1;
                continue;
            };
            kept.push((timestamp, pending));
        }

        // Stable: equal timestamps keep file order.
        kept.sort_by_key(|(timestamp, _)| *timestamp);

        let messages: Vec<Message> = kept
            .into_iter()
            .map(|(timestamp, pending)| Message::new(timestamp, pending.author, pending.body))
            .collect();

        stats.emitted = messages.len();
        messages
    }
}

/// Runs the header/continuation state machine over the whole input.
///
/// Lines must be processed strictly in file order: a continuation belongs to
/// whichever header came last.
fn assemble(
    content: &str,
    fallback_date: Option<NaiveDate>,
    stats: &mut ParseStats,
) -> Vec<PendingMessage> {
    let mut assembled = Vec::new();
    let mut state = AssemblerState::NoOpenMessage;

    for raw in content.lines() {
        let line = clean_line(raw);
        if line.is_empty() {
            continue;
        }
        stats.lines += 1;

        state = match (state, classify_line(line)) {
            (AssemblerState::NoOpenMessage, LineKind::Header(header)) => {
                stats.headers += 1;
                let opened = PendingMessage::from_header(&header, fallback_date, stats);
                AssemblerState::MessageOpen(opened)
            }
            (AssemblerState::NoOpenMessage, LineKind::Continuation) => {
                tracing::trace!(line, "continuation before first header, dropped");
                stats.orphan_lines += 1;
                AssemblerState::NoOpenMessage
            }
            (AssemblerState::MessageOpen(open), LineKind::Header(header)) => {
                assembled.push(open);
                stats.headers += 1;
                let opened = PendingMessage::from_header(&header, fallback_date, stats);
                AssemblerState::MessageOpen(opened)
            }
            (AssemblerState::MessageOpen(mut open), LineKind::Continuation) => {
                open.append(line);
                stats.continuations += 1;
                AssemblerState::MessageOpen(open)
            }
        };
    }

    if let AssemblerState::MessageOpen(open) = state {
        assembled.push(open);
    }

    assembled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DateFallback;
    use chrono::TimeZone;

    fn fixed_parser() -> ChatParser {
        let fallback = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        ChatParser::with_config(
            ParserConfig::new().with_date_fallback(DateFallback::Fixed(fallback)),
        )
    }

    #[test]
    fn test_three_message_scenario() {
        let log = "1/15/2024, 10:30 AM - Alice: Hey everyone!\n\
                   1/15/2024, 10:32 AM - Bob: Great! Working on the project\n\
                   1/16/2024, 2:00 PM - Alice: ready for the meeting?";
        let report = fixed_parser().parse_str_with_stats(log);

        let authors: Vec<&str> = report.messages.iter().map(|m| m.author()).collect();
        assert_eq!(authors, vec!["Alice", "Bob", "Alice"]);
        assert!(!report.stats.used_fallbacks());
        assert_eq!(
            report.messages[2].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 16, 14, 0, 0).unwrap()
        );
        assert!(
            report
                .messages
                .windows(2)
                .all(|w| w[0].timestamp <= w[1].timestamp)
        );
    }

    #[test]
    fn test_continuation_folding() {
        let log = "1/15/2024, 10:30 AM - Alice: first\n\
                   second\n\
                   third\n\
                   1/15/2024, 10:31 AM - Bob: next";
        let report = fixed_parser().parse_str_with_stats(log);

        assert_eq!(report.messages.len(), 2);
        assert_eq!(report.messages[0].body, "first second third");
        assert_eq!(report.stats.continuations, 2);
    }

    #[test]
    fn test_trailing_continuation_without_next_header() {
        let log = "1/15/2024, 10:30 AM - Alice: Header line's fragment\ncontinuation text";
        let messages = fixed_parser().parse_str(log);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].body, "Header line's fragment continuation text");
    }

    #[test]
    fn test_orphan_lines_dropped() {
        let log = "Jan 15 2024 10:30 - Alice: unknown header shape\nstill nothing open";
        let report = fixed_parser().parse_str_with_stats(log);

        assert!(report.is_empty());
        assert_eq!(report.stats.orphan_lines, 2);
        assert_eq!(report.stats.headers, 0);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let log = "1/15/2024, 10:30 AM - Alice: one\n\n   \n1/15/2024, 10:31 AM - Bob: two";
        let report = fixed_parser().parse_str_with_stats(log);

        assert_eq!(report.messages[0].body, "one");
        assert_eq!(report.stats.lines, 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let log = "1/15/2024, 10:30 AM - Alice: one\r\n\
                   more\r\n\
                   1/15/2024, 10:31 AM - Bob: two\r\n";
        let messages = fixed_parser().parse_str(log);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].body, "one more");
        assert_eq!(messages[1].body, "two");
    }

    #[test]
    fn test_system_notices_dropped() {
        let log = "1/15/2024, 10:00 AM - Alice: hi\n\
                   1/15/2024, 10:01 AM - Bob: This message was deleted\n\
                   1/15/2024, 10:02 AM - Carol: Messages and calls are end-to-end encrypted";
        let report = fixed_parser().parse_str_with_stats(log);

        assert_eq!(report.messages.len(), 1);
        assert_eq!(report.stats.system_notices, 2);
    }

    #[test]
    fn test_system_notices_kept_when_disabled() {
        let log = "1/15/2024, 10:01 AM - Bob: This message was deleted";
        let parser = ChatParser::with_config(ParserConfig::new().with_skip_system_messages(false));

        assert_eq!(parser.parse_str(log).len(), 1);
    }

    #[test]
    fn test_extra_system_phrases() {
        let log = "1/15/2024, 10:01 AM - Bob: Bob pinned a message\n1/15/2024, 10:02 AM - Bob: ok";
        let parser = ChatParser::with_config(
            ParserConfig::new().with_extra_system_phrase("pinned a message"),
        );

        let messages = parser.parse_str(log);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].body, "ok");
    }

    #[test]
    fn test_empty_body_dropped_unless_continued() {
        let log = "1/15/2024, 10:00 AM - Alice:\n\
                   1/15/2024, 10:01 AM - Bob:\n\
                   continued text";
        let report = fixed_parser().parse_str_with_stats(log);

        assert_eq!(report.messages.len(), 1);
        assert_eq!(report.messages[0].author, "Bob");
        assert_eq!(report.messages[0].body, "continued text");
        assert_eq!(report.stats.empty_dropped, 1);
    }

    #[test]
    fn test_sorted_stably_by_timestamp() {
        let log = "1/16/2024, 9:00 AM - Alice: later\n\
                   1/15/2024, 9:00 AM - Bob: earlier\n\
                   1/15/2024, 9:00 AM - Carol: same time as Bob";
        let messages = fixed_parser().parse_str(log);

        let authors: Vec<&str> = messages.iter().map(|m| m.author()).collect();
        assert_eq!(authors, vec!["Bob", "Carol", "Alice"]);
    }

    #[test]
    fn test_date_fallback_fixed() {
        let log = "13/13/2024, 10:00 - Alice: odd date";
        let report = fixed_parser().parse_str_with_stats(log);

        assert_eq!(report.stats.date_fallbacks, 1);
        assert_eq!(
            report.messages[0].date,
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
        );
        assert_eq!(report.messages[0].hour, 10);
    }

    #[test]
    fn test_date_fallback_drop() {
        let log = "13/13/2024, 10:00 - Alice: odd date\n1/15/2024, 10:00 AM - Bob: fine";
        let parser =
            ChatParser::with_config(ParserConfig::new().with_date_fallback(DateFallback::Drop));
        let report = parser.parse_str_with_stats(log);

        assert_eq!(report.messages.len(), 1);
        assert_eq!(report.messages[0].author, "Bob");
        assert_eq!(report.stats.undated_dropped, 1);
    }

    #[test]
    fn test_date_fallback_today_keeps_record() {
        let log = "13/13/2024, 10:00 - Alice: odd date";
        let messages = ChatParser::new().parse_str(log);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let report = ChatParser::new().parse_str_with_stats("");
        assert!(report.is_empty());
        assert_eq!(report.stats, ParseStats::default());
    }

    #[test]
    fn test_stats_counts() {
        let log = "orphan\n\
                   1/15/2024, 10:00 AM - Alice: hi\n\
                   more\n\
                   1/15/2024, 10:01 AM - Bob: Alice added Carol\n\
                   1/15/2024, 10:02 AM - Carol: hello";
        let stats = fixed_parser().parse_str_with_stats(log).stats;

        assert_eq!(stats.lines, 5);
        assert_eq!(stats.headers, 3);
        assert_eq!(stats.assembled(), 3);
        assert_eq!(stats.orphan_lines, 1);
        assert_eq!(stats.continuations, 1);
        assert_eq!(stats.system_notices, 1);
        assert_eq!(stats.emitted, 2);
    }
}
