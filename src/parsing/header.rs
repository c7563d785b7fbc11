//! Header line recognition.
//!
//! A chat export has no explicit record separator: a line that starts with a
//! date, a time and `Author:` opens a new message, anything else continues
//! the previous one. This module answers that question for a single line.
//!
//! Supported shapes, tried in this order:
//! - `1/15/2024, 10:30 AM - Alice: Body`
//! - `15/01/2024, 10:30 - Alice: Body`
//! - `2024-01-15, 10:30 - Alice: Body`
//! - `[1/15/24, 10:30:45 AM] Alice: Body`
//! - `26.10.2025, 20:40 - Alice: Body`
//! - `[15.01.24, 10:30:45] Alice: Body`
//!
//! The first shape that matches wins. Nothing is validated here: `13/13/2024`
//! is a perfectly good header, the date is sorted out by
//! [`timestamp`](super::timestamp).

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Known header shapes in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderPattern {
    /// Slash date, optional AM/PM, dash separator.
    /// Example: `1/15/2024, 10:30 AM - Alice: Hi`
    SlashWithMeridiem,
    /// Slash date, 24-hour clock, dash separator.
    /// Example: `15/01/2024, 22:30 - Alice: Hi`
    Slash24Hour,
    /// ISO-ordered date, dash separator.
    /// Example: `2024-01-15, 10:30 - Alice: Hi`
    Iso,
    /// Slash date in square brackets (iOS).
    /// Example: `[1/15/24, 10:30:45 AM] Alice: Hi`
    Bracketed,
    /// Dotted day-first date, dash separator.
    /// Example: `26.10.2025, 20:40 - Alice: Hi`
    Dotted,
    /// Dotted day-first date in square brackets.
    /// Example: `[15.01.24, 10:30:45] Alice: Hi`
    DottedBracketed,
}

impl HeaderPattern {
    /// Returns the regex source for this shape.
    ///
    /// Every pattern is anchored at both ends and exposes the named groups
    /// `date`, `time`, `author`, `body` and, where the shape allows it,
    /// `meridiem`.
    pub fn pattern(self) -> &'static str {
        match self {
            HeaderPattern::SlashWithMeridiem => {
                r"^(?P<date>\d{1,2}/\d{1,2}/\d{2,4}),?\s*(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\s*(?P<meridiem>[APap][Mm])?\s*-\s*(?P<author>[^:]+):\s*(?P<body>.*)$"
            }
            HeaderPattern::Slash24Hour => {
                r"^(?P<date>\d{1,2}/\d{1,2}/\d{2,4}),?\s*(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\s*-\s*(?P<author>[^:]+):\s*(?P<body>.*)$"
            }
            HeaderPattern::Iso => {
                r"^(?P<date>\d{4}-\d{1,2}-\d{1,2}),?\s*(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\s*(?P<meridiem>[APap][Mm])?\s*-\s*(?P<author>[^:]+):\s*(?P<body>.*)$"
            }
            HeaderPattern::Bracketed => {
                r"^\[(?P<date>\d{1,2}/\d{1,2}/\d{2,4}),?\s*(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\s*(?P<meridiem>[APap][Mm])?\]\s*(?P<author>[^:]+):\s*(?P<body>.*)$"
            }
            HeaderPattern::Dotted => {
                r"^(?P<date>\d{1,2}\.\d{1,2}\.\d{2,4}),?\s*(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\s*-\s*(?P<author>[^:]+):\s*(?P<body>.*)$"
            }
            HeaderPattern::DottedBracketed => {
                r"^\[(?P<date>\d{1,2}\.\d{1,2}\.\d{2,4}),?\s*(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\]\s*(?P<author>[^:]+):\s*(?P<body>.*)$"
            }
        }
    }

    /// Returns all shapes in the order they are tried.
    pub fn all() -> &'static [HeaderPattern] {
        &[
            HeaderPattern::SlashWithMeridiem,
            HeaderPattern::Slash24Hour,
            HeaderPattern::Iso,
            HeaderPattern::Bracketed,
            HeaderPattern::Dotted,
            HeaderPattern::DottedBracketed,
        ]
    }
}

/// A compiled header shape.
struct HeaderMatcher {
    pattern: HeaderPattern,
    regex: Regex,
}

impl HeaderMatcher {
    fn new(pattern: HeaderPattern) -> Self {
        Self {
            pattern,
            regex: Regex::new(pattern.pattern()).expect("header patterns are valid regexes"),
        }
    }

    fn try_match<'a>(&self, line: &'a str) -> Option<HeaderMatch<'a>> {
        self.regex
            .captures(line)
            .map(|caps| HeaderMatch::from_captures(self.pattern, &caps))
    }
}

static MATCHERS: LazyLock<Vec<HeaderMatcher>> = LazyLock::new(|| {
    HeaderPattern::all()
        .iter()
        .map(|&pattern| HeaderMatcher::new(pattern))
        .collect()
});

/// The pieces of a recognized header line, borrowed from the line itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Which shape matched.
    pub pattern: HeaderPattern,
    /// Raw date token, e.g. `1/15/2024`.
    pub date: &'a str,
    /// Raw time token without meridiem, e.g. `10:30`.
    pub time: &'a str,
    /// `AM`/`PM` marker as written, if any.
    pub meridiem: Option<&'a str>,
    /// Author, trimmed. May be empty for malformed lines like `- : text`.
    pub author: &'a str,
    /// Text after `Author:`, trimmed.
    pub body: &'a str,
}

impl<'a> HeaderMatch<'a> {
    fn from_captures(pattern: HeaderPattern, caps: &Captures<'a>) -> Self {
        let group = |name: &str| caps.name(name).map(|m| m.as_str());
        Self {
            pattern,
            date: group("date").unwrap_or_default().trim(),
            time: group("time").unwrap_or_default().trim(),
            meridiem: group("meridiem"),
            author: group("author").unwrap_or_default().trim(),
            body: group("body").unwrap_or_default().trim(),
        }
    }

    /// Time token with the meridiem folded in, e.g. `10:30 PM`.
    pub fn time_with_meridiem(&self) -> String {
        match self.meridiem {
            Some(m) => format!("{} {}", self.time, m.to_ascii_uppercase()),
            None => self.time.to_owned(),
        }
    }
}

/// Classification of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// The line opens a new message.
    Header(HeaderMatch<'a>),
    /// The line belongs to whatever message is currently open.
    Continuation,
}

impl LineKind<'_> {
    /// Returns `true` for [`LineKind::Header`].
    pub fn is_header(&self) -> bool {
        matches!(self, LineKind::Header(_))
    }
}

/// Trims whitespace and the left-to-right marks some exports put around headers.
pub fn clean_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{200E}')
}

/// Classifies an already cleaned, non-empty line.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::header::{classify_line, LineKind};
///
/// match classify_line("1/15/2024, 10:30 AM - Alice: Hey everyone!") {
///     LineKind::Header(h) => {
///         assert_eq!(h.author, "Alice");
///         assert_eq!(h.body, "Hey everyone!");
///     }
///     LineKind::Continuation => unreachable!(),
/// }
///
/// assert_eq!(classify_line("see you there"), LineKind::Continuation);
/// ```
pub fn classify_line(line: &str) -> LineKind<'_> {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher.try_match(line))
        .map_or(LineKind::Continuation, LineKind::Header)
}
