//! The parsed message record.
//!
//! A [`Message`] is what the parser hands to analytics: a timestamp, an
//! author and a single-line body, plus a few fields derived from them once
//! so every consumer sees the same values.
//!
//! # Examples
//!
//! ```
//! use chatlens::Message;
//! use chrono::{TimeZone, Utc, Weekday};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
//! let msg = Message::new(ts, "Alice", "Hey everyone! 😀");
//!
//! assert_eq!(msg.hour, 10);
//! assert_eq!(msg.weekday, Weekday::Mon);
//! assert_eq!(msg.weekday_name(), "Monday");
//! assert_eq!(msg.length, 15);
//! assert_eq!(msg.normalized_body, "hey everyone! :grinning_face:");
//! ```

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::parsing::normalize::normalize_text;

/// One reconstructed chat message.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `DateTime<Utc>` | Wall-clock send time as written in the export |
/// | `author` | `String` | Display name or phone number |
/// | `body` | `String` | Message text, continuation lines joined by single spaces |
/// | `date` | `NaiveDate` | Calendar day of `timestamp` |
/// | `hour` | `u32` | Hour of day, 0-23 |
/// | `weekday` | `Weekday` | Day of week |
/// | `length` | `usize` | Character count of `body` |
/// | `normalized_body` | `String` | Lowercased, emoji-expanded, URL/mention-free text |
///
/// Values are immutable records once returned; build new ones with
/// [`Message::new`] so the derived fields stay consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,

    /// Who sent it.
    pub author: String,

    /// Message text. Never contains a line break.
    pub body: String,

    /// Calendar day of `timestamp`.
    pub date: NaiveDate,

    /// Hour of `timestamp` (0-23).
    pub hour: u32,

    /// Day of week of `timestamp`.
    pub weekday: Weekday,

    /// Number of characters in `body`.
    pub length: usize,

    /// `body` prepared for text analytics, see [`normalize_text`].
    pub normalized_body: String,
}

impl Message {
    /// Creates a message and computes its derived fields.
    pub fn new(
        timestamp: DateTime<Utc>,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let body = body.into();
        Self {
            date: timestamp.date_naive(),
            hour: timestamp.hour(),
            weekday: timestamp.weekday(),
            length: body.chars().count(),
            normalized_body: normalize_text(&body),
            timestamp,
            author: author.into(),
            body,
        }
    }

    /// Returns the author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the message text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the full English weekday name, e.g. `"Monday"`.
    pub fn weekday_name(&self) -> &'static str {
        match self.weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}
