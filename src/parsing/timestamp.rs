//! Turning raw date and time tokens into a timestamp.
//!
//! Exports write dates in whatever the phone's locale was, with no marker
//! saying which. Layouts are tried in a fixed order and the first one that
//! parses wins, so `03/04/2024` is always the 3rd of April. That is a guess,
//! but a reproducible one.
//!
//! Neither step fails: an unparseable time becomes midnight and an
//! unparseable date becomes the caller-supplied fallback. Exports carry no
//! time zone, so the wall-clock value is stored as UTC.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Where the year sits in a date token and how many digits it must have.
#[derive(Clone, Copy)]
enum YearField {
    Leading4,
    Trailing4,
    Trailing2,
}

/// One accepted date layout.
struct DateLayout {
    format: &'static str,
    year: YearField,
}

impl DateLayout {
    const fn new(format: &'static str, year: YearField) -> Self {
        Self { format, year }
    }

    /// chrono happily reads `24` as the year 24 AD under `%Y`, so the year
    /// field width is checked before parsing.
    fn year_width_matches(&self, token: &str) -> bool {
        let (field, digits) = match self.year {
            YearField::Leading4 => (token.split(DATE_SEPARATORS).next(), 4),
            YearField::Trailing4 => (token.rsplit(DATE_SEPARATORS).next(), 4),
            YearField::Trailing2 => (token.rsplit(DATE_SEPARATORS).next(), 2),
        };
        field.is_some_and(|f| f.len() == digits)
    }

    fn parse(&self, token: &str) -> Option<NaiveDate> {
        if !self.year_width_matches(token) {
            return None;
        }
        NaiveDate::parse_from_str(token, self.format).ok()
    }
}

const DATE_LAYOUTS: &[DateLayout] = &[
    DateLayout::new("%d/%m/%Y", YearField::Trailing4),
    DateLayout::new("%m/%d/%Y", YearField::Trailing4),
    DateLayout::new("%d/%m/%y", YearField::Trailing2),
    DateLayout::new("%m/%d/%y", YearField::Trailing2),
    DateLayout::new("%Y-%m-%d", YearField::Leading4),
    DateLayout::new("%Y-%d-%m", YearField::Leading4),
    DateLayout::new("%d.%m.%Y", YearField::Trailing4),
    DateLayout::new("%d.%m.%y", YearField::Trailing2),
];

const TIME_LAYOUTS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

const DATE_SEPARATORS: &[char] = &['/', '-', '.'];

/// Parses a date token with the first matching layout.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::timestamp::parse_date;
/// use chrono::NaiveDate;
///
/// // Day-first is tried before month-first.
/// assert_eq!(parse_date("03/04/2024"), NaiveDate::from_ymd_opt(2024, 4, 3));
/// // Falls through to month-first when day-first is impossible.
/// assert_eq!(parse_date("1/15/2024"), NaiveDate::from_ymd_opt(2024, 1, 15));
/// assert_eq!(parse_date("not a date"), None);
/// ```
pub fn parse_date(token: &str) -> Option<NaiveDate> {
    let token = token.trim();
    DATE_LAYOUTS.iter().find_map(|layout| layout.parse(token))
}

/// Parses a time token (meridiem already folded in) with the first matching layout.
pub fn parse_time(token: &str) -> Option<NaiveTime> {
    let token = token.trim();
    TIME_LAYOUTS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(token, format).ok())
}

/// Result of normalizing one header's date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedTimestamp {
    /// `None` only when the date failed and no fallback date was given.
    pub timestamp: Option<DateTime<Utc>>,
    /// The date token matched no layout.
    pub date_fallback: bool,
    /// The time token matched no layout and midnight was used.
    pub time_fallback: bool,
}

/// Combines a date and a time token into a timestamp.
///
/// `fallback_date` is used when the date token matches no layout; pass
/// `None` to leave the timestamp unset instead.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::timestamp::normalize_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let ts = normalize_timestamp("1/16/2024", "2:00 PM", None);
/// assert_eq!(ts.timestamp, Some(Utc.with_ymd_and_hms(2024, 1, 16, 14, 0, 0).unwrap()));
/// assert!(!ts.date_fallback && !ts.time_fallback);
/// ```
pub fn normalize_timestamp(
    date_token: &str,
    time_token: &str,
    fallback_date: Option<NaiveDate>,
) -> NormalizedTimestamp {
    let date = parse_date(date_token);
    if date.is_none() {
        tracing::debug!(date = date_token, "unparseable date token, using fallback");
    }

    let time = parse_time(time_token);
    if time.is_none() {
        tracing::debug!(time = time_token, "unparseable time token, using midnight");
    }

    let timestamp = date
        .or(fallback_date)
        .map(|d| d.and_time(time.unwrap_or_default()).and_utc());

    NormalizedTimestamp {
        timestamp,
        date_fallback: date.is_none(),
        time_fallback: time.is_none(),
    }
}
