use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Fixed-width textual layout of a date key.
///
/// Keys of one layout compare chronologically when compared as strings,
/// because every field is zero-padded to a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateKeyFormat {
    /// `YYYYMMDD`
    Short8,
    /// `YYYY-MM-DD`
    Long10,
    /// `YYYYMMDD HHMMSS`
    Short15,
    /// `YYYY-MM-DD HH:MM:SS`
    Long19,
}

impl DateKeyFormat {
    /// Picks the layout for a granularity class and separator preference.
    #[must_use]
    pub const fn select(with_time: bool, long: bool) -> Self {
        match (with_time, long) {
            (false, false) => Self::Short8,
            (false, true) => Self::Long10,
            (true, false) => Self::Short15,
            (true, true) => Self::Long19,
        }
    }

    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Short8 => 8,
            Self::Long10 => 10,
            Self::Short15 => 15,
            Self::Long19 => 19,
        }
    }

    #[must_use]
    pub const fn has_time(self) -> bool {
        matches!(self, Self::Short15 | Self::Long19)
    }

    #[must_use]
    pub const fn is_long(self) -> bool {
        matches!(self, Self::Long10 | Self::Long19)
    }

    /// Detects the layout from a key's byte length.
    #[must_use]
    pub const fn from_width(width: usize) -> Option<Self> {
        match width {
            8 => Some(Self::Short8),
            10 => Some(Self::Long10),
            15 => Some(Self::Short15),
            19 => Some(Self::Long19),
            _ => None,
        }
    }

    /// Formats a timestamp in this layout.
    ///
    /// Years outside `0..=9999` do not fit the fixed width and yield `None`.
    #[must_use]
    pub fn format(self, datetime: NaiveDateTime) -> Option<String> {
        let year = datetime.year();
        if !(0..=9999).contains(&year) {
            return None;
        }

        let (month, day) = (datetime.month(), datetime.day());
        let (hour, minute, second) = (datetime.hour(), datetime.minute(), datetime.second());
        Some(match self {
            Self::Short8 => format!("{year:04}{month:02}{day:02}"),
            Self::Long10 => format!("{year:04}-{month:02}-{day:02}"),
            Self::Short15 => {
                format!("{year:04}{month:02}{day:02} {hour:02}{minute:02}{second:02}")
            }
            Self::Long19 => {
                format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")
            }
        })
    }

    /// Byte ranges of year, month, day, hour, minute, second; and the expected
    /// separators as `(offset, byte)` pairs.
    fn layout(self) -> (&'static [(usize, usize)], &'static [(usize, u8)]) {
        match self {
            Self::Short8 => (&[(0, 4), (4, 6), (6, 8)], &[]),
            Self::Long10 => (&[(0, 4), (5, 7), (8, 10)], &[(4, b'-'), (7, b'-')]),
            Self::Short15 => (
                &[(0, 4), (4, 6), (6, 8), (9, 11), (11, 13), (13, 15)],
                &[(8, b' ')],
            ),
            Self::Long19 => (
                &[(0, 4), (5, 7), (8, 10), (11, 13), (14, 16), (17, 19)],
                &[
                    (4, b'-'),
                    (7, b'-'),
                    (10, b' '),
                    (13, b':'),
                    (16, b':'),
                ],
            ),
        }
    }
}

/// Validated fixed-width date key.
///
/// Keeps the parsed timestamp next to the text so callers never have to
/// re-parse, while ordering and equality stay defined on the text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey {
    text: String,
    format: DateKeyFormat,
    datetime: NaiveDateTime,
}

impl DateKey {
    /// Parses one of the four supported layouts.
    pub fn parse(input: &str) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidDateKey(input.to_owned());
        let format = DateKeyFormat::from_width(input.len()).ok_or_else(invalid)?;
        let bytes = input.as_bytes();
        let (fields, separators) = format.layout();

        for (offset, expected) in separators {
            if bytes[*offset] != *expected {
                return Err(invalid());
            }
        }

        let mut values = [0u32; 6];
        for (slot, (start, end)) in values.iter_mut().zip(fields.iter()) {
            let digits = &bytes[*start..*end];
            if !digits.iter().all(u8::is_ascii_digit) {
                return Err(invalid());
            }
            *slot = digits
                .iter()
                .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'));
        }

        let [year, month, day, hour, minute, second] = values;
        let datetime = NaiveDate::from_ymd_opt(year as i32, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(invalid)?;

        Ok(Self {
            text: input.to_owned(),
            format,
            datetime,
        })
    }

    /// Builds a key from a timestamp; `None` when the year does not fit.
    #[must_use]
    pub fn from_datetime(datetime: NaiveDateTime, format: DateKeyFormat) -> Option<Self> {
        let text = format.format(datetime)?;
        let datetime = if format.has_time() {
            datetime.with_nanosecond(0).unwrap_or(datetime)
        } else {
            datetime.date().and_hms_opt(0, 0, 0).unwrap_or(datetime)
        };
        Some(Self {
            text,
            format,
            datetime,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn format(&self) -> DateKeyFormat {
        self.format
    }

    #[must_use]
    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }

    /// Re-renders the same instant in another layout.
    ///
    /// Converting to a date-only layout drops the time of day.
    #[must_use]
    pub fn reformat(&self, format: DateKeyFormat) -> Option<Self> {
        Self::from_datetime(self.datetime, format)
    }
}

impl PartialEq for DateKey {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for DateKey {}

impl PartialOrd for DateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl std::hash::Hash for DateKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for DateKey {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(value: DateKey) -> Self {
        value.text
    }
}

impl Borrow<str> for DateKey {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for DateKey {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
