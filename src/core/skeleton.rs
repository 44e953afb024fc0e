use std::collections::HashSet;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Weekday};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::date_key::{DateKey, DateKeyFormat};
use crate::error::{ChartError, ChartResult};

/// Calendar step used to lay out the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "weekday", rename_all = "snake_case")]
pub enum Granularity {
    /// Every calendar day.
    #[default]
    Day,
    /// Monday to Friday.
    Weekday,
    /// One fixed day of every week.
    WeeklyOnDay(Weekday),
    /// One slot per month, pinned to the last day of the month.
    Month,
    Hour,
    Minute,
    Second,
}

impl Granularity {
    #[must_use]
    pub const fn friday() -> Self {
        Self::WeeklyOnDay(Weekday::Fri)
    }

    #[must_use]
    pub const fn sunday() -> Self {
        Self::WeeklyOnDay(Weekday::Sun)
    }

    /// `true` for hour, minute and second steps.
    #[must_use]
    pub const fn has_time(self) -> bool {
        matches!(self, Self::Hour | Self::Minute | Self::Second)
    }

    /// Key layout this granularity emits for the given separator preference.
    #[must_use]
    pub const fn key_format(self, long: bool) -> DateKeyFormat {
        DateKeyFormat::select(self.has_time(), long)
    }

    /// Inclusion predicate for a candidate date.
    #[must_use]
    pub fn includes(self, date: NaiveDate) -> bool {
        match self {
            Self::Day | Self::Hour | Self::Minute | Self::Second => true,
            Self::Weekday => date.weekday().number_from_monday() <= 5,
            Self::WeeklyOnDay(weekday) => date.weekday() == weekday,
            Self::Month => last_day_of_month(date) == Some(date),
        }
    }

    fn sub_day_step(self) -> Option<Duration> {
        match self {
            Self::Hour => Some(Duration::hours(1)),
            Self::Minute => Some(Duration::minutes(1)),
            Self::Second => Some(Duration::seconds(1)),
            _ => None,
        }
    }
}

/// Ordered, gap-free sequence of axis slots shared by every line of a chart.
///
/// All keys share one [`DateKeyFormat`] and are strictly increasing, so slot
/// lookups can binary search on the key text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<DateKey>", into = "Vec<DateKey>")]
pub struct Skeleton {
    keys: Vec<DateKey>,
}

impl Skeleton {
    /// Validates an externally supplied key sequence.
    pub fn from_keys(keys: Vec<DateKey>) -> ChartResult<Self> {
        if let Some(first) = keys.first() {
            let expected = first.format();
            for (index, pair) in keys.windows(2).enumerate() {
                let found = pair[1].format();
                if found != expected {
                    return Err(ChartError::MixedDateFormats { expected, found });
                }
                if pair[0] >= pair[1] {
                    return Err(ChartError::UnsortedSeries { index: index + 1 });
                }
            }
        }
        Ok(Self { keys })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn keys(&self) -> &[DateKey] {
        &self.keys
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DateKey> {
        self.keys.get(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&DateKey> {
        self.keys.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&DateKey> {
        self.keys.last()
    }

    /// Layout shared by all keys, `None` for an empty skeleton.
    #[must_use]
    pub fn format(&self) -> Option<DateKeyFormat> {
        self.keys.first().map(DateKey::format)
    }

    /// Exact slot index of `key`.
    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.binary_search_by(|candidate| candidate.as_str().cmp(key)).ok()
    }

    /// Index of the first slot whose key is `>= key`; `len()` when none is.
    #[must_use]
    pub fn lower_bound(&self, key: &str) -> usize {
        self.keys.partition_point(|candidate| candidate.as_str() < key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DateKey> {
        self.keys.iter()
    }
}

impl TryFrom<Vec<DateKey>> for Skeleton {
    type Error = ChartError;

    fn try_from(keys: Vec<DateKey>) -> Result<Self, Self::Error> {
        Self::from_keys(keys)
    }
}

impl From<Skeleton> for Vec<DateKey> {
    fn from(skeleton: Skeleton) -> Self {
        skeleton.keys
    }
}

impl<'a> IntoIterator for &'a Skeleton {
    type Item = &'a DateKey;
    type IntoIter = std::slice::Iter<'a, DateKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

/// Builds the calendar skeleton for one `(granularity, layout)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateSkeletonBuilder {
    granularity: Granularity,
    long_format: bool,
}

impl DateSkeletonBuilder {
    #[must_use]
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            long_format: false,
        }
    }

    /// Emits separator-containing keys (`YYYY-MM-DD[ HH:MM:SS]`).
    #[must_use]
    pub fn with_long_format(mut self, long_format: bool) -> Self {
        self.long_format = long_format;
        self
    }

    #[must_use]
    pub fn granularity(self) -> Granularity {
        self.granularity
    }

    #[must_use]
    pub fn key_format(self) -> DateKeyFormat {
        self.granularity.key_format(self.long_format)
    }

    /// Emits every slot from `start` through `stop` (inclusive) that matches the
    /// granularity and is not blocked.
    ///
    /// A block entry removes the slot at exactly its instant, whatever its key
    /// layout. Date-only entries stand for midnight: they remove the day slot
    /// of a date granularity but only the midnight slot of an hour, minute or
    /// second granularity. Never fails: an inverted range, or hourly steps
    /// starting before 1970, yield an empty skeleton.
    #[must_use]
    pub fn build(
        self,
        start: NaiveDateTime,
        stop: NaiveDateTime,
        block_list: &IndexSet<DateKey>,
    ) -> Skeleton {
        if start > stop {
            return Skeleton::default();
        }
        if self.granularity == Granularity::Hour && start.year() < 1970 {
            debug!(start = %start, "hourly skeleton before 1970 is empty");
            return Skeleton::default();
        }

        let blocked: HashSet<NaiveDateTime> = block_list.iter().map(DateKey::datetime).collect();
        let format = self.key_format();
        let mut keys = Vec::new();
        let mut emit = |slot: NaiveDateTime| -> bool {
            if blocked.contains(&slot) {
                return true;
            }
            match DateKey::from_datetime(slot, format) {
                Some(key) => {
                    keys.push(key);
                    true
                }
                None => false,
            }
        };

        match self.granularity.sub_day_step() {
            Some(step) => {
                let mut cursor = start;
                while cursor <= stop {
                    if !emit(cursor) {
                        break;
                    }
                    match cursor.checked_add_signed(step) {
                        Some(next) => cursor = next,
                        None => break,
                    }
                }
            }
            None => {
                let stop_date = stop.date();
                let mut cursor = self.first_date(start.date());
                while let Some(date) = cursor.filter(|date| *date <= stop_date) {
                    if self.granularity.includes(date) {
                        let Some(slot) = date.and_hms_opt(0, 0, 0) else {
                            break;
                        };
                        if !emit(slot) {
                            break;
                        }
                    }
                    cursor = self.next_date(date);
                }
            }
        }

        debug!(
            granularity = ?self.granularity,
            slots = keys.len(),
            blocked = block_list.len(),
            "built date skeleton"
        );
        Skeleton { keys }
    }

    fn first_date(self, start: NaiveDate) -> Option<NaiveDate> {
        match self.granularity {
            Granularity::WeeklyOnDay(weekday) => {
                let ahead = (7 + weekday.num_days_from_monday()
                    - start.weekday().num_days_from_monday())
                    % 7;
                start.checked_add_signed(Duration::days(i64::from(ahead)))
            }
            Granularity::Month => last_day_of_month(start),
            _ => Some(start),
        }
    }

    fn next_date(self, current: NaiveDate) -> Option<NaiveDate> {
        match self.granularity {
            Granularity::WeeklyOnDay(_) => current.checked_add_signed(Duration::days(7)),
            Granularity::Month => current
                .with_day(1)
                .and_then(|first| first.checked_add_months(Months::new(1)))
                .and_then(last_day_of_month),
            _ => current.succ_opt(),
        }
    }
}

/// Last calendar day of the month containing `date`.
#[must_use]
pub fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}
