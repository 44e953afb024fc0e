use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::date_key::{DateKey, DateKeyFormat};
use crate::core::primitives::{decimal_to_f64, ensure_finite, utc_to_date_key};
use crate::error::{ChartError, ChartResult};

/// One dated sample of a chart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub date: DateKey,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl Point {
    /// Builds a validated point.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    pub fn new(date: DateKey, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        let high = ensure_finite(high, "high")?;
        let low = ensure_finite(low, "low")?;
        let close = ensure_finite(close, "close")?;
        if low > high {
            return Err(ChartError::InvalidData("point low must be <= high".to_owned()));
        }

        Ok(Self {
            date,
            high,
            low,
            close,
            volume: None,
        })
    }

    /// Single-value point (`high == low == close`).
    pub fn value(date: DateKey, value: f64) -> ChartResult<Self> {
        Self::new(date, value, value, value)
    }

    /// Parses the key and builds a single-value point.
    pub fn parse(date: &str, value: f64) -> ChartResult<Self> {
        Self::value(DateKey::parse(date)?, value)
    }

    pub fn from_decimal(
        date: DateKey,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            date,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    /// Converts a UTC timestamp plus decimal prices into a point keyed in `format`.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        format: DateKeyFormat,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::from_decimal(utc_to_date_key(time, format)?, high, low, close)
    }

    pub fn with_volume(mut self, volume: f64) -> ChartResult<Self> {
        self.volume = Some(ensure_finite(volume, "volume")?);
        Ok(self)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        self.date.as_str()
    }
}

/// Date-ordered samples of one chart line.
///
/// Keys are strictly increasing and share one [`DateKeyFormat`]. A series is
/// never edited in place; updates replace it wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Series {
    points: Vec<Point>,
}

impl Series {
    /// Validates already ordered points.
    pub fn new(points: Vec<Point>) -> ChartResult<Self> {
        validate_points(&points)?;
        Ok(Self { points })
    }

    /// Sorts by key and drops duplicate keys, keeping the last occurrence.
    ///
    /// Mixed key layouts cannot be ordered by text and are still rejected.
    pub fn canonicalize(points: Vec<Point>) -> ChartResult<Self> {
        if let Some(first) = points.first() {
            let expected = first.date.format();
            if let Some(point) = points.iter().find(|point| point.date.format() != expected) {
                return Err(ChartError::MixedDateFormats {
                    expected,
                    found: point.date.format(),
                });
            }
        }

        Ok(Self {
            points: sort_dedup_last_wins(points),
        })
    }

    /// Re-keys every point in `format`, merging points that collapse onto the
    /// same key (last one wins).
    pub fn reformatted(&self, format: DateKeyFormat) -> ChartResult<Self> {
        if self.format().is_none_or(|current| current == format) {
            return Ok(self.clone());
        }

        let mut points = Vec::with_capacity(self.points.len());
        for point in &self.points {
            let date = point
                .date
                .reformat(format)
                .ok_or_else(|| ChartError::InvalidDateKey(point.date.to_string()))?;
            points.push(Point {
                date,
                ..point.clone()
            });
        }
        Ok(Self {
            points: sort_dedup_last_wins(points),
        })
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn format(&self) -> Option<DateKeyFormat> {
        self.points.first().map(|point| point.date.format())
    }

    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Point stored under exactly `key`.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Point> {
        find_aligned_index(&self.points, key).map(|index| &self.points[index])
    }
}

impl TryFrom<Vec<Point>> for Series {
    type Error = ChartError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<Series> for Vec<Point> {
    fn from(series: Series) -> Self {
        series.points
    }
}

/// Binary-searches `series` for the point keyed exactly `key`.
///
/// `series` must be strictly increasing by key. That is asserted in debug
/// builds only; release builds return an unspecified answer for unsorted input.
/// A missing key is the normal case for sparse lines and returns `None`.
#[must_use]
pub fn find_aligned_index(series: &[Point], key: &str) -> Option<usize> {
    debug_assert!(
        is_strictly_increasing(series),
        "aligned series must be sorted and duplicate-free"
    );
    series
        .binary_search_by(|point| point.key().cmp(key))
        .ok()
}

/// Aligns every slot key against `series`, one lookup per slot.
#[must_use]
pub fn align_slots(slots: &[DateKey], series: &[Point]) -> Vec<Option<usize>> {
    slots
        .iter()
        .map(|slot| find_aligned_index(series, slot.as_str()))
        .collect()
}

/// Earliest and latest instant across all non-empty series.
#[must_use]
pub fn date_range_of<'a, I>(series: I) -> Option<(NaiveDateTime, NaiveDateTime)>
where
    I: IntoIterator<Item = &'a Series>,
{
    series
        .into_iter()
        .filter_map(|series| Some((series.first()?.date.datetime(), series.last()?.date.datetime())))
        .reduce(|(start, stop), (first, last)| (start.min(first), stop.max(last)))
}

fn is_strictly_increasing(points: &[Point]) -> bool {
    points.windows(2).all(|pair| pair[0].key() < pair[1].key())
}

fn validate_points(points: &[Point]) -> ChartResult<()> {
    let Some(first) = points.first() else {
        return Ok(());
    };
    let expected = first.date.format();
    for (index, pair) in points.windows(2).enumerate() {
        let found = pair[1].date.format();
        if found != expected {
            return Err(ChartError::MixedDateFormats { expected, found });
        }
        if pair[0].key() >= pair[1].key() {
            return Err(ChartError::UnsortedSeries { index: index + 1 });
        }
    }
    Ok(())
}

fn sort_dedup_last_wins(mut points: Vec<Point>) -> Vec<Point> {
    // Stable sort keeps insertion order among equal keys, so the last
    // occurrence of a key is the last element of its run.
    points.sort_by(|left, right| left.key().cmp(right.key()));
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for point in points {
        match out.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => out.push(point),
        }
    }
    out
}
