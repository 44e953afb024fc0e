use chrono::NaiveDateTime;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::{DateKey, DateKeyFormat, Granularity};
use crate::error::{ChartError, ChartResult};

pub const MIN_TICK_WIDTH: u32 = 3;
pub const MAX_TICK_WIDTH: u32 = 100;
pub const DEFAULT_TICK_WIDTH: u32 = 6;

/// Upper bound on display areas stacked in one chart.
pub const MAX_AREAS: usize = 3;

/// Explicit skeleton bounds, overriding the union range of all lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeOverride {
    pub start: DateKey,
    pub stop: DateKey,
}

impl DateRangeOverride {
    pub fn new(start: DateKey, stop: DateKey) -> ChartResult<Self> {
        if start.datetime() > stop.datetime() {
            return Err(ChartError::InvalidData(format!(
                "date range start {start} is after stop {stop}"
            )));
        }
        Ok(Self { start, stop })
    }

    pub fn parse(start: &str, stop: &str) -> ChartResult<Self> {
        Self::new(DateKey::parse(start)?, DateKey::parse(stop)?)
    }

    #[must_use]
    pub fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.start.datetime(), self.stop.datetime())
    }
}

/// Chart bootstrap configuration.
///
/// Serializable so host applications can persist the
/// `(date range, granularity, block list)` setup next to their series data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateChartConfig {
    #[serde(default)]
    pub granularity: Granularity,
    /// Emit `YYYY-MM-DD[ HH:MM:SS]` keys instead of `YYYYMMDD[ HHMMSS]`.
    #[serde(default)]
    pub long_date_format: bool,
    #[serde(default = "default_tick_width")]
    pub tick_width: u32,
    #[serde(default)]
    pub block_list: IndexSet<DateKey>,
    #[serde(default)]
    pub date_range: Option<DateRangeOverride>,
    #[serde(default = "default_area_count")]
    pub area_count: usize,
}

impl Default for DateChartConfig {
    fn default() -> Self {
        Self::new(Granularity::Day)
    }
}

impl DateChartConfig {
    #[must_use]
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            long_date_format: false,
            tick_width: default_tick_width(),
            block_list: IndexSet::new(),
            date_range: None,
            area_count: default_area_count(),
        }
    }

    #[must_use]
    pub fn with_long_date_format(mut self, long_date_format: bool) -> Self {
        self.long_date_format = long_date_format;
        self
    }

    /// Sets the slot width in pixels, clamped to `[MIN_TICK_WIDTH, MAX_TICK_WIDTH]`.
    #[must_use]
    pub fn with_tick_width(mut self, tick_width: u32) -> Self {
        self.tick_width = clamp_tick_width(tick_width);
        self
    }

    #[must_use]
    pub fn with_block_list<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = DateKey>,
    {
        self.block_list = keys.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_date_range(mut self, range: DateRangeOverride) -> Self {
        self.date_range = Some(range);
        self
    }

    #[must_use]
    pub fn with_area_count(mut self, area_count: usize) -> Self {
        self.area_count = area_count;
        self
    }

    /// Key layout the skeleton emits under this configuration.
    #[must_use]
    pub fn key_format(&self) -> DateKeyFormat {
        self.granularity.key_format(self.long_date_format)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !(MIN_TICK_WIDTH..=MAX_TICK_WIDTH).contains(&self.tick_width) {
            return Err(ChartError::InvalidData(format!(
                "tick width must be within {MIN_TICK_WIDTH}..={MAX_TICK_WIDTH}, got {}",
                self.tick_width
            )));
        }
        if !(1..=MAX_AREAS).contains(&self.area_count) {
            return Err(ChartError::InvalidData(format!(
                "area count must be within 1..={MAX_AREAS}, got {}",
                self.area_count
            )));
        }
        if let Some(range) = &self.date_range {
            DateRangeOverride::new(range.start.clone(), range.stop.clone())?;
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

#[must_use]
pub fn clamp_tick_width(tick_width: u32) -> u32 {
    tick_width.clamp(MIN_TICK_WIDTH, MAX_TICK_WIDTH)
}

fn default_tick_width() -> u32 {
    DEFAULT_TICK_WIDTH
}

fn default_area_count() -> usize {
    1
}
