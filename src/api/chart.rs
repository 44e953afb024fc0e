use chrono::NaiveDateTime;
use indexmap::IndexSet;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{
    DateKey, DateSkeletonBuilder, Granularity, Series, Skeleton, Viewport, date_range_of,
};
use crate::error::{ChartError, ChartResult};

use super::chart_config::clamp_tick_width;
use super::{AxisSide, ChartArea, ChartLine, DateChartConfig, DateRangeOverride, MAX_AREAS};

/// Inputs that fully determine a skeleton; a rebuild is skipped while unchanged.
#[derive(Debug, Clone, PartialEq)]
struct SkeletonInputs {
    start: NaiveDateTime,
    stop: NaiveDateTime,
    granularity: Granularity,
    long_date_format: bool,
    block_list: IndexSet<DateKey>,
}

/// Date-axis chart model: display areas with lines, one shared skeleton and
/// one horizontal viewport.
///
/// The chart owns no drawing code. Hosts call [`DateChart::layout`] on every
/// resize, scroll or data change and draw from the returned
/// [`super::ChartLayout`].
#[derive(Debug, Clone)]
pub struct DateChart {
    pub(super) config: DateChartConfig,
    pub(super) areas: SmallVec<[ChartArea; MAX_AREAS]>,
    pub(super) viewport: Viewport,
    pub(super) skeleton: Skeleton,
    skeleton_inputs: Option<SkeletonInputs>,
}

impl DateChart {
    pub fn new(config: DateChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let areas = (0..config.area_count).map(|_| ChartArea::default()).collect();
        Ok(Self {
            config,
            areas,
            viewport: Viewport::new(),
            skeleton: Skeleton::default(),
            skeleton_inputs: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &DateChartConfig {
        &self.config
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        debug!(?granularity, "set granularity");
        self.config.granularity = granularity;
    }

    pub fn set_long_date_format(&mut self, long_date_format: bool) {
        self.config.long_date_format = long_date_format;
    }

    /// Sets the slot width in pixels; returns the clamped value actually used.
    pub fn set_tick_width(&mut self, tick_width: u32) -> u32 {
        let clamped = clamp_tick_width(tick_width);
        if clamped != tick_width {
            trace!(requested = tick_width, clamped, "tick width clamped");
        }
        self.config.tick_width = clamped;
        clamped
    }

    pub fn set_block_list<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = DateKey>,
    {
        self.config.block_list = keys.into_iter().collect();
        debug!(blocked = self.config.block_list.len(), "set block list");
    }

    /// Pins the skeleton to explicit bounds; `None` falls back to the union
    /// range of all lines.
    pub fn set_date_range(&mut self, range: Option<DateRangeOverride>) {
        self.config.date_range = range;
    }

    #[must_use]
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    pub fn area(&self, area: usize) -> ChartResult<&ChartArea> {
        self.areas.get(area).ok_or(ChartError::UnknownArea(area))
    }

    fn area_mut(&mut self, area: usize) -> ChartResult<&mut ChartArea> {
        self.areas.get_mut(area).ok_or(ChartError::UnknownArea(area))
    }

    /// Adds a line to `area`; returns its index within the area.
    pub fn add_line(&mut self, area: usize, line: ChartLine) -> ChartResult<usize> {
        let points = line.series().len();
        let label = line.label().to_owned();
        let index = self.area_mut(area)?.push_line(line)?;
        debug!(area, index, %label, points, "add line");
        Ok(index)
    }

    /// Replaces a line's data wholesale, keeping its label, kind and side.
    pub fn set_line_series(&mut self, area: usize, index: usize, series: Series) -> ChartResult<()> {
        let target = self.area_mut(area)?;
        let Some(line) = target.lines.get_mut(index) else {
            return Err(ChartError::InvalidData(format!(
                "area {area} has no line at index {index}"
            )));
        };
        debug!(
            area,
            index,
            previous = line.series().len(),
            points = series.len(),
            "replace line series"
        );
        *line = ChartLine::new(line.label(), series)
            .with_kind(line.kind())
            .with_side(line.side())
            .with_visible(line.is_visible());
        Ok(())
    }

    pub fn remove_line(&mut self, area: usize, index: usize) -> ChartResult<Option<ChartLine>> {
        let target = self.area_mut(area)?;
        if index >= target.lines.len() {
            return Ok(None);
        }
        let removed = target.lines.remove(index);
        debug!(area, index, label = %removed.label(), "remove line");
        Ok(Some(removed))
    }

    /// Removes every line from every area.
    pub fn clear_lines(&mut self) {
        for area in &mut self.areas {
            area.lines.clear();
        }
    }

    /// Forces `side` of `area` to include the given values when autoscaling.
    pub fn set_area_clamp(
        &mut self,
        area: usize,
        side: AxisSide,
        clamp_min: Option<f64>,
        clamp_max: Option<f64>,
    ) -> ChartResult<()> {
        self.area_mut(area)?.set_clamp(side, clamp_min, clamp_max);
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Skeleton produced by the last [`DateChart::refresh_skeleton`] or layout call.
    #[must_use]
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Skeleton bounds: the explicit override, else the union of all lines.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if let Some(range) = &self.config.date_range {
            return Some(range.bounds());
        }
        date_range_of(
            self.areas
                .iter()
                .flat_map(|area| area.lines.iter())
                .map(ChartLine::series),
        )
    }

    /// Rebuilds the skeleton when its inputs changed since the last build.
    pub fn refresh_skeleton(&mut self) -> &Skeleton {
        let Some((start, stop)) = self.date_range() else {
            if !self.skeleton.is_empty() {
                debug!("no dated lines; clearing skeleton");
            }
            self.skeleton = Skeleton::default();
            self.skeleton_inputs = None;
            return &self.skeleton;
        };

        let inputs = SkeletonInputs {
            start,
            stop,
            granularity: self.config.granularity,
            long_date_format: self.config.long_date_format,
            block_list: self.config.block_list.clone(),
        };
        if self.skeleton_inputs.as_ref() == Some(&inputs) {
            trace!(slots = self.skeleton.len(), "skeleton cache hit");
            return &self.skeleton;
        }

        self.skeleton = DateSkeletonBuilder::new(inputs.granularity)
            .with_long_format(inputs.long_date_format)
            .build(inputs.start, inputs.stop, &inputs.block_list);
        self.skeleton_inputs = Some(inputs);
        &self.skeleton
    }
}
