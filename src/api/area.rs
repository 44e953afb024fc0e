use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AxisScale, DateKeyFormat, LineKind, Series};
use crate::error::{ChartError, ChartResult};

/// Upper bound on lines sharing one display area.
pub const MAX_LINES_PER_AREA: usize = 10;

/// Value axis a line is scaled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    #[default]
    Left,
    Right,
}

/// One visual line: a label, a drawing kind, an axis side and its data.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    label: String,
    kind: LineKind,
    side: AxisSide,
    visible: bool,
    series: Series,
    rekeyed: Option<Series>,
}

impl ChartLine {
    #[must_use]
    pub fn new(label: impl Into<String>, series: Series) -> Self {
        Self {
            label: label.into(),
            kind: LineKind::default(),
            side: AxisSide::default(),
            visible: true,
            series,
            rekeyed: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: LineKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_side(mut self, side: AxisSide) -> Self {
        self.side = side;
        self
    }

    /// Hidden lines keep their data but are skipped by alignment and autoscale.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    #[must_use]
    pub fn side(&self) -> AxisSide {
        self.side
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn series(&self) -> &Series {
        &self.series
    }

    /// The series keyed in `format`, re-keying (and caching) when the stored
    /// layout differs.
    pub(super) fn series_in(&mut self, format: DateKeyFormat) -> ChartResult<&Series> {
        if self.series.format().is_none_or(|current| current == format) {
            return Ok(&self.series);
        }

        let cached = self
            .rekeyed
            .as_ref()
            .is_some_and(|series| series.format() == Some(format));
        if !cached {
            trace!(label = %self.label, ?format, "re-keying line series");
            self.rekeyed = Some(self.series.reformatted(format)?);
        }
        Ok(self.rekeyed.as_ref().unwrap_or(&self.series))
    }
}

/// A stacked display region with independent left and right value axes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartArea {
    pub(super) lines: Vec<ChartLine>,
    pub(super) left_clamp: (Option<f64>, Option<f64>),
    pub(super) right_clamp: (Option<f64>, Option<f64>),
}

impl ChartArea {
    #[must_use]
    pub fn lines(&self) -> &[ChartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&ChartLine> {
        self.lines.get(index)
    }

    #[must_use]
    pub fn clamp(&self, side: AxisSide) -> (Option<f64>, Option<f64>) {
        match side {
            AxisSide::Left => self.left_clamp,
            AxisSide::Right => self.right_clamp,
        }
    }

    pub(super) fn push_line(&mut self, line: ChartLine) -> ChartResult<usize> {
        if self.lines.len() >= MAX_LINES_PER_AREA {
            return Err(ChartError::InvalidData(format!(
                "display area already holds {MAX_LINES_PER_AREA} lines"
            )));
        }
        self.lines.push(line);
        Ok(self.lines.len() - 1)
    }

    pub(super) fn set_clamp(
        &mut self,
        side: AxisSide,
        clamp_min: Option<f64>,
        clamp_max: Option<f64>,
    ) {
        let clamp = (
            clamp_min.filter(|value| value.is_finite()),
            clamp_max.filter(|value| value.is_finite()),
        );
        match side {
            AxisSide::Left => self.left_clamp = clamp,
            AxisSide::Right => self.right_clamp = clamp,
        }
    }

    /// Fresh, unresolved scale for `side` carrying this area's clamps.
    pub(super) fn empty_scale(&self, side: AxisSide) -> AxisScale {
        let (clamp_min, clamp_max) = self.clamp(side);
        let mut scale = AxisScale::empty();
        scale.set_clamp(clamp_min, clamp_max);
        scale
    }
}
