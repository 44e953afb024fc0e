use std::ops::Range;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{AxisScale, DateKey, LineKind, Point, ViewportState};
use crate::error::{ChartError, ChartResult};

use super::{AxisSide, MAX_AREAS};

pub const CHART_LAYOUT_JSON_SCHEMA_V1: u32 = 1;

/// Values of one line at one visible skeleton slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedValue {
    /// Index into the line's series.
    pub index: usize,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl AlignedValue {
    #[must_use]
    pub fn from_point(index: usize, point: &Point) -> Self {
        Self {
            index,
            high: point.high,
            low: point.low,
            close: point.close,
        }
    }
}

/// One line aligned against the visible window, slot by slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedLine {
    pub label: String,
    pub kind: LineKind,
    pub side: AxisSide,
    /// One entry per visible slot; `None` where the line has no sample.
    pub values: Vec<Option<AlignedValue>>,
}

impl AlignedLine {
    /// Number of visible slots carrying a sample.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }
}

/// Resolved axes and aligned lines of one display area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaLayout {
    pub height: f64,
    pub left: AxisScale,
    pub right: AxisScale,
    pub lines: Vec<AlignedLine>,
}

impl AreaLayout {
    #[must_use]
    pub fn scale(&self, side: AxisSide) -> &AxisScale {
        match side {
            AxisSide::Left => &self.left,
            AxisSide::Right => &self.right,
        }
    }
}

/// Everything the drawing layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub skeleton_length: usize,
    pub visible: Range<usize>,
    pub viewport_state: ViewportState,
    pub tick_width: u32,
    /// Keys of the visible slots, in order.
    pub slots: Vec<DateKey>,
    pub areas: SmallVec<[AreaLayout; MAX_AREAS]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayoutJsonContractV1 {
    pub schema_version: u32,
    pub layout: ChartLayout,
}

impl ChartLayout {
    /// Slot index within the visible window of the given skeleton index.
    #[must_use]
    pub fn window_offset(&self, skeleton_index: usize) -> Option<usize> {
        self.visible
            .contains(&skeleton_index)
            .then(|| skeleton_index - self.visible.start)
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartLayoutJsonContractV1 {
            schema_version: CHART_LAYOUT_JSON_SCHEMA_V1,
            layout: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize layout contract v1: {e}"))
        })
    }

    pub fn from_json_contract_v1_str(input: &str) -> ChartResult<Self> {
        let payload: ChartLayoutJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse layout json payload: {e}"))
        })?;
        if payload.schema_version != CHART_LAYOUT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported layout schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.layout)
    }
}
