use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{AxisScale, DateKey, DateKeyFormat, align_slots};
use crate::error::{ChartError, ChartResult};

use super::{AlignedLine, AlignedValue, AreaLayout, AxisSide, ChartArea, ChartLayout, DateChart};

impl DateChart {
    /// Resolves one frame: skeleton, visible window, aligned values and the
    /// left/right axis scales of every area.
    ///
    /// `pixel_width` is the horizontal space available for slots;
    /// `area_heights` holds one pixel height per display area.
    pub fn layout(&mut self, pixel_width: f64, area_heights: &[f64]) -> ChartResult<ChartLayout> {
        if area_heights.len() != self.areas.len() {
            return Err(ChartError::InvalidData(format!(
                "expected {} area heights, got {}",
                self.areas.len(),
                area_heights.len()
            )));
        }

        self.refresh_skeleton();
        let tick_width = self.config.tick_width;
        self.viewport.recompute(self.skeleton.len(), pixel_width, tick_width);
        let visible = self.viewport.visible_range();
        let slots = &self.skeleton.keys()[visible.clone()];
        let format = self.config.key_format();

        let mut areas = SmallVec::new();
        for (area, height) in self.areas.iter_mut().zip(area_heights.iter().copied()) {
            areas.push(layout_area(area, slots, format, height)?);
        }

        debug!(
            skeleton_length = self.skeleton.len(),
            start = visible.start,
            visible = visible.len(),
            areas = areas.len(),
            "layout resolved"
        );
        Ok(ChartLayout {
            skeleton_length: self.skeleton.len(),
            visible,
            viewport_state: self.viewport.state(),
            tick_width,
            slots: slots.to_vec(),
            areas,
        })
    }
}

fn layout_area(
    area: &mut ChartArea,
    slots: &[DateKey],
    format: DateKeyFormat,
    height: f64,
) -> ChartResult<AreaLayout> {
    let mut left = area.empty_scale(AxisSide::Left);
    let mut right = area.empty_scale(AxisSide::Right);
    let mut lines = Vec::with_capacity(area.lines.len());

    for line in area.lines.iter_mut().filter(|line| line.is_visible()) {
        let (label, kind, side) = (line.label().to_owned(), line.kind(), line.side());
        let series = line.series_in(format)?;
        let points = series.points();
        let values: Vec<Option<AlignedValue>> = align_slots(slots, points)
            .into_iter()
            .map(|found| found.map(|index| AlignedValue::from_point(index, &points[index])))
            .collect();

        let scale = match side {
            AxisSide::Left => &mut left,
            AxisSide::Right => &mut right,
        };
        for value in values.iter().flatten() {
            if kind.has_high_low() {
                scale.extend(value.high);
                scale.extend(value.low);
            }
            scale.extend(value.close);
        }

        lines.push(AlignedLine {
            label,
            kind,
            side,
            values,
        });
    }

    resolve_scale(&mut left, height, AxisSide::Left);
    resolve_scale(&mut right, height, AxisSide::Right);
    Ok(AreaLayout {
        height,
        left,
        right,
        lines,
    })
}

fn resolve_scale(scale: &mut AxisScale, height: f64, side: AxisSide) {
    let (raw_min, raw_max, had_data) = (scale.min(), scale.max(), scale.has_data());
    scale.calc(height);
    if had_data && !scale.is_resolved() {
        trace!(?side, raw_min, raw_max, height, "axis left unresolved");
    }
}
