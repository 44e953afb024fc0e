mod area;
mod chart;
mod chart_config;
mod layout;
mod layout_builder;
mod navigation;

pub use area::{AxisSide, ChartArea, ChartLine, MAX_LINES_PER_AREA};
pub use chart::DateChart;
pub use chart_config::{
    DEFAULT_TICK_WIDTH, DateChartConfig, DateRangeOverride, MAX_AREAS, MAX_TICK_WIDTH,
    MIN_TICK_WIDTH, clamp_tick_width,
};
pub use layout::{
    AlignedLine, AlignedValue, AreaLayout, CHART_LAYOUT_JSON_SCHEMA_V1, ChartLayout,
    ChartLayoutJsonContractV1,
};
