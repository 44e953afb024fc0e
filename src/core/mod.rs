pub mod axis_scale;
pub mod date_key;
pub mod decimals;
pub mod line_kind;
pub mod primitives;
pub mod series;
pub mod skeleton;
pub mod viewport;

pub use axis_scale::{AxisScale, FLAT_RANGE_EPSILON};
pub use date_key::{DateKey, DateKeyFormat};
pub use decimals::{MAX_SUPPORTED_MAGNITUDE, decimals_for, max_decimals_for};
pub use line_kind::LineKind;
pub use series::{Point, Series, align_slots, date_range_of, find_aligned_index};
pub use skeleton::{DateSkeletonBuilder, Granularity, Skeleton, last_day_of_month};
pub use viewport::{Viewport, ViewportState, clamp_start, visible_slot_capacity};
