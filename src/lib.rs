//! chart-axis-engine: date skeleton, viewport windowing and nice-number axis
//! autoscaling for date-keyed financial charts.
//!
//! `core` holds the pure, deterministic building blocks; `api` wires them into
//! a chart model that produces one drawable layout per frame. Drawing, input
//! handling and persistence are left to the host application.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{ChartLayout, DateChart, DateChartConfig};
pub use error::{ChartError, ChartResult};
