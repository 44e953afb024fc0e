use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::core::date_key::{DateKey, DateKeyFormat};
use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

pub fn ensure_finite(value: f64, field_name: &str) -> ChartResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::InvalidData(format!("{field_name} must be finite")))
    }
}

/// Renders a UTC timestamp as a date key in the given layout.
pub fn utc_to_date_key(time: DateTime<Utc>, format: DateKeyFormat) -> ChartResult<DateKey> {
    DateKey::from_datetime(time.naive_utc(), format)
        .ok_or_else(|| ChartError::InvalidDateKey(time.to_rfc3339()))
}
