use thiserror::Error;

use crate::core::DateKeyFormat;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid date key: {0:?}")]
    InvalidDateKey(String),

    #[error("series keys must be strictly increasing (violation at index {index})")]
    UnsortedSeries { index: usize },

    #[error("mixed date key formats: expected {expected:?}, found {found:?}")]
    MixedDateFormats {
        expected: DateKeyFormat,
        found: DateKeyFormat,
    },

    #[error("unknown display area: {0}")]
    UnknownArea(usize),
}
