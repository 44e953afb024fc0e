/// Largest magnitude the decimal ladder accepts (`i64::MAX` as `f64`).
pub const MAX_SUPPORTED_MAGNITUDE: f64 = 9_223_372_036_854_775_807.0;

/// Fixed-width formatting ladder: `(exclusive upper magnitude, precision)`.
///
/// Larger numbers leave fewer characters for the fractional part, so the
/// precision shrinks as the magnitude grows.
const PRECISION_LADDER: [(f64, usize); 9] = [
    (10.0, 9),
    (100.0, 8),
    (1_000.0, 7),
    (10_000.0, 6),
    (100_000.0, 5),
    (1_000_000.0, 4),
    (10_000_000.0, 3),
    (100_000_000.0, 2),
    (1_000_000_000.0, 1),
];

/// Returns the formatting precision used for a value of the given magnitude.
///
/// Non-increasing in `|value|`; `0` for anything at or above one billion and
/// for non-finite input.
#[must_use]
pub fn max_decimals_for(value: f64) -> usize {
    let magnitude = value.abs();
    if !magnitude.is_finite() {
        return 0;
    }

    PRECISION_LADDER
        .iter()
        .find(|(limit, _)| magnitude < *limit)
        .map_or(0, |(_, precision)| *precision)
}

/// Number of fractional digits needed to display `value` without trailing noise.
///
/// The value is formatted with the ladder precision for its magnitude and
/// trailing zeros are stripped, so `0.1 + 0.2` yields `1` rather than `17`.
/// The sign is ignored. Zero, non-finite and out-of-range magnitudes yield `0`.
#[must_use]
pub fn decimals_for(value: f64) -> usize {
    let magnitude = value.abs();
    if !magnitude.is_finite() || magnitude == 0.0 || magnitude > MAX_SUPPORTED_MAGNITUDE {
        return 0;
    }

    let precision = max_decimals_for(magnitude);
    if precision == 0 {
        return 0;
    }

    let formatted = format!("{magnitude:.precision$}");
    formatted
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.trim_end_matches('0').len())
}
