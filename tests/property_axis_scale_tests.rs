use chart_axis_engine::core::AxisScale;
use proptest::prelude::*;

fn finite_f64() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
}

proptest! {
    #[test]
    fn resolved_bounds_contain_the_data(
        low in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        pixels in 1.0f64..4_000.0
    ) {
        let high = low + span;
        let scale = AxisScale::compute(low, high, pixels);

        prop_assert!(scale.is_resolved());
        prop_assert!(scale.min() <= low);
        prop_assert!(scale.max() >= high);
        prop_assert!(scale.tick() > 0.0);
        prop_assert!(scale.pixel() > 0.0);
    }

    #[test]
    fn bounds_contain_any_finite_range(
        a in finite_f64(),
        b in finite_f64(),
        pixels in 1.0f64..4_000.0
    ) {
        prop_assume!(a != b);
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let scale = AxisScale::compute(low, high, pixels);

        prop_assert!(scale.is_resolved(), "{low}..{high} left unresolved");
        prop_assert!(scale.min() <= low);
        prop_assert!(scale.max() >= high);
        prop_assert!(scale.min().is_finite() && scale.max().is_finite());
        prop_assert!(scale.tick() > 0.0);
    }

    #[test]
    fn compute_is_deterministic(
        low in -1_000_000.0f64..1_000_000.0,
        span in 0.0f64..1_000_000.0,
        pixels in 0.0f64..4_000.0
    ) {
        let first = AxisScale::compute(low, low + span, pixels);
        let second = AxisScale::compute(low, low + span, pixels);
        prop_assert_eq!(first, second);
    }

    // The tick-count target is a heuristic; only a loose band is asserted.
    #[test]
    fn tick_count_stays_in_a_readable_band(
        low in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0
    ) {
        let scale = AxisScale::compute(low, low + span, 400.0);
        let ticks = (scale.max() - scale.min()) / scale.tick();

        prop_assert!(ticks >= 1.0, "too few ticks: {ticks}");
        prop_assert!(ticks <= 50.0, "too many ticks: {ticks}");
    }

    #[test]
    fn single_values_away_from_zero_resolve(value in prop_oneof![-1e6f64..-1e-3, 1e-3f64..1e6]) {
        let scale = AxisScale::compute(value, value, 300.0);

        prop_assert!(scale.is_resolved());
        prop_assert!(scale.min() <= value);
        prop_assert!(scale.max() >= value);
    }
}
