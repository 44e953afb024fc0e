use approx::assert_relative_eq;
use chart_axis_engine::core::AxisScale;

#[test]
fn wide_range_rounds_to_tens() {
    let scale = AxisScale::compute(3.0, 97.0, 500.0);

    assert!(scale.is_resolved());
    assert_eq!(scale.min(), 0.0);
    assert_eq!(scale.max(), 100.0);
    assert_eq!(scale.tick(), 10.0);
    assert_eq!(scale.tick_count(), 10);
    assert_eq!(scale.decimals(), 0);
    assert_relative_eq!(scale.pixel(), 5.0);
}

#[test]
fn zero_width_range_at_zero_is_empty() {
    let scale = AxisScale::compute(0.0, 0.0, 400.0);

    assert!(!scale.is_resolved());
    assert_eq!(scale.tick(), 0.0);
    assert_eq!(scale.pixel(), 0.0);
    assert_eq!(scale, AxisScale::empty());
}

#[test]
fn single_value_range_is_widened() {
    let scale = AxisScale::compute(50.0, 50.0, 200.0);

    assert!(scale.is_resolved());
    assert_relative_eq!(scale.min(), 45.0);
    assert_relative_eq!(scale.max(), 56.0);
    assert_relative_eq!(scale.tick(), 1.0);
    assert!(scale.pixel() > 0.0);
}

#[test]
fn negative_single_value_range_is_widened() {
    let scale = AxisScale::compute(-20.0, -20.0, 200.0);

    assert!(scale.is_resolved());
    assert!(scale.min() < -20.0);
    assert!(scale.max() > -20.0);
}

#[test]
fn negative_range_keeps_bounds_outside_data() {
    let scale = AxisScale::compute(-97.0, -3.0, 500.0);

    assert!(scale.is_resolved());
    assert!(scale.min() <= -97.0);
    assert!(scale.max() >= -3.0);
    assert_eq!(scale.tick(), 10.0);
}

#[test]
fn fractional_range_uses_fractional_tick() {
    let scale = AxisScale::compute(0.0, 1.0, 200.0);

    assert!(scale.min() <= 0.0);
    assert!(scale.max() >= 1.0);
    assert_relative_eq!(scale.tick(), 0.1, max_relative = 1e-9);
    assert_eq!(scale.decimals(), 1);
}

#[test]
fn narrow_range_refines_tick() {
    // 12 units of range -> coarse tick 10 gives 2 steps -> refined to 1.
    let scale = AxisScale::compute(3.0, 15.0, 120.0);

    assert_eq!(scale.min(), 3.0);
    assert_eq!(scale.max(), 15.0);
    assert_eq!(scale.tick(), 1.0);
    assert_relative_eq!(scale.pixel(), 10.0);
}

#[test]
fn inverted_and_non_finite_input_is_empty() {
    assert!(!AxisScale::compute(5.0, 1.0, 100.0).is_resolved());
    assert!(!AxisScale::compute(f64::NAN, 1.0, 100.0).is_resolved());
    assert!(!AxisScale::compute(0.0, f64::INFINITY, 100.0).is_resolved());
    assert!(!AxisScale::compute(0.0, 10.0, f64::NAN).is_resolved());
}

#[test]
fn zero_pixel_length_resolves_bounds_without_pixel_factor() {
    let scale = AxisScale::compute(3.0, 97.0, 0.0);

    assert!(scale.is_resolved());
    assert_eq!(scale.pixel(), 0.0);
    assert_eq!(scale.value_to_pixel(50.0), None);
}

#[test]
fn accumulated_extrema_match_direct_compute() {
    let mut scale = AxisScale::empty();
    assert!(!scale.has_data());
    for value in [40.0, 3.0, f64::NAN, 97.0, 12.0] {
        scale.extend(value);
    }
    assert!(scale.has_data());
    assert_eq!(scale.min(), 3.0);
    assert_eq!(scale.max(), 97.0);

    scale.calc(500.0);
    assert_eq!(scale, AxisScale::compute(3.0, 97.0, 500.0));
}

#[test]
fn clamp_extends_the_raw_range() {
    let mut scale = AxisScale::empty();
    scale.set_clamp(Some(-50.0), None);
    scale.extend(3.0);
    scale.extend(97.0);
    scale.calc(300.0);

    assert_eq!(scale.min(), -50.0);
    assert_eq!(scale.max(), 100.0);
    assert_eq!(scale.tick(), 10.0);
    assert_eq!(scale.clamp(), (Some(-50.0), None));
}

#[test]
fn clamp_without_data_stays_empty() {
    let mut scale = AxisScale::empty();
    scale.set_clamp(Some(0.0), Some(100.0));
    scale.calc(300.0);
    assert!(scale.is_resolved());

    let mut lower_only = AxisScale::empty();
    lower_only.set_clamp(Some(0.0), None);
    lower_only.calc(300.0);
    assert!(!lower_only.is_resolved());
}

#[test]
fn reset_keeps_clamps() {
    let mut scale = AxisScale::empty();
    scale.set_clamp(None, Some(f64::NAN));
    assert_eq!(scale.clamp(), (None, None));

    scale.set_clamp(Some(1.0), Some(2.0));
    scale.extend(10.0);
    scale.calc(100.0);
    scale.reset();

    assert!(!scale.has_data());
    assert!(!scale.is_resolved());
    assert_eq!(scale.clamp(), (Some(1.0), Some(2.0)));
}

#[test]
fn tick_values_and_pixel_mapping_cover_the_axis() {
    let scale = AxisScale::compute(3.0, 97.0, 500.0);
    let ticks = scale.tick_values();

    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks[0], 0.0);
    assert_eq!(ticks[10], 100.0);
    assert_eq!(scale.value_to_pixel(50.0), Some(250.0));
    assert!(AxisScale::empty().tick_values().is_empty());
}

#[test]
fn tiny_ranges_near_zero_resolve() {
    for (low, high) in [(-1e-11, 1e-11), (0.0, 1e-10), (1e-12, 2e-12), (0.0, 5e-324)] {
        let scale = AxisScale::compute(low, high, 400.0);

        assert!(scale.is_resolved(), "{low}..{high} left unresolved");
        assert!(scale.min() <= low);
        assert!(scale.max() >= high);
        assert!(scale.tick() > 0.0);
    }
    assert!(AxisScale::compute(1e-12, 2e-12, 400.0).pixel() > 0.0);
}

#[test]
fn ranges_wider_than_f64_max_resolve() {
    let scale = AxisScale::compute(-1e308, 1e308, 400.0);

    assert!(scale.is_resolved());
    assert!(scale.min() <= -1e308);
    assert!(scale.max() >= 1e308);
    assert!(scale.min().is_finite() && scale.max().is_finite());
    assert!(scale.pixel() > 0.0);
    assert!((10..=50).contains(&scale.tick_count()));

    let edge = AxisScale::compute(f64::MIN, f64::MAX, 400.0);
    assert!(edge.is_resolved());
    assert_eq!(edge.min(), f64::MIN);
    assert_eq!(edge.max(), f64::MAX);
    assert_eq!(edge.tick_values().len(), edge.tick_count() + 1);
}
