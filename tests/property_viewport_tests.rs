use chart_axis_engine::core::{Viewport, ViewportState, clamp_start};
use proptest::prelude::*;

proptest! {
    #[test]
    fn window_stays_inside_skeleton(
        skeleton_length in 1usize..100_000,
        pixel_width in 1.0f64..10_000.0,
        tick_pixel_width in 1u32..200,
        requested_start in any::<usize>(),
        delta in any::<i64>()
    ) {
        let mut viewport = Viewport::new();
        let visible = viewport.recompute(skeleton_length, pixel_width, tick_pixel_width);
        prop_assert!(visible <= skeleton_length);

        viewport.set_start(requested_start);
        prop_assert!(viewport.start_index() + viewport.visible_count() <= skeleton_length);

        viewport.scroll_by(delta);
        prop_assert!(viewport.start_index() + viewport.visible_count() <= skeleton_length);

        if viewport.state() == ViewportState::Inactive {
            prop_assert_eq!(viewport.start_index(), 0);
        }
    }

    #[test]
    fn scroll_to_index_makes_target_visible(
        skeleton_length in 1usize..10_000,
        capacity in 1usize..500,
        start in any::<usize>(),
        target in any::<usize>()
    ) {
        let mut viewport = Viewport::new();
        viewport.recompute(skeleton_length, capacity as f64 * 10.0, 10);
        viewport.set_start(start);
        viewport.scroll_to_index(target);

        let target = target.min(skeleton_length - 1);
        prop_assert!(viewport.visible_range().contains(&target));
    }

    #[test]
    fn clamp_start_is_bounded(
        requested in any::<usize>(),
        skeleton_length in 0usize..1_000_000,
        visible_count in 0usize..1_000_000
    ) {
        let start = clamp_start(requested, skeleton_length, visible_count);
        if skeleton_length > visible_count {
            prop_assert!(start + visible_count <= skeleton_length);
        } else {
            prop_assert_eq!(start, 0);
        }
    }
}
