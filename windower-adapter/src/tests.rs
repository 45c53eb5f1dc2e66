use crate::*;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use windower::{Align, EngineOptions, ScrollingConfig, SizeSpec, Viewport};

fn fixed_controller(count: usize, size: f64, extent: f64) -> Controller {
    Controller::new(
        EngineOptions::new(count, SizeSpec::fixed(size))
            .with_initial_viewport(Viewport::new(400.0, extent)),
    )
    .unwrap()
}

fn flag_callback() -> (Arc<AtomicBool>, ScrollCallback) {
    let flag = Arc::new(AtomicBool::new(false));
    let inner = flag.clone();
    (
        flag,
        Box::new(move || {
            inner.store(true, Ordering::SeqCst);
        }),
    )
}

/// Advance `frames` ticks of 16 ms each, returning the final timestamp.
fn run_frames(controller: &mut Controller, start_ms: f64, frames: u32) -> f64 {
    let mut now = start_ms;
    for _ in 0..frames {
        now += 16.0;
        controller.tick(now).unwrap();
    }
    now
}

#[test]
fn instant_scroll_moves_the_window_immediately() {
    let mut controller = fixed_controller(1000, 50.0, 500.0);
    let target = controller.scroll_to(1000.0, 0.0, None).unwrap();
    assert_eq!(target, 1000.0);
    assert_eq!(controller.engine().scroll_offset(), 1000.0);
    assert_eq!(controller.engine().state().items[0].index, 10);
}

#[test]
fn scroll_to_clamps_the_target() {
    let mut controller = fixed_controller(1000, 50.0, 500.0);
    let target = controller.scroll_to(60000.0, 0.0, None).unwrap();
    assert_eq!(target, 49500.0);
    assert_eq!(controller.engine().scroll_offset(), 49500.0);
}

#[test]
fn smooth_scroll_progresses_monotonically_to_the_target() {
    let mut controller = fixed_controller(1000, 50.0, 500.0);
    // distance 2000 -> duration 150 ms under the default 0.075 ms/px
    controller
        .scroll_to(ScrollToOptions::smooth(2000.0), 0.0, None)
        .unwrap();
    assert!(controller.is_animating());

    let mut now = 0.0;
    let mut offsets = Vec::new();
    while controller.is_animating() {
        now += 16.0;
        if let Some(offset) = controller.tick(now).unwrap() {
            offsets.push(offset);
        }
        assert!(now < 1000.0, "animation failed to finish");
    }
    for pair in offsets.windows(2) {
        assert!(pair[0] < pair[1], "offsets not monotone: {offsets:?}");
    }
    assert_eq!(*offsets.last().unwrap(), 2000.0);
    assert_eq!(controller.engine().scroll_offset(), 2000.0);
}

#[test]
fn completion_callback_waits_the_defer_window() {
    let mut controller = fixed_controller(1000, 50.0, 500.0);
    let (fired, callback) = flag_callback();
    controller.scroll_to(1000.0, 0.0, Some(callback)).unwrap();

    run_frames(&mut controller, 0.0, COMPLETION_DEFER_FRAMES - 1);
    assert!(!fired.load(Ordering::SeqCst));
    run_frames(&mut controller, 16.0 * (COMPLETION_DEFER_FRAMES - 1) as f64, 1);
    assert!(fired.load(Ordering::SeqCst));
}

#[test]
fn same_offset_scroll_still_defers_its_callback() {
    let mut controller = fixed_controller(1000, 50.0, 500.0);
    let (fired, callback) = flag_callback();
    controller.scroll_to(0.0, 0.0, Some(callback)).unwrap();
    assert!(!fired.load(Ordering::SeqCst));
    run_frames(&mut controller, 0.0, COMPLETION_DEFER_FRAMES);
    assert!(fired.load(Ordering::SeqCst));
}

#[test]
fn superseded_scroll_never_runs_its_callback() {
    let mut controller = fixed_controller(1000, 50.0, 500.0);
    let (first_fired, first) = flag_callback();
    let (second_fired, second) = flag_callback();

    controller
        .scroll_to(ScrollToOptions::smooth(2000.0), 0.0, Some(first))
        .unwrap();
    controller.tick(16.0).unwrap();
    controller.scroll_to(500.0, 32.0, Some(second)).unwrap();

    run_frames(&mut controller, 32.0, 20);
    assert!(!first_fired.load(Ordering::SeqCst));
    assert!(second_fired.load(Ordering::SeqCst));
    assert_eq!(controller.engine().scroll_offset(), 500.0);
}

#[test]
fn user_scroll_cancels_the_animation() {
    let mut controller = fixed_controller(1000, 50.0, 500.0);
    let (fired, callback) = flag_callback();
    controller
        .scroll_to(ScrollToOptions::smooth(2000.0), 0.0, Some(callback))
        .unwrap();
    controller.tick(16.0).unwrap();

    controller.on_scroll(123.0).unwrap();
    assert!(!controller.is_animating());
    assert_eq!(controller.engine().scroll_offset(), 123.0);

    assert_eq!(controller.tick(32.0).unwrap(), None);
    run_frames(&mut controller, 32.0, 20);
    assert!(!fired.load(Ordering::SeqCst));
    assert_eq!(controller.engine().scroll_offset(), 123.0);
}

#[test]
fn user_scroll_is_flagged_as_user() {
    let flags = Arc::new(Mutex::new(Vec::new()));
    let sink = flags.clone();
    let options = EngineOptions::new(1000, SizeSpec::fixed(50.0))
        .with_initial_viewport(Viewport::new(400.0, 500.0))
        .with_on_scroll(move |event| {
            sink.lock().unwrap().push(event.user_scroll);
        });
    let mut controller = Controller::new(options).unwrap();

    controller.on_scroll(100.0).unwrap();
    controller.scroll_to(200.0, 0.0, None).unwrap();
    assert_eq!(*flags.lock().unwrap(), vec![true, false]);
}

#[test]
fn scrolling_flag_settles_after_quiet_frames() {
    let mut controller = fixed_controller(1000, 50.0, 500.0);
    controller.on_scroll(400.0).unwrap();
    assert!(controller.engine().is_scrolling());

    run_frames(&mut controller, 0.0, SCROLL_SETTLE_FRAMES - 1);
    assert!(controller.engine().is_scrolling());
    run_frames(&mut controller, 16.0 * (SCROLL_SETTLE_FRAMES - 1) as f64, 1);
    assert!(!controller.engine().is_scrolling());
}

#[test]
fn scroll_to_item_lands_exactly_with_accurate_sizes() {
    let mut controller = fixed_controller(1000, 50.0, 500.0);
    let (fired, callback) = flag_callback();
    let target = controller
        .scroll_to_item(
            ScrollToItemOptions::new(50).with_align(Align::Center),
            0.0,
            Some(callback),
        )
        .unwrap();
    assert_eq!(target, Some(2275.0));

    run_frames(&mut controller, 0.0, COMPLETION_DEFER_FRAMES);
    assert!(fired.load(Ordering::SeqCst));
    // Target was exact, so no re-aim happened.
    assert_eq!(controller.engine().scroll_offset(), 2275.0);
}

#[test]
fn scroll_to_item_reaims_after_sizes_shift() {
    let mut controller = fixed_controller(1000, 50.0, 500.0);
    let (fired, callback) = flag_callback();
    controller
        .scroll_to_item(
            ScrollToItemOptions::new(100).with_align(Align::Start),
            0.0,
            Some(callback),
        )
        .unwrap();
    assert_eq!(controller.engine().scroll_offset(), 5000.0);

    // An item above the target turns out bigger than estimated while the
    // completion is still deferred.
    let compensated = controller.observe_size(10, 100.0).unwrap();
    assert_eq!(compensated, Some(5050.0));

    let now = run_frames(&mut controller, 0.0, COMPLETION_DEFER_FRAMES);
    assert!(!fired.load(Ordering::SeqCst), "completed without re-aiming");

    run_frames(&mut controller, now, COMPLETION_DEFER_FRAMES);
    assert!(fired.load(Ordering::SeqCst));
    assert_eq!(controller.engine().scroll_offset(), 5050.0);
    assert_eq!(controller.engine().measure_of(100).unwrap().start, 5050.0);
}

#[test]
fn reaim_gives_up_after_the_retry_limit() {
    let options = EngineOptions::new(1000, SizeSpec::fixed(50.0))
        .with_initial_viewport(Viewport::new(400.0, 500.0))
        .with_scrolling(ScrollingConfig {
            retry_limit: 2,
            ..Default::default()
        });
    let mut controller = Controller::new(options).unwrap();
    let (fired, callback) = flag_callback();
    controller
        .scroll_to_item(
            ScrollToItemOptions::new(500).with_align(Align::Start),
            0.0,
            Some(callback),
        )
        .unwrap();

    // Keep moving the target out from under every completion attempt.
    let mut now = 0.0;
    for index in 0..3 {
        controller.observe_size(index, 150.0).unwrap();
        now = run_frames(&mut controller, now, COMPLETION_DEFER_FRAMES);
    }
    assert!(
        fired.load(Ordering::SeqCst),
        "callback must fire even when the target never converges"
    );
    assert!(!controller.is_animating());
    assert_eq!(controller.tick(now + 16.0).unwrap(), None);
}

#[test]
fn scroll_to_item_on_empty_list_resolves_immediately() {
    let mut controller = fixed_controller(0, 50.0, 500.0);
    let (fired, callback) = flag_callback();
    let target = controller.scroll_to_item(3, 0.0, Some(callback)).unwrap();
    assert_eq!(target, None);
    assert!(fired.load(Ordering::SeqCst));
}

#[test]
fn observe_size_compensates_and_refreshes() {
    let mut controller = fixed_controller(100, 50.0, 200.0);
    controller.on_scroll(300.0).unwrap();
    let indexes_before: Vec<usize> = controller
        .engine()
        .state()
        .items
        .iter()
        .map(|item| item.index)
        .collect();

    let compensated = controller.observe_size(3, 80.0).unwrap();
    assert_eq!(compensated, Some(330.0));
    controller.tick(16.0).unwrap();

    let indexes_after: Vec<usize> = controller
        .engine()
        .state()
        .items
        .iter()
        .map(|item| item.index)
        .collect();
    assert_eq!(indexes_before, indexes_after);
    assert_eq!(controller.engine().measure_of(3).unwrap().size, 80.0);
}

#[test]
fn observe_size_below_defers_refresh_while_scrolling() {
    let mut controller = fixed_controller(100, 50.0, 200.0);
    controller.on_scroll(300.0).unwrap();
    assert!(controller.engine().is_scrolling());

    // Change below the viewport during a gesture: no compensation, and the
    // refresh rides along with the scroll updates already happening.
    assert_eq!(controller.observe_size(9, 80.0).unwrap(), None);
    assert_eq!(controller.engine().scroll_offset(), 300.0);

    run_frames(&mut controller, 0.0, SCROLL_SETTLE_FRAMES + 1);
    assert_eq!(controller.engine().measure_of(9).unwrap().size, 80.0);
}

#[test]
fn animation_count_matches_events() {
    let scrolls = Arc::new(AtomicUsize::new(0));
    let sink = scrolls.clone();
    let options = EngineOptions::new(1000, SizeSpec::fixed(50.0))
        .with_initial_viewport(Viewport::new(400.0, 500.0))
        .with_on_scroll(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });
    let mut controller = Controller::new(options).unwrap();
    controller
        .scroll_to(ScrollToOptions::smooth(2000.0), 0.0, None)
        .unwrap();

    let mut ticks = 0;
    let mut now = 0.0;
    while controller.is_animating() {
        now += 16.0;
        controller.tick(now).unwrap();
        ticks += 1;
        assert!(ticks < 100);
    }
    assert_eq!(scrolls.load(Ordering::SeqCst), ticks);
}

#[test]
fn animation_sampling_respects_easing_bounds() {
    let animation = ScrollAnimation::new(0.0, 100.0, 0.0, 200.0);
    let linear = |t: f64| t;
    assert_eq!(animation.sample(0.0, &linear), 0.0);
    assert_eq!(animation.sample(100.0, &linear), 50.0);
    assert_eq!(animation.sample(200.0, &linear), 100.0);
    // Clamped outside the window.
    assert_eq!(animation.sample(-50.0, &linear), 0.0);
    assert_eq!(animation.sample(500.0, &linear), 100.0);
    assert!(!animation.is_done(199.0));
    assert!(animation.is_done(200.0));
    assert_eq!(animation.target(), 100.0);
}
