//! Animator timing driven by the virtual clock

use marquee_core::{
    animator::{Animator, ControlEvent, FixedMeasure, ManualTimers},
    config::{LaunchParams, MarqueeConfig},
};
use proptest::prelude::*;
use std::time::Duration;

const MS: Duration = Duration::from_millis(1);

fn running(viewport: f64, content: f64, config: MarqueeConfig) -> Animator<ManualTimers, FixedMeasure> {
    let mut animator = Animator::new(config, ManualTimers::new(), FixedMeasure::new(viewport, content));
    animator.handle(ControlEvent::Toggle);
    animator
}

#[test]
fn monotonic_until_exact_wrap() {
    let mut animator = running(300.0, 500.0, MarqueeConfig::default());
    let mut previous = animator.state().offset_x;
    let mut wrapped_at = None;

    for step in 1..=400 {
        animator.advance(20 * MS);
        let offset = animator.state().offset_x;
        if offset > previous {
            assert_eq!(offset, 300.0, "wrap must land exactly on the start offset");
            assert!(previous >= -500.0);
            wrapped_at = Some(step);
            break;
        }
        assert_eq!(previous - offset, 3.0);
        previous = offset;
    }

    assert_eq!(wrapped_at, Some(267));
}

#[test]
fn query_tuning_controls_speed_and_period() {
    let params = LaunchParams::from_query("n=5&t=50");
    let mut animator = running(1000.0, 100.0, params.config);
    assert_eq!(animator.advance(49 * MS), 0);
    assert_eq!(animator.advance(MS), 1);
    assert_eq!(animator.state().offset_x, 995.0);
    animator.advance(450 * MS);
    assert_eq!(animator.state().offset_x, 950.0);
}

#[test]
fn repeated_toggles_never_stack_drivers() {
    let mut animator = running(300.0, 500.0, MarqueeConfig::default());
    for _ in 0..10 {
        animator.handle(ControlEvent::Toggle);
        animator.handle(ControlEvent::Toggle);
    }
    assert_eq!(animator.timers().periodic_count(), 1);
    animator.advance(200 * MS);
    assert_eq!(animator.state().offset_x, 270.0);
}

#[test]
fn blur_during_debounce_applies_pending_resize() {
    let mut animator = running(300.0, 500.0, MarqueeConfig::default());
    animator.measure_mut().viewport = 500.0;
    animator.handle(ControlEvent::Resize);
    animator.handle(ControlEvent::FocusLost);
    assert_eq!(animator.state().start_offset_x, 500.0);
    animator.advance(Duration::from_secs(1));
    assert_eq!(animator.timers().active_count(), 0);

    animator.handle(ControlEvent::FocusGained);
    assert!(animator.is_running());
    assert_eq!(animator.state().start_offset_x, 500.0);
}

#[test]
fn stop_during_debounce_remeasures_for_next_run() {
    let mut animator = running(300.0, 500.0, MarqueeConfig::default());
    animator.measure_mut().viewport = 800.0;
    animator.handle(ControlEvent::Resize);
    animator.advance(40 * MS);
    animator.handle(ControlEvent::Toggle);
    assert!(!animator.has_pending_resize());
    assert_eq!(animator.state().start_offset_x, 800.0);
    assert_eq!(animator.state().offset_x, 800.0);

    animator.handle(ControlEvent::Toggle);
    animator.advance(Duration::from_secs(1));
    assert_eq!(animator.state().start_offset_x, 800.0);
    assert_eq!(animator.state().offset_x, 650.0);
}

#[test]
fn zero_tick_period_still_advances() {
    let config = MarqueeConfig {
        tick_period: Duration::ZERO,
        ..MarqueeConfig::default()
    };
    let mut animator = running(1000.0, 10_000.0, config);
    assert_eq!(animator.advance(MS), 1000);
    assert_eq!(animator.state().offset_x, -2000.0);
}

#[test]
fn reset_key_stops_and_rewinds() {
    let mut animator = running(300.0, 500.0, MarqueeConfig::default());
    animator.advance(Duration::from_secs(2));
    let event = ControlEvent::from_key("KeyR").unwrap();
    animator.handle(event);
    let state = *animator.state();
    assert!(!state.running);
    assert_eq!(state.offset_x, state.start_offset_x);
    animator.advance(Duration::from_secs(2));
    assert_eq!(animator.state().offset_x, 300.0);
}

proptest! {
    #[test]
    fn offset_stays_in_bounds(
        viewport in 1.0f64..2000.0,
        content in 1.0f64..4000.0,
        speed in 0.5f64..50.0,
        ticks in 0usize..2000,
    ) {
        let config = MarqueeConfig { speed_per_tick: speed, ..MarqueeConfig::default() };
        let mut animator = Animator::new(config, ManualTimers::new(), FixedMeasure::new(viewport, content));
        animator.reposition();
        animator.start();
        for _ in 0..ticks {
            animator.tick();
            let offset = animator.state().offset_x;
            prop_assert!(offset >= -content);
            prop_assert!(offset <= viewport);
        }
    }
}
