// Host-side tests for the resize throttle, device detection, the loop handle
// and CSS value formatting. The web crate is wasm-only, so the pure style
// helpers are included directly.

#![allow(dead_code)]
mod style {
    include!("../src/style.rs");
}

use hero_core::*;

#[test]
fn throttle_fires_leading_edge_then_arms_one_trailing_call() {
    let mut t = Throttle::new(100.0);
    assert_eq!(t.poll(0.0), ThrottleDecision::Fire);
    assert_eq!(t.poll(30.0), ThrottleDecision::ScheduleTrailing(70.0));
    assert_eq!(t.poll(60.0), ThrottleDecision::Skip);
    assert!(t.fire_trailing(100.0));
    // Trailing call counts as a fire; the window restarts from it.
    assert!(!t.fire_trailing(101.0));
    assert_eq!(t.poll(150.0), ThrottleDecision::ScheduleTrailing(50.0));
    assert!(t.fire_trailing(200.0));
    assert_eq!(t.poll(300.0), ThrottleDecision::Fire);
}

#[test]
fn throttle_spaced_events_always_fire() {
    let mut t = Throttle::new(100.0);
    for i in 0..10 {
        assert_eq!(t.poll(i as f64 * 150.0), ThrottleDecision::Fire);
    }
}

#[test]
fn user_agent_detection() {
    let phones = [
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15",
        "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120 Mobile Safari",
        "Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X)",
        "Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)",
        "Mozilla/5.0 (BlackBerry; U; BlackBerry 9900; en)",
    ];
    for ua in phones {
        assert!(is_compact_user_agent(ua), "{}", ua);
    }
    let desktops = [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) AppleWebKit/605.1.15 Safari/605.1.15",
        // Android tablets omit "Mobile".
        "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 Chrome/120 Safari/537.36",
        "",
    ];
    for ua in desktops {
        assert!(!is_compact_user_agent(ua), "{}", ua);
    }
}

#[test]
fn loop_handle_stops_all_clones() {
    let handle = LoopHandle::new();
    let inner = handle.clone();
    assert!(inner.record_frame());
    assert!(inner.record_frame());
    assert_eq!(handle.frames(), 2);
    handle.stop();
    assert!(inner.is_stopped());
    assert!(!inner.record_frame());
    assert_eq!(handle.frames(), 2);
}

#[test]
fn clock_mark_restarts_elapsed() {
    let mut clock = Clock::new();
    std::thread::sleep(std::time::Duration::from_millis(20));
    assert!(clock.elapsed() >= 0.015);
    clock.mark();
    assert!(clock.elapsed() < 0.015);
    let (elapsed, dt) = clock.tick();
    assert!(dt <= elapsed + 1e-6);
}

#[test]
fn css_values_are_compact() {
    assert_eq!(style::css_number(100.0), "100");
    assert_eq!(style::css_number(-0.0001), "0");
    assert_eq!(style::css_number(12.3456), "12.346");
    assert_eq!(style::css_number(f32::NAN), "0");
    assert_eq!(style::translate_y_pct(-140.0), "translate3d(0px, -140%, 0px)");
    assert_eq!(style::translate_y_pct(0.0), "translate3d(0px, 0%, 0px)");
    assert_eq!(style::percent(25.0), "25%");
    assert_eq!(style::opacity(1.7), "1");
    assert_eq!(style::opacity(0.25), "0.25");
    assert_eq!(style::px(375.0), "375px");
}
