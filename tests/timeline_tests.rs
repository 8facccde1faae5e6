// Host-side tests for the intro and reveal choreography and the easing curves.

use hero_core::*;

const FRAME: f32 = 1.0 / 60.0;

fn run_until(ch: &mut Choreography, elapsed: &mut f32, until: f32) {
    while *elapsed + FRAME <= until {
        *elapsed += FRAME;
        ch.tick(FRAME);
    }
}

#[test]
fn intro_steps_sit_at_their_offsets() {
    let tl = build_intro_timeline(DeviceClass::Wide);
    let steps: Vec<(&str, f32, f32)> = tl
        .steps()
        .iter()
        .map(|s| (s.label, s.at, s.duration))
        .collect();
    assert_eq!(
        steps,
        vec![
            ("heading-in", 0.2, 1.0),
            ("heading-out", 1.8, 0.5),
            ("title-snap", 2.3, 0.0),
            ("heading-back", 3.3, 0.8),
            ("links-in", 3.3, 0.8),
        ]
    );
    assert!(!tl.is_playing());
    assert!((tl.duration() - 4.1).abs() < 1e-5);
    assert!(tl.steps().iter().all(|s| s.ease == Ease::Out(2)));
}

#[test]
fn intro_hides_heading_before_title_snap_then_reveals() {
    let mut ch = Choreography::start(DeviceClass::Wide, IntroValues::default());
    let mut t = 0.0;
    assert_eq!(ch.values.heading_y_pct, INTRO_HEADING_START_Y_PCT);

    run_until(&mut ch, &mut t, 0.15);
    assert_eq!(ch.values.heading_y_pct, INTRO_HEADING_START_Y_PCT);

    run_until(&mut ch, &mut t, 1.5);
    assert_eq!(ch.values.heading_y_pct, 0.0);

    run_until(&mut ch, &mut t, 2.29);
    assert!(ch.values.heading_y_pct < -130.0);
    // Title not moved yet.
    assert_eq!(ch.values.title_left_pct, 0.0);
    assert_eq!(ch.values.links_opacity, 0.0);

    run_until(&mut ch, &mut t, 2.35);
    assert_eq!(ch.values.title_left_pct, 25.0);
    assert_eq!(ch.values.title_top_pct, 19.0);
    assert_eq!(ch.values.heading_y_pct, INTRO_HEADING_OUT_Y_PCT);

    run_until(&mut ch, &mut t, 3.7);
    assert!(ch.values.heading_y_pct > INTRO_HEADING_OUT_Y_PCT);
    assert!(ch.values.heading_y_pct < 0.0);
    assert!(ch.values.links_opacity > 0.0 && ch.values.links_opacity < 1.0);
    assert!(!ch.is_complete());

    run_until(&mut ch, &mut t, 4.2);
    assert_eq!(ch.values.heading_y_pct, 0.0);
    assert_eq!(ch.values.links_opacity, 1.0);
    assert!(ch.is_complete());
    assert!(!ch.timeline().is_playing());
}

#[test]
fn compact_title_snaps_to_compact_position() {
    let mut ch = Choreography::start(DeviceClass::Compact, IntroValues::default());
    ch.tick(2.3);
    assert_eq!(ch.values.title_left_pct, 50.0);
    assert_eq!(ch.values.title_top_pct, 15.0);
}

#[test]
fn dirty_keys_are_reported_once() {
    let mut ch = Choreography::start(DeviceClass::Wide, IntroValues::default());
    ch.tick(0.5);
    let dirty: Vec<IntroKey> = ch.values.take_dirty().collect();
    assert_eq!(dirty, vec![IntroKey::HeadingY]);
    assert_eq!(ch.values.take_dirty().count(), 0);

    ch.tick(3.0);
    let dirty: Vec<IntroKey> = ch.values.take_dirty().collect();
    assert_eq!(
        dirty,
        vec![
            IntroKey::HeadingY,
            IntroKey::TitleLeft,
            IntroKey::TitleTop,
            IntroKey::LinksOpacity
        ]
    );
}

#[test]
fn reveal_timeline_is_paused_with_scale_then_rotation() {
    let tl = build_reveal_timeline(DeviceClass::Wide);
    assert!(!tl.is_playing());
    let steps = tl.steps();
    assert_eq!(steps.len(), 2);
    assert_eq!((steps[0].label, steps[0].at, steps[0].duration), ("scale", 1.8, 2.6));
    assert_eq!(
        (steps[1].label, steps[1].at, steps[1].duration),
        ("rotate", 4.4, 1.6)
    );
    assert!(steps[0].props.iter().all(|(_, v)| *v == 0.5));
    assert!(steps[1].props.iter().all(|(_, v)| *v == REVEAL_ROTATION));
}

#[test]
fn reveal_eases_from_load_scale() {
    let mut tl = build_reveal_timeline(DeviceClass::Wide);
    tl.play();
    let mut subject = Transform::default();
    subject.set_uniform_scale(3.0);
    tl.advance(1.8 + 1.3, &mut subject);
    // Halfway through a cubic ease-out is 7/8 of the way.
    let expected = 3.0 + (0.5 - 3.0) * 0.875;
    assert!((subject.scale.x - expected).abs() < 1e-4);
    assert_eq!(subject.scale.x, subject.scale.z);
    assert_eq!(subject.rotation, glam::Vec3::ZERO);

    tl.advance(10.0, &mut subject);
    assert_eq!(subject.scale, glam::Vec3::splat(0.5));
    assert_eq!(subject.rotation.x, -0.3);
    assert_eq!(subject.rotation.y, -0.3);
    assert!(tl.is_complete());
    assert_eq!(tl.progress(), 1.0);
}

#[test]
fn ease_endpoints_and_monotonicity() {
    let curves = [
        Ease::Linear,
        Ease::In(1),
        Ease::Out(2),
        Ease::InOut(3),
        Ease::Out(4),
    ];
    for ease in curves {
        assert_eq!(ease.apply(0.0), 0.0);
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease.apply(i as f32 / 100.0);
            assert!(v >= prev, "{:?} not monotone at {}", ease, i);
            prev = v;
        }
    }
    assert_eq!(Ease::Out(2).apply(-1.0), 0.0);
    assert_eq!(Ease::Out(2).apply(2.0), 1.0);
}

#[test]
fn start_values_come_from_attributes_and_are_flushed_first() {
    let mut values = IntroValues::from_start_attributes(Some("60%"), Some(" 0.25 "));
    assert_eq!(values.heading_y_pct, 60.0);
    assert_eq!(values.links_opacity, 0.25);
    let dirty: Vec<IntroKey> = values.take_dirty().collect();
    assert_eq!(dirty, vec![IntroKey::HeadingY, IntroKey::LinksOpacity]);

    let fallback = IntroValues::from_start_attributes(None, Some("bogus"));
    assert_eq!(fallback.heading_y_pct, INTRO_HEADING_START_Y_PCT);
    assert_eq!(fallback.links_opacity, INTRO_LINKS_START_OPACITY);
    let clamped = IntroValues::from_start_attributes(Some("NaN"), Some("3"));
    assert_eq!(clamped.heading_y_pct, INTRO_HEADING_START_Y_PCT);
    assert_eq!(clamped.links_opacity, 1.0);
}

#[test]
fn heading_eases_from_its_attribute_offset() {
    let start = IntroValues::from_start_attributes(Some("60"), None);
    let mut ch = Choreography::start(DeviceClass::Wide, start);
    // Halfway through heading-in; cubic ease-out covers 7/8.
    ch.tick(0.7);
    assert!((ch.values.heading_y_pct - 7.5).abs() < 1e-3);
}
