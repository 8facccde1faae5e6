//! Page chrome reveal: heading in, heading out, title snap, heading and links
//! back in. Independent of the 3D scene.

use crate::constants::*;
use crate::device::DeviceClass;
use crate::ease::Ease;
use crate::timeline::{Animatable, Timeline, TweenDefaults, TweenOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroKey {
    HeadingY,
    TitleLeft,
    TitleTop,
    LinksOpacity,
}

impl IntroKey {
    const ALL: [IntroKey; 4] = [
        IntroKey::HeadingY,
        IntroKey::TitleLeft,
        IntroKey::TitleTop,
        IntroKey::LinksOpacity,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Current animated values, plus which ones changed since the last flush.
///
/// Units: heading y and title left/top are percentages, opacity is 0..1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroValues {
    pub heading_y_pct: f32,
    pub title_left_pct: f32,
    pub title_top_pct: f32,
    pub links_opacity: f32,
    dirty: u8,
}

impl IntroValues {
    pub fn new(heading_y_pct: f32, links_opacity: f32) -> Self {
        Self {
            heading_y_pct,
            title_left_pct: 0.0,
            title_top_pct: 0.0,
            links_opacity,
            dirty: 0,
        }
    }

    /// Start values from the elements' `data-mv-from` attributes, falling back
    /// to the built-in resting offsets when absent or not a finite number.
    /// Both keys start dirty so the first flush pins the elements to them.
    pub fn from_start_attributes(
        heading_y: Option<&str>,
        links_opacity: Option<&str>,
    ) -> Self {
        let parse = |attr: Option<&str>, fallback: f32| {
            attr.and_then(|v| v.trim().trim_end_matches('%').parse::<f32>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(fallback)
        };
        let mut values = Self::new(
            parse(heading_y, INTRO_HEADING_START_Y_PCT),
            parse(links_opacity, INTRO_LINKS_START_OPACITY).clamp(0.0, 1.0),
        );
        values.dirty = IntroKey::HeadingY.bit() | IntroKey::LinksOpacity.bit();
        values
    }

    /// Keys written since the previous call, in a fixed order.
    pub fn take_dirty(&mut self) -> impl Iterator<Item = IntroKey> {
        let dirty = std::mem::take(&mut self.dirty);
        IntroKey::ALL.into_iter().filter(move |k| dirty & k.bit() != 0)
    }
}

impl Default for IntroValues {
    fn default() -> Self {
        Self::new(INTRO_HEADING_START_Y_PCT, INTRO_LINKS_START_OPACITY)
    }
}

impl Animatable for IntroValues {
    type Key = IntroKey;

    fn get(&self, key: IntroKey) -> f32 {
        match key {
            IntroKey::HeadingY => self.heading_y_pct,
            IntroKey::TitleLeft => self.title_left_pct,
            IntroKey::TitleTop => self.title_top_pct,
            IntroKey::LinksOpacity => self.links_opacity,
        }
    }

    fn set(&mut self, key: IntroKey, value: f32) {
        match key {
            IntroKey::HeadingY => self.heading_y_pct = value,
            IntroKey::TitleLeft => self.title_left_pct = value,
            IntroKey::TitleTop => self.title_top_pct = value,
            IntroKey::LinksOpacity => self.links_opacity = value,
        }
        self.dirty |= key.bit();
    }
}

pub fn build_intro_timeline(device: DeviceClass) -> Timeline<IntroKey> {
    let mut tl = Timeline::new(TweenDefaults {
        duration: INTRO_DEFAULT_DURATION,
        ease: Ease::Out(2),
    });
    let [left, top] = device.title_position();
    tl.to(
        "heading-in",
        INTRO_HEADING_IN_AT,
        [(IntroKey::HeadingY, 0.0)],
        TweenOptions::duration(INTRO_HEADING_IN_DURATION),
    )
    .to(
        "heading-out",
        INTRO_HEADING_OUT_AT,
        [(IntroKey::HeadingY, INTRO_HEADING_OUT_Y_PCT)],
        TweenOptions::duration(INTRO_HEADING_OUT_DURATION),
    )
    .to(
        "title-snap",
        INTRO_TITLE_SNAP_AT,
        [(IntroKey::TitleLeft, left), (IntroKey::TitleTop, top)],
        TweenOptions::duration(0.0),
    )
    .to(
        "heading-back",
        INTRO_FINAL_AT,
        [(IntroKey::HeadingY, 0.0)],
        TweenOptions::default(),
    )
    .to(
        "links-in",
        INTRO_FINAL_AT,
        [(IntroKey::LinksOpacity, 1.0)],
        TweenOptions::default(),
    );
    tl
}

/// Intro timeline plus the values it drives. Hosts call [`Choreography::tick`]
/// each animation frame and flush the dirty values to their elements.
#[derive(Debug)]
pub struct Choreography {
    pub values: IntroValues,
    timeline: Timeline<IntroKey>,
}

impl Choreography {
    /// Build and immediately play.
    pub fn start(device: DeviceClass, initial: IntroValues) -> Self {
        let mut timeline = build_intro_timeline(device);
        timeline.play();
        Self {
            values: initial,
            timeline,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.timeline.advance(dt, &mut self.values);
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.timeline.is_complete()
    }

    pub fn timeline(&self) -> &Timeline<IntroKey> {
        &self.timeline
    }
}
