//! Keyframe timeline: property interpolations placed at absolute offsets on
//! one shared playhead.
//!
//! A timeline is built paused, filled with steps, then started with
//! [`Timeline::play`]. Each step reads its start values from the target the
//! first time the playhead reaches it, so a step always eases from whatever
//! earlier steps (or other code) left behind.

use crate::ease::Ease;
use smallvec::SmallVec;
use std::fmt;

/// Something with numeric properties a timeline can drive.
pub trait Animatable {
    type Key: Copy + PartialEq + fmt::Debug;
    fn get(&self, key: Self::Key) -> f32;
    fn set(&mut self, key: Self::Key, value: f32);
}

/// Fallbacks for steps that do not set their own duration or ease.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenDefaults {
    pub duration: f32,
    pub ease: Ease,
}

/// Per-step overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TweenOptions {
    pub duration: Option<f32>,
    pub ease: Option<Ease>,
}

impl TweenOptions {
    pub fn duration(duration: f32) -> Self {
        Self {
            duration: Some(duration),
            ease: None,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StepPhase {
    Pending,
    Active,
    Done,
}

#[derive(Clone, Debug)]
pub struct Step<K> {
    pub label: &'static str,
    pub at: f32,
    pub duration: f32,
    pub ease: Ease,
    pub props: SmallVec<[(K, f32); 4]>,
    from: SmallVec<[f32; 4]>,
    phase: StepPhase,
}

impl<K> Step<K> {
    #[inline]
    pub fn end(&self) -> f32 {
        self.at + self.duration
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.phase == StepPhase::Done
    }
}

pub struct Timeline<K> {
    defaults: TweenDefaults,
    steps: Vec<Step<K>>,
    time: f32,
    playing: bool,
}

impl<K: Copy + PartialEq + fmt::Debug> Timeline<K> {
    /// A paused, empty timeline.
    pub fn new(defaults: TweenDefaults) -> Self {
        Self {
            defaults,
            steps: Vec::new(),
            time: 0.0,
            playing: false,
        }
    }

    /// Add a step starting at `at` seconds. Steps stay ordered by offset;
    /// equal offsets keep insertion order.
    pub fn to(
        &mut self,
        label: &'static str,
        at: f32,
        props: impl IntoIterator<Item = (K, f32)>,
        options: TweenOptions,
    ) -> &mut Self {
        let step = Step {
            label,
            at: at.max(0.0),
            duration: options.duration.unwrap_or(self.defaults.duration).max(0.0),
            ease: options.ease.unwrap_or(self.defaults.ease),
            props: props.into_iter().collect(),
            from: SmallVec::new(),
            phase: StepPhase::Pending,
        };
        let idx = self.steps.partition_point(|s| s.at <= step.at);
        self.steps.insert(idx, step);
        self
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn steps(&self) -> &[Step<K>] {
        &self.steps
    }

    /// End of the last step.
    pub fn duration(&self) -> f32 {
        self.steps.iter().map(Step::end).fold(0.0, f32::max)
    }

    pub fn progress(&self) -> f32 {
        let d = self.duration();
        if d <= 0.0 {
            return if self.time > 0.0 { 1.0 } else { 0.0 };
        }
        (self.time / d).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(Step::is_done)
    }

    /// Move the playhead forward by `dt` seconds if playing and apply every
    /// step the playhead has reached.
    pub fn advance<T>(&mut self, dt: f32, target: &mut T)
    where
        T: Animatable<Key = K>,
    {
        if !self.playing || dt < 0.0 {
            return;
        }
        self.time += dt;
        self.render(target);
        if self.is_complete() {
            self.playing = false;
        }
    }

    fn render<T>(&mut self, target: &mut T)
    where
        T: Animatable<Key = K>,
    {
        let now = self.time;
        for step in self.steps.iter_mut() {
            if now < step.at || step.phase == StepPhase::Done {
                continue;
            }
            if step.phase == StepPhase::Pending {
                step.from = step.props.iter().map(|(k, _)| target.get(*k)).collect();
                step.phase = StepPhase::Active;
            }
            let local = if step.duration <= 0.0 {
                1.0
            } else {
                ((now - step.at) / step.duration).clamp(0.0, 1.0)
            };
            let eased = step.ease.apply(local);
            for ((key, to), from) in step.props.iter().zip(step.from.iter()) {
                // exact end values, independent of rounding in the lerp
                let value = if local >= 1.0 {
                    *to
                } else {
                    from + (to - from) * eased
                };
                target.set(*key, value);
            }
            if local >= 1.0 {
                step.phase = StepPhase::Done;
            }
        }
    }
}

impl<K> fmt::Debug for Timeline<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("steps", &self.steps.len())
            .field("time", &self.time)
            .field("playing", &self.playing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Scalar(f32);

    impl Animatable for Scalar {
        type Key = ();
        fn get(&self, _: ()) -> f32 {
            self.0
        }
        fn set(&mut self, _: (), v: f32) {
            self.0 = v;
        }
    }

    fn defaults() -> TweenDefaults {
        TweenDefaults {
            duration: 1.0,
            ease: Ease::Linear,
        }
    }

    #[test]
    fn paused_until_played() {
        let mut tl = Timeline::new(defaults());
        tl.to("a", 0.0, [((), 10.0)], TweenOptions::default());
        let mut s = Scalar(0.0);
        tl.advance(0.5, &mut s);
        assert_eq!(s.0, 0.0);
        tl.play();
        tl.advance(0.5, &mut s);
        assert!((s.0 - 5.0).abs() < 1e-5);
    }

    #[test]
    fn start_value_captured_on_first_activation() {
        let mut tl = Timeline::new(defaults());
        tl.to("late", 1.0, [((), 4.0)], TweenOptions::default());
        tl.play();
        let mut s = Scalar(0.0);
        tl.advance(0.5, &mut s);
        s.0 = 2.0;
        tl.advance(1.0, &mut s);
        assert!((s.0 - 3.0).abs() < 1e-5);
    }

    #[test]
    fn large_step_applies_steps_in_order() {
        let mut tl = Timeline::new(defaults());
        tl.to("second", 2.0, [((), -1.0)], TweenOptions::duration(0.5));
        tl.to("first", 0.0, [((), 7.0)], TweenOptions::default());
        assert_eq!(tl.steps()[0].label, "first");
        tl.play();
        let mut s = Scalar(0.0);
        tl.advance(10.0, &mut s);
        assert_eq!(s.0, -1.0);
        assert!(tl.is_complete());
        assert!(!tl.is_playing());
    }

    #[test]
    fn zero_duration_snaps() {
        let mut tl = Timeline::new(defaults());
        tl.to("snap", 1.0, [((), 3.0)], TweenOptions::duration(0.0));
        tl.play();
        let mut s = Scalar(0.0);
        tl.advance(0.999, &mut s);
        assert_eq!(s.0, 0.0);
        tl.advance(0.001, &mut s);
        assert_eq!(s.0, 3.0);
    }
}
