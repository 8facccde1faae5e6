use crate::constants::*;
use crate::device::DeviceClass;
use crate::ease::Ease;
use crate::state::Transform;
use crate::timeline::{Animatable, Timeline, TweenDefaults, TweenOptions};

/// Subject transform channels driven by the reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubjectKey {
    ScaleX,
    ScaleY,
    ScaleZ,
    RotationX,
    RotationY,
}

impl Animatable for Transform {
    type Key = SubjectKey;

    fn get(&self, key: SubjectKey) -> f32 {
        match key {
            SubjectKey::ScaleX => self.scale.x,
            SubjectKey::ScaleY => self.scale.y,
            SubjectKey::ScaleZ => self.scale.z,
            SubjectKey::RotationX => self.rotation.x,
            SubjectKey::RotationY => self.rotation.y,
        }
    }

    fn set(&mut self, key: SubjectKey, value: f32) {
        match key {
            SubjectKey::ScaleX => self.scale.x = value,
            SubjectKey::ScaleY => self.scale.y = value,
            SubjectKey::ScaleZ => self.scale.z = value,
            SubjectKey::RotationX => self.rotation.x = value,
            SubjectKey::RotationY => self.rotation.y = value,
        }
    }
}

/// Build the subject reveal: shrink to the device scale, then turn towards
/// the viewer. Returned paused.
pub fn build_reveal_timeline(device: DeviceClass) -> Timeline<SubjectKey> {
    let mut tl = Timeline::new(TweenDefaults {
        duration: REVEAL_DEFAULT_DURATION,
        ease: Ease::Out(2),
    });
    let s = device.reveal_scale();
    tl.to(
        "scale",
        REVEAL_SCALE_AT,
        [
            (SubjectKey::ScaleX, s),
            (SubjectKey::ScaleY, s),
            (SubjectKey::ScaleZ, s),
        ],
        TweenOptions::duration(REVEAL_SCALE_DURATION),
    )
    .to(
        "rotate",
        REVEAL_ROTATE_AT,
        [
            (SubjectKey::RotationX, REVEAL_ROTATION),
            (SubjectKey::RotationY, REVEAL_ROTATION),
        ],
        TweenOptions::duration(REVEAL_ROTATE_DURATION),
    );
    tl
}
