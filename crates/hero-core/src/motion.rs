use crate::constants::{IDLE_BOB_RATE, IDLE_SPIN_RATE, SUBJECT_TOP_X};
use crate::pointer::PointerState;
use crate::state::{PerspectiveCamera, Transform};

/// Idle float and pointer parallax parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionParams {
    pub top_x: f32,
    pub bob_rate: f32,
    pub spin_rate: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            top_x: SUBJECT_TOP_X,
            bob_rate: IDLE_BOB_RATE,
            spin_rate: IDLE_SPIN_RATE,
        }
    }
}

/// One frame of subject and camera motion at `elapsed` seconds.
///
/// The bob and spin accumulate onto the current transform instead of being
/// evaluated from a fixed baseline.
pub fn step_frame(
    params: &MotionParams,
    elapsed: f32,
    pointer: &mut PointerState,
    subject: &mut Transform,
    camera: &mut PerspectiveCamera,
) {
    pointer.relax();

    subject.position.x = params.top_x - pointer.x;
    subject.position.y += elapsed.sin() * params.bob_rate;
    subject.rotation.y += elapsed.cos() * params.spin_rate;
    subject.rotation.x = -pointer.x;

    camera.position.y = -pointer.y;
}
