use crate::constants::{POINTER_DAMPING_X, POINTER_DAMPING_Y};
use crate::viewport::ViewportState;

/// Pointer parallax input.
///
/// `target_*` follows the raw pointer; `x`/`y` chase it with a per-axis
/// exponential filter stepped once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub target_x: f32,
    pub target_y: f32,
    pub move_x: f32,
    pub move_y: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(POINTER_DAMPING_X, POINTER_DAMPING_Y)
    }
}

impl PointerState {
    pub fn new(move_x: f32, move_y: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            target_x: 0.0,
            target_y: 0.0,
            move_x,
            move_y,
        }
    }

    /// Set the target from client coordinates, measured from the viewport
    /// centre and normalised by the half dimensions. Right/down of centre is
    /// negative.
    pub fn set_target_from_client(
        &mut self,
        client_x: f64,
        client_y: f64,
        viewport: &ViewportState,
    ) {
        self.target_x = normalized_offset(viewport.half_width, client_x);
        self.target_y = normalized_offset(viewport.half_height, client_y);
    }

    /// One relaxation step: `current += (target - current) * damping`.
    #[inline]
    pub fn relax(&mut self) {
        self.x += (self.target_x - self.x) * self.move_x;
        self.y += (self.target_y - self.y) * self.move_y;
    }
}

#[inline]
fn normalized_offset(half: f64, coord: f64) -> f32 {
    if half <= 0.0 {
        return 0.0;
    }
    ((half - coord) / half) as f32
}
