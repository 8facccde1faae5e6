//! Camera, transform and clock types shared with the web frontend.
//!
//! These types avoid platform-specific APIs so the frame update and the
//! timelines can be exercised on the host.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};
use glam::{EulerRot, Mat4, Quat, Vec3};
use instant::Instant;

/// Perspective camera looking down -Z from `position`.
///
/// The projection is cached and only rebuilt by
/// [`PerspectiveCamera::update_projection_matrix`], so changing `aspect`
/// without calling it has no visible effect.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            fov_deg,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn with_aspect(aspect: f32) -> Self {
        Self::new(CAMERA_FOV_DEG, aspect, CAMERA_NEAR, CAMERA_FAR)
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far);
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World to view transform. The camera never rotates.
    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

/// Position, XYZ Euler rotation (radians) and scale of a scene node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, q, self.position)
    }

    #[inline]
    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }
}

/// Elapsed seconds since creation, plus the delta between reads.
#[derive(Clone, Debug)]
pub struct Clock {
    start: Instant,
    last: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Restart both the elapsed origin and the delta baseline at now.
    pub fn mark(&mut self) {
        *self = Self::new();
    }

    /// Returns `(elapsed, delta since previous tick)`.
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last).as_secs_f32();
        self.last = now;
        ((now - self.start).as_secs_f32(), dt)
    }
}
