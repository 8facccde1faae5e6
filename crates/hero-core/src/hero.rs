//! Owned state of the hero scene and its lifecycle.
//!
//! [`HeroScene`] is built synchronously, waits for one [`LoadOutcome`], and
//! only then lets the per-frame update and the reveal timeline touch the
//! subject. Until the outcome is `Loaded`, [`HeroScene::frame`] is a no-op.

use crate::constants::*;
use crate::device::DeviceClass;
use crate::error::{LoadError, SceneError};
use crate::model::Model;
use crate::motion::{self, MotionParams};
use crate::pointer::PointerState;
use crate::reveal::{build_reveal_timeline, SubjectKey};
use crate::scene::Scene;
use crate::state::PerspectiveCamera;
use crate::timeline::Timeline;
use crate::viewport::ViewportState;
use glam::Vec3;

/// Tunables for the scene. Defaults come from [`crate::constants`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub model_url: String,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub camera_z: f32,
    pub pointer_damping: [f32; 2],
    pub motion: MotionParams,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            model_url: MODEL_URL.to_string(),
            fov_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            camera_z: CAMERA_Z,
            pointer_damping: [POINTER_DAMPING_X, POINTER_DAMPING_Y],
            motion: MotionParams::default(),
        }
    }
}

/// Result of the one asynchronous model load.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Model),
    Failed(LoadError),
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    Pending,
    Ready,
    Failed(LoadError),
}

/// What the host should do after a load completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadTransition {
    /// Subject attached and reveal playing: start the render loop.
    StartLoop,
    /// Load failed: draw one static frame and stop.
    Stalled,
}

pub struct HeroScene {
    pub config: SceneConfig,
    device: DeviceClass,
    viewport: ViewportState,
    pub pointer: PointerState,
    pub camera: PerspectiveCamera,
    pub scene: Scene,
    load: LoadState,
    reveal: Option<Timeline<SubjectKey>>,
    frames: u64,
}

impl HeroScene {
    pub fn new(config: SceneConfig, viewport: ViewportState, device: DeviceClass) -> Self {
        let mut camera =
            PerspectiveCamera::new(config.fov_deg, viewport.aspect(), config.near, config.far);
        camera.position = Vec3::new(device.camera_start_x(), 0.0, config.camera_z);
        let pointer = PointerState::new(config.pointer_damping[0], config.pointer_damping[1]);
        log::info!(
            "[scene] init {}x{} dpr={} compact={}",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio,
            device.is_compact()
        );
        Self {
            config,
            device,
            viewport,
            pointer,
            camera,
            scene: Scene::new(),
            load: LoadState::Pending,
            reveal: None,
            frames: 0,
        }
    }

    #[inline]
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    #[inline]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    #[inline]
    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.load == LoadState::Ready
    }

    pub fn reveal(&self) -> Option<&Timeline<SubjectKey>> {
        self.reveal.as_ref()
    }

    /// Frames that actually updated the subject.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
        self.pointer
            .set_target_from_client(client_x, client_y, &self.viewport);
    }

    /// Replace the viewport and refit the camera projection.
    pub fn on_resize(&mut self, viewport: ViewportState) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        self.camera.update_projection_matrix();
    }

    /// Apply the load result. A second completion is rejected.
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> Result<LoadTransition, SceneError> {
        if self.load != LoadState::Pending {
            return Err(SceneError::AlreadyLoaded);
        }
        match outcome {
            LoadOutcome::Loaded(mut model) => {
                model.set_shadows(true, true);
                model.root.set_uniform_scale(self.device.load_scale());
                if !self.scene.attach_subject(model) {
                    return Err(SceneError::AlreadyLoaded);
                }
                self.load = LoadState::Ready;
                let mut reveal = build_reveal_timeline(self.device);
                reveal.play();
                self.reveal = Some(reveal);
                log::info!("[scene] subject loaded, reveal started");
                Ok(LoadTransition::StartLoop)
            }
            LoadOutcome::Failed(err) => {
                log::error!("[scene] model load failed: {}", err);
                self.load = LoadState::Failed(err);
                Ok(LoadTransition::Stalled)
            }
        }
    }

    /// Advance one frame at `elapsed` seconds since construction, `dt` since
    /// the previous frame. Returns `false` without touching any state while
    /// no subject is attached.
    pub fn frame(&mut self, elapsed: f32, dt: f32) -> bool {
        if !self.is_ready() {
            return false;
        }
        let Some(subject) = self.scene.subject_mut() else {
            return false;
        };
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.advance(dt, &mut subject.root);
        }
        motion::step_frame(
            &self.config.motion,
            elapsed,
            &mut self.pointer,
            &mut subject.root,
            &mut self.camera,
        );
        self.frames += 1;
        true
    }
}
