// Shared scene/motion/choreography tuning constants used by the web frontend.

// Asset
pub const MODEL_URL: &str = "./obj/cushion.glb";

// Viewport
pub const MAX_PIXEL_RATIO: f64 = 2.0;
// Guaranteed 2D texture size under default WebGPU limits; the renderer
// further caps to the adapter's reported limit.
pub const MAX_TEXTURE_DIMENSION: u32 = 8192;

// Camera
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 9.0;
pub const CAMERA_X_COMPACT: f32 = 1.0;
pub const CAMERA_X_WIDE: f32 = 0.0;

// Pointer parallax damping (fraction of remaining distance covered per frame)
pub const POINTER_DAMPING_X: f32 = 0.004;
pub const POINTER_DAMPING_Y: f32 = 0.003;

// Subject placement and idle motion
pub const SUBJECT_TOP_X: f32 = 0.9;
pub const IDLE_BOB_RATE: f32 = 0.0025; // y += sin(t) * rate per frame
pub const IDLE_SPIN_RATE: f32 = 0.0015; // rot.y += cos(t) * rate per frame

// Subject scale: applied at load, then eased to the reveal target
pub const LOAD_SCALE_COMPACT: f32 = 1.0;
pub const LOAD_SCALE_WIDE: f32 = 3.0;
pub const REVEAL_SCALE_COMPACT: f32 = 0.3;
pub const REVEAL_SCALE_WIDE: f32 = 0.5;

// Reveal timeline (seconds on the timeline clock)
pub const REVEAL_DEFAULT_DURATION: f32 = 0.6;
pub const REVEAL_SCALE_AT: f32 = 1.8;
pub const REVEAL_SCALE_DURATION: f32 = 2.6;
pub const REVEAL_ROTATE_AT: f32 = 4.4;
pub const REVEAL_ROTATE_DURATION: f32 = 1.6;
pub const REVEAL_ROTATION: f32 = -0.3;

// Intro timeline (seconds on the timeline clock)
pub const INTRO_DEFAULT_DURATION: f32 = 0.8;
pub const INTRO_HEADING_IN_AT: f32 = 0.2;
pub const INTRO_HEADING_IN_DURATION: f32 = 1.0;
pub const INTRO_HEADING_OUT_AT: f32 = 1.8;
pub const INTRO_HEADING_OUT_DURATION: f32 = 0.5;
pub const INTRO_HEADING_OUT_Y_PCT: f32 = -140.0;
pub const INTRO_TITLE_SNAP_AT: f32 = 2.3;
pub const INTRO_FINAL_AT: f32 = 3.3;
// Resting state before the reveal, used when the heading or first link has
// no `data-mv-from` attribute. Page CSS must hide the elements the same way.
pub const INTRO_HEADING_START_Y_PCT: f32 = 100.0;
pub const INTRO_LINKS_START_OPACITY: f32 = 0.0;

// Title placement after the snap (percent of the containing block)
pub const TITLE_POS_COMPACT: [f32; 2] = [50.0, 15.0];
pub const TITLE_POS_WIDE: [f32; 2] = [25.0, 19.0];

// Ground plane
pub const GROUND_SIZE: f32 = 50.0;
pub const GROUND_Z: f32 = -4.0;
pub const GROUND_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// Directional lights: [x, y, z, intensity]
pub const LIGHTS: [[f32; 4]; 3] = [
    [4.0, 1.0, 0.0, 5.0],
    [1.0, 3.0, 2.0, 4.0],
    [0.0, 1.0, 1.0, 2.0],
];
// Light indices that cast shadows; index 3 has no light and is ignored
pub const SHADOW_CASTER_INDICES: [usize; 3] = [0, 2, 3];
pub const SHADOW_HALF_EXTENT: f32 = 50.0;
pub const SHADOW_NEAR: f32 = 0.5;
pub const SHADOW_FAR: f32 = 500.0;
pub const SHADOW_MAP_SIZE: u32 = 4096;

// Events
pub const RESIZE_THROTTLE_MS: f64 = 100.0;

// Renderer
pub const MSAA_SAMPLES: u32 = 4;
