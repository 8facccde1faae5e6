pub mod constants;
pub mod device;
pub mod ease;
pub mod error;
pub mod frame_loop;
pub mod hero;
pub mod intro;
pub mod model;
pub mod motion;
pub mod pointer;
pub mod reveal;
pub mod scene;
pub mod state;
pub mod throttle;
pub mod timeline;
pub mod viewport;

pub use constants::*;
pub use device::*;
pub use ease::Ease;
pub use error::*;
pub use frame_loop::LoopHandle;
pub use hero::*;
pub use intro::*;
pub use model::*;
pub use motion::MotionParams;
pub use pointer::PointerState;
pub use reveal::*;
pub use scene::*;
pub use state::*;
pub use throttle::*;
pub use timeline::*;
pub use viewport::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static SHADOW_WGSL: &str = include_str!("../shaders/shadow.wgsl");
