pub mod galaxy;
pub mod rig;
pub mod tier;

pub use galaxy::*;
pub use rig::*;
pub use tier::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
