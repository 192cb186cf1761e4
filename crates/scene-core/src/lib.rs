pub mod camera;
pub mod constants;
pub mod controller;
pub mod environment;
pub mod input;
pub mod loading;
pub mod markers;
pub mod math;
pub mod rig;
pub mod scene;
pub mod tree;
pub mod vertex;

pub use camera::*;
pub use constants::*;
pub use controller::*;
pub use input::*;
pub use loading::*;
pub use markers::*;
pub use math::*;
pub use rig::*;
pub use scene::*;
pub use tree::*;
pub use vertex::*;

// Shaders bundled as string constants
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
