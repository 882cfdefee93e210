pub mod camera;
pub mod hud;
pub mod scene;

pub use camera::{aspect_ratio, CameraPlugin, GameCamera};
pub use hud::HudPlugin;
