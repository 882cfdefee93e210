pub mod config;

pub use config::{
    hex_color, vec3, ArenaConfig, ButtonConfig, CameraConfig, GameConfig, LightingConfig,
    PhysicsConfig, PlayerConfig, RulesConfig, WindowConfig,
};
