pub mod app;
pub mod core;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use core::config::{config::GameConfig, config::WindowConfig};
pub use gameplay::rules::{Outcome, Phase, RoundState};
pub use app::game::GamePlugin;
