use bevy::prelude::*;

use super::parse::parse_bindings_toml;
use super::systems::system_collect_keys;
use super::types::{InputState, KeyBindings};
use crate::core::system::FrameSet;

/// Path of the key binding file read at startup (native builds only).
#[derive(Resource, Debug, Clone)]
pub struct InputConfigPath(pub String);

impl Default for InputConfigPath { fn default() -> Self { Self("assets/config/input.toml".into()) } }

pub struct InputActionsPlugin;
impl Plugin for InputActionsPlugin { fn build(&self, app: &mut App) { app
        .init_resource::<InputState>()
        .init_resource::<KeyBindings>()
        .init_resource::<InputConfigPath>()
        .add_systems(PreStartup, load_key_bindings)
        .add_systems(Update, system_collect_keys.in_set(FrameSet::InputCollect)); } }

fn load_key_bindings(path: Res<InputConfigPath>, mut commands: Commands) {
    #[cfg(target_arch = "wasm32")] let raw: Option<String> = Some(include_str!("../../../assets/config/input.toml").to_string());
    #[cfg(not(target_arch = "wasm32"))] let raw: Option<String> = std::fs::read_to_string(&path.0).ok();
    let Some(raw) = raw else { info!(target: "input", "No binding file at {}, using default keys", path.0); return; };
    let parsed = parse_bindings_toml(&raw);
    for e in &parsed.errors { warn!(target: "input", "INPUT MAP ERROR: {e}"); }
    info!(target: "input", "Key bindings loaded ({} errors)", parsed.errors.len());
    commands.insert_resource(parsed.bindings);
}
