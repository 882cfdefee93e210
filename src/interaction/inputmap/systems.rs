//! Keyboard event collection into [`InputState`].
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;
use super::types::*;

/// Logical name of a key as stored in [`InputState`]: printable characters lower-cased,
/// the space bar as `" "`, named keys by their lower-cased variant name (`arrowup`, `enter`).
pub fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(s) => Some(s.to_lowercase()),
        Key::Space => Some(" ".to_string()),
        Key::Unidentified(_) | Key::Dead(_) => None,
        other => Some(format!("{other:?}").to_lowercase()),
    }
}

pub fn system_collect_keys(mut events: EventReader<KeyboardInput>, mut input: ResMut<InputState>) {
    for ev in events.read() {
        let Some(name) = key_name(&ev.logical_key) else { continue };
        input.set(&name, ev.state == ButtonState::Pressed);
    }
}
