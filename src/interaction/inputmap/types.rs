use bevy::prelude::*;
use std::collections::HashMap;

/// Logical game action a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action { Forward, Back, Left, Right, Jump }

impl Action {
    pub const ALL: [Action; 5] = [Action::Forward, Action::Back, Action::Left, Action::Right, Action::Jump];

    pub fn name(self) -> &'static str { match self { Action::Forward => "forward", Action::Back => "back", Action::Left => "left", Action::Right => "right", Action::Jump => "jump" } }

    pub fn from_name(name: &str) -> Option<Self> { Action::ALL.into_iter().find(|a| a.name().eq_ignore_ascii_case(name)) }
}

/// Lower-cases a key name; `space` is accepted as an alias for `" "`.
pub fn normalize_key_name(name: &str) -> String {
    let lower = name.to_lowercase();
    if lower == "space" { " ".to_string() } else { lower }
}

/// Pressed state per key name (case-insensitive). Last write wins; keys never seen read as released.
#[derive(Resource, Debug, Default, Clone)]
pub struct InputState { keys: HashMap<String, bool> }

impl InputState {
    pub fn set(&mut self, key: &str, pressed: bool) { self.keys.insert(key.to_lowercase(), pressed); }
    pub fn pressed(&self, key: &str) -> bool { self.keys.get(&key.to_lowercase()).copied().unwrap_or(false) }
    pub fn any_pressed<'a>(&self, keys: impl IntoIterator<Item = &'a String>) -> bool { keys.into_iter().any(|k| self.pressed(k)) }
}

/// Snapshot of the held actions for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls { pub forward: bool, pub back: bool, pub left: bool, pub right: bool, pub jump: bool }

/// Key names bound to each action.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct KeyBindings { map: HashMap<Action, Vec<String>> }

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(Action::Forward, vec!["w".to_string(), "arrowup".to_string()]);
        map.insert(Action::Back, vec!["s".to_string(), "arrowdown".to_string()]);
        map.insert(Action::Left, vec!["a".to_string(), "arrowleft".to_string()]);
        map.insert(Action::Right, vec!["d".to_string(), "arrowright".to_string()]);
        map.insert(Action::Jump, vec![" ".to_string()]);
        Self { map }
    }
}

impl KeyBindings {
    pub fn keys(&self, action: Action) -> &[String] { self.map.get(&action).map(Vec::as_slice).unwrap_or(&[]) }

    pub fn set(&mut self, action: Action, keys: Vec<String>) { self.map.insert(action, keys.iter().map(|k| normalize_key_name(k)).collect()); }

    pub fn held(&self, action: Action, input: &InputState) -> bool { input.any_pressed(self.keys(action)) }

    pub fn controls(&self, input: &InputState) -> Controls {
        Controls {
            forward: self.held(Action::Forward, input),
            back: self.held(Action::Back, input),
            left: self.held(Action::Left, input),
            right: self.held(Action::Right, input),
            jump: self.held(Action::Jump, input),
        }
    }
}
