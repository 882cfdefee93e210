pub mod types;
pub mod parse;
pub mod plugin;
pub mod systems;

pub use parse::{parse_bindings_toml, ParsedBindings};
pub use plugin::{InputActionsPlugin, InputConfigPath};
pub use systems::key_name;
pub use types::{normalize_key_name, Action, Controls, InputState, KeyBindings};
