use super::types::*;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ParsedBindings { pub bindings: KeyBindings, pub errors: Vec<String> }

#[derive(Debug, serde::Deserialize)]
struct RootToml { bindings: Option<HashMap<String, Vec<String>>> }

/// Parses an `input.toml` binding table. Actions absent from the file keep their default keys;
/// invalid entries are reported in `errors` and skipped.
pub fn parse_bindings_toml(raw: &str) -> ParsedBindings {
    let mut result = ParsedBindings::default();
    let root: RootToml = match toml::from_str(raw) { Ok(r) => r, Err(e) => { result.errors.push(format!("Top-level parse: {e}")); return result; } };
    let Some(section) = root.bindings else { return result; };
    let mut entries: Vec<_> = section.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, keys) in entries {
        let Some(action) = Action::from_name(&name) else { result.errors.push(format!("Binding references unknown action '{name}'")); continue; };
        if keys.is_empty() { result.errors.push(format!("Action '{name}' has an empty key list")); continue; }
        if keys.iter().any(|k| k.is_empty()) { result.errors.push(format!("Action '{name}' contains an empty key name")); continue; }
        result.bindings.set(action, keys);
    }
    result
}
