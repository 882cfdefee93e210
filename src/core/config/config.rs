use anyhow::Context;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Button Rush".into(),
        }
    }
}

/// Tunables of the round: timer, scoring and the forces produced by held keys.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub target_score: u32,
    /// Round length in seconds.
    pub round_time: f32,
    /// Force added per held direction key (not normalized on diagonals).
    pub move_force: f32,
    /// Upward impulse applied every frame the jump key is held.
    pub jump_impulse: f32,
    /// Player/button centre distance below which a hit registers.
    pub hit_distance: f32,
    /// Minimum real seconds between two registered hits.
    pub hit_cooldown: f32,
    /// Real seconds the button stays squashed after a hit.
    pub pulse_duration: f32,
    pub pulse_scale_y: f32,
}
impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            target_score: 10,
            round_time: 30.0,
            move_force: 10.0,
            jump_impulse: 2.0,
            hit_distance: 1.0,
            hit_cooldown: 0.3,
            pulse_duration: 0.1,
            pulse_scale_y: 0.6,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: [f32; 3],
    /// Internal sub-step of the solver, seconds.
    pub fixed_timestep: f32,
    /// Upper bound on sub-steps run by a single frame.
    pub max_sub_steps: u32,
    pub ground_player_friction: f32,
    pub ground_player_restitution: f32,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            // low gravity, the arena floats in space
            gravity: [0.0, -3.0, 0.0],
            fixed_timestep: 1.0 / 60.0,
            max_sub_steps: 10,
            ground_player_friction: 0.4,
            ground_player_restitution: 0.3,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    pub ground_half_extents: [f32; 3],
    pub ground_position: [f32; 3],
    pub ground_color: u32,
    pub wall_half_height: f32,
    pub wall_half_thickness: f32,
    pub wall_color: u32,
}
impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            ground_half_extents: [10.0, 0.5, 10.0],
            ground_position: [0.0, -0.5, 0.0],
            ground_color: 0x222244,
            wall_half_height: 2.0,
            wall_half_thickness: 0.5,
            wall_color: 0x111122,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub start: [f32; 3],
    pub half_extents: [f32; 3],
    pub mass: f32,
    pub color: u32,
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: [0.0, 1.0, 5.0],
            half_extents: [0.5, 0.5, 0.5],
            mass: 1.0,
            color: 0x33ccff,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ButtonConfig {
    pub position: [f32; 3],
    pub half_extents: [f32; 3],
    pub color: u32,
    pub emissive: u32,
}
impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.25, -5.0],
            half_extents: [0.5, 0.25, 0.5],
            color: 0xff3366,
            emissive: 0xff3366,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub clear_color: u32,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 5.0, 10.0],
            look_at: [0.0, 0.0, 0.0],
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            clear_color: 0x020416,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_brightness: f32,
    pub sun_illuminance: f32,
    pub sun_position: [f32; 3],
    pub shadows: bool,
}
impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_brightness: 300.0,
            sun_illuminance: 4_000.0,
            sun_position: [4.0, 8.0, 2.0],
            shadows: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub rules: RulesConfig,
    pub physics: PhysicsConfig,
    pub arena: ArenaConfig,
    pub player: PlayerConfig,
    pub button: ButtonConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
}

/// `[x, y, z]` config triple as a Bevy vector.
pub fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

/// `0xRRGGBB` config color as an sRGB Bevy color.
pub fn hex_color(rgb: u32) -> Color {
    Color::srgb_u8(
        ((rgb >> 16) & 0xff) as u8,
        ((rgb >> 8) & 0xff) as u8,
        (rgb & 0xff) as u8,
    )
}

impl GameConfig {
    /// Parse a RON document.
    pub fn from_ron_str(data: &str) -> anyhow::Result<Self> {
        ron::from_str(data).context("parse RON config")
    }

    /// Load from a single RON file (errors contain human-readable context).
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_ron_str(&data).with_context(|| format!("load config {}", path.display()))
    }

    /// Load file; on failure returns default config plus error string.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(format!("{e:#}"))),
        }
    }

    /// Load multiple layers; later overrides earlier (deep merge).
    /// Missing or unparsable layers are skipped and reported in `errors`;
    /// returns (config, used_paths, errors).
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();

        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }

        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }

        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (GameConfig::default(), used, errors)
            }
        }
    }

    /// Produce validation warnings (non-fatal) for suspicious values.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }

        let r = &self.rules;
        if r.target_score == 0 {
            w.push("rules.target_score is 0; the round is won on the first hit".into());
        }
        if r.round_time <= 0.0 {
            w.push(format!("rules.round_time {} must be > 0", r.round_time));
        }
        if r.move_force < 0.0 {
            w.push("rules.move_force negative -> controls inverted".into());
        }
        if r.jump_impulse < 0.0 {
            w.push("rules.jump_impulse negative -> jump pushes down".into());
        }
        if r.hit_distance <= 0.0 {
            w.push("rules.hit_distance must be > 0; no hit can register".into());
        }
        if r.hit_cooldown < 0.0 {
            w.push("rules.hit_cooldown negative".into());
        }
        if r.pulse_duration < 0.0 {
            w.push("rules.pulse_duration negative".into());
        }
        if r.pulse_scale_y <= 0.0 {
            w.push(format!("rules.pulse_scale_y {} must be > 0", r.pulse_scale_y));
        }

        let p = &self.physics;
        if p.fixed_timestep <= 0.0 {
            w.push("physics.fixed_timestep must be > 0".into());
        } else if p.fixed_timestep > 0.1 {
            w.push(format!(
                "physics.fixed_timestep {} very large; instability possible",
                p.fixed_timestep
            ));
        }
        if p.max_sub_steps == 0 {
            w.push("physics.max_sub_steps is 0; the world never advances".into());
        }
        if p.ground_player_friction < 0.0 {
            w.push("physics.ground_player_friction negative".into());
        }
        if !(0.0..=1.0).contains(&p.ground_player_restitution) {
            w.push(format!(
                "physics.ground_player_restitution {} outside 0..1",
                p.ground_player_restitution
            ));
        }

        fn check_extents(w: &mut Vec<String>, label: &str, e: [f32; 3]) {
            if e.iter().any(|c| *c <= 0.0) {
                w.push(format!("{label} must be > 0 on every axis, got {e:?}"));
            }
        }
        check_extents(&mut w, "arena.ground_half_extents", self.arena.ground_half_extents);
        check_extents(&mut w, "player.half_extents", self.player.half_extents);
        check_extents(&mut w, "button.half_extents", self.button.half_extents);
        if self.arena.wall_half_height <= 0.0 || self.arena.wall_half_thickness <= 0.0 {
            w.push("arena wall dimensions must be > 0".into());
        }
        if self.player.mass <= 0.0 {
            w.push("player.mass must be > 0; a zero mass player cannot move".into());
        }

        let c = &self.camera;
        if c.near <= 0.0 || c.near >= c.far {
            w.push(format!("camera near/far invalid ({} / {})", c.near, c.far));
        }
        if !(1.0..179.0).contains(&c.fov_degrees) {
            w.push(format!("camera.fov_degrees {} outside 1..179", c.fov_degrees));
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_sample_config() {
        let sample = r#"(
            window: (width: 800.0, height: 600.0, title: "Test"),
            rules: (target_score: 5, round_time: 12.5, hit_cooldown: 0.5),
            physics: (gravity: (0.0, -9.8, 0.0), max_sub_steps: 4),
            player: (start: (1.0, 2.0, 3.0), color: 0x00ff00),
        )"#;
        let cfg = GameConfig::load_from_file(write_temp(sample).path()).expect("parse config");
        assert_eq!(cfg.window.width, 800.0);
        assert_eq!(cfg.rules.target_score, 5);
        assert_eq!(cfg.rules.round_time, 12.5);
        assert_eq!(cfg.rules.move_force, RulesConfig::default().move_force);
        assert_eq!(cfg.physics.gravity, [0.0, -9.8, 0.0]);
        assert_eq!(cfg.physics.max_sub_steps, 4);
        assert_eq!(cfg.player.start, [1.0, 2.0, 3.0]);
        assert_eq!(cfg.player.color, 0x00ff00);
        assert!(cfg.validate().is_empty(), "expected no warnings: {:?}", cfg.validate());
    }

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_empty());
    }

    #[test]
    fn validate_detects_warnings() {
        let mut bad = GameConfig::default();
        bad.window.width = -1.0;
        bad.rules.round_time = 0.0;
        bad.rules.hit_distance = 0.0;
        bad.physics.fixed_timestep = 0.0;
        bad.physics.max_sub_steps = 0;
        bad.physics.ground_player_restitution = 1.5;
        bad.player.half_extents = [0.5, 0.0, 0.5];
        bad.player.mass = 0.0;
        bad.camera.near = 200.0;
        let joined = bad.validate().join(" | ");
        assert!(joined.contains("window dimensions must be > 0"));
        assert!(joined.contains("rules.round_time"));
        assert!(joined.contains("rules.hit_distance"));
        assert!(joined.contains("physics.fixed_timestep must be > 0"));
        assert!(joined.contains("physics.max_sub_steps is 0"));
        assert!(joined.contains("ground_player_restitution"));
        assert!(joined.contains("player.half_extents"));
        assert!(joined.contains("player.mass"));
        assert!(joined.contains("camera near/far"));
    }

    #[test]
    fn load_or_default_missing_file() {
        let (cfg, err) = GameConfig::load_or_default("this/file/does/not/exist.ron");
        assert!(err.is_some());
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn load_from_file_reports_path() {
        let err = GameConfig::load_from_file("nope/game.ron").unwrap_err();
        assert!(format!("{err:#}").contains("nope/game.ron"));
    }

    #[test]
    fn layered_merge_overrides() {
        let base = r"(
            window: (width: 900.0),
            rules: (round_time: 45.0, target_score: 12),
        )";
        let override_one = r#"(
            window: (title: "Custom Title"),
            rules: (target_score: 3),
        )"#;
        let (cfg, used, errors) = GameConfig::load_layered([
            write_temp(base).path().to_path_buf(),
            write_temp(override_one).path().to_path_buf(),
        ]);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.window.width, 900.0);
        assert_eq!(cfg.window.title, "Custom Title");
        assert_eq!(cfg.rules.round_time, 45.0);
        assert_eq!(cfg.rules.target_score, 3);
        assert_eq!(cfg.window.height, WindowConfig::default().height);
    }

    #[test]
    fn layered_skips_missing_layers() {
        let base = r"(rules: (round_time: 10.0))";
        let (cfg, used, errors) = GameConfig::load_layered([
            write_temp(base).path().to_path_buf(),
            std::path::PathBuf::from("missing/override.ron"),
        ]);
        assert_eq!(used.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(cfg.rules.round_time, 10.0);
    }

    #[test]
    fn hex_color_splits_channels() {
        let c = hex_color(0xff3366).to_srgba();
        assert!((c.red - 1.0).abs() < 1e-6);
        assert!((c.green - 0x33 as f32 / 255.0).abs() < 1e-6);
        assert!((c.blue - 0x66 as f32 / 255.0).abs() < 1e-6);
    }

    // Helper: create a temp file with given contents; returns handle (kept for lifetime)
    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        f.write_all(contents.as_bytes()).unwrap();
        f
    }
}
