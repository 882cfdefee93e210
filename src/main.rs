// This file is part of Button Rush.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use clap::Parser;

use button_rush::interaction::inputmap::InputConfigPath;
use button_rush::{GameConfig, GamePlugin};

#[derive(Parser, Debug)]
#[command(about = "Push the cube onto the button before time runs out", version)]
struct Args {
    /// RON config layer; repeat to stack overrides (later wins).
    #[arg(long = "config", default_value = "assets/config/game.ron")]
    config: Vec<String>,
    /// Key binding file.
    #[arg(long, default_value = "assets/config/input.toml")]
    input: String,
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(args: &Args) -> (GameConfig, Vec<String>, Vec<String>) {
    GameConfig::load_layered(args.config.iter())
}

#[cfg(target_arch = "wasm32")]
fn load_config(_args: &Args) -> (GameConfig, Vec<String>, Vec<String>) {
    match GameConfig::from_ron_str(include_str!("../assets/config/game.ron")) {
        Ok(cfg) => (cfg, vec!["<embedded game.ron>".into()], Vec::new()),
        Err(e) => (GameConfig::default(), Vec::new(), vec![format!("{e:#}")]),
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
    }

    #[cfg(not(target_arch = "wasm32"))]
    let args = Args::parse();
    #[cfg(target_arch = "wasm32")]
    let args = Args::parse_from(["button_rush"]);

    let (cfg, used, errors) = load_config(&args);

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                #[cfg(target_arch = "wasm32")]
                canvas: Some("#bevy".into()),
                #[cfg(target_arch = "wasm32")]
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        }),
    );

    // Logging is only live once LogPlugin has been built.
    for e in errors {
        warn!("CONFIG LOAD ISSUE: {e}");
    }
    if used.is_empty() {
        info!("No config layers found; using defaults");
    } else {
        info!(?used, "Config layers loaded");
    }
    for w in cfg.validate() {
        warn!("CONFIG WARNING: {w}");
    }
    info!(?cfg.window, target_score = cfg.rules.target_score, round_time = cfg.rules.round_time, "Round settings");

    app.insert_resource(cfg)
        .insert_resource(InputConfigPath(args.input))
        .add_plugins(GamePlugin)
        .run();
}
