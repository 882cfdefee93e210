// This file is part of Button Rush.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::core::system::configure_frame_sets;
use crate::gameplay::state::RoundPlugin;
use crate::interaction::inputmap::plugin::InputActionsPlugin;
use crate::physics::PhysicsSetupPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::hud::HudPlugin;

/// Everything except the window and engine plugins. Expects a `GameConfig` resource
/// to be inserted first; falls back to defaults otherwise.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        configure_frame_sets(app);
        app.init_resource::<crate::core::config::GameConfig>()
            .add_plugins((
                InputActionsPlugin,
                PhysicsSetupPlugin,
                RoundPlugin,
                CameraPlugin,
                HudPlugin,
            ));
    }
}
