//! Rigid-body simulation: a Rapier 3D world owned as a Bevy resource and
//! stepped once per frame by the real elapsed time.

use bevy::prelude::*;

pub mod contact;
pub mod world;

pub use contact::{ContactRule, ContactRules, MaterialTag};
pub use world::{BodyHandle, PhysicsError, PhysicsWorld, Pose};

use crate::core::config::GameConfig;
use crate::core::system::FrameSet;

pub struct PhysicsSetupPlugin;

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        let cfg = app
            .world()
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();
        app.insert_resource(build_world(&cfg))
            .add_systems(Update, step_physics.in_set(FrameSet::PhysicsStep));
    }
}

/// Empty world with gravity, sub-stepping and the contact rule table from config.
pub fn build_world(cfg: &GameConfig) -> PhysicsWorld {
    let mut world = PhysicsWorld::new(&cfg.physics);
    if let Err(e) = world.add_contact_rule(
        MaterialTag::Ground,
        MaterialTag::Player,
        cfg.physics.ground_player_friction,
        cfg.physics.ground_player_restitution,
    ) {
        warn!(target: "physics", "{e}");
    }
    world
}

/// Advances the world by the wall-clock time since the previous frame.
pub fn step_physics(time: Res<Time<Real>>, mut world: ResMut<PhysicsWorld>) {
    let fixed_dt = world.fixed_timestep();
    world.step(fixed_dt, time.delta_secs());
}
