use bevy::prelude::*;
use crate::core::components::ButtonMesh;
use crate::core::config::GameConfig;
use crate::core::system::FrameSet;
use crate::gameplay::entities::{spawn_scene, sync_entity_pairs, EntityArena};
use crate::gameplay::rules::{Outcome, RoundState};
use crate::interaction::inputmap::{InputState, KeyBindings};
use crate::physics::PhysicsWorld;

/// Fired once, on the frame the round ends.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundEnded {
    pub outcome: Outcome,
    pub score: u32,
}

/// Button squash after a hit, reverted on the first frame at or after `expires_at` (real seconds).
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct ButtonPulse {
    pub expires_at: Option<f64>,
}

impl ButtonPulse {
    /// Starts (or restarts) the pulse.
    pub fn trigger(&mut self, now: f64, duration: f32) {
        self.expires_at = Some(now + duration as f64);
    }

    /// Clears an expired pulse and returns the scale the button mesh should have at `now`.
    pub fn update(&mut self, now: f64, squashed_y: f32) -> Vec3 {
        match self.expires_at {
            Some(t) if now < t => Vec3::new(1.0, squashed_y, 1.0),
            Some(_) => {
                self.expires_at = None;
                Vec3::ONE
            }
            None => Vec3::ONE,
        }
    }
}

/// Round timer, scoring and the scene's body/mesh pairs.
pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        let rules = app
            .world()
            .get_resource::<GameConfig>()
            .map(|c| c.rules)
            .unwrap_or_default();
        app.insert_resource(RoundState::new(rules))
            .init_resource::<ButtonPulse>()
            .init_resource::<EntityArena>()
            .add_event::<RoundEnded>()
            .add_systems(Startup, spawn_scene)
            .add_systems(Update, advance_round.in_set(FrameSet::Rules))
            .add_systems(Update, sync_entity_pairs.in_set(FrameSet::Sync))
            .add_systems(Update, update_button_pulse.in_set(FrameSet::Presentation));
    }
}

/// Runs the round rules on the previous step's positions and pushes the resulting
/// forces, impulses and freeze into the physics world.
pub fn advance_round(
    time: Res<Time<Real>>,
    input: Res<InputState>,
    bindings: Res<KeyBindings>,
    arena: Res<EntityArena>,
    mut world: ResMut<PhysicsWorld>,
    mut round: ResMut<RoundState>,
    mut pulse: ResMut<ButtonPulse>,
    mut ended: EventWriter<RoundEnded>,
) {
    if !round.is_active() {
        return;
    }
    let (Some(player), Some(button)) = (arena.player().copied(), arena.button().copied()) else {
        return;
    };
    let (player_pos, button_pos) = match (world.position(player.body), world.position(button.body)) {
        (Ok(p), Ok(b)) => (p, b),
        (Err(e), _) | (_, Err(e)) => {
            warn!(target: "physics", "{e}");
            return;
        }
    };

    let report = round.advance(time.delta_secs(), bindings.controls(&input), player_pos, button_pos);

    if report.hit {
        let duration = round.rules().pulse_duration;
        pulse.trigger(time.elapsed_secs_f64(), duration);
        info!(target: "round", "Hit! score {} ({:.1}s left)", round.score, round.remaining);
    }

    if let Some(outcome) = report.ended {
        if let Err(e) = world.freeze(player.body) {
            warn!(target: "physics", "{e}");
        }
        info!(target: "round", "Round ended: {:?} with score {}", outcome, round.score);
        ended.write(RoundEnded { outcome, score: round.score });
        return;
    }

    if report.force != Vec3::ZERO {
        if let Err(e) = world.apply_force(player.body, report.force, player_pos) {
            warn!(target: "physics", "{e}");
        }
    }
    if let Some(impulse) = report.impulse {
        if let Err(e) = world.apply_impulse(player.body, impulse, player_pos) {
            warn!(target: "physics", "{e}");
        }
    }
}

fn update_button_pulse(
    time: Res<Time<Real>>,
    round: Res<RoundState>,
    mut pulse: ResMut<ButtonPulse>,
    mut q: Query<&mut Transform, With<ButtonMesh>>,
) {
    let scale = pulse.update(time.elapsed_secs_f64(), round.rules().pulse_scale_y);
    for mut t in &mut q {
        if t.scale != scale {
            t.scale = scale;
        }
    }
}
