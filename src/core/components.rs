use bevy::prelude::*;

/// What a box in the arena is for.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxRole {
    Ground,
    Wall,
    Player,
    /// The target the player must touch to score.
    Button,
}

/// Marker for the mesh mirroring the target button.
#[derive(Component, Debug)]
pub struct ButtonMesh;

/// HUD text holding the current score.
#[derive(Component, Debug)]
pub struct ScoreText;

/// HUD text holding the remaining round time.
#[derive(Component, Debug)]
pub struct TimeText;

/// HUD text shown once the round has ended.
#[derive(Component, Debug)]
pub struct MessageText;
