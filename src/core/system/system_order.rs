//! Central system ordering labels to make the per-frame sequence explicit.
//! Stages (chained, all in `Update`):
//! 1. InputCollect (drain keyboard events into `InputState`)
//! 2. Rules (round timer, forces / impulses, hits, win & lose)
//! 3. PhysicsStep (advance the rigid-body world by the frame's real dt)
//! 4. Sync (copy body poses onto their meshes)
//! 5. Presentation (HUD text, button pulse expiry)
//! 6. Rendering (implicit, Bevy render schedule)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum FrameSet {
    InputCollect,
    Rules,
    PhysicsStep,
    Sync,
    Presentation,
}

/// Registers the frame sets in their fixed order.
pub fn configure_frame_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FrameSet::InputCollect,
            FrameSet::Rules,
            FrameSet::PhysicsStep,
            FrameSet::Sync,
            FrameSet::Presentation,
        )
            .chain(),
    );
}
