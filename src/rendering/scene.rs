//! Visual half of each arena box: mesh and material built from a [`BoxSpec`].
use bevy::prelude::*;

use crate::gameplay::entities::BoxSpec;

/// Multiplier on emissive colors, in linear units.
const EMISSIVE_STRENGTH: f32 = 2.0;

pub fn box_material(spec: &BoxSpec) -> StandardMaterial {
    StandardMaterial {
        base_color: spec.color,
        emissive: spec.emissive.map_or(LinearRgba::BLACK, |c| c.to_linear() * EMISSIVE_STRENGTH),
        perceptual_roughness: 0.8,
        ..default()
    }
}

/// Mesh, material and initial transform for a box; the transform is overwritten
/// by the pose sync every frame afterwards.
pub fn box_visual(
    spec: &BoxSpec,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> (Mesh3d, MeshMaterial3d<StandardMaterial>, Transform) {
    let size = spec.half_extents * 2.0;
    (
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(materials.add(box_material(spec))),
        Transform::from_translation(spec.position),
    )
}
