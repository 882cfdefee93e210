//! Arena boxes: each one a physics body paired with the mesh that mirrors it.

use bevy::prelude::*;

use crate::core::components::{BoxRole, ButtonMesh};
use crate::core::config::{hex_color, vec3, GameConfig};
use crate::physics::{BodyHandle, MaterialTag, PhysicsWorld, Pose};
use crate::rendering::scene::box_visual;

/// Description of one box created at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpec {
    pub role: BoxRole,
    pub half_extents: Vec3,
    pub position: Vec3,
    /// 0 makes the body fixed.
    pub mass: f32,
    pub color: Color,
    pub emissive: Option<Color>,
    pub material: Option<MaterialTag>,
}

/// Ground, the four enclosing walls, the player and the button, in that order.
pub fn scene_boxes(cfg: &GameConfig) -> Vec<BoxSpec> {
    let arena = &cfg.arena;
    let ground = vec3(arena.ground_half_extents);
    let wall_color = hex_color(arena.wall_color);
    let (h, t) = (arena.wall_half_height, arena.wall_half_thickness);
    let wall = |half_extents: Vec3, position: Vec3| BoxSpec {
        role: BoxRole::Wall,
        half_extents,
        position,
        mass: 0.0,
        color: wall_color,
        emissive: None,
        material: None,
    };

    let mut boxes = vec![BoxSpec {
        role: BoxRole::Ground,
        half_extents: ground,
        position: vec3(arena.ground_position),
        mass: 0.0,
        color: hex_color(arena.ground_color),
        emissive: None,
        material: Some(MaterialTag::Ground),
    }];
    boxes.extend([
        wall(Vec3::new(t, h, ground.z), Vec3::new(ground.x, h, 0.0)),
        wall(Vec3::new(t, h, ground.z), Vec3::new(-ground.x, h, 0.0)),
        wall(Vec3::new(ground.x, h, t), Vec3::new(0.0, h, ground.z)),
        wall(Vec3::new(ground.x, h, t), Vec3::new(0.0, h, -ground.z)),
    ]);
    boxes.push(BoxSpec {
        role: BoxRole::Player,
        half_extents: vec3(cfg.player.half_extents),
        position: vec3(cfg.player.start),
        mass: cfg.player.mass,
        color: hex_color(cfg.player.color),
        emissive: None,
        material: Some(MaterialTag::Player),
    });
    boxes.push(BoxSpec {
        role: BoxRole::Button,
        half_extents: vec3(cfg.button.half_extents),
        position: vec3(cfg.button.position),
        mass: 0.0,
        color: hex_color(cfg.button.color),
        emissive: Some(hex_color(cfg.button.emissive)),
        material: Some(MaterialTag::Ground),
    });
    boxes
}

/// One body and the mesh entity that mirrors it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityPair {
    pub body: BodyHandle,
    pub mesh: Entity,
    pub role: BoxRole,
}

/// Every pair in the arena. Filled once at startup, never shrunk.
#[derive(Resource, Debug, Default, Clone)]
pub struct EntityArena {
    pairs: Vec<EntityPair>,
}

impl EntityArena {
    pub fn push(&mut self, pair: EntityPair) {
        self.pairs.push(pair);
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityPair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn find(&self, role: BoxRole) -> Option<&EntityPair> {
        self.pairs.iter().find(|p| p.role == role)
    }

    pub fn player(&self) -> Option<&EntityPair> {
        self.find(BoxRole::Player)
    }

    pub fn button(&self) -> Option<&EntityPair> {
        self.find(BoxRole::Button)
    }
}

/// Adds a body per spec and pairs it with the entity returned by `spawn_mesh`.
pub fn build_arena(
    world: &mut PhysicsWorld,
    specs: &[BoxSpec],
    mut spawn_mesh: impl FnMut(&BoxSpec) -> Entity,
) -> EntityArena {
    let mut arena = EntityArena::default();
    for spec in specs {
        let body = world.add_body(spec.half_extents, spec.mass, spec.position, spec.material);
        let mesh = spawn_mesh(spec);
        arena.push(EntityPair { body, mesh, role: spec.role });
    }
    arena
}

pub fn spawn_scene(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut world: ResMut<PhysicsWorld>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let specs = scene_boxes(&cfg);
    let arena = build_arena(&mut world, &specs, |spec| {
        let mut entity = commands.spawn((box_visual(spec, &mut meshes, &mut materials), spec.role));
        if spec.role == BoxRole::Button {
            entity.insert(ButtonMesh);
        }
        entity.id()
    });
    info!(target: "scene", "Spawned {} boxes ({} bodies)", arena.len(), world.body_count());
    commands.insert_resource(arena);
}

/// Copies a body pose onto a mesh transform. Scale is left alone.
pub fn apply_pose(pose: Pose, transform: &mut Transform) {
    transform.translation = pose.translation;
    transform.rotation = pose.rotation;
}

pub fn sync_entity_pairs(
    arena: Res<EntityArena>,
    world: Res<PhysicsWorld>,
    mut transforms: Query<&mut Transform>,
) {
    for pair in arena.iter() {
        let pose = match world.pose(pair.body) {
            Ok(p) => p,
            Err(e) => {
                warn!(target: "physics", "{e}");
                continue;
            }
        };
        // Mesh may have been despawned; nothing to mirror.
        let Ok(mut transform) = transforms.get_mut(pair.mesh) else {
            continue;
        };
        apply_pose(pose, &mut transform);
    }
}
