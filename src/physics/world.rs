//! Rigid-body world: Rapier sets + pipeline behind a handle-based API.
//!
//! The world owns the authoritative pose of every body. Callers add boxes,
//! push forces / impulses, and advance it with `step`, which accumulates real
//! elapsed time and consumes it in fixed sub-steps.

use bevy::prelude::{Quat, Resource, Vec3};
use rapier3d::prelude::*;
use std::fmt;

use super::contact::{ContactRule, ContactRules, MaterialTag};
use crate::core::config::PhysicsConfig;

/// Opaque reference to a body owned by a [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(RigidBodyHandle);

/// Position and orientation of a body, in Bevy math types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    UnknownBody(BodyHandle),
    DuplicateContactRule(MaterialTag, MaterialTag),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::UnknownBody(h) => write!(f, "unknown body handle {h:?}"),
            PhysicsError::DuplicateContactRule(a, b) => {
                write!(f, "contact rule for ({a}, {b}) already registered")
            }
        }
    }
}

impl std::error::Error for PhysicsError {}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn to_quat(r: &Rotation<Real>) -> Quat {
    let q = r.quaternion();
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[derive(Resource)]
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    contact_rules: ContactRules,
    fixed_timestep: f32,
    max_sub_steps: u32,
    accumulator: f32,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}

impl PhysicsWorld {
    pub fn new(cfg: &PhysicsConfig) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: cfg.fixed_timestep,
            ..Default::default()
        };
        Self {
            gravity: vector![cfg.gravity[0], cfg.gravity[1], cfg.gravity[2]],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            contact_rules: ContactRules::default(),
            fixed_timestep: cfg.fixed_timestep,
            max_sub_steps: cfg.max_sub_steps,
            accumulator: 0.0,
        }
    }

    pub fn gravity(&self) -> Vec3 {
        to_vec3(&self.gravity)
    }

    /// Configured internal sub-step, seconds.
    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Adds a box body with a single cuboid collider. `mass == 0` yields a fixed body.
    pub fn add_body(
        &mut self,
        half_extents: Vec3,
        mass: f32,
        position: Vec3,
        material: Option<MaterialTag>,
    ) -> BodyHandle {
        let body = if mass > 0.0 {
            RigidBodyBuilder::dynamic()
        } else {
            RigidBodyBuilder::fixed()
        }
        .translation(to_vector(position))
        .build();
        let handle = self.bodies.insert(body);

        let mut collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .user_data(material.map_or(0, MaterialTag::code))
            .active_hooks(ActiveHooks::MODIFY_SOLVER_CONTACTS);
        if mass > 0.0 {
            collider = collider.mass(mass);
        }
        self.colliders
            .insert_with_parent(collider.build(), handle, &mut self.bodies);
        BodyHandle(handle)
    }

    /// Registers the friction / restitution used when `a` touches `b`.
    pub fn add_contact_rule(
        &mut self,
        a: MaterialTag,
        b: MaterialTag,
        friction: f32,
        restitution: f32,
    ) -> Result<(), PhysicsError> {
        let rule = ContactRule {
            friction,
            restitution,
        };
        if self.contact_rules.insert(a, b, rule) {
            Ok(())
        } else {
            Err(PhysicsError::DuplicateContactRule(a, b))
        }
    }

    pub fn contact_rules(&self) -> &ContactRules {
        &self.contact_rules
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody, PhysicsError> {
        self.bodies
            .get_mut(handle.0)
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    fn body(&self, handle: BodyHandle) -> Result<&RigidBody, PhysicsError> {
        self.bodies.get(handle.0).ok_or(PhysicsError::UnknownBody(handle))
    }

    /// Continuous force at a world-space point, integrated over the next step.
    pub fn apply_force(
        &mut self,
        handle: BodyHandle,
        force: Vec3,
        point: Vec3,
    ) -> Result<(), PhysicsError> {
        let body = self.body_mut(handle)?;
        body.add_force_at_point(to_vector(force), point![point.x, point.y, point.z], true);
        Ok(())
    }

    /// Instantaneous velocity change from an impulse at a world-space point.
    pub fn apply_impulse(
        &mut self,
        handle: BodyHandle,
        impulse: Vec3,
        point: Vec3,
    ) -> Result<(), PhysicsError> {
        let body = self.body_mut(handle)?;
        body.apply_impulse_at_point(to_vector(impulse), point![point.x, point.y, point.z], true);
        Ok(())
    }

    /// Zeroes linear and angular velocity and drops forces not yet integrated.
    pub fn freeze(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        let body = self.body_mut(handle)?;
        body.reset_forces(true);
        body.reset_torques(true);
        body.set_linvel(vector![0.0, 0.0, 0.0], true);
        body.set_angvel(vector![0.0, 0.0, 0.0], true);
        Ok(())
    }

    pub fn pose(&self, handle: BodyHandle) -> Result<Pose, PhysicsError> {
        let body = self.body(handle)?;
        Ok(Pose {
            translation: to_vec3(body.translation()),
            rotation: to_quat(body.rotation()),
        })
    }

    pub fn position(&self, handle: BodyHandle) -> Result<Vec3, PhysicsError> {
        Ok(to_vec3(self.body(handle)?.translation()))
    }

    pub fn linear_velocity(&self, handle: BodyHandle) -> Result<Vec3, PhysicsError> {
        Ok(to_vec3(self.body(handle)?.linvel()))
    }

    pub fn angular_velocity(&self, handle: BodyHandle) -> Result<Vec3, PhysicsError> {
        Ok(to_vec3(self.body(handle)?.angvel()))
    }

    /// Advances the world by `elapsed` real seconds using whole `fixed_dt`
    /// sub-steps (at most `max_sub_steps`). Leftover time carries over to the
    /// next call. Forces added since the last step act on every sub-step run
    /// here and are cleared afterwards. Returns the number of sub-steps.
    pub fn step(&mut self, fixed_dt: f32, elapsed: f32) -> u32 {
        if fixed_dt <= 0.0 {
            return 0;
        }
        self.integration_parameters.dt = fixed_dt;
        self.accumulator += elapsed.max(0.0);

        let mut sub_steps = 0;
        while self.accumulator >= fixed_dt && sub_steps < self.max_sub_steps {
            self.physics_pipeline.step(
                &self.gravity,
                &self.integration_parameters,
                &mut self.island_manager,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                None,
                &self.contact_rules,
                &(),
            );
            self.accumulator -= fixed_dt;
            sub_steps += 1;
        }
        self.accumulator %= fixed_dt;

        if sub_steps > 0 {
            for (_, body) in self.bodies.iter_mut() {
                body.reset_forces(false);
            }
        }
        sub_steps
    }
}
