//! Hoverdrive Physics - Physics simulation using rapier3d
//!
//! Provides the rigid body world, ground colliders on a dedicated collision
//! layer, and the capability traits the hover controller drives.

mod body;

pub use body::{BodyControl, BodyState, GroundContact, GroundQuery};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;
use tracing::debug;

/// Collision layers, as bit masks over rapier interaction groups
pub mod layers {
    /// Walkable terrain the ground probe may hit
    pub const GROUND: u32 = 1 << 0;
    /// Hover vehicles, never reported by ground probes
    pub const VEHICLE: u32 = 1 << 1;
    /// Every layer
    pub const ALL: u32 = u32::MAX;
}

/// Errors raised by physics world lookups
#[derive(Debug, Clone, thiserror::Error)]
pub enum PhysicsError {
    #[error("Rigid body {0:?} does not exist")]
    BodyNotFound(RigidBodyHandle),
}

/// Physics world configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 on Y axis)
    pub gravity: Vec3,
    /// Physics timestep (default: 1/60)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: 1.0 / 60.0,
        }
    }
}

/// Parameters for spawning a hover vehicle body
#[derive(Debug, Clone)]
pub struct HoverBodyDesc {
    /// Initial world position of the body center
    pub position: Vec3,
    /// Radius of the ball collider
    pub radius: f32,
    /// Body mass in kilograms
    pub mass: f32,
}

impl Default for HoverBodyDesc {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.1, 0.0),
            radius: 0.5,
            mass: 1.0,
        }
    }
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    /// Integration parameters
    integration_parameters: IntegrationParameters,
    /// Physics pipeline
    physics_pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,
    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,
    /// Continuous collision detection solver
    ccd_solver: CCDSolver,
    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation by one fixed tick
    ///
    /// Forces added through [`BodyControl::apply_force`] act for exactly this
    /// tick and are cleared afterwards.
    pub fn step(&mut self) {
        let gravity = vector![self.config.gravity.x, self.config.gravity.y, self.config.gravity.z];

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.refresh_queries();

        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
        }
    }

    /// Rebuild the query pipeline after colliders were added or moved
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Add a dynamic rigid body with a collider
    pub fn add_dynamic_body(
        &mut self,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let rb_handle = self.rigid_body_set.insert(rigid_body);
        let col_handle =
            self.collider_set
                .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);
        (rb_handle, col_handle)
    }

    /// Spawn a hover vehicle body on the vehicle layer
    ///
    /// Rotations are locked: heading is driven directly by the controller and
    /// the body must never tip over from contact torques.
    pub fn spawn_hover_body(&mut self, desc: &HoverBodyDesc) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![desc.position.x, desc.position.y, desc.position.z])
            .lock_rotations()
            .linear_damping(0.0)
            .build();
        let collider = ColliderBuilder::ball(desc.radius)
            .mass(desc.mass)
            .friction(0.0)
            .restitution(0.0)
            .collision_groups(groups(layers::VEHICLE, layers::ALL))
            .build();

        let (handle, _) = self.add_dynamic_body(rigid_body, collider);
        self.refresh_queries();
        debug!(?handle, position = ?desc.position, "Spawned hover body");
        handle
    }

    /// Remove a rigid body and its colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Get a rigid body by handle
    pub fn body(&self, handle: RigidBodyHandle) -> Result<&RigidBody, PhysicsError> {
        self.rigid_body_set
            .get(handle)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get a mutable rigid body by handle
    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Result<&mut RigidBody, PhysicsError> {
        self.rigid_body_set
            .get_mut(handle)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .collision_groups(groups(layers::GROUND, layers::ALL))
            .build();
        let handle = self.add_static_collider(ground);
        self.refresh_queries();
        handle
    }

    /// Create a static box collider on the ground layer
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.7)
            .collision_groups(groups(layers::GROUND, layers::ALL))
            .build();
        let handle = self.add_static_collider(collider);
        self.refresh_queries();
        handle
    }

    /// Create a ramp: a static box tilted about the Z axis by `angle_degrees`
    pub fn create_ramp(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        angle_degrees: f32,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .rotation(vector![0.0, 0.0, angle_degrees.to_radians()])
            .friction(0.7)
            .collision_groups(groups(layers::GROUND, layers::ALL))
            .build();
        let handle = self.add_static_collider(collider);
        self.refresh_queries();
        handle
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Build interaction groups from layer masks
fn groups(memberships: u32, filter: u32) -> InteractionGroups {
    InteractionGroups::new(
        Group::from_bits_truncate(memberships),
        Group::from_bits_truncate(filter),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_world_creation() {
        let world = PhysicsWorld::new();
        assert_eq!(world.config.gravity, Vec3::new(0.0, -9.81, 0.0));
    }

    #[test]
    fn test_ground_creation() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_ground(0.0);
        assert!(world.get_collider(ground).is_some());
    }

    #[test]
    fn test_missing_body_is_an_error() {
        let mut world = PhysicsWorld::new();
        let handle = world.spawn_hover_body(&HoverBodyDesc::default());
        world.remove_rigid_body(handle);

        assert!(matches!(world.body(handle), Err(PhysicsError::BodyNotFound(_))));
    }

    #[test]
    fn test_forces_last_one_tick() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig {
            gravity: Vec3::ZERO,
            ..PhysicsConfig::default()
        });
        let handle = world.spawn_hover_body(&HoverBodyDesc {
            position: Vec3::new(0.0, 5.0, 0.0),
            ..HoverBodyDesc::default()
        });

        BodyControl::apply_force(world.body_mut(handle).unwrap(), Vec3::new(60.0, 0.0, 0.0));
        world.step();
        let after_push = BodyState::velocity(world.body(handle).unwrap()).x;
        assert!(after_push > 0.0);

        world.step();
        let coasting = BodyState::velocity(world.body(handle).unwrap()).x;
        assert!((coasting - after_push).abs() < 1e-4);
    }
}
