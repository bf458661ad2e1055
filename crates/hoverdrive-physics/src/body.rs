//! Capabilities the hover controller needs from the physics engine
//!
//! The controller never owns a body. It reads state through [`BodyState`],
//! mutates only through [`BodyControl`], and probes terrain through
//! [`GroundQuery`], so the same logic runs against rapier or a test fake.

use glam::{Quat, Vec3};
use nalgebra::{Quaternion, UnitQuaternion};
use rapier3d::prelude::*;

use crate::PhysicsWorld;

/// Read-only view of a rigid body
pub trait BodyState {
    /// World position of the body center
    fn position(&self) -> Vec3;

    /// Linear velocity in world space
    fn velocity(&self) -> Vec3;

    /// World orientation
    fn rotation(&self) -> Quat;

    /// Facing direction (-Z in body space)
    fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Right direction (+X in body space)
    fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Heading in degrees, clockwise seen from above, 0 = facing -Z
    fn yaw_degrees(&self) -> f32 {
        let forward = self.forward();
        forward.x.atan2(-forward.z).to_degrees()
    }
}

/// Mutating access to a rigid body
pub trait BodyControl: BodyState {
    /// Add a force acting on the body for the current tick
    fn apply_force(&mut self, force: Vec3);

    /// Rotate the body about a world-space axis by `degrees` (right-hand rule)
    fn rotate(&mut self, axis: Vec3, degrees: f32);
}

/// A ray hit against terrain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// Surface normal at the hit point
    pub normal: Vec3,
}

/// Terrain probing
pub trait GroundQuery {
    /// Cast a ray against colliders whose layer intersects `layer_mask`
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layer_mask: u32,
    ) -> Option<GroundContact>;
}

impl BodyState for RigidBody {
    fn position(&self) -> Vec3 {
        let t = self.translation();
        Vec3::new(t.x, t.y, t.z)
    }

    fn velocity(&self) -> Vec3 {
        let v = self.linvel();
        Vec3::new(v.x, v.y, v.z)
    }

    fn rotation(&self) -> Quat {
        let q = RigidBody::rotation(self);
        Quat::from_xyzw(q.i, q.j, q.k, q.w)
    }
}

impl BodyControl for RigidBody {
    fn apply_force(&mut self, force: Vec3) {
        self.add_force(vector![force.x, force.y, force.z], true);
    }

    fn rotate(&mut self, axis: Vec3, degrees: f32) {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO || degrees == 0.0 {
            return;
        }

        let turned =
            (Quat::from_axis_angle(axis, degrees.to_radians()) * BodyState::rotation(self)).normalize();
        let rotation =
            UnitQuaternion::new_normalize(Quaternion::new(turned.w, turned.x, turned.y, turned.z));
        self.set_rotation(rotation, true);
    }
}

impl GroundQuery for PhysicsWorld {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layer_mask: u32,
    ) -> Option<GroundContact> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );
        let filter = QueryFilter::default().groups(crate::groups(crate::layers::ALL, layer_mask));

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(_handle, intersection)| GroundContact {
                distance: intersection.time_of_impact,
                normal: Vec3::new(
                    intersection.normal.x,
                    intersection.normal.y,
                    intersection.normal.z,
                ),
            })
    }
}
