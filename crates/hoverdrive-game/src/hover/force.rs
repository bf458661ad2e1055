//! Hover force model
//!
//! One fixed tick of thrust, height-hold and drag, combined into the single
//! force handed to the physics body.

use glam::{Vec2, Vec3};

use super::{GroundHit, HoverConfig};

/// Scale applied to the combined force together with the fixed delta.
///
/// Every gain in [`HoverConfig`] is tuned against it.
pub const FORCE_SCALE: f32 = 100.0;

/// Everything the force model reads for one tick
#[derive(Debug, Clone, Copy)]
pub struct MoveForceInputs {
    /// Raw move axis, x = strafe, y = throttle
    pub move_input: Vec2,
    /// Body forward direction
    pub forward: Vec3,
    /// Body right direction
    pub right: Vec3,
    /// Body linear velocity
    pub velocity: Vec3,
    /// Ground hit from the same frame
    pub hit: GroundHit,
    /// Fixed tick length in seconds
    pub fixed_delta: f32,
}

/// Remove the component of `v` along the unit vector `normal`
fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    v - normal * v.dot(normal)
}

/// Horizontal unit thrust direction, or zero when there is nothing to follow
pub fn move_direction(forward: Vec3, right: Vec3, move_input: Vec2) -> Vec3 {
    let direction = project_on_plane(forward, Vec3::Y) * move_input.y
        + project_on_plane(right, Vec3::Y) * move_input.x;
    direction.normalize_or_zero()
}

/// PD term pulling the body toward `height_offset` above the ground.
///
/// Zero on surfaces steeper than `max_slope_angle`, and on a degenerate
/// normal whose slope angle cannot be computed.
pub fn height_hold_force(config: &HoverConfig, hit: &GroundHit, velocity: Vec3) -> Vec3 {
    let normal = hit.normal.normalize_or_zero();
    if normal == Vec3::ZERO {
        return Vec3::ZERO;
    }

    let slope_angle = Vec3::Y.dot(normal).clamp(-1.0, 1.0).acos().to_degrees();
    if slope_angle > config.max_slope_angle {
        return Vec3::ZERO;
    }

    let error = config.height_offset - hit.distance;
    let vertical_velocity = Vec3::Y.dot(velocity);
    Vec3::Y * (error * config.offset_strength - vertical_velocity * config.offset_damper)
}

/// Net force for one fixed tick
pub fn move_force(config: &HoverConfig, inputs: &MoveForceInputs) -> Vec3 {
    let thrust = move_direction(inputs.forward, inputs.right, inputs.move_input) * config.speed;
    let hold = height_hold_force(config, &inputs.hit, inputs.velocity);
    let drag = inputs.velocity * config.drag_rate;

    (thrust + hold - drag) * (FORCE_SCALE * inputs.fixed_delta)
}
