//! Camera configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Offset of the eye from the body center, in body yaw space
    pub eye_offset: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye_offset: Vec3::new(0.0, 0.4, 0.0),
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}
