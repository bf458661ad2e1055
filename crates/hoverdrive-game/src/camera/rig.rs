//! Camera rig following the hover body
//!
//! The rig keeps its own local Euler angles in degrees. Yaw and position are
//! recomputed from the body every frame instead of inheriting them through a
//! transform hierarchy; the look controller only ever writes pitch.

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::CameraConfig;

/// First-person camera mounted on the hover body
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Configuration
    pub config: CameraConfig,
    /// Pitch in degrees, positive looks down
    pitch: f32,
    /// Heading in degrees, clockwise seen from above
    yaw: f32,
    /// Roll in degrees, externally owned
    roll: f32,
    /// World position of the eye
    position: Vec3,
}

impl CameraRig {
    /// Create a new camera rig
    pub fn new() -> Self {
        Self::with_config(CameraConfig::default())
    }

    /// Create a camera rig with custom config
    pub fn with_config(config: CameraConfig) -> Self {
        Self {
            config,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            position: Vec3::ZERO,
        }
    }

    /// Local Euler angles as (pitch, yaw, roll) in degrees
    pub fn euler(&self) -> Vec3 {
        Vec3::new(self.pitch, self.yaw, self.roll)
    }

    /// Overwrite all three Euler angles
    pub fn set_euler(&mut self, euler: Vec3) {
        self.pitch = euler.x;
        self.yaw = euler.y;
        self.roll = euler.z;
    }

    /// Write the X channel only; yaw and roll are left untouched
    pub fn set_pitch(&mut self, degrees: f32) {
        self.pitch = degrees;
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    /// Eye position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Re-derive yaw and eye position from the body this frame
    pub fn follow_body(&mut self, body_position: Vec3, body_yaw_degrees: f32) {
        self.yaw = body_yaw_degrees;
        self.position = body_position + self.yaw_rotation() * self.config.eye_offset;
    }

    /// Heading-only rotation
    pub fn yaw_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw.to_radians())
    }

    /// Full orientation: yaw, then pitch, then roll
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            -self.pitch.to_radians(),
            -self.roll.to_radians(),
        )
    }

    /// Get the camera's forward direction
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Get the camera's right direction
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Get the camera's up direction
    pub fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }

    /// Get a projection matrix
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov_degrees.to_radians(),
            aspect_ratio,
            self.config.near,
            self.config.far,
        )
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_set_pitch_preserves_yaw_and_roll() {
        let mut rig = CameraRig::new();
        rig.set_euler(Vec3::new(10.0, 45.0, 5.0));
        rig.set_pitch(0.3);
        assert_eq!(rig.euler(), Vec3::new(0.3, 45.0, 5.0));
    }

    #[test]
    fn test_follow_body_recomputes_yaw_and_eye() {
        let mut rig = CameraRig::new();
        rig.set_pitch(20.0);
        rig.follow_body(Vec3::new(1.0, 2.0, 3.0), 90.0);

        assert_eq!(rig.yaw(), 90.0);
        assert_eq!(rig.pitch(), 20.0);
        assert!(approx(rig.position(), Vec3::new(1.0, 2.4, 3.0)));
    }

    #[test]
    fn test_forward_follows_heading() {
        let mut rig = CameraRig::new();
        assert!(approx(rig.forward(), Vec3::NEG_Z));

        rig.follow_body(Vec3::ZERO, 90.0);
        assert!(approx(rig.forward(), Vec3::X));
    }

    #[test]
    fn test_positive_pitch_looks_down() {
        let mut rig = CameraRig::new();
        rig.set_pitch(90.0);
        assert!(approx(rig.forward(), Vec3::NEG_Y));

        rig.set_pitch(-90.0);
        assert!(approx(rig.forward(), Vec3::Y));
    }

    #[test]
    fn test_view_matrix_maps_eye_to_origin() {
        let mut rig = CameraRig::new();
        rig.follow_body(Vec3::new(5.0, 0.0, -2.0), 30.0);
        let eye = rig.view_matrix().transform_point3(rig.position());
        assert!(approx(eye, Vec3::ZERO));
    }
}
