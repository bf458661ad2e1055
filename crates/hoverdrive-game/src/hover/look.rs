//! Look control: body yaw and clamped camera pitch

use glam::Vec2;
use hoverdrive_physics::BodyControl;

use super::HoverConfig;
use crate::camera::CameraRig;

/// Axis the body turns about. Positive look x turns right (clockwise seen
/// from above) in the right-handed, Y-up world.
pub const YAW_AXIS: glam::Vec3 = glam::Vec3::NEG_Y;

/// Accumulates vertical look into a clamped pitch and turns the body
#[derive(Debug, Clone, Default)]
pub struct LookController {
    /// Pitch in degrees, positive looks down
    pitch: f32,
    /// Whether |pitch| exceeds the extreme threshold
    looking_extreme: bool,
}

impl LookController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn is_looking_extreme(&self) -> bool {
        self.looking_extreme
    }

    /// Degrees of yaw for one frame of look input
    pub fn yaw_step(look: Vec2, config: &HoverConfig) -> f32 {
        look.x * config.sensitivity / 100.0
    }

    /// Fold one frame of vertical look into the pitch accumulator
    pub fn accumulate_pitch(&mut self, look_y: f32, config: &HoverConfig) -> f32 {
        let delta = -look_y * config.sensitivity / 100.0;
        if delta.is_finite() {
            self.pitch = (self.pitch + delta).clamp(-config.pitch_limit, config.pitch_limit);
        }
        self.pitch
    }

    /// Recompute the extreme-pitch flag from the current accumulator
    pub fn refresh_extreme(&mut self, config: &HoverConfig) -> bool {
        self.looking_extreme = self.pitch.abs() > config.extreme_pitch;
        self.looking_extreme
    }

    /// Turn the body, update pitch, and write pitch to the camera's X channel
    pub fn apply<B: BodyControl + ?Sized>(
        &mut self,
        look: Vec2,
        config: &HoverConfig,
        body: &mut B,
        camera: &mut CameraRig,
    ) {
        let yaw = Self::yaw_step(look, config);
        if yaw.is_finite() {
            body.rotate(YAW_AXIS, yaw);
        }

        let pitch = self.accumulate_pitch(look.y, config);
        camera.set_pitch(pitch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_stays_clamped() {
        let config = HoverConfig::default();
        let mut look = LookController::new();

        for look_y in [-1.0e6, 3.0, 1.0e6, -0.5, 250.0, -700.0, f32::MAX, f32::MIN] {
            look.accumulate_pitch(look_y, &config);
            assert!((-90.0..=90.0).contains(&look.pitch()), "pitch {}", look.pitch());
        }
    }

    #[test]
    fn test_clamp_saturates() {
        let config = HoverConfig::default();
        let mut look = LookController::new();

        look.accumulate_pitch(-1.0e4, &config);
        assert_eq!(look.pitch(), 90.0);
        look.accumulate_pitch(-1.0e4, &config);
        assert_eq!(look.pitch(), 90.0);

        look.accumulate_pitch(1.0e4, &config);
        assert_eq!(look.pitch(), -90.0);
    }

    #[test]
    fn test_non_finite_input_is_ignored() {
        let config = HoverConfig::default();
        let mut look = LookController::new();
        look.accumulate_pitch(-10.0, &config);
        look.accumulate_pitch(f32::NAN, &config);
        look.accumulate_pitch(f32::INFINITY, &config);
        assert!((look.pitch() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_extreme_flag_threshold() {
        let config = HoverConfig::default();
        let sensitivity_scale = config.sensitivity / 100.0;

        for target in [-90.0f32, -80.5, -80.0, -10.0, 0.0, 45.0, 80.0, 80.5, 90.0] {
            let mut look = LookController::new();
            look.accumulate_pitch(-target / sensitivity_scale, &config);
            let extreme = look.refresh_extreme(&config);
            assert_eq!(extreme, look.pitch().abs() > 80.0, "pitch {}", look.pitch());
        }
    }

    #[test]
    fn test_yaw_step_scales_by_sensitivity() {
        let config = HoverConfig::default();
        assert!((LookController::yaw_step(Vec2::new(2.0, 0.0), &config) - 0.6).abs() < 1e-6);
    }
}
