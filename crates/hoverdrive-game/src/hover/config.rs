//! Hover controller tuning

use hoverdrive_physics::layers;
use serde::{Deserialize, Serialize};

/// Invalid tuning values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HoverConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("pitch_limit ({0}) must not exceed 90 degrees")]
    PitchLimitTooLarge(f32),

    #[error("extreme_pitch ({extreme}) must not exceed pitch_limit ({limit})")]
    ExtremeAboveLimit { extreme: f32, limit: f32 },

    #[error("ground_layers selects no collision layer")]
    NoGroundLayers,
}

/// Largest accepted pitch clamp: straight up or straight down
pub const MAX_PITCH_LIMIT: f32 = 90.0;

/// Hover controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    /// Thrust magnitude for full move input
    pub speed: f32,
    /// Steepest surface, in degrees, the height-hold force still acts on
    pub max_slope_angle: f32,
    /// Target distance between body center and ground
    pub height_offset: f32,
    /// Spring gain of the height-hold force
    pub offset_strength: f32,
    /// Damping gain of the height-hold force
    pub offset_damper: f32,
    /// Velocity-proportional drag
    pub drag_rate: f32,
    /// Look sensitivity; one unit of look input turns `sensitivity / 100` degrees
    pub sensitivity: f32,
    /// Length of the downward ground probe
    pub ground_probe_distance: f32,
    /// Layer mask the ground probe is restricted to
    pub ground_layers: u32,
    /// Pitch clamp in degrees, symmetric around level
    pub pitch_limit: f32,
    /// Pitch magnitude beyond which the camera counts as looking straight up or down
    pub extreme_pitch: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            speed: 65.0,
            max_slope_angle: 45.0,
            height_offset: 1.1,
            offset_strength: 200.0,
            offset_damper: 10.0,
            drag_rate: 5.0,
            sensitivity: 30.0,
            ground_probe_distance: 1.1,
            ground_layers: layers::GROUND,
            pitch_limit: 90.0,
            extreme_pitch: 80.0,
        }
    }
}

impl HoverConfig {
    /// Check every value is usable by the force model
    pub fn validate(&self) -> Result<(), HoverConfigError> {
        let fields = [
            ("speed", self.speed),
            ("max_slope_angle", self.max_slope_angle),
            ("height_offset", self.height_offset),
            ("offset_strength", self.offset_strength),
            ("offset_damper", self.offset_damper),
            ("drag_rate", self.drag_rate),
            ("sensitivity", self.sensitivity),
            ("ground_probe_distance", self.ground_probe_distance),
            ("pitch_limit", self.pitch_limit),
            ("extreme_pitch", self.extreme_pitch),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(HoverConfigError::NotFinite { field, value });
            }
            if value < 0.0 {
                return Err(HoverConfigError::Negative { field, value });
            }
        }

        if self.pitch_limit > MAX_PITCH_LIMIT {
            return Err(HoverConfigError::PitchLimitTooLarge(self.pitch_limit));
        }

        if self.extreme_pitch > self.pitch_limit {
            return Err(HoverConfigError::ExtremeAboveLimit {
                extreme: self.extreme_pitch,
                limit: self.pitch_limit,
            });
        }

        if self.ground_layers == 0 {
            return Err(HoverConfigError::NoGroundLayers);
        }

        Ok(())
    }
}
