//! Frame clock for Hoverdrive
//!
//! Splits wall-clock frame deltas into variable render frames and a whole
//! number of fixed physics ticks, so the host loop can run sensing once per
//! frame and force application once per tick.

use serde::{Deserialize, Serialize};

/// Configuration for the frame clock
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for physics (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl TimeConfig {
    /// Reject values the clock cannot run with
    pub fn validate(&self) -> Result<(), TimeConfigError> {
        let fields = [
            ("time_scale", self.time_scale),
            ("fixed_timestep", self.fixed_timestep),
            ("max_delta_time", self.max_delta_time),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TimeConfigError::NotFinite { field, value });
            }
        }

        if self.fixed_timestep <= 0.0 {
            return Err(TimeConfigError::NonPositiveTimestep(self.fixed_timestep));
        }
        if self.max_delta_time < 0.0 {
            return Err(TimeConfigError::NegativeMaxDelta(self.max_delta_time));
        }
        if self.time_scale < 0.0 {
            return Err(TimeConfigError::NegativeTimeScale(self.time_scale));
        }

        Ok(())
    }
}

/// Errors raised by [`TimeConfig::validate`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("fixed_timestep must be positive, got {0}")]
    NonPositiveTimestep(f32),

    #[error("max_delta_time must not be negative, got {0}")]
    NegativeMaxDelta(f32),

    #[error("time_scale must not be negative, got {0}")]
    NegativeTimeScale(f32),
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Frame and fixed-tick time tracking
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Fixed ticks run since start
    pub tick_count: u64,
    /// Whether simulated time is frozen
    pub paused: bool,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl GameTime {
    /// Create a new clock with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Length of one fixed tick in seconds
    pub fn fixed_delta(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Update the clock with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.min(self.config.max_delta_time).max(0.0);
        self.frame_count += 1;

        if self.paused {
            self.delta_time = 0.0;
            return;
        }

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Drain the accumulator into the number of fixed ticks to run this frame
    ///
    /// A non-positive timestep yields no ticks.
    pub fn fixed_steps(&mut self) -> u32 {
        if self.config.fixed_timestep.is_nan() || self.config.fixed_timestep <= 0.0 {
            return 0;
        }

        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        self.tick_count += steps as u64;
        steps
    }

    /// Interpolation factor for rendering between physics ticks
    pub fn fixed_interpolation(&self) -> f32 {
        self.fixed_accumulator / self.config.fixed_timestep
    }

    /// Freeze simulated time; frames still count
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume simulated time
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta_time > 0.0);
        assert_eq!(time.frame_count, 1);

        time.pause();
        time.update(0.016);
        assert_eq!(time.delta_time, 0.0);
    }

    #[test]
    fn test_fixed_steps_drain_accumulator() {
        let mut time = GameTime::default();
        // Two and a half ticks worth of time
        time.update(2.5 / 60.0);
        assert_eq!(time.fixed_steps(), 2);
        assert_eq!(time.fixed_steps(), 0);
        assert_eq!(time.tick_count, 2);
        assert!((time.fixed_interpolation() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut time = GameTime::default();
        time.update(10.0);
        assert_eq!(time.delta_time, time.config.max_delta_time);

        time.update(-1.0);
        assert_eq!(time.delta_time, 0.0);
    }

    #[test]
    fn test_pause_resume_and_toggle() {
        let mut time = GameTime::default();
        time.pause();
        time.update(1.0 / 60.0);
        assert_eq!(time.fixed_steps(), 0);

        time.resume();
        assert!(!time.paused);
        time.update(1.0 / 60.0 + 1e-4);
        assert_eq!(time.fixed_steps(), 1);

        time.toggle_pause();
        assert!(time.paused);
        time.toggle_pause();
        assert!(!time.paused);
        assert_eq!(time.frame_count, 2);
    }

    #[test]
    fn test_bad_max_delta_does_not_panic() {
        for max_delta_time in [f32::NAN, -1.0] {
            let mut time = GameTime::new(TimeConfig {
                max_delta_time,
                ..TimeConfig::default()
            });
            time.update(0.016);
            assert!((0.0..=0.016).contains(&time.delta_time));
        }
    }

    #[test]
    fn test_zero_timestep_yields_no_ticks() {
        for fixed_timestep in [0.0, -1.0 / 60.0, f32::NAN] {
            let mut time = GameTime::new(TimeConfig {
                fixed_timestep,
                ..TimeConfig::default()
            });
            time.update(0.1);
            assert_eq!(time.fixed_steps(), 0);
        }
    }

    #[test]
    fn test_validate_rejects_unusable_config() {
        assert_eq!(TimeConfig::default().validate(), Ok(()));

        let config = TimeConfig {
            fixed_timestep: 0.0,
            ..TimeConfig::default()
        };
        assert_eq!(config.validate(), Err(TimeConfigError::NonPositiveTimestep(0.0)));

        let config = TimeConfig {
            max_delta_time: -1.0,
            ..TimeConfig::default()
        };
        assert_eq!(config.validate(), Err(TimeConfigError::NegativeMaxDelta(-1.0)));

        let config = TimeConfig {
            max_delta_time: f32::NAN,
            ..TimeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TimeConfigError::NotFinite { field: "max_delta_time", .. })
        ));

        let config = TimeConfig {
            time_scale: f32::INFINITY,
            ..TimeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TimeConfigError::NotFinite { field: "time_scale", .. })
        ));

        let config = TimeConfig {
            time_scale: -2.0,
            ..TimeConfig::default()
        };
        assert_eq!(config.validate(), Err(TimeConfigError::NegativeTimeScale(-2.0)));
    }

    #[test]
    fn test_time_scale_never_negative() {
        let mut time = GameTime::default();
        time.set_time_scale(-3.0);
        assert_eq!(time.config.time_scale, 0.0);
        time.update(0.1);
        assert_eq!(time.fixed_steps(), 0);
    }
}
