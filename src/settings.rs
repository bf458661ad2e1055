//! Driver settings with persistence
//!
//! Settings are saved to `~/.config/hoverdrive/settings.toml`

use std::fs;
use std::path::PathBuf;

use hoverdrive_core::TimeConfig;
use hoverdrive_game::{CameraConfig, HoverConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All driver settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub controller: HoverConfig,
    pub camera: CameraConfig,
    pub simulation: SimulationSettings,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hoverdrive"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Whether a settings file is present on disk
    pub fn exists() -> bool {
        Self::settings_path().is_some_and(|path| path.exists())
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("Failed to parse settings: {}, using defaults", e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML; missing keys take their defaults
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        // Create config directory if it doesn't exist
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Headless run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of render frames to simulate
    pub frames: u64,
    /// Wall-clock length of one simulated render frame
    pub frame_delta: f32,
    /// Log telemetry every N frames (0 = never)
    pub log_every: u64,
    /// Initial height of the body center
    pub spawn_height: f32,
    /// Body mass in kilograms
    pub body_mass: f32,
    /// Frames movement stays frozen after a pause request
    pub pause_frames: u64,
    /// Frame clock configuration
    pub time: TimeConfig,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frames: 900,
            frame_delta: 1.0 / 144.0,
            log_every: 72,
            spawn_height: 1.0,
            body_mass: 1.0,
            pause_frames: 144,
            time: TimeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_toml() {
        let mut settings = GameSettings::default();
        settings.controller.speed = 42.0;
        settings.simulation.frames = 10;

        let content = toml::to_string_pretty(&settings).unwrap();
        let parsed = GameSettings::parse(&content).unwrap();
        assert_eq!(parsed.controller, settings.controller);
        assert_eq!(parsed.simulation.frames, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed = GameSettings::parse("[controller]\nsensitivity = 15.0\n").unwrap();
        assert_eq!(parsed.controller.sensitivity, 15.0);
        assert_eq!(parsed.controller.speed, 65.0);
        assert_eq!(parsed.simulation.frames, 900);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(GameSettings::parse("controller = 3").is_err());
    }
}
