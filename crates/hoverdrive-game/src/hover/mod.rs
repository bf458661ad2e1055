//! Hover vehicle controller module
//!
//! Ground probe, hover force model, look control, and the gates that switch
//! them off.

mod config;
mod controller;
mod force;
mod gate;
mod look;
mod sensor;

pub use config::{HoverConfig, HoverConfigError, MAX_PITCH_LIMIT};
pub use controller::HoverController;
pub use force::{height_hold_force, move_direction, move_force, MoveForceInputs, FORCE_SCALE};
pub use gate::ControlGate;
pub use look::{LookController, YAW_AXIS};
pub use sensor::{GroundHit, GroundSensor};
