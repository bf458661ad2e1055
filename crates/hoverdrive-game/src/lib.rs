//! Hoverdrive Game - Gameplay logic
//!
//! Provides the hover vehicle controller, its camera rig, and input handling.

pub mod camera;
pub mod hover;
pub mod input;

pub use camera::{CameraConfig, CameraRig};
pub use hover::{
    move_force, ControlGate, GroundHit, GroundSensor, HoverConfig, HoverConfigError,
    HoverController, LookController, MoveForceInputs, FORCE_SCALE,
};
pub use input::{InputAction, InputAxis, InputBindings, InputHandler, InputSource, InputState};
