//! Camera module
//!
//! First-person camera rig riding on the hover body.

mod config;
mod rig;

pub use config::CameraConfig;
pub use rig::CameraRig;
