//! Hoverdrive Core - Shared types and utilities
//!
//! This crate provides the foundational pieces used by the other crates:
//! - Mathematical primitives (re-exported from glam)
//! - Frame clock with a fixed-timestep accumulator
//! - Event bus for fire-and-forget control signals

pub mod events;
pub mod time;

pub use events::{ControlEvent, EventBus, ListenerId};
pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
pub use time::{GameTime, TimeConfig, TimeConfigError};
