//! Hover vehicle controller
//!
//! Driven by three host callbacks per frame, in this order:
//! 1. [`HoverController::update`] once per frame: ground probe and derived flags
//! 2. [`HoverController::fixed_update`] once per physics tick: hover force
//! 3. [`HoverController::late_update`] once per frame: look and camera
//!
//! Sensing must finish before the ticks it feeds; the hit used by the force
//! model always comes from the `update` of the same frame.

use glam::{Vec2, Vec3};
use hoverdrive_core::{ControlEvent, EventBus};
use hoverdrive_physics::{BodyControl, BodyState, GroundQuery};
use tracing::{info, trace, warn};

use super::force::{move_force, MoveForceInputs};
use super::{ControlGate, GroundHit, GroundSensor, HoverConfig, HoverConfigError, LookController};
use crate::camera::CameraRig;
use crate::input::{InputAxis, InputSource};

/// Read an axis, treating a missing input source as no input
fn read_axis(input: Option<&dyn InputSource>, axis: InputAxis) -> Vec2 {
    match input {
        Some(source) => source.axis(axis),
        None => Vec2::ZERO,
    }
}

/// Single-player hover vehicle controller
#[derive(Debug)]
pub struct HoverController {
    /// Tuning
    config: HoverConfig,
    /// Downward ground probe
    sensor: GroundSensor,
    /// Pitch accumulator and yaw
    look: LookController,
    /// Component and movement gates
    gate: ControlGate,
    /// Move axis is actuated this frame
    moving: bool,
    /// Move input read by the last force tick
    last_move_input: Vec2,
}

impl HoverController {
    /// Create a controller with default tuning. It starts disabled.
    pub fn new() -> Self {
        Self {
            config: HoverConfig::default(),
            sensor: GroundSensor::new(),
            look: LookController::new(),
            gate: ControlGate::new(),
            moving: false,
            last_move_input: Vec2::ZERO,
        }
    }

    /// Create a controller with custom tuning
    pub fn with_config(config: HoverConfig) -> Result<Self, HoverConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &HoverConfig {
        &self.config
    }

    /// Start running per-frame logic and listen for movement toggles
    pub fn enable(&mut self, bus: &EventBus<ControlEvent>) {
        self.gate.enable(bus);
    }

    /// Stop all per-frame logic, including the ground probe
    pub fn disable(&mut self) {
        self.gate.disable();
    }

    /// Flip the movement gate without going through the bus
    pub fn toggle_movement(&self) -> bool {
        self.gate.toggle_movement()
    }

    /// Per-frame sensing: ground probe, move/look flags, pause request
    pub fn update<B, G>(&mut self, body: &B, ground: &G, input: Option<&dyn InputSource>)
    where
        B: BodyState + ?Sized,
        G: GroundQuery + ?Sized,
    {
        if !self.gate.is_enabled() {
            return;
        }

        self.sensor.sense(
            ground,
            body.position(),
            self.config.ground_probe_distance,
            self.config.ground_layers,
        );

        self.moving = input.is_some_and(|source| source.in_progress(InputAxis::Move));
        self.look.refresh_extreme(&self.config);

        if input.is_some_and(|source| source.pause_pressed()) {
            if let Some(bus) = self.gate.bus() {
                info!("Pause requested");
                bus.publish(&ControlEvent::PauseRequested);
            }
        }
    }

    /// Per-tick hover force. Returns the force applied, if any.
    pub fn fixed_update<B>(
        &mut self,
        body: &mut B,
        input: Option<&dyn InputSource>,
        fixed_delta: f32,
    ) -> Option<Vec3>
    where
        B: BodyControl + ?Sized,
    {
        if !self.gate.allows_movement() || !self.sensor.is_grounded() {
            return None;
        }

        self.last_move_input = read_axis(input, InputAxis::Move);

        let force = move_force(
            &self.config,
            &MoveForceInputs {
                move_input: self.last_move_input,
                forward: body.forward(),
                right: body.right(),
                velocity: body.velocity(),
                hit: *self.sensor.hit(),
                fixed_delta,
            },
        );

        if !force.is_finite() {
            warn!(?force, input = ?self.last_move_input, "Discarding non-finite hover force");
            return None;
        }

        trace!(?force, "Applying hover force");
        body.apply_force(force);
        Some(force)
    }

    /// Per-frame look, then re-derive the camera from the body.
    ///
    /// The camera follows the body even while the controller is disabled;
    /// only the look rotation itself is gated.
    pub fn late_update<B>(
        &mut self,
        body: &mut B,
        camera: &mut CameraRig,
        input: Option<&dyn InputSource>,
    ) where
        B: BodyControl + ?Sized,
    {
        if self.gate.allows_movement() {
            let look = read_axis(input, InputAxis::Look);
            self.look.apply(look, &self.config, body, camera);
        }

        camera.follow_body(body.position(), body.yaw_degrees());
    }

    pub fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    pub fn movement_disabled(&self) -> bool {
        self.gate.movement_disabled()
    }

    pub fn is_grounded(&self) -> bool {
        self.sensor.is_grounded()
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Camera is within a few degrees of straight up or down
    pub fn is_looking_extreme(&self) -> bool {
        self.look.is_looking_extreme()
    }

    /// Accumulated pitch in degrees, positive looks down
    pub fn pitch(&self) -> f32 {
        self.look.pitch()
    }

    /// Latest ground probe result; check `valid` or `is_grounded` first
    pub fn ground_hit(&self) -> &GroundHit {
        self.sensor.hit()
    }

    pub fn last_move_input(&self) -> Vec2 {
        self.last_move_input
    }
}

impl Default for HoverController {
    fn default() -> Self {
        Self::new()
    }
}
