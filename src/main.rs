//! Hoverdrive - headless hover vehicle simulation
//!
//! Builds a small test course, drives the hover controller with scripted
//! input through the frame/tick pipeline, and logs telemetry.

mod autopilot;
mod pause;
mod settings;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use glam::Vec3;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hoverdrive_core::{ControlEvent, EventBus, GameTime};
use hoverdrive_game::{CameraRig, HoverController, InputSource};
use hoverdrive_physics::{BodyState, HoverBodyDesc, PhysicsConfig, PhysicsWorld};

use autopilot::Autopilot;
use pause::PauseWindow;
use settings::GameSettings;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Hoverdrive...");

    let settings = GameSettings::load();
    if !GameSettings::exists() {
        if let Err(e) = settings.save() {
            warn!("Could not write default settings: {:#}", e);
        }
    }
    let sim = &settings.simulation;
    sim.time.validate().context("Invalid time settings")?;

    // Test course: flat ground, a drivable ramp and a wall-steep one
    let mut physics = PhysicsWorld::with_config(PhysicsConfig {
        timestep: sim.time.fixed_timestep,
        ..PhysicsConfig::default()
    });
    physics.create_ground(0.0);
    physics.create_ramp(Vec3::new(4.0, 0.5, 6.0), Vec3::new(0.0, -0.2, -40.0), 15.0);
    physics.create_ramp(Vec3::new(4.0, 0.5, 6.0), Vec3::new(12.0, -0.2, -40.0), 60.0);

    let body = physics.spawn_hover_body(&HoverBodyDesc {
        position: Vec3::new(0.0, sim.spawn_height, 0.0),
        mass: sim.body_mass,
        ..HoverBodyDesc::default()
    });

    let bus = EventBus::<ControlEvent>::new();
    let pause_requested = Arc::new(AtomicBool::new(false));
    let pause_listener = {
        let pause_requested = Arc::clone(&pause_requested);
        bus.subscribe(move |event| {
            if *event == ControlEvent::PauseRequested {
                pause_requested.store(true, Ordering::SeqCst);
            }
        })
    };

    let mut controller = HoverController::with_config(settings.controller.clone())
        .context("Invalid controller settings")?;
    controller.enable(&bus);

    let mut camera = CameraRig::with_config(settings.camera.clone());
    let mut time = GameTime::new(sim.time.clone());
    let mut autopilot = Autopilot::demo();
    let mut pause_menu = PauseWindow::new(sim.pause_frames);

    for _ in 0..sim.frames {
        time.update(sim.frame_delta);
        let frame = time.frame_count;
        autopilot.advance(frame);
        let input: Option<&dyn InputSource> = Some(&autopilot);

        // Sense, then apply
        controller.update(physics.body(body)?, &physics, input);

        if pause_requested.swap(false, Ordering::SeqCst) {
            if pause_menu.open(frame) {
                info!(frame, "Pause menu opened, freezing controls");
                bus.publish(&ControlEvent::ToggleMovement);
            } else {
                debug!(frame, "Pause menu already open, ignoring request");
            }
        }
        if pause_menu.close_due(frame) {
            info!(frame, "Pause menu closed, releasing controls");
            bus.publish(&ControlEvent::ToggleMovement);
        }

        for _ in 0..time.fixed_steps() {
            controller.fixed_update(physics.body_mut(body)?, input, time.fixed_delta());
            physics.step();
        }

        controller.late_update(physics.body_mut(body)?, &mut camera, input);

        if sim.log_every > 0 && frame % sim.log_every == 0 {
            let rigid_body = physics.body(body)?;
            let position = BodyState::position(rigid_body);
            let velocity = BodyState::velocity(rigid_body);
            info!(
                frame,
                position = ?position,
                speed = velocity.length(),
                yaw = camera.yaw(),
                pitch = controller.pitch(),
                grounded = controller.is_grounded(),
                moving = controller.is_moving(),
                looking_extreme = controller.is_looking_extreme(),
                frozen = controller.movement_disabled(),
                pause_menu = pause_menu.is_open(),
                "Telemetry"
            );
        }
    }

    controller.disable();
    bus.unsubscribe(pause_listener);

    let final_position = BodyState::position(physics.body(body)?);
    info!(
        frames = time.frame_count,
        ticks = time.tick_count,
        script_finished = autopilot.finished(),
        position = ?final_position,
        camera_forward = ?camera.forward(),
        "Simulation finished"
    );

    Ok(())
}
