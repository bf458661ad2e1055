//! Scripted input for headless runs

use glam::Vec2;
use hoverdrive_game::{InputAxis, InputSource};

/// One stretch of constant input
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    /// How many frames this phase lasts
    pub frames: u64,
    /// Move axis held for the whole phase
    pub move_axis: Vec2,
    /// Look delta reported every frame of the phase
    pub look_axis: Vec2,
}

/// Plays back a list of phases and presses Pause once
#[derive(Debug, Clone)]
pub struct Autopilot {
    phases: Vec<Phase>,
    pause_frame: Option<u64>,
    frame: u64,
    current: Option<Phase>,
}

impl Autopilot {
    pub fn new(phases: Vec<Phase>, pause_frame: Option<u64>) -> Self {
        Self {
            phases,
            pause_frame,
            frame: 0,
            current: None,
        }
    }

    /// Settle, cruise forward, turn right while strafing, look around, idle
    pub fn demo() -> Self {
        let phase = |frames, move_axis, look_axis| Phase {
            frames,
            move_axis,
            look_axis,
        };

        Self::new(
            vec![
                phase(60, Vec2::ZERO, Vec2::ZERO),
                phase(180, Vec2::new(0.0, 1.0), Vec2::ZERO),
                phase(120, Vec2::new(0.5, 1.0), Vec2::new(4.0, 0.0)),
                phase(90, Vec2::ZERO, Vec2::new(0.0, -20.0)),
                phase(90, Vec2::ZERO, Vec2::new(0.0, 25.0)),
            ],
            Some(480),
        )
    }

    /// Select the input for the given 1-based frame number
    pub fn advance(&mut self, frame: u64) {
        self.frame = frame;

        let mut start = 1;
        self.current = None;
        for phase in &self.phases {
            if frame < start + phase.frames {
                self.current = Some(*phase);
                break;
            }
            start += phase.frames;
        }
    }

    /// True once every phase has played
    pub fn finished(&self) -> bool {
        self.current.is_none() && self.frame > 0
    }
}

impl InputSource for Autopilot {
    fn axis(&self, axis: InputAxis) -> Vec2 {
        match (self.current, axis) {
            (Some(phase), InputAxis::Move) => phase.move_axis,
            (Some(phase), InputAxis::Look) => phase.look_axis,
            (None, _) => Vec2::ZERO,
        }
    }

    fn pause_pressed(&self) -> bool {
        self.pause_frame == Some(self.frame)
    }
}
