//! Input system with action-based mapping
//!
//! Raw keyboard and mouse events are folded into two logical axes, `Move`
//! and `Look`, plus a momentary `Pause` action.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Game actions that can be triggered by keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Strafe left (A by default)
    MoveLeft,
    /// Strafe right (D by default)
    MoveRight,
    /// Pause (Escape by default)
    Pause,
}

/// Logical 2D axes read by controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAxis {
    /// x = strafe (right positive), y = throttle (forward positive)
    Move,
    /// x = turn (right positive), y = look up positive
    Look,
}

/// Source of per-frame input
pub trait InputSource {
    /// Current value of a 2D axis
    fn axis(&self, axis: InputAxis) -> Vec2;

    /// Whether the axis is actuated this frame
    fn in_progress(&self, axis: InputAxis) -> bool {
        self.axis(axis) != Vec2::ZERO
    }

    /// Whether Pause was pressed this frame
    fn pause_pressed(&self) -> bool;
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
    /// Look delta accumulated this frame
    pub look_delta: Vec2,
    /// Whether the cursor is captured (invisible, locked)
    pub cursor_captured: bool,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Composite move axis from the held direction keys.
    ///
    /// Opposing keys cancel; diagonals are left at length sqrt(2).
    pub fn move_axis(&self) -> Vec2 {
        let axis_value = |positive: InputAction, negative: InputAction| {
            let mut value = 0.0;
            if self.is_held(positive) {
                value += 1.0;
            }
            if self.is_held(negative) {
                value -= 1.0;
            }
            value
        };

        Vec2::new(
            axis_value(InputAction::MoveRight, InputAction::MoveLeft),
            axis_value(InputAction::MoveForward, InputAction::MoveBackward),
        )
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.look_delta = Vec2::ZERO;
    }

    /// Clear all input state
    pub fn clear_all(&mut self) {
        self.held.clear();
        self.clear_frame();
    }
}

impl InputSource for InputState {
    fn axis(&self, axis: InputAxis) -> Vec2 {
        match axis {
            InputAxis::Move => self.move_axis(),
            InputAxis::Look => self.look_delta,
        }
    }

    fn pause_pressed(&self) -> bool {
        self.is_just_pressed(InputAction::Pause)
    }
}

/// Maps physical keys to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key to action mappings
    bindings: HashMap<KeyCode, InputAction>,
    /// Reverse lookup: action to all keys
    reverse: HashMap<InputAction, Vec<KeyCode>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
            reverse: HashMap::new(),
        };

        // Default WASD bindings
        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Escape, InputAction::Pause);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        if let Some(previous) = self.bindings.insert(key, action) {
            if let Some(keys) = self.reverse.get_mut(&previous) {
                keys.retain(|k| *k != key);
            }
        }
        self.reverse.entry(action).or_default().push(key);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        if let Some(action) = self.bindings.remove(&key) {
            if let Some(keys) = self.reverse.get_mut(&action) {
                keys.retain(|k| *k != key);
            }
        }
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }

    /// All keys bound to an action
    pub fn keys_for(&self, action: InputAction) -> &[KeyCode] {
        self.reverse.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
    /// Mouse sensitivity multiplier
    pub mouse_sensitivity: f32,
    /// Invert Y axis
    pub invert_y: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
            bindings: InputBindings::default(),
            mouse_sensitivity: 1.0,
            invert_y: false,
        }
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        if let PhysicalKey::Code(key_code) = physical_key {
            if let Some(action) = self.bindings.get_key_action(key_code) {
                match element_state {
                    ElementState::Pressed => {
                        if !self.state.held.contains(&action) {
                            self.state.just_pressed.insert(action);
                        }
                        self.state.held.insert(action);
                    }
                    ElementState::Released => {
                        self.state.held.remove(&action);
                        self.state.just_released.insert(action);
                    }
                }
            }
        }
    }

    /// Handle raw mouse motion (screen space, +y pointing down)
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.state.cursor_captured {
            // Screen y grows downward; look y grows upward unless inverted
            let y_mult = if self.invert_y { 1.0 } else { -1.0 };
            self.state.look_delta += Vec2::new(
                delta.0 as f32 * self.mouse_sensitivity,
                delta.1 as f32 * self.mouse_sensitivity * y_mult,
            );
        }
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.state.clear_frame();
    }

    /// Set cursor capture state
    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.state.cursor_captured = captured;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(handler: &mut InputHandler, key: KeyCode) {
        handler.handle_keyboard(PhysicalKey::Code(key), ElementState::Pressed);
    }

    fn release(handler: &mut InputHandler, key: KeyCode) {
        handler.handle_keyboard(PhysicalKey::Code(key), ElementState::Released);
    }

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.get_key_action(KeyCode::KeyW),
            Some(InputAction::MoveForward)
        );
        assert_eq!(
            bindings.get_key_action(KeyCode::Escape),
            Some(InputAction::Pause)
        );
        assert_eq!(bindings.keys_for(InputAction::MoveLeft).len(), 2);
    }

    #[test]
    fn test_rebinding_moves_key() {
        let mut bindings = InputBindings::default();
        bindings.bind(KeyCode::KeyW, InputAction::Pause);

        assert_eq!(bindings.get_key_action(KeyCode::KeyW), Some(InputAction::Pause));
        assert_eq!(bindings.keys_for(InputAction::MoveForward), &[KeyCode::ArrowUp]);

        bindings.unbind(KeyCode::KeyW);
        assert_eq!(bindings.get_key_action(KeyCode::KeyW), None);
    }

    #[test]
    fn test_composite_move_axis() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::KeyW);
        press(&mut handler, KeyCode::KeyD);
        assert_eq!(handler.state.axis(InputAxis::Move), Vec2::new(1.0, 1.0));
        assert!(handler.state.in_progress(InputAxis::Move));

        // Opposing keys cancel
        press(&mut handler, KeyCode::KeyA);
        assert_eq!(handler.state.axis(InputAxis::Move), Vec2::new(0.0, 1.0));

        release(&mut handler, KeyCode::KeyW);
        release(&mut handler, KeyCode::KeyA);
        release(&mut handler, KeyCode::KeyD);
        assert!(!handler.state.in_progress(InputAxis::Move));
    }

    #[test]
    fn test_pause_is_momentary() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::Escape);
        assert!(handler.state.pause_pressed());

        handler.end_frame();
        assert!(!handler.state.pause_pressed());
        assert!(handler.state.is_held(InputAction::Pause));
    }

    #[test]
    fn test_mouse_look_requires_capture() {
        let mut handler = InputHandler::new();
        handler.handle_mouse_motion((4.0, 2.0));
        assert_eq!(handler.state.axis(InputAxis::Look), Vec2::ZERO);

        handler.set_cursor_captured(true);
        handler.mouse_sensitivity = 0.5;
        handler.handle_mouse_motion((4.0, 2.0));
        assert_eq!(handler.state.axis(InputAxis::Look), Vec2::new(2.0, -1.0));

        handler.end_frame();
        assert_eq!(handler.state.axis(InputAxis::Look), Vec2::ZERO);
    }

    #[test]
    fn test_invert_y() {
        let mut handler = InputHandler::new();
        handler.set_cursor_captured(true);
        handler.invert_y = true;
        handler.handle_mouse_motion((0.0, 3.0));
        assert_eq!(handler.state.look_delta, Vec2::new(0.0, 3.0));
    }
}
