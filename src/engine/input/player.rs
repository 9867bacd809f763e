// Per-player input state management

use super::action::Action;
use glam::Vec3;
use std::collections::HashSet;

/// Input state for the local player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed this frame
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Clear edge-triggered state. Call once per tick after it was consumed.
    pub fn end_tick(&mut self) {
        self.just_pressed.clear();
    }

    /// Raw movement direction on the ground plane, normalized (or zero)
    pub fn move_direction(&self) -> Vec3 {
        let mut x = 0.0;
        let mut z = 0.0;

        if self.is_pressed(Action::MoveLeft) {
            x -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            x += 1.0;
        }
        if self.is_pressed(Action::MoveBack) {
            z -= 1.0;
        }
        if self.is_pressed(Action::MoveForward) {
            z += 1.0;
        }

        Vec3::new(x, 0.0, z).normalize_or_zero()
    }

    /// Snapshot consumed by the player for one tick
    pub fn frame(&self) -> InputFrame {
        InputFrame {
            direction: self.move_direction(),
            run_held: self.is_pressed(Action::Run),
            dash_pressed: self.just_pressed(Action::Dash),
        }
    }
}

/// What the player controller needs from input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputFrame {
    /// Normalized ground-plane direction, zero when idle
    pub direction: Vec3,
    pub run_held: bool,
    pub dash_pressed: bool,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn has_direction(&self) -> bool {
        self.direction != Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_sets_just_pressed_once() {
        let mut input = PlayerInput::new();
        input.press(Action::Dash);
        assert!(input.just_pressed(Action::Dash));
        input.end_tick();
        input.press(Action::Dash);
        assert!(!input.just_pressed(Action::Dash), "held key is not a new press");
        assert!(input.is_pressed(Action::Dash));
    }

    #[test]
    fn test_release() {
        let mut input = PlayerInput::new();
        input.press(Action::Run);
        input.release(Action::Run);
        assert!(!input.is_pressed(Action::Run));
        assert!(!input.frame().run_held);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveForward);
        input.press(Action::MoveRight);
        let dir = input.move_direction();
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.x > 0.0 && dir.z > 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveLeft);
        input.press(Action::MoveRight);
        assert_eq!(input.move_direction(), Vec3::ZERO);
        assert!(!input.frame().has_direction());
    }

    #[test]
    fn test_frame_snapshot() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveForward);
        input.press(Action::Run);
        input.press(Action::Dash);
        let frame = input.frame();
        assert!(frame.run_held);
        assert!(frame.dash_pressed);
        assert_eq!(frame.direction, Vec3::Z);
    }
}
