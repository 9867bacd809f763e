// Player state machine

/// Locomotion and life state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Standing still
    #[default]
    Idle,
    /// Moving at walk speed
    Walking,
    /// Moving at run speed, draining stamina
    Running,
    /// Locked into a dash
    Dashing,
    /// Health ran out; waiting for a respawn
    Dead,
    /// The round clock ran out
    GameOver,
}

impl PlayerState {
    /// Whether the player reacts to input this tick
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Dead | Self::GameOver)
    }
}

/// State machine that handles player state transitions
#[derive(Debug, Default)]
pub struct PlayerStateMachine {
    current_state: PlayerState,
    previous_state: PlayerState,
    state_time: f32,
}

impl PlayerStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlayerState {
        self.current_state
    }

    pub fn previous_state(&self) -> PlayerState {
        self.previous_state
    }

    /// Time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    pub fn state_just_changed(&self) -> bool {
        self.state_time == 0.0
    }

    /// Transition to a new state. Terminal states only leave via `revive`.
    pub fn transition(&mut self, new_state: PlayerState) {
        if !self.current_state.is_active() {
            return;
        }
        if self.current_state != new_state {
            self.previous_state = self.current_state;
            self.current_state = new_state;
            self.state_time = 0.0;
        }
    }

    /// Advance state time (called every tick)
    pub fn update(&mut self, dt: f32) {
        self.state_time += dt;
    }

    /// Pick the locomotion state for this tick
    pub fn locomote(&mut self, moving: bool, running: bool, dashing: bool) {
        let next = if dashing {
            PlayerState::Dashing
        } else if !moving {
            PlayerState::Idle
        } else if running {
            PlayerState::Running
        } else {
            PlayerState::Walking
        };
        self.transition(next);
    }

    /// Enter `Dead`. Returns true only on the tick the player actually died.
    pub fn die(&mut self) -> bool {
        if self.current_state == PlayerState::Dead {
            return false;
        }
        let was_active = self.current_state.is_active();
        self.transition(PlayerState::Dead);
        was_active
    }

    /// Enter `GameOver`. Returns true only the first time.
    pub fn end_game(&mut self) -> bool {
        if self.current_state == PlayerState::GameOver {
            return false;
        }
        self.previous_state = self.current_state;
        self.current_state = PlayerState::GameOver;
        self.state_time = 0.0;
        true
    }

    /// Leave a terminal state back to idle
    pub fn revive(&mut self) {
        self.previous_state = self.current_state;
        self.current_state = PlayerState::Idle;
        self.state_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let sm = PlayerStateMachine::new();
        assert_eq!(sm.state(), PlayerState::Idle);
    }

    #[test]
    fn test_state_transition() {
        let mut sm = PlayerStateMachine::new();
        sm.transition(PlayerState::Walking);
        assert_eq!(sm.state(), PlayerState::Walking);
        assert_eq!(sm.previous_state(), PlayerState::Idle);
    }

    #[test]
    fn test_state_just_changed() {
        let mut sm = PlayerStateMachine::new();
        sm.transition(PlayerState::Running);
        assert!(sm.state_just_changed());
        sm.update(0.1);
        assert!(!sm.state_just_changed());
    }

    #[test]
    fn test_locomotion_priority() {
        let mut sm = PlayerStateMachine::new();
        sm.locomote(true, true, true);
        assert_eq!(sm.state(), PlayerState::Dashing);
        sm.locomote(true, true, false);
        assert_eq!(sm.state(), PlayerState::Running);
        sm.locomote(true, false, false);
        assert_eq!(sm.state(), PlayerState::Walking);
        sm.locomote(false, true, false);
        assert_eq!(sm.state(), PlayerState::Idle);
    }

    #[test]
    fn test_death_happens_once() {
        let mut sm = PlayerStateMachine::new();
        assert!(sm.die());
        assert!(!sm.die());
        assert_eq!(sm.state(), PlayerState::Dead);
        assert!(!sm.state().is_active());
    }

    #[test]
    fn test_dead_ignores_locomotion() {
        let mut sm = PlayerStateMachine::new();
        sm.die();
        sm.locomote(true, true, false);
        assert_eq!(sm.state(), PlayerState::Dead);
    }

    #[test]
    fn test_revive() {
        let mut sm = PlayerStateMachine::new();
        sm.die();
        sm.revive();
        assert_eq!(sm.state(), PlayerState::Idle);
        assert_eq!(sm.previous_state(), PlayerState::Dead);
    }

    #[test]
    fn test_game_over_once_even_when_dead() {
        let mut sm = PlayerStateMachine::new();
        sm.die();
        assert!(sm.end_game());
        assert!(!sm.end_game());
        assert_eq!(sm.state(), PlayerState::GameOver);
        assert!(!sm.die(), "game over is not a fresh death");
    }
}
