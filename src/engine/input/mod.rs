// Input handling
//
// The host translates device events into `Action` presses/releases on a
// `PlayerInput`. Once per tick the game reads an `InputFrame` snapshot from it
// and then calls `end_tick` to clear edge-triggered state.
//
// ```rust
// input.press(Action::MoveForward);
// let frame = input.frame();
// session.tick(&frame, dt);
// input.end_tick();
// ```

pub mod action;
pub mod player;

// Re-export commonly used types
pub use action::Action;
pub use player::{InputFrame, PlayerInput};
