// Character system
//
// This module contains everything related to the player character:
// - Clamped stats and their HUD tiers
// - Shared movement model (also used by enemies)
// - State machine for player locomotion and life cycle
// - The player itself

pub mod movement;
pub mod player;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use movement::MovementController;
pub use player::{Player, PlayerEvent, Trigger};
pub use state::{PlayerState, PlayerStateMachine};
pub use stats::{ActorStats, StatField, StatLimits, UiTiers};
