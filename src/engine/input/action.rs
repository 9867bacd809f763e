// Game action definitions

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement on the ground plane
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,

    // Locomotion modifiers
    Run,
    Dash,
}

impl Action {
    /// Whether this action contributes to the movement direction
    pub fn is_directional(&self) -> bool {
        matches!(
            self,
            Self::MoveForward | Self::MoveBack | Self::MoveLeft | Self::MoveRight
        )
    }
}
