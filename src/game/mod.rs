// Game-specific logic

pub mod autopilot;
pub mod camera;
pub mod characters;
pub mod collectable;
pub mod config;
pub mod enemies;
pub mod hud;
pub mod save;
pub mod session;
pub mod spawning;
