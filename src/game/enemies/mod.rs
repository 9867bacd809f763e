// Enemy system
//
// - Behavior selection (idle, chase, search, attack)
// - Attack sequencing and the damage zone
// - The enemy actor tying them to movement

pub mod behavior;
pub mod combat;
pub mod enemy;

pub use behavior::{BehaviorMachine, Decision, EnemyState};
pub use combat::{AttackSequence, CombatState, DamageZone};
pub use enemy::{DestroyNotice, Enemy, TargetInfo};
