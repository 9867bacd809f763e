// Melee attack sequencing and damage-zone contact
//
// An attack runs turn-to-face -> damage window -> cooldown. A new attack can
// only begin from `Ready`, so overlapping triggers are rejected. The damage
// zone reports a hit on the tick an overlap begins, never again for the same
// contact.

use glam::{Quat, Vec3};

use crate::core::math::look_rotation;
use crate::engine::timer::Countdown;
use crate::game::characters::MovementController;
use crate::game::config::EnemyTuning;

/// Relationship between an attacker and its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatState {
    OutOfRange,
    InRange,
    Attacking,
    Cooldown,
}

/// Where the attack sequence currently is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackPhase {
    Ready,
    /// Turning toward the target before striking. `None` when standing on
    /// the target, which strikes without turning.
    Facing { target: Option<Quat> },
    /// Damage zone is live
    DamageWindow(Countdown),
    /// Back to idle animation, waiting before the next attack
    Cooldown(Countdown),
}

/// Damage-zone transitions produced while advancing the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackSignal {
    WindowOpened,
    WindowClosed,
    Ready,
}

/// One enemy's attack sequence
#[derive(Debug, Clone)]
pub struct AttackSequence {
    phase: AttackPhase,
    window: f32,
    cooldown: f32,
    rotation_speed: f32,
    facing_tolerance_deg: f32,
}

impl AttackSequence {
    pub fn new(tuning: &EnemyTuning) -> Self {
        Self {
            phase: AttackPhase::Ready,
            window: tuning.damage_window,
            cooldown: tuning.attack_cooldown,
            rotation_speed: tuning.rotation_speed,
            facing_tolerance_deg: tuning.facing_tolerance_deg,
        }
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    /// Anything other than `Ready`
    pub fn is_busy(&self) -> bool {
        self.phase != AttackPhase::Ready
    }

    /// Turning or striking; the attacker must not move
    pub fn is_committed(&self) -> bool {
        matches!(
            self.phase,
            AttackPhase::Facing { .. } | AttackPhase::DamageWindow(_)
        )
    }

    pub fn window_open(&self) -> bool {
        matches!(self.phase, AttackPhase::DamageWindow(_))
    }

    pub fn status(&self, in_range: bool) -> CombatState {
        match self.phase {
            AttackPhase::Facing { .. } | AttackPhase::DamageWindow(_) => CombatState::Attacking,
            AttackPhase::Cooldown(_) => CombatState::Cooldown,
            AttackPhase::Ready if in_range => CombatState::InRange,
            AttackPhase::Ready => CombatState::OutOfRange,
        }
    }

    /// Start an attack toward `direction`. Rejected (false) while busy.
    pub fn try_begin(&mut self, direction: Vec3) -> bool {
        if self.is_busy() {
            return false;
        }
        self.phase = AttackPhase::Facing {
            target: look_rotation(direction),
        };
        true
    }

    /// Advance one tick, turning `mover` while facing
    pub fn advance(&mut self, mover: &mut MovementController, dt: f32) -> Option<AttackSignal> {
        match &mut self.phase {
            AttackPhase::Ready => None,
            AttackPhase::Facing { target } => {
                let faced = match *target {
                    Some(target) => {
                        let t = (self.rotation_speed * dt).clamp(0.0, 1.0);
                        mover.turn_to(mover.rotation().slerp(target, t));
                        mover.rotation().angle_between(target).to_degrees()
                            <= self.facing_tolerance_deg
                    }
                    None => true,
                };
                if faced {
                    self.phase = AttackPhase::DamageWindow(Countdown::new(self.window));
                    Some(AttackSignal::WindowOpened)
                } else {
                    None
                }
            }
            AttackPhase::DamageWindow(timer) => {
                if timer.tick(dt) {
                    self.phase = AttackPhase::Cooldown(Countdown::new(self.cooldown));
                    Some(AttackSignal::WindowClosed)
                } else {
                    None
                }
            }
            AttackPhase::Cooldown(timer) => {
                if timer.tick(dt) {
                    self.phase = AttackPhase::Ready;
                    Some(AttackSignal::Ready)
                } else {
                    None
                }
            }
        }
    }

    /// Abort whatever is running
    pub fn cancel(&mut self) {
        self.phase = AttackPhase::Ready;
    }
}

/// Hit volume enabled during the damage window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageZone {
    active: bool,
    overlapping: bool,
}

impl DamageZone {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn enable(&mut self) {
        self.active = true;
        self.overlapping = false;
    }

    pub fn disable(&mut self) {
        self.active = false;
        self.overlapping = false;
    }

    /// Feed this tick's overlap test. True only when a new contact begins
    /// while the zone is active.
    pub fn sense(&mut self, overlapping: bool) -> bool {
        if !self.active {
            return false;
        }
        let entered = overlapping && !self.overlapping;
        self.overlapping = overlapping;
        entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (AttackSequence, MovementController) {
        let tuning = EnemyTuning::default();
        (
            AttackSequence::new(&tuning),
            MovementController::new(Vec3::ZERO, tuning.gravity, tuning.grounded_velocity, 2.0),
        )
    }

    /// Advance until `signal` appears, returning elapsed ticks
    fn run_until(
        seq: &mut AttackSequence,
        mover: &mut MovementController,
        signal: AttackSignal,
    ) -> usize {
        for tick in 1..10_000 {
            if seq.advance(mover, DT) == Some(signal) {
                return tick;
            }
        }
        panic!("signal {signal:?} never fired");
    }

    #[test]
    fn test_ready_status() {
        let (seq, _) = setup();
        assert_eq!(seq.status(false), CombatState::OutOfRange);
        assert_eq!(seq.status(true), CombatState::InRange);
    }

    #[test]
    fn test_full_sequence() {
        let (mut seq, mut mover) = setup();
        assert!(seq.try_begin(Vec3::Z));
        assert_eq!(seq.status(true), CombatState::Attacking);

        // Already facing +Z: window opens on the first tick
        assert_eq!(seq.advance(&mut mover, DT), Some(AttackSignal::WindowOpened));
        assert!(seq.window_open());

        let window_ticks = run_until(&mut seq, &mut mover, AttackSignal::WindowClosed);
        assert!((63..=66).contains(&window_ticks), "{window_ticks}");
        assert_eq!(seq.status(true), CombatState::Cooldown);
        assert!(!seq.is_committed());

        let cooldown_ticks = run_until(&mut seq, &mut mover, AttackSignal::Ready);
        assert!((119..=121).contains(&cooldown_ticks), "{cooldown_ticks}");
        assert!(!seq.is_busy());
    }

    #[test]
    fn test_retrigger_rejected_while_busy() {
        let (mut seq, mut mover) = setup();
        assert!(seq.try_begin(Vec3::Z));
        assert!(!seq.try_begin(Vec3::Z));
        seq.advance(&mut mover, DT);
        assert!(!seq.try_begin(Vec3::X));
        run_until(&mut seq, &mut mover, AttackSignal::WindowClosed);
        assert!(!seq.try_begin(Vec3::Z), "cooldown still rejects");
        run_until(&mut seq, &mut mover, AttackSignal::Ready);
        assert!(seq.try_begin(Vec3::Z));
    }

    #[test]
    fn test_turns_before_striking() {
        let (mut seq, mut mover) = setup();
        assert!(seq.try_begin(Vec3::X));
        assert_eq!(seq.advance(&mut mover, DT), None);
        assert!(matches!(seq.phase(), AttackPhase::Facing { .. }));
        run_until(&mut seq, &mut mover, AttackSignal::WindowOpened);
        assert!(mover.angle_to(Vec3::X).unwrap() <= 1.0);
    }

    #[test]
    fn test_standing_on_target_still_opens_window() {
        let (mut seq, mut mover) = setup();
        assert!(seq.try_begin(Vec3::ZERO));
        assert_eq!(seq.advance(&mut mover, DT), Some(AttackSignal::WindowOpened));
        assert!(seq.window_open());
        run_until(&mut seq, &mut mover, AttackSignal::WindowClosed);
    }

    #[test]
    fn test_zone_hits_once_per_contact() {
        let mut zone = DamageZone::default();
        assert!(!zone.sense(true), "inactive zone never hits");

        zone.enable();
        assert!(zone.sense(true));
        assert!(!zone.sense(true));
        assert!(!zone.sense(true));

        zone.disable();
        zone.enable();
        assert!(zone.sense(true), "a new window is a new contact");
    }

    #[test]
    fn test_zone_reentry_is_new_contact() {
        let mut zone = DamageZone::default();
        zone.enable();
        assert!(zone.sense(true));
        assert!(!zone.sense(false));
        assert!(zone.sense(true));
    }
}
