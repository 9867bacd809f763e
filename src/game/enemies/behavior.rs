// Enemy behavior selection
//
// Exactly one state is active at a time. Each tick the machine is fed the
// distance to the target and whether an attack is mid-swing, and answers with
// what the enemy should do this tick.

use fastrand::Rng;
use glam::Vec3;

use crate::engine::timer::Countdown;
use crate::game::config::EnemyTuning;

/// Current high-level behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnemyState {
    /// No live target
    #[default]
    Idle,
    Chasing,
    /// Wandering after losing the target
    Searching,
    Attacking,
}

/// What the enemy should do this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Stand still
    Hold,
    /// Stand still and start (or keep) attacking
    Attack,
    /// Step toward the target
    Chase,
    /// Wander along the search heading
    Search { direction: Vec3 },
    /// Search ran out without reacquiring the target
    Expire,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Search {
    direction: Vec3,
    timer: Countdown,
}

/// Distance and timer driven behavior state machine
#[derive(Debug, Clone)]
pub struct BehaviorMachine {
    state: EnemyState,
    search: Option<Search>,
    sight_radius: f32,
    attack_radius: f32,
    search_time: f32,
}

impl BehaviorMachine {
    pub fn new(tuning: &EnemyTuning) -> Self {
        Self {
            state: EnemyState::Idle,
            search: None,
            sight_radius: tuning.sight_radius,
            attack_radius: tuning.attack_radius,
            search_time: tuning.search_time,
        }
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    pub fn search_direction(&self) -> Option<Vec3> {
        self.search.map(|s| s.direction)
    }

    /// Seconds left before an unsuccessful search expires
    pub fn search_remaining(&self) -> Option<f32> {
        self.search.map(|s| s.timer.remaining())
    }

    /// Flip the search heading (hit an obstacle)
    pub fn reverse_search(&mut self) {
        if let Some(search) = &mut self.search {
            search.direction = -search.direction;
        }
    }

    /// Choose this tick's behavior.
    ///
    /// `distance` is `None` when there is no live target. `attack_committed`
    /// is true while an attack is turning or its damage window is open.
    /// Attack range is tested before sight range, so an enemy inside attack
    /// range never takes a chase step.
    pub fn evaluate(
        &mut self,
        distance: Option<f32>,
        attack_committed: bool,
        rng: &mut Rng,
        dt: f32,
    ) -> Decision {
        let Some(distance) = distance else {
            // A dead target is not a reacquisition: a running search keeps counting
            self.state = EnemyState::Idle;
            if let Some(search) = &mut self.search {
                if search.timer.tick(dt) {
                    return Decision::Expire;
                }
            }
            return Decision::Hold;
        };

        if attack_committed || distance <= self.attack_radius {
            self.search = None;
            self.state = EnemyState::Attacking;
            return Decision::Attack;
        }

        if distance <= self.sight_radius {
            // Reacquired: cancel any running search
            self.search = None;
            self.state = EnemyState::Chasing;
            return Decision::Chase;
        }

        let search_time = self.search_time;
        let search = self.search.get_or_insert_with(|| Search {
            direction: random_heading(rng),
            timer: Countdown::new(search_time),
        });
        self.state = EnemyState::Searching;

        if search.timer.tick(dt) {
            return Decision::Expire;
        }
        Decision::Search {
            direction: search.direction,
        }
    }
}

/// Random horizontal unit vector
fn random_heading(rng: &mut Rng) -> Vec3 {
    let dir = Vec3::new(rng.f32() * 2.0 - 1.0, 0.0, rng.f32() * 2.0 - 1.0).normalize_or_zero();
    if dir == Vec3::ZERO {
        Vec3::X
    } else {
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn machine() -> (BehaviorMachine, Rng) {
        (BehaviorMachine::new(&EnemyTuning::default()), Rng::with_seed(7))
    }

    #[test]
    fn test_starts_idle() {
        let (bm, _) = machine();
        assert_eq!(bm.state(), EnemyState::Idle);
    }

    #[test]
    fn test_idle_to_chasing_in_sight() {
        let (mut bm, mut rng) = machine();
        assert_eq!(bm.evaluate(Some(10.0), false, &mut rng, DT), Decision::Chase);
        assert_eq!(bm.state(), EnemyState::Chasing);
    }

    #[test]
    fn test_attack_range_wins_over_chase() {
        let (mut bm, mut rng) = machine();
        for d in [0.0, 1.0, 1.99, 2.0] {
            assert_eq!(bm.evaluate(Some(d), false, &mut rng, DT), Decision::Attack);
            assert_eq!(bm.state(), EnemyState::Attacking);
        }
    }

    #[test]
    fn test_out_of_sight_starts_search() {
        let (mut bm, mut rng) = machine();
        let decision = bm.evaluate(Some(20.0), false, &mut rng, DT);
        assert!(matches!(decision, Decision::Search { .. }));
        assert_eq!(bm.state(), EnemyState::Searching);
        let dir = bm.search_direction().unwrap();
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert_eq!(dir.y, 0.0);
    }

    #[test]
    fn test_search_keeps_heading() {
        let (mut bm, mut rng) = machine();
        bm.evaluate(Some(20.0), false, &mut rng, DT);
        let first = bm.search_direction();
        bm.evaluate(Some(20.0), false, &mut rng, DT);
        assert_eq!(bm.search_direction(), first);
    }

    #[test]
    fn test_reacquire_cancels_search() {
        let (mut bm, mut rng) = machine();
        bm.evaluate(Some(20.0), false, &mut rng, 5.0);
        assert_eq!(bm.evaluate(Some(5.0), false, &mut rng, DT), Decision::Chase);
        assert!(!bm.is_searching());

        // A fresh search gets the full duration again
        bm.evaluate(Some(20.0), false, &mut rng, DT);
        assert!(bm.search_remaining().unwrap() > 10.0);
    }

    #[test]
    fn test_search_expires() {
        let (mut bm, mut rng) = machine();
        bm.evaluate(Some(20.0), false, &mut rng, DT);
        assert!(matches!(
            bm.evaluate(Some(20.0), false, &mut rng, 10.0),
            Decision::Search { .. }
        ));
        assert_eq!(bm.evaluate(Some(20.0), false, &mut rng, 1.0), Decision::Expire);
    }

    #[test]
    fn test_reverse_search() {
        let (mut bm, mut rng) = machine();
        bm.evaluate(Some(20.0), false, &mut rng, DT);
        let dir = bm.search_direction().unwrap();
        bm.reverse_search();
        assert_eq!(bm.search_direction().unwrap(), -dir);
    }

    #[test]
    fn test_committed_attack_holds_state() {
        let (mut bm, mut rng) = machine();
        assert_eq!(bm.evaluate(Some(30.0), true, &mut rng, DT), Decision::Attack);
        assert_eq!(bm.state(), EnemyState::Attacking);
    }

    #[test]
    fn test_no_target_is_idle() {
        let (mut bm, mut rng) = machine();
        bm.evaluate(Some(5.0), false, &mut rng, DT);
        assert_eq!(bm.evaluate(None, false, &mut rng, DT), Decision::Hold);
        assert_eq!(bm.state(), EnemyState::Idle);
    }

    #[test]
    fn test_search_runs_out_while_target_dead() {
        let (mut bm, mut rng) = machine();
        bm.evaluate(Some(20.0), false, &mut rng, DT);
        assert_eq!(bm.evaluate(None, false, &mut rng, 5.0), Decision::Hold);
        let remaining = bm.search_remaining().unwrap();
        assert!(remaining < 6.1, "{remaining}");
        assert_eq!(bm.evaluate(None, false, &mut rng, 6.0), Decision::Expire);
    }
}
