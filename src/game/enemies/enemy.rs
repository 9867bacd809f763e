// Enemy actor: senses the player, chases, attacks, searches and expires

use fastrand::Rng;
use glam::Vec3;
use log::{debug, info};

use super::behavior::{BehaviorMachine, Decision, EnemyState};
use super::combat::{AttackSequence, AttackSignal, CombatState, DamageZone};
use crate::core::math::flat_direction;
use crate::engine::world::Environment;
use crate::game::characters::{MovementController, Trigger};
use crate::game::config::EnemyTuning;
use crate::game::spawning::SpawnerId;

/// What an enemy knows about the player this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub position: Vec3,
    pub alive: bool,
}

/// Sent to the owning spawner when an enemy goes away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestroyNotice {
    pub enemy: u32,
    pub spawned_by: Option<SpawnerId>,
}

/// A single hostile actor
#[derive(Debug, Clone)]
pub struct Enemy {
    id: u32,
    tuning: EnemyTuning,
    movement: MovementController,
    behavior: BehaviorMachine,
    attack: AttackSequence,
    zone: DamageZone,
    spawned_by: Option<SpawnerId>,
    destroyed: bool,
    /// Set once the "no target" condition has been logged
    idle_logged: bool,
}

impl Enemy {
    pub fn new(id: u32, tuning: EnemyTuning, position: Vec3, spawned_by: Option<SpawnerId>) -> Self {
        Self {
            id,
            movement: MovementController::new(
                position,
                tuning.gravity,
                tuning.grounded_velocity,
                tuning.rotation_speed,
            ),
            behavior: BehaviorMachine::new(&tuning),
            attack: AttackSequence::new(&tuning),
            zone: DamageZone::default(),
            spawned_by,
            destroyed: false,
            idle_logged: false,
            tuning,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.movement.position()
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    pub fn state(&self) -> EnemyState {
        self.behavior.state()
    }

    pub fn behavior(&self) -> &BehaviorMachine {
        &self.behavior
    }

    pub fn attack(&self) -> &AttackSequence {
        &self.attack
    }

    pub fn spawned_by(&self) -> Option<SpawnerId> {
        self.spawned_by
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Combat relationship with a target at `target`
    pub fn combat_state(&self, target: Vec3) -> CombatState {
        let in_range = self.position().distance(target) <= self.tuning.attack_radius;
        self.attack.status(in_range)
    }

    /// Per-tick update. Returns false once the enemy has destroyed itself.
    pub fn update(
        &mut self,
        target: Option<TargetInfo>,
        env: &dyn Environment,
        rng: &mut Rng,
        dt: f32,
    ) -> bool {
        if self.destroyed {
            return false;
        }

        let target = target.filter(|t| t.alive).map(|t| t.position);
        match target {
            None if !self.idle_logged => {
                info!("Enemy {}: no live target, standing idle", self.id);
                self.idle_logged = true;
            }
            Some(_) => self.idle_logged = false,
            None => {}
        }

        let position = self.position();
        let distance = target.map(|t| position.distance(t));
        let decision = self
            .behavior
            .evaluate(distance, self.attack.is_committed(), rng, dt);

        match decision {
            Decision::Hold => {}
            Decision::Attack => {
                if let Some(target) = target {
                    let direction = flat_direction(target - position);
                    if self.attack.try_begin(direction) {
                        debug!("Enemy {} attacking", self.id);
                    }
                }
            }
            Decision::Chase => {
                if let Some(target) = target {
                    let direction = flat_direction(target - position);
                    self.step(env, direction, self.tuning.move_speed, dt);
                }
            }
            Decision::Search { direction } => {
                let direction =
                    if env.obstacle_ahead(position, direction, self.tuning.search_probe) {
                        self.behavior.reverse_search();
                        -direction
                    } else {
                        direction
                    };
                self.step(env, direction, self.tuning.search_speed, dt);
            }
            Decision::Expire => {
                info!("Enemy {} lost the player and despawned", self.id);
                self.destroy();
                return false;
            }
        }

        self.movement.apply_gravity(env, dt);

        match self.attack.advance(&mut self.movement, dt) {
            Some(AttackSignal::WindowOpened) => self.zone.enable(),
            Some(AttackSignal::WindowClosed) => self.zone.disable(),
            Some(AttackSignal::Ready) | None => {}
        }
        true
    }

    fn step(&mut self, env: &dyn Environment, direction: Vec3, speed: f32, dt: f32) {
        self.movement.move_horizontal(env, direction, speed, dt);
        self.movement.face_movement(direction, dt);
    }

    /// Center of the damage zone, just in front of the enemy
    pub fn damage_zone_center(&self) -> Vec3 {
        self.position() + self.movement.forward() * self.tuning.damage_zone_reach
    }

    /// Test the damage zone against a body at `position` with `radius`.
    /// Yields a trigger only on the tick a new overlap begins.
    pub fn sense_overlap(&mut self, position: Vec3, radius: f32) -> Option<Trigger> {
        let reach = self.tuning.damage_zone_radius + radius;
        let overlapping = self.damage_zone_center().distance(position) <= reach;
        if self.zone.sense(overlapping) {
            Some(Trigger::EnemyDamageZone {
                damage: self.tuning.attack_damage,
                intimidation: self.tuning.intimidation,
            })
        } else {
            None
        }
    }

    /// Mark the enemy for removal
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.zone.disable();
        self.attack.cancel();
    }

    /// Destruction hook. Yields the notice for the owning spawner exactly once.
    pub fn on_destroy(&mut self) -> Option<DestroyNotice> {
        if !self.destroyed {
            return None;
        }
        self.spawned_by.take().map(|spawner| DestroyNotice {
            enemy: self.id,
            spawned_by: Some(spawner),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::world::FlatArena;

    const DT: f32 = 1.0 / 60.0;

    fn enemy_at(position: Vec3) -> Enemy {
        Enemy::new(1, EnemyTuning::default(), position, Some(SpawnerId(0)))
    }

    fn target(position: Vec3) -> Option<TargetInfo> {
        Some(TargetInfo {
            position,
            alive: true,
        })
    }

    #[test]
    fn test_chases_visible_target() {
        let arena = FlatArena::default();
        let mut rng = Rng::with_seed(1);
        let mut enemy = enemy_at(Vec3::ZERO);
        let goal = Vec3::new(0.0, 0.0, 10.0);
        enemy.update(target(goal), &arena, &mut rng, 0.5);
        assert_eq!(enemy.state(), EnemyState::Chasing);
        assert!((enemy.position().z - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_in_attack_range_does_not_move() {
        let arena = FlatArena::default();
        let mut rng = Rng::with_seed(1);
        let mut enemy = enemy_at(Vec3::ZERO);
        enemy.update(target(Vec3::new(0.0, 0.0, 1.5)), &arena, &mut rng, DT);
        assert_eq!(enemy.state(), EnemyState::Attacking);
        assert_eq!(enemy.position().x, 0.0);
        assert_eq!(enemy.position().z, 0.0);
        assert!(enemy.attack().is_busy());
    }

    #[test]
    fn test_damage_once_per_window() {
        let arena = FlatArena::default();
        let mut rng = Rng::with_seed(1);
        let mut enemy = enemy_at(Vec3::ZERO);
        let player = Vec3::new(0.0, 0.0, 1.5);

        let mut hits = 0;
        // Long enough for one full attack but not the next
        for _ in 0..120 {
            enemy.update(target(player), &arena, &mut rng, DT);
            if enemy.sense_overlap(player, 0.5).is_some() {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_repeat_attack_after_cooldown() {
        let arena = FlatArena::default();
        let mut rng = Rng::with_seed(1);
        let mut enemy = enemy_at(Vec3::ZERO);
        let player = Vec3::new(0.0, 0.0, 1.5);

        let mut hits = 0;
        // window 1.07 s + cooldown 2 s, twice over
        for _ in 0..(60 * 7) {
            enemy.update(target(player), &arena, &mut rng, DT);
            if enemy.sense_overlap(player, 0.5).is_some() {
                hits += 1;
            }
        }
        assert_eq!(hits, 3);
    }

    #[test]
    fn test_dead_target_leaves_enemy_idle() {
        let arena = FlatArena::default();
        let mut rng = Rng::with_seed(1);
        let mut enemy = enemy_at(Vec3::ZERO);
        let dead = Some(TargetInfo {
            position: Vec3::new(0.0, 0.0, 5.0),
            alive: false,
        });
        assert!(enemy.update(dead, &arena, &mut rng, 1.0));
        assert_eq!(enemy.state(), EnemyState::Idle);
        assert_eq!(enemy.position(), Vec3::ZERO);
        assert!(enemy.update(None, &arena, &mut rng, 1.0));
        assert_eq!(enemy.state(), EnemyState::Idle);
    }

    #[test]
    fn test_search_expires_and_reports_spawner() {
        let arena = FlatArena::default();
        let mut rng = Rng::with_seed(3);
        let mut enemy = enemy_at(Vec3::ZERO);
        let far = Vec3::new(0.0, 0.0, 40.0);

        let mut alive = true;
        for _ in 0..12 {
            alive = enemy.update(target(far), &arena, &mut rng, 1.0);
            if !alive {
                break;
            }
        }
        assert!(!alive);
        assert!(enemy.is_destroyed());
        assert_eq!(
            enemy.on_destroy(),
            Some(DestroyNotice {
                enemy: 1,
                spawned_by: Some(SpawnerId(0)),
            })
        );
        assert_eq!(enemy.on_destroy(), None, "notice is sent once");
    }

    #[test]
    fn test_target_overhead_still_hits() {
        let arena = FlatArena::default();
        let mut rng = Rng::with_seed(1);
        let mut enemy = enemy_at(Vec3::ZERO);
        let player = Vec3::new(0.0, 0.5, 0.0);

        let mut hits = 0;
        for _ in 0..120 {
            enemy.update(target(player), &arena, &mut rng, DT);
            if enemy.sense_overlap(player, 0.5).is_some() {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_search_expires_while_target_dead() {
        let arena = FlatArena::default();
        let mut rng = Rng::with_seed(3);
        let mut enemy = enemy_at(Vec3::ZERO);
        assert!(enemy.update(target(Vec3::new(0.0, 0.0, 40.0)), &arena, &mut rng, 1.0));
        assert!(enemy.behavior().is_searching());

        let dead = Some(TargetInfo {
            position: Vec3::new(0.0, 0.0, 40.0),
            alive: false,
        });
        let mut alive = true;
        for _ in 0..30 {
            alive = enemy.update(dead, &arena, &mut rng, 1.0);
            if !alive {
                break;
            }
        }
        assert!(!alive);
        assert!(enemy.is_destroyed());
    }

    #[test]
    fn test_search_reverses_at_wall() {
        let arena = FlatArena::new(-1.0, 1.0, -1.0, 1.0);
        let mut rng = Rng::with_seed(5);
        let mut enemy = enemy_at(Vec3::ZERO);
        let far = Vec3::new(0.0, 0.0, 40.0);
        for _ in 0..600 {
            enemy.update(target(far), &arena, &mut rng, DT);
        }
        let p = enemy.position();
        assert!(p.x.abs() <= 1.0 && p.z.abs() <= 1.0);
        assert!(enemy.behavior().is_searching());
    }

    #[test]
    fn test_reacquire_cancels_search() {
        let arena = FlatArena::default();
        let mut rng = Rng::with_seed(9);
        let mut enemy = enemy_at(Vec3::ZERO);
        enemy.update(target(Vec3::new(0.0, 0.0, 40.0)), &arena, &mut rng, 5.0);
        assert_eq!(enemy.state(), EnemyState::Searching);
        let near = enemy.position() + Vec3::new(0.0, 0.0, 5.0);
        enemy.update(target(near), &arena, &mut rng, DT);
        assert_eq!(enemy.state(), EnemyState::Chasing);
        assert!(!enemy.behavior().is_searching());
    }
}
