// Player character: locomotion, resources, timers and life cycle

use glam::Vec3;
use log::{debug, info};

use super::movement::MovementController;
use super::state::{PlayerState, PlayerStateMachine};
use super::stats::{ActorStats, StatField, StatLimits};
use crate::engine::input::InputFrame;
use crate::engine::timer::{Countdown, Repeating};
use crate::engine::world::Environment;
use crate::game::config::PlayerTuning;

/// Trigger volumes the player can enter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    Collectable,
    EnemyDamageZone { damage: f32, intimidation: f32 },
}

/// Things that happened to the player during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    Collected { total: u32 },
    Hit { damage: f32, health: f32 },
    Died,
    GameOver { collected: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DashSequence {
    Ready,
    Dashing { direction: Vec3, timer: Countdown },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StaminaRegen {
    Inactive,
    /// Delay before refilling starts
    Waiting(Countdown),
    Refilling(Repeating),
}

/// The player-controlled character
#[derive(Debug)]
pub struct Player {
    tuning: PlayerTuning,
    stats: ActorStats,
    movement: MovementController,
    state_machine: PlayerStateMachine,
    dash: DashSequence,
    regen: StaminaRegen,
    running: bool,
    /// Seconds since the last enemy hit
    since_last_hit: f32,
    fear_decay: Repeating,
    game_clock: Repeating,
    events: Vec<PlayerEvent>,
}

impl Player {
    pub fn new(tuning: PlayerTuning, spawn: Vec3) -> Self {
        let stats = ActorStats::new(StatLimits::from_tuning(&tuning));
        let movement = MovementController::new(
            spawn,
            tuning.gravity,
            tuning.grounded_velocity,
            tuning.turn_rate,
        );
        Self {
            fear_decay: Repeating::new(tuning.fear_decay_interval),
            game_clock: Repeating::new(1.0),
            stats,
            movement,
            state_machine: PlayerStateMachine::new(),
            dash: DashSequence::Ready,
            regen: StaminaRegen::Inactive,
            running: false,
            since_last_hit: 0.0,
            tuning,
            events: Vec::new(),
        }
    }

    pub fn stats(&self) -> &ActorStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut ActorStats {
        &mut self.stats
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    pub fn position(&self) -> Vec3 {
        self.movement.position()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.movement.teleport(position);
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    pub fn state(&self) -> PlayerState {
        self.state_machine.state()
    }

    pub fn is_alive(&self) -> bool {
        self.stats.health() > 0.0 && self.state() != PlayerState::Dead
    }

    pub fn is_dead(&self) -> bool {
        self.state() == PlayerState::Dead
    }

    pub fn is_game_over(&self) -> bool {
        self.state() == PlayerState::GameOver
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.dash, DashSequence::Dashing { .. })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_regenerating(&self) -> bool {
        self.regen != StaminaRegen::Inactive
    }

    /// Take everything that happened since the last call
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Per-tick update
    pub fn update(&mut self, input: &InputFrame, env: &dyn Environment, dt: f32) {
        self.state_machine.update(dt);

        // Clocks keep running while dead, like the round timer on screen
        if !self.is_game_over() {
            self.tick_game_clock(dt);
            self.tick_fear_decay(dt);
            self.tick_stamina_regen(dt);
        }

        if !self.state().is_active() {
            return;
        }

        self.handle_movement(input, env, dt);
        self.movement.apply_gravity(env, dt);
        self.start_regen_if_needed();
        self.handle_fear_damage(dt);
        self.check_death();
    }

    /// Trigger-overlap hook. Ignored unless the player is active.
    pub fn on_trigger_enter(&mut self, trigger: Trigger) {
        if !self.state().is_active() {
            return;
        }

        match trigger {
            Trigger::Collectable => {
                let total = self.stats.set_collected(self.stats.collected() as i64 + 1);
                self.stats.add(StatField::Health, self.tuning.collect_heal);
                self.events.push(PlayerEvent::Collected { total });
            }
            Trigger::EnemyDamageZone {
                damage,
                intimidation,
            } => {
                let health = self.stats.add(StatField::Health, -damage);
                self.stats.add(StatField::Fear, intimidation);
                self.since_last_hit = 0.0;
                debug!("Player hit! Damage: {}, Health: {}", damage, health);
                self.events.push(PlayerEvent::Hit { damage, health });
                self.check_death();
            }
        }
    }

    fn handle_movement(&mut self, input: &InputFrame, env: &dyn Environment, dt: f32) {
        let moving = input.has_direction();

        if !moving || self.stats.stamina() == 0.0 {
            self.running = false;
        }

        // A full stamina bar converts into a dash charge
        if self.stats.is_full(StatField::Stamina) && !self.stats.is_full(StatField::Dash) {
            self.stats.set(
                StatField::Stamina,
                self.stats.max(StatField::Stamina) * self.tuning.dash_recharge_fraction,
            );
            self.stats.add(StatField::Dash, 1.0);
        }

        if input.dash_pressed && moving {
            self.try_start_dash(input.direction);
        }

        self.running =
            input.run_held && moving && self.stats.stamina() > 0.0 && !self.is_dashing();

        if moving {
            let speed = if self.running {
                self.tuning.run_speed
            } else {
                self.tuning.walk_speed
            };
            self.movement.move_horizontal(env, input.direction, speed, dt);

            if self.running {
                self.stats
                    .add(StatField::Stamina, -self.tuning.run_stamina_cost * dt);
            }

            self.movement.face_movement(input.direction, dt);
        }

        self.advance_dash(env, dt);

        self.state_machine
            .locomote(moving, self.running, self.is_dashing());
    }

    fn try_start_dash(&mut self, direction: Vec3) {
        if self.is_dashing() {
            debug!("Dash ignored: already dashing");
            return;
        }
        if self.stats.dash() <= 0.0 {
            return;
        }
        self.stats.add(StatField::Dash, -1.0);
        self.dash = DashSequence::Dashing {
            direction,
            timer: Countdown::new(self.tuning.dash_time),
        };
    }

    fn advance_dash(&mut self, env: &dyn Environment, dt: f32) {
        if let DashSequence::Dashing { direction, timer } = &mut self.dash {
            self.movement
                .move_horizontal(env, *direction, self.tuning.dash_speed, dt);
            if timer.tick(dt) {
                self.dash = DashSequence::Ready;
            }
        }
    }

    fn start_regen_if_needed(&mut self) {
        if !self.stats.is_full(StatField::Stamina) && self.regen == StaminaRegen::Inactive {
            self.regen = StaminaRegen::Waiting(Countdown::new(self.tuning.stamina_regen_delay));
        }
    }

    fn tick_stamina_regen(&mut self, dt: f32) {
        if let StaminaRegen::Waiting(delay) = &mut self.regen {
            if delay.tick(dt) {
                self.regen =
                    StaminaRegen::Refilling(Repeating::fire_immediately(self.tuning.stamina_regen_interval));
            }
            return;
        }

        let mut finished = false;
        if let StaminaRegen::Refilling(timer) = &mut self.regen {
            for _ in 0..timer.tick(dt) {
                if self.stats.is_full(StatField::Stamina) {
                    break;
                }
                self.stats
                    .add(StatField::Stamina, self.tuning.stamina_regen_step);
            }
            finished = self.stats.is_full(StatField::Stamina);
        }
        if finished {
            self.regen = StaminaRegen::Inactive;
        }
    }

    fn tick_fear_decay(&mut self, dt: f32) {
        self.since_last_hit += dt;
        for _ in 0..self.fear_decay.tick(dt) {
            if self.since_last_hit >= self.tuning.fear_calm_time && self.stats.fear() > 0.0 {
                self.stats
                    .add(StatField::Fear, -self.tuning.fear_decay_amount);
            }
        }
    }

    fn tick_game_clock(&mut self, dt: f32) {
        for _ in 0..self.game_clock.tick(dt) {
            let remaining = self.stats.add(StatField::Time, -1.0);
            if remaining <= 0.0 {
                self.end_game();
                break;
            }
        }
    }

    fn handle_fear_damage(&mut self, dt: f32) {
        if self.stats.fear() >= self.stats.max(StatField::Fear) {
            self.stats
                .add(StatField::Health, -self.tuning.fear_damage_rate * dt);
        }
    }

    fn check_death(&mut self) {
        if self.stats.health() <= 0.0 && self.state_machine.die() {
            info!("Player is dead!");
            self.dash = DashSequence::Ready;
            self.running = false;
            self.events.push(PlayerEvent::Died);
        }
    }

    fn end_game(&mut self) {
        if self.state_machine.end_game() {
            let collected = self.stats.collected();
            info!("Game over! Collected items: {}", collected);
            self.dash = DashSequence::Ready;
            self.running = false;
            self.events.push(PlayerEvent::GameOver { collected });
        }
    }

    /// Bring a dead player back at the respawn point with penalties.
    /// Returns false when the player is not dead.
    pub fn respawn(&mut self) -> bool {
        if !self.is_dead() {
            return false;
        }

        self.movement.teleport(self.tuning.respawn_point);

        let collected = self.stats.collected() as i64 - self.tuning.respawn_collected_penalty as i64;
        self.stats.set_collected(collected);
        self.stats
            .add(StatField::Fear, self.tuning.respawn_fear_penalty);
        self.stats.set(StatField::Dash, 0.0);
        self.stats.set(StatField::Stamina, self.tuning.reset_stamina);
        self.stats
            .set(StatField::Health, self.stats.max(StatField::Health));

        self.state_machine.revive();
        info!("Player respawned at {:?}", self.tuning.respawn_point);
        true
    }

    /// Reset everything for a fresh round after game over.
    /// Returns false when the game is not over.
    pub fn reset_after_game_over(&mut self) -> bool {
        if !self.is_game_over() {
            return false;
        }

        self.movement.teleport(self.tuning.respawn_point);

        self.stats.set_collected(0);
        self.stats.set(StatField::Fear, 0.0);
        self.stats
            .set(StatField::Time, self.stats.max(StatField::Time));
        self.stats.set(StatField::Dash, 0.0);
        self.stats.set(StatField::Stamina, self.tuning.reset_stamina);
        self.stats
            .set(StatField::Health, self.stats.max(StatField::Health));

        self.regen = StaminaRegen::Inactive;
        self.game_clock.reset();
        self.fear_decay.reset();
        self.since_last_hit = 0.0;
        self.state_machine.revive();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::world::FlatArena;
    use approx::assert_abs_diff_eq;

    const DT: f32 = 1.0 / 60.0;

    fn grounded_player() -> (Player, FlatArena) {
        (Player::new(PlayerTuning::default(), Vec3::ZERO), FlatArena::default())
    }

    fn walk(direction: Vec3) -> InputFrame {
        InputFrame {
            direction,
            ..InputFrame::idle()
        }
    }

    fn hit(damage: f32) -> Trigger {
        Trigger::EnemyDamageZone {
            damage,
            intimidation: 0.0,
        }
    }

    #[test]
    fn test_walk_moves_at_walk_speed() {
        let (mut player, arena) = grounded_player();
        // Burn the first-tick dash recharge so stamina isn't full
        player.update(&walk(Vec3::X), &arena, 0.1);
        let x = player.position().x;
        player.update(&walk(Vec3::X), &arena, 0.1);
        assert_abs_diff_eq!(player.position().x - x, 1.0, epsilon = 1e-4);
        assert_eq!(player.state(), PlayerState::Walking);
    }

    #[test]
    fn test_full_stamina_converts_to_dash_charge() {
        let (mut player, arena) = grounded_player();
        player.update(&InputFrame::idle(), &arena, DT);
        assert_eq!(player.stats().dash(), 1.0);
        assert_eq!(player.stats().stamina(), 5.0);
    }

    #[test]
    fn test_running_drains_stamina() {
        let (mut player, arena) = grounded_player();
        player.stats_mut().set(StatField::Dash, 3.0);
        let run = InputFrame {
            direction: Vec3::Z,
            run_held: true,
            dash_pressed: false,
        };
        player.update(&run, &arena, 0.5);
        assert!(player.is_running());
        assert_abs_diff_eq!(player.stats().stamina(), 19.0, epsilon = 1e-4);
        assert_abs_diff_eq!(player.position().z, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_cannot_run_without_stamina() {
        let (mut player, arena) = grounded_player();
        player.stats_mut().set(StatField::Stamina, 0.0);
        let run = InputFrame {
            direction: Vec3::Z,
            run_held: true,
            dash_pressed: false,
        };
        player.update(&run, &arena, DT);
        assert!(!player.is_running());
        assert_eq!(player.state(), PlayerState::Walking);
    }

    #[test]
    fn test_dash_consumes_charge_and_rejects_retrigger() {
        let (mut player, arena) = grounded_player();
        player.stats_mut().set(StatField::Stamina, 10.0);
        player.stats_mut().set(StatField::Dash, 2.0);
        let dash = InputFrame {
            direction: Vec3::X,
            run_held: false,
            dash_pressed: true,
        };
        player.update(&dash, &arena, DT);
        assert!(player.is_dashing());
        assert_eq!(player.stats().dash(), 1.0);

        // Second press mid-dash is rejected
        player.update(&dash, &arena, DT);
        assert_eq!(player.stats().dash(), 1.0);
        assert_eq!(player.state(), PlayerState::Dashing);

        // Dash ends after its duration
        for _ in 0..20 {
            player.update(&walk(Vec3::X), &arena, DT);
        }
        assert!(!player.is_dashing());
    }

    #[test]
    fn test_dash_requires_direction_and_charge() {
        let (mut player, arena) = grounded_player();
        player.stats_mut().set(StatField::Stamina, 10.0);
        let idle_dash = InputFrame {
            dash_pressed: true,
            ..InputFrame::idle()
        };
        player.stats_mut().set(StatField::Dash, 1.0);
        player.update(&idle_dash, &arena, DT);
        assert!(!player.is_dashing());

        player.stats_mut().set(StatField::Dash, 0.0);
        let dash = InputFrame {
            direction: Vec3::X,
            dash_pressed: true,
            ..InputFrame::idle()
        };
        player.update(&dash, &arena, DT);
        assert!(!player.is_dashing());
    }

    #[test]
    fn test_stamina_regenerates_after_delay() {
        let (mut player, arena) = grounded_player();
        player.stats_mut().set(StatField::Dash, 3.0);
        player.stats_mut().set(StatField::Stamina, 10.0);

        player.update(&InputFrame::idle(), &arena, DT);
        assert!(player.is_regenerating());

        // Nothing during the 3s delay
        player.update(&InputFrame::idle(), &arena, 2.9);
        assert_eq!(player.stats().stamina(), 10.0);

        player.update(&InputFrame::idle(), &arena, 0.2);
        player.update(&InputFrame::idle(), &arena, 0.0);
        assert!(player.stats().stamina() > 10.0);
    }

    #[test]
    fn test_damage_scenario() {
        let (mut player, _arena) = grounded_player();
        player.on_trigger_enter(hit(3.0));
        player.on_trigger_enter(hit(3.0));
        assert_eq!(player.stats().health(), 14.0);
        player.on_trigger_enter(hit(100.0));
        assert_eq!(player.stats().health(), 0.0);
        assert!(player.is_dead());
    }

    #[test]
    fn test_death_event_fires_once() {
        let (mut player, arena) = grounded_player();
        player.on_trigger_enter(hit(100.0));
        player.on_trigger_enter(hit(100.0));
        player.update(&InputFrame::idle(), &arena, DT);
        let deaths = player
            .drain_events()
            .into_iter()
            .filter(|e| *e == PlayerEvent::Died)
            .count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_hit_adds_fear() {
        let (mut player, _arena) = grounded_player();
        player.on_trigger_enter(Trigger::EnemyDamageZone {
            damage: 3.0,
            intimidation: 3.0,
        });
        assert_eq!(player.stats().fear(), 3.0);
    }

    #[test]
    fn test_fear_decays_when_calm() {
        let (mut player, arena) = grounded_player();
        player.stats_mut().set(StatField::Fear, 5.0);
        for _ in 0..10 {
            player.update(&InputFrame::idle(), &arena, 1.0);
        }
        assert_eq!(player.stats().fear(), 4.0);
    }

    #[test]
    fn test_max_fear_drains_health() {
        let (mut player, arena) = grounded_player();
        player.stats_mut().set(StatField::Fear, 20.0);
        player.update(&InputFrame::idle(), &arena, 1.0);
        assert_abs_diff_eq!(player.stats().health(), 19.5, epsilon = 1e-4);
    }

    #[test]
    fn test_collect_heals_and_counts() {
        let (mut player, _arena) = grounded_player();
        player.stats_mut().set(StatField::Health, 10.0);
        player.on_trigger_enter(Trigger::Collectable);
        assert_eq!(player.stats().collected(), 1);
        assert_eq!(player.stats().health(), 10.5);
    }

    #[test]
    fn test_game_clock_ends_round_once() {
        let (mut player, arena) = grounded_player();
        player.stats_mut().set(StatField::Time, 2.0);
        player.update(&InputFrame::idle(), &arena, 1.0);
        assert!(!player.is_game_over());
        player.update(&InputFrame::idle(), &arena, 1.0);
        assert!(player.is_game_over());
        player.update(&InputFrame::idle(), &arena, 1.0);
        let overs = player
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, PlayerEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_respawn_only_when_dead() {
        let (mut player, _arena) = grounded_player();
        assert!(!player.respawn());

        player.stats_mut().set_collected(7);
        player.stats_mut().set(StatField::Fear, 19.0);
        player.on_trigger_enter(hit(100.0));
        assert!(player.respawn());

        assert_eq!(player.position(), Vec3::new(1.0, 4.0, 1.0));
        assert_eq!(player.stats().collected(), 2);
        assert_eq!(player.stats().fear(), 20.0);
        assert_eq!(player.stats().dash(), 0.0);
        assert_eq!(player.stats().stamina(), 10.0);
        assert_eq!(player.stats().health(), 20.0);
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn test_dead_player_is_inert() {
        let (mut player, arena) = grounded_player();
        player.on_trigger_enter(hit(100.0));
        let before = player.position();
        player.update(&walk(Vec3::X), &arena, 0.5);
        assert_eq!(player.position(), before);
        player.on_trigger_enter(Trigger::Collectable);
        assert_eq!(player.stats().collected(), 0);
    }

    #[test]
    fn test_reset_after_game_over() {
        let (mut player, arena) = grounded_player();
        assert!(!player.reset_after_game_over());

        player.stats_mut().set_collected(9);
        player.stats_mut().set(StatField::Time, 1.0);
        player.update(&InputFrame::idle(), &arena, 1.0);
        assert!(player.is_game_over());

        assert!(player.reset_after_game_over());
        assert_eq!(player.stats().collected(), 0);
        assert_eq!(player.stats().time(), 120.0);
        assert_eq!(player.stats().health(), 20.0);
        assert_eq!(player.state(), PlayerState::Idle);
    }
}
