// Game session: owns every actor and runs one deterministic tick
//
// Tick order: player -> enemies -> overlaps -> collectable expiry ->
// spawners -> destruction notices -> HUD -> camera -> autosave.

use fastrand::Rng;
use log::{debug, info};

use crate::engine::input::InputFrame;
use crate::engine::prefs::PrefsStore;
use crate::engine::scene::{GameMenu, MenuManager, SceneDirector, SceneId};
use crate::engine::world::Environment;
use crate::game::camera::CameraRig;
use crate::game::characters::{Player, PlayerEvent, Trigger};
use crate::game::collectable::Collectable;
use crate::game::config::{EnemyTuning, GameConfig};
use crate::game::enemies::{Enemy, TargetInfo};
use crate::game::hud::Hud;
use crate::game::save::SaveSystem;
use crate::game::spawning::{SpawnCoordinator, SpawnerId};

const ENEMY_SPAWNER: SpawnerId = SpawnerId(0);
const OBJECT_SPAWNER: SpawnerId = SpawnerId(1);

/// Running totals for logging
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    pub ticks: u64,
    pub simulated: f32,
    pub enemies_spawned: u32,
    pub enemies_despawned: u32,
    pub items_spawned: u32,
    pub items_collected: u32,
    pub items_expired: u32,
    pub deaths: u32,
}

/// One running game scene
pub struct GameSession<E: Environment, S: PrefsStore> {
    config: GameConfig,
    env: E,
    prefs: S,
    rng: Rng,
    player: Player,
    enemies: Vec<Enemy>,
    collectables: Vec<Collectable>,
    enemy_spawner: SpawnCoordinator<EnemyTuning>,
    object_spawner: SpawnCoordinator<()>,
    hud: Hud,
    camera: CameraRig,
    saves: SaveSystem,
    scenes: SceneDirector,
    main_menu: MenuManager,
    game_menu: GameMenu,
    next_enemy_id: u32,
    events: Vec<PlayerEvent>,
    stats: SessionStats,
}

impl<E: Environment, S: PrefsStore> GameSession<E, S> {
    /// Build the Game scene and restore the last save
    pub fn new(config: GameConfig, env: E, prefs: S, rng: Rng) -> Self {
        let player = Player::new(config.player.clone(), config.player.respawn_point);
        let enemy_spawner = SpawnCoordinator::new(
            ENEMY_SPAWNER,
            "enemies",
            vec![config.enemy.clone()],
            config.enemy_spawner.clone(),
        );
        let object_spawner = SpawnCoordinator::new(
            OBJECT_SPAWNER,
            "collectables",
            vec![()],
            config.object_spawner.clone(),
        );
        let hud = Hud::new(&config.hud, &player);
        let camera = CameraRig::new(&config.camera, player.position());
        let saves = SaveSystem::new(config.save.clone());

        let mut session = Self {
            env,
            prefs,
            rng,
            player,
            enemies: Vec::new(),
            collectables: Vec::new(),
            enemy_spawner,
            object_spawner,
            hud,
            camera,
            saves,
            scenes: SceneDirector::new(SceneId::Game),
            main_menu: MenuManager,
            game_menu: GameMenu::new(),
            next_enemy_id: 0,
            events: Vec::new(),
            stats: SessionStats::default(),
            config,
        };
        session.start();
        session
    }

    /// Scene start: restore the save and place the camera
    pub fn start(&mut self) {
        self.saves.load(&mut self.player, &self.prefs);
        self.camera.snap_to(self.player.position());
        self.hud = Hud::new(&self.config.hud, &self.player);
        info!("Game scene started");
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn collectables(&self) -> &[Collectable] {
        &self.collectables
    }

    #[cfg(test)]
    pub(crate) fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    pub fn enemy_spawner(&self) -> &SpawnCoordinator<EnemyTuning> {
        &self.enemy_spawner
    }

    pub fn object_spawner(&self) -> &SpawnCoordinator<()> {
        &self.object_spawner
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn prefs(&self) -> &S {
        &self.prefs
    }

    pub fn scenes_mut(&mut self) -> &mut SceneDirector {
        &mut self.scenes
    }

    pub fn game_menu(&self) -> &GameMenu {
        &self.game_menu
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Player events since the last call
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the scene by one fixed step. Nothing runs outside the Game scene.
    pub fn tick(&mut self, input: &InputFrame, dt: f32) {
        if self.scenes.current() != SceneId::Game {
            return;
        }
        self.stats.ticks += 1;
        self.stats.simulated += dt;

        self.player.update(input, &self.env, dt);

        let target = TargetInfo {
            position: self.player.position(),
            alive: self.player.is_alive(),
        };
        for enemy in &mut self.enemies {
            enemy.update(Some(target), &self.env, &mut self.rng, dt);
        }

        self.resolve_overlaps();

        for item in &mut self.collectables {
            if item.update(dt) {
                self.stats.items_expired += 1;
            }
        }

        self.run_spawners(dt);
        self.process_destruction();
        self.collect_player_events();

        self.hud.update(&self.player, dt);
        self.camera.update(Some(self.player.position()), dt);
        self.saves.update(dt, &self.player, &mut self.prefs);
    }

    fn resolve_overlaps(&mut self) {
        let position = self.player.position();
        let tuning = self.player.tuning();
        let (body, pickup) = (tuning.body_radius, tuning.pickup_radius);

        for enemy in &mut self.enemies {
            if let Some(trigger) = enemy.sense_overlap(position, body) {
                self.player.on_trigger_enter(trigger);
            }
        }

        if !self.player.state().is_active() {
            return;
        }
        for item in &mut self.collectables {
            if item.overlaps(position, pickup) && item.collect() {
                self.player.on_trigger_enter(Trigger::Collectable);
                self.stats.items_collected += 1;
            }
        }
    }

    fn run_spawners(&mut self, dt: f32) {
        let protected = Some(self.player.position());

        if let Some(spawned) = self.enemy_spawner.update(dt, protected, &mut self.rng) {
            let id = self.next_enemy_id;
            self.next_enemy_id += 1;
            self.enemies.push(Enemy::new(
                id,
                spawned.prefab,
                spawned.position,
                Some(spawned.spawner),
            ));
            self.stats.enemies_spawned += 1;
        }

        if let Some(spawned) = self.object_spawner.update(dt, protected, &mut self.rng) {
            self.collectables.push(Collectable::new(
                spawned.position,
                self.object_spawner.lifetime(),
                Some(spawned.spawner),
            ));
            self.stats.items_spawned += 1;
        }
    }

    fn process_destruction(&mut self) {
        let mut notices = Vec::new();

        self.enemies.retain_mut(|enemy| {
            if !enemy.is_destroyed() {
                return true;
            }
            if let Some(notice) = enemy.on_destroy() {
                notices.push(notice.spawned_by);
            }
            false
        });
        let despawned = notices.len() as u32;

        self.collectables.retain(|item| {
            if item.is_removed() {
                notices.push(item.spawned_by());
                false
            } else {
                true
            }
        });

        self.stats.enemies_despawned += despawned;
        for spawner in notices.into_iter().flatten() {
            self.notify_spawner(spawner);
        }
    }

    fn notify_spawner(&mut self, spawner: SpawnerId) {
        if spawner == self.enemy_spawner.id() {
            self.enemy_spawner.on_instance_destroyed();
        } else if spawner == self.object_spawner.id() {
            self.object_spawner.on_instance_destroyed();
        } else {
            debug!("Destruction notice for unknown spawner {:?}", spawner);
        }
    }

    fn collect_player_events(&mut self) {
        for event in self.player.drain_events() {
            match event {
                PlayerEvent::Died => self.stats.deaths += 1,
                PlayerEvent::Collected { total } => debug!("Collected: {}", total),
                PlayerEvent::Hit { .. } | PlayerEvent::GameOver { .. } => {}
            }
            self.events.push(event);
        }
    }

    /// Death panel's respawn button
    pub fn respawn_player(&mut self) -> bool {
        let respawned = self.player.respawn();
        if respawned {
            self.camera.snap_to(self.player.position());
        }
        respawned
    }

    /// Game-over panel's button: save, reset the player, save again and
    /// head back to the main menu. Only valid after game over.
    pub fn return_to_main_menu(&mut self) -> bool {
        if !self.player.is_game_over() {
            return false;
        }
        self.saves.save_current_state(&self.player, &mut self.prefs);
        self.player.reset_after_game_over();
        self.saves.save_current_state(&self.player, &mut self.prefs);
        self.unload_actors();
        self.game_menu.back(&mut self.scenes);
        true
    }

    /// In-game menu: back to the main menu
    pub fn back_to_menu(&mut self) {
        self.saves.save_current_state(&self.player, &mut self.prefs);
        self.unload_actors();
        self.game_menu.back(&mut self.scenes);
    }

    /// In-game menu: quit the game
    pub fn exit_game(&mut self) {
        self.saves.save_current_state(&self.player, &mut self.prefs);
        self.game_menu.exit(&mut self.scenes);
    }

    pub fn toggle_settings(&mut self) {
        self.game_menu.toggle_settings();
    }

    /// Main menu: Play
    pub fn play(&mut self) {
        self.main_menu.play(&mut self.scenes);
    }

    /// Main menu: Exit
    pub fn quit_from_menu(&mut self) {
        self.main_menu.exit(&mut self.scenes);
    }

    /// Leaving the scene destroys every spawned actor
    fn unload_actors(&mut self) {
        for enemy in &mut self.enemies {
            enemy.destroy();
        }
        for item in &mut self.collectables {
            item.collect();
        }
        self.process_destruction();
    }
}
