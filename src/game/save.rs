// Save / load of the player's state through a flat key-value store
//
// Every key is written on each save (last write wins, no versioning). On load
// each key falls back to its default when absent, and values go through the
// stat setters so they are clamped like any other mutation.

use glam::Vec3;
use log::{debug, info, warn};

use crate::engine::prefs::PrefsStore;
use crate::engine::timer::Repeating;
use crate::game::characters::{Player, StatField};
use crate::game::config::SaveTuning;

pub const KEY_X: &str = "X";
pub const KEY_Y: &str = "Y";
pub const KEY_Z: &str = "Z";
pub const KEY_STAMINA: &str = "Stamina";
pub const KEY_FEAR: &str = "Fear";
pub const KEY_HP: &str = "HP";
pub const KEY_DASH: &str = "Dash";
pub const KEY_TIME: &str = "Time";
pub const KEY_COLLECTED: &str = "Collected";

/// Snapshot of everything that is persisted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaveRecord {
    pub position: Vec3,
    pub stamina: f32,
    pub fear: f32,
    pub hp: f32,
    pub dash: f32,
    pub time: f32,
    pub collected: i64,
}

impl SaveRecord {
    pub fn capture(player: &Player) -> Self {
        let stats = player.stats();
        Self {
            position: player.position(),
            stamina: stats.stamina(),
            fear: stats.fear(),
            hp: stats.health(),
            dash: stats.dash(),
            time: stats.time(),
            collected: stats.collected() as i64,
        }
    }

    pub fn write(&self, store: &mut dyn PrefsStore) {
        store.set_float(KEY_X, self.position.x);
        store.set_float(KEY_Y, self.position.y);
        store.set_float(KEY_Z, self.position.z);
        store.set_float(KEY_STAMINA, self.stamina);
        store.set_float(KEY_FEAR, self.fear);
        store.set_float(KEY_HP, self.hp);
        store.set_float(KEY_DASH, self.dash);
        store.set_float(KEY_TIME, self.time);
        store.set_int(KEY_COLLECTED, self.collected);
    }

    /// Read a record, filling absent keys from `defaults`. An absent
    /// position component keeps `position`.
    pub fn read(store: &dyn PrefsStore, defaults: &SaveTuning, position: Vec3) -> Self {
        let float = |key: &str, default: f32| store.get_float(key).unwrap_or(default);
        Self {
            position: Vec3::new(
                float(KEY_X, position.x),
                float(KEY_Y, position.y),
                float(KEY_Z, position.z),
            ),
            stamina: float(KEY_STAMINA, defaults.default_stamina),
            fear: float(KEY_FEAR, defaults.default_fear),
            hp: float(KEY_HP, defaults.default_hp),
            dash: float(KEY_DASH, defaults.default_dash),
            time: float(KEY_TIME, defaults.default_time),
            collected: store
                .get_int(KEY_COLLECTED)
                .unwrap_or(defaults.default_collected),
        }
    }

    pub fn apply(&self, player: &mut Player) {
        player.set_position(self.position);
        let stats = player.stats_mut();
        stats.set(StatField::Stamina, self.stamina);
        stats.set(StatField::Fear, self.fear);
        stats.set(StatField::Health, self.hp);
        stats.set(StatField::Dash, self.dash);
        stats.set(StatField::Time, self.time);
        stats.set_collected(self.collected);
    }
}

/// Periodic and on-demand persistence of the player
#[derive(Debug, Clone)]
pub struct SaveSystem {
    tuning: SaveTuning,
    autosave: Repeating,
}

impl SaveSystem {
    pub fn new(tuning: SaveTuning) -> Self {
        Self {
            autosave: Repeating::new(tuning.autosave_interval),
            tuning,
        }
    }

    /// Write every key and flush. A failed flush is logged, not fatal.
    pub fn save_current_state(&self, player: &Player, store: &mut dyn PrefsStore) {
        SaveRecord::capture(player).write(store);
        if let Err(e) = store.flush() {
            warn!("Failed to persist save data: {}", e);
        }
    }

    pub fn load(&self, player: &mut Player, store: &dyn PrefsStore) {
        let record = SaveRecord::read(store, &self.tuning, player.position());
        record.apply(player);
        info!(
            "Loaded save: hp {:.1}, time {:.0}, collected {}",
            record.hp, record.time, record.collected
        );
    }

    /// Autosave on its interval. Returns true when a save happened.
    pub fn update(&mut self, dt: f32, player: &Player, store: &mut dyn PrefsStore) -> bool {
        if self.autosave.tick(dt) == 0 {
            return false;
        }
        debug!("Autosave");
        self.save_current_state(player, store);
        true
    }
}
