// Game tuning - defaults plus optional INI overrides
//
// Every number the simulation uses lives here. The defaults reproduce the
// shipped game; an INI file may override any subset of them.
//
// ```ini
// [player]
// walk_speed = 10
// run_speed = 20
//
// [enemy]
// sight_radius = 13.9
//
// [enemy_spawner]
// max_active = 8
// interval_min = 3
// interval_max = 7
// ```

use configparser::ini::Ini;
use glam::Vec3;
use log::info;
use std::path::Path;

use super::spawning::{SpawnArea, SpawnInterval};

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(String),

    #[error("Invalid value for [{section}] {key}: {message}")]
    Invalid {
        section: String,
        key: String,
        message: String,
    },
}

/// Player movement, resources and timers
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTuning {
    // Movement
    pub walk_speed: f32,
    pub run_speed: f32,
    pub dash_speed: f32,
    /// How long a dash lasts (seconds)
    pub dash_time: f32,
    pub gravity: f32,
    /// Vertical velocity held while grounded, keeps the actor pressed onto the floor
    pub grounded_velocity: f32,
    /// Heading interpolation rate (fraction of remaining angle per second)
    pub turn_rate: f32,

    // Limits
    pub max_health: f32,
    pub max_fear: f32,
    pub max_stamina: f32,
    pub max_dash: f32,
    pub game_duration: f32,

    // Resource rules
    pub run_stamina_cost: f32,
    /// Stamina left after converting a full bar into a dash charge
    pub dash_recharge_fraction: f32,
    pub stamina_regen_delay: f32,
    pub stamina_regen_step: f32,
    pub stamina_regen_interval: f32,
    pub fear_decay_interval: f32,
    /// Time without being hit before fear starts to decay
    pub fear_calm_time: f32,
    pub fear_decay_amount: f32,
    /// Health lost per second while fear is maxed out
    pub fear_damage_rate: f32,
    pub collect_heal: f32,

    // Respawn
    pub respawn_point: Vec3,
    pub respawn_collected_penalty: u32,
    pub respawn_fear_penalty: f32,
    pub reset_stamina: f32,

    // Trigger volumes
    pub body_radius: f32,
    pub pickup_radius: f32,
}

pub const DEFAULT_PLAYER: PlayerTuning = PlayerTuning {
    walk_speed: 10.0,
    run_speed: 20.0,
    dash_speed: 15.0,
    dash_time: 0.2,
    gravity: -9.81,
    grounded_velocity: -2.0,
    turn_rate: 10.0,

    max_health: 20.0,
    max_fear: 20.0,
    max_stamina: 20.0,
    max_dash: 3.0,
    game_duration: 120.0,

    run_stamina_cost: 2.0,
    dash_recharge_fraction: 0.25,
    stamina_regen_delay: 3.0,
    stamina_regen_step: 0.1,
    stamina_regen_interval: 0.15,
    fear_decay_interval: 10.0,
    fear_calm_time: 10.0,
    fear_decay_amount: 1.0,
    fear_damage_rate: 0.5,
    collect_heal: 0.5,

    respawn_point: Vec3::new(1.0, 4.0, 1.0),
    respawn_collected_penalty: 5,
    respawn_fear_penalty: 3.0,
    reset_stamina: 10.0,

    body_radius: 0.5,
    pickup_radius: 1.0,
};

impl Default for PlayerTuning {
    fn default() -> Self {
        DEFAULT_PLAYER
    }
}

/// Enemy senses, movement and attack
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyTuning {
    pub move_speed: f32,
    pub sight_radius: f32,
    pub attack_radius: f32,
    pub gravity: f32,
    pub grounded_velocity: f32,
    pub rotation_speed: f32,
    pub search_time: f32,
    pub search_speed: f32,
    /// Length of the obstacle probe while searching
    pub search_probe: f32,

    pub attack_damage: f32,
    pub intimidation: f32,
    pub attack_cooldown: f32,
    /// How long the damage zone stays active
    pub damage_window: f32,
    pub facing_tolerance_deg: f32,
    /// Damage zone sits this far in front of the enemy
    pub damage_zone_reach: f32,
    pub damage_zone_radius: f32,
}

pub const DEFAULT_ENEMY: EnemyTuning = EnemyTuning {
    move_speed: 3.0,
    sight_radius: 13.9,
    attack_radius: 2.0,
    gravity: -9.81,
    grounded_velocity: -2.0,
    rotation_speed: 2.0,
    search_time: 11.0,
    search_speed: 2.0,
    search_probe: 1.0,

    attack_damage: 3.0,
    intimidation: 3.0,
    attack_cooldown: 2.0,
    damage_window: 1.07,
    facing_tolerance_deg: 1.0,
    damage_zone_reach: 1.0,
    damage_zone_radius: 1.0,
};

impl Default for EnemyTuning {
    fn default() -> Self {
        DEFAULT_ENEMY
    }
}

/// Spawner population, cadence and placement
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnerTuning {
    pub max_active: u32,
    pub interval: SpawnInterval,
    pub area: SpawnArea,
    pub min_distance_from_target: f32,
    pub max_attempts: u32,
    /// Spawned instances expire after this long, if set
    pub lifetime: Option<f32>,
}

pub const DEFAULT_SPAWN_AREA: SpawnArea = SpawnArea {
    min_x: -50.0,
    max_x: 50.0,
    min_z: -50.0,
    max_z: 50.0,
    height: 0.0,
};

pub const DEFAULT_ENEMY_SPAWNER: SpawnerTuning = SpawnerTuning {
    max_active: 8,
    interval: SpawnInterval::Random { min: 3.0, max: 7.0 },
    area: DEFAULT_SPAWN_AREA,
    min_distance_from_target: 10.0,
    max_attempts: 30,
    lifetime: None,
};

pub const DEFAULT_OBJECT_SPAWNER: SpawnerTuning = SpawnerTuning {
    max_active: 10,
    interval: SpawnInterval::Fixed(1.0),
    area: DEFAULT_SPAWN_AREA,
    min_distance_from_target: 5.0,
    max_attempts: 30,
    lifetime: Some(30.0),
};

/// Camera rig placement
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTuning {
    pub offset: Vec3,
    pub smooth_speed: f32,
    /// Fixed euler rotation in degrees
    pub rotation_deg: Vec3,
}

pub const DEFAULT_CAMERA: CameraTuning = CameraTuning {
    offset: Vec3::new(0.0, 5.0, -5.0),
    smooth_speed: 0.125,
    rotation_deg: Vec3::new(45.0, 0.0, 0.0),
};

/// Save cadence and the values used when a key is missing
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTuning {
    pub autosave_interval: f32,
    pub default_stamina: f32,
    pub default_fear: f32,
    pub default_hp: f32,
    pub default_dash: f32,
    pub default_time: f32,
    pub default_collected: i64,
}

pub const DEFAULT_SAVE: SaveTuning = SaveTuning {
    autosave_interval: 1.0,
    default_stamina: 20.0,
    default_fear: 0.0,
    default_hp: 20.0,
    default_dash: 0.0,
    default_time: 120.0,
    default_collected: 0,
};

/// HUD animation timing
#[derive(Debug, Clone, PartialEq)]
pub struct HudTuning {
    pub stamina_transition: f32,
}

pub const DEFAULT_HUD: HudTuning = HudTuning {
    stamina_transition: 0.2,
};

/// Full game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub enemy_spawner: SpawnerTuning,
    pub object_spawner: SpawnerTuning,
    pub camera: CameraTuning,
    pub save: SaveTuning,
    pub hud: HudTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: DEFAULT_PLAYER,
            enemy: DEFAULT_ENEMY,
            enemy_spawner: DEFAULT_ENEMY_SPAWNER,
            object_spawner: DEFAULT_OBJECT_SPAWNER,
            camera: DEFAULT_CAMERA,
            save: DEFAULT_SAVE,
            hud: DEFAULT_HUD,
        }
    }
}

/// Typed reads over a parsed INI. Missing keys leave the field untouched.
struct IniReader<'a> {
    ini: &'a Ini,
}

impl IniReader<'_> {
    fn invalid(section: &str, key: &str, message: String) -> ConfigError {
        ConfigError::Invalid {
            section: section.to_string(),
            key: key.to_string(),
            message,
        }
    }

    fn f32(&self, section: &str, key: &str, field: &mut f32) -> Result<(), ConfigError> {
        match self.ini.getfloat(section, key) {
            Ok(Some(value)) => *field = value as f32,
            Ok(None) => {}
            Err(e) => return Err(Self::invalid(section, key, e)),
        }
        Ok(())
    }

    /// Like `f32`, but the value must be strictly positive
    fn positive_f32(&self, section: &str, key: &str, field: &mut f32) -> Result<(), ConfigError> {
        let mut value = *field;
        self.f32(section, key, &mut value)?;
        if !(value > 0.0 && value.is_finite()) {
            return Err(Self::invalid(
                section,
                key,
                format!("{value} must be a positive number"),
            ));
        }
        *field = value;
        Ok(())
    }

    fn u32(&self, section: &str, key: &str, field: &mut u32) -> Result<(), ConfigError> {
        match self.ini.getuint(section, key) {
            Ok(Some(value)) => {
                *field = u32::try_from(value)
                    .map_err(|_| Self::invalid(section, key, format!("{value} out of range")))?;
            }
            Ok(None) => {}
            Err(e) => return Err(Self::invalid(section, key, e)),
        }
        Ok(())
    }

    fn vec3(&self, section: &str, prefix: &str, field: &mut Vec3) -> Result<(), ConfigError> {
        self.f32(section, &format!("{prefix}_x"), &mut field.x)?;
        self.f32(section, &format!("{prefix}_y"), &mut field.y)?;
        self.f32(section, &format!("{prefix}_z"), &mut field.z)?;
        Ok(())
    }

    fn spawner(&self, section: &str, tuning: &mut SpawnerTuning) -> Result<(), ConfigError> {
        self.u32(section, "max_active", &mut tuning.max_active)?;
        self.u32(section, "max_attempts", &mut tuning.max_attempts)?;
        self.f32(section, "min_distance", &mut tuning.min_distance_from_target)?;
        self.f32(section, "area_min_x", &mut tuning.area.min_x)?;
        self.f32(section, "area_max_x", &mut tuning.area.max_x)?;
        self.f32(section, "area_min_z", &mut tuning.area.min_z)?;
        self.f32(section, "area_max_z", &mut tuning.area.max_z)?;
        self.f32(section, "height", &mut tuning.area.height)?;

        match &mut tuning.interval {
            SpawnInterval::Fixed(period) => self.f32(section, "interval", period)?,
            SpawnInterval::Random { min, max } => {
                self.f32(section, "interval_min", min)?;
                self.f32(section, "interval_max", max)?;
            }
        }

        if let Some(lifetime) = &mut tuning.lifetime {
            self.f32(section, "lifetime", lifetime)?;
        }
        Ok(())
    }
}

impl GameConfig {
    /// Load overrides from an INI file on top of the defaults
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut ini = Ini::new();
        ini.load(path).map_err(ConfigError::Load)?;
        let config = Self::from_ini(&ini)?;
        info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Parse overrides from INI text on top of the defaults
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(ConfigError::Load)?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let r = IniReader { ini };

        // [player]
        let p = &mut config.player;
        r.f32("player", "walk_speed", &mut p.walk_speed)?;
        r.f32("player", "run_speed", &mut p.run_speed)?;
        r.f32("player", "dash_speed", &mut p.dash_speed)?;
        r.f32("player", "dash_time", &mut p.dash_time)?;
        r.f32("player", "gravity", &mut p.gravity)?;
        r.positive_f32("player", "turn_rate", &mut p.turn_rate)?;
        r.f32("player", "max_health", &mut p.max_health)?;
        r.f32("player", "max_fear", &mut p.max_fear)?;
        r.f32("player", "max_stamina", &mut p.max_stamina)?;
        r.f32("player", "max_dash", &mut p.max_dash)?;
        r.f32("player", "game_duration", &mut p.game_duration)?;
        r.f32("player", "run_stamina_cost", &mut p.run_stamina_cost)?;
        r.f32("player", "fear_damage_rate", &mut p.fear_damage_rate)?;
        r.f32("player", "pickup_radius", &mut p.pickup_radius)?;
        r.vec3("player", "respawn", &mut p.respawn_point)?;

        // [enemy]
        let e = &mut config.enemy;
        r.f32("enemy", "move_speed", &mut e.move_speed)?;
        r.f32("enemy", "sight_radius", &mut e.sight_radius)?;
        r.f32("enemy", "attack_radius", &mut e.attack_radius)?;
        r.f32("enemy", "gravity", &mut e.gravity)?;
        r.positive_f32("enemy", "rotation_speed", &mut e.rotation_speed)?;
        r.f32("enemy", "search_time", &mut e.search_time)?;
        r.f32("enemy", "search_speed", &mut e.search_speed)?;
        r.f32("enemy", "attack_damage", &mut e.attack_damage)?;
        r.f32("enemy", "intimidation", &mut e.intimidation)?;
        r.f32("enemy", "attack_cooldown", &mut e.attack_cooldown)?;
        r.f32("enemy", "damage_window", &mut e.damage_window)?;

        r.spawner("enemy_spawner", &mut config.enemy_spawner)?;
        r.spawner("object_spawner", &mut config.object_spawner)?;

        // [camera]
        r.vec3("camera", "offset", &mut config.camera.offset)?;
        r.f32("camera", "smooth_speed", &mut config.camera.smooth_speed)?;

        // [save]
        r.f32("save", "autosave_interval", &mut config.save.autosave_interval)?;

        // [hud]
        r.f32("hud", "stamina_transition", &mut config.hud.stamina_transition)?;

        Ok(config)
    }
}
