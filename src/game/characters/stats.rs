// Actor resource container
//
// Every write goes through `set`, which clamps into [0, max] and refreshes the
// cached HUD tiers. Out of range input is never an error.

use crate::core::math::clamp;
use crate::game::config::PlayerTuning;

/// A clamped float resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Health,
    Fear,
    Stamina,
    Dash,
    /// Time remaining in the round
    Time,
}

/// Upper bounds for each field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatLimits {
    pub max_health: f32,
    pub max_fear: f32,
    pub max_stamina: f32,
    pub max_dash: f32,
    pub game_duration: f32,
}

impl StatLimits {
    pub fn from_tuning(tuning: &PlayerTuning) -> Self {
        Self {
            max_health: tuning.max_health,
            max_fear: tuning.max_fear,
            max_stamina: tuning.max_stamina,
            max_dash: tuning.max_dash,
            game_duration: tuning.game_duration,
        }
    }

    pub fn max(&self, field: StatField) -> f32 {
        match field {
            StatField::Health => self.max_health,
            StatField::Fear => self.max_fear,
            StatField::Stamina => self.max_stamina,
            StatField::Dash => self.max_dash,
            StatField::Time => self.game_duration,
        }
    }
}

impl Default for StatLimits {
    fn default() -> Self {
        Self::from_tuning(&PlayerTuning::default())
    }
}

/// Icon indices shown on the HUD, derived from current/max
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiTiers {
    pub health: usize,
    pub fear: usize,
    pub dash: usize,
    /// Whole seconds shown by the timer text
    pub time_seconds: u32,
}

/// Health icon: 0 = full ... 5 = empty
pub fn health_tier(health: f32, max_health: f32) -> usize {
    let pct = percent(health, max_health);
    if pct >= 100.0 {
        0
    } else if pct >= 80.0 {
        1
    } else if pct >= 60.0 {
        2
    } else if pct >= 40.0 {
        3
    } else if pct > 0.0 {
        4
    } else {
        5
    }
}

/// Fear icon: 0 = terrified ... 4 = calm
pub fn fear_tier(fear: f32, max_fear: f32) -> usize {
    let pct = percent(fear, max_fear);
    if pct >= 100.0 {
        0
    } else if pct >= 75.0 {
        1
    } else if pct >= 50.0 {
        2
    } else if pct >= 25.0 {
        3
    } else {
        4
    }
}

/// Dash icon: 0 = three charges ... 3 = none
pub fn dash_tier(dash: f32) -> usize {
    if dash == 3.0 {
        0
    } else if dash >= 2.0 {
        1
    } else if dash >= 1.0 {
        2
    } else {
        3
    }
}

fn percent(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    value / max * 100.0
}

/// Resource state owned by a single actor
#[derive(Debug, Clone)]
pub struct ActorStats {
    limits: StatLimits,
    health: f32,
    fear: f32,
    stamina: f32,
    dash: f32,
    time: f32,
    collected: u32,
    tiers: UiTiers,
}

impl ActorStats {
    /// Full health and stamina, no fear or dash charges, full clock
    pub fn new(limits: StatLimits) -> Self {
        let mut stats = Self {
            limits,
            health: limits.max_health,
            fear: 0.0,
            stamina: limits.max_stamina,
            dash: 0.0,
            time: limits.game_duration,
            collected: 0,
            tiers: UiTiers::default(),
        };
        stats.refresh_tiers();
        stats
    }

    pub fn limits(&self) -> &StatLimits {
        &self.limits
    }

    /// Store `value` clamped to [0, max] and return what was stored
    pub fn set(&mut self, field: StatField, value: f32) -> f32 {
        // NaN would survive the comparisons in `clamp`
        let value = if value.is_nan() { 0.0 } else { value };
        let clamped = clamp(value, 0.0, self.limits.max(field));
        match field {
            StatField::Health => self.health = clamped,
            StatField::Fear => self.fear = clamped,
            StatField::Stamina => self.stamina = clamped,
            StatField::Dash => self.dash = clamped,
            StatField::Time => self.time = clamped,
        }
        if field != StatField::Stamina {
            self.refresh_tiers();
        }
        clamped
    }

    pub fn get(&self, field: StatField) -> f32 {
        match field {
            StatField::Health => self.health,
            StatField::Fear => self.fear,
            StatField::Stamina => self.stamina,
            StatField::Dash => self.dash,
            StatField::Time => self.time,
        }
    }

    /// Add `delta` (may be negative) and return the clamped result
    pub fn add(&mut self, field: StatField, delta: f32) -> f32 {
        self.set(field, self.get(field) + delta)
    }

    pub fn max(&self, field: StatField) -> f32 {
        self.limits.max(field)
    }

    pub fn is_full(&self, field: StatField) -> bool {
        self.get(field) >= self.max(field)
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn fear(&self) -> f32 {
        self.fear
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn dash(&self) -> f32 {
        self.dash
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    /// Set the collected count, floored at zero
    pub fn set_collected(&mut self, value: i64) -> u32 {
        self.collected = value.clamp(0, u32::MAX as i64) as u32;
        self.collected
    }

    pub fn tiers(&self) -> UiTiers {
        self.tiers
    }

    fn refresh_tiers(&mut self) {
        self.tiers = UiTiers {
            health: health_tier(self.health, self.limits.max_health),
            fear: fear_tier(self.fear, self.limits.max_fear),
            dash: dash_tier(self.dash),
            time_seconds: self.time.ceil() as u32,
        };
    }
}

impl Default for ActorStats {
    fn default() -> Self {
        Self::new(StatLimits::default())
    }
}
