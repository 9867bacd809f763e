// Population-capped spawner
//
// A spawner only counts its live instances. The session owns the instances
// themselves and reports each destruction back with the spawner's id.

use fastrand::Rng;
use glam::Vec3;
use log::{debug, error, warn};

use super::{SpawnRequest, SpawnerId};
use crate::engine::timer::Countdown;
use crate::game::config::SpawnerTuning;

/// A new instance the session should create
#[derive(Debug, Clone, PartialEq)]
pub struct Spawned<P> {
    pub prefab: P,
    pub position: Vec3,
    pub spawner: SpawnerId,
}

/// Keeps up to `max_active` instances alive, spawning on an interval
#[derive(Debug, Clone)]
pub struct SpawnCoordinator<P> {
    id: SpawnerId,
    name: String,
    prefabs: Vec<P>,
    tuning: SpawnerTuning,
    active: u32,
    next_cycle: Countdown,
    enabled: bool,
}

impl<P: Clone> SpawnCoordinator<P> {
    /// An empty prefab list leaves the spawner disabled
    pub fn new(id: SpawnerId, name: impl Into<String>, prefabs: Vec<P>, tuning: SpawnerTuning) -> Self {
        let name = name.into();
        let enabled = !prefabs.is_empty();
        if !enabled {
            error!("Spawner '{}' has no prefabs assigned, disabling it", name);
        }
        Self {
            id,
            name,
            prefabs,
            tuning,
            active: 0,
            // First cycle runs on the first tick
            next_cycle: Countdown::new(0.0),
            enabled,
        }
    }

    pub fn id(&self) -> SpawnerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn active_count(&self) -> u32 {
        self.active
    }

    pub fn max_active(&self) -> u32 {
        self.tuning.max_active
    }

    /// Lifetime given to each spawned instance, if they expire
    pub fn lifetime(&self) -> Option<f32> {
        self.tuning.lifetime
    }

    /// Advance the cycle timer. Yields at most one instance per tick.
    pub fn update(&mut self, dt: f32, target: Option<Vec3>, rng: &mut Rng) -> Option<Spawned<P>> {
        if !self.enabled || !self.next_cycle.tick(dt) {
            return None;
        }
        self.next_cycle = Countdown::new(self.tuning.interval.roll(rng));

        if self.active >= self.tuning.max_active {
            return None;
        }

        let request = SpawnRequest {
            area: self.tuning.area,
            min_distance: self.tuning.min_distance_from_target,
            target,
            max_attempts: self.tuning.max_attempts,
        };
        let Some(position) = request.resolve(rng) else {
            warn!(
                "Spawner '{}' found no position after {} attempts, skipping",
                self.name, self.tuning.max_attempts
            );
            return None;
        };

        let prefab = self.prefabs[rng.usize(..self.prefabs.len())].clone();
        self.active += 1;
        debug!(
            "Spawner '{}' spawned at {:?} ({}/{})",
            self.name, position, self.active, self.tuning.max_active
        );
        Some(Spawned {
            prefab,
            position,
            spawner: self.id,
        })
    }

    /// One of this spawner's instances went away
    pub fn on_instance_destroyed(&mut self) {
        self.active = self.active.saturating_sub(1);
    }
}
