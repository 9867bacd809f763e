// Collectable pickups

use glam::Vec3;

use crate::engine::timer::Countdown;
use crate::game::spawning::SpawnerId;

/// Why a collectable went away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Collected,
    Expired,
}

/// A pickup lying in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Collectable {
    position: Vec3,
    lifetime: Option<Countdown>,
    spawned_by: Option<SpawnerId>,
    removed: Option<Removal>,
}

impl Collectable {
    pub fn new(position: Vec3, lifetime: Option<f32>, spawned_by: Option<SpawnerId>) -> Self {
        Self {
            position,
            lifetime: lifetime.map(Countdown::new),
            spawned_by,
            removed: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn spawned_by(&self) -> Option<SpawnerId> {
        self.spawned_by
    }

    pub fn removal(&self) -> Option<Removal> {
        self.removed
    }

    pub fn is_removed(&self) -> bool {
        self.removed.is_some()
    }

    /// Age the pickup. Returns true on the tick it expires.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.removed.is_some() {
            return false;
        }
        let expired = self.lifetime.as_mut().is_some_and(|timer| timer.tick(dt));
        if expired {
            self.removed = Some(Removal::Expired);
        }
        expired
    }

    /// Whether a body at `position` with `radius` touches the pickup
    pub fn overlaps(&self, position: Vec3, radius: f32) -> bool {
        !self.is_removed() && self.position.distance(position) <= radius
    }

    /// Picked up by the player. False if it was already gone.
    pub fn collect(&mut self) -> bool {
        if self.removed.is_some() {
            return false;
        }
        self.removed = Some(Removal::Collected);
        true
    }
}
