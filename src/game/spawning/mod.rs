// Spawning
//
// Placement rules shared by every spawner, and the spawner itself.

pub mod spawner;

pub use spawner::{SpawnCoordinator, Spawned};

use fastrand::Rng;
use glam::Vec3;

/// Identity of a spawner, recorded on each instance it creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpawnerId(pub u32);

/// How long a spawner waits between cycles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnInterval {
    Fixed(f32),
    /// Re-rolled uniformly in `[min, max]` every cycle
    Random { min: f32, max: f32 },
}

impl SpawnInterval {
    /// Seconds until the next cycle
    pub fn roll(&self, rng: &mut Rng) -> f32 {
        match *self {
            Self::Fixed(seconds) => seconds.max(0.0),
            Self::Random { min, max } => {
                let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
                (lo + rng.f32() * (hi - lo)).max(0.0)
            }
        }
    }
}

/// Horizontal rectangle instances are placed in, at a fixed height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnArea {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub height: f32,
}

impl SpawnArea {
    /// Uniform random point inside the rectangle
    pub fn sample(&self, rng: &mut Rng) -> Vec3 {
        Vec3::new(
            self.min_x + rng.f32() * (self.max_x - self.min_x),
            self.height,
            self.min_z + rng.f32() * (self.max_z - self.min_z),
        )
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.z >= self.min_z && point.z <= self.max_z
    }
}

/// One placement attempt: random trials inside `area` that keep
/// `min_distance` away from the protected target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub area: SpawnArea,
    pub min_distance: f32,
    pub target: Option<Vec3>,
    pub max_attempts: u32,
}

impl SpawnRequest {
    /// First acceptable trial, or `None` when every trial was too close
    pub fn resolve(&self, rng: &mut Rng) -> Option<Vec3> {
        (0..self.max_attempts)
            .map(|_| self.area.sample(rng))
            .find(|candidate| match self.target {
                Some(target) => candidate.distance(target) >= self.min_distance,
                None => true,
            })
    }
}
