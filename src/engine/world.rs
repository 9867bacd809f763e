// Environment queries supplied by the host
//
// The game never owns physics. Actors ask an `Environment` whether they stand
// on ground and whether an obstacle blocks a probe, and the environment snaps
// their position back onto walkable space.

use glam::Vec3;

/// Tolerance under which an actor counts as touching the ground
const GROUND_EPSILON: f32 = 0.01;

/// Result of moving an actor through the environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub position: Vec3,
    pub grounded: bool,
}

/// Ground and obstacle queries for actors
pub trait Environment {
    /// Height of the walkable surface under (x, z)
    fn ground_height(&self, x: f32, z: f32) -> f32;

    /// Whether a probe from `origin` along `direction` hits an obstacle within `distance`
    fn obstacle_ahead(&self, origin: Vec3, direction: Vec3, distance: f32) -> bool;

    /// Apply a displacement and resolve it against the world
    fn move_actor(&self, position: Vec3, displacement: Vec3) -> MoveResult;

    /// Whether `position` rests on (or below) the ground
    fn is_grounded(&self, position: Vec3) -> bool {
        position.y <= self.ground_height(position.x, position.z) + GROUND_EPSILON
    }
}

/// Flat, walled rectangular arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatArena {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub ground: f32,
}

impl FlatArena {
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
            ground: 0.0,
        }
    }

    fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }
}

impl Default for FlatArena {
    fn default() -> Self {
        Self::new(-60.0, 60.0, -60.0, 60.0)
    }
}

impl Environment for FlatArena {
    fn ground_height(&self, _x: f32, _z: f32) -> f32 {
        self.ground
    }

    fn obstacle_ahead(&self, origin: Vec3, direction: Vec3, distance: f32) -> bool {
        let probe = origin + direction.normalize_or_zero() * distance;
        !self.contains(probe.x, probe.z)
    }

    fn move_actor(&self, position: Vec3, displacement: Vec3) -> MoveResult {
        let mut next = position + displacement;
        next.x = next.x.clamp(self.min_x, self.max_x);
        next.z = next.z.clamp(self.min_z, self.max_z);

        let ground = self.ground_height(next.x, next.z);
        let grounded = next.y <= ground + GROUND_EPSILON;
        if next.y < ground {
            next.y = ground;
        }

        MoveResult {
            position: next,
            grounded,
        }
    }
}
