// Shared movement model for player and enemies
//
// Horizontal displacement from a direction and speed, a gravity integrator
// that holds a small downward velocity while grounded, and a heading that
// turns toward the movement direction at a fixed rate.

use glam::{Quat, Vec3};

use crate::core::math::{forward, look_rotation};
use crate::engine::world::Environment;

/// Downward velocity accumulated while airborne
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityIntegrator {
    gravity: f32,
    grounded_velocity: f32,
    vertical_velocity: f32,
}

impl GravityIntegrator {
    pub fn new(gravity: f32, grounded_velocity: f32) -> Self {
        Self {
            gravity,
            grounded_velocity,
            vertical_velocity: 0.0,
        }
    }

    /// Integrate one tick and return the vertical displacement
    pub fn step(&mut self, grounded: bool, dt: f32) -> f32 {
        if grounded {
            self.vertical_velocity = self.grounded_velocity;
        } else {
            self.vertical_velocity += self.gravity * dt;
        }
        self.vertical_velocity * dt
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn reset(&mut self) {
        self.vertical_velocity = 0.0;
    }
}

/// Horizontal displacement for one tick
pub fn displacement(direction: Vec3, speed: f32, dt: f32) -> Vec3 {
    direction * speed * dt
}

/// Position, heading and vertical motion of one actor
#[derive(Debug, Clone)]
pub struct MovementController {
    position: Vec3,
    rotation: Quat,
    grounded: bool,
    gravity: GravityIntegrator,
    /// Heading interpolation rate per second
    turn_rate: f32,
}

impl MovementController {
    pub fn new(position: Vec3, gravity: f32, grounded_velocity: f32, turn_rate: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            grounded: false,
            gravity: GravityIntegrator::new(gravity, grounded_velocity),
            turn_rate,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn forward(&self) -> Vec3 {
        forward(self.rotation)
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.gravity.vertical_velocity()
    }

    /// Teleport, clearing vertical motion
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.gravity.reset();
        self.grounded = false;
    }

    /// Move horizontally along `direction` at `speed` for one tick
    pub fn move_horizontal(&mut self, env: &dyn Environment, direction: Vec3, speed: f32, dt: f32) {
        let result = env.move_actor(self.position, displacement(direction, speed, dt));
        self.position = result.position;
        self.grounded = result.grounded;
    }

    /// Apply one tick of gravity
    pub fn apply_gravity(&mut self, env: &dyn Environment, dt: f32) {
        let grounded = env.is_grounded(self.position);
        let dy = self.gravity.step(grounded, dt);
        let result = env.move_actor(self.position, Vec3::new(0.0, dy, 0.0));
        self.position = result.position;
        self.grounded = result.grounded;
    }

    /// Turn toward `direction` by `rate * dt` of the remaining angle
    pub fn turn_towards(&mut self, direction: Vec3, rate: f32, dt: f32) {
        if let Some(target) = look_rotation(direction) {
            let t = (rate * dt).clamp(0.0, 1.0);
            self.rotation = self.rotation.slerp(target, t);
        }
    }

    pub fn turn_to(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
    }

    /// Turn toward `direction` at this controller's own turn rate
    pub fn face_movement(&mut self, direction: Vec3, dt: f32) {
        self.turn_towards(direction, self.turn_rate, dt);
    }

    /// Angle in degrees between the current heading and `direction`
    pub fn angle_to(&self, direction: Vec3) -> Option<f32> {
        look_rotation(direction).map(|target| self.rotation.angle_between(target).to_degrees())
    }
}
