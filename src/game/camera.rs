// Third-person follow camera

use glam::{EulerRot, Quat, Vec3};

use crate::game::config::CameraTuning;

/// Camera that trails a target at a fixed offset with a fixed rotation
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Camera position in world space
    position: Vec3,
    rotation: Quat,
    offset: Vec3,
    smooth_speed: f32,
}

impl CameraRig {
    pub fn new(tuning: &CameraTuning, position: Vec3) -> Self {
        let r = tuning.rotation_deg;
        Self {
            position,
            rotation: Quat::from_euler(
                EulerRot::YXZ,
                r.y.to_radians(),
                r.x.to_radians(),
                r.z.to_radians(),
            ),
            offset: tuning.offset,
            smooth_speed: tuning.smooth_speed,
        }
    }

    /// Start directly behind `target` instead of sliding in
    pub fn snap_to(&mut self, target: Vec3) {
        self.position = target + self.offset;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Move toward `target + offset`. Without a target the camera stays put.
    pub fn update(&mut self, target: Option<Vec3>, dt: f32) {
        let Some(target) = target else {
            return;
        };
        let desired = target + self.offset;
        let t = (self.smooth_speed * dt).clamp(0.0, 1.0);
        self.position = self.position.lerp(desired, t);
    }
}
