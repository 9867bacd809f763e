// Math utilities and helper functions

use glam::{Quat, Vec3};

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Check if two f32 values are approximately equal
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Drop the vertical component and normalize.
/// Returns `Vec3::ZERO` when the remaining vector has no length.
pub fn flat_direction(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Rotation about +Y that turns +Z onto `direction` (ignores vertical component).
/// `None` when the direction has no horizontal length.
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let flat = flat_direction(direction);
    if flat == Vec3::ZERO {
        return None;
    }
    Some(Quat::from_rotation_y(flat.x.atan2(flat.z)))
}

/// Forward vector (+Z rotated) of a heading
pub fn forward(rotation: Quat) -> Vec3 {
    rotation * Vec3::Z
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
    }

    #[test]
    fn test_approx_equal() {
        assert!(approx_equal(1.0, 1.00001, 0.0001));
        assert!(!approx_equal(1.0, 1.1, 0.01));
    }

    #[test]
    fn test_flat_direction_drops_height() {
        let dir = flat_direction(Vec3::new(3.0, 10.0, 4.0));
        assert_abs_diff_eq!(dir.x, 0.6, epsilon = 1e-5);
        assert_eq!(dir.y, 0.0);
        assert_abs_diff_eq!(dir.z, 0.8, epsilon = 1e-5);
        assert_eq!(flat_direction(Vec3::Y), Vec3::ZERO);
    }

    #[test]
    fn test_look_rotation_faces_direction() {
        let rot = look_rotation(Vec3::X).unwrap();
        let fwd = forward(rot);
        assert_abs_diff_eq!(fwd.x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(fwd.z, 0.0, epsilon = 1e-5);
        assert!(look_rotation(Vec3::ZERO).is_none());
    }
}
