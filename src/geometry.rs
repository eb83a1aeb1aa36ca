//! Geometric helpers over hand landmarks.
//!
//! Pure functions with no state; distances and angles operate on
//! normalized image-relative coordinates.

use crate::types::{Landmark, ThumbDirection};

/// Computes the Euclidean distance between two landmarks in 3D.
#[must_use]
pub fn distance(a: &Landmark, b: &Landmark) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z - a.z;
    dz.mul_add(dz, dx.mul_add(dx, dy * dy)).sqrt()
}

/// Computes the Euclidean distance between two landmarks in the image
/// plane, ignoring depth.
#[must_use]
pub fn planar_distance(a: &Landmark, b: &Landmark) -> f32 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Computes the angle in degrees between the image-plane vectors
/// `p1 - wrist` and `p2 - wrist`.
///
/// The cosine is clamped to `[-1, 1]` before `acos` so floating-point
/// drift cannot leave the domain. The result is in `[0, 180]`;
/// degenerate zero-length vectors yield 0.
#[must_use]
pub fn angle_at_wrist(wrist: &Landmark, p1: &Landmark, p2: &Landmark) -> f32 {
    let v1 = (p1.x - wrist.x, p1.y - wrist.y);
    let v2 = (p2.x - wrist.x, p2.y - wrist.y);

    let mag1 = v1.0.hypot(v1.1);
    let mag2 = v2.0.hypot(v2.1);
    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }

    let cos = (v1.0 * v2.0 + v1.1 * v2.1) / (mag1 * mag2);
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Classifies the dominant screen-space orientation of the thumb from
/// its base and tip.
///
/// Vertical dominance picks Up/Down by the sign of `dy` (smaller y is
/// up); horizontal dominance picks Left/Right by the sign of `dx`.
#[must_use]
pub fn thumb_direction(thumb_base: &Landmark, thumb_tip: &Landmark) -> ThumbDirection {
    let dx = thumb_tip.x - thumb_base.x;
    let dy = thumb_tip.y - thumb_base.y;

    if dy.abs() > dx.abs() {
        if dy < 0.0 {
            ThumbDirection::Up
        } else {
            ThumbDirection::Down
        }
    } else if dx > 0.0 {
        ThumbDirection::Right
    } else {
        ThumbDirection::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lm(x: f32, y: f32, z: f32) -> Landmark {
        Landmark::new(x, y, z)
    }

    #[test]
    fn test_distance_3d() {
        let a = lm(0.0, 0.0, 0.0);
        let b = lm(0.3, 0.4, 0.0);
        assert!((distance(&a, &b) - 0.5).abs() < 1e-6);

        let c = lm(0.0, 0.0, 0.12);
        assert!((distance(&a, &c) - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_planar_distance_ignores_depth() {
        let a = lm(0.1, 0.1, 0.0);
        let b = lm(0.4, 0.5, 0.9);
        assert!((planar_distance(&a, &b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_angle_right_angle() {
        let wrist = lm(0.5, 0.5, 0.0);
        let p1 = lm(0.7, 0.5, 0.0);
        let p2 = lm(0.5, 0.3, 0.0);
        assert!((angle_at_wrist(&wrist, &p1, &p2) - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_angle_collinear() {
        let wrist = lm(0.5, 0.5, 0.0);
        let p1 = lm(0.5, 0.2, 0.0);
        let p2 = lm(0.5, 0.1, 0.0);
        assert!(angle_at_wrist(&wrist, &p1, &p2) < 1e-3);

        let opposite = lm(0.5, 0.9, 0.0);
        assert!((angle_at_wrist(&wrist, &p1, &opposite) - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_angle_degenerate_vector() {
        let wrist = lm(0.5, 0.5, 0.0);
        let p = lm(0.6, 0.5, 0.0);
        assert_eq!(angle_at_wrist(&wrist, &wrist, &p), 0.0);
    }

    #[test]
    fn test_thumb_direction_vertical() {
        let base = lm(0.5, 0.5, 0.0);
        assert_eq!(thumb_direction(&base, &lm(0.52, 0.3, 0.0)), ThumbDirection::Up);
        assert_eq!(thumb_direction(&base, &lm(0.48, 0.7, 0.0)), ThumbDirection::Down);
    }

    #[test]
    fn test_thumb_direction_horizontal() {
        let base = lm(0.5, 0.5, 0.0);
        assert_eq!(thumb_direction(&base, &lm(0.7, 0.52, 0.0)), ThumbDirection::Right);
        assert_eq!(thumb_direction(&base, &lm(0.3, 0.48, 0.0)), ThumbDirection::Left);
    }
}
