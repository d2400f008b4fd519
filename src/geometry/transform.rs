//! 2D rotation in forward and inverse form

use super::types::Point2D;

/// Rotate a vector counter-clockwise (in a y-up frame) by `angle_deg` degrees
///
/// ```text
/// x' = x*cos(θ) - y*sin(θ)
/// y' = x*sin(θ) + y*cos(θ)
/// ```
pub fn rotate(v: Point2D, angle_deg: f64) -> Point2D {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Point2D::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Inverse of [`rotate`]: rotate by the negated angle
pub fn unrotate(v: Point2D, angle_deg: f64) -> Point2D {
    rotate(v, -angle_deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: Point2D, b: Point2D) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
            "{:?} should equal {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        for v in [
            Point2D::new(1.0, 2.0),
            Point2D::new(-300.5, 0.25),
            Point2D::ZERO,
        ] {
            assert_eq!(rotate(v, 0.0), v);
        }
    }

    #[test]
    fn test_rotate_quarter_turn() {
        assert_close(rotate(Point2D::new(1.0, 0.0), 90.0), Point2D::new(0.0, 1.0));
        assert_close(unrotate(Point2D::new(0.0, 1.0), 90.0), Point2D::new(1.0, 0.0));
    }

    #[test]
    fn test_round_trip() {
        let vectors = [
            Point2D::new(100.0, 0.0),
            Point2D::new(-37.5, 12.25),
            Point2D::new(0.001, -999.0),
        ];
        for angle in [-270.0, -20.0, 0.0, 20.0, 45.0, 133.7, 720.0] {
            for v in vectors {
                assert_close(rotate(unrotate(v, angle), angle), v);
                assert_close(unrotate(rotate(v, angle), angle), v);
            }
        }
    }

    #[test]
    fn test_rotation_preserves_length() {
        let v = Point2D::new(30.0, -40.0);
        let r = rotate(v, 20.0);
        assert!((r.length() - 50.0).abs() < EPS);
    }
}
