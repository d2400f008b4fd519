//! Elliptical regions and the radial clamp
//!
//! The clamp projects an outside point onto the boundary along the ray from
//! the ellipse center through that point. This is NOT the Euclidean
//! nearest point on the ellipse; the followers are meant to point at the
//! cursor, so the direction from the center must be preserved.

use super::transform::{rotate, unrotate};
use super::types::Point2D;
use crate::error::{TrackingError, TrackingResult};
use serde::{Deserialize, Serialize};

/// Smallest radius the clamp will divide by
pub const MIN_RADIUS: f64 = 1e-6;

/// Evaluate `(x/rx)^2 + (y/ry)^2` for a local-space vector
///
/// `<= 1` means inside or on the boundary.
pub fn ellipse_equation(local: Point2D, radius_x: f64, radius_y: f64) -> f64 {
    let rx = radius_x.max(MIN_RADIUS);
    let ry = radius_y.max(MIN_RADIUS);
    (local.x * local.x) / (rx * rx) + (local.y * local.y) / (ry * ry)
}

/// Clamp a local-space vector into an axis-aligned ellipse centered at the origin
///
/// Points inside are returned unchanged. Points outside are scaled by
/// `1/sqrt(equation)`, which lands them exactly on the boundary and keeps
/// them collinear with the origin.
pub fn clamp_to_ellipse(local: Point2D, radius_x: f64, radius_y: f64) -> Point2D {
    let equation = ellipse_equation(local, radius_x, radius_y);
    if equation <= 1.0 {
        return local;
    }
    local * (1.0 / equation.sqrt())
}

/// A closed elliptical boundary placed in surface space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipseRegion {
    pub center: Point2D,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation of the ellipse axes from the surface X/Y axes, in degrees
    pub rotation_deg: f64,
}

impl EllipseRegion {
    /// Create a region, rejecting non-positive or non-finite radii
    pub fn new(
        center: Point2D,
        radius_x: f64,
        radius_y: f64,
        rotation_deg: f64,
    ) -> TrackingResult<Self> {
        validate_radius("radius_x", radius_x)?;
        validate_radius("radius_y", radius_y)?;
        if !rotation_deg.is_finite() {
            return Err(TrackingError::Configuration(format!(
                "rotation must be finite, got {}",
                rotation_deg
            )));
        }

        Ok(Self {
            center,
            radius_x,
            radius_y,
            rotation_deg,
        })
    }

    /// Express a surface-space point as a vector in the ellipse's own axes
    pub fn to_local(&self, point: Point2D) -> Point2D {
        unrotate(point - self.center, self.rotation_deg)
    }

    /// Map a local vector back to surface space
    pub fn to_surface(&self, local: Point2D) -> Point2D {
        self.center + rotate(local, self.rotation_deg)
    }

    /// Whether a surface-space point lies inside or on the boundary
    pub fn contains(&self, point: Point2D) -> bool {
        ellipse_equation(self.to_local(point), self.radius_x, self.radius_y) <= 1.0
    }
}

pub(crate) fn validate_radius(name: &str, value: f64) -> TrackingResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TrackingError::Configuration(format!(
            "{} must be a positive number, got {}",
            name, value
        )));
    }
    Ok(())
}
