//! Map a raw pointer position onto a constrained point inside an ellipse

use crate::geometry::{clamp_to_ellipse, EllipseRegion, Point2D, MIN_RADIUS};
use serde::{Deserialize, Serialize};

/// Coordinate frame of a resolved position
///
/// `Surface` positions are absolute within the flat, unrotated surface.
/// `Local` positions are offsets from the ellipse center along its own axes,
/// for markers drawn inside a container that already applies the rotation
/// and the center translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputSpace {
    Surface,
    #[default]
    Local,
}

/// Shrink the raw radii by the marker's visual radius so its edge stays inside
///
/// Floored at [`MIN_RADIUS`]; a marker larger than its ellipse is pinned to
/// the center.
pub fn effective_radii(region: &EllipseRegion, visual_radius: f64) -> (f64, f64) {
    (
        (region.radius_x - visual_radius).max(MIN_RADIUS),
        (region.radius_y - visual_radius).max(MIN_RADIUS),
    )
}

/// Resolve the constrained target for `pointer` (surface coordinates)
pub fn resolve_target(
    pointer: Point2D,
    region: &EllipseRegion,
    effective_radius_x: f64,
    effective_radius_y: f64,
    space: OutputSpace,
) -> Point2D {
    let local = region.to_local(pointer);
    let clamped = clamp_to_ellipse(local, effective_radius_x, effective_radius_y);

    match space {
        OutputSpace::Surface => region.to_surface(clamped),
        OutputSpace::Local => clamped,
    }
}
