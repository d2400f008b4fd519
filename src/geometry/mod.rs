//! Plane geometry for ellipse-constrained tracking
//!
//! This module contains the pure math: points and surface rectangles,
//! the rotation transform, and the radial ellipse clamp.

pub mod ellipse;
pub mod transform;
pub mod types;

pub use ellipse::{clamp_to_ellipse, ellipse_equation, EllipseRegion, MIN_RADIUS};
pub use transform::{rotate, unrotate};
pub use types::{Point2D, SurfaceRect};
