//! Pupil Tracker - ellipse-constrained pointer followers.
//!
//! Followers ("pupils") chase the pointer but stay inside an elliptical,
//! optionally rotated, boundary, easing toward their target once per
//! animation tick. Rendering is left to the host: it supplies the surface
//! layout and receives per-tracker positions.

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod replay;
pub mod session;
pub mod tracking;

pub use config::{TrackerConfig, TrackerSpec};
pub use error::{TrackingError, TrackingResult};
pub use geometry::{EllipseRegion, Point2D, SurfaceRect};
pub use session::{SessionState, TrackingSession};
pub use tracking::{OutputSpace, TrackerFrame, TrackerSet};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
///
/// Honors `RUST_LOG`; defaults to debug output for this crate.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pupil_tracker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
