//! Tracker configuration
//!
//! Static settings supplied once when a tracker set is built. Loaded from
//! camelCase JSON or taken from one of the built-in presets.

use crate::error::{TrackingError, TrackingResult};
use crate::geometry::ellipse::validate_radius;
use crate::geometry::Point2D;
use crate::tracking::OutputSpace;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default per-tick easing factor
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.15;

/// Default animation refresh rate in Hz
pub const DEFAULT_REFRESH_HZ: f64 = 60.0;

pub const MAX_REFRESH_HZ: f64 = 1000.0;

/// One follower and its elliptical region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSpec {
    pub label: String,
    /// Offset of the ellipse center from the surface midpoint, in the rotated frame
    #[serde(default)]
    pub offset: Point2D,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Radius of the rendered marker
    #[serde(default)]
    pub visual_radius: f64,
}

impl TrackerSpec {
    pub fn new(label: impl Into<String>, offset: Point2D, radius_x: f64, radius_y: f64) -> Self {
        Self {
            label: label.into(),
            offset,
            radius_x,
            radius_y,
            visual_radius: 0.0,
        }
    }

    pub fn with_visual_radius(mut self, visual_radius: f64) -> Self {
        self.visual_radius = visual_radius;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Rotation shared by every region, in degrees
    pub rotation_deg: f64,
    pub smoothing_factor: f64,
    pub refresh_hz: f64,
    #[serde(default)]
    pub output_space: OutputSpace,
    pub trackers: Vec<TrackerSpec>,
}

impl Default for TrackerConfig {
    /// Two eyes of different sizes with a 28px iris, eased at 0.15 per frame
    fn default() -> Self {
        let iris_radius = 14.0;
        Self {
            rotation_deg: 20.0,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            refresh_hz: DEFAULT_REFRESH_HZ,
            output_space: OutputSpace::Local,
            trackers: vec![
                TrackerSpec::new("left", Point2D::new(-100.0, 0.0), 35.0, 35.0)
                    .with_visual_radius(iris_radius),
                TrackerSpec::new("right", Point2D::new(100.0, 0.0), 60.0, 35.0)
                    .with_visual_radius(iris_radius),
            ],
        }
    }
}

impl TrackerConfig {
    /// A single follower in a large 300x150 ellipse, snapping without easing
    pub fn single_follower() -> Self {
        Self {
            rotation_deg: 20.0,
            smoothing_factor: 1.0,
            refresh_hz: DEFAULT_REFRESH_HZ,
            output_space: OutputSpace::Surface,
            trackers: vec![TrackerSpec::new("follower", Point2D::ZERO, 300.0, 150.0)],
        }
    }

    /// Load and validate a JSON config file
    pub fn from_file(path: &Path) -> TrackingResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TrackerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TrackingResult<()> {
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(TrackingError::Configuration(format!(
                "smoothing factor must be in (0, 1], got {}",
                self.smoothing_factor
            )));
        }
        if !(self.refresh_hz > 0.0 && self.refresh_hz <= MAX_REFRESH_HZ) {
            return Err(TrackingError::Configuration(format!(
                "refresh rate must be in (0, 1000] Hz, got {}",
                self.refresh_hz
            )));
        }
        if !self.rotation_deg.is_finite() {
            return Err(TrackingError::Configuration(format!(
                "rotation must be finite, got {}",
                self.rotation_deg
            )));
        }
        if self.trackers.is_empty() {
            return Err(TrackingError::Configuration(
                "at least one tracker is required".to_string(),
            ));
        }

        for spec in &self.trackers {
            validate_radius(&format!("{}.radiusX", spec.label), spec.radius_x)?;
            validate_radius(&format!("{}.radiusY", spec.label), spec.radius_y)?;
            if !spec.visual_radius.is_finite() || spec.visual_radius < 0.0 {
                return Err(TrackingError::Configuration(format!(
                    "{}.visualRadius must be non-negative, got {}",
                    spec.label, spec.visual_radius
                )));
            }
            if !spec.offset.x.is_finite() || !spec.offset.y.is_finite() {
                return Err(TrackingError::Configuration(format!(
                    "{}.offset must be finite",
                    spec.label
                )));
            }
        }

        Ok(())
    }
}
