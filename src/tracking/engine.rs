//! Multi-tracker engine
//!
//! A [`TrackerSet`] owns every follower and advances all of them against the
//! same pointer sample on each tick. Each tracker keeps its eased position in
//! its own ellipse-local frame; surface positions are derived from it.

use crate::config::TrackerConfig;
use crate::error::TrackingResult;
use crate::geometry::{rotate, EllipseRegion, Point2D, SurfaceRect, MIN_RADIUS};
use crate::tracking::resolver::{effective_radii, resolve_target, OutputSpace};
use crate::tracking::smoothing::Ease2D;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ellipse-constrained follower
#[derive(Debug, Clone)]
pub struct Tracker {
    id: Uuid,
    label: String,
    offset: Point2D,
    radius_x: f64,
    radius_y: f64,
    visual_radius: f64,
    state: Ease2D,
}

impl Tracker {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn visual_radius(&self) -> f64 {
        self.visual_radius
    }

    /// Current eased position in the ellipse-local frame
    pub fn current_local(&self) -> Point2D {
        let (x, y) = self.state.position();
        Point2D::new(x, y)
    }

    /// True when the marker is at least as large as its ellipse on some axis
    pub fn is_collapsed(&self) -> bool {
        self.radius_x - self.visual_radius <= MIN_RADIUS
            || self.radius_y - self.visual_radius <= MIN_RADIUS
    }

    /// Region for this tracker on a surface of the given size
    pub fn region(&self, surface: &SurfaceRect, rotation_deg: f64) -> EllipseRegion {
        EllipseRegion {
            center: surface.midpoint() + rotate(self.offset, rotation_deg),
            radius_x: self.radius_x,
            radius_y: self.radius_y,
            rotation_deg,
        }
    }
}

/// Per-tracker output of one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerFrame {
    pub id: Uuid,
    pub label: String,
    /// Eased position in the configured output space
    pub position: Point2D,
    /// Eased position in the ellipse-local frame
    pub local: Point2D,
    /// Eased position in surface coordinates
    pub surface: Point2D,
    /// Constrained target in the configured output space
    pub target: Point2D,
}

/// Ordered set of trackers sharing one pointer and one animation driver
#[derive(Debug, Clone)]
pub struct TrackerSet {
    trackers: Vec<Tracker>,
    rotation_deg: f64,
    smoothing_factor: f64,
    output_space: OutputSpace,
}

impl TrackerSet {
    /// Build a tracker set from a validated configuration
    pub fn from_config(config: &TrackerConfig) -> TrackingResult<Self> {
        config.validate()?;

        let trackers = config
            .trackers
            .iter()
            .map(|spec| {
                let tracker = Tracker {
                    id: Uuid::new_v4(),
                    label: spec.label.clone(),
                    offset: spec.offset,
                    radius_x: spec.radius_x,
                    radius_y: spec.radius_y,
                    visual_radius: spec.visual_radius,
                    state: Ease2D::default(),
                };
                if tracker.is_collapsed() {
                    tracing::warn!(
                        "Tracker '{}' marker radius {} fills its {}x{} ellipse; movement collapses on that axis",
                        spec.label,
                        spec.visual_radius,
                        spec.radius_x,
                        spec.radius_y
                    );
                }
                tracker
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            "Tracker set built (trackers={}, rotation={}deg, smoothing={}, output={:?})",
            trackers.len(),
            config.rotation_deg,
            config.smoothing_factor,
            config.output_space
        );

        Ok(Self {
            trackers,
            rotation_deg: config.rotation_deg,
            smoothing_factor: config.smoothing_factor,
            output_space: config.output_space,
        })
    }

    pub fn trackers(&self) -> &[Tracker] {
        &self.trackers
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    pub fn output_space(&self) -> OutputSpace {
        self.output_space
    }

    /// Return every tracker to the ellipse center
    pub fn reset(&mut self) {
        for tracker in &mut self.trackers {
            tracker.state.reset(0.0, 0.0);
        }
    }

    /// Advance every tracker one step toward the pointer
    ///
    /// `pointer` is an absolute screen coordinate; `surface` is the current
    /// layout of the interactive area. All trackers see the same sample.
    pub fn tick(&mut self, pointer: Point2D, surface: &SurfaceRect) -> Vec<TrackerFrame> {
        let pointer = surface.to_surface(pointer);
        let rotation_deg = self.rotation_deg;
        let factor = self.smoothing_factor;
        let space = self.output_space;

        self.trackers
            .iter_mut()
            .map(|tracker| {
                let region = tracker.region(surface, rotation_deg);
                let (rx, ry) = effective_radii(&region, tracker.visual_radius);
                let target_local = resolve_target(pointer, &region, rx, ry, OutputSpace::Local);

                tracker.state.step(target_local.x, target_local.y, factor);

                let local = tracker.current_local();
                let surface_pos = region.to_surface(local);
                let (position, target) = match space {
                    OutputSpace::Local => (local, target_local),
                    OutputSpace::Surface => (surface_pos, region.to_surface(target_local)),
                };

                TrackerFrame {
                    id: tracker.id,
                    label: tracker.label.clone(),
                    position,
                    local,
                    surface: surface_pos,
                    target,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerSpec;
    use crate::geometry::ellipse_equation;
    use crate::tracking::smoothing::ticks_to_settle;

    const EPS: f64 = 1e-9;

    fn surface() -> SurfaceRect {
        SurfaceRect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn config_with(trackers: Vec<TrackerSpec>, smoothing: f64, space: OutputSpace) -> TrackerConfig {
        TrackerConfig {
            rotation_deg: 20.0,
            smoothing_factor: smoothing,
            refresh_hz: 60.0,
            output_space: space,
            trackers,
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = config_with(
            vec![TrackerSpec::new("bad", Point2D::ZERO, -5.0, 10.0)],
            0.15,
            OutputSpace::Local,
        );
        assert!(TrackerSet::from_config(&config).is_err());
    }

    #[test]
    fn test_trackers_start_at_center() {
        let set = TrackerSet::from_config(&TrackerConfig::default()).unwrap();
        assert_eq!(set.len(), 2);
        for tracker in set.trackers() {
            assert_eq!(tracker.current_local(), Point2D::ZERO);
        }
        assert_ne!(set.trackers()[0].id(), set.trackers()[1].id());
    }

    #[test]
    fn test_region_centers_follow_rotated_offsets() {
        let set = TrackerSet::from_config(&TrackerConfig::default()).unwrap();
        let left = set.trackers()[0].region(&surface(), 20.0);
        let right = set.trackers()[1].region(&surface(), 20.0);

        let (sin, cos) = 20f64.to_radians().sin_cos();
        assert!((left.center.x - (400.0 - 100.0 * cos)).abs() < EPS);
        assert!((left.center.y - (300.0 - 100.0 * sin)).abs() < EPS);
        assert!((right.center.x - (400.0 + 100.0 * cos)).abs() < EPS);
        assert!((right.center.y - (300.0 + 100.0 * sin)).abs() < EPS);
    }

    #[test]
    fn test_smoothing_converges_monotonically() {
        let mut set = TrackerSet::from_config(&TrackerConfig::default()).unwrap();
        let pointer = Point2D::new(2000.0, -500.0);

        let first = set.tick(pointer, &surface());
        let targets: Vec<Point2D> = first.iter().map(|f| f.target).collect();
        let mut gaps: Vec<f64> = first.iter().map(|f| f.local.distance(f.target)).collect();

        let bound = ticks_to_settle(100.0, 0.15, 1e-6);
        for _ in 0..bound {
            let frames = set.tick(pointer, &surface());
            for (i, frame) in frames.iter().enumerate() {
                assert_eq!(frame.target, targets[i]);
                let gap = frame.local.distance(frame.target);
                assert!(gap <= gaps[i], "gap {} should not grow past {}", gap, gaps[i]);
                gaps[i] = gap;
            }
        }

        for gap in gaps {
            assert!(gap < 1e-6, "gap {} should have settled", gap);
        }
    }

    #[test]
    fn test_positions_stay_inside_effective_ellipse() {
        let mut set = TrackerSet::from_config(&TrackerConfig::default()).unwrap();
        let pointers = [
            Point2D::new(0.0, 0.0),
            Point2D::new(800.0, 0.0),
            Point2D::new(400.0, 300.0),
            Point2D::new(-1000.0, 5000.0),
        ];

        for pointer in pointers {
            for _ in 0..30 {
                for frame in set.tick(pointer, &surface()) {
                    let tracker = set.trackers().iter().find(|t| t.id() == frame.id).unwrap();
                    let (rx, ry) = (
                        tracker.radius_x - tracker.visual_radius,
                        tracker.radius_y - tracker.visual_radius,
                    );
                    assert!(ellipse_equation(frame.local, rx, ry) <= 1.0 + 1e-9);
                    assert!(ellipse_equation(frame.target, rx, ry) <= 1.0 + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_identical_regions_give_identical_targets() {
        let spec = TrackerSpec::new("a", Point2D::new(50.0, 0.0), 60.0, 35.0);
        let mut twin = spec.clone();
        twin.label = "b".to_string();
        let config = config_with(vec![spec, twin], 0.15, OutputSpace::Surface);

        let mut set = TrackerSet::from_config(&config).unwrap();
        let frames = set.tick(Point2D::new(700.0, 100.0), &surface());
        assert_eq!(frames[0].target, frames[1].target);
        assert_eq!(frames[0].position, frames[1].position);
        assert_ne!(frames[0].id, frames[1].id);
    }

    #[test]
    fn test_different_regions_give_different_targets() {
        let mut set = TrackerSet::from_config(&TrackerConfig::default()).unwrap();
        let frames = set.tick(Point2D::new(700.0, 100.0), &surface());
        assert_ne!(frames[0].target, frames[1].target);
    }

    #[test]
    fn test_snap_in_surface_space() {
        let mut set = TrackerSet::from_config(&TrackerConfig::single_follower()).unwrap();
        let surface = SurfaceRect::new(100.0, 50.0, 800.0, 600.0);

        // Inside the ellipse: lands exactly under the pointer
        let frames = set.tick(Point2D::new(520.0, 360.0), &surface);
        assert!((frames[0].position.x - 420.0).abs() < EPS);
        assert!((frames[0].position.y - 310.0).abs() < EPS);
        assert_eq!(frames[0].position, frames[0].target);

        // Far outside: lands on the boundary on the first tick
        let frames = set.tick(Point2D::new(5000.0, 360.0), &surface);
        let region = set.trackers()[0].region(&surface, 20.0);
        let local = region.to_local(frames[0].position);
        assert!((ellipse_equation(local, 300.0, 150.0) - 1.0).abs() < EPS);
        assert_eq!(frames[0].surface, frames[0].position);
    }

    #[test]
    fn test_reset_returns_to_center() {
        let mut set = TrackerSet::from_config(&TrackerConfig::default()).unwrap();
        set.tick(Point2D::new(0.0, 0.0), &surface());
        assert_ne!(set.trackers()[0].current_local(), Point2D::ZERO);

        set.reset();
        for tracker in set.trackers() {
            assert_eq!(tracker.current_local(), Point2D::ZERO);
        }
    }

    #[test]
    fn test_oversized_marker_is_pinned() {
        let config = config_with(
            vec![TrackerSpec::new("tiny", Point2D::ZERO, 10.0, 10.0).with_visual_radius(12.0)],
            1.0,
            OutputSpace::Local,
        );
        let mut set = TrackerSet::from_config(&config).unwrap();
        assert!(set.trackers()[0].is_collapsed());

        let frames = set.tick(Point2D::new(900.0, 900.0), &surface());
        assert!(frames[0].local.length() < 1e-5);
    }
}
