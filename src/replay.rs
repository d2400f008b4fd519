//! Offline replay of recorded pointer traces
//!
//! Samples a recorded trace at a fixed output framerate and ticks a fresh
//! tracker set once per frame, producing the positions a live session would
//! have rendered.

use crate::config::TrackerConfig;
use crate::error::{TrackingError, TrackingResult};
use crate::geometry::{Point2D, SurfaceRect};
use crate::input::{validate_trace, PointerMove};
use crate::tracking::{TrackerFrame, TrackerSet};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on frames produced by one replay
pub const MAX_REPLAY_FRAMES: usize = 1_000_000;

/// Tracker positions for one output frame
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayFrame {
    /// Time in milliseconds from the start of the trace
    pub process_time_ms: f64,
    /// Pointer sample in effect for this frame
    pub pointer: Point2D,
    pub trackers: Vec<TrackerFrame>,
}

/// Replay a trace at `output_fps`
///
/// # Arguments
/// * `moves` - Recorded pointer samples, ordered by time
/// * `config` - Tracker configuration
/// * `surface` - Surface bounds the trace was recorded against
/// * `output_fps` - Target output framerate (e.g., 30.0 or 60.0)
///
/// # Returns
/// One frame per output tick; empty when the trace is empty
pub fn replay_trace(
    moves: &[PointerMove],
    config: &TrackerConfig,
    surface: SurfaceRect,
    output_fps: f64,
) -> TrackingResult<Vec<ReplayFrame>> {
    if !output_fps.is_finite() || output_fps <= 0.0 {
        return Err(TrackingError::Configuration(format!(
            "output fps must be positive, got {}",
            output_fps
        )));
    }
    if !surface.is_measured() {
        return Err(TrackingError::Configuration(format!(
            "surface must have a positive size, got {}x{}",
            surface.width, surface.height
        )));
    }

    validate_trace(moves)?;

    let mut trackers = TrackerSet::from_config(config)?;
    if moves.is_empty() {
        return Ok(vec![]);
    }

    let frame_duration_ms = 1000.0 / output_fps;
    let total_duration_ms = moves.last().map(|m| m.process_time_ms).unwrap_or(0.0);

    // Always have at least 1 frame for non-empty input
    let frames = (total_duration_ms / frame_duration_ms).ceil().max(1.0);
    if frames > MAX_REPLAY_FRAMES as f64 {
        return Err(TrackingError::Configuration(format!(
            "trace of {}ms at {}fps needs {} frames, limit is {}",
            total_duration_ms, output_fps, frames, MAX_REPLAY_FRAMES
        )));
    }
    let frame_count = frames as usize;

    let mut result = Vec::with_capacity(frame_count);
    let mut index = 0;

    for frame in 0..frame_count {
        let frame_time_ms = frame as f64 * frame_duration_ms;

        // Latest sample at or before this frame
        while index + 1 < moves.len() && moves[index + 1].process_time_ms <= frame_time_ms {
            index += 1;
        }

        let pointer = moves[index].position();
        result.push(ReplayFrame {
            process_time_ms: frame_time_ms,
            pointer,
            trackers: trackers.tick(pointer, &surface),
        });
    }

    Ok(result)
}

/// Replay a trace file and write the frames as JSON
pub fn process_trace_file(
    input_file: &Path,
    output_file: &Path,
    config: &TrackerConfig,
    surface: SurfaceRect,
    output_fps: f64,
) -> anyhow::Result<usize> {
    let content = std::fs::read_to_string(input_file)
        .with_context(|| format!("Failed to read input file {}", input_file.display()))?;
    let moves: Vec<PointerMove> =
        serde_json::from_str(&content).context("Failed to parse pointer moves")?;

    tracing::info!(
        "Replaying {} pointer moves -> {} at {}fps ({} trackers)",
        moves.len(),
        output_file.display(),
        output_fps,
        config.trackers.len()
    );

    let frames = replay_trace(&moves, config, surface, output_fps)?;
    let output = serde_json::to_vec_pretty(&frames).context("Failed to serialize frames")?;
    std::fs::write(output_file, output)
        .with_context(|| format!("Failed to write output file {}", output_file.display()))?;

    tracing::info!("Wrote {} frames to {}", frames.len(), output_file.display());

    Ok(frames.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> SurfaceRect {
        SurfaceRect::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn test_empty_input() {
        let result = replay_trace(&[], &TrackerConfig::default(), surface(), 30.0).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_single_point() {
        let moves = vec![PointerMove::new(400.0, 300.0, 0.0)];
        let result = replay_trace(&moves, &TrackerConfig::default(), surface(), 30.0).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].trackers.len(), 2);
        assert_eq!(result[0].pointer, Point2D::new(400.0, 300.0));
    }

    #[test]
    fn test_output_fps_affects_frame_count() {
        let moves = vec![
            PointerMove::new(0.0, 0.0, 0.0),
            PointerMove::new(100.0, 100.0, 1000.0),
        ];

        let at_30 = replay_trace(&moves, &TrackerConfig::default(), surface(), 30.0).unwrap();
        let at_60 = replay_trace(&moves, &TrackerConfig::default(), surface(), 60.0).unwrap();

        assert_eq!(at_30.len(), 30);
        assert_eq!(at_60.len(), 60);
    }

    #[test]
    fn test_frames_use_latest_sample() {
        let moves = vec![
            PointerMove::new(0.0, 0.0, 0.0),
            PointerMove::new(10.0, 0.0, 40.0),
            PointerMove::new(20.0, 0.0, 90.0),
            PointerMove::new(30.0, 0.0, 100.0),
        ];
        let frames = replay_trace(&moves, &TrackerConfig::default(), surface(), 20.0).unwrap();

        // Frames at 0ms and 50ms; the 90ms sample is never reached
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].pointer.x, 0.0);
        assert_eq!(frames[1].pointer.x, 10.0);
    }

    #[test]
    fn test_trackers_converge_on_still_pointer() {
        let moves = vec![
            PointerMove::new(780.0, 20.0, 0.0),
            PointerMove::new(780.0, 20.0, 2000.0),
        ];
        let frames = replay_trace(&moves, &TrackerConfig::default(), surface(), 60.0).unwrap();

        for tracker in &frames.last().unwrap().trackers {
            assert!(
                tracker.local.distance(tracker.target) < 1e-3,
                "{} at {:?} should have reached {:?}",
                tracker.label,
                tracker.local,
                tracker.target
            );
        }
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let moves = vec![PointerMove::new(0.0, 0.0, 0.0)];
        assert!(replay_trace(&moves, &TrackerConfig::default(), surface(), 0.0).is_err());
        assert!(replay_trace(
            &moves,
            &TrackerConfig::default(),
            SurfaceRect::default(),
            30.0
        )
        .is_err());
    }

    #[test]
    fn test_rejects_invalid_sample_times() {
        let negative = vec![
            PointerMove::new(0.0, 0.0, 0.0),
            PointerMove::new(1.0, 1.0, -500.0),
        ];
        assert!(matches!(
            replay_trace(&negative, &TrackerConfig::default(), surface(), 60.0),
            Err(TrackingError::Source(_))
        ));

        let not_finite = vec![PointerMove::new(0.0, 0.0, f64::NAN)];
        assert!(replay_trace(&not_finite, &TrackerConfig::default(), surface(), 60.0).is_err());
    }

    #[test]
    fn test_rejects_oversized_trace() {
        let moves = vec![
            PointerMove::new(0.0, 0.0, 0.0),
            PointerMove::new(1.0, 1.0, 1e20),
        ];
        let result = replay_trace(&moves, &TrackerConfig::default(), surface(), 60.0);
        assert!(
            matches!(result, Err(TrackingError::Configuration(_))),
            "expected a frame limit error, got {:?}",
            result.map(|frames| frames.len())
        );
    }

    #[test]
    fn test_oversized_trace_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("long.json");
        let output = dir.path().join("frames.json");
        std::fs::write(
            &input,
            r#"[{"x": 0, "y": 0, "processTimeMs": 0}, {"x": 1, "y": 1, "processTimeMs": 1e20}]"#,
        )
        .unwrap();

        assert!(
            process_trace_file(&input, &output, &TrackerConfig::default(), surface(), 60.0)
                .is_err()
        );
        assert!(!output.exists());
    }

    #[test]
    fn test_process_trace_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("recording-0-mouse-moves.json");
        let output = dir.path().join("frames.json");
        std::fs::write(
            &input,
            r#"[{"x": 0, "y": 0, "processTimeMs": 0}, {"x": 800, "y": 600, "processTimeMs": 500}]"#,
        )
        .unwrap();

        let count =
            process_trace_file(&input, &output, &TrackerConfig::default(), surface(), 30.0)
                .unwrap();
        assert_eq!(count, 15);

        let written: Vec<ReplayFrame> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written.len(), 15);
        assert_eq!(written[0].trackers[0].label, "left");
    }
}
