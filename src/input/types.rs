use crate::error::{TrackingError, TrackingResult};
use crate::geometry::Point2D;
use serde::{Deserialize, Serialize};

/// One recorded pointer sample
///
/// Matches the mouse-moves JSON written by the screen recorder; extra fields
/// such as `cursorId` or `unixTimeMs` are ignored on load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerMove {
    pub x: f64,
    pub y: f64,
    /// Time in milliseconds from the start of the trace
    pub process_time_ms: f64,
}

impl PointerMove {
    pub fn new(x: f64, y: f64, process_time_ms: f64) -> Self {
        Self {
            x,
            y,
            process_time_ms,
        }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Check that sample times are finite, non-negative and non-decreasing
pub fn validate_trace(moves: &[PointerMove]) -> TrackingResult<()> {
    let mut previous = 0.0;
    for (index, mv) in moves.iter().enumerate() {
        let time = mv.process_time_ms;
        if !time.is_finite() || time < 0.0 {
            return Err(TrackingError::Source(format!(
                "invalid sample time {}ms at index {}",
                time, index
            )));
        }
        if time < previous {
            return Err(TrackingError::Source(format!(
                "sample time {}ms at index {} is earlier than {}ms",
                time, index, previous
            )));
        }
        previous = time;
    }
    Ok(())
}
