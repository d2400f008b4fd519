//! Render collaborators

use crate::tracking::TrackerFrame;
use parking_lot::Mutex;
use std::sync::Arc;

/// Receives the positions produced by each tick
pub trait RenderSink: Send {
    fn render(&mut self, frames: &[TrackerFrame]);
}

impl<F> RenderSink for F
where
    F: FnMut(&[TrackerFrame]) + Send,
{
    fn render(&mut self, frames: &[TrackerFrame]) {
        self(frames)
    }
}

/// Keeps every rendered tick in memory
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    ticks: Arc<Mutex<Vec<Vec<TrackerFrame>>>>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks rendered so far
    pub fn len(&self) -> usize {
        self.ticks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.lock().is_empty()
    }

    /// Frames of the most recent tick
    pub fn latest(&self) -> Option<Vec<TrackerFrame>> {
        self.ticks.lock().last().cloned()
    }

    /// Take all recorded ticks, leaving the recorder empty
    pub fn drain(&self) -> Vec<Vec<TrackerFrame>> {
        std::mem::take(&mut *self.ticks.lock())
    }
}

impl RenderSink for FrameRecorder {
    fn render(&mut self, frames: &[TrackerFrame]) {
        self.ticks.lock().push(frames.to_vec());
    }
}
