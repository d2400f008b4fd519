//! Latest-wins pointer sample cell
//!
//! Backed by a `tokio::sync::watch` channel: every push overwrites the
//! previous value, and reads never consume it.

use crate::geometry::Point2D;
use tokio::sync::watch;

/// Create a fresh sample cell starting at the origin
pub fn pointer_channel() -> (PointerSink, PointerReader) {
    let (tx, rx) = watch::channel(Point2D::ZERO);
    (PointerSink { tx }, PointerReader { rx })
}

/// Write side, cloned into every pointer source
#[derive(Debug, Clone)]
pub struct PointerSink {
    tx: watch::Sender<Point2D>,
}

impl PointerSink {
    /// Overwrite the current sample with a screen-space position
    pub fn push(&self, position: Point2D) {
        self.tx.send_replace(position);
    }

    /// Whether the session that owns the reader is still alive
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Read side, owned by the animation loop
#[derive(Debug, Clone)]
pub struct PointerReader {
    rx: watch::Receiver<Point2D>,
}

impl PointerReader {
    /// Snapshot of the latest sample
    pub fn snapshot(&self) -> Point2D {
        *self.rx.borrow()
    }

    /// Whether every sink has been dropped
    pub fn is_closed(&self) -> bool {
        self.rx.has_changed().is_err()
    }
}
