//! Refresh-driven tracking session
//!
//! The animation loop is a tokio task awaiting an interval at the configured
//! refresh rate. Each tick snapshots the latest pointer sample, asks the
//! layout for the surface bounds and advances every tracker. A tick with no
//! measured surface is skipped and retried on the next one.

use crate::config::TrackerConfig;
use crate::error::{TrackingError, TrackingResult};
use crate::geometry::Point2D;
use crate::input::{pointer_channel, PointerReader, PointerSink, PointerSource};
use crate::session::layout::LayoutProvider;
use crate::session::render::RenderSink;
use crate::tracking::TrackerSet;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Stopped,
    Running,
}

pub struct TrackingSession {
    config: TrackerConfig,
    trackers: Arc<Mutex<TrackerSet>>,
    running: Arc<AtomicBool>,
    ticks: Arc<AtomicU64>,
    skipped: Arc<AtomicU64>,
    pointer: Option<PointerSink>,
    source: Option<Box<dyn PointerSource>>,
    task: Option<JoinHandle<()>>,
}

impl TrackingSession {
    /// Create a stopped session; fails on invalid configuration
    pub fn new(config: TrackerConfig) -> TrackingResult<Self> {
        let trackers = TrackerSet::from_config(&config)?;
        Ok(Self {
            config,
            trackers: Arc::new(Mutex::new(trackers)),
            running: Arc::new(AtomicBool::new(false)),
            ticks: Arc::new(AtomicU64::new(0)),
            skipped: Arc::new(AtomicU64::new(0)),
            pointer: None,
            source: None,
            task: None,
        })
    }

    /// Attach a pointer source that is started and stopped with the session
    pub fn with_source(mut self, source: Box<dyn PointerSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        if self.running.load(Ordering::SeqCst) {
            SessionState::Running
        } else {
            SessionState::Stopped
        }
    }

    /// Start the refresh loop
    ///
    /// Trackers restart from their ellipse centers and the pointer sample
    /// starts at the origin.
    pub async fn start(
        &mut self,
        layout: Arc<dyn LayoutProvider>,
        render: Box<dyn RenderSink>,
    ) -> TrackingResult<()> {
        if self.running.load(Ordering::SeqCst) {
            return Err(TrackingError::AlreadyRunning);
        }

        self.trackers.lock().reset();
        self.ticks.store(0, Ordering::SeqCst);
        self.skipped.store(0, Ordering::SeqCst);

        let (sink, reader) = pointer_channel();
        if let Some(source) = self.source.as_mut() {
            source.start(sink.clone()).await?;
        }

        self.running.store(true, Ordering::SeqCst);

        let period = Duration::from_secs_f64(1.0 / self.config.refresh_hz);
        self.task = Some(tokio::spawn(run_loop(
            self.trackers.clone(),
            reader,
            layout,
            render,
            self.running.clone(),
            self.ticks.clone(),
            self.skipped.clone(),
            period,
        )));
        self.pointer = Some(sink);

        tracing::info!(
            "Tracking session started (trackers={}, refresh={}Hz)",
            self.trackers.lock().len(),
            self.config.refresh_hz
        );
        Ok(())
    }

    /// Stop the refresh loop and the pointer source
    ///
    /// Once this returns no tracker is mutated and no frame is rendered.
    /// Stopping a stopped session is a no-op.
    pub async fn stop(&mut self) -> TrackingResult<()> {
        if !self.running.load(Ordering::SeqCst) {
            return Ok(());
        }

        self.running.store(false, Ordering::SeqCst);

        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }

        self.pointer = None;

        if let Some(source) = self.source.as_mut() {
            source.stop().await?;
        }

        tracing::info!(
            "Tracking session stopped (ticks={}, skipped={})",
            self.ticks.load(Ordering::SeqCst),
            self.skipped.load(Ordering::SeqCst)
        );
        Ok(())
    }

    /// Overwrite the pointer sample with a screen-space position
    pub fn push_pointer(&self, position: Point2D) -> TrackingResult<()> {
        let sink = self.pointer.as_ref().ok_or(TrackingError::NotRunning)?;
        sink.push(position);
        Ok(())
    }

    /// Sink for callers that feed pointer events from elsewhere
    pub fn pointer_sink(&self) -> Option<PointerSink> {
        self.pointer.clone()
    }

    /// Number of ticks that advanced the trackers since the last start
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Number of ticks skipped because the surface was not measured
    pub fn skipped_ticks(&self) -> u64 {
        self.skipped.load(Ordering::SeqCst)
    }

    /// Current eased local position of every tracker, in order
    pub fn local_positions(&self) -> Vec<Point2D> {
        self.trackers
            .lock()
            .trackers()
            .iter()
            .map(|t| t.current_local())
            .collect()
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_loop(
    trackers: Arc<Mutex<TrackerSet>>,
    reader: PointerReader,
    layout: Arc<dyn LayoutProvider>,
    mut render: Box<dyn RenderSink>,
    running: Arc<AtomicBool>,
    ticks: Arc<AtomicU64>,
    skipped: Arc<AtomicU64>,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let Some(surface) = layout.surface_rect() else {
            skipped.fetch_add(1, Ordering::SeqCst);
            tracing::trace!("Surface not measured, skipping tick");
            continue;
        };

        let pointer = reader.snapshot();
        let frames = trackers.lock().tick(pointer, &surface);
        ticks.fetch_add(1, Ordering::SeqCst);
        render.render(&frames);
    }
}
