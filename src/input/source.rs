//! Pointer sources
//!
//! A source pushes screen-space positions into the session's sample cell
//! until it is stopped.

use crate::error::{TrackingError, TrackingResult};
use crate::input::sample::PointerSink;
use crate::input::types::{validate_trace, PointerMove};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Trait for pointer sources
///
/// Sources are started by a tracking session with the sink for its sample
/// cell, and stopped when the session is torn down.
#[async_trait]
pub trait PointerSource: Send + Sync {
    /// Source identifier (e.g., "replay")
    fn id(&self) -> &str;

    /// Begin pushing samples into `sink`
    async fn start(&mut self, sink: PointerSink) -> TrackingResult<()>;

    /// Stop pushing samples; no push happens after this returns
    async fn stop(&mut self) -> TrackingResult<()>;

    /// Check if the source is currently producing samples
    fn is_active(&self) -> bool;
}

/// Replays a recorded pointer trace with its original timing
pub struct ReplaySource {
    id: String,
    moves: Arc<Vec<PointerMove>>,
    is_active: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl ReplaySource {
    pub fn new(moves: Vec<PointerMove>) -> Self {
        Self {
            id: "replay".to_string(),
            moves: Arc::new(moves),
            is_active: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    /// Load a JSON array of recorded moves
    pub fn from_file(path: &Path) -> TrackingResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let moves: Vec<PointerMove> = serde_json::from_str(&content)?;
        tracing::debug!("Loaded {} pointer moves from {}", moves.len(), path.display());
        Ok(Self::new(moves))
    }

    pub fn moves(&self) -> &[PointerMove] {
        &self.moves
    }
}

#[async_trait]
impl PointerSource for ReplaySource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn start(&mut self, sink: PointerSink) -> TrackingResult<()> {
        if self.is_active.load(Ordering::SeqCst) {
            return Err(TrackingError::AlreadyRunning);
        }
        validate_trace(&self.moves)?;

        let is_active = self.is_active.clone();
        is_active.store(true, Ordering::SeqCst);

        let moves = self.moves.clone();
        let started = Instant::now();

        self.task = Some(tokio::spawn(async move {
            for mv in moves.iter() {
                let due = started + Duration::from_secs_f64(mv.process_time_ms / 1000.0);
                tokio::time::sleep_until(due).await;
                if !is_active.load(Ordering::SeqCst) {
                    return;
                }
                sink.push(mv.position());
            }
            is_active.store(false, Ordering::SeqCst);
            tracing::debug!("Replay finished ({} moves)", moves.len());
        }));

        tracing::info!("Replay source started ({} moves)", self.moves.len());
        Ok(())
    }

    async fn stop(&mut self) -> TrackingResult<()> {
        self.is_active.store(false, Ordering::SeqCst);

        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            tracing::info!("Replay source stopped");
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }
}

impl Drop for ReplaySource {
    fn drop(&mut self) {
        self.is_active.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
