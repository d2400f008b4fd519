//! Surface layout collaborators

use crate::geometry::SurfaceRect;
use parking_lot::RwLock;
use std::sync::Arc;

/// Supplies the current bounds of the interactive surface
///
/// Returning `None` means the surface has not been measured yet; the tick
/// that asked is skipped.
pub trait LayoutProvider: Send + Sync {
    fn surface_rect(&self) -> Option<SurfaceRect>;
}

/// A surface that never moves or resizes
#[derive(Debug, Clone, Copy)]
pub struct FixedLayout(pub SurfaceRect);

impl LayoutProvider for FixedLayout {
    fn surface_rect(&self) -> Option<SurfaceRect> {
        Some(self.0).filter(SurfaceRect::is_measured)
    }
}

/// A surface whose bounds are updated by the host as it lays out
#[derive(Debug, Clone, Default)]
pub struct SharedLayout {
    rect: Arc<RwLock<Option<SurfaceRect>>>,
}

impl SharedLayout {
    /// Start unmeasured
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, rect: SurfaceRect) {
        *self.rect.write() = Some(rect);
    }

    pub fn clear(&self) {
        *self.rect.write() = None;
    }
}

impl LayoutProvider for SharedLayout {
    fn surface_rect(&self) -> Option<SurfaceRect> {
        let rect = *self.rect.read();
        rect.filter(SurfaceRect::is_measured)
    }
}
