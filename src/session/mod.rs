//! Tracking sessions
//!
//! A session ties a tracker set to a pointer sample cell, a layout provider
//! and a render sink, and drives it from a cancellable refresh loop.

pub mod driver;
pub mod layout;
pub mod render;

pub use driver::{SessionState, TrackingSession};
pub use layout::{FixedLayout, LayoutProvider, SharedLayout};
pub use render::{FrameRecorder, RenderSink};
