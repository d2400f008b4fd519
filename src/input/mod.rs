//! Pointer input
//!
//! The latest pointer position is held in a single session-scoped cell.
//! Sources overwrite it at their own rate; the animation loop reads a
//! snapshot each tick.

pub mod sample;
pub mod source;
pub mod types;

pub use sample::{pointer_channel, PointerReader, PointerSink};
pub use source::{PointerSource, ReplaySource};
pub use types::{validate_trace, PointerMove};
