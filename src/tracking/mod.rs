//! Tracker engine
//!
//! This module resolves constrained targets for each follower and eases
//! their displayed positions toward them once per animation tick.

pub mod engine;
pub mod resolver;
pub mod smoothing;

pub use engine::{Tracker, TrackerFrame, TrackerSet};
pub use resolver::{effective_radii, resolve_target, OutputSpace};
pub use smoothing::{ticks_to_settle, Ease2D, EaseState};
