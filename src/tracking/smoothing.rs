//! Exponential easing for tracked positions
//!
//! Each tick moves the position a fixed fraction of the remaining distance
//! toward the target, giving a decelerating approach with no overshoot.
//! A factor of `1.0` snaps straight to the target.

/// 1D easing state
#[derive(Debug, Clone)]
pub struct EaseState {
    pub position: f64,
}

impl EaseState {
    /// Create a new easing state at the given position
    pub fn new(initial: f64) -> Self {
        Self { position: initial }
    }

    /// Advance one tick toward the target
    ///
    /// `position += (target - position) * factor`
    pub fn step(&mut self, target: f64, factor: f64) {
        self.position += (target - self.position) * factor;
    }

    /// Check if the position is within `threshold` of the target
    pub fn is_settled(&self, target: f64, threshold: f64) -> bool {
        (self.position - target).abs() < threshold
    }
}

/// 2D easing state (X and Y eased independently)
#[derive(Debug, Clone)]
pub struct Ease2D {
    pub x: EaseState,
    pub y: EaseState,
}

impl Ease2D {
    /// Create a new 2D easing state at the given position
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: EaseState::new(x),
            y: EaseState::new(y),
        }
    }

    /// Advance both axes one tick toward the target position
    pub fn step(&mut self, target_x: f64, target_y: f64, factor: f64) {
        self.x.step(target_x, factor);
        self.y.step(target_y, factor);
    }

    /// Get the current eased position
    pub fn position(&self) -> (f64, f64) {
        (self.x.position, self.y.position)
    }

    /// Jump to a position, discarding any in-flight easing
    pub fn reset(&mut self, x: f64, y: f64) {
        self.x = EaseState::new(x);
        self.y = EaseState::new(y);
    }

    /// Check if both axes have settled
    pub fn is_settled(&self, target_x: f64, target_y: f64, threshold: f64) -> bool {
        self.x.is_settled(target_x, threshold) && self.y.is_settled(target_y, threshold)
    }
}

impl Default for Ease2D {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Upper bound on ticks needed to close `distance` to within `tolerance`
///
/// After `n` ticks the remaining gap is `distance * (1 - factor)^n`.
pub fn ticks_to_settle(distance: f64, factor: f64, tolerance: f64) -> usize {
    if distance <= tolerance {
        return 0;
    }
    if factor >= 1.0 {
        return 1;
    }
    ((tolerance / distance).ln() / (1.0 - factor).ln()).ceil() as usize
}
