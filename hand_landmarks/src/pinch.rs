//! Thumb/index pinch detection with falling-edge release.
//!
//! There is no smoothing: one frame under the threshold is a
//! pinch, and the first frame back over it is a release.

use tracing::debug;

use crate::landmark::Hand;

/// Default thumb/index distance (normalised units) below which a hand pinches.
pub const PINCH_THRESHOLD: f32 = 0.045;

/// True for a usable threshold: finite and strictly inside `(0, 1)`.
pub fn is_valid_threshold(threshold: f32) -> bool {
    threshold > 0.0 && threshold < 1.0
}

/// Result of feeding one frame to the detector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinchSignal {
    pub is_pinching:   bool,
    /// True only on the frame where pinching stops.
    pub just_released: bool,
}

/// Edge-triggered pinch detector.  Owns the previous frame's pinch state.
#[derive(Clone, Debug)]
pub struct PinchDetector {
    threshold:    f32,
    was_pinching: bool,
}

impl Default for PinchDetector {
    fn default() -> Self { Self::new() }
}

impl PinchDetector {
    pub fn new() -> Self { Self::with_threshold(PINCH_THRESHOLD) }

    pub fn with_threshold(threshold: f32) -> Self {
        PinchDetector { threshold, was_pinching: false }
    }

    pub fn threshold(&self) -> f32 { self.threshold }
    pub fn was_pinching(&self) -> bool { self.was_pinching }

    /// Forget the previous frame.
    pub fn reset(&mut self) { self.was_pinching = false; }

    /// Process one frame.
    ///
    /// A `None` frame clears the memory without reporting a release, so a
    /// hand that drops out mid-pinch and comes back open never fires.
    pub fn detect(&mut self, frame: Option<&Hand>) -> PinchSignal {
        let Some(hand) = frame else {
            if self.was_pinching {
                debug!("tracking lost mid-pinch; release suppressed");
            }
            self.reset();
            return PinchSignal::default();
        };

        let is_pinching   = hand.pinch_distance() < self.threshold;
        let just_released = self.was_pinching && !is_pinching;
        self.was_pinching = is_pinching;

        if just_released {
            debug!(distance = hand.pinch_distance(), "pinch released");
        }
        PinchSignal { is_pinching, just_released }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
