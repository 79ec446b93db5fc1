//! # hand_landmarks
//!
//! Per-frame hand keypoints and the thumb/index pinch detector built on them.
//!
//! A tracker delivers a [`TrackingResult`] per camera frame.  It is reduced to
//! a [`HandFrame`] (`Some(hand)` or `None` when tracking is lost), and the
//! [`PinchDetector`] turns the stream of frames into a [`PinchSignal`] with a
//! falling-edge `just_released` flag.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_landmarks::{Hand, Landmark, PinchDetector, THUMB_TIP, INDEX_TIP, LANDMARK_COUNT};
//!
//! let mut points = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
//! points[THUMB_TIP] = Landmark::new(0.50, 0.5, 0.0);
//! points[INDEX_TIP] = Landmark::new(0.52, 0.5, 0.0);
//! let hand = Hand::new(points);
//!
//! let mut detector = PinchDetector::new();
//! assert!(detector.detect(Some(&hand)).is_pinching);
//! assert!(!detector.detect(None).just_released);
//! ```

pub mod landmark;
pub mod pinch;
pub mod trace;

pub use landmark::{
    Hand, HandFrame, Landmark, TrackingResult,
    INDEX_TIP, LANDMARK_COUNT, THUMB_TIP, WRIST,
};
pub use pinch::{is_valid_threshold, PinchDetector, PinchSignal, PINCH_THRESHOLD};
pub use trace::{replay, TraceFrame};
