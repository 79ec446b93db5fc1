//! Landmarks, hands, and the tracker result they are extracted from.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Anatomical indices
// ════════════════════════════════════════════════════════════════════════════

/// Number of keypoints in a tracked hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:     usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One estimated keypoint.
///
/// `x` and `y` are normalised screen coordinates in `[0, 1]` with the origin
/// at the top-left; `z` is a relative depth estimate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    pub fn to_vec3(self) -> Vec3 { Vec3::new(self.x, self.y, self.z) }

    /// Screen-space part only.
    pub fn screen(self) -> Vec2 { Vec2::new(self.x, self.y) }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Hand / HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// A fully tracked hand: exactly [`LANDMARK_COUNT`] keypoints.
#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    landmarks: [Landmark; LANDMARK_COUNT],
}

/// The per-frame input: `None` when no hand is tracked.
pub type HandFrame = Option<Hand>;

impl Hand {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Hand { landmarks }
    }

    /// Build a hand from a tracker's landmark list.
    ///
    /// Returns `None` for the wrong number of points or any non-finite
    /// coordinate, so a malformed result reads the same as "no hand".
    pub fn from_landmarks(points: &[Landmark]) -> Option<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] = points.try_into().ok()?;
        if landmarks.iter().all(|l| l.is_finite()) {
            Some(Hand { landmarks })
        } else {
            None
        }
    }

    pub fn landmark(&self, index: usize) -> Landmark { self.landmarks[index] }

    pub fn thumb_tip(&self) -> Landmark { self.landmarks[THUMB_TIP] }
    pub fn index_tip(&self) -> Landmark { self.landmarks[INDEX_TIP] }

    /// 3-D distance between thumb tip and index tip.
    pub fn pinch_distance(&self) -> f32 {
        self.thumb_tip().to_vec3().distance(self.index_tip().to_vec3())
    }

    /// Screen-space midpoint of thumb tip and index tip.
    pub fn pinch_point(&self) -> Vec2 {
        (self.thumb_tip().screen() + self.index_tip().screen()) * 0.5
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TrackingResult: the tracker's raw output
// ════════════════════════════════════════════════════════════════════════════

/// Raw result from a hand tracker: zero or more landmark lists.
///
/// ```json
/// { "hands": [[{"x":0.5,"y":0.5,"z":0.0}, ...21 points]] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingResult {
    #[serde(default)]
    pub hands: Vec<Vec<Landmark>>,
}

impl TrackingResult {
    /// Reduce to a single-hand frame.  Only the first hand is considered.
    pub fn hand_frame(&self) -> HandFrame {
        self.hands.first().and_then(|points| Hand::from_landmarks(points))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
