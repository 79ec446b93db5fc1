//! Replay of recorded tracker output.
//!
//! A trace is JSON lines, one [`TrackingResult`] per frame.  Blank lines are
//! skipped; a line that does not parse is logged and counts as a frame with
//! no hand, so the detector sees the same gap a live tracker would give it.

use std::io::{self, BufRead};

use tracing::warn;

use crate::landmark::TrackingResult;
use crate::pinch::{PinchDetector, PinchSignal};

/// One replayed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceFrame {
    /// Zero-based line number in the trace.
    pub line:      usize,
    pub hand_seen: bool,
    pub signal:    PinchSignal,
}

/// Feed every frame of `reader` through `detector`.
///
/// Only I/O failures are errors.
pub fn replay<R: BufRead>(reader: R, detector: &mut PinchDetector) -> io::Result<Vec<TraceFrame>> {
    let mut frames = Vec::new();

    for (line, text) in reader.lines().enumerate() {
        let text = text?;
        if text.trim().is_empty() { continue; }

        let hand = match serde_json::from_str::<TrackingResult>(&text) {
            Ok(result) => result.hand_frame(),
            Err(e) => {
                warn!(line, error = %e, "unparsable frame treated as no hand");
                None
            }
        };

        frames.push(TraceFrame {
            line,
            hand_seen: hand.is_some(),
            signal:    detector.detect(hand.as_ref()),
        });
    }

    Ok(frames)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Landmark, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};

    /// One trace line whose hand has thumb and index tips `gap` apart.
    fn frame_line(gap: f32) -> String {
        let mut p = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        p[THUMB_TIP] = Landmark::new(0.25, 0.5, 0.0);
        p[INDEX_TIP] = Landmark::new(0.25 + gap, 0.5, 0.0);
        serde_json::to_string(&TrackingResult { hands: vec![p] }).unwrap()
    }

    fn releases(frames: &[TraceFrame]) -> usize {
        frames.iter().filter(|f| f.signal.just_released).count()
    }

    #[test]
    fn pinch_then_open_releases_once() {
        let trace = format!("{}\n{}\n", frame_line(0.02), frame_line(0.12));
        let frames = replay(trace.as_bytes(), &mut PinchDetector::new()).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(releases(&frames), 1);
        assert!(frames[1].signal.just_released);
    }

    #[test]
    fn garbage_line_counts_as_lost_hand() {
        let trace = format!("{}\nnot json at all\n{}\n", frame_line(0.02), frame_line(0.12));
        let frames = replay(trace.as_bytes(), &mut PinchDetector::new()).unwrap();
        assert_eq!(frames.len(), 3);
        assert!(!frames[1].hand_seen);
        assert_eq!(frames[1].signal, PinchSignal::default());
        assert_eq!(releases(&frames), 0);
    }

    #[test]
    fn blank_lines_are_skipped_but_keep_numbering() {
        let trace = format!("{}\n\n   \n{}\n", frame_line(0.02), frame_line(0.12));
        let frames = replay(trace.as_bytes(), &mut PinchDetector::new()).unwrap();
        let lines: Vec<_> = frames.iter().map(|f| f.line).collect();
        assert_eq!(lines, [0, 3]);
        assert_eq!(releases(&frames), 1);
    }

    #[test]
    fn empty_hand_list_is_no_hand() {
        let trace = "{\"hands\": []}\n{}\n";
        let frames = replay(trace.as_bytes(), &mut PinchDetector::new()).unwrap();
        assert!(frames.iter().all(|f| !f.hand_seen));
    }

    #[test]
    fn custom_threshold_is_honoured() {
        let trace = format!("{}\n{}\n", frame_line(0.08), frame_line(0.2));
        let default = replay(trace.as_bytes(), &mut PinchDetector::new()).unwrap();
        let wide = replay(trace.as_bytes(), &mut PinchDetector::with_threshold(0.1)).unwrap();
        assert_eq!(releases(&default), 0);
        assert_eq!(releases(&wide), 1);
    }
}
