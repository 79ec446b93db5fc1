//! Per-frame placement state machine.
//!
//! ```text
//!            is_pinching
//!   Idle ─────────────────▶ Previewing
//!    ▲                         │
//!    └─────────────────────────┘
//!     released (place, then hide)
//!     or hand lost (hide only)
//! ```
//!
//! [`PlacementController::on_hand_frame`] consumes one [`HandFrame`] and
//! returns the [`FrameEffect`]s the renderer has to apply.  It never blocks.

use hand_landmarks::{Hand, PinchDetector};
use tracing::debug;
use voxel_lattice::{LatticeProjector, PlaceOutcome, Voxel};

use crate::session::{PreviewState, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Previewing,
}

/// Side effects of one controller step, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameEffect {
    /// New preview transform; emitted once per processed frame.
    Preview(PreviewState),
    /// A voxel was committed to the store.
    Placed(Voxel),
    /// Every voxel was removed.
    Cleared,
}

#[derive(Debug, Clone)]
pub struct PlacementController {
    detector:  PinchDetector,
    projector: LatticeProjector,
    state:     ControllerState,
}

impl Default for PlacementController {
    fn default() -> Self {
        Self::new(PinchDetector::new(), LatticeProjector::default())
    }
}

impl PlacementController {
    pub fn new(detector: PinchDetector, projector: LatticeProjector) -> Self {
        PlacementController { detector, projector, state: ControllerState::Idle }
    }

    pub fn state(&self) -> ControllerState { self.state }

    /// Process one tracked frame (`None` = hand lost).
    pub fn on_hand_frame(&mut self, session: &mut Session, frame: Option<&Hand>) -> Vec<FrameEffect> {
        let signal = self.detector.detect(frame);

        let Some(hand) = frame else {
            if self.state == ControllerState::Previewing {
                debug!("hand lost while previewing; nothing placed");
            }
            self.state = ControllerState::Idle;
            session.preview.visible = false;
            return vec![FrameEffect::Preview(session.preview)];
        };

        let mut effects = Vec::with_capacity(2);
        let position = self.projector.project(hand.pinch_point(), &session.camera);

        if signal.just_released {
            if let PlaceOutcome::Placed(voxel) = session.store.place(position) {
                effects.push(FrameEffect::Placed(voxel));
            }
        }

        let next = if signal.is_pinching { ControllerState::Previewing } else { ControllerState::Idle };
        if next != self.state {
            debug!(from = ?self.state, to = ?next, %position, "placement state");
            self.state = next;
        }

        session.preview = PreviewState { position, visible: signal.is_pinching };
        effects.push(FrameEffect::Preview(session.preview));
        effects
    }

    /// Route a user clear command into the store.
    pub fn clear(&mut self, session: &mut Session) -> Vec<FrameEffect> {
        session.store.clear();
        vec![FrameEffect::Cleared]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_landmarks::{Landmark, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};
    use voxel_lattice::{CameraPose, LatticePosition};

    /// Hand centred on `(cx, cy)` with thumb/index tips `gap` apart along x.
    fn hand_at(cx: f32, cy: f32, gap: f32) -> Hand {
        let mut p = [Landmark::new(cx, cy + 0.2, 0.0); LANDMARK_COUNT];
        p[THUMB_TIP] = Landmark::new(cx - gap / 2.0, cy, 0.0);
        p[INDEX_TIP] = Landmark::new(cx + gap / 2.0, cy, 0.0);
        Hand::new(p)
    }

    fn hand(gap: f32) -> Hand { hand_at(0.5, 0.5, gap) }

    fn setup() -> (PlacementController, Session) {
        (PlacementController::default(), Session::new(CameraPose::default()))
    }

    fn placed(effects: &[FrameEffect]) -> Vec<Voxel> {
        effects.iter().filter_map(|e| match e {
            FrameEffect::Placed(v) => Some(*v),
            _ => None,
        }).collect()
    }

    #[test]
    fn pinch_then_release_places_once_on_release_frame() {
        let (mut ctl, mut session) = setup();
        let f1 = ctl.on_hand_frame(&mut session, Some(&hand(0.03)));
        let f2 = ctl.on_hand_frame(&mut session, Some(&hand(0.02)));
        let f3 = ctl.on_hand_frame(&mut session, Some(&hand(0.05)));
        assert!(placed(&f1).is_empty());
        assert!(placed(&f2).is_empty());
        assert_eq!(placed(&f3).len(), 1);
        assert_eq!(placed(&f3)[0].position, LatticePosition::new(0, 0, -6));
        assert_eq!(session.count(), 1);
    }

    #[test]
    fn place_happens_before_preview_is_hidden() {
        let (mut ctl, mut session) = setup();
        ctl.on_hand_frame(&mut session, Some(&hand(0.01)));
        let effects = ctl.on_hand_frame(&mut session, Some(&hand(0.2)));
        assert!(matches!(effects[0], FrameEffect::Placed(_)));
        assert!(matches!(effects[1], FrameEffect::Preview(PreviewState { visible: false, .. })));
    }

    #[test]
    fn preview_follows_pinch_state() {
        let (mut ctl, mut session) = setup();
        ctl.on_hand_frame(&mut session, Some(&hand(0.2)));
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert!(!session.preview.visible);
        assert_eq!(session.preview.position, LatticePosition::new(0, 0, -6));

        ctl.on_hand_frame(&mut session, Some(&hand(0.01)));
        assert_eq!(ctl.state(), ControllerState::Previewing);
        assert!(session.preview.visible);
    }

    #[test]
    fn preview_tracks_the_pinch_point() {
        let (mut ctl, mut session) = setup();
        ctl.on_hand_frame(&mut session, Some(&hand_at(0.5, 0.5, 0.01)));
        let centre = session.preview.position;
        ctl.on_hand_frame(&mut session, Some(&hand_at(0.95, 0.5, 0.01)));
        assert!(session.preview.position.i > centre.i);
        assert!(session.preview.visible);
    }

    #[test]
    fn every_frame_emits_one_preview() {
        let (mut ctl, mut session) = setup();
        let frames = [Some(hand(0.01)), None, Some(hand(0.3)), Some(hand(0.01)), Some(hand(0.3))];
        for f in &frames {
            let effects = ctl.on_hand_frame(&mut session, f.as_ref());
            let previews = effects.iter().filter(|e| matches!(e, FrameEffect::Preview(_))).count();
            assert_eq!(previews, 1);
        }
    }

    #[test]
    fn lost_hand_mid_pinch_never_places() {
        let (mut ctl, mut session) = setup();
        ctl.on_hand_frame(&mut session, Some(&hand(0.01)));
        let lost = ctl.on_hand_frame(&mut session, None);
        assert_eq!(lost, vec![FrameEffect::Preview(PreviewState {
            position: LatticePosition::new(0, 0, -6),
            visible:  false,
        })]);
        assert_eq!(ctl.state(), ControllerState::Idle);

        let back = ctl.on_hand_frame(&mut session, Some(&hand(0.2)));
        assert!(placed(&back).is_empty());
        assert_eq!(session.count(), 0);
    }

    #[test]
    fn repeated_release_on_same_cell_keeps_one_voxel() {
        let (mut ctl, mut session) = setup();
        for _ in 0..2 {
            ctl.on_hand_frame(&mut session, Some(&hand_at(0.5, 0.5, 0.01)));
            ctl.on_hand_frame(&mut session, Some(&hand_at(0.5, 0.5, 0.2)));
        }
        assert_eq!(session.count(), 1);
    }

    #[test]
    fn duplicate_position_place_is_noop() {
        let (_, mut session) = setup();
        let pos = LatticePosition::new(2, 0, -6);
        assert!(session.store.place(pos).placed());
        assert!(!session.store.place(pos).placed());
        assert_eq!(session.count(), 1);
    }

    #[test]
    fn three_placements_then_clear() {
        let (mut ctl, mut session) = setup();
        for x in [0.2, 0.5, 0.8] {
            ctl.on_hand_frame(&mut session, Some(&hand_at(x, 0.5, 0.01)));
            ctl.on_hand_frame(&mut session, Some(&hand_at(x, 0.5, 0.2)));
        }
        assert_eq!(session.count(), 3);

        let effects = ctl.clear(&mut session);
        assert_eq!(effects, vec![FrameEffect::Cleared]);
        assert_eq!(session.count(), 0);
        assert!(session.store.iter().next().is_none());
    }

    #[test]
    fn release_is_placed_at_release_frame_position() {
        let (mut ctl, mut session) = setup();
        ctl.on_hand_frame(&mut session, Some(&hand_at(0.5, 0.5, 0.01)));
        let effects = ctl.on_hand_frame(&mut session, Some(&hand_at(0.95, 0.5, 0.2)));
        let v = placed(&effects)[0];
        assert_eq!(v.position, session.preview.position);
        assert!(v.position.i > 0);
    }
}
