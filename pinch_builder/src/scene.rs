//! Render-side scene state.
//!
//! The renderer never reads the voxel store directly.  It mirrors placements
//! from [`FrameEffect`]s, which keeps the store's single owner the session.

use voxel_lattice::{LatticePosition, Voxel};

use crate::controller::FrameEffect;
use crate::session::PreviewState;

// ════════════════════════════════════════════════════════════════════════════
// PlacementPulse: brief highlight around a newly placed cube
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct PlacementPulse {
    pub position: LatticePosition,
    /// Progress 0.0–1.0; drives the outline fade.
    pub progress: f32,
}

impl PlacementPulse {
    pub fn new(position: LatticePosition) -> Self {
        PlacementPulse { position, progress: 0.0 }
    }
    pub fn tick(&mut self) { self.progress = (self.progress + 0.06).min(1.0); }
    pub fn done(&self) -> bool { self.progress >= 1.0 }
}

// ════════════════════════════════════════════════════════════════════════════
// SceneState
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default)]
pub struct SceneState {
    /// Renderable cubes, in placement order.
    pub cubes:   Vec<Voxel>,
    pub preview: PreviewState,
    pub pulses:  Vec<PlacementPulse>,
}

impl SceneState {
    pub fn apply(&mut self, effect: &FrameEffect) {
        match *effect {
            FrameEffect::Preview(p) => self.preview = p,
            FrameEffect::Placed(v)  => {
                self.cubes.push(v);
                self.pulses.push(PlacementPulse::new(v.position));
            }
            FrameEffect::Cleared    => {
                self.cubes.clear();
                self.pulses.clear();
            }
        }
    }

    /// Advance animations by one frame.
    pub fn tick(&mut self) {
        for p in &mut self.pulses { p.tick(); }
        self.pulses.retain(|p| !p.done());
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
