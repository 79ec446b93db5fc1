//! Screen point → lattice cell.
//!
//! # Algorithm
//!
//! 1. `(x, y)` in `[0,1]²` → NDC: `ndc_x = 2x − 1`, `ndc_y = 1 − 2y`.
//! 2. Unproject `(ndc_x, ndc_y, MID_DEPTH)` into world space and form the ray
//!    from the camera position through it.
//! 3. Walk `build_distance` along the normalised ray.  Tracker depth is
//!    ignored; a fixed distance keeps placements stable.
//! 4. Snap with [`LatticePosition::from_world`].
//!
//! Any degenerate input yields [`LatticePosition::ORIGIN`] so the per-frame
//! loop never has a failure to handle.

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::camera::CameraPose;
use crate::lattice::LatticePosition;

/// Distance from the camera at which cubes are built.
pub const BUILD_DISTANCE: f32 = 6.0;
/// Lattice pitch.
pub const CELL_SIZE: f32 = 1.0;
/// NDC depth of the point the ray is cast through.
pub const MID_DEPTH: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeProjector {
    pub cell_size:      f32,
    pub build_distance: f32,
}

impl Default for LatticeProjector {
    fn default() -> Self {
        LatticeProjector { cell_size: CELL_SIZE, build_distance: BUILD_DISTANCE }
    }
}

impl LatticeProjector {
    pub fn new(cell_size: f32, build_distance: f32) -> Self {
        LatticeProjector { cell_size, build_distance }
    }

    /// Continuous world point `build_distance` along the ray through `screen`.
    ///
    /// `None` when the pose, the screen point, or the resulting ray is
    /// degenerate.
    pub fn project_world(&self, screen: Vec2, pose: &CameraPose) -> Option<Vec3> {
        if !pose.is_valid() || !screen.is_finite() || !self.build_distance.is_finite() {
            return None;
        }

        let ndc = Vec3::new(2.0 * screen.x - 1.0, 1.0 - 2.0 * screen.y, MID_DEPTH);
        let through = pose.unproject(ndc);
        let dir = (through - pose.position).try_normalize()?;

        let p = pose.position + dir * self.build_distance;
        p.is_finite().then_some(p)
    }

    /// Lattice cell under `screen`, or the origin for degenerate input.
    pub fn project(&self, screen: Vec2, pose: &CameraPose) -> LatticePosition {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            debug!(cell_size = self.cell_size, "unusable cell size; projecting to origin");
            return LatticePosition::ORIGIN;
        }
        match self.project_world(screen, pose) {
            Some(p) => LatticePosition::from_world(p, self.cell_size),
            None => {
                debug!(?screen, "degenerate projection; using origin");
                LatticePosition::ORIGIN
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
