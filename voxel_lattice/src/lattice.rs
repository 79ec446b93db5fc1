//! Integer lattice coordinates.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A lattice cell `(i, j, k)`, standing for the world point `(i·s, j·s, k·s)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LatticePosition {
    pub i: i32,
    pub j: i32,
    pub k: i32,
}

impl LatticePosition {
    pub const ORIGIN: LatticePosition = LatticePosition { i: 0, j: 0, k: 0 };

    pub const fn new(i: i32, j: i32, k: i32) -> Self {
        LatticePosition { i, j, k }
    }

    /// Snap a world point to the nearest cell of pitch `cell_size`.
    ///
    /// Rounds half away from zero (`f32::round`).  The float→int cast
    /// saturates and maps NaN to 0, so every input has a defined cell.
    pub fn from_world(p: Vec3, cell_size: f32) -> Self {
        let q = p / cell_size;
        LatticePosition {
            i: q.x.round() as i32,
            j: q.y.round() as i32,
            k: q.z.round() as i32,
        }
    }

    /// Centre of this cell in world space.
    pub fn to_world(self, cell_size: f32) -> Vec3 {
        Vec3::new(self.i as f32, self.j as f32, self.k as f32) * cell_size
    }
}

impl fmt::Display for LatticePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.i, self.j, self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_lattice_points_round_trip() {
        for s in [1.0_f32, 0.5, 0.25, 2.0] {
            for cell in [
                LatticePosition::new(0, 0, -6),
                LatticePosition::new(2, -3, 7),
                LatticePosition::new(-100, 40, 1),
            ] {
                let p = cell.to_world(s);
                assert_eq!(LatticePosition::from_world(p, s), cell);
                assert_eq!(LatticePosition::from_world(p, s).to_world(s), p);
            }
        }
    }

    #[test]
    fn half_cells_round_away_from_zero() {
        let p = Vec3::new(0.5, -0.5, 2.5);
        assert_eq!(LatticePosition::from_world(p, 1.0), LatticePosition::new(1, -1, 3));
    }

    #[test]
    fn non_finite_points_still_snap() {
        let p = Vec3::new(f32::NAN, f32::INFINITY, f32::NEG_INFINITY);
        let cell = LatticePosition::from_world(p, 1.0);
        assert_eq!(cell, LatticePosition::new(0, i32::MAX, i32::MIN));
    }

    #[test]
    fn display_is_a_tuple() {
        assert_eq!(LatticePosition::new(2, 0, -6).to_string(), "(2, 0, -6)");
    }
}
