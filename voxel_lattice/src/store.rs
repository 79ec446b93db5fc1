//! The set of placed voxels.
//!
//! Invariant: at most one [`Voxel`] per [`LatticePosition`].  Placing onto an
//! occupied cell changes nothing.  The store only grows through
//! [`VoxelStore::place`] and only shrinks through [`VoxelStore::clear`].

use std::collections::HashSet;

use tracing::{debug, info};

use crate::lattice::LatticePosition;
use crate::palette::Palette;

// ════════════════════════════════════════════════════════════════════════════
// Voxel
// ════════════════════════════════════════════════════════════════════════════

/// One placed cube.  Identified by its cell; `color` is style only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Voxel {
    pub position: LatticePosition,
    /// Packed `0xAARRGGBB`.
    pub color:    u32,
}

/// Result of [`VoxelStore::place`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceOutcome {
    Placed(Voxel),
    /// The cell already held a voxel; nothing changed.
    Occupied,
}

impl PlaceOutcome {
    pub fn placed(&self) -> bool { matches!(self, PlaceOutcome::Placed(_)) }

    pub fn voxel(&self) -> Option<Voxel> {
        match *self {
            PlaceOutcome::Placed(v) => Some(v),
            PlaceOutcome::Occupied  => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// VoxelStore
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default)]
pub struct VoxelStore {
    /// Placement order.
    voxels:   Vec<Voxel>,
    occupied: HashSet<LatticePosition>,
    palette:  Palette,
    /// Placements since the session started; not reset by `clear`.
    sequence: u64,
}

impl VoxelStore {
    pub fn new() -> Self { Self::default() }

    /// Place a voxel at `pos` unless the cell is already taken.
    pub fn place(&mut self, pos: LatticePosition) -> PlaceOutcome {
        if !self.occupied.insert(pos) {
            debug!(%pos, "cell occupied; placement ignored");
            return PlaceOutcome::Occupied;
        }

        let voxel = Voxel { position: pos, color: self.palette.color(self.sequence) };
        self.sequence += 1;
        self.voxels.push(voxel);
        self.check_invariant();

        info!(%pos, count = self.count(), "voxel placed");
        PlaceOutcome::Placed(voxel)
    }

    /// Remove every voxel.  Clearing an empty store is a no-op.
    pub fn clear(&mut self) {
        if !self.voxels.is_empty() {
            info!(removed = self.voxels.len(), "voxel store cleared");
        }
        self.voxels.clear();
        self.occupied.clear();
        self.check_invariant();
    }

    pub fn count(&self) -> usize { self.voxels.len() }
    pub fn is_empty(&self) -> bool { self.voxels.is_empty() }

    pub fn contains(&self, pos: LatticePosition) -> bool { self.occupied.contains(&pos) }

    pub fn get(&self, pos: LatticePosition) -> Option<&Voxel> {
        if !self.contains(pos) { return None; }
        self.voxels.iter().find(|v| v.position == pos)
    }

    /// Voxels in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &Voxel> + '_ { self.voxels.iter() }

    fn check_invariant(&self) {
        debug_assert_eq!(
            self.voxels.len(),
            self.occupied.len(),
            "voxel list and occupancy index disagree",
        );
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_is_idempotent() {
        let mut store = VoxelStore::new();
        let pos = LatticePosition::new(2, 0, -6);
        assert!(store.place(pos).placed());
        assert_eq!(store.place(pos), PlaceOutcome::Occupied);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn occupied_place_does_not_overwrite() {
        let mut store = VoxelStore::new();
        let pos = LatticePosition::new(1, 1, 1);
        let first = store.place(pos).voxel().unwrap();
        store.place(pos);
        assert_eq!(store.get(pos), Some(&first));
    }

    #[test]
    fn equality_is_exact() {
        let mut store = VoxelStore::new();
        assert!(store.place(LatticePosition::new(0, 0, -6)).placed());
        assert!(store.place(LatticePosition::new(0, 0, -5)).placed());
        assert!(store.place(LatticePosition::new(0, 1, -6)).placed());
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn count_tracks_successful_places() {
        let mut store = VoxelStore::new();
        let mut successes = 0;
        for (i, j) in [(0, 0), (1, 0), (0, 0), (2, 3), (1, 0), (5, 5)] {
            if store.place(LatticePosition::new(i, j, -6)).placed() { successes += 1; }
        }
        assert_eq!(store.count(), successes);
        assert_eq!(successes, 4);
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store = VoxelStore::new();
        for i in 0..3 { store.place(LatticePosition::new(i, 0, -6)); }
        store.clear();
        assert_eq!(store.count(), 0);
        assert!(store.is_empty());
        assert!(store.iter().next().is_none());
        assert!(!store.contains(LatticePosition::new(0, 0, -6)));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut store = VoxelStore::new();
        store.clear();
        store.clear();
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn cell_is_free_again_after_clear() {
        let mut store = VoxelStore::new();
        let pos = LatticePosition::new(2, 0, -6);
        store.place(pos);
        store.clear();
        assert!(store.place(pos).placed());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn iteration_follows_placement_order() {
        let mut store = VoxelStore::new();
        let cells = [
            LatticePosition::new(3, 0, -6),
            LatticePosition::new(-1, 0, -6),
            LatticePosition::new(0, 2, -6),
        ];
        for c in cells { store.place(c); }
        let order: Vec<_> = store.iter().map(|v| v.position).collect();
        assert_eq!(order, cells);
    }

    #[test]
    fn colors_keep_advancing_across_clear() {
        let mut store = VoxelStore::new();
        let a = store.place(LatticePosition::ORIGIN).voxel().unwrap();
        store.clear();
        let b = store.place(LatticePosition::ORIGIN).voxel().unwrap();
        assert_ne!(a.color, b.color);
    }
}
