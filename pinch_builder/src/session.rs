//! Per-session context: everything the controller mutates lives here.

use voxel_lattice::{CameraPose, LatticePosition, VoxelStore};

/// The transient cube shown while pinching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewState {
    pub position: LatticePosition,
    pub visible:  bool,
}

/// Built once at startup and handed to the controller on every frame.
#[derive(Debug, Default)]
pub struct Session {
    pub store:   VoxelStore,
    pub preview: PreviewState,
    pub camera:  CameraPose,
}

impl Session {
    pub fn new(camera: CameraPose) -> Self {
        Session { camera, ..Self::default() }
    }

    pub fn count(&self) -> usize { self.store.count() }
}
