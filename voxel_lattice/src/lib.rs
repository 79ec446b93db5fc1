//! # voxel_lattice
//!
//! Turns a normalised screen point into a cell of a fixed 3-D lattice, and
//! keeps the set of voxels placed on that lattice.
//!
//! * [`LatticeProjector`] casts a ray from a [`CameraPose`] through the screen
//!   point, walks a fixed build distance along it, and snaps the result.
//! * [`VoxelStore`] holds at most one [`Voxel`] per [`LatticePosition`];
//!   placing onto an occupied cell is a no-op.
//!
//! ## Quick start
//!
//! ```rust
//! use glam::Vec2;
//! use voxel_lattice::{CameraPose, LatticePosition, LatticeProjector, VoxelStore};
//!
//! let projector = LatticeProjector::default();
//! let pos = projector.project(Vec2::new(0.5, 0.5), &CameraPose::default());
//! assert_eq!(pos, LatticePosition::new(0, 0, -6));
//!
//! let mut store = VoxelStore::new();
//! assert!(store.place(pos).placed());
//! assert!(!store.place(pos).placed());
//! assert_eq!(store.count(), 1);
//! ```

pub mod camera;
pub mod lattice;
pub mod palette;
pub mod projector;
pub mod store;

pub use camera::CameraPose;
pub use lattice::LatticePosition;
pub use palette::Palette;
pub use projector::{LatticeProjector, BUILD_DISTANCE, CELL_SIZE, MID_DEPTH};
pub use store::{PlaceOutcome, Voxel, VoxelStore};
