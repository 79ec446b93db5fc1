//! # pinch_builder
//!
//! Place cubes on a 3-D lattice by pinching thumb and index finger at a point
//! on screen and letting go.
//!
//! ## Frame pipeline
//!
//! | Stage | Module | Output |
//! |---|---|---|
//! | Hand source | [`tracker`] | `TrackerEvent::Frame(HandFrame)` |
//! | Pinch detection | `hand_landmarks::PinchDetector` | `is_pinching`, `just_released` |
//! | Projection | `voxel_lattice::LatticeProjector` | `LatticePosition` |
//! | Orchestration | [`controller`] | preview update, placement on release |
//! | Rendering | [`scene`], [`visualizer`] | cubes on screen |
//!
//! While pinching, a white preview cube follows the pinch point.  Releasing
//! commits a voxel at the preview cell, unless one is already there.
//! Losing the hand mid-pinch cancels without placing.
//!
//! ## Feature flags
//!
//! * default: **Simulation mode**, the mouse plays the hand.
//! * `leap`: **Hardware mode**, polls a real LeapMotion controller via LeapC.
//!
//! ### Simulation controls
//!
//! | Input | Meaning |
//! |---|---|
//! | Cursor position | Pinch point |
//! | Hold left button | Pinch |
//! | Release left button | Place |
//! | Cursor leaves window | Hand lost |
//! | `C` | Clear all cubes |
//! | `Q` / `Esc` | Quit |

pub mod tracker;
pub mod session;
pub mod controller;
pub mod scene;
pub mod visualizer;
pub mod config;
pub mod app;
