//! Top-level application state and loop.
//!
//! `AppState` owns the [`Session`], the [`PlacementController`] and the
//! render-side [`SceneState`].  It processes [`TrackerEvent`]s and drives the
//! visualizer each frame.

use std::sync::mpsc::{self, Receiver, TryRecvError};

use anyhow::Result;
use hand_landmarks::{HandFrame, PinchDetector};
use tracing::info;
use voxel_lattice::LatticeProjector;

use crate::config::AppConfig;
use crate::controller::{ControllerState, FrameEffect, PlacementController};
use crate::scene::SceneState;
use crate::session::Session;
use crate::tracker::{spawn_hand_source, SimInput, TrackerEvent};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    session:    Session,
    controller: PlacementController,
    scene:      SceneState,
    cell_size:  f32,

    pub status: String,
}

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow { Continue, Quit }

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        let controller = PlacementController::new(
            PinchDetector::with_threshold(cfg.pinch_threshold),
            LatticeProjector::new(cfg.cell_size, cfg.build_distance),
        );
        AppState {
            session:   Session::new(cfg.camera_pose()),
            controller,
            scene:     SceneState::default(),
            cell_size: cfg.cell_size,
            status:    "Ready: hold the left button to pinch, release to place".to_string(),
        }
    }

    // ── process one TrackerEvent ──────────────────────────────────────────

    pub fn handle_event(&mut self, event: TrackerEvent) -> Flow {
        let effects = match event {
            TrackerEvent::Frame(frame) => self.handle_frame(frame),
            TrackerEvent::Clear => {
                let n = self.session.count();
                self.status = format!("CLEAR: removed {} cube(s)", n);
                self.controller.clear(&mut self.session)
            }
            TrackerEvent::Quit => return Flow::Quit,
        };
        for e in &effects {
            self.scene.apply(e);
        }
        Flow::Continue
    }

    fn handle_frame(&mut self, frame: HandFrame) -> Vec<FrameEffect> {
        let before = self.controller.state();
        let effects = self.controller.on_hand_frame(&mut self.session, frame.as_ref());

        for e in &effects {
            if let FrameEffect::Placed(v) = e {
                self.status = format!("PLACED at {}", v.position);
            }
        }
        let after = self.controller.state();
        if before == ControllerState::Idle && after == ControllerState::Previewing {
            self.status = format!("PINCH: preview at {}", self.session.preview.position);
        } else if frame.is_none() && before == ControllerState::Previewing {
            self.status = "hand lost: nothing placed".to_string();
        }
        effects
    }

    /// Per-frame animation tick.
    pub fn tick(&mut self) { self.scene.tick(); }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn session(&self) -> &Session { &self.session }
    pub fn scene(&self)   -> &SceneState { &self.scene }
    pub fn cell_size(&self) -> f32 { self.cell_size }
    pub fn count(&self)   -> usize { self.session.count() }
}

/// Apply every pending event, in arrival order.  No frame is skipped, so
/// the edge detector always sees the true predecessor.
pub fn drain_events(app: &mut AppState, rx: &Receiver<TrackerEvent>) -> Flow {
    loop {
        match rx.try_recv() {
            Ok(evt) => {
                if app.handle_event(evt) == Flow::Quit { return Flow::Quit; }
            }
            Err(TryRecvError::Empty)        => return Flow::Continue,
            Err(TryRecvError::Disconnected) => return Flow::Quit,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the visualizer and the hand source (mouse simulation by default,
/// hardware with `--features leap`), and drives the event/render loop at
/// ~60 fps.
pub fn run(cfg: AppConfig) -> Result<()> {
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();

    // In hardware mode the window only supplies the clear command.
    #[cfg(feature = "leap")]
    let (tracker_rx, ui_rx) = (spawn_hand_source(crate::tracker::LeapHandSource), Some(sim_rx));
    #[cfg(not(feature = "leap"))]
    let (tracker_rx, ui_rx): (_, Option<Receiver<SimInput>>) =
        (spawn_hand_source(crate::tracker::SimHandSource { rx: sim_rx }), None);

    let mut vis = Visualizer::new(cfg.window_width, cfg.window_height, sim_tx)?;
    let mut app = AppState::new(&cfg);

    info!(
        threshold = cfg.pinch_threshold,
        cell_size = cfg.cell_size,
        build_distance = cfg.build_distance,
        "session started",
    );

    while vis.is_open() {
        // 1. Poll window input → SimInput
        if !vis.poll_input() { break; }

        if let Some(rx) = &ui_rx {
            while let Ok(input) = rx.try_recv() {
                if input == SimInput::Clear { app.handle_event(TrackerEvent::Clear); }
            }
        }

        // 2. Drain tracker events
        if drain_events(&mut app, &tracker_rx) == Flow::Quit { break; }

        // 3. Per-frame animation
        app.tick();

        // 4. Render
        vis.render(
            app.scene(),
            &app.session().camera,
            app.cell_size(),
            app.count(),
            &app.status,
        );
    }

    info!(cubes = app.count(), "session ended");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::sim_hand;
    use voxel_lattice::LatticePosition;

    fn make_app() -> AppState {
        AppState::new(&AppConfig::default())
    }

    fn frame(x: f32, y: f32, pinched: bool) -> TrackerEvent {
        TrackerEvent::Frame(Some(sim_hand(x, y, pinched)))
    }

    #[test]
    fn pinch_release_places_and_mirrors_scene() {
        let mut app = make_app();
        app.handle_event(frame(0.5, 0.5, true));
        assert!(app.scene().preview.visible);
        app.handle_event(frame(0.5, 0.5, false));
        assert_eq!(app.count(), 1);
        assert_eq!(app.scene().cubes.len(), 1);
        assert_eq!(app.scene().cubes[0].position, LatticePosition::new(0, 0, -6));
        assert!(!app.scene().preview.visible);
        assert!(app.status.starts_with("PLACED"));
    }

    #[test]
    fn clear_event_empties_store_and_scene() {
        let mut app = make_app();
        for x in [0.3, 0.5, 0.7] {
            app.handle_event(frame(x, 0.5, true));
            app.handle_event(frame(x, 0.5, false));
        }
        assert_eq!(app.count(), 3);
        app.handle_event(TrackerEvent::Clear);
        assert_eq!(app.count(), 0);
        assert!(app.scene().cubes.is_empty());
    }

    #[test]
    fn quit_event_stops_loop() {
        let mut app = make_app();
        assert_eq!(app.handle_event(TrackerEvent::Quit), Flow::Quit);
    }

    #[test]
    fn drain_processes_every_frame_in_order() {
        let mut app = make_app();
        let (tx, rx) = mpsc::channel();
        tx.send(frame(0.5, 0.5, true)).unwrap();
        tx.send(frame(0.5, 0.5, false)).unwrap();
        tx.send(frame(0.5, 0.5, true)).unwrap();
        tx.send(TrackerEvent::Frame(None)).unwrap();
        tx.send(frame(0.5, 0.5, false)).unwrap();

        assert_eq!(drain_events(&mut app, &rx), Flow::Continue);
        assert_eq!(app.count(), 1);

        drop(tx);
        assert_eq!(drain_events(&mut app, &rx), Flow::Quit);
    }

    #[test]
    fn lost_hand_status() {
        let mut app = make_app();
        app.handle_event(frame(0.5, 0.5, true));
        app.handle_event(TrackerEvent::Frame(None));
        assert_eq!(app.count(), 0);
        assert!(app.status.contains("nothing placed"));
    }
}
