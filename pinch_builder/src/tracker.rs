//! Hand tracking sources: LeapMotion hardware or mouse simulation.
//!
//! The public interface is [`TrackerEvent`] delivered over a `mpsc` channel.
//! The placement loop doesn't need to know whether frames came from real
//! hardware or from the simulated hand.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use hand_landmarks::{Hand, HandFrame, Landmark, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};

// ════════════════════════════════════════════════════════════════════════════
// TrackerEvent
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum TrackerEvent {
    /// One tracked frame (`None` = no hand).
    Frame(HandFrame),
    /// User asked to remove every voxel.
    Clear,
    /// Quit the application.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait: unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`TrackerEvent`]s over a channel.
pub trait HandSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<TrackerEvent>);
}

/// Spawn a hand source on its own thread and return the receiving end.
pub fn spawn_hand_source<H: HandSource>(source: H) -> Receiver<TrackerEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandSource: real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Leap reports millimetres above the device.  The first hand is mapped to
/// the 21-point layout (palm as wrist, then four joints per digit) and
/// normalised into screen space:
///
/// * x ∈ [−200, 200] mm → [0, 1]
/// * y ∈ [80, 480] mm → [1, 0] (screen y grows downward)
/// * z / 400 as relative depth
#[cfg(feature = "leap")]
pub struct LeapHandSource;

#[cfg(feature = "leap")]
impl HandSource for LeapHandSource {
    fn run(self: Box<Self>, tx: Sender<TrackerEvent>) {
        use leaprs::*;
        use tracing::{error, info};

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => {
                error!(error = ?e, "failed to create LeapC connection");
                let _ = tx.send(TrackerEvent::Quit);
                return;
            }
        };
        if let Err(e) = connection.open() {
            error!(error = ?e, "failed to open LeapMotion device");
            let _ = tx.send(TrackerEvent::Quit);
            return;
        }
        info!("LeapMotion connection open");

        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hand = frame.hands().next().and_then(|h| leap_hand(&h));
                if tx.send(TrackerEvent::Frame(hand)).is_err() { return; }
            }
        }
    }
}

/// Leap millimetres → normalised screen landmark.
#[cfg(any(feature = "leap", test))]
fn leap_landmark(x: f32, y: f32, z: f32) -> Landmark {
    const X_RANGE_MM: f32 = 400.0;
    const Y_FLOOR_MM: f32 = 80.0;
    const Y_RANGE_MM: f32 = 400.0;
    const Z_SCALE_MM: f32 = 400.0;

    Landmark::new(
        (x + X_RANGE_MM / 2.0) / X_RANGE_MM,
        1.0 - (y - Y_FLOOR_MM) / Y_RANGE_MM,
        z / Z_SCALE_MM,
    )
}

#[cfg(feature = "leap")]
fn leap_hand(hand: &leaprs::Hand) -> HandFrame {
    let norm = leap_landmark;

    let mut points = Vec::with_capacity(LANDMARK_COUNT);
    let palm = hand.palm().position();
    points.push(norm(palm.x, palm.y, palm.z));

    for digit in hand.digits() {
        let joints = [
            digit.proximal().prev_joint(),
            digit.intermediate().prev_joint(),
            digit.distal().prev_joint(),
            digit.distal().next_joint(),
        ];
        for j in joints {
            points.push(norm(j.x, j.y, j.z));
        }
    }

    Hand::from_landmarks(&points)
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource: mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Thumb/index gap of the simulated hand while the button is held.
pub const SIM_PINCHED_GAP: f32 = 0.02;
/// Thumb/index gap of the simulated open hand.
pub const SIM_OPEN_GAP:    f32 = 0.12;

/// Hand source driven by [`SimInput`] events from the visualizer's window.
///
/// The cursor is the pinch point; holding the left button closes the
/// fingers.  The cursor leaving the window reads as a lost hand.
pub struct SimHandSource {
    pub rx: Receiver<SimInput>,
}

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Cursor at normalised `(x, y)`; `pinched` while the button is down.
    Pointer { x: f32, y: f32, pinched: bool },
    PointerLost,
    Clear,
    Quit,
}

impl HandSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<TrackerEvent>) {
        for input in self.rx {
            let event = match input {
                SimInput::Pointer { x, y, pinched } =>
                    TrackerEvent::Frame(Some(sim_hand(x, y, pinched))),
                SimInput::PointerLost => TrackerEvent::Frame(None),
                SimInput::Clear       => TrackerEvent::Clear,
                SimInput::Quit        => {
                    let _ = tx.send(TrackerEvent::Quit);
                    return;
                }
            };
            if tx.send(event).is_err() { return; }
        }
    }
}

/// Synthetic hand whose thumb and index tips straddle `(x, y)`.
///
/// The remaining keypoints form a rough fan below the pinch point so the
/// hand is well-formed; only the two tips matter for placement.
pub fn sim_hand(x: f32, y: f32, pinched: bool) -> Hand {
    let gap = if pinched { SIM_PINCHED_GAP } else { SIM_OPEN_GAP };
    let mut points = [Landmark::new(x, y, 0.0); LANDMARK_COUNT];

    for (n, p) in points.iter_mut().enumerate() {
        let finger = n.saturating_sub(1) / 4;
        let joint  = n.saturating_sub(1) % 4;
        p.x = x + (finger as f32 - 2.0) * 0.03;
        p.y = y + 0.25 - joint as f32 * 0.04;
    }
    points[THUMB_TIP] = Landmark::new(x - gap / 2.0, y, 0.0);
    points[INDEX_TIP] = Landmark::new(x + gap / 2.0, y, 0.0);
    Hand::new(points)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
