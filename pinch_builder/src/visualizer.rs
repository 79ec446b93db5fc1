//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  backdrop (stand-in for the live camera feed)                │
//! │                                                              │
//! │        ▣ placed voxels, shaded, painter-sorted               │
//! │              ⬚ preview cube while pinching                   │
//! │                                                              │
//! │  status bar: count · last event                              │
//! │  key legend                                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;

use anyhow::{anyhow, Result};
use glam::{Vec2, Vec3};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use voxel_lattice::{CameraPose, LatticePosition};

use crate::scene::SceneState;
use crate::tracker::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Style constants
// ════════════════════════════════════════════════════════════════════════════

const STATUS_H:      usize = 36;
const BG_TOP:        u32   = 0xFF1A1A2E;
const BG_BOTTOM:     u32   = 0xFF16213E;
const PREVIEW_COLOR: u32   = 0xFFFFFFFF;
const PULSE_COLOR:   u32   = 0xFFFFD700;  // gold
const EDGE_COLOR:    u32   = 0xFF000000;
const TEXT_BG:       u32   = 0xFF0F3460;

/// Light direction used for face shading (towards the light).
const LIGHT_DIR: Vec3 = Vec3::new(0.35, 0.8, 0.5);

// ════════════════════════════════════════════════════════════════════════════
// Cube geometry
// ════════════════════════════════════════════════════════════════════════════

/// Corner offsets of a unit cube centred on the origin.
const CORNERS: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new( 0.5, -0.5, -0.5),
    Vec3::new( 0.5,  0.5, -0.5),
    Vec3::new(-0.5,  0.5, -0.5),
    Vec3::new(-0.5, -0.5,  0.5),
    Vec3::new( 0.5, -0.5,  0.5),
    Vec3::new( 0.5,  0.5,  0.5),
    Vec3::new(-0.5,  0.5,  0.5),
];

/// Faces as corner indices plus outward normal.
const FACES: [([usize; 4], Vec3); 6] = [
    ([4, 5, 6, 7], Vec3::Z),
    ([1, 0, 3, 2], Vec3::NEG_Z),
    ([5, 1, 2, 6], Vec3::X),
    ([0, 4, 7, 3], Vec3::NEG_X),
    ([7, 6, 2, 3], Vec3::Y),
    ([0, 1, 5, 4], Vec3::NEG_Y),
];

const EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// One camera-facing face, ready to rasterise.
struct FaceDraw {
    depth:  f32,
    points: [Vec2; 4],
    color:  u32,
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
    width:  usize,
    height: usize,
    sim_tx: Sender<SimInput>,
}

impl Visualizer {
    pub fn new(width: usize, height: usize, sim_tx: Sender<SimInput>) -> Result<Self> {
        let mut window = Window::new(
            "Pinch Builder: pinch to place, release to commit",
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| anyhow!("opening window: {}", e))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_TOP; width * height],
            width,
            height,
            sim_tx,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll mouse and keyboard and translate to [`SimInput`] events.
    ///
    /// Sends one pointer event per call, so the simulated tracker runs at the
    /// render rate.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        if self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
        {
            let _ = self.sim_tx.send(SimInput::Quit);
            return false;
        }
        if self.window.is_key_pressed(Key::C, KeyRepeat::No) {
            let _ = self.sim_tx.send(SimInput::Clear);
        }

        let pinched = self.window.get_mouse_down(MouseButton::Left);
        let input = match self.window.get_mouse_pos(MouseMode::Discard) {
            Some((mx, my)) => SimInput::Pointer {
                x: mx / self.width as f32,
                y: my / self.height as f32,
                pinched,
            },
            None => SimInput::PointerLost,
        };
        let _ = self.sim_tx.send(input);

        true
    }

    /// Render one frame.
    pub fn render(
        &mut self,
        scene:     &SceneState,
        camera:    &CameraPose,
        cell_size: f32,
        count:     usize,
        status:    &str,
    ) {
        self.draw_backdrop();

        // ── Placed voxels ─────────────────────────────────────────────────
        let mut faces: Vec<FaceDraw> = scene.cubes.iter()
            .flat_map(|v| self.cube_faces(v.position, v.color, camera, cell_size))
            .collect();
        faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        for f in &faces {
            self.fill_quad(&f.points, f.color, 1.0);
            self.draw_polyline(&f.points, EDGE_COLOR);
        }

        // ── Placement pulses ──────────────────────────────────────────────
        for pulse in &scene.pulses {
            let color = blend(PULSE_COLOR, BG_TOP, pulse.progress);
            let grow  = 1.0 + 0.3 * pulse.progress;
            self.draw_cube_edges(pulse.position, camera, cell_size * grow, cell_size, color);
        }

        // ── Preview ───────────────────────────────────────────────────────
        if scene.preview.visible {
            for f in self.cube_faces(scene.preview.position, PREVIEW_COLOR, camera, cell_size) {
                self.fill_quad(&f.points, PREVIEW_COLOR, 0.25);
            }
            self.draw_cube_edges(scene.preview.position, camera, cell_size, cell_size, PREVIEW_COLOR);
        }

        // ── Status bar ────────────────────────────────────────────────────
        let status_y = self.height.saturating_sub(STATUS_H);
        self.fill_rect(0, status_y, self.width, STATUS_H, TEXT_BG);
        self.draw_label(&format!("cubes: {}   {}", count, status), 10, status_y + 10, 0xFFEEEEEE);

        // ── Key legend ────────────────────────────────────────────────────
        self.draw_label(
            "hold left button=pinch  release=place  c=clear  q/esc=quit",
            10, self.height.saturating_sub(12), 0xFF888888,
        );

        self.window.update_with_buffer(&self.buf, self.width, self.height).ok();
    }

    // ── Projection ────────────────────────────────────────────────────────

    fn to_pixels(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x * self.width as f32, screen.y * self.height as f32)
    }

    /// Camera-facing faces of the cube at `pos`, shaded.  Faces with any
    /// corner behind the camera are dropped.
    fn cube_faces(&self, pos: LatticePosition, color: u32, camera: &CameraPose, cell_size: f32) -> Vec<FaceDraw> {
        let centre = pos.to_world(cell_size);
        let mut out = Vec::with_capacity(3);

        for (idx, normal) in FACES {
            let face_centre = centre + normal * (cell_size * 0.5);
            if normal.dot(face_centre - camera.position) >= 0.0 { continue; }

            let mut points = [Vec2::ZERO; 4];
            let mut depth  = 0.0;
            let mut culled = false;
            for (slot, &c) in points.iter_mut().zip(idx.iter()) {
                match camera.world_to_screen(centre + CORNERS[c] * cell_size) {
                    Some((s, d)) => { *slot = self.to_pixels(s); depth += d; }
                    None => { culled = true; break; }
                }
            }
            if culled { continue; }

            let light = 0.55 + 0.45 * normal.dot(LIGHT_DIR.normalize()).max(0.0);
            out.push(FaceDraw { depth: depth / 4.0, points, color: shade(color, light) });
        }
        out
    }

    fn draw_cube_edges(&mut self, pos: LatticePosition, camera: &CameraPose, size: f32, cell_size: f32, color: u32) {
        let centre = pos.to_world(cell_size);
        let mut projected = [None; 8];
        for (slot, c) in projected.iter_mut().zip(CORNERS.iter()) {
            *slot = camera.world_to_screen(centre + *c * size).map(|(s, _)| self.to_pixels(s));
        }
        for (a, b) in EDGES {
            if let (Some(pa), Some(pb)) = (projected[a], projected[b]) {
                self.draw_line(pa, pb, color);
            }
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn draw_backdrop(&mut self) {
        let h = self.height.max(1);
        for row in 0..self.height {
            let color = blend(BG_TOP, BG_BOTTOM, row as f32 / h as f32);
            self.buf[row * self.width..(row + 1) * self.width].fill(color);
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y+h).min(self.height) {
            for col in x..(x+w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    fn blend_pixel(&mut self, x: isize, y: isize, color: u32, alpha: f32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let i = y as usize * self.width + x as usize;
            self.buf[i] = blend(self.buf[i], color, alpha);
        }
    }

    /// Bresenham line between pixel positions.
    fn draw_line(&mut self, a: Vec2, b: Vec2, color: u32) {
        let px = |v: f32| v.clamp(-1.0e6, 1.0e6).round() as isize;
        let (mut x0, mut y0) = (px(a.x), px(a.y));
        let (x1, y1)         = (px(b.x), px(b.y));
        let dx =  (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        // Bounded so a corner far off-screen cannot stall the frame.
        let max_steps = 4 * (self.width + self.height);
        for _ in 0..max_steps {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x0 += sx; }
            if e2 <= dx { err += dx; y0 += sy; }
        }
    }

    fn draw_polyline(&mut self, points: &[Vec2; 4], color: u32) {
        for i in 0..4 {
            self.draw_line(points[i], points[(i + 1) % 4], color);
        }
    }

    fn fill_quad(&mut self, q: &[Vec2; 4], color: u32, alpha: f32) {
        self.fill_triangle(q[0], q[1], q[2], color, alpha);
        self.fill_triangle(q[0], q[2], q[3], color, alpha);
    }

    /// Edge-function rasteriser, clipped to the window.
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: u32, alpha: f32) {
        let area = edge(a, b, c);
        if area.abs() < f32::EPSILON { return; }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as isize;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as isize;
        let max_x = a.x.max(b.x).max(c.x).ceil().min(self.width as f32 - 1.0) as isize;
        let max_y = a.y.max(b.y).max(c.y).ceil().min(self.height as f32 - 1.0) as isize;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, p) / area;
                let w1 = edge(c, a, p) / area;
                let w2 = edge(a, b, p) / area;
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    if alpha >= 1.0 {
                        self.set_pixel(x, y, color);
                    } else {
                        self.blend_pixel(x, y, color, alpha);
                    }
                }
            }
        }
    }

    /// Minimal bitmap font: 3×5 characters for status rendering.
    /// Each character is encoded as 5 rows × 3 bits.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel((cx + col) as isize, (y + row) as isize, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > self.width { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pure helpers
// ────────────────────────────────────────────────────────────────────────────

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Scale RGB by `light` (0.0–1.0), keep alpha opaque.
fn shade(color: u32, light: f32) -> u32 {
    blend(0xFF000000, color, light)
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0-t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar,br) << 16) | (lerp(ag,bg) << 8) | lerp(ab,bb)
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(0xFF102030, 0xFFA0B0C0, 0.0), 0xFF102030);
        assert_eq!(blend(0xFF102030, 0xFFA0B0C0, 1.0), 0xFFA0B0C0);
    }

    #[test]
    fn shade_darkens() {
        assert_eq!(shade(0xFFFFFFFF, 0.0), 0xFF000000);
        assert_eq!(shade(0xFF808080, 1.0), 0xFF808080);
    }

    #[test]
    fn edge_sign_tracks_side() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!(edge(a, b, Vec2::new(5.0, 5.0)) > 0.0);
        assert!(edge(a, b, Vec2::new(5.0, -5.0)) < 0.0);
    }

    #[test]
    fn each_face_normal_points_away_from_its_corners_centre() {
        for (idx, normal) in FACES {
            let centre = idx.iter().map(|&i| CORNERS[i]).sum::<Vec3>() / 4.0;
            assert!((centre - normal * 0.5).length() < 1e-6);
        }
    }
}
