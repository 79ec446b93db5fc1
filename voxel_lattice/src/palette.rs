//! Voxel colors.
//!
//! Successive placements step around a hue wheel by the golden angle so
//! neighbouring cubes placed one after another stay distinguishable.

/// Hue step between consecutive placements (degrees).
const GOLDEN_ANGLE: f32 = 137.507_77;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub start_hue:  f32,
    pub saturation: f32,
    pub value:      f32,
}

impl Default for Palette {
    fn default() -> Self {
        Palette { start_hue: 200.0, saturation: 0.72, value: 0.95 }
    }
}

impl Palette {
    /// Packed `0xAARRGGBB` color for the `sequence`-th placement.
    pub fn color(&self, sequence: u64) -> u32 {
        let hue = (self.start_hue + (sequence % 360) as f32 * GOLDEN_ANGLE).rem_euclid(360.0);
        hsv_to_argb(hue, self.saturation, self.value)
    }
}

/// Convert HSV → packed ARGB (0xAARRGGBB, A=0xFF).
pub fn hsv_to_argb(h: f32, s: f32, v: f32) -> u32 {
    let h  = h.rem_euclid(360.0);
    let hi = (h / 60.0) as u32;
    let f  = h / 60.0 - hi as f32;
    let p  = v * (1.0 - s);
    let q  = v * (1.0 - s * f);
    let t  = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match hi {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u32;
    0xFF000000 | (channel(r) << 16) | (channel(g) << 8) | channel(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_opaque() {
        let pal = Palette::default();
        for n in 0..50 {
            assert_eq!(pal.color(n) >> 24, 0xFF, "placement {} should be opaque", n);
        }
    }

    #[test]
    fn consecutive_colors_differ() {
        let pal = Palette::default();
        for n in 0..20 {
            assert_ne!(pal.color(n), pal.color(n + 1));
        }
    }

    #[test]
    fn primary_hues() {
        assert_eq!(hsv_to_argb(0.0,   1.0, 1.0), 0xFFFF0000);
        assert_eq!(hsv_to_argb(120.0, 1.0, 1.0), 0xFF00FF00);
        assert_eq!(hsv_to_argb(240.0, 1.0, 1.0), 0xFF0000FF);
    }
}
