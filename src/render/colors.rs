use compact_str::{format_compact, CompactString};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::circles::arena::CircleStore;

/// Golden ratio conjugate: stepping the hue by this spreads colors evenly.
const GOLDEN_RATIO_CONJUGATE: f64 = 0.618033988749895;

/// Saturation/value used for generated fills.
#[derive(Debug, Clone, Copy)]
pub struct ColorSettings {
    pub saturation: f64,
    pub value: f64,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            saturation: 0.5,
            value: 0.95,
        }
    }
}

/// RGB color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl AppColor {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgb(RRR,GGG,BBB)` with zero-padded 0–255 channels.
    pub fn to_css(self) -> CompactString {
        format_compact!(
            "rgb({:03},{:03},{:03})",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

fn channel(c: f64) -> u8 {
    (c * 256.0).floor().clamp(0.0, 255.0) as u8
}

/// h, s, v in [0, 1).
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> AppColor {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f64;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    AppColor { r, g, b }
}

/// Endless sequence of well separated fills.
#[derive(Debug, Clone)]
pub struct ColorGenerator {
    hue: f64,
    settings: ColorSettings,
}

impl ColorGenerator {
    pub fn new(start_hue: f64, settings: ColorSettings) -> Self {
        Self {
            hue: start_hue.rem_euclid(1.0),
            settings,
        }
    }

    /// Random starting hue, or a reproducible one when `seed` is given.
    pub fn from_seed(seed: Option<u64>, settings: ColorSettings) -> Self {
        let hue = match seed {
            Some(seed) => StdRng::seed_from_u64(seed).gen::<f64>(),
            None => rand::thread_rng().gen::<f64>(),
        };
        Self::new(hue, settings)
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn next_color(&mut self) -> AppColor {
        let color = hsv_to_rgb(self.hue, self.settings.saturation, self.settings.value);
        self.hue = (self.hue + GOLDEN_RATIO_CONJUGATE) % 1.0;
        color
    }
}

/// Give every circle without a fill a generated one. Returns how many were filled.
pub fn fill_missing_colors(store: &mut CircleStore, generator: &mut ColorGenerator) -> usize {
    let start_hue = generator.hue();
    let mut filled = 0;
    for circle in store.circles.iter_mut().filter(|c| c.color.is_none()) {
        circle.color = Some(generator.next_color().to_css());
        filled += 1;
    }
    tracing::debug!(
        "Generated {} fill colors starting at hue {:.3}",
        filled,
        start_hue
    );
    filled
}
