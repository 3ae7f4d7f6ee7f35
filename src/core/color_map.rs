use image::Rgb;
use rand::Rng;
use serde::{Deserialize, Serialize};

/**
 * Style shared by every frame of a grid, so that neighboring frames are visually
 * comparable. Sampled once per run and then passed unchanged into each render.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub color_bias: f32, // hue offset; on [0,1)
    pub glow: f32,       // brightness exponent; smaller values glow more
}

impl RenderStyle {
    pub const GLOW_RANGE: std::ops::Range<f32> = 0.25..0.75;

    pub fn sample<R: Rng>(rng: &mut R) -> RenderStyle {
        RenderStyle {
            color_bias: rng.gen::<f32>(),
            glow: rng.gen_range(Self::GLOW_RANGE),
        }
    }
}

pub trait ColorMapper {
    fn compute_pixel(&self, query: f32) -> image::Rgb<u8>;
}

/**
 * Maps the normalized escape value onto a hue wheel rotated by the color bias.
 * Brightness rises with the query, shaped by the glow exponent.
 */
pub struct GlowColorMap {
    style: RenderStyle,
    saturation: f32,
}

impl GlowColorMap {
    const DEFAULT_SATURATION: f32 = 0.75;

    pub fn new(style: RenderStyle) -> GlowColorMap {
        GlowColorMap {
            style,
            saturation: Self::DEFAULT_SATURATION,
        }
    }
}

impl ColorMapper for GlowColorMap {
    fn compute_pixel(&self, query: f32) -> image::Rgb<u8> {
        let query = if query.is_nan() {
            0.0
        } else {
            query.clamp(0.0, 1.0)
        };
        let hue = (self.style.color_bias + query).fract();
        let value = query.powf(self.style.glow);
        hsv_to_rgb(hue, self.saturation, value)
    }
}

/// All channels on [0,1]; hue wraps.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb<u8> {
    let h = hue.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * f);
    let t = value * (1.0 - saturation * (1.0 - f));
    let (r, g, b) = match sector as u32 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    let to_u8 = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb([to_u8(r), to_u8(g), to_u8(b)])
}
