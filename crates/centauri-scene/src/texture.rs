//! Procedural star sprite: a bright tinted core, a soft halo and a sprinkle of
//! seeded sparkle, baked into an RGBA8 texture.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::TextureError;

/// Largest sprite edge any renderer is asked to accept.
pub const MAX_TEXTURE_SIZE: u32 = 4096;

const CORE_FALLOFF: f32 = 24.0;
const HALO_FALLOFF: f32 = 4.0;
const HALO_STRENGTH: f32 = 0.35;
/// Radius (in sprite half-widths) where the edge fade begins.
const FADE_START: f32 = 0.85;

/// Square RGBA8 star sprite, row-major, `size * size * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarTexture {
    size: u32,
    pixels: Vec<u8>,
}

impl StarTexture {
    /// Generate a sprite. Deterministic for a given `(size, seed, temperature_k)`.
    ///
    /// The alpha channel reaches zero before the sprite edge so billboards
    /// never show a square outline.
    pub fn generate(size: u32, seed: u64, temperature_k: f32) -> Result<Self, TextureError> {
        if size == 0 {
            return Err(TextureError::ZeroSize);
        }
        if size > MAX_TEXTURE_SIZE {
            return Err(TextureError::TooLarge {
                size,
                max: MAX_TEXTURE_SIZE,
            });
        }

        let n = size as usize;
        let half = size as f32 * 0.5;
        let sparkle = sparkle_layer(size, seed);
        let tint = blackbody_to_rgb(temperature_k);
        let mut pixels = Vec::with_capacity(n * n * 4);

        for y in 0..n {
            for x in 0..n {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let r2 = dx * dx + dy * dy;

                let core = (-r2 * CORE_FALLOFF).exp();
                let halo = HALO_STRENGTH * (-r2 * HALO_FALLOFF).exp();
                let fade = 1.0 - smoothstep(FADE_START, 1.0, r2.sqrt());
                let intensity = ((core + halo + sparkle[y * n + x]) * fade).clamp(0.0, 1.0);

                // White-hot centre, blackbody tint toward the rim.
                let whiteness = core.min(1.0);
                for channel in tint {
                    let c = channel + (1.0 - channel) * whiteness;
                    pixels.push(to_byte(c * intensity));
                }
                pixels.push(to_byte(intensity));
            }
        }

        tracing::debug!(size, seed, temperature_k, "generated star sprite");
        Ok(Self { size, pixels })
    }

    /// Width and height in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Raw RGBA8 bytes, row-major.
    #[must_use]
    pub fn as_rgba8(&self) -> &[u8] {
        &self.pixels
    }

    /// One pixel, or `None` outside the sprite.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let i = (y as usize * self.size as usize + x as usize) * 4;
        let p = &self.pixels[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }
}

/// Seeded point sparkles scattered through the halo ring.
fn sparkle_layer(size: u32, seed: u64) -> Vec<f32> {
    let n = size as usize;
    let half = size as f32 * 0.5;
    let mut layer = vec![0.0; n * n];
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for _ in 0..(size / 4).max(1) {
        let theta = rng.random::<f32>() * std::f32::consts::TAU;
        let radius = 0.2 + rng.random::<f32>() * 0.55;
        // Mostly faint, a few bright.
        let strength = 0.05 + rng.random::<f32>().powi(3) * 0.25;

        let px = (half + theta.cos() * radius * half).clamp(0.0, size as f32 - 1.0) as usize;
        let py = (half + theta.sin() * radius * half).clamp(0.0, size as f32 - 1.0) as usize;
        layer[py * n + px] += strength;
    }
    layer
}

/// Approximate sRGB colour of a blackbody at `temperature_k` kelvin, each channel in `[0, 1]`.
///
/// Piecewise fit of the Planckian locus (Tanner Helland), valid roughly
/// between 1000 K and 40000 K.
#[must_use]
pub fn blackbody_to_rgb(temperature_k: f32) -> [f32; 3] {
    let t = temperature_k.max(1.0) / 100.0;

    let red = if t <= 66.0 {
        255.0
    } else {
        329.698_73 * (t - 60.0).powf(-0.133_204_76)
    };
    let green = if t <= 66.0 {
        99.470_8 * t.ln() - 161.119_57
    } else {
        288.122_17 * (t - 60.0).powf(-0.075_514_85)
    };
    let blue = if t >= 66.0 {
        255.0
    } else if t <= 19.0 {
        0.0
    } else {
        138.517_73 * (t - 10.0).ln() - 305.044_8
    };

    [red, green, blue].map(|c| c.clamp(0.0, 255.0) / 255.0)
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
