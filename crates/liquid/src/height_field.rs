//! Periodic height field used to perturb water-surface normals.

use std::f64::consts::TAU;
use std::sync::{Arc, OnceLock};

use blockray_core::{Texture, EPSILON};
use glam::DVec3;
use noise::{NoiseFn, Perlin};
use tracing::debug;

/// Tile size, in blocks, of the coarse sample.
const COARSE_TILE: f64 = 16.0;
/// Tile size, in blocks, of the fine sample.
const FINE_TILE: f64 = 2.0;
/// Fixed vertical component of the perturbed normal.
const NORMAL_Y: f32 = 0.15;

/// Finite-difference slopes of a wrapping height texture.
#[derive(Debug, Clone)]
pub struct HeightField {
    width: usize,
    height: usize,
    /// `[dx, dz]` per texel, row-major by `u`.
    slopes: Vec<[f32; 2]>,
}

impl HeightField {
    /// Build from 8-bit heights; `sample(x, y)` must wrap.
    ///
    /// # Panics
    ///
    /// If either dimension is zero.
    pub fn from_heights(width: usize, height: usize, sample: impl Fn(i64, i64) -> u8) -> Self {
        assert!(width > 0 && height > 0, "height field needs texels");
        let h = |x: i64, y: i64| f32::from(sample(x, y)) / 255.0;
        let mut slopes = Vec::with_capacity(width * height);
        for u in 0..width as i64 {
            for v in 0..height as i64 {
                let here = h(u, v);
                slopes.push([h(u + 1, v) - here, h(u, v + 1) - here]);
            }
        }
        Self {
            width,
            height,
            slopes,
        }
    }

    /// Build from the blue channel of a texture.
    pub fn from_texture(texture: &dyn Texture) -> Self {
        let (width, height) = texture.size();
        Self::from_heights(width as usize, height as usize, |x, y| {
            (texture.texel_wrapped(x, y) & 0xFF) as u8
        })
    }

    /// Seamless fractal height field generated from Perlin noise.
    pub fn procedural(seed: u32, size: usize) -> Self {
        let perlin = Perlin::new(seed);
        let n = size as f64;
        // Sampling on a torus in 4D makes the field wrap in both directions.
        let value = |x: i64, y: i64| {
            let (a, b) = (
                TAU * x.rem_euclid(size as i64) as f64 / n,
                TAU * y.rem_euclid(size as i64) as f64 / n,
            );
            let mut sum = 0.0;
            let mut amplitude = 1.0;
            let mut radius = 1.0;
            for _ in 0..3 {
                sum += amplitude
                    * perlin.get([
                        radius * a.cos(),
                        radius * a.sin(),
                        radius * b.cos(),
                        radius * b.sin(),
                    ]);
                amplitude *= 0.5;
                radius *= 2.0;
            }
            (((sum / 1.75) + 1.0) * 0.5 * 255.0).clamp(0.0, 255.0) as u8
        };
        let field = Self::from_heights(size, size, value);
        debug!(seed, size, "generated procedural water height field");
        field
    }

    /// Default field shared by every water surface.
    pub fn shared() -> Arc<HeightField> {
        static FIELD: OnceLock<Arc<HeightField>> = OnceLock::new();
        FIELD
            .get_or_init(|| Arc::new(HeightField::procedural(0, 64)))
            .clone()
    }

    fn slope(&self, point: DVec3, tile: f64) -> [f32; 2] {
        let x = point.x / tile - (point.x / tile).floor();
        let z = point.z / tile - (point.z / tile).floor();
        let u = ((x * self.width as f64 - EPSILON) as usize).min(self.width - 1);
        let v = (((1.0 - z) * self.height as f64 - EPSILON) as usize).min(self.height - 1);
        self.slopes[u * self.height + v]
    }

    /// Perturbed surface normal at world position `point`.
    ///
    /// Combines the coarse slope with half the fine slope over a fixed
    /// vertical component and normalizes. The result always points up.
    pub fn displace(&self, point: DVec3) -> DVec3 {
        let [cx, cz] = self.slope(point, COARSE_TILE);
        let [fx, fz] = self.slope(point, FINE_TILE);
        DVec3::new(
            f64::from(cx) + f64::from(fx / 2.0),
            f64::from(NORMAL_Y),
            f64::from(cz) + f64::from(fz / 2.0),
        )
        .normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockray_core::ImageTexture;

    #[test]
    fn flat_field_gives_straight_up() {
        let field = HeightField::from_heights(4, 4, |_, _| 128);
        let n = field.displace(DVec3::new(3.7, 0.9, -12.2));
        assert!(n.abs_diff_eq(DVec3::Y, 1e-12), "{n}");
    }

    #[test]
    fn ramp_tilts_normal_along_x() {
        // Height rises one step per texel in x (except at the wrap).
        let field = HeightField::from_heights(8, 8, |x, _| (x.rem_euclid(8) * 10) as u8);
        let n = field.displace(DVec3::new(0.1, 0.0, 0.5));
        assert!(n.x > 0.0);
        assert!((n.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn field_is_periodic_in_coarse_tile() {
        let field = HeightField::shared();
        let p = DVec3::new(3.3, 0.5, 7.9);
        let q = p + DVec3::new(16.0, 0.0, -32.0);
        assert!(field.displace(p).abs_diff_eq(field.displace(q), 1e-12));
    }

    #[test]
    fn texture_blue_channel_drives_heights() {
        let tex = ImageTexture::from_fn(2, 2, |x, _| [255, 255, if x == 0 { 0 } else { 255 }, 255])
            .unwrap();
        let field = HeightField::from_texture(&tex);
        assert_eq!(field.slopes[0], [1.0, 0.0]);
        assert_eq!(field.slopes[2], [-1.0, 0.0]);
    }

    #[test]
    fn procedural_field_is_deterministic() {
        let a = HeightField::procedural(7, 16);
        let b = HeightField::procedural(7, 16);
        assert_eq!(a.slopes, b.slopes);
        assert!(a.slopes.iter().all(|s| s[0].is_finite() && s[1].is_finite()));
    }
}
