//! Texture lookup surface used by block models.
//!
//! Models never own texture data. Each face carries a [`TextureId`] and the
//! scene resolves it to something implementing [`Texture`] at hit time.

use std::fmt;
use std::path::Path;

use glam::DVec4;
use image::RgbaImage;
use thiserror::Error;

use crate::color::to_linear;
use crate::EPSILON;

/// Errors raised while building an in-memory texture.
#[derive(Debug, Error)]
pub enum TextureError {
    /// Wrap decoder/IO failures from the image crate.
    #[error("failed to load texture image: {0}")]
    Image(#[from] image::ImageError),
    /// Zero-sized or otherwise unusable image.
    #[error("invalid texture: {0}")]
    Invalid(String),
}

/// Stable name of a texture slot (e.g. `"cauldron_side"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub &'static str);

impl TextureId {
    /// Name of the slot.
    pub fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Read-only texture sampling.
///
/// Implementations are shared between worker threads, so sampling must not
/// mutate anything.
pub trait Texture: Send + Sync {
    /// Linear RGBA at texture coordinates `(u, v)` in `[0, 1]`; `v = 0` is the bottom row.
    fn color(&self, u: f64, v: f64) -> DVec4;

    /// Average linear color over the whole texture.
    fn avg_color_linear(&self) -> DVec4;

    /// Size in texels.
    fn size(&self) -> (u32, u32);

    /// Raw stored texel packed as `0xAARRGGBB`, wrapping out-of-range coordinates.
    fn texel_wrapped(&self, x: i64, y: i64) -> u32;
}

/// A texture with one color everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidTexture {
    linear: DVec4,
    packed: u32,
}

impl SolidTexture {
    /// Build from stored 8-bit RGBA.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self {
            linear: linearize(rgba),
            packed: pack(rgba),
        }
    }
}

impl Texture for SolidTexture {
    fn color(&self, _u: f64, _v: f64) -> DVec4 {
        self.linear
    }

    fn avg_color_linear(&self) -> DVec4 {
        self.linear
    }

    fn size(&self) -> (u32, u32) {
        (1, 1)
    }

    fn texel_wrapped(&self, _x: i64, _y: i64) -> u32 {
        self.packed
    }
}

/// Decoded RGBA image kept in memory with a precomputed linear average.
pub struct ImageTexture {
    image: RgbaImage,
    linear: Vec<DVec4>,
    average: DVec4,
}

impl fmt::Debug for ImageTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageTexture")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("average", &self.average)
            .finish()
    }
}

impl ImageTexture {
    /// Wrap an already decoded image.
    pub fn from_image(image: RgbaImage) -> Result<Self, TextureError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(TextureError::Invalid("texture has zero size".into()));
        }
        let linear: Vec<DVec4> = image.pixels().map(|p| linearize(p.0)).collect();
        let average = linear.iter().copied().sum::<DVec4>() / linear.len() as f64;
        Ok(Self {
            image,
            linear,
            average,
        })
    }

    /// Build a texture by evaluating `texel(x, y)` for every texel.
    pub fn from_fn(
        width: u32,
        height: u32,
        texel: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Result<Self, TextureError> {
        let mut texel = texel;
        Self::from_image(RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba(texel(x, y))
        }))
    }

    /// Load and decode an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let image = image::open(path)?.to_rgba8();
        Self::from_image(image)
    }
}

impl Texture for ImageTexture {
    fn color(&self, u: f64, v: f64) -> DVec4 {
        let (width, height) = (self.image.width(), self.image.height());
        let x = ((u * f64::from(width) - EPSILON) as i64).clamp(0, i64::from(width) - 1);
        let y = (((1.0 - v) * f64::from(height) - EPSILON) as i64).clamp(0, i64::from(height) - 1);
        self.linear[(y as usize) * width as usize + x as usize]
    }

    fn avg_color_linear(&self) -> DVec4 {
        self.average
    }

    fn size(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    fn texel_wrapped(&self, x: i64, y: i64) -> u32 {
        let x = x.rem_euclid(i64::from(self.image.width())) as u32;
        let y = y.rem_euclid(i64::from(self.image.height())) as u32;
        pack(self.image.get_pixel(x, y).0)
    }
}

fn linearize(rgba: [u8; 4]) -> DVec4 {
    DVec4::new(
        to_linear(rgba[0]),
        to_linear(rgba[1]),
        to_linear(rgba[2]),
        f64::from(rgba[3]) / 255.0,
    )
}

fn pack(rgba: [u8; 4]) -> u32 {
    u32::from(rgba[3]) << 24 | u32::from(rgba[0]) << 16 | u32::from(rgba[1]) << 8 | u32::from(rgba[2])
}
