#![warn(missing_docs)]
//! Collaborator types shared by every block model: rays, hit records,
//! colors, textures and the scene interface consumed during intersection.

pub mod color;
pub mod facing;
pub mod ray;
pub mod scene;
pub mod texture;

pub use color::{overlay, to_linear, to_srgb};
pub use facing::Facing;
pub use ray::{IntersectionRecord, MaterialTag, Ray};
pub use scene::{Scene, WaterShader};
pub use texture::{ImageTexture, SolidTexture, Texture, TextureError, TextureId};

/// Distance tolerance used by every primitive test.
pub const EPSILON: f64 = 0.000005;

/// Nudge along the ray direction used when locating the current block cell.
pub const OFFSET: f64 = 0.0001;
