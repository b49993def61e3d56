#![warn(missing_docs)]
//! Block-local geometry: intersectable primitives, the rigid-transform
//! algebra used to derive oriented variants, texture-paired models and the
//! build-once variant tables keyed by block state.

mod aabb;
mod digest;
mod model;
mod primitive;
mod transform;
mod traverse;
mod variant;

pub use aabb::{Aabb, TexturedBox};
pub use digest::{TableDigest, TableHasher};
pub use model::{Face, Model, ModelError};
pub use primitive::{Quad, Triangle, UvRect};
pub use transform::{
    join, rotate, rotate_about, rotate_y_nesw, transform, translate, Axis, Transform,
    Transformable, Turn,
};
pub use traverse::traverse;
pub use variant::{StateKey, VariantTable};

/// Block-local coordinate of `sixteenths / 16`.
///
/// Shapes are authored on the 16-texel grid of a block face.
pub const fn px(sixteenths: f64) -> f64 {
    sixteenths / 16.0
}
