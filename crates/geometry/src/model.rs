//! Models: quads paired with the texture slot each one samples.

use blockray_core::TextureId;
use thiserror::Error;

use crate::primitive::Quad;
use crate::transform::{Transform, Transformable};

/// Errors raised while assembling a model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Parallel quad and texture lists disagree in length.
    #[error("model has {quads} quads but {textures} textures")]
    LengthMismatch {
        /// Number of quads supplied.
        quads: usize,
        /// Number of textures supplied.
        textures: usize,
    },
}

/// One textured face of a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Geometry.
    pub quad: Quad,
    /// Texture sampled at the hit UV.
    pub texture: TextureId,
}

impl Face {
    /// Pair a quad with its texture.
    pub const fn new(quad: Quad, texture: TextureId) -> Self {
        Self { quad, texture }
    }

    /// Pair every quad with the same texture.
    pub fn all(quads: impl IntoIterator<Item = Quad>, texture: TextureId) -> Vec<Face> {
        quads.into_iter().map(|quad| Face::new(quad, texture)).collect()
    }
}

impl Transformable for Face {
    fn transformed(&self, transform: &Transform) -> Self {
        Self {
            quad: self.quad.transformed(transform),
            texture: self.texture,
        }
    }
}

/// Ordered list of textured faces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    faces: Vec<Face>,
}

impl Model {
    /// Wrap a face list.
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    /// Zip parallel quad and texture lists.
    pub fn from_parts(quads: Vec<Quad>, textures: Vec<TextureId>) -> Result<Self, ModelError> {
        if quads.len() != textures.len() {
            return Err(ModelError::LengthMismatch {
                quads: quads.len(),
                textures: textures.len(),
            });
        }
        Ok(Self::new(
            quads
                .into_iter()
                .zip(textures)
                .map(|(quad, texture)| Face::new(quad, texture))
                .collect(),
        ))
    }

    /// Faces in authoring order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Quads in authoring order.
    pub fn quads(&self) -> impl Iterator<Item = &Quad> + '_ {
        self.faces.iter().map(|face| &face.quad)
    }

    /// Textures aligned with [`Model::quads`].
    pub fn textures(&self) -> impl Iterator<Item = TextureId> + '_ {
        self.faces.iter().map(|face| face.texture)
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True if the model has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl Transformable for Model {
    fn transformed(&self, transform: &Transform) -> Self {
        Self::new(crate::transform::transform(&self.faces, transform))
    }
}
