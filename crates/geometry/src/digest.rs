//! Stable content hashes of built tables, logged at startup and compared in
//! tests to catch accidental geometry changes.

use std::fmt;

use blake3::Hasher;
use glam::DVec3;

use crate::model::{Face, Model};
use crate::primitive::{Quad, Triangle, UvRect};

/// Hash of a table's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableDigest(pub [u8; 32]);

impl fmt::Display for TableDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Incremental hasher over primitives; coordinates are hashed bit-exactly.
#[derive(Default)]
pub struct TableHasher {
    hasher: Hasher,
}

impl TableHasher {
    /// Empty hasher.
    pub fn new() -> Self {
        Self::default()
    }

    fn vec3(&mut self, v: DVec3) {
        for c in v.to_array() {
            self.hasher.update(&c.to_bits().to_le_bytes());
        }
    }

    fn uv(&mut self, uv: UvRect) {
        for c in [uv.u0, uv.u1, uv.v0, uv.v1] {
            self.hasher.update(&c.to_bits().to_le_bytes());
        }
    }

    /// Feed one quad.
    pub fn quad(&mut self, quad: &Quad) -> &mut Self {
        for corner in quad.corners() {
            self.vec3(corner);
        }
        self.vec3(quad.normal());
        self.uv(quad.uv());
        self.hasher.update(&[u8::from(quad.is_double_sided())]);
        self
    }

    /// Feed one triangle.
    pub fn triangle(&mut self, triangle: &Triangle) -> &mut Self {
        for vertex in triangle.vertices() {
            self.vec3(vertex);
        }
        self.vec3(triangle.normal());
        self.uv(triangle.uv());
        self
    }

    /// Feed one textured face.
    pub fn face(&mut self, face: &Face) -> &mut Self {
        self.quad(&face.quad);
        self.hasher.update(face.texture.name().as_bytes());
        self
    }

    /// Feed every face of a model, then a separator.
    pub fn model(&mut self, model: &Model) -> &mut Self {
        for face in model.faces() {
            self.face(face);
        }
        self.hasher.update(&(model.len() as u64).to_le_bytes());
        self
    }

    /// Final digest.
    pub fn finish(&self) -> TableDigest {
        TableDigest(*self.hasher.finalize().as_bytes())
    }
}
