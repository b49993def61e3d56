//! Rays and the mutable hit record written by primitive tests.

use glam::{DVec2, DVec3, DVec4};

use crate::OFFSET;

/// A ray in world space.
///
/// Primitives are authored in block-local unit-cube space; [`Ray::local_origin`]
/// maps the origin into the cell the ray is about to enter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// World-space origin.
    pub origin: DVec3,
    /// Direction (expected to be normalized).
    pub direction: DVec3,
}

impl Ray {
    /// Create a ray, normalizing the direction.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Origin relative to the minimum corner of the cell the ray is entering.
    pub fn local_origin(&self) -> DVec3 {
        self.origin - (self.origin + self.direction * OFFSET).floor()
    }

    /// World-space point at `distance` along the ray.
    pub fn at(&self, distance: f64) -> DVec3 {
        self.origin + self.direction * distance
    }

    /// Copy of this ray advanced to `distance`.
    pub fn advanced(&self, distance: f64) -> Self {
        Self {
            origin: self.at(distance),
            direction: self.direction,
        }
    }
}

/// Material tag attached to a hit so the integrator can pick a BRDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialTag(pub &'static str);

impl MaterialTag {
    /// Empty space (leaving a liquid volume, for example).
    pub const AIR: Self = Self("air");
    /// Water surface.
    pub const WATER: Self = Self("water");
    /// Lava surface.
    pub const LAVA: Self = Self("lava");
    /// Any other block surface.
    pub const SOLID: Self = Self("solid");
}

/// Result of the nearest accepted primitive test along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionRecord {
    /// Distance from the ray origin. `f64::INFINITY` until something is hit.
    pub distance: f64,
    /// Texture coordinates at the hit.
    pub uv: DVec2,
    /// Geometric normal.
    pub normal: DVec3,
    /// Shading normal (may be perturbed, e.g. water waves).
    pub shade_normal: DVec3,
    /// Linear RGBA color.
    pub color: DVec4,
    /// Material at the hit.
    pub material: MaterialTag,
}

impl Default for IntersectionRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionRecord {
    /// A record with no hit yet.
    pub fn new() -> Self {
        Self {
            distance: f64::INFINITY,
            uv: DVec2::ZERO,
            normal: DVec3::Y,
            shade_normal: DVec3::Y,
            color: DVec4::ZERO,
            material: MaterialTag::SOLID,
        }
    }

    /// True once a primitive has written a finite distance.
    pub fn is_hit(&self) -> bool {
        self.distance.is_finite()
    }

    /// Set both the geometric and the shading normal.
    pub fn set_normal(&mut self, normal: DVec3) {
        self.normal = normal;
        self.shade_normal = normal;
    }

    /// Flip both normals so they face against `direction`.
    pub fn orient_normal(&mut self, direction: DVec3) {
        if direction.dot(self.normal) > 0.0 {
            self.normal = -self.normal;
            self.shade_normal = -self.shade_normal;
        }
    }
}
