//! Axis-aligned boxes in block-local space.

use blockray_core::{IntersectionRecord, Ray, TextureId, EPSILON};
use glam::{DVec2, DVec3};

use crate::model::Face;
use crate::primitive::{Quad, UvRect};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Aabb {
    /// The whole block.
    pub const UNIT: Self = Self {
        min: DVec3::ZERO,
        max: DVec3::ONE,
    };

    /// Create a new box ensuring min <= max per axis.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        debug_assert!(min.cmple(max).all(), "inverted box {min} .. {max}");
        Self { min, max }
    }

    /// Slab test against the box.
    ///
    /// From outside, reports the entry face with its outward normal. From
    /// inside, reports the exit face; its normal then points along the ray.
    /// Writes distance, normal and a per-face UV when the hit is closer than
    /// `record.distance`.
    pub fn intersect(&self, ray: &Ray, record: &mut IntersectionRecord) -> bool {
        let origin = ray.local_origin();
        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;
        let mut axis_near = 0;
        let mut axis_far = 0;

        for axis in 0..3 {
            let o = origin[axis];
            let d = ray.direction[axis];
            if d == 0.0 {
                if o < self.min[axis] || o > self.max[axis] {
                    return false;
                }
                continue;
            }
            let mut t1 = (self.min[axis] - o) / d;
            let mut t2 = (self.max[axis] - o) / d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            if t1 > t_near {
                t_near = t1;
                axis_near = axis;
            }
            if t2 < t_far {
                t_far = t2;
                axis_far = axis;
            }
        }

        if t_near > t_far + EPSILON || t_far <= -EPSILON {
            return false;
        }
        let (t, axis, sign) = if t_near > -EPSILON {
            (t_near, axis_near, -1.0)
        } else {
            (t_far, axis_far, 1.0)
        };
        if t >= record.distance {
            return false;
        }

        let mut normal = DVec3::ZERO;
        normal[axis] = sign * ray.direction[axis].signum();
        let hit = origin + ray.direction * t;
        let rel = (hit - self.min) / (self.max - self.min);
        let uv = match axis {
            0 => DVec2::new(if normal.x > 0.0 { 1.0 - rel.z } else { rel.z }, rel.y),
            1 => DVec2::new(rel.x, 1.0 - rel.z),
            _ => DVec2::new(if normal.z > 0.0 { rel.x } else { 1.0 - rel.x }, rel.y),
        };

        record.distance = t;
        record.uv = uv;
        record.set_normal(normal);
        true
    }

    /// The six outward-facing quads of this box in W, E, D, U, N, S order.
    pub fn quads(&self) -> [Quad; 6] {
        let (x0, y0, z0) = (self.min.x, self.min.y, self.min.z);
        let (x1, y1, z1) = (self.max.x, self.max.y, self.max.z);
        let v = DVec3::new;
        [
            Quad::new(v(x0, y1, z1), v(x0, y1, z0), v(x0, y0, z1), UvRect::new(z1, z0, y1, y0)),
            Quad::new(v(x1, y1, z0), v(x1, y1, z1), v(x1, y0, z0), UvRect::new(z0, z1, y1, y0)),
            Quad::new(v(x0, y0, z0), v(x1, y0, z0), v(x0, y0, z1), UvRect::new(x0, x1, z1, z0)),
            Quad::new(v(x0, y1, z1), v(x1, y1, z1), v(x0, y1, z0), UvRect::new(x0, x1, 1.0 - z1, 1.0 - z0)),
            Quad::new(v(x0, y1, z0), v(x1, y1, z0), v(x0, y0, z0), UvRect::new(1.0 - x0, 1.0 - x1, y1, y0)),
            Quad::new(v(x1, y1, z1), v(x0, y1, z1), v(x1, y0, z1), UvRect::new(x1, x0, y1, y0)),
        ]
    }

    /// Quads of this box paired with per-side textures, W, E, D, U, N, S.
    pub fn faces(&self, textures: [TextureId; 6]) -> Vec<Face> {
        self.quads()
            .into_iter()
            .zip(textures)
            .map(|(quad, texture)| Face::new(quad, texture))
            .collect()
    }
}

/// Box with a single texture on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturedBox {
    /// Extent of the box.
    pub bounds: Aabb,
    /// Texture sampled with the per-face UV.
    pub texture: TextureId,
}

impl TexturedBox {
    /// Create a textured box.
    pub const fn new(bounds: Aabb, texture: TextureId) -> Self {
        Self { bounds, texture }
    }
}
