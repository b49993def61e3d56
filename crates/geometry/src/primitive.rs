//! Quads and triangles in block-local unit-cube space.
//!
//! Both primitives test against [`Ray::local_origin`], so a ray positioned
//! anywhere in the world hits the copy of the primitive inside the cell it
//! is entering.

use blockray_core::{IntersectionRecord, Ray, EPSILON};
use glam::{DVec2, DVec3};

use crate::transform::{Transform, Transformable};

/// Texture-coordinate rectangle `(u0, u1, v0, v1)`.
///
/// A hit at parametric `(s, t)` on a primitive maps to
/// `(u0 + s * (u1 - u0), v0 + t * (v1 - v0))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    /// U at `s = 0`.
    pub u0: f64,
    /// U at `s = 1`.
    pub u1: f64,
    /// V at `t = 0`.
    pub v0: f64,
    /// V at `t = 1`.
    pub v1: f64,
}

impl UvRect {
    /// The whole texture, unmirrored.
    pub const FULL: Self = Self::new(0.0, 1.0, 0.0, 1.0);

    /// Create a rectangle.
    pub const fn new(u0: f64, u1: f64, v0: f64, v1: f64) -> Self {
        Self { u0, u1, v0, v1 }
    }

    /// Map parametric coordinates into this rectangle.
    pub fn map(&self, s: f64, t: f64) -> DVec2 {
        DVec2::new(
            self.u0 + s * (self.u1 - self.u0),
            self.v0 + t * (self.v1 - self.v0),
        )
    }
}

impl Default for UvRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// Planar parallelogram spanned from `p0` by the edges to `p1` and `p2`.
///
/// The fourth corner is `p1 + p2 - p0`. The normal is
/// `normalize((p1 - p0) x (p2 - p0))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    origin: DVec3,
    xv: DVec3,
    yv: DVec3,
    xv_inv_len2: f64,
    yv_inv_len2: f64,
    normal: DVec3,
    d: f64,
    uv: UvRect,
    double_sided: bool,
}

impl Quad {
    /// Single-sided quad: only rays travelling against the normal hit it.
    pub fn new(p0: DVec3, p1: DVec3, p2: DVec3, uv: UvRect) -> Self {
        let xv = p1 - p0;
        let yv = p2 - p0;
        Self::from_edges(p0, xv, yv, xv.cross(yv).normalize(), uv, false)
    }

    /// Quad hit from either side. The stored normal still follows the
    /// corner winding; callers orient it against the ray.
    pub fn double_sided(p0: DVec3, p1: DVec3, p2: DVec3, uv: UvRect) -> Self {
        Self {
            double_sided: true,
            ..Self::new(p0, p1, p2, uv)
        }
    }

    fn from_edges(
        origin: DVec3,
        xv: DVec3,
        yv: DVec3,
        normal: DVec3,
        uv: UvRect,
        double_sided: bool,
    ) -> Self {
        debug_assert!(normal.is_finite(), "degenerate quad at {origin}");
        Self {
            origin,
            xv,
            yv,
            xv_inv_len2: 1.0 / xv.length_squared(),
            yv_inv_len2: 1.0 / yv.length_squared(),
            normal,
            d: -normal.dot(origin),
            uv,
            double_sided,
        }
    }

    /// Corners in winding order: `p0`, `p1`, `p1 + p2 - p0`, `p2`.
    pub fn corners(&self) -> [DVec3; 4] {
        [
            self.origin,
            self.origin + self.xv,
            self.origin + self.xv + self.yv,
            self.origin + self.yv,
        ]
    }

    /// Unit normal.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Texture rectangle.
    pub fn uv(&self) -> UvRect {
        self.uv
    }

    /// Whether back-facing rays are accepted.
    pub fn is_double_sided(&self) -> bool {
        self.double_sided
    }

    /// Same quad accepting rays from both sides.
    pub fn into_double_sided(self) -> Self {
        Self {
            double_sided: true,
            ..self
        }
    }

    /// Test `ray` against this quad.
    ///
    /// On a hit closer than `record.distance` this writes distance, UV and
    /// normal and returns true. The record is untouched on a miss.
    pub fn intersect(&self, ray: &Ray, record: &mut IntersectionRecord) -> bool {
        let origin = ray.local_origin();
        let denom = ray.direction.dot(self.normal);
        let facing = if self.double_sided {
            denom.abs() > EPSILON
        } else {
            denom < -EPSILON
        };
        if !facing {
            return false;
        }
        let t = -(origin.dot(self.normal) + self.d) / denom;
        if t <= -EPSILON || t >= record.distance {
            return false;
        }
        let p = origin + ray.direction * t - self.origin;
        let s = p.dot(self.xv) * self.xv_inv_len2;
        let r = p.dot(self.yv) * self.yv_inv_len2;
        if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&r) {
            return false;
        }
        record.distance = t;
        record.uv = self.uv.map(s, r);
        record.set_normal(self.normal);
        true
    }
}

impl Transformable for Quad {
    fn transformed(&self, transform: &Transform) -> Self {
        Self::from_edges(
            transform.point(self.origin),
            transform.vector(self.xv),
            transform.vector(self.yv),
            transform.vector(self.normal),
            self.uv,
            self.double_sided,
        )
    }
}

/// Double-sided triangle `(c0, c1, c2)` with normal
/// `normalize((c1 - c0) x (c2 - c0))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    origin: DVec3,
    e1: DVec3,
    e2: DVec3,
    normal: DVec3,
    uv: UvRect,
}

impl Triangle {
    /// Triangle mapping its barycentrics onto the full texture.
    pub fn new(c0: DVec3, c1: DVec3, c2: DVec3) -> Self {
        Self::with_uv(c0, c1, c2, UvRect::FULL)
    }

    /// Triangle with an explicit UV rectangle; use a mirrored rect to flip
    /// the texture on the second half of a split quad.
    pub fn with_uv(c0: DVec3, c1: DVec3, c2: DVec3, uv: UvRect) -> Self {
        let e1 = c1 - c0;
        let e2 = c2 - c0;
        let normal = e1.cross(e2).normalize();
        debug_assert!(normal.is_finite(), "degenerate triangle at {c0}");
        Self {
            origin: c0,
            e1,
            e2,
            normal,
            uv,
        }
    }

    /// Corners in authoring order.
    pub fn vertices(&self) -> [DVec3; 3] {
        [self.origin, self.origin + self.e1, self.origin + self.e2]
    }

    /// Unit normal following the corner winding.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Texture rectangle.
    pub fn uv(&self) -> UvRect {
        self.uv
    }

    /// Test `ray` against this triangle from either side.
    ///
    /// Accepts distances above `-EPSILON` and closer than `record.distance`,
    /// so a face lying on the ray origin still counts. Writes distance, UV
    /// and the unoriented normal on a hit.
    pub fn intersect(&self, ray: &Ray, record: &mut IntersectionRecord) -> bool {
        let pvec = ray.direction.cross(self.e2);
        let det = self.e1.dot(pvec);
        if det.abs() < EPSILON {
            return false;
        }
        let inv_det = 1.0 / det;
        let tvec = ray.local_origin() - self.origin;
        let s = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&s) {
            return false;
        }
        let qvec = tvec.cross(self.e1);
        let r = ray.direction.dot(qvec) * inv_det;
        if r < 0.0 || s + r > 1.0 {
            return false;
        }
        let t = self.e2.dot(qvec) * inv_det;
        if t <= -EPSILON || t >= record.distance {
            return false;
        }
        record.distance = t;
        record.uv = self.uv.map(s, r);
        record.set_normal(self.normal);
        true
    }
}

impl Transformable for Triangle {
    fn transformed(&self, transform: &Transform) -> Self {
        Self {
            origin: transform.point(self.origin),
            e1: transform.vector(self.e1),
            e2: transform.vector(self.e2),
            normal: transform.vector(self.normal),
            uv: self.uv,
        }
    }
}
