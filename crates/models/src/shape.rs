//! Closed set of block shape representations.

use blockray_core::{IntersectionRecord, MaterialTag, Ray, Scene, EPSILON};
use blockray_geometry::{Face, TexturedBox};
use blockray_liquid::{LiquidState, LiquidSurface};

use crate::compositor::ShellModel;

/// How a block is intersected. Every variant borrows shared, prebuilt data.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    /// Textured quads. Texels with alpha below [`EPSILON`] are see-through.
    Quads(&'a [Face]),
    /// Axis-aligned boxes, each with one texture.
    Boxes(&'a [TexturedBox]),
    /// Water or lava in the given state.
    Liquid(&'a LiquidSurface, LiquidState),
    /// Translucent shell over separate content.
    Shell(&'a ShellModel),
}

impl Shape<'_> {
    /// Nearest hit inside the block the ray is entering.
    ///
    /// The returned normal always faces against the ray.
    pub fn intersect(&self, ray: &Ray, scene: &dyn Scene) -> Option<IntersectionRecord> {
        match *self {
            Shape::Quads(faces) => intersect_faces(faces, ray, scene),
            Shape::Boxes(boxes) => intersect_boxes(boxes, ray, scene),
            Shape::Liquid(surface, state) => surface.intersect(ray, state, scene),
            Shape::Shell(shell) => shell.intersect(ray, scene),
        }
    }
}

/// Nearest face whose texel at the hit is not transparent.
pub(crate) fn intersect_faces(
    faces: &[Face],
    ray: &Ray,
    scene: &dyn Scene,
) -> Option<IntersectionRecord> {
    let mut record = IntersectionRecord::new();
    let mut hit = false;
    for face in faces {
        let mut candidate = record;
        if !face.quad.intersect(ray, &mut candidate) {
            continue;
        }
        let color = scene.texture(face.texture).color(candidate.uv.x, candidate.uv.y);
        if color.w > EPSILON {
            record = candidate;
            record.color = color;
            hit = true;
        }
    }
    hit.then(|| finish(record, ray))
}

fn intersect_boxes(
    boxes: &[TexturedBox],
    ray: &Ray,
    scene: &dyn Scene,
) -> Option<IntersectionRecord> {
    let mut record = IntersectionRecord::new();
    let mut hit = false;
    for textured in boxes {
        let mut candidate = record;
        if !textured.bounds.intersect(ray, &mut candidate) {
            continue;
        }
        let color = scene.texture(textured.texture).color(candidate.uv.x, candidate.uv.y);
        if color.w > EPSILON {
            record = candidate;
            record.color = color;
            hit = true;
        }
    }
    hit.then(|| finish(record, ray))
}

fn finish(mut record: IntersectionRecord, ray: &Ray) -> IntersectionRecord {
    record.material = MaterialTag::SOLID;
    record.orient_normal(ray.direction);
    record
}
