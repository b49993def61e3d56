//! Liquid surface intersection.

use std::sync::Arc;

use blockray_core::{Facing, IntersectionRecord, MaterialTag, Ray, Scene, TextureId};
use blockray_geometry::Aabb;
use glam::{DVec2, DVec3};

use crate::height_field::HeightField;
use crate::state::{CornerHeights, LiquidState};
use crate::tables::tables;

/// Which liquid a surface renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiquidKind {
    /// Translucent, flat-colored, wave-shaded.
    Water,
    /// Opaque and textured; no floor quad and no wave shading.
    Lava,
}

impl LiquidKind {
    fn material(self) -> MaterialTag {
        match self {
            LiquidKind::Water => MaterialTag::WATER,
            LiquidKind::Lava => MaterialTag::LAVA,
        }
    }
}

/// Part of the tessellated block that won the nearest-hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Bottom,
    Top,
    Side(Facing),
    Full,
}

/// Intersection engine for one liquid kind.
#[derive(Debug, Clone)]
pub struct LiquidSurface {
    kind: LiquidKind,
    texture: TextureId,
    height_field: Arc<HeightField>,
}

impl LiquidSurface {
    /// Water sampling `texture` for its average color.
    pub fn water(texture: TextureId) -> Self {
        Self {
            kind: LiquidKind::Water,
            texture,
            height_field: HeightField::shared(),
        }
    }

    /// Lava sampling `texture` at the hit.
    pub fn lava(texture: TextureId) -> Self {
        Self {
            kind: LiquidKind::Lava,
            ..Self::water(texture)
        }
    }

    /// Liquid kind.
    pub fn kind(&self) -> LiquidKind {
        self.kind
    }

    /// Texture slot.
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Nearest hit against the block described by `state`.
    ///
    /// The returned normals face against the ray. Water top hits are
    /// wave-shaded unless the scene's shader is in still mode.
    pub fn intersect(
        &self,
        ray: &Ray,
        state: LiquidState,
        scene: &dyn Scene,
    ) -> Option<IntersectionRecord> {
        let mut record = IntersectionRecord::new();
        let part = if state.full_block {
            self.nearest_full(ray, &mut record)?
        } else {
            self.nearest_tessellated(ray, state.corners, &mut record)?
        };
        Some(self.finish(ray, record, part, scene))
    }

    /// Nearest hit against the top surface only, with no wave shading.
    pub fn intersect_top(
        &self,
        ray: &Ray,
        corners: CornerHeights,
        scene: &dyn Scene,
    ) -> Option<IntersectionRecord> {
        let mut record = IntersectionRecord::new();
        let mut hit = false;
        for triangle in tables().top(corners) {
            hit |= triangle.intersect(ray, &mut record);
        }
        if !hit {
            return None;
        }
        record.orient_normal(ray.direction);
        self.apply_color(ray, &mut record, Part::Top, scene);
        Some(record)
    }

    /// True when the nearest liquid face is seen from behind, i.e. the
    /// ray starts inside the liquid.
    pub fn is_inside(&self, ray: &Ray, state: LiquidState) -> bool {
        let mut record = IntersectionRecord::new();
        let hit = if state.full_block {
            self.nearest_full(ray, &mut record).is_some()
        } else {
            self.nearest_tessellated(ray, state.corners, &mut record).is_some()
        };
        hit && ray.direction.dot(record.normal) > 0.0
    }

    fn nearest_full(&self, ray: &Ray, record: &mut IntersectionRecord) -> Option<Part> {
        let hit = match self.kind {
            LiquidKind::Water => tables()
                .full_block()
                .iter()
                .fold(false, |hit, quad| quad.intersect(ray, record) | hit),
            LiquidKind::Lava => Aabb::UNIT.intersect(ray, record),
        };
        hit.then_some(Part::Full)
    }

    /// Runs every test with no early exit; later tests only win when strictly closer.
    fn nearest_tessellated(
        &self,
        ray: &Ray,
        corners: CornerHeights,
        record: &mut IntersectionRecord,
    ) -> Option<Part> {
        let t = tables();
        let mut part = None;
        if self.kind == LiquidKind::Water && t.bottom().intersect(ray, record) {
            part = Some(Part::Bottom);
        }
        for triangle in t.top(corners) {
            if triangle.intersect(ray, record) {
                part = Some(Part::Top);
            }
        }
        for skirt in t.skirts(corners) {
            if skirt.upper.intersect(ray, record) {
                part = Some(Part::Side(skirt.side));
            }
            if skirt.lower.intersect(ray, record) {
                part = Some(Part::Side(skirt.side));
            }
        }
        part
    }

    fn finish(
        &self,
        ray: &Ray,
        mut record: IntersectionRecord,
        part: Part,
        scene: &dyn Scene,
    ) -> IntersectionRecord {
        let from_below = ray.direction.dot(record.normal) > 0.0;
        record.orient_normal(ray.direction);
        self.apply_color(ray, &mut record, part, scene);

        if part == Part::Top && self.kind == LiquidKind::Water {
            if from_below {
                // Leaving the water through its surface.
                record.material = MaterialTag::AIR;
            }
            let shader = scene.water_shader();
            if !shader.is_still() {
                let point = ray.at(record.distance);
                let mut perturbed = self.height_field.displace(point);
                if record.normal.y < 0.0 {
                    perturbed.y = -perturbed.y;
                }
                let blended = (record.normal + perturbed).normalize();
                let shaded = shader.shade(point, blended, scene.animation_time());
                record.shade_normal = face_against(shaded, ray.direction, record.normal);
            }
        }
        record
    }

    fn apply_color(&self, ray: &Ray, record: &mut IntersectionRecord, part: Part, scene: &dyn Scene) {
        let texture = scene.texture(self.texture);
        record.material = self.kind.material();
        record.color = match self.kind {
            LiquidKind::Water => texture.avg_color_linear(),
            LiquidKind::Lava => {
                if let Part::Side(side) = part {
                    record.uv = side_uv(side, ray.at(record.distance));
                }
                let mut color = texture.color(record.uv.x, record.uv.y);
                color.w = 1.0;
                color
            }
        };
    }
}

/// World-projected texture coordinates on a side face.
fn side_uv(side: Facing, point: DVec3) -> DVec2 {
    let fract = point - point.floor();
    match side {
        Facing::West | Facing::East => DVec2::new(fract.z, fract.y),
        Facing::South => DVec2::new(fract.x, fract.y),
        Facing::North => DVec2::new(1.0 - fract.x, fract.y),
    }
}

/// Remove any component of `normal` pointing along `direction`, falling back
/// to `geometric` if nothing is left.
fn face_against(normal: DVec3, direction: DVec3, geometric: DVec3) -> DVec3 {
    let along = direction.dot(normal);
    if along <= 0.0 {
        return normal;
    }
    (normal - direction * along)
        .try_normalize()
        .filter(|n| direction.dot(*n) <= 0.0)
        .unwrap_or(geometric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::SimplexWaterShader;
    use crate::tables::HEIGHTS;
    use blockray_testkit::{axis_rays, TestScene};
    use glam::DVec4;

    const WATER: TextureId = TextureId("water");
    const LAVA: TextureId = TextureId("lava");

    fn scene() -> TestScene {
        TestScene::new()
            .with_solid(WATER, [64, 96, 255, 128])
            .with_solid(LAVA, [255, 128, 0, 255])
    }

    fn down_at(x: f64, z: f64) -> Ray {
        Ray::new(DVec3::new(x, 1.0, z), -DVec3::Y)
    }

    #[test]
    fn flat_surface_hit_from_above() {
        let water = LiquidSurface::water(WATER);
        let state = LiquidState::surface(CornerHeights::flat(0));
        let hit = water.intersect(&down_at(0.3, 0.6), state, &scene()).unwrap();
        assert!((hit.distance - (1.0 - HEIGHTS[0])).abs() < 1e-12);
        assert!(hit.normal.abs_diff_eq(DVec3::Y, 1e-12));
        assert_eq!(hit.material, MaterialTag::WATER);
    }

    #[test]
    fn water_color_is_texture_average() {
        let water = LiquidSurface::water(WATER);
        let scene = scene();
        let hit = water
            .intersect(&down_at(0.5, 0.5), LiquidState::full(), &scene)
            .unwrap();
        assert_eq!(hit.color, scene.texture(WATER).avg_color_linear());
    }

    #[test]
    fn ray_from_below_hits_floor_first() {
        let water = LiquidSurface::water(WATER);
        let ray = Ray::new(DVec3::new(0.4, 0.0, 0.4), DVec3::Y);
        let hit = water
            .intersect(&ray, LiquidState::surface(CornerHeights::flat(3)), &scene())
            .unwrap();
        assert!(hit.distance.abs() < 1e-9);
        assert_eq!(hit.normal, -DVec3::Y);
    }

    #[test]
    fn lava_has_no_floor() {
        let lava = LiquidSurface::lava(LAVA);
        let ray = Ray::new(DVec3::new(0.4, 0.0, 0.4), DVec3::Y);
        let hit = lava
            .intersect(&ray, LiquidState::surface(CornerHeights::flat(3)), &scene())
            .unwrap();
        // Passes the open floor and exits through the top.
        assert!((hit.distance - HEIGHTS[3]).abs() < 1e-12);
        assert_eq!(hit.normal, -DVec3::Y);
        assert_eq!(hit.color, DVec4::new(1.0, to_lin(128), 0.0, 1.0));
        assert_eq!(hit.material, MaterialTag::LAVA);
    }

    fn to_lin(c: u8) -> f64 {
        blockray_core::to_linear(c)
    }

    #[test]
    fn lava_side_uses_world_projection() {
        let lava = LiquidSurface::lava(LAVA);
        // Enters cell (5, 7, 3) through its west face.
        let ray = Ray::new(DVec3::new(5.0, 7.25, 3.75), DVec3::X);
        let hit = lava
            .intersect(&ray, LiquidState::surface(CornerHeights::flat(0)), &scene())
            .unwrap();
        assert!(hit.distance.abs() < 1e-9);
        assert_eq!(hit.normal, -DVec3::X);
        assert!(hit.uv.abs_diff_eq(DVec2::new(0.75, 0.25), 1e-12));
    }

    #[test]
    fn water_surface_from_below_exits_to_air() {
        let water = LiquidSurface::water(WATER);
        let ray = Ray::new(DVec3::new(0.5, 0.2, 0.5), DVec3::new(0.0, 1.0, 0.2));
        let hit = water
            .intersect(&ray, LiquidState::surface(CornerHeights::flat(4)), &scene())
            .unwrap();
        assert!(hit.normal.y < 0.0);
        assert_eq!(hit.material, MaterialTag::AIR);
    }

    #[test]
    fn full_block_ignores_corners() {
        let water = LiquidSurface::water(WATER);
        let scene = scene();
        let a = LiquidState {
            corners: CornerHeights::new([0, 7, 3, 5]),
            full_block: true,
        };
        let b = LiquidState {
            corners: CornerHeights::flat(6),
            full_block: true,
        };
        for ray in axis_rays(DVec3::new(0.3, 0.6, 0.2)) {
            assert_eq!(water.intersect(&ray, a, &scene), water.intersect(&ray, b, &scene));
            let hit = water.intersect(&ray, a, &scene).unwrap();
            assert!(hit.distance.abs() < 1e-9);
        }
    }

    #[test]
    fn animated_shader_perturbs_only_shading_normal() {
        let water = LiquidSurface::water(WATER);
        let scene = scene()
            .with_shader(SimplexWaterShader::default())
            .with_time(2.0);
        let state = LiquidState::surface(CornerHeights::flat(0));
        let hit = water.intersect(&down_at(0.3, 0.6), state, &scene).unwrap();
        assert!(hit.normal.abs_diff_eq(DVec3::Y, 1e-12));
        assert_ne!(hit.shade_normal, hit.normal);
        assert!(hit.shade_normal.y > 0.0);
    }

    #[test]
    fn inside_detection() {
        let water = LiquidSurface::water(WATER);
        let state = LiquidState::surface(CornerHeights::flat(2));
        let inside = Ray::new(DVec3::new(0.5, 0.2, 0.5), DVec3::new(0.1, 1.0, 0.0));
        let outside = down_at(0.5, 0.5);
        assert!(water.is_inside(&inside, state));
        assert!(!water.is_inside(&outside, state));
        assert!(water.is_inside(&inside, LiquidState::full()));
    }

    #[test]
    fn lava_full_block_sees_origin_inside() {
        let lava = LiquidSurface::lava(LAVA);
        let inside = Ray::new(DVec3::splat(0.5), DVec3::new(0.2, 1.0, 0.1));
        assert!(lava.is_inside(&inside, LiquidState::full()));
        assert!(!lava.is_inside(&down_at(0.5, 0.5), LiquidState::full()));

        let hit = lava.intersect(&inside, LiquidState::full(), &scene()).unwrap();
        assert!((inside.direction.y * hit.distance - 0.5).abs() < 1e-12);
        assert_eq!(hit.normal, -DVec3::Y);
        assert_eq!(hit.material, MaterialTag::LAVA);
    }

    #[test]
    fn top_only_ignores_skirts() {
        let water = LiquidSurface::water(WATER);
        let side = Ray::new(DVec3::new(0.0, 0.2, 0.5), DVec3::X);
        let corners = CornerHeights::flat(0);
        assert!(water.intersect_top(&side, corners, &scene()).is_none());
        assert!(water.intersect_top(&down_at(0.5, 0.5), corners, &scene()).is_some());
    }
}
