//! Shell-plus-content compositing.
//!
//! Blocks such as the cauldron, slime and honey have an outer shell that
//! covers separate inner geometry. Both layers are intersected on their own;
//! the inner layer only tints the color of the outer hit.

use blockray_core::{overlay, IntersectionRecord, Ray, Scene};
use blockray_geometry::Model;

use crate::shape::intersect_faces;

/// Outer shell and the content it covers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShellModel {
    outer: Model,
    inner: Model,
}

impl ShellModel {
    /// Pair a shell with its content. `inner` may be empty.
    pub fn new(outer: Model, inner: Model) -> Self {
        Self { outer, inner }
    }

    /// Shell geometry.
    pub fn outer(&self) -> &Model {
        &self.outer
    }

    /// Content geometry.
    pub fn inner(&self) -> &Model {
        &self.inner
    }

    /// Nearest hit on the content alone.
    pub fn intersect_inner(&self, ray: &Ray, scene: &dyn Scene) -> Option<IntersectionRecord> {
        intersect_faces(self.inner.faces(), ray, scene)
    }

    /// Nearest hit on the shell alone.
    pub fn intersect_outer(&self, ray: &Ray, scene: &dyn Scene) -> Option<IntersectionRecord> {
        intersect_faces(self.outer.faces(), ray, scene)
    }

    /// Combine the two passes.
    ///
    /// Only an outer hit produces a result. Its distance and normals are
    /// kept and an inner hit, if any, is laid over its color. A hit on the
    /// content alone yields `None`; the shell is expected to cover it.
    pub fn composite(
        outer: Option<IntersectionRecord>,
        inner: Option<IntersectionRecord>,
    ) -> Option<IntersectionRecord> {
        let mut hit = outer?;
        if let Some(inner) = inner {
            hit.color = overlay(hit.color, inner.color);
        }
        Some(hit)
    }

    /// Both passes, composited.
    pub fn intersect(&self, ray: &Ray, scene: &dyn Scene) -> Option<IntersectionRecord> {
        let inner = self.intersect_inner(ray, scene);
        let outer = self.intersect_outer(ray, scene);
        Self::composite(outer, inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockray_core::{Texture, TextureId};
    use blockray_geometry::Aabb;
    use blockray_testkit::{assert_color_near, TestScene};
    use glam::{DVec3, DVec4};

    const SKIN: TextureId = TextureId("skin");
    const CORE: TextureId = TextureId("core");

    fn cube(min: f64, max: f64, texture: TextureId) -> Model {
        Model::new(Aabb::new(DVec3::splat(min), DVec3::splat(max)).faces([texture; 6]))
    }

    fn shell() -> ShellModel {
        ShellModel::new(cube(0.0, 1.0, SKIN), cube(0.25, 0.75, CORE))
    }

    fn scene() -> TestScene {
        TestScene::new()
            .with_solid(SKIN, [120, 200, 90, 160])
            .with_solid(CORE, [40, 160, 20, 230])
    }

    #[test]
    fn through_the_core_blends_both_colors() {
        let scene = scene();
        let ray = Ray::new(DVec3::new(0.5, 1.0, 0.5), -DVec3::Y);
        let hit = shell().intersect(&ray, &scene).unwrap();
        let outer = scene.texture(SKIN).avg_color_linear();
        let inner = scene.texture(CORE).avg_color_linear();
        assert!(hit.distance.abs() < 1e-12);
        assert_color_near(hit.color, overlay(outer, inner), 1e-12);
    }

    #[test]
    fn beside_the_core_keeps_the_shell_color() {
        let scene = scene();
        let ray = Ray::new(DVec3::new(0.1, 1.0, 0.1), -DVec3::Y);
        let hit = shell().intersect(&ray, &scene).unwrap();
        assert_eq!(hit.color, scene.texture(SKIN).avg_color_linear());
    }

    #[test]
    fn distance_comes_from_the_shell() {
        let ray = Ray::new(DVec3::new(0.0, 0.5, 0.5), DVec3::X);
        let shell = shell();
        let scene = scene();
        let inner = shell.intersect_inner(&ray, &scene).unwrap();
        let hit = shell.intersect(&ray, &scene).unwrap();
        assert!((inner.distance - 0.25).abs() < 1e-12);
        assert!(hit.distance.abs() < 1e-12);
        assert_eq!(hit.normal, -DVec3::X);
    }

    #[test]
    fn content_alone_is_not_reported() {
        let inner = IntersectionRecord {
            distance: 0.3,
            color: DVec4::ONE,
            ..IntersectionRecord::new()
        };
        assert_eq!(ShellModel::composite(None, Some(inner)), None);
        assert_eq!(ShellModel::composite(None, None), None);
    }

    #[test]
    fn empty_content_leaves_outer_untouched() {
        let outer = IntersectionRecord {
            distance: 0.6,
            color: DVec4::new(0.2, 0.3, 0.4, 0.5),
            ..IntersectionRecord::new()
        };
        assert_eq!(ShellModel::composite(Some(outer), None), Some(outer));
    }
}
