//! Cauldron shell with optional water or lava content.

use std::sync::OnceLock;

use blockray_core::TextureId;
use blockray_geometry::{
    join, px, rotate_y_nesw, Aabb, Face, Model, Quad, StateKey, UvRect, VariantTable,
};
use glam::DVec3;

use super::liquid::{LAVA_STILL, WATER_STILL};
use crate::compositor::ShellModel;

/// Rim texture.
pub const CAULDRON_TOP: TextureId = TextureId("cauldron_top");
/// Outer wall texture.
pub const CAULDRON_SIDE: TextureId = TextureId("cauldron_side");
/// Underside texture.
pub const CAULDRON_BOTTOM: TextureId = TextureId("cauldron_bottom");
/// Texture inside the bowl.
pub const CAULDRON_INNER: TextureId = TextureId("cauldron_inner");

/// Surface height of each water level, 1 through 3.
const WATER_LEVELS: [f64; 3] = [9.0 / 16.0, 12.0 / 16.0, 15.0 / 16.0];

/// What the cauldron holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CauldronContent {
    /// Nothing.
    Empty,
    /// Water at level 1, 2 or 3.
    Water(u8),
    /// Lava, always full.
    Lava,
}

impl CauldronContent {
    /// Water at `level`; level 0 is empty.
    ///
    /// # Panics
    ///
    /// If `level` is above 3.
    pub fn water(level: u8) -> Self {
        assert!(level <= 3, "cauldron water level {level} out of range");
        if level == 0 {
            CauldronContent::Empty
        } else {
            CauldronContent::Water(level)
        }
    }

    /// Height of the content surface, if any.
    pub fn surface_height(self) -> Option<f64> {
        match self {
            CauldronContent::Empty => None,
            CauldronContent::Water(level) => Some(WATER_LEVELS[usize::from(level) - 1]),
            CauldronContent::Lava => Some(WATER_LEVELS[2]),
        }
    }
}

impl StateKey for CauldronContent {
    const COUNT: usize = 5;

    fn index(self) -> usize {
        match self {
            CauldronContent::Empty => 0,
            CauldronContent::Water(level) => usize::from(level),
            CauldronContent::Lava => 4,
        }
    }

    fn from_index(index: usize) -> Self {
        match index {
            0 => CauldronContent::Empty,
            1..=3 => CauldronContent::Water(index as u8),
            _ => CauldronContent::Lava,
        }
    }
}

fn shell() -> Model {
    let wall = Aabb::new(DVec3::new(0.0, px(3.0), 0.0), DVec3::new(1.0, 1.0, px(2.0))).faces([
        CAULDRON_SIDE,
        CAULDRON_SIDE,
        CAULDRON_BOTTOM,
        CAULDRON_TOP,
        CAULDRON_SIDE,
        CAULDRON_INNER,
    ]);
    let mut leg =
        Aabb::new(DVec3::ZERO, DVec3::new(px(4.0), px(3.0), px(2.0))).faces([CAULDRON_SIDE; 6]);
    leg.extend(
        Aabb::new(DVec3::new(0.0, 0.0, px(2.0)), DVec3::new(px(2.0), px(3.0), px(4.0)))
            .faces([CAULDRON_SIDE; 6]),
    );
    let floor = Aabb::new(
        DVec3::new(px(2.0), px(3.0), px(2.0)),
        DVec3::new(px(14.0), px(4.0), px(14.0)),
    )
    .faces([
        CAULDRON_INNER,
        CAULDRON_INNER,
        CAULDRON_BOTTOM,
        CAULDRON_INNER,
        CAULDRON_INNER,
        CAULDRON_INNER,
    ]);

    let walls = rotate_y_nesw(&wall);
    let legs = rotate_y_nesw(&leg);
    let mut parts: Vec<&[Face]> = walls.iter().map(Vec::as_slice).collect();
    parts.push(&floor);
    parts.extend(legs.iter().map(Vec::as_slice));
    Model::new(join(&parts))
}

fn content(content: CauldronContent) -> Model {
    let Some(y) = content.surface_height() else {
        return Model::default();
    };
    let texture = match content {
        CauldronContent::Lava => LAVA_STILL,
        _ => WATER_STILL,
    };
    let quad = Quad::new(
        DVec3::new(px(2.0), y, px(14.0)),
        DVec3::new(px(14.0), y, px(14.0)),
        DVec3::new(px(2.0), y, px(2.0)),
        UvRect::new(px(2.0), px(14.0), 1.0 - px(14.0), 1.0 - px(2.0)),
    );
    Model::new(vec![Face::new(quad, texture)])
}

/// Cauldron geometry for every content state.
pub fn table() -> &'static VariantTable<CauldronContent, ShellModel> {
    static TABLE: OnceLock<VariantTable<CauldronContent, ShellModel>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let shell = shell();
        VariantTable::build("cauldron", |state| ShellModel::new(shell.clone(), content(state)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockray_core::{overlay, Ray, Scene, Texture};
    use blockray_testkit::{assert_color_near, TestScene};

    use crate::Shape;

    fn scene() -> TestScene {
        TestScene::new()
            .with_solid(CAULDRON_INNER, [60, 60, 60, 255])
            .with_solid(WATER_STILL, [40, 80, 220, 150])
            .with_solid(LAVA_STILL, [230, 100, 10, 255])
    }

    fn into_bowl() -> Ray {
        Ray::new(DVec3::new(0.5, 1.0, 0.5), -DVec3::Y)
    }

    #[test]
    fn five_states_share_one_shell() {
        let table = table();
        assert_eq!(table.len(), 5);
        let shell = table.lookup(CauldronContent::Empty).outer();
        for (state, entry) in table.iter() {
            assert_eq!(entry.outer(), shell);
            let expected = usize::from(state != CauldronContent::Empty);
            assert_eq!(entry.inner().len(), expected, "{state:?}");
        }
    }

    #[test]
    fn water_levels_rise() {
        let heights: Vec<_> = (1..=3)
            .map(|level| CauldronContent::water(level).surface_height().unwrap())
            .collect();
        assert_eq!(heights, [px(9.0), px(12.0), px(15.0)]);
        assert_eq!(CauldronContent::water(0), CauldronContent::Empty);
        assert_eq!(CauldronContent::Lava.surface_height(), Some(px(15.0)));
    }

    #[test]
    fn empty_bowl_shows_the_floor() {
        let scene = scene();
        let hit = Shape::Shell(table().lookup(CauldronContent::Empty))
            .intersect(&into_bowl(), &scene)
            .unwrap();
        assert!((hit.distance - (1.0 - px(4.0))).abs() < 1e-12);
        assert_eq!(hit.color, scene.texture(CAULDRON_INNER).avg_color_linear());
    }

    #[test]
    fn water_tints_the_floor() {
        let scene = scene();
        let hit = Shape::Shell(table().lookup(CauldronContent::water(2)))
            .intersect(&into_bowl(), &scene)
            .unwrap();
        let floor = scene.texture(CAULDRON_INNER).avg_color_linear();
        let water = scene.texture(WATER_STILL).avg_color_linear();
        assert!((hit.distance - (1.0 - px(4.0))).abs() < 1e-12);
        assert_color_near(hit.color, overlay(floor, water), 1e-12);
    }

    #[test]
    fn lava_covers_the_floor() {
        let scene = scene();
        let hit = Shape::Shell(table().lookup(CauldronContent::Lava))
            .intersect(&into_bowl(), &scene)
            .unwrap();
        assert_color_near(hit.color, scene.texture(LAVA_STILL).avg_color_linear(), 1e-12);
    }

    #[test]
    fn rim_is_hit_at_the_top() {
        let ray = Ray::new(DVec3::new(px(1.0), 1.0, 0.5), -DVec3::Y);
        let hit = Shape::Shell(table().lookup(CauldronContent::Empty))
            .intersect(&ray, &scene())
            .unwrap();
        assert!(hit.distance.abs() < 1e-12);
        assert_eq!(hit.normal, DVec3::Y);
    }
}
