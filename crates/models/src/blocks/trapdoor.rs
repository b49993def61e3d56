//! Trapdoors: a 3/16 slab that lies in the top or bottom half of the block
//! when closed and stands against one side when open.

use std::sync::OnceLock;

use blockray_core::{Facing, TextureId};
use blockray_geometry::{px, transform, Aabb, Face, Model, StateKey, Transform, VariantTable};
use glam::DVec3;

/// Texture on every face.
pub const TRAPDOOR: TextureId = TextureId("trapdoor");

/// Which half a closed trapdoor occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Half {
    /// Resting on the block floor.
    Bottom,
    /// Against the block ceiling.
    Top,
}

impl Half {
    /// Parse a block-state `half` value; anything but `"top"` is the bottom.
    pub fn from_name(name: &str) -> Self {
        if name == "top" {
            Half::Top
        } else {
            Half::Bottom
        }
    }
}

/// Trapdoor block state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrapdoorState {
    /// Direction the hinge side faces away from.
    pub facing: Facing,
    /// Half used while closed.
    pub half: Half,
    /// Open trapdoors stand vertically.
    pub open: bool,
}

impl TrapdoorState {
    /// Build from block-state strings. Unknown facings fall back to north.
    pub fn from_names(facing: &str, half: &str, open: bool) -> Self {
        Self {
            facing: Facing::from_name(facing),
            half: Half::from_name(half),
            open,
        }
    }
}

impl StateKey for TrapdoorState {
    const COUNT: usize = Facing::COUNT * 2 * 2;

    fn index(self) -> usize {
        let half = usize::from(self.half == Half::Top);
        (self.facing.index() * 2 + half) * 2 + usize::from(self.open)
    }

    fn from_index(index: usize) -> Self {
        Self {
            facing: Facing::from_index(index / 4),
            half: if index / 2 % 2 == 1 { Half::Top } else { Half::Bottom },
            open: index % 2 == 1,
        }
    }
}

fn slab(min: DVec3, max: DVec3) -> Model {
    Model::new(Face::all(Aabb::new(min, max).quads(), TRAPDOOR))
}

fn build(state: TrapdoorState) -> Model {
    let thickness = px(3.0);
    if state.open {
        // Authored facing north: the panel stands against the south side.
        let north = slab(DVec3::new(0.0, 0.0, 1.0 - thickness), DVec3::ONE);
        return Model::new(transform(north.faces(), &Transform::facing(state.facing)));
    }
    match state.half {
        Half::Bottom => slab(DVec3::ZERO, DVec3::new(1.0, thickness, 1.0)),
        Half::Top => slab(DVec3::new(0.0, 1.0 - thickness, 0.0), DVec3::ONE),
    }
}

/// Trapdoor geometry for every state.
pub fn table() -> &'static VariantTable<TrapdoorState> {
    static TABLE: OnceLock<VariantTable<TrapdoorState>> = OnceLock::new();
    TABLE.get_or_init(|| VariantTable::build("trapdoor", build))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockray_core::Ray;
    use blockray_testkit::TestScene;

    use crate::Shape;

    fn hit_distance(state: TrapdoorState, ray: &Ray) -> Option<f64> {
        let model = table().lookup(state);
        Shape::Quads(model.faces())
            .intersect(ray, &TestScene::new())
            .map(|hit| hit.distance)
    }

    #[test]
    fn sixteen_variants_of_six_faces() {
        assert_eq!(table().len(), 16);
        for (_, model) in table().iter() {
            assert_eq!(model.len(), 6);
            assert_eq!(model.quads().count(), model.textures().count());
        }
    }

    #[test]
    fn key_index_round_trips() {
        for index in 0..TrapdoorState::COUNT {
            assert_eq!(TrapdoorState::from_index(index).index(), index);
        }
    }

    #[test]
    fn closed_halves() {
        let down = Ray::new(DVec3::new(0.5, 1.0, 0.5), -DVec3::Y);
        let bottom = TrapdoorState::from_names("east", "bottom", false);
        let top = TrapdoorState::from_names("east", "top", false);
        assert!((hit_distance(bottom, &down).unwrap() - (1.0 - px(3.0))).abs() < 1e-12);
        assert!(hit_distance(top, &down).unwrap().abs() < 1e-12);
    }

    #[test]
    fn open_panel_follows_facing() {
        // Looking north from the south side of the block.
        let from_south = Ray::new(DVec3::new(0.5, 0.5, 1.0), -DVec3::Z);
        let north = TrapdoorState::from_names("north", "bottom", true);
        let south = TrapdoorState::from_names("south", "bottom", true);
        assert!(hit_distance(north, &from_south).unwrap().abs() < 1e-12);
        // A south-facing panel stands against the north side instead.
        let far = hit_distance(south, &from_south).unwrap();
        assert!((far - (1.0 - px(3.0))).abs() < 1e-12);

        // East-facing: against the west side.
        let from_east = Ray::new(DVec3::new(1.0, 0.5, 0.5), -DVec3::X);
        let east = TrapdoorState::from_names("east", "top", true);
        assert!((hit_distance(east, &from_east).unwrap() - (1.0 - px(3.0))).abs() < 1e-12);
    }

    #[test]
    fn unknown_facing_uses_north() {
        let state = TrapdoorState::from_names("sideways", "bottom", true);
        assert_eq!(state.facing, Facing::North);
        let north = TrapdoorState::from_names("north", "bottom", true);
        assert_eq!(table().lookup(state), table().lookup(north));
    }
}
