//! Glass panes: a centre post plus one arm per connected side.

use std::sync::OnceLock;

use blockray_core::{Facing, TextureId};
use blockray_geometry::{join, px, rotate_y_nesw, Aabb, Face, Model, StateKey, VariantTable};
use glam::DVec3;

/// Texture on the broad faces.
pub const GLASS: TextureId = TextureId("glass");
/// Texture on the thin edges.
pub const PANE_EDGE: TextureId = TextureId("glass_pane_top");

/// Set of sides a pane connects to, one bit per facing in N, E, S, W order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PaneConnections(u8);

impl PaneConnections {
    /// Connected on no side.
    pub const NONE: Self = Self(0);

    /// From the four block-state booleans.
    pub fn new(north: bool, east: bool, south: bool, west: bool) -> Self {
        let bits = [north, east, south, west]
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &on)| acc | (u8::from(on) << i));
        Self(bits)
    }

    /// Copy with `side` connected.
    pub fn with(self, side: Facing) -> Self {
        Self(self.0 | 1 << side.index())
    }

    /// True if `side` is connected.
    pub fn contains(self, side: Facing) -> bool {
        self.0 & (1 << side.index()) != 0
    }

    /// Raw bitmask.
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl StateKey for PaneConnections {
    const COUNT: usize = 16;

    fn index(self) -> usize {
        usize::from(self.0)
    }

    fn from_index(index: usize) -> Self {
        Self(index as u8)
    }
}

fn post() -> Vec<Face> {
    Aabb::new(DVec3::new(px(7.0), 0.0, px(7.0)), DVec3::new(px(9.0), 1.0, px(9.0)))
        .faces([GLASS, GLASS, PANE_EDGE, PANE_EDGE, GLASS, GLASS])
}

/// Arms in N, E, S, W order. The face against the post is left out.
fn arms() -> [Vec<Face>; 4] {
    let mut north = Aabb::new(DVec3::new(px(7.0), 0.0, 0.0), DVec3::new(px(9.0), 1.0, px(7.0)))
        .faces([GLASS, GLASS, PANE_EDGE, PANE_EDGE, PANE_EDGE, GLASS]);
    north.truncate(5);
    rotate_y_nesw(&north)
}

fn build(connections: PaneConnections, arms: &[Vec<Face>; 4]) -> Model {
    let post = post();
    let mut parts = vec![post.as_slice()];
    for side in Facing::ALL {
        if connections.contains(side) {
            parts.push(arms[side.index()].as_slice());
        }
    }
    Model::new(join(&parts))
}

/// Pane geometry for every connection mask.
pub fn table() -> &'static VariantTable<PaneConnections> {
    static TABLE: OnceLock<VariantTable<PaneConnections>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let arms = arms();
        VariantTable::build("glass_pane", |connections| build(connections, &arms))
    })
}
