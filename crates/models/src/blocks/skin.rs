//! Slime and honey blocks: a translucent skin around a smaller core.

use std::sync::OnceLock;

use blockray_core::TextureId;
use blockray_geometry::{px, Aabb, Model};
use glam::DVec3;

use crate::compositor::ShellModel;

/// Slime texture, used by both layers.
pub const SLIME: TextureId = TextureId("slime");
/// Honey side texture.
pub const HONEY_SIDE: TextureId = TextureId("honey_block_side");
/// Honey top texture.
pub const HONEY_TOP: TextureId = TextureId("honey_block_top");
/// Honey bottom texture.
pub const HONEY_BOTTOM: TextureId = TextureId("honey_block_bottom");

fn cube(inset: f64, textures: [TextureId; 6]) -> Model {
    Model::new(Aabb::new(DVec3::splat(inset), DVec3::splat(1.0 - inset)).faces(textures))
}

/// Slime block: full skin over a 10/16 core.
pub fn slime() -> &'static ShellModel {
    static SLIME_BLOCK: OnceLock<ShellModel> = OnceLock::new();
    SLIME_BLOCK.get_or_init(|| ShellModel::new(cube(0.0, [SLIME; 6]), cube(px(3.0), [SLIME; 6])))
}

/// Honey block: full skin over a 14/16 core.
pub fn honey() -> &'static ShellModel {
    static HONEY_BLOCK: OnceLock<ShellModel> = OnceLock::new();
    HONEY_BLOCK.get_or_init(|| {
        let textures = [HONEY_SIDE, HONEY_SIDE, HONEY_BOTTOM, HONEY_TOP, HONEY_SIDE, HONEY_SIDE];
        ShellModel::new(cube(0.0, textures), cube(px(1.0), textures))
    })
}
