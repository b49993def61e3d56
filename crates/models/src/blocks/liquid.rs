//! Shared water and lava surfaces.

use std::sync::OnceLock;

use blockray_core::TextureId;
use blockray_liquid::LiquidSurface;

/// Still water texture.
pub const WATER_STILL: TextureId = TextureId("water_still");
/// Still lava texture.
pub const LAVA_STILL: TextureId = TextureId("lava_still");

/// Surface used by every water block.
pub fn water() -> &'static LiquidSurface {
    static WATER: OnceLock<LiquidSurface> = OnceLock::new();
    WATER.get_or_init(|| LiquidSurface::water(WATER_STILL))
}

/// Surface used by every lava block.
pub fn lava() -> &'static LiquidSurface {
    static LAVA: OnceLock<LiquidSurface> = OnceLock::new();
    LAVA.get_or_init(|| LiquidSurface::lava(LAVA_STILL))
}
