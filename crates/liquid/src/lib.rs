#![warn(missing_docs)]
//! Liquid surfaces: corner-height tessellation of water and lava blocks,
//! their intersection, and the height-field and wave shading used on the
//! water surface.

mod height_field;
mod shader;
mod state;
mod surface;
mod tables;

pub use height_field::HeightField;
pub use shader::{SimplexParams, SimplexWaterShader, StillWater};
pub use state::{CornerHeights, LiquidState, FULL_BLOCK_BIT};
pub use surface::{LiquidKind, LiquidSurface};
pub use tables::{tables, LiquidTables, Skirt, HEIGHTS};
