//! Scene collaborator consumed by block models during intersection.

use glam::DVec3;

use crate::texture::{Texture, TextureId};

/// Water surface shading routine selected by the scene.
pub trait WaterShader: Send + Sync {
    /// True for the simplified still-water mode, which leaves normals untouched.
    fn is_still(&self) -> bool;

    /// Produce the final shading normal for a water-surface hit at world
    /// position `point`, starting from the already perturbed `normal`.
    fn shade(&self, point: DVec3, normal: DVec3, animation_time: f64) -> DVec3;
}

/// Read-only scene state visible to block models.
pub trait Scene: Sync {
    /// Resolve a texture slot.
    fn texture(&self, id: TextureId) -> &dyn Texture;

    /// Current water shading mode.
    fn water_shader(&self) -> &dyn WaterShader;

    /// Animation clock in seconds.
    fn animation_time(&self) -> f64;
}
