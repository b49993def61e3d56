//! In-memory scene for model tests.

use std::collections::HashMap;

use blockray_core::{Scene, SolidTexture, Texture, TextureId, WaterShader};
use glam::DVec3;

/// Water shader that returns its input normal untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughShader {
    /// Reported still-water mode.
    pub still: bool,
}

impl WaterShader for PassThroughShader {
    fn is_still(&self) -> bool {
        self.still
    }

    fn shade(&self, _point: DVec3, normal: DVec3, _animation_time: f64) -> DVec3 {
        normal
    }
}

/// Scene with registered textures and an opaque white fallback for any
/// unregistered slot.
pub struct TestScene {
    textures: HashMap<TextureId, Box<dyn Texture>>,
    fallback: SolidTexture,
    shader: Box<dyn WaterShader>,
    time: f64,
}

impl Default for TestScene {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScene {
    /// Empty scene in still-water mode.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            fallback: SolidTexture::from_rgba8([255, 255, 255, 255]),
            shader: Box::new(PassThroughShader { still: true }),
            time: 0.0,
        }
    }

    /// Register a texture.
    pub fn with_texture(mut self, id: TextureId, texture: impl Texture + 'static) -> Self {
        self.textures.insert(id, Box::new(texture));
        self
    }

    /// Register a single-color texture.
    pub fn with_solid(self, id: TextureId, rgba: [u8; 4]) -> Self {
        self.with_texture(id, SolidTexture::from_rgba8(rgba))
    }

    /// Replace the water shader.
    pub fn with_shader(mut self, shader: impl WaterShader + 'static) -> Self {
        self.shader = Box::new(shader);
        self
    }

    /// Set the animation clock.
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }
}

impl Scene for TestScene {
    fn texture(&self, id: TextureId) -> &dyn Texture {
        match self.textures.get(&id) {
            Some(texture) => texture.as_ref(),
            None => &self.fallback,
        }
    }

    fn water_shader(&self) -> &dyn WaterShader {
        self.shader.as_ref()
    }

    fn animation_time(&self) -> f64 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec4;

    #[test]
    fn unregistered_texture_is_white() {
        let scene = TestScene::new();
        let color = scene.texture(TextureId("missing")).color(0.5, 0.5);
        assert_eq!(color, DVec4::ONE);
    }

    #[test]
    fn registered_texture_wins() {
        let scene = TestScene::new().with_solid(TextureId("red"), [255, 0, 0, 255]);
        let color = scene.texture(TextureId("red")).color(0.1, 0.9);
        assert_eq!(color, DVec4::new(1.0, 0.0, 0.0, 1.0));
    }
}
