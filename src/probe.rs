//! Headless preview of the demo block row.
//!
//! One bounce only: the first hit along each primary ray is lit by a fixed
//! sun and composited over the sky color.

use std::collections::HashMap;

use anyhow::{Context, Result};
use blockray_core::{
    overlay, to_srgb, Facing, ImageTexture, IntersectionRecord, Ray, Scene, SolidTexture, Texture,
    TextureId, WaterShader,
};
use blockray_geometry::{traverse, Aabb, TexturedBox};
use blockray_liquid::{CornerHeights, LiquidState, SimplexWaterShader, StillWater};
use blockray_models::blocks::cauldron::{self, CauldronContent};
use blockray_models::blocks::pane::{self, PaneConnections};
use blockray_models::blocks::trapdoor::{self, Half, TrapdoorState};
use blockray_models::blocks::{liquid, skin};
use blockray_models::Shape;
use glam::{DVec3, DVec4, IVec3};
use image::{Rgba, RgbaImage};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::{CameraConfig, ProbeConfig, ShaderMode};

pub const STONE: TextureId = TextureId("stone");

/// Farthest cell entry the grid walk will consider.
const MAX_DISTANCE: f64 = 64.0;
const AMBIENT: f64 = 0.3;
const SKY: DVec4 = DVec4::new(0.45, 0.62, 0.86, 1.0);

static STONE_BOX: [TexturedBox; 1] = [TexturedBox::new(Aabb::UNIT, STONE)];

/// Flat colors used when no texture file is supplied.
const DEFAULT_COLORS: [(TextureId, [u8; 4]); 14] = [
    (STONE, [125, 125, 125, 255]),
    (liquid::WATER_STILL, [50, 90, 200, 170]),
    (liquid::LAVA_STILL, [220, 95, 20, 255]),
    (cauldron::CAULDRON_TOP, [70, 70, 75, 255]),
    (cauldron::CAULDRON_SIDE, [60, 60, 65, 255]),
    (cauldron::CAULDRON_BOTTOM, [45, 45, 50, 255]),
    (cauldron::CAULDRON_INNER, [35, 35, 40, 255]),
    (skin::SLIME, [110, 190, 90, 150]),
    (skin::HONEY_SIDE, [235, 160, 30, 190]),
    (skin::HONEY_TOP, [245, 175, 40, 190]),
    (skin::HONEY_BOTTOM, [215, 140, 25, 190]),
    (trapdoor::TRAPDOOR, [150, 115, 70, 255]),
    (pane::GLASS, [200, 225, 235, 90]),
    (pane::PANE_EDGE, [190, 215, 225, 200]),
];

/// A placed block.
#[derive(Debug, Clone, Copy)]
pub enum Block {
    Stone,
    Water(LiquidState),
    Lava(LiquidState),
    Cauldron(CauldronContent),
    Slime,
    Honey,
    Trapdoor(TrapdoorState),
    Pane(PaneConnections),
}

impl Block {
    pub fn shape(self) -> Shape<'static> {
        match self {
            Block::Stone => Shape::Boxes(&STONE_BOX),
            Block::Water(state) => Shape::Liquid(liquid::water(), state),
            Block::Lava(state) => Shape::Liquid(liquid::lava(), state),
            Block::Cauldron(content) => Shape::Shell(cauldron::table().lookup(content)),
            Block::Slime => Shape::Shell(skin::slime()),
            Block::Honey => Shape::Shell(skin::honey()),
            Block::Trapdoor(state) => Shape::Quads(trapdoor::table().lookup(state).faces()),
            Block::Pane(mask) => Shape::Quads(pane::table().lookup(mask).faces()),
        }
    }
}

/// Sparse block grid.
#[derive(Debug, Default)]
pub struct World {
    blocks: HashMap<IVec3, Block>,
}

impl World {
    pub fn set(&mut self, cell: IVec3, block: Block) {
        self.blocks.insert(cell, block);
    }

    pub fn get(&self, cell: IVec3) -> Option<Block> {
        self.blocks.get(&cell).copied()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// One row of every modelled block along +x on a stone floor.
    pub fn demo() -> Self {
        let mut world = World::default();
        for x in -2..=16 {
            for z in -2..=3 {
                world.set(IVec3::new(x, -1, z), Block::Stone);
            }
        }

        let surface = |codes| LiquidState::surface(CornerHeights::new(codes));
        let row = [
            Block::Water(surface([0, 2, 4, 6])),
            Block::Water(surface([3, 3, 3, 3])),
            Block::Water(LiquidState::full()),
            Block::Lava(surface([2, 2, 2, 2])),
            Block::Lava(surface([5, 1, 1, 5])),
            Block::Cauldron(CauldronContent::water(2)),
            Block::Cauldron(CauldronContent::Lava),
            Block::Cauldron(CauldronContent::Empty),
            Block::Slime,
            Block::Honey,
            Block::Trapdoor(TrapdoorState::from_names("east", "bottom", true)),
            Block::Trapdoor(TrapdoorState {
                facing: Facing::North,
                half: Half::Top,
                open: false,
            }),
            Block::Pane(PaneConnections::new(true, false, true, false)),
            Block::Pane(PaneConnections::new(true, true, true, true)),
        ];
        for (x, block) in (0..).zip(row) {
            world.set(IVec3::new(x, 0, 0), block);
        }
        world
    }

    /// First hit along `ray`, with the distance measured from `ray.origin`.
    pub fn trace(&self, ray: &Ray, scene: &dyn Scene) -> Option<IntersectionRecord> {
        traverse(ray.origin, ray.direction, MAX_DISTANCE, |cell, entry| {
            let block = self.get(cell)?;
            let mut hit = block.shape().intersect(&ray.advanced(entry), scene)?;
            hit.distance += entry;
            Some(hit)
        })
    }
}

/// Textures and water shading for the probe.
pub struct ProbeScene {
    textures: HashMap<TextureId, Box<dyn Texture>>,
    fallback: SolidTexture,
    shader: Box<dyn WaterShader>,
    time: f64,
}

impl ProbeScene {
    /// Flat default colors, overridden by `<id>.png` files from the
    /// configured texture directory when present.
    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        let mut textures: HashMap<TextureId, Box<dyn Texture>> = HashMap::new();
        for (id, rgba) in DEFAULT_COLORS {
            let texture: Box<dyn Texture> = match &config.texture_dir {
                Some(dir) if dir.join(format!("{id}.png")).is_file() => {
                    let path = dir.join(format!("{id}.png"));
                    let loaded = ImageTexture::load(&path)
                        .with_context(|| format!("loading texture {}", path.display()))?;
                    debug!(texture = %id, path = %path.display(), "loaded texture");
                    Box::new(loaded)
                }
                _ => Box::new(SolidTexture::from_rgba8(rgba)),
            };
            textures.insert(id, texture);
        }

        let shader: Box<dyn WaterShader> = match config.water.shader {
            ShaderMode::Still => Box::new(StillWater),
            ShaderMode::Animated => Box::new(SimplexWaterShader::new(config.water.simplex)),
        };

        Ok(Self {
            textures,
            fallback: SolidTexture::from_rgba8([255, 0, 255, 255]),
            shader,
            time: config.animation_time,
        })
    }
}

impl Scene for ProbeScene {
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

/// Pinhole camera.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    eye: DVec3,
    forward: DVec3,
    right: DVec3,
    up: DVec3,
    half_height: f64,
    aspect: f64,
}

impl Camera {
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        let eye = DVec3::from(config.eye);
        let forward = (DVec3::from(config.target) - eye).normalize();
        let right = forward.cross(DVec3::Y).normalize();
        let up = right.cross(forward);
        Self {
            eye,
            forward,
            right,
            up,
            half_height: (config.fov_degrees.to_radians() * 0.5).tan(),
            aspect: f64::from(width) / f64::from(height),
        }
    }

    /// Ray through image coordinates `(sx, sy)` in `[0, 1]`, `sy = 0` at the top.
    pub fn ray(&self, sx: f64, sy: f64) -> Ray {
        let x = (2.0 * sx - 1.0) * self.half_height * self.aspect;
        let y = (1.0 - 2.0 * sy) * self.half_height;
        Ray::new(self.eye, self.forward + self.right * x + self.up * y)
    }
}

/// Counters reported after a render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub primary_rays: u64,
    pub hits: u64,
}

fn sun() -> DVec3 {
    DVec3::new(0.4, 0.9, 0.3).normalize()
}

/// Lambert plus ambient on the shading normal, composited over the sky.
pub fn shade(hit: &IntersectionRecord) -> DVec4 {
    let lambert = hit.shade_normal.dot(sun()).max(0.0);
    let light = AMBIENT + (1.0 - AMBIENT) * lambert;
    overlay(SKY, (hit.color.truncate() * light).extend(hit.color.w))
}

pub fn render(config: &ProbeConfig, world: &World, scene: &dyn Scene) -> (RgbaImage, RenderStats) {
    let width = config.width.max(1);
    let height = config.height.max(1);
    let samples = config.samples.max(1);
    let camera = Camera::new(&config.camera, width, height);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut stats = RenderStats::default();

    let mut frame = RgbaImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mut sum = DVec4::ZERO;
            for _ in 0..samples {
                let sx = (f64::from(x) + rng.gen::<f64>()) / f64::from(width);
                let sy = (f64::from(y) + rng.gen::<f64>()) / f64::from(height);
                let ray = camera.ray(sx, sy);
                stats.primary_rays += 1;
                sum += match world.trace(&ray, scene) {
                    Some(hit) => {
                        stats.hits += 1;
                        shade(&hit)
                    }
                    None => SKY,
                };
            }
            let color = sum / f64::from(samples);
            frame.put_pixel(
                x,
                y,
                Rgba([to_srgb(color.x), to_srgb(color.y), to_srgb(color.z), 255]),
            );
        }
    }

    info!(
        primary_rays = stats.primary_rays,
        hits = stats.hits,
        blocks = world.block_count(),
        "render finished"
    );
    (frame, stats)
}
