//! Water shading modes.

use blockray_core::WaterShader;
use glam::{DVec2, DVec3};
use noise::{NoiseFn, Simplex};
use serde::{Deserialize, Serialize};

/// Simplified mode: the surface keeps its geometric normal.
#[derive(Debug, Clone, Copy, Default)]
pub struct StillWater;

impl WaterShader for StillWater {
    fn is_still(&self) -> bool {
        true
    }

    fn shade(&self, _point: DVec3, normal: DVec3, _animation_time: f64) -> DVec3 {
        normal
    }
}

/// Configuration for the fractal wave shader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplexParams {
    /// Number of octaves.
    pub iterations: u32,
    /// Frequency of the first octave; doubles each octave.
    pub frequency: f64,
    /// Amplitude of the first octave; halves each octave.
    pub amplitude: f64,
    /// Multiplier on the scene animation time.
    pub animation_speed: f64,
    /// World-space offset applied before scaling.
    pub offset: [f64; 2],
    /// World-space scale along x and z.
    pub scale: [f64; 2],
    /// Noise seed.
    pub seed: u32,
}

impl Default for SimplexParams {
    fn default() -> Self {
        Self {
            iterations: 4,
            frequency: 0.4,
            amplitude: 0.025,
            animation_speed: 1.0,
            offset: [0.0, 0.0],
            scale: [1.0, 1.0],
            seed: 0,
        }
    }
}

/// Step used for the finite-difference gradient of the noise.
const GRADIENT_STEP: f64 = 1e-3;

/// Animated waves from layered 3D simplex noise over `(x, z, time)`.
///
/// The wave height's partial derivatives along x and z give two slope
/// vectors; their cross product is the wave normal.
pub struct SimplexWaterShader {
    params: SimplexParams,
    noise: Simplex,
}

impl std::fmt::Debug for SimplexWaterShader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexWaterShader")
            .field("params", &self.params)
            .finish()
    }
}

impl Default for SimplexWaterShader {
    fn default() -> Self {
        Self::new(SimplexParams::default())
    }
}

impl SimplexWaterShader {
    /// Create a shader with the given parameters.
    pub fn new(params: SimplexParams) -> Self {
        Self {
            noise: Simplex::new(params.seed),
            params,
        }
    }

    /// Current parameters.
    pub fn params(&self) -> &SimplexParams {
        &self.params
    }

    fn gradient(&self, p: [f64; 3]) -> DVec2 {
        let h = GRADIENT_STEP;
        let dx = self.noise.get([p[0] + h, p[1], p[2]]) - self.noise.get([p[0] - h, p[1], p[2]]);
        let dz = self.noise.get([p[0], p[1] + h, p[2]]) - self.noise.get([p[0], p[1] - h, p[2]]);
        DVec2::new(dx, dz) / (2.0 * h)
    }

    /// Normal of the wave surface alone at `point`.
    pub fn wave_normal(&self, point: DVec3, animation_time: f64) -> DVec3 {
        let p = &self.params;
        let x = (point.x + p.offset[0]) / p.scale[0];
        let z = (point.z + p.offset[1]) / p.scale[1];
        let t = animation_time * p.animation_speed;

        let mut frequency = p.frequency;
        let mut amplitude = p.amplitude;
        let mut slope = DVec2::ZERO;
        for _ in 0..p.iterations {
            let next = slope - amplitude * self.gradient([x * frequency, z * frequency, t]);
            if next.is_nan() {
                break;
            }
            slope = next;
            frequency *= 2.0;
            amplitude *= 0.5;
        }

        let x_slope = DVec3::new(1.0, slope.x, 0.0);
        let z_slope = DVec3::new(0.0, slope.y, 1.0);
        z_slope.cross(x_slope).normalize()
    }
}

impl WaterShader for SimplexWaterShader {
    fn is_still(&self) -> bool {
        false
    }

    /// Adds the wave tilt on top of the incoming normal.
    fn shade(&self, point: DVec3, normal: DVec3, animation_time: f64) -> DVec3 {
        let tilt = self.wave_normal(point, animation_time) - DVec3::Y;
        let shaded = normal + tilt * normal.y.signum();
        shaded.try_normalize().unwrap_or(normal)
    }
}
