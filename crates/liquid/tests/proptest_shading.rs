//! Property-based tests for liquid hits
//!
//! Critical invariants:
//! - Geometric and shading normals never point along the ray
//! - Corner decoding keeps only the low three bits of each nibble
//! - A hit is always inside the block and no farther than the block diagonal

use blockray_core::{Ray, TextureId};
use blockray_liquid::{CornerHeights, LiquidState, LiquidSurface, SimplexWaterShader};
use blockray_testkit::{ray_fan, TestScene};
use proptest::prelude::*;

const WATER: TextureId = TextureId("water");

fn corners() -> impl Strategy<Value = CornerHeights> {
    prop::array::uniform4(0u8..8).prop_map(CornerHeights::new)
}

fn check_hit(ray: &Ray, surface: &LiquidSurface, state: LiquidState, scene: &TestScene) {
    if let Some(hit) = surface.intersect(ray, state, scene) {
        assert!(ray.direction.dot(hit.normal) <= 1e-12);
        assert!(ray.direction.dot(hit.shade_normal) <= 1e-12, "{}", hit.shade_normal);
        assert!((hit.shade_normal.length() - 1.0).abs() < 1e-9);
        assert!(hit.distance > -1e-5 && hit.distance <= 3f64.sqrt() + 1e-9);
    }
}

proptest! {
    /// Property: wave shading never tilts the normal past the ray.
    #[test]
    fn shading_normal_faces_against_ray(
        corners in corners(),
        seed in any::<u64>(),
        time in 0.0f64..100.0,
    ) {
        let water = LiquidSurface::water(WATER);
        let scene = TestScene::new()
            .with_shader(SimplexWaterShader::default())
            .with_time(time);
        let state = LiquidState::surface(corners);
        for ray in ray_fan(seed, 16) {
            check_hit(&ray, &water, state, &scene);
        }
    }

    /// Property: lava and full blocks obey the same orientation rules.
    #[test]
    fn lava_and_full_blocks_face_against_ray(corners in corners(), seed in any::<u64>()) {
        let lava = LiquidSurface::lava(TextureId("lava"));
        let water = LiquidSurface::water(WATER);
        let scene = TestScene::new().with_shader(SimplexWaterShader::default());
        for ray in ray_fan(seed, 16) {
            check_hit(&ray, &lava, LiquidState::surface(corners), &scene);
            check_hit(&ray, &water, LiquidState::full(), &scene);
        }
    }

    /// Property: decoding reduces each nibble modulo eight.
    #[test]
    fn decoded_codes_are_nibbles_mod_eight(state in any::<u32>()) {
        let codes = CornerHeights::from_state(state).codes();
        for (i, code) in codes.iter().enumerate() {
            let nibble = (state >> (16 + 4 * i)) & 0xF;
            prop_assert_eq!(u32::from(*code), nibble % 8);
        }
    }
}
