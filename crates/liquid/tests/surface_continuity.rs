//! Neighbouring liquid blocks must meet without cracks.
//!
//! A block shares corner codes with the blocks around it, so the top surface
//! and the skirts on a shared edge have to reach the same heights from both
//! sides for every code combination.

use blockray_core::{Ray, TextureId};
use blockray_liquid::{tables, CornerHeights, LiquidState, LiquidSurface, HEIGHTS};
use blockray_testkit::{axis_rays, TestScene};
use glam::DVec3;

const WATER: TextureId = TextureId("water");

fn top_distance(surface: &LiquidSurface, origin: DVec3, corners: CornerHeights) -> f64 {
    let ray = Ray::new(origin, -DVec3::Y);
    surface
        .intersect_top(&ray, corners, &TestScene::new())
        .map(|hit| hit.distance)
        .unwrap_or_else(|| panic!("no top hit from {origin}"))
}

#[test]
fn shared_x_edge_matches_for_every_code_pair() {
    let water = LiquidSurface::water(WATER);
    for a in 0..8u8 {
        for b in 0..8u8 {
            // West block's east edge is corners 1 and 2; the east block's
            // west edge is corners 0 and 3.
            let west = CornerHeights::new([(a + 3) % 8, a, b, (b + 5) % 8]);
            let east = CornerHeights::new([a, (a + 1) % 8, (b + 2) % 8, b]);

            let [w012, _] = tables().top(west);
            let [_, e230] = tables().top(east);
            assert_eq!(w012.vertices()[0].y, e230.vertices()[1].y);
            assert_eq!(w012.vertices()[1].y, e230.vertices()[0].y);

            let west_skirt = tables().skirts(east)[0].upper.vertices();
            let east_skirt = tables().skirts(west)[1].upper.vertices();
            let mut left: Vec<f64> = east_skirt.iter().map(|v| v.y).collect();
            let mut right: Vec<f64> = west_skirt.iter().map(|v| v.y).collect();
            left.sort_by(f64::total_cmp);
            right.sort_by(f64::total_cmp);
            assert_eq!(left, right, "codes ({a}, {b})");

            for z in [0.1, 0.5, 0.9] {
                let near = top_distance(&water, DVec3::new(1.0 - 1e-9, 1.0, z), west);
                let far = top_distance(&water, DVec3::new(1.0 + 1e-9, 1.0, z), east);
                assert!((near - far).abs() < 1e-6, "codes ({a}, {b}) at z = {z}");
            }
        }
    }
}

#[test]
fn shared_z_edge_matches_for_every_code_pair() {
    let water = LiquidSurface::water(WATER);
    for a in 0..8u8 {
        for b in 0..8u8 {
            // North block's south edge is corners 0 and 1; the south block's
            // north edge is corners 3 and 2.
            let north = CornerHeights::new([a, b, (b + 4) % 8, (a + 6) % 8]);
            let south = CornerHeights::new([(a + 1) % 8, (b + 7) % 8, b, a]);

            for x in [0.1, 0.5, 0.9] {
                let near = top_distance(&water, DVec3::new(x, 1.0, 1.0 - 1e-9), north);
                let far = top_distance(&water, DVec3::new(x, 1.0, 1.0 + 1e-9), south);
                assert!((near - far).abs() < 1e-6, "codes ({a}, {b}) at x = {x}");
            }
        }
    }
}

#[test]
fn highest_flat_surface_reaches_fourteen_sixteenths() {
    let corners = CornerHeights::flat(0);
    for triangle in tables().top(corners) {
        for vertex in triangle.vertices() {
            assert_eq!(vertex.y, HEIGHTS[0]);
        }
    }
    for skirt in tables().skirts(corners) {
        let top = skirt
            .upper
            .vertices()
            .iter()
            .chain(skirt.lower.vertices().iter())
            .map(|v| v.y)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(top, HEIGHTS[0], "{:?}", skirt.side);
    }
}

#[test]
fn full_block_hits_are_independent_of_corners() {
    let water = LiquidSurface::water(WATER);
    let scene = TestScene::new();
    let reference = LiquidState {
        corners: CornerHeights::flat(0),
        full_block: true,
    };
    for code in 0..8u8 {
        let state = LiquidState {
            corners: CornerHeights::new([code, 7 - code, code / 2, 3]),
            full_block: true,
        };
        for ray in axis_rays(DVec3::new(0.7, 0.3, 0.45)) {
            assert_eq!(
                water.intersect(&ray, state, &scene),
                water.intersect(&ray, reference, &scene)
            );
        }
    }
}
