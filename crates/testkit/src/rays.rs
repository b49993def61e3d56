//! Seeded ray generators.
//!
//! Every generated ray starts on the surface of the unit block and points
//! into it, which is where a traversal hands a ray to a block model.

use blockray_core::Ray;
use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `count` rays from random directions aimed at random points inside the
/// unit block. Identical seeds produce identical fans.
pub fn ray_fan(seed: u64, count: usize) -> Vec<Ray> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let start = DVec3::splat(0.5) + unit_vector(&mut rng) * 2.0;
            let target = DVec3::new(rng.gen(), rng.gen(), rng.gen());
            enter_block(start, target)
        })
        .collect()
}

/// Rays along the six axes, each aimed at `target` from outside the block.
pub fn axis_rays(target: DVec3) -> [Ray; 6] {
    let dirs = [
        DVec3::X,
        -DVec3::X,
        DVec3::Y,
        -DVec3::Y,
        DVec3::Z,
        -DVec3::Z,
    ];
    dirs.map(|d| enter_block(target - d * 2.0, target))
}

/// Ray from `from` toward `target`, moved forward to where it enters the
/// unit block. `target` must lie inside the block.
pub fn enter_block(from: DVec3, target: DVec3) -> Ray {
    let ray = Ray::new(from, target - from);
    let mut t_near = 0.0f64;
    for axis in 0..3 {
        let d = ray.direction[axis];
        if d == 0.0 {
            continue;
        }
        let t1 = (0.0 - from[axis]) / d;
        let t2 = (1.0 - from[axis]) / d;
        t_near = t_near.max(t1.min(t2));
    }
    ray.advanced(t_near)
}

fn unit_vector(rng: &mut StdRng) -> DVec3 {
    loop {
        let v = DVec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len2 = v.length_squared();
        if len2 > 1e-6 && len2 <= 1.0 {
            return v / len2.sqrt();
        }
    }
}
