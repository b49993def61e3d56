//! Precomputed liquid surface triangles.
//!
//! The top of a partially filled block is split into two triangles over
//! corners (0, 1, 2) and (2, 3, 0). Each side skirt is a sloped upper
//! triangle under the two corners on that side plus a fixed lower triangle
//! filling the rest of the face. Every combination of corner codes is
//! built once, so intersection only indexes.

use std::sync::OnceLock;

use blockray_core::Facing;
use blockray_geometry::{Aabb, Quad, TableDigest, TableHasher, Triangle, UvRect};
use glam::DVec3;
use tracing::debug;

use crate::state::CornerHeights;

/// Surface height for each corner code; code 0 is the highest.
pub const HEIGHTS: [f64; 8] = [
    14.0 / 16.0,
    12.25 / 16.0,
    10.5 / 16.0,
    8.75 / 16.0,
    7.0 / 16.0,
    5.25 / 16.0,
    3.5 / 16.0,
    1.75 / 16.0,
];

const LEVELS: usize = HEIGHTS.len();

/// UV flip applied to the second triangle of each split face.
const MIRRORED: UvRect = UvRect::new(1.0, 0.0, 1.0, 0.0);

/// Upper and lower triangle of one side face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skirt {
    /// Side of the block this skirt closes.
    pub side: Facing,
    /// Sloped triangle under the two corner heights.
    pub upper: Triangle,
    /// Fixed triangle down to the block floor.
    pub lower: Triangle,
}

/// All liquid geometry, indexed by corner codes.
#[derive(Debug)]
pub struct LiquidTables {
    top_012: Vec<Triangle>,
    top_230: Vec<Triangle>,
    west_upper: Vec<Triangle>,
    west_lower: Vec<Triangle>,
    east_upper: Vec<Triangle>,
    east_lower: Vec<Triangle>,
    south_upper: Vec<Triangle>,
    south_lower: Vec<Triangle>,
    north_upper: Vec<Triangle>,
    north_lower: Vec<Triangle>,
    bottom: Quad,
    full_block: [Quad; 6],
}

fn v(x: f64, y: f64, z: f64) -> DVec3 {
    DVec3::new(x, y, z)
}

fn grid2(f: impl Fn(f64, f64) -> Triangle) -> Vec<Triangle> {
    (0..LEVELS * LEVELS)
        .map(|i| f(HEIGHTS[i / LEVELS], HEIGHTS[i % LEVELS]))
        .collect()
}

fn grid3(f: impl Fn(f64, f64, f64) -> Triangle) -> Vec<Triangle> {
    (0..LEVELS * LEVELS * LEVELS)
        .map(|i| {
            f(
                HEIGHTS[i / (LEVELS * LEVELS)],
                HEIGHTS[i / LEVELS % LEVELS],
                HEIGHTS[i % LEVELS],
            )
        })
        .collect()
}

fn row(f: impl Fn(f64) -> Triangle) -> Vec<Triangle> {
    HEIGHTS.iter().map(|&h| f(h)).collect()
}

fn idx2(a: u8, b: u8) -> usize {
    a as usize * LEVELS + b as usize
}

fn idx3(a: u8, b: u8, c: u8) -> usize {
    (a as usize * LEVELS + b as usize) * LEVELS + c as usize
}

impl LiquidTables {
    /// Build every table. Prefer [`tables`], which does this once.
    pub fn build() -> Self {
        let tables = Self {
            top_012: grid3(|c0, c1, c2| Triangle::new(v(1.0, c1, 1.0), v(1.0, c2, 0.0), v(0.0, c0, 1.0))),
            top_230: grid3(|c2, c3, c0| {
                Triangle::with_uv(v(0.0, c3, 0.0), v(0.0, c0, 1.0), v(1.0, c2, 0.0), MIRRORED)
            }),
            west_upper: grid2(|c0, c3| Triangle::new(v(0.0, c3, 0.0), v(0.0, 0.0, 0.0), v(0.0, c0, 1.0))),
            west_lower: row(|c0| {
                Triangle::with_uv(v(0.0, 0.0, 1.0), v(0.0, c0, 1.0), v(0.0, 0.0, 0.0), MIRRORED)
            }),
            east_upper: grid2(|c1, c2| Triangle::new(v(1.0, c2, 0.0), v(1.0, c1, 1.0), v(1.0, 0.0, 0.0))),
            east_lower: row(|c1| {
                Triangle::with_uv(v(1.0, c1, 1.0), v(1.0, 0.0, 1.0), v(1.0, 0.0, 0.0), MIRRORED)
            }),
            south_upper: grid2(|c0, c1| Triangle::new(v(0.0, c0, 1.0), v(0.0, 0.0, 1.0), v(1.0, c1, 1.0))),
            south_lower: row(|c1| {
                Triangle::with_uv(v(1.0, 0.0, 1.0), v(1.0, c1, 1.0), v(0.0, 0.0, 1.0), MIRRORED)
            }),
            north_upper: grid2(|c2, c3| Triangle::new(v(0.0, c3, 0.0), v(1.0, c2, 0.0), v(0.0, 0.0, 0.0))),
            north_lower: row(|c2| {
                Triangle::with_uv(v(1.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(1.0, c2, 0.0), MIRRORED)
            }),
            bottom: Quad::double_sided(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 0.0, 1.0), UvRect::FULL),
            full_block: Aabb::UNIT.quads().map(Quad::into_double_sided),
        };
        debug!(
            top = tables.top_012.len() + tables.top_230.len(),
            skirts = 4 * (LEVELS * LEVELS + LEVELS),
            "built liquid tables"
        );
        tables
    }

    /// The two top triangles, (0, 1, 2) first.
    pub fn top(&self, corners: CornerHeights) -> [&Triangle; 2] {
        let [c0, c1, c2, c3] = corners.codes();
        [&self.top_012[idx3(c0, c1, c2)], &self.top_230[idx3(c2, c3, c0)]]
    }

    /// Side skirts in west, east, south, north order.
    pub fn skirts(&self, corners: CornerHeights) -> [Skirt; 4] {
        let [c0, c1, c2, c3] = corners.codes();
        [
            Skirt {
                side: Facing::West,
                upper: self.west_upper[idx2(c0, c3)],
                lower: self.west_lower[c0 as usize],
            },
            Skirt {
                side: Facing::East,
                upper: self.east_upper[idx2(c1, c2)],
                lower: self.east_lower[c1 as usize],
            },
            Skirt {
                side: Facing::South,
                upper: self.south_upper[idx2(c0, c1)],
                lower: self.south_lower[c1 as usize],
            },
            Skirt {
                side: Facing::North,
                upper: self.north_upper[idx2(c2, c3)],
                lower: self.north_lower[c2 as usize],
            },
        ]
    }

    /// Floor of a partially filled block.
    pub fn bottom(&self) -> &Quad {
        &self.bottom
    }

    /// Six double-sided quads bounding a completely filled block.
    pub fn full_block(&self) -> &[Quad; 6] {
        &self.full_block
    }

    /// Content hash of every table.
    pub fn digest(&self) -> TableDigest {
        let mut hasher = TableHasher::new();
        for list in [
            &self.top_012,
            &self.top_230,
            &self.west_upper,
            &self.west_lower,
            &self.east_upper,
            &self.east_lower,
            &self.south_upper,
            &self.south_lower,
            &self.north_upper,
            &self.north_lower,
        ] {
            for triangle in list {
                hasher.triangle(triangle);
            }
        }
        hasher.quad(&self.bottom);
        for quad in &self.full_block {
            hasher.quad(quad);
        }
        hasher.finish()
    }
}

/// Process-wide liquid tables, built on first use.
pub fn tables() -> &'static LiquidTables {
    static TABLES: OnceLock<LiquidTables> = OnceLock::new();
    TABLES.get_or_init(LiquidTables::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes() {
        let t = tables();
        assert_eq!(t.top_012.len(), 512);
        assert_eq!(t.top_230.len(), 512);
        assert_eq!(t.west_upper.len(), 64);
        assert_eq!(t.north_lower.len(), 8);
    }

    #[test]
    fn index_order_matches_corner_order() {
        let corners = CornerHeights::new([1, 2, 3, 4]);
        let [t012, t230] = tables().top(corners);
        // (1, c1, 1), (1, c2, 0), (0, c0, 1)
        assert_eq!(t012.vertices()[0].y, HEIGHTS[2]);
        assert_eq!(t012.vertices()[1].y, HEIGHTS[3]);
        assert_eq!(t012.vertices()[2].y, HEIGHTS[1]);
        // (0, c3, 0), (0, c0, 1), (1, c2, 0)
        assert_eq!(t230.vertices()[0].y, HEIGHTS[4]);
        assert_eq!(t230.vertices()[1].y, HEIGHTS[1]);
        assert_eq!(t230.vertices()[2].y, HEIGHTS[3]);
    }

    #[test]
    fn top_normals_point_up() {
        let [a, b] = tables().top(CornerHeights::new([0, 3, 7, 2]));
        assert!(a.normal().y > 0.0);
        assert!(b.normal().y > 0.0);
    }

    #[test]
    fn skirt_normals_point_outward() {
        for skirt in tables().skirts(CornerHeights::new([2, 5, 0, 7])) {
            let outward = match skirt.side {
                Facing::North => -DVec3::Z,
                Facing::South => DVec3::Z,
                Facing::East => DVec3::X,
                Facing::West => -DVec3::X,
            };
            assert!(skirt.upper.normal().dot(outward) > 0.99, "{:?}", skirt.side);
            assert!(skirt.lower.normal().dot(outward) > 0.99, "{:?}", skirt.side);
        }
    }

    #[test]
    fn digest_is_stable_across_builds() {
        assert_eq!(LiquidTables::build().digest(), tables().digest());
    }
}
