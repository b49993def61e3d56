#![warn(missing_docs)]
//! Deterministic testing surfaces: a configurable scene, seeded ray fans and
//! a newline-delimited JSON hit log.

mod hitlog;
mod rays;
mod scene;

use glam::{DVec3, DVec4};

pub use hitlog::*;
pub use rays::*;
pub use scene::*;

/// Assert two vectors agree component-wise within `tolerance`.
#[track_caller]
pub fn assert_vec3_near(actual: DVec3, expected: DVec3, tolerance: f64) {
    assert!(
        actual.abs_diff_eq(expected, tolerance),
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

/// Assert two colors agree component-wise within `tolerance`.
#[track_caller]
pub fn assert_color_near(actual: DVec4, expected: DVec4, tolerance: f64) {
    assert!(
        actual.abs_diff_eq(expected, tolerance),
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}
