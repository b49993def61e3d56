//! Rigid transforms used to derive oriented variants from one authored shape.
//!
//! Quarter turns use integer matrices so that repeated application lands
//! exactly back on the authored coordinates.

use blockray_core::Facing;
use glam::{DAffine3, DMat3, DVec3};

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

/// Right-handed rotation by a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// +90 degrees.
    Quarter,
    /// 180 degrees.
    Half,
    /// -90 degrees (equivalently +270).
    NegQuarter,
}

impl Turn {
    /// Turn equivalent to `quarters` right-handed quarter turns.
    /// Returns `None` for whole revolutions.
    pub fn from_quarters(quarters: i32) -> Option<Self> {
        match quarters.rem_euclid(4) {
            1 => Some(Turn::Quarter),
            2 => Some(Turn::Half),
            3 => Some(Turn::NegQuarter),
            _ => None,
        }
    }

    /// The turn undoing this one.
    pub fn inverse(self) -> Self {
        match self {
            Turn::Quarter => Turn::NegQuarter,
            Turn::Half => Turn::Half,
            Turn::NegQuarter => Turn::Quarter,
        }
    }

    fn quarters(self) -> usize {
        match self {
            Turn::Quarter => 1,
            Turn::Half => 2,
            Turn::NegQuarter => 3,
        }
    }
}

fn quarter_matrix(axis: Axis) -> DMat3 {
    match axis {
        // (x, y, z) -> (x, -z, y)
        Axis::X => DMat3::from_cols(DVec3::X, DVec3::Z, -DVec3::Y),
        // (x, y, z) -> (z, y, -x)
        Axis::Y => DMat3::from_cols(-DVec3::Z, DVec3::Y, DVec3::X),
        // (x, y, z) -> (-y, x, z)
        Axis::Z => DMat3::from_cols(DVec3::Y, -DVec3::X, DVec3::Z),
    }
}

fn turn_matrix(axis: Axis, turn: Turn) -> DMat3 {
    let step = quarter_matrix(axis);
    (1..turn.quarters()).fold(step, |m, _| step * m)
}

fn angle_matrix(axis: Axis, angle: f64) -> DMat3 {
    match axis {
        Axis::X => DMat3::from_rotation_x(angle),
        Axis::Y => DMat3::from_rotation_y(angle),
        Axis::Z => DMat3::from_rotation_z(angle),
    }
}

/// Rigid affine map (rotation plus translation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    affine: DAffine3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Leaves everything in place.
    pub const IDENTITY: Self = Self {
        affine: DAffine3::IDENTITY,
    };

    /// Block centre, the default pivot for rotations.
    pub const BLOCK_CENTER: DVec3 = DVec3::splat(0.5);

    /// Quarter-turn rotation about the block centre.
    pub fn rotation(axis: Axis, turn: Turn) -> Self {
        Self::about(turn_matrix(axis, turn), Self::BLOCK_CENTER)
    }

    /// Rotation by `angle` radians (right-handed) about `pivot`.
    pub fn rotation_about(axis: Axis, angle: f64, pivot: DVec3) -> Self {
        Self::about(angle_matrix(axis, angle), pivot)
    }

    /// Translation by `offset`.
    pub fn translation(offset: DVec3) -> Self {
        Self {
            affine: DAffine3::from_translation(offset),
        }
    }

    /// Rotation taking a north-facing shape to `facing`, about the block
    /// centre. North maps to the identity.
    pub fn facing(facing: Facing) -> Self {
        // Viewed from above, N -> E -> S -> W is clockwise, which is a
        // negative turn about +Y.
        match Turn::from_quarters(-i32::from(facing.quarter_turns())) {
            Some(turn) => Self::rotation(Axis::Y, turn),
            None => Self::IDENTITY,
        }
    }

    fn about(matrix: DMat3, pivot: DVec3) -> Self {
        Self {
            affine: DAffine3::from_translation(pivot)
                * DAffine3::from_mat3(matrix)
                * DAffine3::from_translation(-pivot),
        }
    }

    /// `self` followed by `next`.
    pub fn then(&self, next: &Transform) -> Self {
        Self {
            affine: next.affine * self.affine,
        }
    }

    /// Map a position.
    pub fn point(&self, p: DVec3) -> DVec3 {
        self.affine.transform_point3(p)
    }

    /// Map a direction (edge vectors and normals); translation is ignored.
    pub fn vector(&self, v: DVec3) -> DVec3 {
        self.affine.transform_vector3(v)
    }
}

/// Geometry that can be carried through a [`Transform`].
pub trait Transformable: Sized {
    /// Transformed copy.
    fn transformed(&self, transform: &Transform) -> Self;
}

/// Apply `transform` to every element.
pub fn transform<T: Transformable>(src: &[T], transform: &Transform) -> Vec<T> {
    src.iter().map(|item| item.transformed(transform)).collect()
}

/// Quarter-turn about the block centre.
pub fn rotate<T: Transformable>(src: &[T], axis: Axis, turn: Turn) -> Vec<T> {
    transform(src, &Transform::rotation(axis, turn))
}

/// Arbitrary-angle rotation about `pivot`.
pub fn rotate_about<T: Transformable>(src: &[T], axis: Axis, angle: f64, pivot: DVec3) -> Vec<T> {
    transform(src, &Transform::rotation_about(axis, angle, pivot))
}

/// Translate by `offset`. Normals are unaffected.
pub fn translate<T: Transformable>(src: &[T], offset: DVec3) -> Vec<T> {
    transform(src, &Transform::translation(offset))
}

/// Concatenate in argument order.
pub fn join<T: Clone>(parts: &[&[T]]) -> Vec<T> {
    parts.iter().flat_map(|part| part.iter().cloned()).collect()
}

/// The four horizontal orientations of a north-authored shape, indexed N, E, S, W.
pub fn rotate_y_nesw<T: Transformable>(src: &[T]) -> [Vec<T>; 4] {
    Facing::ALL.map(|facing| transform(src, &Transform::facing(facing)))
}
