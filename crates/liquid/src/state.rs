//! Liquid block-state decoding.
//!
//! The world layer packs a liquid block's shape into its 32-bit state word:
//! one 4-bit corner code at bits 16, 20, 24 and 28 (reduced modulo 8) and a
//! full-block flag at bit 12.

use serde::{Deserialize, Serialize};

use crate::tables::HEIGHTS;

/// Bit of the state word set when liquid fills the whole cell.
pub const FULL_BLOCK_BIT: u32 = 12;

const CORNER_SHIFTS: [u32; 4] = [16, 20, 24, 28];

/// Height codes for the four vertical edges of a liquid block.
///
/// Corner 0 sits at `(x, z) = (0, 1)`, corner 1 at `(1, 1)`, corner 2 at
/// `(1, 0)` and corner 3 at `(0, 0)`. Code 0 is the highest level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CornerHeights([u8; 4]);

impl CornerHeights {
    /// Create from four codes.
    ///
    /// # Panics
    ///
    /// If any code is 8 or more.
    pub fn new(codes: [u8; 4]) -> Self {
        assert!(
            codes.iter().all(|&c| (c as usize) < HEIGHTS.len()),
            "corner height codes out of range: {codes:?}"
        );
        Self(codes)
    }

    /// The same code on every corner.
    pub fn flat(code: u8) -> Self {
        Self::new([code; 4])
    }

    /// Decode from a block state word.
    pub fn from_state(state: u32) -> Self {
        Self(CORNER_SHIFTS.map(|shift| ((state >> shift) & 0xF) as u8 % 8))
    }

    /// Encode into the corner bits of a state word.
    pub fn to_state(self) -> u32 {
        self.0
            .iter()
            .zip(CORNER_SHIFTS)
            .fold(0, |acc, (&code, shift)| acc | u32::from(code) << shift)
    }

    /// Raw codes in corner order.
    pub fn codes(self) -> [u8; 4] {
        self.0
    }

    /// Surface height at each corner.
    pub fn heights(self) -> [f64; 4] {
        self.0.map(|c| HEIGHTS[c as usize])
    }
}

/// Everything the surface engine needs from a liquid block's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidState {
    /// Corner height codes.
    pub corners: CornerHeights,
    /// Liquid fills the whole cell; corners are ignored.
    pub full_block: bool,
}

impl LiquidState {
    /// A partially filled block.
    pub fn surface(corners: CornerHeights) -> Self {
        Self {
            corners,
            full_block: false,
        }
    }

    /// A completely filled block.
    pub fn full() -> Self {
        Self {
            corners: CornerHeights::flat(0),
            full_block: true,
        }
    }

    /// Decode from a block state word.
    pub fn from_state(state: u32) -> Self {
        Self {
            corners: CornerHeights::from_state(state),
            full_block: (state >> FULL_BLOCK_BIT) & 1 != 0,
        }
    }

    /// Encode into a block state word.
    pub fn to_state(self) -> u32 {
        self.corners.to_state() | u32::from(self.full_block) << FULL_BLOCK_BIT
    }
}
