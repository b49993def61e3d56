//! Horizontal facing used as the first component of most block-state keys.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Horizontal direction a block faces or connects toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Toward -Z.
    North,
    /// Toward +X.
    East,
    /// Toward +Z.
    South,
    /// Toward -X.
    West,
}

impl Facing {
    /// All facings in table order.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Parse a block-state `facing` value.
    ///
    /// Unrecognized values fall back to north. Upstream data is tolerated
    /// rather than rejected here; the warning makes bad data visible.
    pub fn from_name(name: &str) -> Self {
        match name {
            "north" => Facing::North,
            "east" => Facing::East,
            "south" => Facing::South,
            "west" => Facing::West,
            other => {
                warn!(facing = other, "unrecognized facing, defaulting to north");
                Facing::North
            }
        }
    }

    /// Position in N, E, S, W order.
    pub fn index(self) -> usize {
        match self {
            Facing::North => 0,
            Facing::East => 1,
            Facing::South => 2,
            Facing::West => 3,
        }
    }

    /// Number of clockwise (viewed from above) quarter turns from north.
    pub fn quarter_turns(self) -> u8 {
        self.index() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_north() {
        assert_eq!(Facing::from_name("sideways"), Facing::North);
        assert_eq!(Facing::from_name("west"), Facing::West);
    }
}
