// Core types shared across the maze engine.
//
// Defines the tick type, piece identifiers, the six travel directions, and
// the raw 3-axis sensor sample. All types derive `Serialize`/`Deserialize`
// so events and configs can be logged or replayed as JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit of the external time base. The counter wraps at `Tick::MAX`.
pub type Tick = u32;

/// Largest representable tick before the counter wraps to zero.
pub const MAX_TICK: Tick = Tick::MAX;

/// Index of a piece within its `MazeGraph`. Assigned sequentially at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

/// A travel direction, one per signed sensor axis.
///
/// The declaration order is significant: it is the exit-slot order used by
/// the map builder and the hint engine's tie-breaking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    XPos,
    XNeg,
    YPos,
    YNeg,
    ZPos,
    ZNeg,
}

impl Direction {
    pub const COUNT: usize = 6;

    /// All directions in exit-slot order.
    pub const ALL: [Direction; Self::COUNT] = [
        Direction::XPos,
        Direction::XNeg,
        Direction::YPos,
        Direction::YNeg,
        Direction::ZPos,
        Direction::ZNeg,
    ];

    /// Exit-slot index of this direction.
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Direction for an exit-slot index. Panics if `slot >= 6`.
    pub fn from_slot(slot: usize) -> Self {
        Self::ALL[slot]
    }

    /// What the player is told to do with the board.
    pub fn label(self) -> &'static str {
        match self {
            Direction::XPos => "Right",
            Direction::XNeg => "Left",
            Direction::YPos => "Forward",
            Direction::YNeg => "Backward",
            Direction::ZPos => "Up",
            Direction::ZNeg => "Down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Sensor sample
// ---------------------------------------------------------------------------

/// A raw 3-axis accelerometer reading, in device units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Sample {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}
