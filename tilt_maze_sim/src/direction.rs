// Tilt-to-direction mapping.
//
// The axis with the largest magnitude picks the direction family and its
// sign picks positive or negative. The comparison is nested, not symmetric:
// X is only considered when it strictly beats Y, and whichever of X/Y
// survives must strictly beat Z. Every tie therefore lands on Z. Boards in
// the field rely on this (a flat board with equal X/Y noise reads as
// Up/Down), so keep the structure exactly as written.

use crate::types::{Direction, Sample};

/// Map a sensor sample to the direction the player is tilting.
pub fn extract_direction(sample: Sample) -> Direction {
    let x = sample.x.unsigned_abs();
    let y = sample.y.unsigned_abs();
    let z = sample.z.unsigned_abs();
    if x > y {
        if x > z {
            signed(sample.x, Direction::XPos, Direction::XNeg)
        } else {
            signed(sample.z, Direction::ZPos, Direction::ZNeg)
        }
    } else if y > z {
        signed(sample.y, Direction::YPos, Direction::YNeg)
    } else {
        signed(sample.z, Direction::ZPos, Direction::ZNeg)
    }
}

/// Zero counts as positive.
fn signed(v: i32, pos: Direction, neg: Direction) -> Direction {
    if v >= 0 { pos } else { neg }
}
