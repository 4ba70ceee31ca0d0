// Player-visible status events and the sink they are written to.
//
// The session reports everything the player should hear about (moves,
// blocked tilts, hints and the final score) as `MazeEvent`s pushed into a
// `StatusSink`. The engine never formats output itself; the `Display` impl
// here gives the console wording, and a sink decides where it goes (stdout
// in the CLI, a `Vec` in tests, a serial console on the board).

use crate::hint::Route;
use crate::types::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A status line for the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazeEvent {
    /// The player moved to a new piece.
    Moved {
        direction: Direction,
        gold_total: i64,
        /// Every direction followed so far, including this one.
        path: Vec<Direction>,
    },
    /// The player tilted toward a wall.
    Blocked { direction: Direction },
    /// The hint policy fired.
    Hint { route: Route },
    /// The player reached the finish.
    Finished { gold_total: i64, max_gold: i32 },
}

impl fmt::Display for MazeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeEvent::Moved {
                gold_total, path, ..
            } => {
                writeln!(f, "You currently have {gold_total} gold with you.")?;
                write!(f, "Directions followed:")?;
                for dir in path {
                    write!(f, " {dir}")?;
                }
                Ok(())
            }
            MazeEvent::Blocked { direction } => write!(f, "Blocked: no way {direction}."),
            MazeEvent::Hint { route } => write!(f, "HINT: {route}"),
            MazeEvent::Finished {
                gold_total,
                max_gold,
            } => {
                writeln!(f, "Congrats you finished the game!")?;
                writeln!(f, "You ended with {gold_total} gold.")?;
                write!(f, "The max gold you can collect is: {max_gold}")
            }
        }
    }
}

/// Destination for status events. Fire-and-forget.
pub trait StatusSink {
    fn emit(&mut self, event: &MazeEvent);
}

impl StatusSink for Vec<MazeEvent> {
    fn emit(&mut self, event: &MazeEvent) {
        self.push(event.clone());
    }
}
