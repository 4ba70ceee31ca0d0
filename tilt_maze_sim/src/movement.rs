// Dwell-time movement confirmation.
//
// The player moves by holding the board tilted toward an existing exit for
// longer than the current piece's `dwell_duration`. `PlayerState::advance`
// is called once per poll with the sampled direction and the current tick:
//
//   exit missing              -> Idle, Blocked
//   exit present, Idle        -> Dwelling { since: now }, Holding
//   exit present, Dwelling    -> move if elapsed > dwell_duration, else Holding
//
// While dwelling the machine only checks that *some* valid exit is being
// held, not that it is the same one. Swinging from one open exit to another
// keeps the timer running, and the move goes wherever the board points on
// the tick the timer expires.
//
// See also: `clock.rs` for `elapsed_ticks`, `session.rs` which turns each
// `MoveOutcome` into status output.

use crate::clock::elapsed_ticks;
use crate::graph::MazeGraph;
use crate::types::{Direction, PieceId, Tick};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether a valid direction is currently being held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DwellState {
    Idle,
    Dwelling { since: Tick },
}

/// What one poll of the movement machine decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// No exit in the sampled direction. The dwell timer was reset.
    Blocked,
    /// A valid direction is held but the dwell has not yet expired.
    Holding,
    /// The player moved.
    Moved {
        to: PieceId,
        direction: Direction,
        gold_total: i64,
    },
}

/// The player's position, score and dwell timer for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub current_piece: PieceId,
    pub gold_total: i64,
    pub dwell: DwellState,
    /// Directions of every committed move, oldest first.
    pub path: Vec<Direction>,
}

impl PlayerState {
    pub fn new(start: PieceId) -> Self {
        Self {
            current_piece: start,
            gold_total: 0,
            dwell: DwellState::Idle,
            path: Vec::new(),
        }
    }

    /// Feed one sampled direction at tick `now`.
    pub fn advance(&mut self, graph: &MazeGraph, dir: Direction, now: Tick) -> MoveOutcome {
        let piece = graph.piece(self.current_piece);
        let Some(target) = piece.exit(dir) else {
            self.dwell = DwellState::Idle;
            return MoveOutcome::Blocked;
        };

        let since = match self.dwell {
            DwellState::Idle => {
                debug!(piece = %self.current_piece, direction = %dir, now, "dwell started");
                self.dwell = DwellState::Dwelling { since: now };
                return MoveOutcome::Holding;
            }
            DwellState::Dwelling { since } => since,
        };

        let elapsed = elapsed_ticks(since, now);
        if elapsed <= piece.dwell_duration {
            return MoveOutcome::Holding;
        }

        self.current_piece = target;
        self.gold_total += i64::from(graph.piece(target).gold);
        self.path.push(dir);
        self.dwell = DwellState::Idle;
        debug!(
            to = %target,
            direction = %dir,
            elapsed,
            gold_total = self.gold_total,
            "move committed"
        );
        MoveOutcome::Moved {
            to: target,
            direction: dir,
            gold_total: self.gold_total,
        }
    }
}
