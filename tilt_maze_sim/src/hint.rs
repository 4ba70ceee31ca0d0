// Breadth-first route hints.
//
// `HintEngine::find_route` answers "which way should I tilt next to reach the
// finish in the fewest moves?" It runs a plain BFS from the player's piece,
// stopping as soon as the finish is enqueued, then walks the predecessor
// chain back to find the first hop and reports the exit slot that leads to
// it.
//
// Ties between equally short routes are broken by exit-slot order
// (`Direction::ALL`): BFS expands slots in that order, and the final rescan
// of the current piece's exits picks the lowest slot pointing at the first
// hop. The result is a pure function of the graph and the two endpoints.
//
// The engine keeps its mark, predecessor and queue buffers between calls and
// only clears them, since the session may ask for a hint on every poll.
//
// See also: `graph.rs` for the arena being searched, `session.rs` for the
// policy that decides when to ask.

use crate::graph::MazeGraph;
use crate::types::{Direction, PieceId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// The hint engine's answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Tilt this way next.
    Toward(Direction),
    /// No path leads from here to the finish.
    Trap,
    /// Already standing on the finish.
    AtGoal,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Toward(dir) => write!(f, "move {dir}"),
            Route::Trap => f.write_str("no way out from here, you are trapped"),
            Route::AtGoal => f.write_str("you are already at the finish"),
        }
    }
}

/// BFS bookkeeping for one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Initial,
    Waiting,
    Visited,
}

/// Reusable BFS state.
#[derive(Clone, Debug, Default)]
pub struct HintEngine {
    marks: Vec<Mark>,
    came_from: Vec<Option<PieceId>>,
    queue: VecDeque<PieceId>,
}

impl HintEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with buffers pre-sized for a graph of `pieces` pieces.
    pub fn with_capacity(pieces: usize) -> Self {
        Self {
            marks: Vec::with_capacity(pieces),
            came_from: Vec::with_capacity(pieces),
            queue: VecDeque::with_capacity(pieces),
        }
    }

    /// Next direction on a shortest route from `current` to `finish`.
    pub fn find_route(&mut self, graph: &MazeGraph, current: PieceId, finish: PieceId) -> Route {
        if current == finish {
            return Route::AtGoal;
        }
        if !self.search(graph, current, finish) {
            return Route::Trap;
        }

        // Unwind to the piece one hop out of `current`.
        let mut hop = finish;
        while let Some(prev) = self.came_from[hop.index()] {
            if prev == current {
                break;
            }
            hop = prev;
        }

        graph
            .piece(current)
            .exits()
            .find(|&(_, to)| to == hop)
            .map(|(dir, _)| Route::Toward(dir))
            .expect("first hop of a BFS route must be an exit of the start piece")
    }

    /// BFS from `current`. Returns true once `finish` has been enqueued.
    fn search(&mut self, graph: &MazeGraph, current: PieceId, finish: PieceId) -> bool {
        self.reset(graph.len());

        self.marks[current.index()] = Mark::Waiting;
        self.queue.push_back(current);

        while let Some(piece) = self.queue.pop_front() {
            self.marks[piece.index()] = Mark::Visited;
            for (_, to) in graph.piece(piece).exits() {
                if self.marks[to.index()] != Mark::Initial {
                    continue;
                }
                self.marks[to.index()] = Mark::Waiting;
                self.came_from[to.index()] = Some(piece);
                if to == finish {
                    return true;
                }
                self.queue.push_back(to);
            }
        }
        false
    }

    fn reset(&mut self, pieces: usize) {
        self.marks.clear();
        self.marks.resize(pieces, Mark::Initial);
        self.came_from.clear();
        self.came_from.resize(pieces, None);
        self.queue.clear();
    }
}
