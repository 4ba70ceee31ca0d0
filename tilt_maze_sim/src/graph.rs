// Maze graph: map pieces and their directional exits.
//
// The graph is an arena of `Piece`s stored in a `Vec` and addressed by
// `PieceId`. Each piece has six exit slots, one per `Direction`, holding the
// id of the piece that direction leads to. Ids are sequential integers
// assigned in creation order, so the hint engine can keep its bookkeeping in
// plain `Vec`s indexed by id.
//
// The graph is built once by `map_gen.rs` and is read-only during play. No
// piece is ever removed; the whole graph is dropped with its `Session`.
//
// See also: `map_gen.rs` for the two builders, `movement.rs` which follows
// exits, `hint.rs` for the BFS over this graph.

use crate::types::{Direction, PieceId, Tick};
use serde::{Deserialize, Serialize};

/// A node of the maze.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    /// Score delta applied when the player arrives here. Usually negative.
    pub gold: i32,
    /// Ticks a valid direction must be held before leaving this piece.
    pub dwell_duration: Tick,
    /// Exit targets indexed by `Direction::slot()`.
    pub exits: [Option<PieceId>; Direction::COUNT],
}

impl Piece {
    /// Target of the exit in `dir`, if any.
    pub fn exit(&self, dir: Direction) -> Option<PieceId> {
        self.exits[dir.slot()]
    }

    /// Populated exits in slot order.
    pub fn exits(&self) -> impl Iterator<Item = (Direction, PieceId)> + '_ {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.exit(dir).map(|to| (dir, to)))
    }

    pub fn has_any_exit(&self) -> bool {
        self.exits.iter().any(Option::is_some)
    }
}

/// The maze: all pieces plus the designated start and finish.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeGraph {
    pieces: Vec<Piece>,
    start: PieceId,
    finish: PieceId,
}

impl Default for MazeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeGraph {
    /// An empty graph. `start` and `finish` point at id 0 until set; builders
    /// always set both before handing the graph out.
    pub fn new() -> Self {
        Self {
            pieces: Vec::new(),
            start: PieceId(0),
            finish: PieceId(0),
        }
    }

    /// Create a piece with no exits. Returns its id.
    pub fn add_piece(&mut self, gold: i32, dwell_duration: Tick) -> PieceId {
        let id = PieceId(self.pieces.len() as u32);
        self.pieces.push(Piece {
            id,
            gold,
            dwell_duration,
            exits: [None; Direction::COUNT],
        });
        id
    }

    /// Point `from`'s exit in `dir` at `to`, replacing whatever was there.
    pub fn link(&mut self, from: PieceId, dir: Direction, to: PieceId) {
        assert!(
            to.index() < self.pieces.len(),
            "link target {to} is not in the graph"
        );
        self.pieces[from.index()].exits[dir.slot()] = Some(to);
    }

    pub fn set_start(&mut self, id: PieceId) {
        assert!(id.index() < self.pieces.len(), "start {id} is not in the graph");
        self.start = id;
    }

    pub fn set_finish(&mut self, id: PieceId) {
        assert!(id.index() < self.pieces.len(), "finish {id} is not in the graph");
        self.finish = id;
    }

    pub fn start(&self) -> PieceId {
        self.start
    }

    pub fn finish(&self) -> PieceId {
        self.finish
    }

    /// Get a piece by id. Panics on an id from another graph.
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// Target of `from`'s exit in `dir`.
    pub fn exit(&self, from: PieceId, dir: Direction) -> Option<PieceId> {
        self.piece(from).exit(dir)
    }

    /// All pieces in id order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Number of pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// True if any piece other than `finish` has an exit straight into it.
    pub fn finish_has_inbound_exit(&self) -> bool {
        self.pieces
            .iter()
            .filter(|p| p.id != self.finish)
            .any(|p| p.exits.contains(&Some(self.finish)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_piece_assigns_sequential_ids() {
        let mut graph = MazeGraph::new();
        let a = graph.add_piece(0, 10);
        let b = graph.add_piece(-3, 20);
        let c = graph.add_piece(50, 30);
        assert_eq!(a, PieceId(0));
        assert_eq!(b, PieceId(1));
        assert_eq!(c, PieceId(2));
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.piece(b).gold, -3);
        assert_eq!(graph.piece(c).dwell_duration, 30);
    }

    #[test]
    fn new_piece_has_no_exits() {
        let mut graph = MazeGraph::new();
        let a = graph.add_piece(0, 10);
        assert!(!graph.piece(a).has_any_exit());
        for dir in Direction::ALL {
            assert_eq!(graph.exit(a, dir), None);
        }
    }

    #[test]
    fn link_is_directed() {
        let mut graph = MazeGraph::new();
        let a = graph.add_piece(0, 10);
        let b = graph.add_piece(0, 10);
        graph.link(a, Direction::XPos, b);
        assert_eq!(graph.exit(a, Direction::XPos), Some(b));
        assert!(!graph.piece(b).has_any_exit());
    }

    #[test]
    fn link_overwrites_slot() {
        let mut graph = MazeGraph::new();
        let a = graph.add_piece(0, 10);
        let b = graph.add_piece(0, 10);
        let c = graph.add_piece(0, 10);
        graph.link(a, Direction::YNeg, b);
        graph.link(a, Direction::YNeg, c);
        assert_eq!(graph.exit(a, Direction::YNeg), Some(c));
    }

    #[test]
    fn exits_iterate_in_slot_order() {
        let mut graph = MazeGraph::new();
        let a = graph.add_piece(0, 10);
        let b = graph.add_piece(0, 10);
        let c = graph.add_piece(0, 10);
        graph.link(a, Direction::ZNeg, b);
        graph.link(a, Direction::XNeg, c);
        graph.link(a, Direction::YPos, b);
        let exits: Vec<_> = graph.piece(a).exits().collect();
        assert_eq!(
            exits,
            vec![
                (Direction::XNeg, c),
                (Direction::YPos, b),
                (Direction::ZNeg, b),
            ]
        );
    }

    #[test]
    fn finish_inbound_ignores_finish_self_loop() {
        let mut graph = MazeGraph::new();
        let a = graph.add_piece(0, 10);
        let f = graph.add_piece(100, 10);
        graph.set_start(a);
        graph.set_finish(f);
        graph.link(f, Direction::ZPos, f);
        assert!(!graph.finish_has_inbound_exit());
        graph.link(a, Direction::ZNeg, f);
        assert!(graph.finish_has_inbound_exit());
    }

    #[test]
    #[should_panic(expected = "not in the graph")]
    fn link_to_foreign_piece_panics() {
        let mut graph = MazeGraph::new();
        let a = graph.add_piece(0, 10);
        graph.link(a, Direction::XPos, PieceId(9));
    }
}
