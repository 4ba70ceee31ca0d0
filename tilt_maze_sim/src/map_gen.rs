// Map construction: the fixed practice maze and the seeded random maze.
//
// Both builders return a `BuiltMap`: a fully linked `MazeGraph` plus the
// bookkeeping the session needs for end-of-game reporting (`max_gold`) and
// the hint policy (`total_pieces`).
//
// Random generation draws every decision from a `MazeRng` seeded by the
// caller, in a fixed order (piece golds and dwell offsets first, then the
// exit coin flips piece by piece, slot by slot, then the repair draw). The
// order is part of the contract: changing it changes every seeded maze.
//
// The random builder guarantees only that `finish` has at least one inbound
// exit from an intermediate piece. It does not check that `start` can reach
// `finish`; some seeds produce unsolvable mazes. The hint engine reports
// those as a trap.
//
// See also: `graph.rs` for the arena being populated, `config.rs` for the
// validated parameters, `session.rs` which calls these at startup.
//
// **Critical constraint: determinism.** All randomness comes from the
// `MazeRng` created here from `RandomMapParams::seed`.

use crate::graph::MazeGraph;
use crate::types::{Direction, PieceId, Tick};
use serde::{Deserialize, Serialize};
use tilt_maze_prng::MazeRng;
use tracing::{info, warn};

/// Number of intermediate pieces in the fixed maze.
const FIXED_INTERMEDIATES: usize = 5;

/// Gold awarded by the fixed maze's finish piece.
const FIXED_FINISH_GOLD: i32 = 100;

/// Gold penalties are drawn from `[0, GOLD_PENALTY_RANGE)` and negated.
const GOLD_PENALTY_RANGE: u32 = 10;

/// A constructed maze ready for play.
#[derive(Clone, Debug)]
pub struct BuiltMap {
    pub graph: MazeGraph,
    /// Gold of the finish piece, reported when the game ends.
    pub max_gold: i32,
    /// Number of pieces including start and finish.
    pub total_pieces: usize,
}

/// Inputs to the random builder. Expected to be validated already (see
/// `MazeConfig::validate`): `piece_count >= 3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomMapParams {
    pub seed: u64,
    pub piece_count: u32,
    /// Dwell offsets are drawn from `[0, duration_deviation)`. Zero means
    /// every piece uses `base_duration` exactly.
    pub duration_deviation: Tick,
    pub finish_gold: i32,
    pub base_duration: Tick,
}

/// Build the hand-authored seven-piece maze.
///
/// ```text
/// start --YPos--> a0 --XPos--> a1 --ZPos--> a3 --YNeg--> a4 --ZNeg--> finish
/// start --ZNeg--> finish
/// a0 --XNeg--> a2 --XPos--> a0
/// ```
///
/// Gold: start 0, a0..a4 = -5, -7, -2, -1, -10, finish 100.
pub fn build_fixed_map(base_duration: Tick) -> BuiltMap {
    let mut graph = MazeGraph::new();

    let start = graph.add_piece(0, base_duration);
    let golds: [i32; FIXED_INTERMEDIATES] = [-5, -7, -2, -1, -10];
    let a: Vec<PieceId> = golds
        .iter()
        .map(|&gold| graph.add_piece(gold, base_duration))
        .collect();
    let finish = graph.add_piece(FIXED_FINISH_GOLD, base_duration);

    graph.link(start, Direction::YPos, a[0]);
    graph.link(start, Direction::ZNeg, finish);
    graph.link(a[0], Direction::XPos, a[1]);
    graph.link(a[0], Direction::XNeg, a[2]);
    graph.link(a[1], Direction::ZPos, a[3]);
    graph.link(a[2], Direction::XPos, a[0]);
    graph.link(a[3], Direction::YNeg, a[4]);
    graph.link(a[4], Direction::ZNeg, finish);

    graph.set_start(start);
    graph.set_finish(finish);

    info!(pieces = graph.len(), "built fixed maze");

    BuiltMap {
        total_pieces: graph.len(),
        graph,
        max_gold: FIXED_FINISH_GOLD,
    }
}

/// Build a random maze from `params`.
///
/// Layout:
/// 1. `start` (gold 0), then `piece_count - 2` intermediates with gold in
///    `(-10, 0]` and dwell `base + [0, deviation)`, then `finish`.
/// 2. `start` exits `YPos` to the first intermediate and `ZNeg` to `finish`.
/// 3. Each intermediate slot gets an exit on a coin flip. The target is a
///    random intermediate; drawing the piece itself redirects to `finish`.
///    A piece that reaches its last slot with no exit is given one there.
/// 4. If no intermediate exit landed on `finish`, one random slot of one
///    random intermediate is overwritten to point at it.
pub fn build_random_map(params: &RandomMapParams) -> BuiltMap {
    assert!(
        params.piece_count >= 3,
        "random maze needs at least 3 pieces, got {}",
        params.piece_count
    );
    let mut rng = MazeRng::new(params.seed);
    let mut graph = MazeGraph::new();
    let n = params.piece_count - 2;

    // --- 1. Pieces ---
    let start = graph.add_piece(0, params.base_duration);
    let mut mid: Vec<PieceId> = Vec::with_capacity(n as usize);
    for _ in 0..n {
        let gold = -(rng.below(GOLD_PENALTY_RANGE) as i32);
        let offset = if params.duration_deviation > 0 {
            rng.below(params.duration_deviation)
        } else {
            0
        };
        mid.push(graph.add_piece(gold, params.base_duration.saturating_add(offset)));
    }
    let finish = graph.add_piece(params.finish_gold, params.base_duration);
    graph.set_start(start);
    graph.set_finish(finish);

    // --- 2. Start links ---
    graph.link(start, Direction::ZNeg, finish);
    graph.link(start, Direction::YPos, mid[0]);

    // --- 3. Intermediate exits ---
    let mut reaches_finish = false;
    for (i, &piece) in mid.iter().enumerate() {
        let mut has_exit = false;
        for dir in Direction::ALL {
            if rng.coin() {
                let (target, is_finish) = pick_target(&mut rng, i, &mid, finish);
                graph.link(piece, dir, target);
                reaches_finish |= is_finish;
                has_exit = true;
            }
            if dir == Direction::ZNeg && !has_exit {
                let (target, is_finish) = pick_target(&mut rng, i, &mid, finish);
                graph.link(piece, dir, target);
                reaches_finish |= is_finish;
            }
        }
    }

    // --- 4. Repair ---
    if !reaches_finish {
        let p = rng.below(n) as usize;
        let dir = Direction::from_slot(rng.index(Direction::COUNT));
        warn!(
            seed = params.seed,
            piece = %mid[p],
            direction = %dir,
            "no exit reached finish, forcing one"
        );
        graph.link(mid[p], dir, finish);
    }

    info!(
        seed = params.seed,
        pieces = graph.len(),
        finish_gold = params.finish_gold,
        "built random maze"
    );

    BuiltMap {
        graph,
        max_gold: params.finish_gold,
        total_pieces: params.piece_count as usize,
    }
}

/// Draw an exit target for intermediate `i`. Drawing `i` itself yields
/// `finish` instead, so the generator never creates a self-loop.
fn pick_target(
    rng: &mut MazeRng,
    i: usize,
    mid: &[PieceId],
    finish: PieceId,
) -> (PieceId, bool) {
    let t = rng.index(mid.len());
    if t == i {
        (finish, true)
    } else {
        (mid[t], false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tick;

    const BASE: Tick = 3000;

    fn params(seed: u64, piece_count: u32) -> RandomMapParams {
        RandomMapParams {
            seed,
            piece_count,
            duration_deviation: 500,
            finish_gold: 100,
            base_duration: BASE,
        }
    }

    #[test]
    fn fixed_map_shape() {
        let map = build_fixed_map(BASE);
        let g = &map.graph;
        assert_eq!(map.total_pieces, 7);
        assert_eq!(map.max_gold, 100);
        assert_eq!(g.start(), PieceId(0));
        assert_eq!(g.finish(), PieceId(6));

        let golds: Vec<i32> = g.pieces().iter().map(|p| p.gold).collect();
        assert_eq!(golds, vec![0, -5, -7, -2, -1, -10, 100]);
        assert!(g.pieces().iter().all(|p| p.dwell_duration == BASE));

        assert_eq!(g.exit(PieceId(0), Direction::YPos), Some(PieceId(1)));
        assert_eq!(g.exit(PieceId(0), Direction::ZNeg), Some(PieceId(6)));
        assert_eq!(g.exit(PieceId(1), Direction::XPos), Some(PieceId(2)));
        assert_eq!(g.exit(PieceId(1), Direction::XNeg), Some(PieceId(3)));
        assert_eq!(g.exit(PieceId(2), Direction::ZPos), Some(PieceId(4)));
        assert_eq!(g.exit(PieceId(3), Direction::XPos), Some(PieceId(1)));
        assert_eq!(g.exit(PieceId(4), Direction::YNeg), Some(PieceId(5)));
        assert_eq!(g.exit(PieceId(5), Direction::ZNeg), Some(PieceId(6)));
        assert!(!g.piece(g.finish()).has_any_exit());

        let exit_count: usize = g.pieces().iter().map(|p| p.exits().count()).sum();
        assert_eq!(exit_count, 8);
    }

    #[test]
    fn random_map_piece_layout() {
        let map = build_random_map(&params(11, 12));
        let g = &map.graph;
        assert_eq!(map.total_pieces, 12);
        assert_eq!(g.len(), 12);
        assert_eq!(map.max_gold, 100);
        assert_eq!(g.start(), PieceId(0));
        assert_eq!(g.finish(), PieceId(11));
        assert_eq!(g.piece(g.start()).gold, 0);
        assert_eq!(g.piece(g.finish()).gold, 100);
        assert_eq!(g.piece(g.start()).dwell_duration, BASE);
        assert_eq!(g.piece(g.finish()).dwell_duration, BASE);

        for piece in &g.pieces()[1..11] {
            assert!((-9..=0).contains(&piece.gold), "gold {}", piece.gold);
            assert!(
                (BASE..BASE + 500).contains(&piece.dwell_duration),
                "dwell {}",
                piece.dwell_duration
            );
        }
    }

    #[test]
    fn random_map_start_links() {
        for seed in 0..20 {
            let map = build_random_map(&params(seed, 8));
            let g = &map.graph;
            assert_eq!(g.exit(g.start(), Direction::YPos), Some(PieceId(1)));
            assert_eq!(g.exit(g.start(), Direction::ZNeg), Some(g.finish()));
            assert_eq!(g.piece(g.start()).exits().count(), 2);
        }
    }

    #[test]
    fn random_map_invariants_hold_across_seeds() {
        for seed in 0..200 {
            let map = build_random_map(&params(seed, 3 + (seed % 10) as u32));
            let g = &map.graph;
            let finish = g.finish();
            assert!(g.finish_has_inbound_exit(), "seed {seed}: finish unreachable by any exit");
            assert!(!g.piece(finish).has_any_exit(), "seed {seed}: finish has exits");
            for piece in &g.pieces()[1..g.len() - 1] {
                assert!(piece.has_any_exit(), "seed {seed}: {} has no exit", piece.id);
                for (_, to) in piece.exits() {
                    assert_ne!(to, piece.id, "seed {seed}: self-loop on {}", piece.id);
                    assert_ne!(to, g.start(), "seed {seed}: exit back to start");
                }
            }
        }
    }

    #[test]
    fn zero_deviation_uses_base_duration() {
        let map = build_random_map(&RandomMapParams {
            duration_deviation: 0,
            ..params(5, 9)
        });
        assert!(map.graph.pieces().iter().all(|p| p.dwell_duration == BASE));
    }

    #[test]
    fn three_pieces_always_link_middle_to_finish() {
        // With one intermediate every drawn target is the piece itself, so
        // every exit it gets is redirected to finish.
        for seed in 0..50 {
            let map = build_random_map(&params(seed, 3));
            let g = &map.graph;
            let mid = g.piece(PieceId(1));
            assert!(mid.has_any_exit());
            assert!(mid.exits().all(|(_, to)| to == g.finish()));
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = build_random_map(&params(1234, 20));
        let b = build_random_map(&params(1234, 20));
        assert_eq!(a.graph, b.graph);
    }

    #[test]
    fn different_seeds_differ() {
        let a = build_random_map(&params(1, 20));
        let b = build_random_map(&params(2, 20));
        assert_ne!(a.graph, b.graph);
    }

    #[test]
    #[should_panic(expected = "at least 3 pieces")]
    fn two_pieces_is_rejected() {
        build_random_map(&params(1, 2));
    }
}
