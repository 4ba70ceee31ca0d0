// One game from start piece to finish.
//
// `Session` owns everything a game needs: the maze, the player's state, the
// hint engine's buffers and the hint policy. The host loop calls `step` once
// per poll with a fresh sensor sample and tick snapshot, or hands the whole
// loop to `run`. Nothing here is global, so tests can run any number of
// sessions side by side.
//
// ## One poll
//
//   1. Sample -> direction (`direction.rs`).
//   2. Direction + tick -> movement machine (`movement.rs`).
//   3. Status indicator: Blocked / Clear / Finished.
//   4. On arrival at the finish, report the score and stop accepting input.
//   5. Otherwise, if the player has lost more than `deficit_factor` gold per
//      piece, ask the hint engine for the next direction.
//
// Events go to the caller's `StatusSink`. A blocked tilt is announced when
// the player first hits the wall, not on every poll while they stay there,
// and a hint is announced only when it differs from the last one announced
// since the player's most recent move.
//
// See also: `config.rs` for `MazeConfig`, `event.rs` for `MazeEvent`,
// `clock.rs` and `sensor.rs` for the collaborators `run` polls.

use crate::clock::TickSource;
use crate::config::MazeConfig;
use crate::direction::extract_direction;
use crate::error::ConfigError;
use crate::event::{MazeEvent, StatusSink};
use crate::graph::MazeGraph;
use crate::hint::{HintEngine, Route};
use crate::map_gen::BuiltMap;
use crate::movement::{MoveOutcome, PlayerState};
use crate::sensor::SensorSource;
use crate::types::{Direction, PieceId, Sample, Tick};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use tracing::info;

/// When to volunteer a hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintPolicy {
    /// Hint once `|gold_total| > deficit_factor * total_pieces`. Zero never
    /// hints.
    pub deficit_factor: i64,
}

impl HintPolicy {
    pub fn never() -> Self {
        Self { deficit_factor: 0 }
    }

    pub fn should_hint(&self, gold_total: i64, total_pieces: usize) -> bool {
        self.deficit_factor > 0
            && gold_total.abs() > self.deficit_factor.saturating_mul(total_pieces as i64)
    }
}

/// Status light state. Red, green and blue on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Indicator {
    Clear,
    Blocked,
    Finished,
}

/// What one poll did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub direction: Direction,
    pub outcome: MoveOutcome,
    pub indicator: Indicator,
    /// Route computed this poll, if the hint policy fired.
    pub hint: Option<Route>,
}

/// Bounds for `Session::run`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunLimits {
    /// Stop after this many polls. `None` runs until the finish or until the
    /// sensor runs dry.
    pub max_polls: Option<u64>,
    /// Sleep between polls. Zero polls as fast as possible.
    pub poll_interval: Duration,
}

/// How a `run` ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub polls: u64,
    pub finished: bool,
    pub gold_total: i64,
}

pub struct Session {
    graph: MazeGraph,
    player: PlayerState,
    hints: HintEngine,
    policy: HintPolicy,
    max_gold: i32,
    total_pieces: usize,
    indicator: Indicator,
    last_hint: Option<Route>,
}

impl Session {
    /// Start a session on an already built map.
    pub fn new(map: BuiltMap, policy: HintPolicy) -> Self {
        let player = PlayerState::new(map.graph.start());
        let hints = HintEngine::with_capacity(map.graph.len());
        Self {
            graph: map.graph,
            player,
            hints,
            policy,
            max_gold: map.max_gold,
            total_pieces: map.total_pieces,
            indicator: Indicator::Clear,
            last_hint: None,
        }
    }

    /// Validate `config`, build its map and start a session on it.
    pub fn from_config(config: &MazeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let policy = HintPolicy {
            deficit_factor: config.hint_deficit_factor,
        };
        Ok(Self::new(config.build_map(), policy))
    }

    /// Process one poll. Returns `None` once the player has finished; later
    /// samples are ignored.
    pub fn step(
        &mut self,
        sample: Sample,
        now: Tick,
        sink: &mut dyn StatusSink,
    ) -> Option<StepReport> {
        if self.is_finished() {
            return None;
        }

        let direction = extract_direction(sample);
        let outcome = self.player.advance(&self.graph, direction, now);

        let was_blocked = self.indicator == Indicator::Blocked;
        self.indicator = match outcome {
            MoveOutcome::Blocked => Indicator::Blocked,
            _ => Indicator::Clear,
        };

        match outcome {
            MoveOutcome::Blocked if !was_blocked => {
                sink.emit(&MazeEvent::Blocked { direction });
            }
            MoveOutcome::Moved { gold_total, to, .. } => {
                self.last_hint = None;
                info!(piece = %to, %direction, gold_total, "player moved");
                sink.emit(&MazeEvent::Moved {
                    direction,
                    gold_total,
                    path: self.player.path.clone(),
                });
            }
            _ => {}
        }

        if self.is_finished() {
            self.indicator = Indicator::Finished;
            info!(
                gold_total = self.player.gold_total,
                max_gold = self.max_gold,
                moves = self.player.path.len(),
                "maze finished"
            );
            sink.emit(&MazeEvent::Finished {
                gold_total: self.player.gold_total,
                max_gold: self.max_gold,
            });
            return Some(StepReport {
                direction,
                outcome,
                indicator: self.indicator,
                hint: None,
            });
        }

        let hint = if self.policy.should_hint(self.player.gold_total, self.total_pieces) {
            let route = self.hint();
            if self.last_hint != Some(route) {
                info!(piece = %self.player.current_piece, %route, "hint");
                sink.emit(&MazeEvent::Hint { route });
                self.last_hint = Some(route);
            }
            Some(route)
        } else {
            None
        };

        Some(StepReport {
            direction,
            outcome,
            indicator: self.indicator,
            hint,
        })
    }

    /// Poll `sensor` until the finish, the sensor runs dry, or the poll limit
    /// is hit.
    pub fn run<S, T>(
        &mut self,
        sensor: &mut S,
        ticks: &T,
        sink: &mut dyn StatusSink,
        limits: RunLimits,
    ) -> RunSummary
    where
        S: SensorSource + ?Sized,
        T: TickSource + ?Sized,
    {
        let mut polls = 0;
        while !self.is_finished() && limits.max_polls.is_none_or(|max| polls < max) {
            let Some(sample) = sensor.sample() else {
                break;
            };
            self.step(sample, ticks.now(), sink);
            polls += 1;
            if !limits.poll_interval.is_zero() {
                thread::sleep(limits.poll_interval);
            }
        }
        RunSummary {
            polls,
            finished: self.is_finished(),
            gold_total: self.player.gold_total,
        }
    }

    /// Shortest-route hint from the current piece.
    pub fn hint(&mut self) -> Route {
        self.hints
            .find_route(&self.graph, self.player.current_piece, self.graph.finish())
    }

    pub fn is_finished(&self) -> bool {
        self.player.current_piece == self.graph.finish()
    }

    pub fn current_piece(&self) -> PieceId {
        self.player.current_piece
    }

    pub fn gold_total(&self) -> i64 {
        self.player.gold_total
    }

    /// Directions of every move so far.
    pub fn path(&self) -> &[Direction] {
        &self.player.path
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn graph(&self) -> &MazeGraph {
        &self.graph
    }

    pub fn max_gold(&self) -> i32 {
        self.max_gold
    }

    pub fn total_pieces(&self) -> usize {
        self.total_pieces
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }
}
