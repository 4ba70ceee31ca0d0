// tilt_maze_sim: maze engine for the tilt-controlled maze game.
//
// The player tilts a handheld board; the engine turns each accelerometer
// sample into a direction, moves the player along the maze once a direction
// has been held long enough, keeps score, and computes a shortest-route hint
// when the player is badly lost. Hardware access (sensor, timer interrupt,
// LEDs, console) stays outside: the engine sees samples, tick snapshots and
// a status sink.
//
// Module overview:
// - `types.rs`:     Tick, PieceId, Direction, Sample.
// - `graph.rs`:     MazeGraph, an arena of pieces with six directional exits each.
// - `map_gen.rs`:   Fixed seven-piece maze and the seeded random maze.
// - `direction.rs`: Sample -> Direction (dominant axis, ties toward Z).
// - `clock.rs`:     TickSource, ManualClock, SharedTicks/Ticker, wrap-safe elapsed time.
// - `movement.rs`:  PlayerState and the dwell-time movement machine.
// - `hint.rs`:      HintEngine, BFS next-direction hints.
// - `sensor.rs`:    SensorSource and a scripted replay source.
// - `event.rs`:     MazeEvent status lines and the StatusSink trait.
// - `config.rs`:    MazeConfig (JSON), MapChoice.
// - `error.rs`:     ConfigError.
// - `session.rs`:   Session, one game from start to finish.
// - `prng`:         Re-exported from `tilt_maze_prng`.
//
// **Critical constraint: determinism.** Given the same config, samples and
// tick readings, a session produces the same moves, score and hints. All
// randomness is confined to map generation and comes from the seeded PRNG.

pub mod clock;
pub mod config;
pub mod direction;
pub mod error;
pub mod event;
pub mod graph;
pub mod hint;
pub mod map_gen;
pub mod movement;
pub use tilt_maze_prng as prng;
pub mod sensor;
pub mod session;
pub mod types;
