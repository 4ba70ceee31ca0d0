// CLI entry point for the tilt maze.
//
// Runs one game on the console. A background ticker advances the shared
// tick counter at `tick_duration_ms`; the main thread polls the sensor every
// `poll_interval_ms` and prints status events as they happen. The sensor is
// either stdin (type "x y z" lines, each held until the next) or a JSON
// script replayed poll by poll. See `console.rs` for both console devices.
//
// Usage:
//   tilt_maze [OPTIONS]
//     --config <PATH>         JSON MazeConfig (default: built-in defaults)
//     --random <N>            Play a random maze with N pieces
//     --deviation <TICKS>     Random maze dwell deviation (default: 1000)
//     --finish-gold <G>       Random maze finish reward (default: 100)
//     --seed <SEED>           Random maze seed (default: 0)
//     --script <PATH>         Replay samples from a JSON script instead of stdin
//     --max-polls <N>         Stop after N polls
//     --print-map             Print the built maze as JSON and exit
//
// Log verbosity follows RUST_LOG (default: warn).

mod console;

use std::path::PathBuf;
use std::time::Duration;

use tilt_maze_sim::clock::{SharedTicks, Ticker};
use tilt_maze_sim::config::{MapChoice, MazeConfig};
use tilt_maze_sim::sensor::{ScriptedSensor, SensorSource};
use tilt_maze_sim::session::{RunLimits, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

use console::{ConsoleSink, StdinSensor};

#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    random_pieces: Option<u32>,
    deviation: Option<u32>,
    finish_gold: Option<i32>,
    seed: Option<u64>,
    script: Option<PathBuf>,
    max_polls: Option<u64>,
    print_map: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = parse_args();
    let config = resolve_config(&options).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    let mut session = Session::from_config(&config).unwrap_or_else(|e| {
        eprintln!("Invalid config: {e}");
        std::process::exit(1);
    });

    if options.print_map {
        match serde_json::to_string_pretty(session.graph()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize map: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let mut sensor: Box<dyn SensorSource> = match &options.script {
        Some(path) => {
            let json = std::fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Failed to read {}: {e}", path.display());
                std::process::exit(1);
            });
            let script = ScriptedSensor::from_json(&json).unwrap_or_else(|e| {
                eprintln!("Invalid script {}: {e}", path.display());
                std::process::exit(1);
            });
            info!(path = %path.display(), polls = script.remaining(), "loaded sensor script");
            Box::new(script)
        }
        None => {
            println!("Tilt with lines of \"x y z\". Each tilt is held until the next line.");
            println!("Waiting for the first tilt...");
            Box::new(StdinSensor::spawn())
        }
    };

    println!(
        "Maze of {} pieces. Reach the finish with as much gold as you can.",
        session.total_pieces()
    );

    let ticks = SharedTicks::new();
    let ticker = Ticker::start(
        ticks.clone(),
        Duration::from_millis(u64::from(config.tick_duration_ms)),
    );
    let limits = RunLimits {
        max_polls: options.max_polls,
        poll_interval: Duration::from_millis(u64::from(config.poll_interval_ms)),
    };
    let summary = session.run(sensor.as_mut(), &ticks, &mut ConsoleSink, limits);
    ticker.stop();

    info!(polls = summary.polls, finished = summary.finished, "session ended");
    if !summary.finished {
        println!(
            "Stopped after {} polls with {} gold, short of the finish.",
            summary.polls, summary.gold_total
        );
    }
}

/// Load the config file if one was given, then apply the random-maze flags.
fn resolve_config(options: &CliOptions) -> Result<MazeConfig, String> {
    let mut config = match &options.config {
        Some(path) => MazeConfig::load(path).map_err(|e| e.to_string())?,
        None => MazeConfig::default(),
    };

    if let Some(piece_count) = options.random_pieces {
        let (duration_deviation, finish_gold, seed) = match config.map {
            MapChoice::Random {
                duration_deviation,
                finish_gold,
                seed,
                ..
            } => (duration_deviation, finish_gold, seed),
            MapChoice::Fixed => (1000, 100, 0),
        };
        config.map = MapChoice::Random {
            piece_count,
            duration_deviation: options.deviation.unwrap_or(duration_deviation),
            finish_gold: options.finish_gold.unwrap_or(finish_gold),
            seed: options.seed.unwrap_or(seed),
        };
    } else if options.deviation.is_some()
        || options.finish_gold.is_some()
        || options.seed.is_some()
    {
        return Err("--deviation, --finish-gold and --seed need --random <N>".to_string());
    }

    Ok(config)
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching.
fn parse_args() -> CliOptions {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from(&args[1..])
}

fn parse_args_from(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                options.config = Some(PathBuf::from(required(args, i, "--config")));
            }
            "--random" => {
                i += 1;
                options.random_pieces = Some(parse_number(args, i, "--random"));
            }
            "--deviation" => {
                i += 1;
                options.deviation = Some(parse_number(args, i, "--deviation"));
            }
            "--finish-gold" => {
                i += 1;
                options.finish_gold = Some(parse_number(args, i, "--finish-gold"));
            }
            "--seed" => {
                i += 1;
                options.seed = Some(parse_number(args, i, "--seed"));
            }
            "--script" => {
                i += 1;
                options.script = Some(PathBuf::from(required(args, i, "--script")));
            }
            "--max-polls" => {
                i += 1;
                options.max_polls = Some(parse_number(args, i, "--max-polls"));
            }
            "--print-map" => options.print_map = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    options
}

fn required<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    args.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("{flag} requires a value");
        std::process::exit(1);
    })
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        eprintln!("{flag} requires a valid number");
        std::process::exit(1);
    })
}

fn print_usage() {
    println!("Usage: tilt_maze [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <PATH>         JSON config (default: built-in defaults)");
    println!("  --random <N>            Play a random maze with N pieces");
    println!("  --deviation <TICKS>     Random maze dwell deviation (default: 1000)");
    println!("  --finish-gold <G>       Random maze finish reward (default: 100)");
    println!("  --seed <SEED>           Random maze seed (default: 0)");
    println!("  --script <PATH>         Replay samples from a JSON script instead of stdin");
    println!("  --max-polls <N>         Stop after N polls");
    println!("  --print-map             Print the built maze as JSON and exit");
    println!("  --help, -h              Show this help");
    println!();
    println!("Set RUST_LOG=debug to trace dwell timers and moves.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilt_maze_sim::clock::{ManualClock, TickSource};
    use tilt_maze_sim::event::MazeEvent;
    use tilt_maze_sim::types::Direction;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_flags_plays_the_fixed_maze() {
        let options = parse_args_from(&[]);
        let config = resolve_config(&options).unwrap();
        assert_eq!(config, MazeConfig::default());
    }

    #[test]
    fn random_flags_build_a_random_choice() {
        let options = parse_args_from(&args(&[
            "--random", "12", "--seed", "99", "--finish-gold", "250", "--max-polls", "40",
        ]));
        assert_eq!(options.max_polls, Some(40));
        let config = resolve_config(&options).unwrap();
        assert_eq!(
            config.map,
            MapChoice::Random {
                piece_count: 12,
                duration_deviation: 1000,
                finish_gold: 250,
                seed: 99,
            }
        );
    }

    #[test]
    fn seed_without_random_is_rejected() {
        let options = parse_args_from(&args(&["--seed", "5"]));
        assert!(resolve_config(&options).is_err());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let options = parse_args_from(&args(&["--config", "/nonexistent/maze.json"]));
        let err = resolve_config(&options).unwrap_err();
        assert!(err.contains("/nonexistent/maze.json"), "{err}");
    }

    #[test]
    fn demo_script_parses() {
        let json = include_str!("../../demos/fixed_shortcut.json");
        let script = ScriptedSensor::from_json(json).unwrap();
        assert!(script.remaining() > 0);
    }

    /// Replay a demo script on the default fixed maze, `ticks_per_poll`
    /// ticks apart, as the CLI would with a 1 ms tick and 10 ms poll.
    fn replay(json: &str, ticks_per_poll: u32) -> Session {
        let mut sensor = ScriptedSensor::from_json(json).unwrap();
        let mut session = Session::from_config(&MazeConfig::default()).unwrap();
        let clock = ManualClock::new(0);
        let mut sink = Vec::<MazeEvent>::new();
        while let Some(sample) = sensor.sample() {
            session.step(sample, clock.now(), &mut sink);
            clock.advance(ticks_per_poll);
        }
        session
    }

    #[test]
    fn shortcut_demo_reaches_finish() {
        let session = replay(include_str!("../../demos/fixed_shortcut.json"), 10);
        assert!(session.is_finished());
        assert_eq!(session.gold_total(), 100);
        assert_eq!(session.path(), &[Direction::ZNeg]);
    }

    #[test]
    fn long_way_demo_visits_every_piece() {
        let session = replay(include_str!("../../demos/fixed_long_way.json"), 10);
        assert!(session.is_finished());
        assert_eq!(session.gold_total(), 77);
        assert_eq!(
            session.path(),
            &[
                Direction::YPos,
                Direction::XPos,
                Direction::ZPos,
                Direction::YNeg,
                Direction::ZNeg,
            ]
        );
    }

    #[test]
    fn demo_config_loads() {
        let config = MazeConfig::from_json(include_str!("../../demos/random_maze.json")).unwrap();
        assert!(matches!(config.map, MapChoice::Random { piece_count: 12, .. }));
    }
}
