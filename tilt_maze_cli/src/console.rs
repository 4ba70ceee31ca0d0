// Console stand-ins for the board's peripherals.
//
// `StdinSensor` plays the accelerometer: a reader thread parses lines of
// three integers ("x y z", commas also accepted) and the sensor keeps
// returning the most recent one, so a tilt typed once is held until the next
// line, just like a board left tilted. The first poll blocks until a tilt
// arrives. After EOF the last tilt stays held, so piped input plays out
// until the finish or `--max-polls`; EOF before any tilt ends the session.
//
// `ConsoleSink` plays the serial console: every event is printed to stdout,
// followed by a divider after each move.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tilt_maze_sim::event::{MazeEvent, StatusSink};
use tilt_maze_sim::sensor::SensorSource;
use tilt_maze_sim::types::Sample;
use tracing::warn;

const DIVIDER: &str = "------------------------------";

/// Parse "x y z" or "x, y, z". Returns `None` for anything else.
pub fn parse_sample(line: &str) -> Option<Sample> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse::<i32>);
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    let z = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Sample::new(x, y, z))
}

pub struct StdinSensor {
    rx: Receiver<Sample>,
    /// `None` until the first tilt arrives.
    latest: Option<Sample>,
    closed: bool,
}

impl StdinSensor {
    /// Spawn the reader thread.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match parse_sample(trimmed) {
                    Some(sample) => {
                        if tx.send(sample).is_err() {
                            break;
                        }
                    }
                    None => warn!(line = trimmed, "expected three integers: x y z"),
                }
            }
        });
        Self::from_receiver(rx)
    }

    fn from_receiver(rx: Receiver<Sample>) -> Self {
        Self {
            rx,
            latest: None,
            closed: false,
        }
    }
}

impl SensorSource for StdinSensor {
    fn sample(&mut self) -> Option<Sample> {
        if self.latest.is_none() {
            self.latest = Some(self.rx.recv().ok()?);
        }
        while !self.closed {
            match self.rx.try_recv() {
                Ok(sample) => self.latest = Some(sample),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.closed = true,
            }
        }
        self.latest
    }
}

/// Prints events to stdout.
#[derive(Default)]
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn emit(&mut self, event: &MazeEvent) {
        println!("{event}");
        if let MazeEvent::Moved { .. } = event {
            println!("{DIVIDER}");
        }
    }
}
