// Tick sources and wrap-safe elapsed time.
//
// The engine never owns time. It reads snapshots of a counter that something
// else advances: a hardware timer on the board, a `Ticker` thread in the CLI,
// or a `ManualClock` in tests. All of them sit behind `TickSource`.
//
// The counter is a `u32` and wraps. `SharedTicks` stores it in an
// `AtomicU32` so a reader always sees a whole value; the writer only ever
// increments, so `Relaxed` ordering is enough.

use crate::types::{MAX_TICK, Tick};
use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

/// Anything that can report the current tick.
pub trait TickSource {
    fn now(&self) -> Tick;
}

/// Ticks between `since` and `now`, tolerating one wrap of the counter.
///
/// A wrapped reading is measured as `now + (MAX_TICK - since)`, which is one
/// tick short of true modular distance. Dwell thresholds are calibrated
/// against this, so it stays.
pub fn elapsed_ticks(since: Tick, now: Tick) -> Tick {
    if now >= since {
        now - since
    } else {
        now + (MAX_TICK - since)
    }
}

// ---------------------------------------------------------------------------
// Manual clock (tests, replays)
// ---------------------------------------------------------------------------

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Tick>,
}

impl ManualClock {
    pub fn new(start: Tick) -> Self {
        Self { now: Cell::new(start) }
    }

    /// Advance by `ticks`, wrapping like the hardware counter.
    pub fn advance(&self, ticks: Tick) {
        self.now.set(self.now.get().wrapping_add(ticks));
    }

    pub fn set(&self, tick: Tick) {
        self.now.set(tick);
    }
}

impl TickSource for ManualClock {
    fn now(&self) -> Tick {
        self.now.get()
    }
}

// ---------------------------------------------------------------------------
// Shared atomic counter (live play)
// ---------------------------------------------------------------------------

/// A tick counter shared between one incrementing writer and any number of
/// readers.
#[derive(Clone, Debug, Default)]
pub struct SharedTicks {
    count: Arc<AtomicU32>,
}

impl SharedTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick. `fetch_add` wraps on overflow.
    pub fn tick(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

impl TickSource for SharedTicks {
    fn now(&self) -> Tick {
        self.count.load(Ordering::Relaxed)
    }
}

/// Background thread advancing a `SharedTicks` at a fixed period. Stands in
/// for the board's periodic timer interrupt.
pub struct Ticker {
    keep_running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    /// Start ticking `ticks` once per `period`.
    pub fn start(ticks: SharedTicks, period: Duration) -> Self {
        let keep_running = Arc::new(AtomicBool::new(true));
        let flag = keep_running.clone();
        let thread = thread::spawn(move || {
            while flag.load(Ordering::SeqCst) {
                thread::sleep(period);
                ticks.tick();
            }
        });
        Self {
            keep_running,
            thread: Some(thread),
        }
    }

    /// Stop the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.keep_running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_without_wrap() {
        assert_eq!(elapsed_ticks(100, 100), 0);
        assert_eq!(elapsed_ticks(100, 350), 250);
        assert_eq!(elapsed_ticks(0, MAX_TICK), MAX_TICK);
    }

    #[test]
    fn elapsed_across_wrap() {
        assert_eq!(elapsed_ticks(MAX_TICK - 10, 5), 5 + 10);
        assert_eq!(elapsed_ticks(MAX_TICK, 0), 0);
        assert_eq!(elapsed_ticks(MAX_TICK, 1), 1);
        assert_eq!(elapsed_ticks(1, 0), MAX_TICK - 1);
    }

    #[test]
    fn elapsed_wrap_matches_formula() {
        let pairs = [(4_000_000_000, 12), (MAX_TICK - 1, 0), (3_000, 2_999)];
        for (t0, t1) in pairs {
            assert!(t1 < t0);
            assert_eq!(elapsed_ticks(t0, t1), t1 + (MAX_TICK - t0));
        }
    }

    #[test]
    fn manual_clock_wraps() {
        let clock = ManualClock::new(MAX_TICK - 1);
        clock.advance(3);
        assert_eq!(clock.now(), 1);
        clock.set(42);
        assert_eq!(clock.now(), 42);
    }

    #[test]
    fn shared_ticks_visible_through_clones() {
        let ticks = SharedTicks::new();
        let reader = ticks.clone();
        for _ in 0..5 {
            ticks.tick();
        }
        assert_eq!(reader.now(), 5);
    }

    #[test]
    fn ticker_advances_and_stops() {
        let ticks = SharedTicks::new();
        let ticker = Ticker::start(ticks.clone(), Duration::from_millis(1));
        while ticks.now() < 3 {
            thread::sleep(Duration::from_millis(1));
        }
        ticker.stop();
        let frozen = ticks.now();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(ticks.now(), frozen);
    }
}
