// Sensor sources.
//
// The engine polls a `SensorSource` once per loop iteration. On the board
// this wraps the accelerometer driver; on a host it is a scripted replay or
// a line-oriented reader (see the CLI). A source returns `None` once it has
// nothing more to give, which ends `Session::run`.

use crate::types::Sample;
use serde::{Deserialize, Serialize};

/// Anything that can produce 3-axis samples.
pub trait SensorSource {
    fn sample(&mut self) -> Option<Sample>;
}

/// One step of a scripted replay: a sample held for `polls` consecutive polls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(flatten)]
    pub sample: Sample,
    pub polls: u32,
}

/// Replays a fixed list of samples, then reports exhaustion.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSensor {
    steps: Vec<ScriptStep>,
    step: usize,
    used: u32,
}

impl ScriptedSensor {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            steps,
            step: 0,
            used: 0,
        }
    }

    /// Parse a JSON array of `{ "x", "y", "z", "polls" }` objects.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Polls remaining before the script runs out.
    pub fn remaining(&self) -> u64 {
        let rest: u64 = self
            .steps
            .iter()
            .skip(self.step)
            .map(|s| u64::from(s.polls))
            .sum();
        rest - u64::from(self.used)
    }
}

impl SensorSource for ScriptedSensor {
    fn sample(&mut self) -> Option<Sample> {
        while let Some(step) = self.steps.get(self.step) {
            if self.used < step.polls {
                self.used += 1;
                return Some(step.sample);
            }
            self.step += 1;
            self.used = 0;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_each_step_for_its_poll_count() {
        let mut sensor = ScriptedSensor::new(vec![
            ScriptStep {
                sample: Sample::new(1, 0, 0),
                polls: 2,
            },
            ScriptStep {
                sample: Sample::new(0, 0, 0),
                polls: 0,
            },
            ScriptStep {
                sample: Sample::new(0, -1, 0),
                polls: 1,
            },
        ]);
        assert_eq!(sensor.remaining(), 3);
        assert_eq!(sensor.sample(), Some(Sample::new(1, 0, 0)));
        assert_eq!(sensor.sample(), Some(Sample::new(1, 0, 0)));
        assert_eq!(sensor.remaining(), 1);
        assert_eq!(sensor.sample(), Some(Sample::new(0, -1, 0)));
        assert_eq!(sensor.sample(), None);
        assert_eq!(sensor.sample(), None);
        assert_eq!(sensor.remaining(), 0);
    }

    #[test]
    fn script_parses_flat_json() {
        let json = r#"[ { "x": 0, "y": 900, "z": 5, "polls": 40 } ]"#;
        let mut sensor = ScriptedSensor::from_json(json).unwrap();
        assert_eq!(sensor.remaining(), 40);
        assert_eq!(sensor.sample(), Some(Sample::new(0, 900, 5)));
    }
}
