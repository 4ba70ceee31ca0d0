// Seeded pseudo-random number generator for maze generation.
//
// xoshiro256++ (Blackman & Vigna, 2019) expanded from a single `u64` seed
// with SplitMix64. The generator is hand-rolled so that a given seed yields
// the same maze on every platform and toolchain: the randomized map builder
// in `tilt_maze_sim::map_gen` is regression-pinned against known seeds, and a
// player who shares a seed expects to share the maze.
//
// Only integer draws are exposed. Map generation needs "pick one of n" and
// fair coin flips, nothing else, so there is no floating-point path that
// could drift between targets.
//
// **Critical constraint: determinism.** Every method must produce identical
// output given the same prior state. Do not add calls to OS entropy, the
// stdlib hasher, or floating-point math here.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ state. One instance drives one map build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeRng {
    s: [u64; 4],
}

impl MazeRng {
    /// Create a generator from a `u64` seed.
    ///
    /// Two generators created from the same seed produce identical streams.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform integer in `[low, high)`.
    ///
    /// Rejection sampling keeps the draw free of modulo bias. Panics if
    /// `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range; // = (2^64 - range) % range
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }

    /// Uniform integer in `[0, bound)`. Panics if `bound == 0`.
    pub fn below(&mut self, bound: u32) -> u32 {
        self.range_u64(0, u64::from(bound)) as u32
    }

    /// Uniform index in `[0, len)`. Panics if `len == 0`.
    pub fn index(&mut self, len: usize) -> usize {
        self.range_u64(0, len as u64) as usize
    }

    /// Fair coin flip. Consumes exactly one draw.
    pub fn coin(&mut self) -> bool {
        self.below(2) == 1
    }
}

/// SplitMix64 step, used only to expand the seed into the 256-bit state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
