//! Deterministic per-agent RNG wrapper.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! This means:
//!
//! - Agents never share RNG state (no ordering dependency between agents).
//! - Adding or removing agents at the end of the list does not disturb the
//!   seeds of existing agents — runs are reproducible even as populations grow
//!   (spawner behaviors add agents mid-run).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Rect, Vec2};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-agent deterministic RNG.
///
/// Create one per agent at construction time; store in a parallel
/// `Vec<AgentRng>` alongside the other per-agent arrays.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Sample a position uniformly within a rectangular bound.
    ///
    /// A degenerate rectangle (zero width or height on an axis) returns the
    /// min coordinate on that axis rather than panicking.
    pub fn pos_in_rect(&mut self, rect: Rect) -> Vec2 {
        let x = if rect.max.x > rect.min.x {
            self.0.gen_range(rect.min.x..=rect.max.x)
        } else {
            rect.min.x
        };
        let y = if rect.max.y > rect.min.y {
            self.0.gen_range(rect.min.y..=rect.max.y)
        } else {
            rect.min.y
        };
        Vec2::new(x, y)
    }
}
