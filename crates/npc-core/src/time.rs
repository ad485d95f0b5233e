//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter plus a
//! fixed per-tick delta, `dt_secs`:
//!
//!   elapsed = tick * dt_secs
//!
//! The engine is frame-based: behaviors consume `dt_secs` for kinematics
//! (movement steps, wait countdowns) and `now_secs()` for cooldown stamps.
//! A fixed delta keeps runs deterministic — the same seed and tick count
//! always produce identical trajectories.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64` to avoid overflow: at 60 ticks/second a u64 lasts ~9.7
/// billion years.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── GameClock ─────────────────────────────────────────────────────────────────

/// Monotonic tick clock with a fixed per-tick delta.
///
/// `GameClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameClock {
    /// The current tick — advanced by `GameClock::advance()` each iteration.
    pub tick: Tick,
    /// Simulated seconds per tick.
    pub dt_secs: f32,
    /// Accumulated simulated seconds since tick 0.  Kept as `f64` so long
    /// runs don't lose cooldown precision to f32 rounding.
    elapsed_secs: f64,
}

impl GameClock {
    /// Create a clock at tick 0 with the given per-tick delta.
    pub fn new(dt_secs: f32) -> Self {
        Self {
            tick: Tick::ZERO,
            dt_secs,
            elapsed_secs: 0.0,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.tick = Tick(self.tick.0 + 1);
        self.elapsed_secs += self.dt_secs as f64;
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn now_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// How many ticks span `secs` seconds? (rounds up — a wait never ends early)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        (secs / self.dt_secs).ceil() as u64
    }
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.tick, self.elapsed_secs)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate and passed
/// to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Simulated seconds per tick.  Default: 1/60 s (60 ticks per second).
    pub dt_secs: f32,

    /// Total ticks to simulate when running to completion.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `GameClock` pre-configured for this run.
    pub fn make_clock(&self) -> GameClock {
        GameClock::new(self.dt_secs)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt_secs: 1.0 / 60.0,
            total_ticks: 0,
            seed: 0,
        }
    }
}
