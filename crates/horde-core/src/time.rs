//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter advanced at a fixed
//! timestep.  The AI core never reads wall-clock time: dwell durations,
//! repath cadences, and reanimation waits are all expressed in seconds and
//! converted to tick counts through `SimClock`, so a run is bit-identical
//! regardless of host frame pacing.
//!
//! The default tick duration is 0.02 s (a 50 Hz fixed step, the conventional
//! physics rate of the engines this core is hosted in).

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
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
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
///
/// Cheap to copy; holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated seconds one tick represents.  Default: 0.02.
    pub tick_duration_secs: f32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: f32) -> Self {
        Self {
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.current_tick.0 as f32 * self.tick_duration_secs
    }

    /// How many ticks span `secs` seconds? (rounds up — a timer never fires
    /// early)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        if secs <= 0.0 {
            return 0;
        }
        (secs / self.tick_duration_secs).ceil() as u64
    }

    /// Seconds represented by `n` ticks.
    #[inline]
    pub fn secs_for_ticks(&self, n: u64) -> f32 {
        n as f32 * self.tick_duration_secs
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── TimerSlot ─────────────────────────────────────────────────────────────────

/// A single-shot tick timer with schedule-cancel semantics.
///
/// Re-scheduling always cancels the pending instance first, so at most one
/// deadline is ever armed.  Each successful `schedule` bumps a generation
/// counter; callers that captured state for a pending timer can compare
/// generations to detect that their instance was superseded.
///
/// `fire` is level-checked: call it once per tick, and it returns `true`
/// exactly once per armed deadline.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerSlot {
    deadline:   Option<Tick>,
    generation: u64,
}

impl TimerSlot {
    pub fn new() -> TimerSlot {
        TimerSlot::default()
    }

    /// Arm the timer to fire `delay_ticks` after `now`, cancelling any
    /// pending instance.  Returns the new generation token.
    pub fn schedule(&mut self, now: Tick, delay_ticks: u64) -> u64 {
        self.cancel();
        self.generation += 1;
        self.deadline = Some(now + delay_ticks);
        self.generation
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Generation token of the most recent `schedule` call.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `true` exactly once, on the first call at or past the deadline.
    pub fn fire(&mut self, now: Tick) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
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
    /// Seconds per fixed tick.  Default: 0.02 (50 Hz).
    pub tick_duration_secs: f32,

    /// Total ticks to simulate when driven by `Sim::run`.  Hosted deployments
    /// that call `Sim::step` themselves can leave this at 0.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical behavior.
    pub seed: u64,

    /// Worker thread count passed to Rayon when the `parallel` feature is
    /// enabled.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Emit a trace snapshot every N ticks.  0 disables snapshots.
    pub trace_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs: 0.02,
            total_ticks: 0,
            seed: 0,
            num_threads: None,
            trace_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }
}
