// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Step clock.
//!
//! Converts a tempo in beats per minute into the fixed period between two
//! tablature steps, and paces playback by sleeping out the remainder of
//! each period.

use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Number of tablature steps (columns) that make up a single beat
pub const STEPS_PER_BEAT: u32 = 4;

/// Lowest tempo accepted by the clock
pub const MIN_BPM: u32 = 1;

/// Default tempo used when none is configured
pub const DEFAULT_BPM: u32 = 120;

const ONE_MINUTE: Duration = Duration::from_secs(60);

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Tempo errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TempoError {
    /// Tempo below the minimum, or too large to subdivide
    #[error("invalid bpm: {0}")]
    InvalidBpm(u32),
}

/// Fixed-period clock for step playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepClock {
    /// Tempo in BPM
    bpm: u32,
    /// Time allotted to each step
    period: Duration,
}

impl StepClock {
    /// Create a clock for the given tempo
    pub fn new(bpm: u32) -> Result<Self, TempoError> {
        if bpm < MIN_BPM {
            return Err(TempoError::InvalidBpm(bpm));
        }
        let steps_per_minute = bpm
            .checked_mul(STEPS_PER_BEAT)
            .ok_or(TempoError::InvalidBpm(bpm))?;

        Ok(Self {
            bpm,
            period: ONE_MINUTE / steps_per_minute,
        })
    }

    /// Get the tempo
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Get the time between the starts of two consecutive steps
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Nominal length of one pass over `steps` steps, saturating at
    /// `Duration::MAX`
    pub fn pass_duration(&self, steps: usize) -> Duration {
        let nanos = self.period.as_nanos().saturating_mul(steps as u128);
        let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
        Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
    }

    /// The instant a step started at `started` should hand over to the next
    pub fn deadline(&self, started: Instant) -> Instant {
        started + self.period
    }

    /// Sleep until one period after `started`.
    ///
    /// Each step is measured from its own start, so an overrun is absorbed
    /// by that step alone: the wait is simply zero and nothing is caught up
    /// later.
    pub fn wait_from(&self, started: Instant) {
        let remaining = self.deadline(started).saturating_duration_since(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            period: ONE_MINUTE / (DEFAULT_BPM * STEPS_PER_BEAT),
        }
    }
}
