// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tablature player.
//!
//! Plays each step of a [`DrumTab`] in order, one step per clock period, on
//! the calling thread. Every step is timed from its own start, so a slow
//! step delays the rest of the pass rather than being caught up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace};

use super::DrumTab;
use crate::timing::{StepClock, TempoError};

/// Shared flag asking a player to stop before its next step
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every holder of this token to stop
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// What a call to [`Player::play`] got through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Steps played, over all passes
    pub steps_played: u64,
    /// Complete passes over the tablature
    pub passes: u64,
    /// Whether playback ended because of the cancel token
    pub cancelled: bool,
    /// Whether the cancel came after the first step of a pass
    pub mid_pass: bool,
}

/// Fixed-tempo player
#[derive(Debug, Clone)]
pub struct Player {
    clock: StepClock,
    repeat: bool,
    cancel: CancelToken,
}

impl Player {
    /// Create a player; with `repeat` it loops until cancelled
    pub fn new(clock: StepClock, repeat: bool) -> Self {
        Self {
            clock,
            repeat,
            cancel: CancelToken::new(),
        }
    }

    /// Use `token` to stop playback from elsewhere
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Get a handle to this player's cancel token
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Play `tab`, blocking until one pass is done or, when repeating,
    /// until cancelled.
    ///
    /// The next pass starts right after the last step's wait, with no gap.
    pub fn play(&self, tab: &mut DrumTab) -> PlaybackReport {
        let mut report = PlaybackReport::default();
        let last = tab.len().saturating_sub(1);

        loop {
            for (i, step) in tab.steps_mut().iter_mut().enumerate() {
                if self.cancel.is_cancelled() {
                    debug!(steps = report.steps_played, "playback cancelled");
                    report.cancelled = true;
                    report.mid_pass = i > 0;
                    return report;
                }

                let started = Instant::now();
                step.play(i == last);
                report.steps_played += 1;
                trace!(step = i, elapsed = ?started.elapsed(), "played step");
                self.clock.wait_from(started);
            }

            report.passes += 1;
            debug!(pass = report.passes, "completed pass");
            if !self.repeat {
                return report;
            }
        }
    }
}

/// Play `tab` at `bpm`, once or repeating forever.
pub fn play_tab(tab: &mut DrumTab, bpm: u32, repeat: bool) -> Result<PlaybackReport, TempoError> {
    let clock = StepClock::new(bpm)?;
    Ok(Player::new(clock, repeat).play(tab))
}
