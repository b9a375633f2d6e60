// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sequencer core for reading and playing drum tablatures.
//!
//! This module provides the core sequencing infrastructure:
//! - Kit and step traits implemented by each playback backend
//! - Tablature parser producing a sequence of steps
//! - Fixed-period player with cooperative cancellation

pub mod player;
pub mod tablature;

pub use player::{play_tab, CancelToken, PlaybackReport, Player};
pub use tablature::{read_tab, TabError, TabErrorKind};

use std::fmt;

/// A set of drums that can be validated by name and played.
///
/// The kit decides which two-letter drum names a tablature may use, and
/// produces the step type that knows how to sound them.
pub trait DrumKit {
    /// Whether `name` is a drum of this kit
    fn has_drum(&self, name: &str) -> bool;

    /// Create an empty step (a rest) for this kit
    fn new_step(&self) -> Box<dyn Step>;

    /// Playback stopped before the last step of a pass
    fn pass_interrupted(&self) {}
}

/// One time slice of a tablature.
///
/// Drums are composed into the step while the tablature is read; the step
/// is then played once per pass. `last_step` is true for the final step of
/// the tablature so a sink can mark the end of a pass.
pub trait Step: fmt::Debug {
    /// Add a drum to be hit when this step plays
    fn add_drum(&mut self, name: &str);

    /// Hit every composed drum, returning once the sounds have started
    fn play(&mut self, last_step: bool);
}

/// A tablature: steps in playback order, never empty.
pub struct DrumTab {
    /// Steps produced by the kit
    steps: Vec<Box<dyn Step>>,
    /// Drum names in the order their lines appeared
    drums: Vec<String>,
}

impl DrumTab {
    /// Allocate `width` empty steps from `kit`
    pub(crate) fn with_width(kit: &dyn DrumKit, width: usize, drums: Vec<String>) -> Self {
        Self {
            steps: (0..width).map(|_| kit.new_step()).collect(),
            drums,
        }
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the tablature has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in playback order
    pub fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    pub(crate) fn steps_mut(&mut self) -> &mut [Box<dyn Step>] {
        &mut self.steps
    }

    /// Drum names used by the tablature, in source order
    pub fn drums(&self) -> &[String] {
        &self.drums
    }
}

impl fmt::Debug for DrumTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.steps.iter()).finish()
    }
}
