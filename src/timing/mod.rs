// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing module.
//!
//! This module maps tempos onto step periods for the player.

pub mod clock;

pub use clock::{StepClock, TempoError, DEFAULT_BPM, MIN_BPM, STEPS_PER_BEAT};
