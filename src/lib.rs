// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! drumz - a drum tablature player.
//!
//! Reads tablatures such as
//!
//! ```text
//! HH|..o...o...o...o.
//! SD|....o.......o...
//! BD|o...o...o...o...
//! ```
//!
//! and plays them at a fixed tempo, four steps to the beat, through a
//! [`DrumKit`](sequencer::DrumKit) that either prints or sounds the drums.

pub mod audio;
pub mod config;
pub mod kit;
pub mod sequencer;
pub mod timing;

pub use config::Settings;
pub use kit::{find_kit, KitEntry, KITS};
pub use sequencer::{play_tab, read_tab, DrumKit, DrumTab, Player, Step, TabError};
pub use timing::StepClock;
