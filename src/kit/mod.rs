// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Drum kits.
//!
//! Each kit is one backend for the [`DrumKit`] and [`Step`] traits. The
//! supported kits are listed in [`KITS`], which the command line receives
//! and searches by name.
//!
//! [`Step`]: crate::sequencer::Step

pub mod acoustic;
pub mod text;

pub use acoustic::{AcousticKit, SampleBank};
pub use text::{TextKit, TEXT_DRUMS};

use thiserror::Error;

use crate::audio::{AudioError, SampleError};
use crate::config::Settings;
use crate::sequencer::DrumKit;

/// Kit construction errors
#[derive(Error, Debug)]
pub enum KitError {
    /// The kit was configured without drums
    #[error("kit has no drums")]
    NoDrums,
    /// A drum's sample could not be loaded
    #[error("drum {drum}: {source}")]
    Sample {
        drum: String,
        #[source]
        source: SampleError,
    },
    /// The audio device could not be used
    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Builds a kit from settings
pub type KitBuilder = fn(&Settings) -> Result<Box<dyn DrumKit>, KitError>;

/// A selectable kit
#[derive(Clone, Copy)]
pub struct KitEntry {
    /// Name given on the command line
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Constructor
    pub build: KitBuilder,
}

/// Every supported kit
pub const KITS: &[KitEntry] = &[
    KitEntry {
        name: "text",
        description: "prints drum names to standard output",
        build: build_text,
    },
    KitEntry {
        name: "acoustic",
        description: "plays WAV samples through the default audio device",
        build: build_acoustic,
    },
];

fn build_text(_settings: &Settings) -> Result<Box<dyn DrumKit>, KitError> {
    Ok(Box::new(TextKit::stdout()))
}

fn build_acoustic(settings: &Settings) -> Result<Box<dyn DrumKit>, KitError> {
    Ok(Box::new(AcousticKit::open(&settings.acoustic)?))
}

/// Find a kit by name
pub fn find_kit<'a>(kits: &'a [KitEntry], name: &str) -> Option<&'a KitEntry> {
    kits.iter().find(|k| k.name == name)
}

/// Comma separated kit names, for messages
pub fn kit_names(kits: &[KitEntry]) -> String {
    kits.iter().map(|k| k.name).collect::<Vec<_>>().join(", ")
}
