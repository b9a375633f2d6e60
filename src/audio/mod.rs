// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio engine for the acoustic drum kit.
//!
//! This module provides:
//! - WAV sample decoding
//! - A voice mixer for overlapping drum hits
//! - Audio output via cpal

pub mod mixer;
pub mod output;
pub mod sample;

pub use mixer::Mixer;
pub use output::{default_device_name, AudioConfig, AudioOutput};
pub use sample::{Sample, SampleError};

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::info;

/// Audio engine combining mixer and output
pub struct AudioEngine {
    /// Mixer shared with the output callback
    mixer: Arc<Mutex<Mixer>>,
    /// Audio output, present while running
    output: Option<AudioOutput>,
    /// Output configuration
    config: AudioConfig,
}

impl AudioEngine {
    /// Create a stopped engine
    pub fn new(config: AudioConfig) -> Self {
        Self {
            mixer: Arc::new(Mutex::new(Mixer::new())),
            output: None,
            config,
        }
    }

    /// Get mixer reference
    pub fn mixer(&self) -> Arc<Mutex<Mixer>> {
        Arc::clone(&self.mixer)
    }

    /// Start audio output
    pub fn start(&mut self) -> Result<(), AudioError> {
        if self.output.is_some() {
            return Ok(());
        }

        let output = AudioOutput::open(self.config, Arc::clone(&self.mixer))?;

        let device = default_device_name().unwrap_or_else(|| "unknown".to_string());
        info!(
            device = %device,
            channels = output.channels(),
            sample_rate = self.config.sample_rate,
            latency_ms = self.config.latency_ms(),
            "audio output started"
        );
        self.output = Some(output);
        Ok(())
    }

    /// Check if running
    pub fn is_running(&self) -> bool {
        self.output.is_some()
    }
}

/// Audio error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No audio device available
    #[error("no audio output device available")]
    NoDevice,
    /// Failed to build or start the audio stream
    #[error("audio stream failed: {0}")]
    StreamFailed(String),
}
