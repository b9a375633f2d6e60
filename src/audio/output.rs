// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio output via cpal.
//!
//! Opens the default output device with a fixed, short buffer so that
//! triggered drums are heard straight away. The channel layout is whatever
//! the device prefers; the mixer copies its mono signal to every channel.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleRate, Stream, StreamConfig};
use tracing::{error, warn};

use super::{AudioError, Mixer};

/// Rate and buffer length requested from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioConfig {
    /// Frames per second
    pub sample_rate: u32,
    /// Frames per device buffer
    pub buffer_frames: u32,
}

impl AudioConfig {
    /// Buffer of `buffer_ms` milliseconds at `sample_rate`, never empty
    pub fn with_latency(sample_rate: u32, buffer_ms: u32) -> Self {
        let frames = u64::from(sample_rate) * u64::from(buffer_ms) / 1000;
        Self {
            sample_rate,
            buffer_frames: frames.clamp(1, u64::from(u32::MAX)) as u32,
        }
    }

    /// Time covered by one buffer, in milliseconds
    pub fn latency_ms(&self) -> f64 {
        f64::from(self.buffer_frames) * 1000.0 / f64::from(self.sample_rate)
    }
}

impl Default for AudioConfig {
    /// 44.1kHz with a 50ms buffer
    fn default() -> Self {
        Self::with_latency(44100, 50)
    }
}

/// A running output stream fed by a [`Mixer`]
pub struct AudioOutput {
    _stream: Stream,
    channels: u16,
}

impl AudioOutput {
    /// Open the default device and start rendering `mixer` into it
    pub fn open(config: AudioConfig, mixer: Arc<Mutex<Mixer>>) -> Result<Self, AudioError> {
        let device = cpal::default_host()
            .default_output_device()
            .ok_or(AudioError::NoDevice)?;
        let channels = device
            .default_output_config()
            .map_err(|e| AudioError::StreamFailed(format!("no output config: {}", e)))?
            .channels();

        let stream_config = StreamConfig {
            channels,
            sample_rate: SampleRate(config.sample_rate),
            buffer_size: BufferSize::Fixed(config.buffer_frames),
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    data.fill(0.0);
                    match mixer.lock() {
                        Ok(mut mixer) => mixer.render(data, usize::from(channels)),
                        Err(_) => warn!("mixer poisoned, buffer left silent"),
                    }
                },
                |err| error!("audio stream error: {}", err),
                None,
            )
            .map_err(|e| AudioError::StreamFailed(format!("cannot build stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamFailed(format!("cannot start stream: {}", e)))?;

        Ok(Self {
            _stream: stream,
            channels,
        })
    }

    /// Channels of the device stream
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

/// Name of the default output device, if there is one
pub fn default_device_name() -> Option<String> {
    cpal::default_host()
        .default_output_device()
        .and_then(|d| d.name().ok())
}
