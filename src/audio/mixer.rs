// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Voice mixer.
//!
//! Every triggered drum becomes a voice that plays its sample through to
//! the end. Voices overlap freely; the output callback sums them.

use std::sync::Arc;

/// Maximum simultaneous voices; the oldest is dropped beyond this
pub const MAX_VOICES: usize = 64;

/// A sample being played
#[derive(Debug, Clone)]
struct Voice {
    frames: Arc<[f32]>,
    position: usize,
}

impl Voice {
    fn is_finished(&self) -> bool {
        self.position >= self.frames.len()
    }
}

/// Sums active voices into interleaved output buffers
#[derive(Debug)]
pub struct Mixer {
    voices: Vec<Voice>,
}

impl Mixer {
    /// Create an idle mixer
    pub fn new() -> Self {
        Self {
            voices: Vec::with_capacity(MAX_VOICES),
        }
    }

    /// Start playing `frames` from the beginning
    pub fn trigger(&mut self, frames: Arc<[f32]>) {
        if self.voices.len() >= MAX_VOICES {
            self.voices.remove(0);
        }
        self.voices.push(Voice {
            frames,
            position: 0,
        });
    }

    /// Number of voices still sounding
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Add the next frames of every voice into `buffer`.
    ///
    /// `buffer` is interleaved with `channels` channels; each mono frame is
    /// copied to all channels and the sum is clamped to [-1, 1].
    pub fn render(&mut self, buffer: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        for frame in buffer.chunks_mut(channels) {
            let mut sum = 0.0;
            for voice in &mut self.voices {
                if let Some(&s) = voice.frames.get(voice.position) {
                    sum += s;
                    voice.position += 1;
                }
            }
            let value = sum.clamp(-1.0, 1.0);
            for out in frame.iter_mut() {
                *out += value;
            }
        }
        self.voices.retain(|v| !v.is_finished());
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}
