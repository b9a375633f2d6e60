// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Drum samples decoded from WAV files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

/// Sample loading errors
#[derive(Error, Debug)]
pub enum SampleError {
    /// The file could not be opened
    #[error("cannot open sample {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    /// The WAV data could not be decoded
    #[error("cannot decode WAV: {0}")]
    Wav(#[from] hound::Error),
    /// The WAV file holds no audio
    #[error("WAV file contains no samples")]
    Empty,
    /// The header gives a sample rate of zero
    #[error("WAV sample rate is zero")]
    InvalidRate,
}

/// A mono drum sample shared between every step that hits it
#[derive(Debug, Clone)]
pub struct Sample {
    frames: Arc<[f32]>,
    sample_rate: u32,
}

impl Sample {
    /// Wrap already decoded mono frames
    pub fn from_frames(frames: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            frames: frames.into(),
            sample_rate,
        }
    }

    /// Load a WAV file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SampleError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SampleError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_wav(BufReader::new(file))
    }

    /// Decode WAV data, folding all channels into one.
    ///
    /// Integer samples of any bit depth are scaled into [-1, 1].
    pub fn from_wav<R: Read>(reader: R) -> Result<Self, SampleError> {
        let wav = hound::WavReader::new(reader)?;
        let spec = wav.spec();
        if spec.sample_rate == 0 {
            return Err(SampleError::InvalidRate);
        }

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => wav.into_samples::<f32>().collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let scale = (1u64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                wav.into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()?
            }
        };

        let channels = spec.channels.max(1) as usize;
        let frames: Vec<f32> = interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect();

        if frames.is_empty() {
            return Err(SampleError::Empty);
        }

        Ok(Self::from_frames(frames, spec.sample_rate))
    }

    /// Convert to `sample_rate` by linear interpolation.
    ///
    /// Frames are shared unchanged when either rate is zero.
    pub fn resampled(&self, sample_rate: u32) -> Self {
        if sample_rate == self.sample_rate
            || sample_rate == 0
            || self.sample_rate == 0
            || self.frames.len() < 2
        {
            return Self {
                frames: Arc::clone(&self.frames),
                sample_rate,
            };
        }

        let step = self.sample_rate as f64 / sample_rate as f64;
        let len = (self.frames.len() as f64 / step).ceil() as usize;
        let last = self.frames.len() - 1;

        let frames = (0..len)
            .map(|i| {
                let pos = i as f64 * step;
                let idx = (pos as usize).min(last);
                let frac = (pos - idx as f64) as f32;
                let next = self.frames[(idx + 1).min(last)];
                self.frames[idx] + (next - self.frames[idx]) * frac
            })
            .collect();

        Self::from_frames(frames, sample_rate)
    }

    /// Mono frames
    pub fn frames(&self) -> &Arc<[f32]> {
        &self.frames
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there are no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
