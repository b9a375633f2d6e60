// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Acoustic drum kit.
//!
//! Plays WAV samples through the default audio device. A step starts one
//! voice per drum and returns at once; samples are left to ring out over
//! the following steps.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use super::KitError;
use crate::audio::{AudioConfig, AudioEngine, Mixer, Sample};
use crate::config::AcousticConfig;
use crate::sequencer::{DrumKit, Step};

/// Decoded samples keyed by drum name, all at one sample rate
#[derive(Debug, Clone)]
pub struct SampleBank {
    samples: BTreeMap<String, Sample>,
    sample_rate: u32,
}

impl SampleBank {
    /// Build a bank, converting every sample to the rate of the first
    pub fn new(samples: impl IntoIterator<Item = (String, Sample)>) -> Result<Self, KitError> {
        let mut iter = samples.into_iter().peekable();
        let sample_rate = iter
            .peek()
            .map(|(_, s)| s.sample_rate())
            .ok_or(KitError::NoDrums)?;

        let samples = iter
            .map(|(name, sample)| (name, sample.resampled(sample_rate)))
            .collect();

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Load every sample named in `config`
    pub fn load(config: &AcousticConfig) -> Result<Self, KitError> {
        let mut loaded = Vec::with_capacity(config.drums.len());
        for (name, path) in config.sample_paths() {
            let sample = Sample::open(&path).map_err(|source| KitError::Sample {
                drum: name.to_string(),
                source,
            })?;
            debug!(drum = name, path = %path.display(), frames = sample.len(), "loaded sample");
            loaded.push((name.to_string(), sample));
        }
        Self::new(loaded)
    }

    /// Get a drum's sample
    pub fn get(&self, name: &str) -> Option<&Sample> {
        self.samples.get(name)
    }

    /// Drum names in the bank
    pub fn drums(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }

    /// Sample rate shared by every sample
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Kit that mixes drum samples into a live audio stream
pub struct AcousticKit {
    bank: Arc<SampleBank>,
    mixer: Arc<Mutex<Mixer>>,
    /// Kept alive for as long as steps may play
    engine: Option<AudioEngine>,
}

impl AcousticKit {
    /// Load samples and open the audio device
    pub fn open(config: &AcousticConfig) -> Result<Self, KitError> {
        let bank = SampleBank::load(config)?;
        let mut engine = AudioEngine::new(AudioConfig::with_latency(
            bank.sample_rate(),
            config.buffer_ms,
        ));
        engine.start()?;

        info!(
            drums = ?bank.drums().collect::<Vec<_>>(),
            sample_rate = bank.sample_rate(),
            "acoustic kit ready"
        );
        Ok(Self {
            mixer: engine.mixer(),
            bank: Arc::new(bank),
            engine: Some(engine),
        })
    }

    /// Kit feeding `mixer` directly, without an audio device
    pub fn with_mixer(bank: SampleBank, mixer: Arc<Mutex<Mixer>>) -> Self {
        Self {
            bank: Arc::new(bank),
            mixer,
            engine: None,
        }
    }

    /// Whether the kit is connected to an audio device
    pub fn is_live(&self) -> bool {
        self.engine.as_ref().is_some_and(AudioEngine::is_running)
    }
}

impl DrumKit for AcousticKit {
    fn has_drum(&self, name: &str) -> bool {
        self.bank.get(name).is_some()
    }

    fn new_step(&self) -> Box<dyn Step> {
        Box::new(AcousticStep {
            bank: Arc::clone(&self.bank),
            drums: Vec::new(),
            voices: Vec::new(),
            mixer: Arc::clone(&self.mixer),
        })
    }
}

/// A step of the acoustic kit
pub struct AcousticStep {
    bank: Arc<SampleBank>,
    drums: Vec<String>,
    voices: Vec<Arc<[f32]>>,
    mixer: Arc<Mutex<Mixer>>,
}

impl Step for AcousticStep {
    fn add_drum(&mut self, name: &str) {
        if let Some(sample) = self.bank.get(name) {
            self.drums.push(name.to_string());
            self.voices.push(Arc::clone(sample.frames()));
        }
    }

    fn play(&mut self, _last_step: bool) {
        if self.voices.is_empty() {
            return;
        }
        if let Ok(mut mixer) = self.mixer.lock() {
            for voice in &self.voices {
                mixer.trigger(Arc::clone(voice));
            }
        }
    }
}

impl fmt::Debug for AcousticStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.drums).finish()
    }
}
