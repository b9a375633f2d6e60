// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for drumz.
//!
//! Settings may be read from a YAML or TOML file. Every field is optional;
//! command-line options take precedence over the file, and the file over
//! the defaults below.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::timing::{DEFAULT_BPM, MIN_BPM};

/// Kit used when none is configured
pub const DEFAULT_KIT: &str = "text";

/// Root settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Tempo in BPM
    #[serde(default = "default_bpm")]
    pub bpm: u32,
    /// Name of the drum kit
    #[serde(default = "default_kit")]
    pub kit: String,
    /// Acoustic kit settings
    #[serde(default)]
    pub acoustic: AcousticConfig,
}

fn default_bpm() -> u32 {
    DEFAULT_BPM
}
fn default_kit() -> String {
    DEFAULT_KIT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bpm: default_bpm(),
            kit: default_kit(),
            acoustic: AcousticConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from a `.yaml`, `.yml` or `.toml` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        let settings = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents)?,
            Some("toml") => Self::from_toml(&contents)?,
            _ => bail!("Unsupported settings format: {:?} (use .yaml or .toml)", path),
        };
        settings
            .validate()
            .with_context(|| format!("Invalid settings in {:?}", path))?;
        Ok(settings)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML settings")
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML settings")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.bpm < MIN_BPM {
            bail!("invalid bpm: {}", self.bpm);
        }
        if self.kit.is_empty() {
            bail!("kit name is empty");
        }
        self.acoustic.validate()
    }
}

/// Acoustic kit settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcousticConfig {
    /// Directory holding the WAV files
    #[serde(default = "default_samples_dir")]
    pub samples_dir: PathBuf,
    /// Drum name to WAV file name, relative to `samples_dir`
    #[serde(default = "default_drums")]
    pub drums: BTreeMap<String, String>,
    /// Output buffer length in milliseconds
    #[serde(default = "default_buffer_ms")]
    pub buffer_ms: u32,
}

fn default_samples_dir() -> PathBuf {
    PathBuf::from("samples")
}
fn default_drums() -> BTreeMap<String, String> {
    [("HH", "hh.wav"), ("SD", "sd.wav"), ("BD", "bd.wav")]
        .into_iter()
        .map(|(name, file)| (name.to_string(), file.to_string()))
        .collect()
}
fn default_buffer_ms() -> u32 {
    50
}

impl Default for AcousticConfig {
    fn default() -> Self {
        Self {
            samples_dir: default_samples_dir(),
            drums: default_drums(),
            buffer_ms: default_buffer_ms(),
        }
    }
}

impl AcousticConfig {
    /// Full path of the sample for each drum
    pub fn sample_paths(&self) -> impl Iterator<Item = (&str, PathBuf)> + '_ {
        self.drums
            .iter()
            .map(|(name, file)| (name.as_str(), self.samples_dir.join(file)))
    }

    /// Check drum names and buffer length
    pub fn validate(&self) -> Result<()> {
        if self.drums.is_empty() {
            bail!("acoustic kit has no drums");
        }
        for name in self.drums.keys() {
            if name.len() != 2 || !name.is_ascii() {
                bail!("drum name {:?} is not two ASCII characters", name);
            }
        }
        if self.buffer_ms == 0 {
            bail!("buffer_ms must be at least 1");
        }
        Ok(())
    }
}
