//! Run configuration module.
//!
//! Holds the tempo, duration and output destination resolved from
//! defaults, environment variables and command-line flags.

use std::path::PathBuf;

use crate::audio::{AudioSpec, PlaybackLength, SAMPLE_RATE};
use crate::error::Result;

/// Slowest accepted tempo in beats per minute.
pub const MIN_BPM: u32 = 1;

/// Fastest accepted tempo in beats per minute.
pub const MAX_BPM: u32 = 1000;

/// Longest finite duration whose header sizes fit in 32 bits.
///
/// The RIFF size field holds `36 + payload`, and `u32::MAX` is reserved
/// for streaming output.
pub const MAX_DURATION_SECS: u32 = (u32::MAX - 36) / SAMPLE_RATE;

/// Tempo used when none is supplied.
pub const DEFAULT_BPM: u32 = 170;

/// Duration used when none is supplied.
pub const DEFAULT_DURATION_SECS: u32 = 60;

/// Runtime configuration for one click track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetronomeConfig {
    /// Tempo in beats per minute.
    pub tempo_bpm: u32,

    /// Duration in seconds. Zero means continuous play.
    pub duration_secs: u32,

    /// Output file path. If None, audio is written to standard output.
    pub output: Option<PathBuf>,
}

impl MetronomeConfig {
    /// Creates a MetronomeConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a MetronomeConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `METRONOME_BPM` - Tempo in beats per minute
    /// - `METRONOME_DURATION` - Duration in seconds (0 for continuous)
    /// - `METRONOME_OUTPUT` - Output file path
    ///
    /// Unset or unparsable variables fall back to defaults. Range checks
    /// happen in [`MetronomeConfig::validate`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(bpm) = lookup("METRONOME_BPM").and_then(|s| s.trim().parse::<u32>().ok()) {
            config.tempo_bpm = bpm;
        }

        if let Some(duration) =
            lookup("METRONOME_DURATION").and_then(|s| s.trim().parse::<u32>().ok())
        {
            config.duration_secs = duration;
        }

        if let Some(path) = lookup("METRONOME_OUTPUT").filter(|s| !s.is_empty()) {
            config.output = Some(PathBuf::from(path));
        }

        config
    }

    /// Returns true if the track should play until the output is closed.
    pub fn is_continuous(&self) -> bool {
        self.duration_secs == 0
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.to_audio_spec().map(|_| ())
    }

    /// Validates the configuration and builds the audio format for it.
    pub fn to_audio_spec(&self) -> Result<AudioSpec> {
        let length = if self.is_continuous() {
            PlaybackLength::Continuous
        } else {
            PlaybackLength::Seconds(self.duration_secs)
        };

        AudioSpec::new(self.tempo_bpm, length)
    }
}

impl Default for MetronomeConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: DEFAULT_BPM,
            duration_secs: DEFAULT_DURATION_SECS,
            output: None,
        }
    }
}
