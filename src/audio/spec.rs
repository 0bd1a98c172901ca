//! Audio format description for the click track.
//!
//! The format is fixed at 32kHz mono 8-bit unsigned PCM. Only the tempo
//! and playback length vary between tracks.

use crate::config::{MAX_BPM, MAX_DURATION_SECS, MIN_BPM};
use crate::error::{MetronomeError, Result};
use crate::synthesis::clock;

/// Audio sample rate (32kHz).
pub const SAMPLE_RATE: u32 = 32000;

/// Number of audio channels (mono).
pub const CHANNELS: u16 = 1;

/// Bits per sample (8-bit unsigned PCM).
pub const BITS_PER_SAMPLE: u16 = 8;

/// How long the track plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackLength {
    /// A fixed number of whole seconds.
    Seconds(u32),
    /// Keep generating until the output stops accepting bytes.
    Continuous,
}

/// Immutable description of the track to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSpec {
    tempo_bpm: u32,
    length: PlaybackLength,
}

impl AudioSpec {
    /// Creates an AudioSpec after checking tempo and duration ranges.
    ///
    /// `PlaybackLength::Seconds(0)` is treated as continuous play.
    pub fn new(tempo_bpm: u32, length: PlaybackLength) -> Result<Self> {
        if !(MIN_BPM..=MAX_BPM).contains(&tempo_bpm) {
            return Err(MetronomeError::invalid_tempo(tempo_bpm));
        }

        let length = match length {
            PlaybackLength::Seconds(0) => PlaybackLength::Continuous,
            PlaybackLength::Seconds(secs) if secs > MAX_DURATION_SECS => {
                return Err(MetronomeError::duration_too_long(secs));
            }
            other => other,
        };

        Ok(Self { tempo_bpm, length })
    }

    pub fn tempo_bpm(&self) -> u32 {
        self.tempo_bpm
    }

    pub fn length(&self) -> PlaybackLength {
        self.length
    }

    pub fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    pub fn channels(&self) -> u16 {
        CHANNELS
    }

    pub fn bits_per_sample(&self) -> u16 {
        BITS_PER_SAMPLE
    }

    pub fn bytes_per_sample(&self) -> u16 {
        BITS_PER_SAMPLE / 8
    }

    /// Bytes consumed by one sample frame across all channels.
    pub fn block_align(&self) -> u16 {
        CHANNELS * self.bytes_per_sample()
    }

    /// Bytes of audio per second of playback.
    pub fn byte_rate(&self) -> u32 {
        SAMPLE_RATE * self.block_align() as u32
    }

    /// Size of the buffer holding one second of interleaved samples.
    pub fn bytes_per_second(&self) -> usize {
        SAMPLE_RATE as usize * self.block_align() as usize
    }

    /// Samples per channel, or None for continuous play.
    pub fn samples_per_channel(&self) -> Option<u32> {
        match self.length {
            PlaybackLength::Seconds(secs) => Some(secs * SAMPLE_RATE),
            PlaybackLength::Continuous => None,
        }
    }

    /// Exact payload length in bytes, or None for continuous play.
    ///
    /// Multiplies by whole bytes per frame so the product never exceeds the
    /// final size, which fits `u32` for every accepted duration.
    pub fn payload_len(&self) -> Option<u32> {
        self.samples_per_channel()
            .map(|samples| samples * self.block_align() as u32)
    }

    /// Beat period in samples for this tempo.
    pub fn samples_per_beat(&self) -> u32 {
        clock::samples_per_beat(SAMPLE_RATE, self.tempo_bpm)
    }
}
