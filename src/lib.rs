//! click-track: metronome click track synthesis to 8-bit PCM WAV.
//!
//! A click is one sine cycle over 100 samples, repeated once per beat and
//! written as 32kHz mono unsigned 8-bit audio.
//!
//! # Modules
//!
//! - [`synthesis`]: Beat clock and click waveform (BeatClock, synthesize)
//! - [`audio`]: WAV format, header records and encoder (AudioSpec, WavHeader)
//! - [`config`]: Runtime configuration (MetronomeConfig)
//! - [`cli`]: Command-line flags (Cli)
//! - [`output`]: File or standard output sink
//! - [`error`]: Error types and codes (MetronomeError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use click_track::{write_click_track, AudioSpec, PlaybackLength};
//!
//! let spec = AudioSpec::new(120, PlaybackLength::Seconds(10))?;
//! let mut wav = Vec::new();
//! let summary = write_click_track(&spec, &mut wav)?;
//! assert_eq!(summary.payload_bytes, 320_000);
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod synthesis;

// Re-export commonly used types at crate root for convenience
pub use audio::{
    write_click_track, write_click_track_with_progress, AudioSpec, ClickTrackEncoder,
    EncodeSummary, PlaybackLength, WavHeader,
};
pub use config::MetronomeConfig;
pub use error::{ErrorCode, MetronomeError, Result};
pub use synthesis::{synthesize, BeatClock};
