//! Audio output module.
//!
//! Provides the WAV format description, header records and the click
//! track encoder.

pub mod encoder;
pub mod header;
pub mod spec;

// Re-export commonly used items
pub use encoder::{
    write_click_track, write_click_track_with_progress, ClickTrackEncoder, EncodeSummary,
};
pub use header::{WavHeader, HEADER_LEN, STREAMING_SIZE};
pub use spec::{AudioSpec, PlaybackLength, BITS_PER_SAMPLE, CHANNELS, SAMPLE_RATE};
