//! Click synthesis module.
//!
//! Provides the beat clock and the per-sample click waveform.

pub mod click;
pub mod clock;

// Re-export commonly used items
pub use click::{synthesize, PULSE_WIDTH, SILENCE};
pub use clock::{samples_per_beat, BeatClock};
