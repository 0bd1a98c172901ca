//! Beat clock tracking click onsets in the sample domain.
//!
//! The first onset sits half a beat into the track so playback does not
//! open with a click at sample zero. Onsets advance only when the distance
//! from the previous onset is exactly one beat period.

/// Beat period in samples, rounded to the nearest whole sample.
pub fn samples_per_beat(sample_rate: u32, tempo_bpm: u32) -> u32 {
    (sample_rate as f64 * 60.0 / tempo_bpm as f64).round() as u32
}

/// Cursor over the global sample index and the most recent onset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatClock {
    samples_per_beat: u64,
    last_beat: u64,
    current: u64,
}

impl BeatClock {
    /// Creates a clock positioned at sample zero.
    pub fn new(sample_rate: u32, tempo_bpm: u32) -> Self {
        Self::with_period(samples_per_beat(sample_rate, tempo_bpm))
    }

    /// Creates a clock from an explicit beat period.
    pub fn with_period(samples_per_beat: u32) -> Self {
        let samples_per_beat = samples_per_beat as u64;
        Self {
            samples_per_beat,
            last_beat: samples_per_beat / 2,
            current: 0,
        }
    }

    pub fn samples_per_beat(&self) -> u64 {
        self.samples_per_beat
    }

    /// Onset of the most recent click.
    pub fn last_beat(&self) -> u64 {
        self.last_beat
    }

    /// Global index of the next sample frame to synthesize.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Moves past the current sample frame.
    ///
    /// Must be called after the frame at `current()` was synthesized. If that
    /// frame lies exactly one period after the last onset it becomes the new
    /// onset. Skipped indices never trigger an onset.
    pub fn advance(&mut self) {
        if self.current.checked_sub(self.last_beat) == Some(self.samples_per_beat) {
            self.last_beat = self.current;
        }
        self.current += 1;
    }
}
