//! Click waveform.
//!
//! A click is one full sine cycle squeezed into [`PULSE_WIDTH`] samples,
//! starting at the beat onset and followed by silence. The width is fixed in
//! samples, not in time.

use std::f64::consts::PI;

/// Samples covered by one click cycle.
pub const PULSE_WIDTH: f64 = 100.0;

/// Midpoint of the unsigned 8-bit range.
pub const SILENCE: u8 = u8::MAX / 2;

/// Computes the 8-bit unsigned sample at `global_sample` for a click whose
/// onset is `last_beat`.
///
/// The distance from the onset is signed and only samples more than one
/// pulse width *after* the onset are silent. Samples before the onset are
/// not silenced: they follow the same sine, whose period is 100 samples.
/// Because the first onset is seeded half a beat into the track, the whole
/// lead-in before it is therefore a continuous 320 Hz tone at 32kHz
/// (about 176 ms at 170 BPM, about 30 s at 1 BPM), not silence.
pub fn synthesize(global_sample: u64, last_beat: u64) -> u8 {
    let distance = global_sample as f64 - last_beat as f64;
    let x = distance / PULSE_WIDTH;

    if x > 1.0 {
        return SILENCE;
    }

    let v = (x * 2.0 * PI).sin();

    // [-1, 1] -> [0, 1] -> [0, 255]
    let v = (v / 2.0) + 0.5;
    let v = (v * u8::MAX as f64).clamp(0.0, u8::MAX as f64);

    v as u8
}
