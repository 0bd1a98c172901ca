//! Click track encoder.
//!
//! Writes the WAV header, then fills and writes one second of samples at a
//! time from a single reused buffer.

use std::io::Write;

use tracing::{debug, info};

use super::header::{WavHeader, HEADER_LEN};
use super::spec::{AudioSpec, PlaybackLength};
use crate::error::{MetronomeError, Result};
use crate::synthesis::{synthesize, BeatClock};

/// What an encoding run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeSummary {
    /// Whole seconds of audio written after the header.
    pub seconds_written: u64,
    /// Payload bytes written after the header.
    pub payload_bytes: u64,
}

impl EncodeSummary {
    /// Total bytes written including the header.
    pub fn total_bytes(&self) -> u64 {
        HEADER_LEN as u64 + self.payload_bytes
    }
}

/// Stateful encoder owning the beat clock and the per-second buffer.
#[derive(Debug)]
pub struct ClickTrackEncoder {
    spec: AudioSpec,
    clock: BeatClock,
    buffer: Vec<u8>,
}

impl ClickTrackEncoder {
    /// Creates an encoder positioned at the start of the track.
    pub fn new(spec: AudioSpec) -> Self {
        Self {
            clock: BeatClock::with_period(spec.samples_per_beat()),
            buffer: vec![0; spec.bytes_per_second()],
            spec,
        }
    }

    pub fn clock(&self) -> &BeatClock {
        &self.clock
    }

    /// Synthesizes the next second into the internal buffer and returns it.
    ///
    /// Channels are interleaved per frame; the clock advances once per frame.
    pub fn fill_second(&mut self) -> &[u8] {
        let channels = self.spec.channels() as usize;

        for frame in self.buffer.chunks_exact_mut(channels) {
            let sample = synthesize(self.clock.current(), self.clock.last_beat());
            frame.fill(sample);
            self.clock.advance();
        }

        &self.buffer
    }

    /// Writes the full track to `sink`.
    pub fn encode<W: Write>(self, sink: &mut W) -> Result<EncodeSummary> {
        self.encode_with_progress(sink, |_| {})
    }

    /// Writes the full track to `sink`, reporting each completed second.
    ///
    /// A header write failure aborts before any payload is produced. For
    /// continuous specs this only returns once the sink fails.
    pub fn encode_with_progress<W, F>(
        mut self,
        sink: &mut W,
        mut on_second: F,
    ) -> Result<EncodeSummary>
    where
        W: Write,
        F: FnMut(u64),
    {
        let header = WavHeader::for_spec(&self.spec);
        header
            .write_to(sink)
            .map_err(|e| MetronomeError::write_failed("WAV header", e))?;

        info!(
            bpm = self.spec.tempo_bpm(),
            samples_per_beat = self.clock.samples_per_beat(),
            first_onset = self.clock.last_beat(),
            "Writing click track"
        );

        let seconds = match self.spec.length() {
            PlaybackLength::Seconds(secs) => Some(secs as u64),
            PlaybackLength::Continuous => None,
        };

        let mut summary = EncodeSummary::default();
        while seconds.map_or(true, |total| summary.seconds_written < total) {
            let second = self.fill_second();
            sink
                .write_all(second)
                .and_then(|()| sink.flush())
                .map_err(|e| MetronomeError::write_failed("audio data", e))?;

            summary.seconds_written += 1;
            summary.payload_bytes += second.len() as u64;
            debug!(second = summary.seconds_written, "Wrote one second of audio");
            on_second(summary.seconds_written);
        }

        Ok(summary)
    }
}

/// Writes a complete click track for `spec` to `sink`.
pub fn write_click_track<W: Write>(spec: &AudioSpec, sink: &mut W) -> Result<EncodeSummary> {
    ClickTrackEncoder::new(*spec).encode(sink)
}

/// Writes a complete click track, calling `on_second` after each second.
pub fn write_click_track_with_progress<W, F>(
    spec: &AudioSpec,
    sink: &mut W,
    on_second: F,
) -> Result<EncodeSummary>
where
    W: Write,
    F: FnMut(u64),
{
    ClickTrackEncoder::new(*spec).encode_with_progress(sink, on_second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::header::STREAMING_SIZE;
    use crate::error::ErrorCode;
    use crate::synthesis::SILENCE;
    use std::io::{self, Cursor};

    /// Sink accepting a fixed number of bytes, then failing.
    struct LimitedSink {
        written: Vec<u8>,
        capacity: usize,
        kind: io::ErrorKind,
    }

    impl LimitedSink {
        fn new(capacity: usize, kind: io::ErrorKind) -> Self {
            Self {
                written: Vec::new(),
                capacity,
                kind,
            }
        }
    }

    impl Write for LimitedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.capacity - self.written.len();
            if room == 0 {
                return Err(io::Error::new(self.kind, "sink full"));
            }
            let n = room.min(buf.len());
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn spec(bpm: u32, secs: u32) -> AudioSpec {
        AudioSpec::new(bpm, PlaybackLength::Seconds(secs)).unwrap()
    }

    fn encode_to_vec(spec: &AudioSpec) -> Vec<u8> {
        let mut out = Vec::new();
        write_click_track(spec, &mut out).unwrap();
        out
    }

    #[test]
    fn tempo_170_one_second() {
        let bytes = encode_to_vec(&spec(170, 1));
        assert_eq!(bytes.len(), HEADER_LEN + 32000);

        let header = WavHeader::read_from(&mut Cursor::new(&bytes[..HEADER_LEN])).unwrap();
        assert_eq!(header.data.data_size, 32000);

        let payload = &bytes[HEADER_LEN..];
        assert_eq!(payload[5647], 127);
        assert_eq!(payload[5647 + 25], 255);
        assert_eq!(payload[5647 + 75], 0);
        assert!(payload[5647 + 101..16941].iter().all(|&s| s == SILENCE));
        // Second onset at 16941 = 5647 + 11294.
        assert_eq!(payload[16941 + 25], 255);
        assert_eq!(payload[16941 + 75], 0);
    }

    #[test]
    fn payload_length_matches_header() {
        for (bpm, secs) in [(1, 1), (60, 2), (170, 3), (1000, 4)] {
            let bytes = encode_to_vec(&spec(bpm, secs));
            let header = WavHeader::read_from(&mut Cursor::new(&bytes[..])).unwrap();
            let payload = bytes.len() - HEADER_LEN;
            assert_eq!(payload as u32, header.data.data_size);
            assert_eq!(payload as u32, secs * 32000);
            assert_eq!(header.riff.riff_size as usize, bytes.len() - 8);
        }
    }

    #[test]
    fn payload_matches_pointwise_synthesis() {
        let bytes = encode_to_vec(&spec(1000, 2));
        let mut clock = BeatClock::new(32000, 1000);
        for &byte in &bytes[HEADER_LEN..] {
            assert_eq!(byte, synthesize(clock.current(), clock.last_beat()));
            clock.advance();
        }
    }

    #[test]
    fn clock_continues_across_seconds() {
        let mut encoder = ClickTrackEncoder::new(spec(60, 3));
        encoder.fill_second();
        assert_eq!(encoder.clock().current(), 32000);
        // First onset 16000 has not yet been followed by another.
        assert_eq!(encoder.clock().last_beat(), 16000);

        let second = encoder.fill_second().to_vec();
        assert_eq!(encoder.clock().last_beat(), 48000);
        assert_eq!(second[16000 + 25], 255);
    }

    #[test]
    fn summary_counts_bytes() {
        let mut out = Vec::new();
        let mut seen = Vec::new();
        let summary =
            write_click_track_with_progress(&spec(120, 3), &mut out, |s| seen.push(s)).unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(summary.seconds_written, 3);
        assert_eq!(summary.payload_bytes, 96000);
        assert_eq!(summary.total_bytes(), out.len() as u64);
    }

    #[test]
    fn header_failure_writes_no_payload() {
        let mut sink = LimitedSink::new(20, io::ErrorKind::WriteZero);
        let err = write_click_track(&spec(120, 1), &mut sink).unwrap_err();
        assert_eq!(err.code, ErrorCode::WriteFailed);
        assert!(err.message.contains("header"));
        assert_eq!(sink.written.len(), 20);
    }

    #[test]
    fn payload_failure_is_reported() {
        let mut sink = LimitedSink::new(HEADER_LEN + 40_000, io::ErrorKind::WriteZero);
        let err = write_click_track(&spec(120, 5), &mut sink).unwrap_err();
        assert_eq!(err.code, ErrorCode::WriteFailed);
        assert_eq!(err.io_kind(), Some(io::ErrorKind::WriteZero));
    }

    #[test]
    fn continuous_streams_until_sink_closes() {
        let spec = AudioSpec::new(170, PlaybackLength::Continuous).unwrap();
        let capacity = HEADER_LEN + 3 * 32000;
        let mut sink = LimitedSink::new(capacity, io::ErrorKind::BrokenPipe);
        let mut seconds = 0;

        let err = write_click_track_with_progress(&spec, &mut sink, |s| seconds = s).unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::BrokenPipe));
        assert_eq!(seconds, 3);

        let header = WavHeader::read_from(&mut Cursor::new(&sink.written[..])).unwrap();
        assert_eq!(header.data.data_size, STREAMING_SIZE);
        assert_eq!(header.riff.riff_size, STREAMING_SIZE);
        assert_eq!(sink.written.len(), capacity);
    }

    #[test]
    fn continuous_payload_matches_finite() {
        let finite = encode_to_vec(&spec(90, 2));

        let streaming = AudioSpec::new(90, PlaybackLength::Continuous).unwrap();
        let mut sink = LimitedSink::new(HEADER_LEN + 2 * 32000, io::ErrorKind::BrokenPipe);
        let _ = write_click_track(&streaming, &mut sink);

        assert_eq!(&sink.written[HEADER_LEN..], &finite[HEADER_LEN..]);
    }

    #[test]
    fn hound_reads_track_back() {
        let bytes = encode_to_vec(&spec(170, 2));
        let payload = bytes[HEADER_LEN..].to_vec();

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let wav_spec = reader.spec();
        assert_eq!(wav_spec.sample_rate, 32000);
        assert_eq!(wav_spec.channels, 1);
        assert_eq!(wav_spec.bits_per_sample, 8);
        assert_eq!(wav_spec.sample_format, hound::SampleFormat::Int);
        assert_eq!(reader.len(), 64000);
        assert_eq!(reader.duration(), 64000);

        // hound exposes unsigned 8-bit samples re-centred around zero.
        let samples: Vec<i8> = reader.samples::<i8>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), payload.len());
        for (&decoded, &raw) in samples.iter().zip(&payload) {
            assert_eq!(decoded as i16, raw as i16 - 128);
        }
    }

    #[test]
    fn writes_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("click.wav");

        let mut sink = crate::output::open_sink(Some(path.as_path())).unwrap();
        let summary = write_click_track(&spec(120, 3), &mut sink).unwrap();
        drop(sink);

        let metadata = std::fs::metadata(&path).unwrap();
        assert_eq!(metadata.len(), summary.total_bytes());

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 32000);
        assert_eq!(reader.duration(), 3 * 32000);
    }
}
