//! RIFF/WAVE header records.
//!
//! Each record is encoded and decoded field by field in little-endian
//! order, so the byte layout never depends on in-memory struct layout.
//!
//! ```text
//! offset  size  field
//!      0     4  "RIFF"
//!      4     4  riff_size (file length - 8)
//!      8     4  "WAVE"
//!     12     4  "fmt "
//!     16     4  16 (format record body size)
//!     20     2  audio_format (1 = PCM)
//!     22     2  channels
//!     24     4  sample_rate
//!     28     4  byte_rate
//!     32     2  block_align
//!     34     2  bits_per_sample
//!     36     4  "data"
//!     40     4  data_size
//!     44        payload
//! ```

use std::io::{self, Cursor, Read, Write};

use super::spec::AudioSpec;

/// Size of the top-level RIFF record.
pub const RIFF_CHUNK_LEN: usize = 12;

/// Size of the format record including its tag and size fields.
pub const FORMAT_CHUNK_LEN: usize = 24;

/// Declared body size of the format record.
pub const FORMAT_BODY_LEN: u32 = 16;

/// Size of the payload descriptor.
pub const DATA_CHUNK_LEN: usize = 8;

/// Total header length preceding the payload.
pub const HEADER_LEN: usize = RIFF_CHUNK_LEN + FORMAT_CHUNK_LEN + DATA_CHUNK_LEN;

/// Format code for linear PCM.
pub const FORMAT_PCM: u16 = 1;

/// Size value written when the payload length is unknown.
pub const STREAMING_SIZE: u32 = u32::MAX;

fn write_tag<W: Write>(w: &mut W, tag: &[u8; 4]) -> io::Result<()> {
    w.write_all(tag)
}

fn write_u16<W: Write>(w: &mut W, value: u16) -> io::Result<()> {
    w.write_all(&value.to_le_bytes())
}

fn write_u32<W: Write>(w: &mut W, value: u32) -> io::Result<()> {
    w.write_all(&value.to_le_bytes())
}

fn read_tag<R: Read>(r: &mut R) -> io::Result<[u8; 4]> {
    let mut tag = [0u8; 4];
    r.read_exact(&mut tag)?;
    Ok(tag)
}

fn read_u16<R: Read>(r: &mut R) -> io::Result<u16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn expect_tag<R: Read>(r: &mut R, expected: &[u8; 4]) -> io::Result<()> {
    let tag = read_tag(r)?;
    if &tag != expected {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "expected {:?} tag, found {:?}",
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(&tag)
            ),
        ));
    }
    Ok(())
}

/// Top-level `RIFF` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiffChunk {
    /// Bytes following this field: `4 + (8 + 16) + 8 + data_size`.
    pub riff_size: u32,
}

impl RiffChunk {
    /// Writes `RIFF`, the size field and `WAVE`.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write_tag(w, b"RIFF")?;
        write_u32(w, self.riff_size)?;
        write_tag(w, b"WAVE")
    }

    /// Reads the descriptor, rejecting anything but a `RIFF`/`WAVE` pair.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        expect_tag(r, b"RIFF")?;
        let riff_size = read_u32(r)?;
        expect_tag(r, b"WAVE")?;
        Ok(Self { riff_size })
    }
}

/// `fmt ` record describing the sample layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatChunk {
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl FormatChunk {
    /// Derives the format record from an AudioSpec.
    pub fn from_spec(spec: &AudioSpec) -> Self {
        Self {
            audio_format: FORMAT_PCM,
            channels: spec.channels(),
            sample_rate: spec.sample_rate(),
            byte_rate: spec.byte_rate(),
            block_align: spec.block_align(),
            bits_per_sample: spec.bits_per_sample(),
        }
    }

    /// Writes the tag, the body size (always 16) and the six format fields.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write_tag(w, b"fmt ")?;
        write_u32(w, FORMAT_BODY_LEN)?;
        write_u16(w, self.audio_format)?;
        write_u16(w, self.channels)?;
        write_u32(w, self.sample_rate)?;
        write_u32(w, self.byte_rate)?;
        write_u16(w, self.block_align)?;
        write_u16(w, self.bits_per_sample)
    }

    /// Reads a plain 16-byte PCM format record.
    ///
    /// Extended records (body size other than 16) are rejected.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        expect_tag(r, b"fmt ")?;
        let body_len = read_u32(r)?;
        if body_len != FORMAT_BODY_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported format record size {}", body_len),
            ));
        }
        Ok(Self {
            audio_format: read_u16(r)?,
            channels: read_u16(r)?,
            sample_rate: read_u32(r)?,
            byte_rate: read_u32(r)?,
            block_align: read_u16(r)?,
            bits_per_sample: read_u16(r)?,
        })
    }
}

/// `data` descriptor preceding the raw samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChunk {
    pub data_size: u32,
}

impl DataChunk {
    /// Writes `data` and the payload length.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write_tag(w, b"data")?;
        write_u32(w, self.data_size)
    }

    /// Reads the payload descriptor. The reader is left at the first sample.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        expect_tag(r, b"data")?;
        Ok(Self {
            data_size: read_u32(r)?,
        })
    }
}

/// The full 44-byte header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff: RiffChunk,
    pub format: FormatChunk,
    pub data: DataChunk,
}

impl WavHeader {
    /// Builds the header for a spec.
    ///
    /// Continuous specs get [`STREAMING_SIZE`] in both size fields.
    pub fn for_spec(spec: &AudioSpec) -> Self {
        let format = FormatChunk::from_spec(spec);
        let (riff_size, data_size) = match spec.payload_len() {
            Some(payload) => (
                4 + (8 + FORMAT_BODY_LEN) + DATA_CHUNK_LEN as u32 + payload,
                payload,
            ),
            None => (STREAMING_SIZE, STREAMING_SIZE),
        };

        Self {
            riff: RiffChunk { riff_size },
            format,
            data: DataChunk { data_size },
        }
    }

    /// Writes all three records back to back, 44 bytes in total.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.riff.write_to(w)?;
        self.format.write_to(w)?;
        self.data.write_to(w)
    }

    /// Reads a 44-byte header with no chunks between `fmt ` and `data`.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(Self {
            riff: RiffChunk::read_from(r)?,
            format: FormatChunk::read_from(r)?,
            data: DataChunk::read_from(r)?,
        })
    }

    /// Encodes the header into a fixed-size array.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut cursor = Cursor::new([0u8; HEADER_LEN]);
        self.write_to(&mut cursor)
            .expect("header records total exactly HEADER_LEN bytes");
        cursor.into_inner()
    }

    /// Returns true if the header carries the streaming size sentinel.
    pub fn is_streaming(&self) -> bool {
        self.data.data_size == STREAMING_SIZE
    }

    /// Samples per channel described by the header, or None when streaming.
    pub fn sample_count(&self) -> Option<u32> {
        if self.is_streaming() || self.format.block_align == 0 {
            return None;
        }
        Some(self.data.data_size / self.format.block_align as u32)
    }
}
