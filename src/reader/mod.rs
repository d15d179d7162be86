#![doc = r#"
Decoding of Standard MIDI Files

[`read_pattern`] decodes a whole file. Underneath, a [`Reader`] walks the
bytes and a [`TrackDecoder`] turns the body of each `MTrk` chunk into
events, carrying the running status from one event to the next.

# Example
```rust
# use patternio::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
    b'M', b'T', b'r', b'k', 0, 0, 0, 10,
    0x00, 0x90, 60, 100,  // note on
    0x83, 0x60, 60, 0,    // running status, 480 ticks later
    0x00, 0xFF, // ...
];
// the end-of-track event is cut short
let err = read_pattern(&bytes).unwrap_err();
assert_eq!(err.error_kind(), &ReaderErrorKind::TruncatedStream);
```
"#]

mod error;
pub use error::*;

mod track;
pub use track::*;

use crate::{
    file::{FileHeader, FormatType, HEADER_MAGIC, Pattern, TRACK_MAGIC},
    varlen::decode_varlen,
};

/// Smallest valid header chunk body.
const MIN_HEADER_LENGTH: u32 = 6;

#[doc = r#"
A cursor over a byte slice that tracks its position for error reporting.

A reader over a chunk body obtained through [`Reader::read_chunk`] reports
positions relative to the start of the whole file.
"#]
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Read from the start of `buf`.
    pub const fn from_byte_slice(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            offset: 0,
        }
    }

    /// Position of the cursor, counted from the start of the outermost buffer.
    #[inline]
    pub const fn buffer_position(&self) -> usize {
        self.offset + self.pos
    }

    /// Bytes left to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True when every byte has been read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn error(&self, kind: ReaderErrorKind) -> ReaderError {
        ReaderError::new(self.buffer_position(), kind)
    }

    /// The next byte, without consuming it.
    pub fn peek_u8(&self) -> ReadResult<u8> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or_else(|| ReaderError::truncated(self.buffer_position()))
    }

    /// Consume one byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let byte = self.peek_u8()?;
        self.pos += 1;
        Ok(byte)
    }

    /// Consume exactly `len` bytes.
    pub fn read_exact(&mut self, len: usize) -> ReadResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(ReaderError::truncated(self.buffer_position()));
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Consume exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }

    /// Consume a big-endian `u16`.
    pub fn read_u16_be(&mut self) -> ReadResult<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Consume a big-endian `u32`.
    pub fn read_u32_be(&mut self) -> ReadResult<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Consume a variable-length quantity.
    pub fn read_varlen(&mut self) -> ReadResult<u32> {
        let (value, consumed) =
            decode_varlen(&self.buf[self.pos..]).map_err(|kind| self.error(kind))?;
        self.pos += consumed;
        Ok(value)
    }

    /// Consume bytes up to `terminator`, returning them without it.
    ///
    /// The terminator is consumed too.
    pub fn read_until(&mut self, terminator: u8) -> ReadResult<&'a [u8]> {
        let rest = &self.buf[self.pos..];
        let Some(len) = rest.iter().position(|&b| b == terminator) else {
            self.pos = self.buf.len();
            return Err(ReaderError::truncated(self.buffer_position()));
        };
        self.pos += len + 1;
        Ok(&rest[..len])
    }

    /// Consume four bytes that must equal `expected`.
    pub fn read_magic(&mut self, expected: [u8; 4]) -> ReadResult<()> {
        let start = self.buffer_position();
        let found = self.read_array::<4>()?;
        if found != expected {
            return Err(ReaderError::new(
                start,
                ReaderErrorKind::BadMagic { expected, found },
            ));
        }
        Ok(())
    }

    /// Consume a chunk with the given magic, returning a reader over its body.
    pub fn read_chunk(&mut self, magic: [u8; 4]) -> ReadResult<Reader<'a>> {
        self.read_magic(magic)?;
        let len = self.read_u32_be()? as usize;
        let offset = self.buffer_position();
        let body = self.read_exact(len)?;
        Ok(Reader {
            buf: body,
            pos: 0,
            offset,
        })
    }

    /// Consume the `MThd` chunk.
    ///
    /// Header bytes beyond the six this crate understands are skipped.
    pub fn read_header(&mut self) -> ReadResult<FileHeader> {
        self.read_magic(HEADER_MAGIC)?;
        let len_pos = self.buffer_position();
        let len = self.read_u32_be()?;
        if len < MIN_HEADER_LENGTH {
            return Err(ReaderError::new(
                len_pos,
                ReaderErrorKind::InvalidHeaderLength(len),
            ));
        }

        let format_pos = self.buffer_position();
        let raw_format = self.read_u16_be()?;
        let format = FormatType::try_from(raw_format).map_err(|_| {
            ReaderError::new(format_pos, ReaderErrorKind::InvalidFormat(raw_format))
        })?;
        let num_tracks = self.read_u16_be()?;
        let resolution = self.read_u16_be()?;

        let padding = (len - MIN_HEADER_LENGTH) as usize;
        if padding > 0 {
            #[cfg(feature = "tracing")]
            tracing::debug!("skipping {padding} bytes of header padding");
            self.read_exact(padding)?;
        }

        Ok(FileHeader::new(format, num_tracks, resolution))
    }
}

/// Decode a whole file.
///
/// Exactly as many `MTrk` chunks as the header announces are read. Bytes
/// after the last of them are ignored.
pub fn read_pattern(bytes: &[u8]) -> ReadResult<Pattern> {
    let mut reader = Reader::from_byte_slice(bytes);
    let header = reader.read_header()?;

    let mut pattern = Pattern::new(header.format, header.resolution);
    let mut decoder = TrackDecoder::new();
    for _index in 0..header.num_tracks {
        let mut chunk = reader.read_chunk(TRACK_MAGIC)?;
        let track = decoder.read_track(&mut chunk)?;
        #[cfg(feature = "tracing")]
        tracing::trace!("decoded track {_index} with {} events", track.len());
        pattern.push_track(track);
    }

    if !reader.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "ignoring {} bytes after the last track",
            reader.remaining()
        );
    }

    Ok(pattern)
}
