#![doc = r#"
Encoding of Standard MIDI Files

[`write_pattern`] encodes a whole [`Pattern`]. It is built from a
[`Writer`], which frames the header and track chunks, and a
[`TrackEncoder`], which writes the events of one track with running-status
compression.

Every event is checked before it is written: a channel event must carry
exactly as many 7-bit data bytes as its kind declares, and a sysex payload
must not contain the terminator.

# Example
```rust
# use patternio::prelude::*;
let track = Track::with_events([
    RawEvent::new(0, ChannelEvent::note_on(Channel::One, 60, 100)),
    RawEvent::new(480, ChannelEvent::note_off(Channel::One, 60, 0)),
]);
let pattern = Pattern::with_tracks(FormatType::SingleMultiChannel, 480, [track]);

let bytes = write_pattern(&pattern).unwrap();
assert_eq!(&bytes[..4], b"MThd");
assert_eq!(&bytes[14..18], b"MTrk");
assert_eq!(&bytes[22..], &[0x00, 0x90, 60, 100, 0x83, 0x60, 0x80, 60, 0]);
```
"#]

mod error;
pub use error::*;

mod track;
pub use track::*;

use crate::file::{FileHeader, Pattern, TRACK_MAGIC, Track};
use alloc::vec::Vec;

/// Builds the bytes of a file chunk by chunk.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
    encoder: TrackEncoder,
}

impl Writer {
    /// An empty writer.
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            encoder: TrackEncoder::new(),
        }
    }

    /// Append the `MThd` chunk.
    pub fn write_header(&mut self, header: &FileHeader) {
        self.buf.extend_from_slice(&header.to_bytes());
    }

    /// Append an `MTrk` chunk holding the events of `track`.
    ///
    /// Nothing is appended if an event fails to encode.
    pub fn write_track(&mut self, track: &Track) -> Result<(), WriterError> {
        let mut body = Vec::new();
        self.encoder.encode_track(track, &mut body)?;
        let len = u32::try_from(body.len()).map_err(|_| WriterError::TrackTooLong(body.len()))?;

        self.buf.extend_from_slice(&TRACK_MAGIC);
        self.buf.extend_from_slice(&len.to_be_bytes());
        self.buf.append(&mut body);
        Ok(())
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Encode a whole pattern.
///
/// Tracks are written in order, each framed as an `MTrk` chunk. A pattern in
/// absolute tick mode is written as deltas without being modified.
pub fn write_pattern(pattern: &Pattern) -> Result<Vec<u8>, WriterError> {
    if pattern.len() > usize::from(u16::MAX) {
        return Err(WriterError::TooManyTracks(pattern.len()));
    }

    let mut writer = Writer::new();
    writer.write_header(&pattern.header());
    for (_index, track) in pattern.tracks().iter().enumerate() {
        writer.write_track(track)?;
        #[cfg(feature = "tracing")]
        tracing::trace!("encoded track {_index} with {} events", track.len());
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "encoded {} tracks into {} bytes",
        pattern.len(),
        writer.as_bytes().len()
    );
    Ok(writer.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Channel,
        event::{ChannelEvent, MetaEvent, RawEvent},
        file::{FormatType, TickMode},
    };
    use pretty_assertions::assert_eq;

    fn notes() -> Track {
        Track::with_events([
            RawEvent::new(0, ChannelEvent::note_on(Channel::One, 60, 100)),
            RawEvent::new(480, ChannelEvent::note_off(Channel::One, 60, 0)),
        ])
    }

    #[test]
    fn single_track_file() {
        let pattern = Pattern::with_tracks(FormatType::SingleMultiChannel, 480, [notes()]);
        assert_eq!(
            write_pattern(&pattern).unwrap(),
            [
                b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0, //
                b'M', b'T', b'r', b'k', 0, 0, 0, 9, //
                0x00, 0x90, 60, 100, //
                0x83, 0x60, 0x80, 60, 0,
            ]
        );
    }

    #[test]
    fn each_track_restarts_running_status() {
        let pattern = Pattern::with_tracks(FormatType::Simultaneous, 96, [notes(), notes()]);
        let bytes = write_pattern(&pattern).unwrap();
        let first = 14 + 8 + 9;
        assert_eq!(&bytes[first..first + 4], b"MTrk");
        assert_eq!(&bytes[first + 8..first + 10], &[0x00, 0x90]);
    }

    #[test]
    fn absolute_pattern_is_not_modified() {
        let mut pattern = Pattern::with_tracks(FormatType::SingleMultiChannel, 480, [notes()]);
        let relative = write_pattern(&pattern).unwrap();

        pattern.make_ticks_absolute();
        let before = pattern.clone();
        assert_eq!(write_pattern(&pattern).unwrap(), relative);
        assert_eq!(pattern, before);
        assert_eq!(pattern.tick_mode(), TickMode::Absolute);
    }

    #[test]
    fn failed_track_leaves_writer_untouched() {
        let mut writer = Writer::new();
        writer.write_track(&notes()).unwrap();
        let len = writer.as_bytes().len();

        let bad = Track::with_events([
            RawEvent::new(0, MetaEvent::end_of_track()),
            RawEvent::new(0, ChannelEvent::note_on(Channel::One, 200, 1)),
        ]);
        assert!(writer.write_track(&bad).is_err());
        assert_eq!(writer.as_bytes().len(), len);
    }

    #[test]
    fn empty_pattern() {
        let pattern = Pattern::new(FormatType::Simultaneous, 220);
        assert_eq!(
            write_pattern(&pattern).unwrap(),
            [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 0, 0, 0xDC]
        );
    }
}
