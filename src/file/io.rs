#![doc = r#"
Reading and writing patterns through `std::io`

# Example
```rust,no_run
# use patternio::prelude::*;
let pattern = read_pattern_file("song.mid")?;
write_pattern_file("copy.mid", &pattern)?;
# Ok::<(), PatternIoError>(())
```
"#]

use super::Pattern;
use crate::{reader::ReaderError, writer::WriterError};
use std::{
    fs,
    io::{Read, Write},
    path::Path,
};
use thiserror::Error;

/// An error raised while moving a pattern to or from an I/O stream.
#[derive(Debug, Error)]
pub enum PatternIoError {
    /// The underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The bytes were not a valid file.
    #[error(transparent)]
    Read(#[from] ReaderError),
    /// The pattern could not be encoded.
    #[error(transparent)]
    Write(#[from] WriterError),
}

impl Pattern {
    /// Read every byte of `reader` and parse them as a file.
    pub fn read_from(mut reader: impl Read) -> Result<Self, PatternIoError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::parse(&bytes)?)
    }

    /// Encode the pattern and write it to `writer`.
    ///
    /// Nothing is written if encoding fails.
    pub fn write_to(&self, mut writer: impl Write) -> Result<(), PatternIoError> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }
}

/// Read a pattern from the file at `path`.
pub fn read_pattern_file(path: impl AsRef<Path>) -> Result<Pattern, PatternIoError> {
    let path = path.as_ref();
    #[cfg(feature = "tracing")]
    tracing::debug!("reading pattern from {}", path.display());
    let bytes = fs::read(path)?;
    Ok(Pattern::parse(&bytes)?)
}

/// Write `pattern` to the file at `path`, replacing it if it exists.
///
/// The pattern is encoded before the file is opened, so an encoding error
/// leaves the file system untouched.
pub fn write_pattern_file(path: impl AsRef<Path>, pattern: &Pattern) -> Result<(), PatternIoError> {
    let path = path.as_ref();
    let bytes = pattern.to_bytes()?;
    #[cfg(feature = "tracing")]
    tracing::debug!("writing {} bytes to {}", bytes.len(), path.display());
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Channel,
        event::{ChannelEvent, MetaEvent, RawEvent},
        file::{FormatType, Track},
        reader::ReaderErrorKind,
    };
    use pretty_assertions::assert_eq;

    fn pattern() -> Pattern {
        Pattern::with_tracks(
            FormatType::SingleMultiChannel,
            480,
            [Track::with_events([
                RawEvent::new(0, ChannelEvent::note_on(Channel::One, 60, 100)),
                RawEvent::new(480, ChannelEvent::note_off(Channel::One, 60, 0)),
                RawEvent::new(0, MetaEvent::end_of_track()),
            ])],
        )
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.mid");

        write_pattern_file(&path, &pattern()).unwrap();
        assert_eq!(read_pattern_file(&path).unwrap(), pattern());
    }

    #[test]
    fn stream_round_trip() {
        let mut bytes = Vec::new();
        pattern().write_to(&mut bytes).unwrap();
        assert_eq!(Pattern::read_from(bytes.as_slice()).unwrap(), pattern());
    }

    #[test]
    fn failed_encode_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.mid");
        let bad = Pattern::with_tracks(
            FormatType::SingleMultiChannel,
            480,
            [Track::with_events([RawEvent::new(
                0,
                ChannelEvent::note_on(Channel::One, 0x80, 0),
            )])],
        );

        let err = write_pattern_file(&path, &bad).unwrap_err();
        assert!(matches!(err, PatternIoError::Write(WriterError::DataByteOutOfRange { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_and_bad_contents() {
        let dir = tempfile::tempdir().unwrap();
        let missing = read_pattern_file(dir.path().join("missing.mid")).unwrap_err();
        assert!(matches!(missing, PatternIoError::Io(_)));

        let path = dir.path().join("short.mid");
        fs::write(&path, b"MThd\0\0").unwrap();
        match read_pattern_file(&path).unwrap_err() {
            PatternIoError::Read(err) => {
                assert_eq!(err.error_kind(), &ReaderErrorKind::TruncatedStream)
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
