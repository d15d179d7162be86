use crate::event::ChannelKind;
use thiserror::Error;

#[doc = r#"
An error raised while encoding a pattern.

Encoding happens in memory, so an error never leaves a partially written
file behind: [`write_pattern`](super::write_pattern) returns either the
complete file or this error.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriterError {
    /// A delta time or meta length above `0x0FFFFFFF`.
    #[error("{0} does not fit in a variable-length quantity")]
    ValueOutOfRange(u32),
    /// A channel event whose payload length differs from its kind's.
    #[error("{} takes {expected} data bytes, found {found}", kind.name())]
    InvalidEventPayload {
        /// Kind of the offending event.
        kind: ChannelKind,
        /// Length declared by the kind.
        expected: usize,
        /// Length of the payload.
        found: usize,
    },
    /// A channel data byte with its top bit set, which would read back as a status.
    #[error("{} data byte {byte:#04X} has its top bit set", kind.name())]
    DataByteOutOfRange {
        /// Kind of the offending event.
        kind: ChannelKind,
        /// The byte.
        byte: u8,
    },
    /// A sysex payload containing the `0xF7` terminator.
    #[error("Sysex payload contains the terminator at index {index}")]
    SysexTerminatorInPayload {
        /// Offset of the terminator within the payload.
        index: usize,
    },
    /// More tracks than the header's `u16` count can hold.
    #[error("{0} tracks do not fit in a file header")]
    TooManyTracks(usize),
    /// A track body longer than its `u32` length field can hold.
    #[error("Track body of {0} bytes is too long")]
    TrackTooLong(usize),
}
