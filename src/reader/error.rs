use thiserror::Error;

#[doc = r#"
An error raised while decoding a file, with the byte offset at which it occurred.

Any decode error aborts the whole parse: no partially decoded pattern is
returned.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Reading at position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderErrorKind {
    /// A chunk did not start with the expected magic.
    #[error("Bad magic: expected {expected:?}, found {found:?}")]
    BadMagic {
        /// The magic the chunk should start with.
        expected: [u8; 4],
        /// The bytes actually found.
        found: [u8; 4],
    },
    /// The input ended before a unit (header, chunk, event, quantity) was complete.
    #[error("Stream truncated")]
    TruncatedStream,
    /// A data byte appeared where a status byte was needed, and no earlier
    /// status is in effect.
    #[error("Data byte {0:#04X} with no running status")]
    MissingRunningStatus(u8),
    /// A status byte that no registered channel kind answers to.
    #[error("Unknown status byte {0:#04X}")]
    UnknownStatus(u8),
    /// A fifth byte continuing a variable-length quantity. Four continuation
    /// bytes followed by the end of input are [`ReaderErrorKind::TruncatedStream`].
    #[error("Variable-length quantity exceeds four bytes")]
    VarLenTooLong,
    /// The header chunk is shorter than the six bytes it must hold.
    #[error("Header length {0} is shorter than 6")]
    InvalidHeaderLength(u32),
    /// The header names a format other than 0, 1 or 2.
    #[error("Invalid format {0}")]
    InvalidFormat(u16),
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if the input ended early.
    pub const fn is_truncated(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::TruncatedStream)
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }
    /// Create a new truncation error
    pub const fn truncated(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::TruncatedStream,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
