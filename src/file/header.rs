use super::{FormatType, HEADER_MAGIC};

/// Length of the `MThd` body this crate writes.
pub const HEADER_LENGTH: u32 = 6;

#[doc = r#"
The contents of the `MThd` chunk.

`resolution` is the number of ticks per quarter note.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileHeader {
    /// Track layout.
    pub format: FormatType,
    /// Number of `MTrk` chunks following the header.
    pub num_tracks: u16,
    /// Ticks per quarter note.
    pub resolution: u16,
}

impl FileHeader {
    /// Create a new header
    pub const fn new(format: FormatType, num_tracks: u16, resolution: u16) -> Self {
        Self {
            format,
            num_tracks,
            resolution,
        }
    }

    /// The 14 bytes of the header chunk, magic included.
    pub fn to_bytes(&self) -> [u8; 14] {
        let mut out = [0u8; 14];
        out[..4].copy_from_slice(&HEADER_MAGIC);
        out[4..8].copy_from_slice(&HEADER_LENGTH.to_be_bytes());
        out[8..10].copy_from_slice(&self.format.to_u16().to_be_bytes());
        out[10..12].copy_from_slice(&self.num_tracks.to_be_bytes());
        out[12..14].copy_from_slice(&self.resolution.to_be_bytes());
        out
    }
}
