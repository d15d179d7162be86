#![doc = r#"
The in-memory container: a [`Pattern`] of [`Track`]s

A pattern owns its tracks, and each track owns its events. Nothing is
shared between tracks or patterns; cloning a pattern deep-copies it.
"#]

mod format;
pub use format::*;

mod header;
pub use header::*;

mod track;
pub use track::*;

#[cfg(feature = "std")]
pub mod io;

use crate::{
    reader::{ReadResult, read_pattern},
    writer::{WriterError, write_pattern},
};
use alloc::vec::Vec;
use core::ops::Range;

/// Magic of the file header chunk.
pub const HEADER_MAGIC: [u8; 4] = *b"MThd";
/// Magic of a track chunk.
pub const TRACK_MAGIC: [u8; 4] = *b"MTrk";

/// Ticks per quarter note used by [`Pattern::default`].
pub const DEFAULT_RESOLUTION: u16 = 220;

#[doc = r#"
An ordered list of tracks with a format and a resolution.

The pattern keeps a [`TickMode`]: tracks added with [`Pattern::push_track`]
are converted to it, and [`Pattern::make_ticks_absolute`] /
[`Pattern::make_ticks_relative`] convert every track at once.

A single track may still be converted on its own through
[`Pattern::tracks_mut`]. Each track carries its own mode, which the writer
honours, so a mixed pattern encodes correctly; [`Pattern::tick_mode`] then
only reports the mode last applied to the whole pattern, and the next
pattern-wide conversion brings every track back in line.

# Example
```rust
# use patternio::prelude::*;
let mut pattern = Pattern::new(FormatType::Simultaneous, 96);
pattern.push_track(Track::with_events([
    RawEvent::new(0, MetaEvent::set_tempo(500_000)),
    RawEvent::new(0, MetaEvent::end_of_track()),
]));
pattern.push_track(Track::with_events([
    RawEvent::new(0, ChannelEvent::note_on(Channel::One, 60, 100)),
    RawEvent::new(96, ChannelEvent::note_on(Channel::One, 60, 0)),
    RawEvent::new(0, MetaEvent::end_of_track()),
]));

pattern.make_ticks_absolute();
assert!(pattern.tracks().iter().all(|t| t.tick_mode() == TickMode::Absolute));
assert_eq!(pattern.tracks()[1].events()[1].tick(), 96);
```
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    format: FormatType,
    resolution: u16,
    tick_mode: TickMode,
    tracks: Vec<Track>,
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new(FormatType::Simultaneous, DEFAULT_RESOLUTION)
    }
}

impl Pattern {
    /// An empty pattern with relative ticks.
    pub const fn new(format: FormatType, resolution: u16) -> Self {
        Self {
            format,
            resolution,
            tick_mode: TickMode::Relative,
            tracks: Vec::new(),
        }
    }

    /// A pattern holding `tracks`, converted to relative ticks.
    pub fn with_tracks(
        format: FormatType,
        resolution: u16,
        tracks: impl IntoIterator<Item = Track>,
    ) -> Self {
        let mut pattern = Self::new(format, resolution);
        for track in tracks {
            pattern.push_track(track);
        }
        pattern
    }

    /// Parse a pattern from the bytes of a file.
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        read_pattern(bytes)
    }

    /// Encode the pattern as the bytes of a file.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WriterError> {
        write_pattern(self)
    }

    /// Track layout.
    #[inline]
    pub const fn format(&self) -> FormatType {
        self.format
    }

    /// Change the track layout.
    pub fn set_format(&mut self, format: FormatType) {
        self.format = format;
    }

    /// Ticks per quarter note.
    #[inline]
    pub const fn resolution(&self) -> u16 {
        self.resolution
    }

    /// Change the ticks per quarter note. Event ticks are not rescaled.
    pub fn set_resolution(&mut self, resolution: u16) {
        self.resolution = resolution;
    }

    /// The mode applied by [`Pattern::push_track`] and the last pattern-wide
    /// conversion.
    #[inline]
    pub const fn tick_mode(&self) -> TickMode {
        self.tick_mode
    }

    /// The header describing this pattern.
    ///
    /// The track count saturates at `u16::MAX`; the writer rejects larger patterns.
    pub fn header(&self) -> FileHeader {
        FileHeader::new(
            self.format,
            u16::try_from(self.tracks.len()).unwrap_or(u16::MAX),
            self.resolution,
        )
    }

    /// Append a track, converting it to the pattern's tick mode.
    pub fn push_track(&mut self, mut track: Track) {
        track.set_tick_mode(self.tick_mode);
        self.tracks.push(track);
    }

    /// Remove and return the track at `index`.
    pub fn remove_track(&mut self, index: usize) -> Option<Track> {
        (index < self.tracks.len()).then(|| self.tracks.remove(index))
    }

    /// The tracks.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// The tracks, mutably. A track converted here keeps its own mode
    /// until the next pattern-wide conversion.
    pub fn tracks_mut(&mut self) -> &mut [Track] {
        &mut self.tracks
    }

    /// The track at `index`.
    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True when there are no tracks.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Convert every track to absolute ticks.
    pub fn make_ticks_absolute(&mut self) {
        self.tick_mode = TickMode::Absolute;
        self.tracks.iter_mut().for_each(Track::make_ticks_absolute);
    }

    /// Convert every track to relative ticks.
    pub fn make_ticks_relative(&mut self) {
        self.tick_mode = TickMode::Relative;
        self.tracks.iter_mut().for_each(Track::make_ticks_relative);
    }

    /// A pattern with clones of the tracks in `range`, keeping format,
    /// resolution and tick mode. The range is clamped to the track count.
    pub fn slice(&self, range: Range<usize>) -> Self {
        let end = range.end.min(self.tracks.len());
        let start = range.start.min(end);
        Self {
            format: self.format,
            resolution: self.resolution,
            tick_mode: self.tick_mode,
            tracks: self.tracks[start..end].to_vec(),
        }
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Track;
    type IntoIter = core::slice::Iter<'a, Track>;
    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

impl IntoIterator for Pattern {
    type Item = Track;
    type IntoIter = alloc::vec::IntoIter<Track>;
    fn into_iter(self) -> Self::IntoIter {
        self.tracks.into_iter()
    }
}
