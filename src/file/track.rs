use crate::event::RawEvent;
use alloc::vec::Vec;
use core::ops::Range;

/// Whether event ticks are deltas or offsets from the start of the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickMode {
    /// Each tick is the delta since the previous event. Files store ticks this way.
    #[default]
    Relative,
    /// Each tick counts from the start of the track.
    Absolute,
}

#[doc = r#"
An ordered list of events.

Ticks are interpreted according to the track's [`TickMode`]. Converting
between modes rewrites every tick in place and is exact in both
directions; converting to the mode already in use does nothing.

# Example
```rust
# use patternio::prelude::*;
let mut track = Track::with_events([
    RawEvent::new(0, ChannelEvent::note_on(Channel::One, 60, 100)),
    RawEvent::new(480, ChannelEvent::note_off(Channel::One, 60, 0)),
    RawEvent::new(480, ChannelEvent::note_on(Channel::One, 62, 100)),
]);

track.make_ticks_absolute();
let ticks: Vec<u32> = track.iter().map(RawEvent::tick).collect();
assert_eq!(ticks, [0, 480, 960]);

track.make_ticks_absolute();
assert_eq!(track.events()[2].tick(), 960);

track.make_ticks_relative();
assert_eq!(track.events()[2].tick(), 480);
```
"#]
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<RawEvent>,
    tick_mode: TickMode,
}

impl Track {
    /// An empty track with relative ticks.
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            tick_mode: TickMode::Relative,
        }
    }

    /// A track of relative-tick events.
    pub fn with_events(events: impl IntoIterator<Item = RawEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            tick_mode: TickMode::Relative,
        }
    }

    /// A track whose events use the given tick mode.
    pub fn with_mode(events: impl IntoIterator<Item = RawEvent>, tick_mode: TickMode) -> Self {
        Self {
            events: events.into_iter().collect(),
            tick_mode,
        }
    }

    /// Append an event. Its tick is read in the track's current mode.
    pub fn push(&mut self, event: RawEvent) {
        self.events.push(event);
    }

    /// The events of the track.
    pub fn events(&self) -> &[RawEvent] {
        &self.events
    }

    /// The events of the track, mutably.
    pub fn events_mut(&mut self) -> &mut Vec<RawEvent> {
        &mut self.events
    }

    /// Iterate over the events.
    pub fn iter(&self) -> core::slice::Iter<'_, RawEvent> {
        self.events.iter()
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when the track has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The current tick mode.
    #[inline]
    pub const fn tick_mode(&self) -> TickMode {
        self.tick_mode
    }

    /// Convert to the given mode.
    pub fn set_tick_mode(&mut self, mode: TickMode) {
        match mode {
            TickMode::Absolute => self.make_ticks_absolute(),
            TickMode::Relative => self.make_ticks_relative(),
        }
    }

    /// Rewrite every tick as an offset from the start of the track.
    pub fn make_ticks_absolute(&mut self) {
        if self.tick_mode == TickMode::Absolute {
            return;
        }
        let mut running = 0u32;
        for event in &mut self.events {
            running = running.wrapping_add(event.tick());
            event.set_tick(running);
        }
        self.tick_mode = TickMode::Absolute;
    }

    /// Rewrite every tick as a delta from the previous event.
    ///
    /// Events out of tick order produce deltas that wrap around `u32`; the
    /// conversion back is still exact, but the writer will reject them.
    pub fn make_ticks_relative(&mut self) {
        if self.tick_mode == TickMode::Relative {
            return;
        }
        let mut previous = 0u32;
        for event in &mut self.events {
            let absolute = event.tick();
            event.set_tick(absolute.wrapping_sub(previous));
            previous = absolute;
        }
        self.tick_mode = TickMode::Relative;
    }

    /// Stable sort of the events by time, keeping the current tick mode.
    pub fn sort_by_tick(&mut self) {
        let mode = self.tick_mode;
        self.make_ticks_absolute();
        self.events.sort_by_key(RawEvent::tick);
        self.set_tick_mode(mode);
    }

    /// Absolute tick of the last event.
    pub fn duration(&self) -> u32 {
        match self.tick_mode {
            TickMode::Absolute => self.events.iter().map(RawEvent::tick).max().unwrap_or(0),
            TickMode::Relative => self
                .events
                .iter()
                .fold(0u32, |acc, e| acc.wrapping_add(e.tick())),
        }
    }

    /// A new track holding clones of the events in `range`, in the same mode.
    ///
    /// The range is clamped to the track's length.
    pub fn slice(&self, range: Range<usize>) -> Self {
        let end = range.end.min(self.events.len());
        let start = range.start.min(end);
        Self {
            events: self.events[start..end].to_vec(),
            tick_mode: self.tick_mode,
        }
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a RawEvent;
    type IntoIter = core::slice::Iter<'a, RawEvent>;
    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl IntoIterator for Track {
    type Item = RawEvent;
    type IntoIter = alloc::vec::IntoIter<RawEvent>;
    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl FromIterator<RawEvent> for Track {
    fn from_iter<T: IntoIterator<Item = RawEvent>>(iter: T) -> Self {
        Self::with_events(iter)
    }
}
