use crate::Channel;
use alloc::vec::Vec;

/// The kinds of channel event a track can carry.
///
/// Each kind is keyed by the high nibble of its status byte and has a
/// fixed payload length, both found in its [`ChannelKindDescriptor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelKind {
    /// `0x8n`: pitch, velocity
    NoteOff,
    /// `0x9n`: pitch, velocity
    NoteOn,
    /// `0xAn`: pitch, pressure
    AfterTouch,
    /// `0xBn`: controller, value
    ControlChange,
    /// `0xCn`: program
    ProgramChange,
    /// `0xDn`: pressure
    ChannelAfterTouch,
    /// `0xEn`: 14-bit bend, least significant 7 bits first
    PitchWheel,
}

/// Static description of a [`ChannelKind`].
#[derive(Debug, PartialEq, Eq)]
pub struct ChannelKindDescriptor {
    /// The kind described.
    pub kind: ChannelKind,
    /// Human-readable name.
    pub name: &'static str,
    /// Status byte with the channel nibble cleared.
    pub status: u8,
    /// Number of data bytes following the status byte.
    pub length: usize,
}

/// The catalogue of channel event kinds.
pub static CHANNEL_KINDS: [ChannelKindDescriptor; 7] = [
    ChannelKindDescriptor {
        kind: ChannelKind::NoteOff,
        name: "Note Off",
        status: 0x80,
        length: 2,
    },
    ChannelKindDescriptor {
        kind: ChannelKind::NoteOn,
        name: "Note On",
        status: 0x90,
        length: 2,
    },
    ChannelKindDescriptor {
        kind: ChannelKind::AfterTouch,
        name: "After Touch",
        status: 0xA0,
        length: 2,
    },
    ChannelKindDescriptor {
        kind: ChannelKind::ControlChange,
        name: "Control Change",
        status: 0xB0,
        length: 2,
    },
    ChannelKindDescriptor {
        kind: ChannelKind::ProgramChange,
        name: "Program Change",
        status: 0xC0,
        length: 1,
    },
    ChannelKindDescriptor {
        kind: ChannelKind::ChannelAfterTouch,
        name: "Channel After Touch",
        status: 0xD0,
        length: 1,
    },
    ChannelKindDescriptor {
        kind: ChannelKind::PitchWheel,
        name: "Pitch Wheel",
        status: 0xE0,
        length: 2,
    },
];

impl ChannelKind {
    /// The catalogue entry for this kind.
    pub fn descriptor(self) -> &'static ChannelKindDescriptor {
        use ChannelKind::*;
        match self {
            NoteOff => &CHANNEL_KINDS[0],
            NoteOn => &CHANNEL_KINDS[1],
            AfterTouch => &CHANNEL_KINDS[2],
            ControlChange => &CHANNEL_KINDS[3],
            ProgramChange => &CHANNEL_KINDS[4],
            ChannelAfterTouch => &CHANNEL_KINDS[5],
            PitchWheel => &CHANNEL_KINDS[6],
        }
    }
    /// Status byte with the channel nibble cleared.
    #[inline]
    pub fn status(self) -> u8 {
        self.descriptor().status
    }
    /// Number of data bytes the kind carries.
    #[inline]
    pub fn length(self) -> usize {
        self.descriptor().length
    }
    /// Human-readable name.
    #[inline]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

const PITCH_WHEEL_CENTER: i16 = 0x2000;

#[doc = r#"
A channel voice event: a kind, a channel, and its data bytes.

The payload is kept as given. A payload whose length differs from
[`ChannelKind::length`] is representable but rejected by the
[`writer`](crate::writer) with
[`WriterError::InvalidEventPayload`](crate::writer::WriterError::InvalidEventPayload).

# Example
```rust
# use patternio::prelude::*;
let mut note = ChannelEvent::note_on(Channel::One, 60, 100);
assert_eq!(note.status_byte(), 0x90);
note.set_velocity(0);
assert!(note.is_note_off());

let bend = ChannelEvent::pitch_wheel(Channel::Two, -2);
assert_eq!(bend.data(), &[0x7E, 0x3F]);
assert_eq!(bend.bend(), Some(-2));
```
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelEvent {
    kind: ChannelKind,
    channel: Channel,
    data: Vec<u8>,
}

impl ChannelEvent {
    /// Create an event from raw parts.
    pub fn new(kind: ChannelKind, channel: Channel, data: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            channel,
            data: data.into(),
        }
    }

    /// `0x8n`
    pub fn note_off(channel: Channel, pitch: u8, velocity: u8) -> Self {
        Self::new(ChannelKind::NoteOff, channel, [pitch, velocity])
    }

    /// `0x9n`
    pub fn note_on(channel: Channel, pitch: u8, velocity: u8) -> Self {
        Self::new(ChannelKind::NoteOn, channel, [pitch, velocity])
    }

    /// `0xAn`
    pub fn after_touch(channel: Channel, pitch: u8, pressure: u8) -> Self {
        Self::new(ChannelKind::AfterTouch, channel, [pitch, pressure])
    }

    /// `0xBn`
    pub fn control_change(channel: Channel, control: u8, value: u8) -> Self {
        Self::new(ChannelKind::ControlChange, channel, [control, value])
    }

    /// `0xCn`
    pub fn program_change(channel: Channel, program: u8) -> Self {
        Self::new(ChannelKind::ProgramChange, channel, [program])
    }

    /// `0xDn`
    pub fn channel_after_touch(channel: Channel, pressure: u8) -> Self {
        Self::new(ChannelKind::ChannelAfterTouch, channel, [pressure])
    }

    /// `0xEn`. `bend` is clamped to `-8192..=8191`.
    pub fn pitch_wheel(channel: Channel, bend: i16) -> Self {
        let mut event = Self::new(ChannelKind::PitchWheel, channel, [0, 0]);
        event.set_bend(bend);
        event
    }

    /// The kind of event.
    #[inline]
    pub const fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// The channel of the event.
    #[inline]
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Move the event to another channel.
    pub fn set_channel(&mut self, channel: Channel) {
        self.channel = channel;
    }

    /// The full status byte: kind nibble and channel nibble.
    #[inline]
    pub fn status_byte(&self) -> u8 {
        self.kind.status() | self.channel.to_nibble()
    }

    /// The data bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The data bytes, mutably.
    pub fn data_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// True if the payload length matches the kind.
    pub fn has_valid_length(&self) -> bool {
        self.data.len() == self.kind.length()
    }

    const fn has_pitch(&self) -> bool {
        matches!(
            self.kind,
            ChannelKind::NoteOff | ChannelKind::NoteOn | ChannelKind::AfterTouch
        )
    }

    /// The key of note and polyphonic after-touch events.
    pub fn pitch(&self) -> Option<u8> {
        if self.has_pitch() {
            self.data.first().copied()
        } else {
            None
        }
    }

    /// Change the key of a note or polyphonic after-touch event.
    pub fn set_pitch(&mut self, pitch: u8) {
        if self.has_pitch() {
            if let Some(byte) = self.data.first_mut() {
                *byte = pitch;
            }
        }
    }

    /// The velocity of note events.
    pub fn velocity(&self) -> Option<u8> {
        match self.kind {
            ChannelKind::NoteOff | ChannelKind::NoteOn => self.data.get(1).copied(),
            _ => None,
        }
    }

    /// Change the velocity of a note event.
    pub fn set_velocity(&mut self, velocity: u8) {
        if matches!(self.kind, ChannelKind::NoteOff | ChannelKind::NoteOn) {
            if let Some(byte) = self.data.get_mut(1) {
                *byte = velocity;
            }
        }
    }

    /// The controller number of a control change.
    pub fn control(&self) -> Option<u8> {
        match self.kind {
            ChannelKind::ControlChange => self.data.first().copied(),
            _ => None,
        }
    }

    /// The second byte of control changes and polyphonic after-touch, the only
    /// byte of program changes and channel after-touch.
    pub fn value(&self) -> Option<u8> {
        match self.kind {
            ChannelKind::ControlChange | ChannelKind::AfterTouch => self.data.get(1).copied(),
            ChannelKind::ProgramChange | ChannelKind::ChannelAfterTouch => {
                self.data.first().copied()
            }
            _ => None,
        }
    }

    /// Change the value byte, see [`ChannelEvent::value`].
    pub fn set_value(&mut self, value: u8) {
        let slot = match self.kind {
            ChannelKind::ControlChange | ChannelKind::AfterTouch => self.data.get_mut(1),
            ChannelKind::ProgramChange | ChannelKind::ChannelAfterTouch => self.data.first_mut(),
            _ => None,
        };
        if let Some(byte) = slot {
            *byte = value;
        }
    }

    /// The program of a program change.
    pub fn program(&self) -> Option<u8> {
        match self.kind {
            ChannelKind::ProgramChange => self.data.first().copied(),
            _ => None,
        }
    }

    /// The signed bend of a pitch wheel event, `0` being centered.
    pub fn bend(&self) -> Option<i16> {
        match (self.kind, self.data.as_slice()) {
            (ChannelKind::PitchWheel, [lsb, msb]) => {
                let raw = ((*msb as i16 & 0x7F) << 7) | (*lsb as i16 & 0x7F);
                Some(raw - PITCH_WHEEL_CENTER)
            }
            _ => None,
        }
    }

    /// Change the bend of a pitch wheel event. Clamped to `-8192..=8191`.
    pub fn set_bend(&mut self, bend: i16) {
        if self.kind != ChannelKind::PitchWheel {
            return;
        }
        let raw = (bend.clamp(-PITCH_WHEEL_CENTER, PITCH_WHEEL_CENTER - 1) + PITCH_WHEEL_CENTER)
            as u16;
        self.data.clear();
        self.data.push((raw & 0x7F) as u8);
        self.data.push(((raw >> 7) & 0x7F) as u8);
    }

    /// A note on with non-zero velocity.
    pub fn is_note_on(&self) -> bool {
        self.kind == ChannelKind::NoteOn && self.velocity().is_some_and(|v| v > 0)
    }

    /// A note off, or a note on with zero velocity.
    pub fn is_note_off(&self) -> bool {
        match self.kind {
            ChannelKind::NoteOff => true,
            ChannelKind::NoteOn => self.velocity() == Some(0),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn descriptors_match_their_kind() {
        for descriptor in &CHANNEL_KINDS {
            assert_eq!(descriptor.kind.descriptor(), descriptor);
            assert_eq!(descriptor.status & 0x0F, 0);
        }
    }

    #[test]
    fn note_accessors() {
        let mut note = ChannelEvent::note_off(Channel::Four, 62, 12);
        assert_eq!(note.status_byte(), 0x83);
        assert_eq!(note.pitch(), Some(62));
        assert_eq!(note.velocity(), Some(12));
        assert_eq!(note.control(), None);
        note.set_pitch(70);
        assert_eq!(note.data(), &[70, 12]);
        assert!(note.is_note_off());
        assert!(!note.is_note_on());
    }

    #[test]
    fn single_byte_kinds_read_byte_zero() {
        let pressure = ChannelEvent::channel_after_touch(Channel::One, 77);
        assert_eq!(pressure.value(), Some(77));
        assert_eq!(pressure.pitch(), None);

        let mut program = ChannelEvent::program_change(Channel::Ten, 5);
        assert_eq!(program.program(), Some(5));
        program.set_value(6);
        assert_eq!(program.data(), &[6]);
    }

    #[test]
    fn pitch_wheel_is_centered_at_0x2000() {
        let center = ChannelEvent::pitch_wheel(Channel::One, 0);
        assert_eq!(center.data(), &[0x00, 0x40]);
        assert_eq!(center.bend(), Some(0));

        let low = ChannelEvent::pitch_wheel(Channel::One, i16::MIN);
        assert_eq!(low.data(), &[0x00, 0x00]);
        assert_eq!(low.bend(), Some(-8192));

        let high = ChannelEvent::pitch_wheel(Channel::One, i16::MAX);
        assert_eq!(high.data(), &[0x7F, 0x7F]);
        assert_eq!(high.bend(), Some(8191));
    }

    #[test]
    fn short_payloads_have_no_accessors() {
        let broken = ChannelEvent::new(ChannelKind::NoteOn, Channel::One, [60]);
        assert!(!broken.has_valid_length());
        assert_eq!(broken.pitch(), Some(60));
        assert_eq!(broken.velocity(), None);
        assert_eq!(
            ChannelEvent::new(ChannelKind::PitchWheel, Channel::One, [1]).bend(),
            None
        );
    }
}
