#![doc = r#"
Meta events

Meta events carry information about a track rather than sound: its name,
tempo changes, time and key signatures, markers, and so on. On the wire
they are `0xFF <command> <varlen length> <payload>`.

Payloads are always kept verbatim. The typed accessors on [`MetaEvent`]
interpret them on demand and return `None` when the payload does not
have the expected shape.
"#]

mod smpte_offset;
pub use smpte_offset::*;

use crate::Channel;
use alloc::{borrow::Cow, string::String, vec::Vec};

/// The registered meta event kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum MetaKind {
    SequenceNumber,
    Text,
    Copyright,
    TrackName,
    InstrumentName,
    Lyrics,
    Marker,
    CuePoint,
    ProgramName,
    ChannelPrefix,
    Port,
    TrackLoop,
    EndOfTrack,
    SetTempo,
    SmpteOffset,
    TimeSignature,
    KeySignature,
    SequencerSpecific,
}

/// Static description of a [`MetaKind`].
#[derive(Debug, PartialEq, Eq)]
pub struct MetaKindDescriptor {
    /// The kind described.
    pub kind: MetaKind,
    /// Human-readable name.
    pub name: &'static str,
    /// The byte following `0xFF`.
    pub command: u8,
    /// Conventional payload length, `None` when variable.
    ///
    /// Informational only: decoded payloads keep whatever length the file had.
    pub length: Option<usize>,
}

const fn meta(
    kind: MetaKind,
    name: &'static str,
    command: u8,
    length: Option<usize>,
) -> MetaKindDescriptor {
    MetaKindDescriptor {
        kind,
        name,
        command,
        length,
    }
}

/// The catalogue of meta event kinds.
pub static META_KINDS: [MetaKindDescriptor; 18] = [
    meta(MetaKind::SequenceNumber, "Sequence Number", 0x00, Some(2)),
    meta(MetaKind::Text, "Text", 0x01, None),
    meta(MetaKind::Copyright, "Copyright Notice", 0x02, None),
    meta(MetaKind::TrackName, "Track Name", 0x03, None),
    meta(MetaKind::InstrumentName, "Instrument Name", 0x04, None),
    meta(MetaKind::Lyrics, "Lyrics", 0x05, None),
    meta(MetaKind::Marker, "Marker", 0x06, None),
    meta(MetaKind::CuePoint, "Cue Point", 0x07, None),
    meta(MetaKind::ProgramName, "Program Name", 0x08, None),
    meta(MetaKind::ChannelPrefix, "Channel Prefix", 0x20, Some(1)),
    meta(MetaKind::Port, "MIDI Port/Cable", 0x21, Some(1)),
    meta(MetaKind::TrackLoop, "Track Loop", 0x2E, None),
    meta(MetaKind::EndOfTrack, "End of Track", 0x2F, Some(0)),
    meta(MetaKind::SetTempo, "Set Tempo", 0x51, Some(3)),
    meta(MetaKind::SmpteOffset, "SMPTE Offset", 0x54, Some(5)),
    meta(MetaKind::TimeSignature, "Time Signature", 0x58, Some(4)),
    meta(MetaKind::KeySignature, "Key Signature", 0x59, Some(2)),
    meta(MetaKind::SequencerSpecific, "Sequencer Specific", 0x7F, None),
];

impl MetaKind {
    /// The catalogue entry for this kind.
    pub fn descriptor(self) -> &'static MetaKindDescriptor {
        // the catalogue is declared in variant order
        &META_KINDS[self as usize]
    }
    /// The command byte of this kind.
    #[inline]
    pub fn command(self) -> u8 {
        self.descriptor().command
    }
    /// Human-readable name.
    #[inline]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
    /// True for the kinds whose payload is text.
    pub const fn is_text(self) -> bool {
        use MetaKind::*;
        matches!(
            self,
            Text | Copyright
                | TrackName
                | InstrumentName
                | Lyrics
                | Marker
                | CuePoint
                | ProgramName
        )
    }
}

/// Status byte of a meta event.
pub const META_STATUS: u8 = 0xFF;

/// Microseconds per quarter note at 120 beats per minute.
pub const DEFAULT_TEMPO: u32 = 500_000;

const MICROS_PER_MINUTE: f64 = 60_000_000.;

#[doc = r#"
A time signature as stored in a `0x58` meta event.

# Example
```rust
# use patternio::prelude::*;
let sig = TimeSignature::new(6, 8);
assert_eq!(sig.denominator(), 8);
let event = MetaEvent::time_signature(sig);
assert_eq!(event.data(), &[6, 3, 24, 8]);
```
"#]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar.
    pub numerator: u8,
    /// The denominator as a power of two (`2` means quarter notes).
    pub denominator_pow2: u8,
    /// MIDI clocks per metronome click.
    pub clocks_per_click: u8,
    /// Notated 32nd notes per MIDI quarter note.
    pub thirty_seconds_per_quarter: u8,
}

impl TimeSignature {
    /// `numerator/denominator` with a click every quarter note.
    ///
    /// `denominator` is rounded down to a power of two.
    pub fn new(numerator: u8, denominator: u8) -> Self {
        Self {
            numerator,
            denominator_pow2: denominator.max(1).ilog2() as u8,
            clocks_per_click: 24,
            thirty_seconds_per_quarter: 8,
        }
    }

    /// The denominator of the signature.
    pub const fn denominator(&self) -> u32 {
        1u32 << (self.denominator_pow2 as u32 & 0x1F)
    }

    fn to_bytes(self) -> [u8; 4] {
        [
            self.numerator,
            self.denominator_pow2,
            self.clocks_per_click,
            self.thirty_seconds_per_quarter,
        ]
    }
}

/// A key signature as stored in a `0x59` meta event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// Sharps when positive, flats when negative.
    pub accidentals: i8,
    /// Minor key when true.
    pub minor: bool,
}

#[doc = r#"
A meta event with a registered command.

# Example
```rust
# use patternio::prelude::*;
let tempo = MetaEvent::set_tempo(750_000);
assert_eq!(tempo.data(), &[0x0B, 0x71, 0xB0]);
assert_eq!(tempo.bpm(), Some(80.));

let name = MetaEvent::text(MetaKind::TrackName, "Piano");
assert_eq!(name.text_content().as_deref(), Some("Piano"));
```
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaEvent {
    kind: MetaKind,
    data: Vec<u8>,
}

impl MetaEvent {
    /// Create an event from a kind and its raw payload.
    pub fn new(kind: MetaKind, data: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }

    /// A text-like event (`0x01`..=`0x08`). The text is stored as UTF-8.
    pub fn text(kind: MetaKind, text: &str) -> Self {
        Self::new(kind, text.as_bytes())
    }

    /// `FF 00 02 ss ss`
    pub fn sequence_number(number: u16) -> Self {
        Self::new(MetaKind::SequenceNumber, number.to_be_bytes())
    }

    /// `FF 20 01 cc`
    pub fn channel_prefix(channel: Channel) -> Self {
        Self::new(MetaKind::ChannelPrefix, [channel.to_nibble()])
    }

    /// `FF 2F 00`
    pub fn end_of_track() -> Self {
        Self::new(MetaKind::EndOfTrack, Vec::new())
    }

    /// `FF 51 03 tt tt tt`, microseconds per quarter note.
    ///
    /// Only the low 24 bits are stored.
    pub fn set_tempo(micros_per_quarter_note: u32) -> Self {
        let [_, a, b, c] = micros_per_quarter_note.to_be_bytes();
        Self::new(MetaKind::SetTempo, [a, b, c])
    }

    /// A tempo event from beats per minute.
    pub fn set_bpm(bpm: f64) -> Self {
        Self::set_tempo((MICROS_PER_MINUTE / bpm) as u32)
    }

    /// `FF 54 05 hr mn se fr ff`
    pub fn smpte_offset(offset: &SmpteOffset) -> Self {
        Self::new(MetaKind::SmpteOffset, offset.to_bytes())
    }

    /// `FF 58 04 nn dd cc bb`
    pub fn time_signature(signature: TimeSignature) -> Self {
        Self::new(MetaKind::TimeSignature, signature.to_bytes())
    }

    /// `FF 59 02 sf mi`
    pub fn key_signature(signature: KeySignature) -> Self {
        Self::new(
            MetaKind::KeySignature,
            [signature.accidentals as u8, signature.minor as u8],
        )
    }

    /// The kind of event.
    #[inline]
    pub const fn kind(&self) -> MetaKind {
        self.kind
    }

    /// The command byte following `0xFF`.
    #[inline]
    pub fn command(&self) -> u8 {
        self.kind.command()
    }

    /// The raw payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The raw payload, mutably.
    pub fn data_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// The payload of a text-like event, lossily decoded as UTF-8.
    pub fn text_content(&self) -> Option<Cow<'_, str>> {
        self.kind
            .is_text()
            .then(|| String::from_utf8_lossy(&self.data))
    }

    /// The number of a sequence number event.
    pub fn sequence(&self) -> Option<u16> {
        match (self.kind, self.data.as_slice()) {
            (MetaKind::SequenceNumber, [hi, lo]) => Some(u16::from_be_bytes([*hi, *lo])),
            _ => None,
        }
    }

    /// The channel of a channel prefix event.
    pub fn prefix_channel(&self) -> Option<Channel> {
        match (self.kind, self.data.as_slice()) {
            (MetaKind::ChannelPrefix, [c]) => Channel::try_from(*c).ok(),
            _ => None,
        }
    }

    /// Microseconds per quarter note of a tempo event.
    pub fn tempo(&self) -> Option<u32> {
        match (self.kind, self.data.as_slice()) {
            (MetaKind::SetTempo, [a, b, c]) => Some(u32::from_be_bytes([0, *a, *b, *c])),
            _ => None,
        }
    }

    /// Beats per minute of a tempo event.
    pub fn bpm(&self) -> Option<f64> {
        self.tempo()
            .filter(|&t| t > 0)
            .map(|t| MICROS_PER_MINUTE / t as f64)
    }

    /// The signature of a time signature event.
    pub fn time_signature_value(&self) -> Option<TimeSignature> {
        match (self.kind, self.data.as_slice()) {
            (MetaKind::TimeSignature, [n, d, c, b]) => Some(TimeSignature {
                numerator: *n,
                denominator_pow2: *d,
                clocks_per_click: *c,
                thirty_seconds_per_quarter: *b,
            }),
            _ => None,
        }
    }

    /// The signature of a key signature event.
    pub fn key_signature_value(&self) -> Option<KeySignature> {
        match (self.kind, self.data.as_slice()) {
            (MetaKind::KeySignature, [sf, mi]) => Some(KeySignature {
                accidentals: *sf as i8,
                minor: *mi != 0,
            }),
            _ => None,
        }
    }

    /// The offset of a SMPTE offset event.
    ///
    /// `None` for other kinds, an error when the payload is malformed.
    pub fn smpte_offset_value(&self) -> Option<Result<SmpteOffset, SmpteError>> {
        (self.kind == MetaKind::SmpteOffset).then(|| SmpteOffset::parse(&self.data))
    }
}

#[doc = r#"
A meta event whose command is not in the registry.

The command and payload are kept so that the event is written back
byte for byte. Converting one into an [`EventMessage`](crate::event::EventMessage)
turns a registered command into a [`MetaEvent`], so the event reads back
as the same variant it was written as.
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnknownMetaEvent {
    command: u8,
    data: Vec<u8>,
}

impl UnknownMetaEvent {
    /// Create an event from a raw command and payload.
    pub fn new(command: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            command,
            data: data.into(),
        }
    }
    /// The command byte following `0xFF`.
    #[inline]
    pub const fn command(&self) -> u8 {
        self.command
    }
    /// The raw payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    pub(crate) fn into_parts(self) -> (u8, Vec<u8>) {
        (self.command, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalogue_is_in_variant_order() {
        for (i, descriptor) in META_KINDS.iter().enumerate() {
            assert_eq!(descriptor.kind as usize, i);
            assert_eq!(descriptor.kind.descriptor(), descriptor);
        }
    }

    #[test]
    fn tempo_round_trip() {
        let tempo = MetaEvent::set_bpm(120.);
        assert_eq!(tempo.tempo(), Some(DEFAULT_TEMPO));
        assert_eq!(tempo.data(), &[0x07, 0xA1, 0x20]);
        assert_eq!(tempo.bpm(), Some(120.));
    }

    #[test]
    fn malformed_tempo_has_no_value() {
        let short = MetaEvent::new(MetaKind::SetTempo, [0x07, 0xA1]);
        assert_eq!(short.tempo(), None);
        assert_eq!(short.bpm(), None);
    }

    #[test]
    fn key_signature_is_signed() {
        let e_flat_minor = KeySignature {
            accidentals: -6,
            minor: true,
        };
        let event = MetaEvent::key_signature(e_flat_minor);
        assert_eq!(event.data(), &[0xFA, 0x01]);
        assert_eq!(event.key_signature_value(), Some(e_flat_minor));
    }

    #[test]
    fn time_signature_denominator() {
        let sig = TimeSignature::new(3, 4);
        assert_eq!(sig.denominator_pow2, 2);
        let event = MetaEvent::time_signature(sig);
        assert_eq!(event.time_signature_value().unwrap().denominator(), 4);
    }

    #[test]
    fn text_only_for_text_kinds() {
        let marker = MetaEvent::text(MetaKind::Marker, "verse");
        assert_eq!(marker.text_content().unwrap(), "verse");
        assert_eq!(MetaEvent::end_of_track().text_content(), None);
    }

    #[test]
    fn sequence_and_prefix() {
        assert_eq!(MetaEvent::sequence_number(258).data(), &[0x01, 0x02]);
        assert_eq!(MetaEvent::sequence_number(258).sequence(), Some(258));
        assert_eq!(
            MetaEvent::channel_prefix(Channel::Ten).prefix_channel(),
            Some(Channel::Ten)
        );
    }
}
