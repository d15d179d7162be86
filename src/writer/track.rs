use super::WriterError;
use crate::{
    Channel,
    event::{ChannelEvent, ChannelKind, EventMessage, META_STATUS, SYSEX_END, SYSEX_START, SysexEvent},
    file::{TickMode, Track},
    varlen::{VarLen, encode_varlen},
};
use alloc::vec::Vec;

#[doc = r#"
Encodes the events of one track, applying running-status compression.

A channel event whose kind and channel match the previous channel event
is written without its status byte. [`TrackEncoder::encode_track`] clears
the running status before it starts, so every track begins with a full
status byte.

# Example
```rust
# use patternio::prelude::*;
let track = Track::with_events([
    RawEvent::new(0, ChannelEvent::note_on(Channel::One, 60, 100)),
    RawEvent::new(0, ChannelEvent::note_on(Channel::One, 64, 100)),
]);
let mut body = Vec::new();
TrackEncoder::new().encode_track(&track, &mut body).unwrap();
assert_eq!(body, [0x00, 0x90, 60, 100, 0x00, 64, 100]);
```
"#]
#[derive(Debug, Clone, Default)]
pub struct TrackEncoder {
    running_status: Option<(ChannelKind, Channel)>,
}

impl TrackEncoder {
    /// An encoder with no running status.
    pub const fn new() -> Self {
        Self {
            running_status: None,
        }
    }

    /// The kind and channel of the last status byte written.
    #[inline]
    pub const fn running_status(&self) -> Option<(ChannelKind, Channel)> {
        self.running_status
    }

    /// Forget the running status.
    pub fn reset(&mut self) {
        self.running_status = None;
    }

    /// Append the event stream of `track` to `out`, without chunk framing.
    ///
    /// Absolute ticks are turned into deltas as they are written; the track
    /// itself is left untouched.
    pub fn encode_track(&mut self, track: &Track, out: &mut Vec<u8>) -> Result<(), WriterError> {
        self.reset();
        let mut previous = 0u32;
        for event in track {
            let delta = match track.tick_mode() {
                TickMode::Relative => event.tick(),
                TickMode::Absolute => event.tick().wrapping_sub(previous),
            };
            previous = event.tick();
            self.encode_event(delta, event.message(), out)?;
        }
        Ok(())
    }

    /// Append one event, preceded by its delta time, to `out`.
    ///
    /// Every check runs before the first byte is appended, so `out` is left
    /// as it was when this fails.
    pub fn encode_event(
        &mut self,
        delta: u32,
        message: &EventMessage,
        out: &mut Vec<u8>,
    ) -> Result<(), WriterError> {
        let delta = encode_varlen(delta)?;
        match message {
            EventMessage::Meta(meta) => {
                let len = meta_length(meta.data().len())?;
                out.extend_from_slice(delta.as_bytes());
                write_meta(meta.command(), len, meta.data(), out);
                Ok(())
            }
            EventMessage::UnknownMeta(meta) => {
                let len = meta_length(meta.data().len())?;
                out.extend_from_slice(delta.as_bytes());
                write_meta(meta.command(), len, meta.data(), out);
                Ok(())
            }
            EventMessage::Sysex(sysex) => {
                check_sysex(sysex)?;
                out.extend_from_slice(delta.as_bytes());
                out.push(SYSEX_START);
                out.extend_from_slice(sysex.data());
                out.push(SYSEX_END);
                Ok(())
            }
            EventMessage::Channel(channel) => {
                check_channel(channel)?;
                out.extend_from_slice(delta.as_bytes());
                let current = (channel.kind(), channel.channel());
                if self.running_status != Some(current) {
                    out.push(channel.status_byte());
                    self.running_status = Some(current);
                }
                out.extend_from_slice(channel.data());
                Ok(())
            }
        }
    }
}

fn meta_length(len: usize) -> Result<VarLen, WriterError> {
    encode_varlen(u32::try_from(len).unwrap_or(u32::MAX))
}

fn write_meta(command: u8, len: VarLen, data: &[u8], out: &mut Vec<u8>) {
    out.push(META_STATUS);
    out.push(command);
    out.extend_from_slice(len.as_bytes());
    out.extend_from_slice(data);
}

fn check_channel(event: &ChannelEvent) -> Result<(), WriterError> {
    let kind = event.kind();
    if !event.has_valid_length() {
        return Err(WriterError::InvalidEventPayload {
            kind,
            expected: kind.length(),
            found: event.data().len(),
        });
    }
    if let Some(&byte) = event.data().iter().find(|&&b| b & 0x80 != 0) {
        return Err(WriterError::DataByteOutOfRange { kind, byte });
    }
    Ok(())
}

fn check_sysex(event: &SysexEvent) -> Result<(), WriterError> {
    match event.data().iter().position(|&b| b == SYSEX_END) {
        Some(index) => Err(WriterError::SysexTerminatorInPayload { index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{MetaEvent, RawEvent, UnknownMetaEvent};
    use pretty_assertions::assert_eq;

    fn encode(track: &Track) -> Result<Vec<u8>, WriterError> {
        let mut out = Vec::new();
        TrackEncoder::new().encode_track(track, &mut out)?;
        Ok(out)
    }

    #[test]
    fn status_is_repeated_when_kind_or_channel_changes() {
        let track = Track::with_events([
            RawEvent::new(0, ChannelEvent::note_on(Channel::One, 60, 100)),
            RawEvent::new(0, ChannelEvent::note_on(Channel::Two, 60, 100)),
            RawEvent::new(0, ChannelEvent::note_off(Channel::Two, 60, 0)),
            RawEvent::new(0, ChannelEvent::note_off(Channel::Two, 61, 0)),
        ]);
        assert_eq!(
            encode(&track).unwrap(),
            [
                0x00, 0x90, 60, 100, //
                0x00, 0x91, 60, 100, //
                0x00, 0x81, 60, 0, //
                0x00, 61, 0,
            ]
        );
    }

    #[test]
    fn meta_and_sysex_layout() {
        let track = Track::with_events([
            RawEvent::new(0, MetaEvent::set_tempo(500_000)),
            RawEvent::new(200, SysexEvent::new([0x7E, 0x7F])),
            RawEvent::new(0, UnknownMetaEvent::new(0x7C, Vec::new())),
        ]);
        assert_eq!(
            encode(&track).unwrap(),
            [
                0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, //
                0x81, 0x48, 0xF0, 0x7E, 0x7F, 0xF7, //
                0x00, 0xFF, 0x7C, 0x00,
            ]
        );
    }

    #[test]
    fn absolute_ticks_are_written_as_deltas() {
        let track = Track::with_mode(
            [
                RawEvent::new(100, ChannelEvent::program_change(Channel::One, 1)),
                RawEvent::new(580, ChannelEvent::program_change(Channel::One, 2)),
            ],
            TickMode::Absolute,
        );
        assert_eq!(encode(&track).unwrap(), [0x64, 0xC0, 1, 0x83, 0x60, 2]);
    }

    #[test]
    fn out_of_order_absolute_ticks_are_rejected() {
        let track = Track::with_mode(
            [
                RawEvent::new(100, MetaEvent::end_of_track()),
                RawEvent::new(50, MetaEvent::end_of_track()),
            ],
            TickMode::Absolute,
        );
        assert_eq!(
            encode(&track).unwrap_err(),
            WriterError::ValueOutOfRange(50u32.wrapping_sub(100))
        );
    }

    #[test]
    fn payload_length_must_match_kind() {
        let track = Track::with_events([RawEvent::new(
            0,
            ChannelEvent::new(ChannelKind::NoteOn, Channel::One, [60, 100, 1]),
        )]);
        assert_eq!(
            encode(&track).unwrap_err(),
            WriterError::InvalidEventPayload {
                kind: ChannelKind::NoteOn,
                expected: 2,
                found: 3
            }
        );

        let track = Track::with_events([RawEvent::new(
            0,
            ChannelEvent::new(ChannelKind::ProgramChange, Channel::One, Vec::new()),
        )]);
        assert!(matches!(
            encode(&track),
            Err(WriterError::InvalidEventPayload { found: 0, .. })
        ));
    }

    #[test]
    fn data_bytes_must_be_seven_bit() {
        let track = Track::with_events([RawEvent::new(
            0,
            ChannelEvent::note_on(Channel::One, 0x80, 100),
        )]);
        assert_eq!(
            encode(&track).unwrap_err(),
            WriterError::DataByteOutOfRange {
                kind: ChannelKind::NoteOn,
                byte: 0x80
            }
        );
    }

    #[test]
    fn oversized_meta_length_is_rejected() {
        assert_eq!(
            meta_length(0x1000_0000).unwrap_err(),
            WriterError::ValueOutOfRange(0x1000_0000)
        );
        assert_eq!(meta_length(3).unwrap().as_bytes(), &[0x03]);
    }

    #[test]
    fn failed_event_leaves_output_untouched() {
        let mut encoder = TrackEncoder::new();
        let mut out = alloc::vec![0xAA];
        let failing = [
            EventMessage::from(ChannelEvent::note_on(Channel::One, 0x80, 1)),
            EventMessage::from(SysexEvent::new([0xF7])),
            EventMessage::from(MetaEvent::end_of_track()),
        ];
        for (delta, message) in [(0, &failing[0]), (0, &failing[1]), (0x1000_0000, &failing[2])] {
            assert!(encoder.encode_event(delta, message, &mut out).is_err());
            assert_eq!(out, [0xAA]);
        }
        assert_eq!(encoder.running_status(), None);
    }

    #[test]
    fn sysex_must_not_contain_terminator() {
        let track = Track::with_events([RawEvent::new(0, SysexEvent::new([0x01, 0xF7]))]);
        assert_eq!(
            encode(&track).unwrap_err(),
            WriterError::SysexTerminatorInPayload { index: 1 }
        );
    }
}
