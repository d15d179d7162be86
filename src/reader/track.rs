use super::{ReadResult, Reader, ReaderError, ReaderErrorKind};
use crate::{
    Channel,
    event::{
        ChannelEvent, EventMessage, META_STATUS, RawEvent, SYSEX_END, SYSEX_START, SysexEvent,
        registry::Registry,
    },
    file::Track,
};
use alloc::vec::Vec;

#[doc = r#"
Decodes the event stream of a track chunk, one event at a time.

The decoder remembers the last channel status byte it read (the running
status) so that events which omit their status byte can be completed.
Use one decoder per stream; [`TrackDecoder::read_track`] clears the
running status before it starts.

# Example
```rust
# use patternio::prelude::*;
// note on, then a second note on that reuses the status byte
let body = [0x00, 0x91, 60, 100, 0x10, 64, 90];
let mut reader = Reader::from_byte_slice(&body);
let track = TrackDecoder::new().read_track(&mut reader).unwrap();

assert_eq!(track.len(), 2);
let second = track.events()[1].message().as_channel().unwrap();
assert_eq!(second.channel(), Channel::Two);
assert_eq!(second.pitch(), Some(64));
```
"#]
#[derive(Debug, Clone)]
pub struct TrackDecoder<'r> {
    registry: &'r Registry,
    running_status: Option<u8>,
}

impl Default for TrackDecoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackDecoder<'static> {
    /// A decoder using the global registry.
    pub fn new() -> Self {
        Self::with_registry(Registry::global())
    }
}

impl<'r> TrackDecoder<'r> {
    /// A decoder resolving kinds through `registry`.
    pub const fn with_registry(registry: &'r Registry) -> Self {
        Self {
            registry,
            running_status: None,
        }
    }

    /// The running status in effect, if any.
    #[inline]
    pub const fn running_status(&self) -> Option<u8> {
        self.running_status
    }

    /// Forget the running status.
    pub fn reset(&mut self) {
        self.running_status = None;
    }

    /// Decode every event until `reader` is exhausted.
    ///
    /// An event cut short by the end of the reader fails the whole track.
    pub fn read_track(&mut self, reader: &mut Reader<'_>) -> ReadResult<Track> {
        self.reset();
        let mut events = Vec::new();
        while !reader.is_empty() {
            events.push(self.read_event(reader)?);
        }
        Ok(Track::with_events(events))
    }

    /// Decode the next event: a delta time followed by an event body.
    pub fn read_event(&mut self, reader: &mut Reader<'_>) -> ReadResult<RawEvent> {
        let tick = reader.read_varlen()?;
        let message = match reader.peek_u8()? {
            META_STATUS => self.read_meta(reader)?,
            SYSEX_START => {
                reader.read_u8()?;
                let data = reader.read_until(SYSEX_END)?;
                SysexEvent::new(data).into()
            }
            _ => self.read_channel(reader)?.into(),
        };
        Ok(RawEvent::new(tick, message))
    }

    fn read_meta(&self, reader: &mut Reader<'_>) -> ReadResult<EventMessage> {
        reader.read_u8()?;
        let command = reader.read_u8()?;
        let len = reader.read_varlen()? as usize;
        let data = reader.read_exact(len)?.to_vec();

        let descriptor = self.registry.lookup_meta(command);
        if !descriptor.is_known() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Unknown meta event {command:#04X} at {}, keeping {len} bytes as is",
                reader.buffer_position()
            );
        }
        Ok(descriptor.build(data))
    }

    fn read_channel(&mut self, reader: &mut Reader<'_>) -> ReadResult<ChannelEvent> {
        let position = reader.buffer_position();
        let byte = reader.read_u8()?;

        let (status, first_data) = if byte & 0x80 != 0 {
            (byte, None)
        } else {
            match self.running_status {
                Some(status) => (status, Some(byte)),
                None => {
                    return Err(ReaderError::new(
                        position,
                        ReaderErrorKind::MissingRunningStatus(byte),
                    ));
                }
            }
        };

        let descriptor = self
            .registry
            .lookup_status(status)
            .ok_or_else(|| ReaderError::new(position, ReaderErrorKind::UnknownStatus(status)))?;
        self.running_status = Some(status);

        let mut data = Vec::with_capacity(descriptor.length);
        data.extend(first_data);
        let rest = descriptor
            .length
            .checked_sub(data.len())
            .ok_or_else(|| ReaderError::new(position, ReaderErrorKind::UnknownStatus(status)))?;
        data.extend_from_slice(reader.read_exact(rest)?);

        Ok(ChannelEvent::new(
            descriptor.kind,
            Channel::from_status(status),
            data,
        ))
    }
}
