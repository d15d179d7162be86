#![doc = r#"
Events stored in a [`Track`](crate::file::Track)

Every event is a [`RawEvent`]: a tick paired with an [`EventMessage`].
The message is one of four shapes, mirroring the binary event bodies:

```text
Channel      <status | omitted> <fixed-length data bytes>
Meta         0xFF <command> <varlen length> <payload>
Sysex        0xF0 <payload> 0xF7
UnknownMeta  0xFF <unregistered command> <varlen length> <payload>
```

Channel and meta events are described by static catalogues of kind
descriptors ([`CHANNEL_KINDS`] and [`META_KINDS`]). The decoder resolves
codes against those catalogues through the [`registry`].
"#]

mod channel;
pub use channel::*;

mod meta;
pub use meta::*;

mod sysex;
pub use sysex::*;

pub mod registry;

#[doc = r#"
The body of an event, without its timing.
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventMessage {
    /// A channel voice event, such as a note on.
    Channel(ChannelEvent),
    /// A meta event with a registered command.
    Meta(MetaEvent),
    /// A system exclusive payload.
    Sysex(SysexEvent),
    /// A meta event whose command is not registered, kept verbatim.
    UnknownMeta(UnknownMetaEvent),
}

impl EventMessage {
    /// Returns the channel event if this is one.
    pub fn as_channel(&self) -> Option<&ChannelEvent> {
        match self {
            Self::Channel(c) => Some(c),
            _ => None,
        }
    }
    /// Returns the meta event if this is one.
    pub fn as_meta(&self) -> Option<&MetaEvent> {
        match self {
            Self::Meta(m) => Some(m),
            _ => None,
        }
    }
    /// Returns the sysex event if this is one.
    pub fn as_sysex(&self) -> Option<&SysexEvent> {
        match self {
            Self::Sysex(s) => Some(s),
            _ => None,
        }
    }
    /// Returns the unknown meta event if this is one.
    pub fn as_unknown_meta(&self) -> Option<&UnknownMetaEvent> {
        match self {
            Self::UnknownMeta(u) => Some(u),
            _ => None,
        }
    }

    /// The meta command byte, for both registered and unknown meta events.
    pub fn meta_command(&self) -> Option<u8> {
        match self {
            Self::Meta(m) => Some(m.command()),
            Self::UnknownMeta(u) => Some(u.command()),
            _ => None,
        }
    }

    /// True for the end-of-track meta event.
    pub fn is_end_of_track(&self) -> bool {
        matches!(self, Self::Meta(m) if m.kind() == MetaKind::EndOfTrack)
    }
}

impl From<ChannelEvent> for EventMessage {
    fn from(value: ChannelEvent) -> Self {
        Self::Channel(value)
    }
}

impl From<MetaEvent> for EventMessage {
    fn from(value: MetaEvent) -> Self {
        Self::Meta(value)
    }
}

impl From<SysexEvent> for EventMessage {
    fn from(value: SysexEvent) -> Self {
        Self::Sysex(value)
    }
}

/// Resolves the command against [`Registry::global`](registry::Registry::global):
/// a registered command becomes [`EventMessage::Meta`], as the decoder would
/// read it back.
impl From<UnknownMetaEvent> for EventMessage {
    fn from(value: UnknownMetaEvent) -> Self {
        let (command, data) = value.into_parts();
        registry::Registry::global().lookup_meta(command).build(data)
    }
}

#[doc = r#"
An [`EventMessage`] at a tick.

Whether the tick is a delta from the previous event or an absolute offset
from the start of the track depends on the [`TickMode`](crate::file::TickMode)
of the owning track.

# Example
```rust
# use patternio::prelude::*;
let event = RawEvent::new(96, ChannelEvent::note_on(Channel::Three, 64, 90));
assert_eq!(event.tick(), 96);
assert_eq!(event.message().as_channel().unwrap().pitch(), Some(64));
```
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawEvent {
    tick: u32,
    message: EventMessage,
}

impl RawEvent {
    /// Create an event at `tick`.
    pub fn new(tick: u32, message: impl Into<EventMessage>) -> Self {
        Self {
            tick,
            message: message.into(),
        }
    }

    /// The tick of the event.
    #[inline]
    pub const fn tick(&self) -> u32 {
        self.tick
    }

    /// Overwrite the tick of the event.
    #[inline]
    pub fn set_tick(&mut self, tick: u32) {
        self.tick = tick;
    }

    /// The event body.
    #[inline]
    pub const fn message(&self) -> &EventMessage {
        &self.message
    }

    /// The event body, mutably.
    #[inline]
    pub fn message_mut(&mut self) -> &mut EventMessage {
        &mut self.message
    }
}
