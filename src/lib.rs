#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]
#![doc = r#"
Symbolic musical patterns and a Standard MIDI File codec.

A [`Pattern`](crate::file::Pattern) owns a list of
[`Track`](crate::file::Track)s, and each track owns an ordered list of
[`RawEvent`](crate::event::RawEvent)s. Patterns are read from and written to
the binary SMF layout:

```text
File header:  "MThd" | u32 header length (6) | u16 format | u16 track count | u16 resolution
Track:        "MTrk" | u32 byte length | events...
Event:        varlen delta time | event body
```

# Example
```rust
# use patternio::prelude::*;
let mut track = Track::default();
track.push(RawEvent::new(0, ChannelEvent::note_on(Channel::One, 60, 100)));
track.push(RawEvent::new(480, ChannelEvent::note_off(Channel::One, 60, 0)));
track.push(RawEvent::new(0, MetaEvent::end_of_track()));

let mut pattern = Pattern::new(FormatType::SingleMultiChannel, 480);
pattern.push_track(track);

let bytes = pattern.to_bytes().unwrap();
let parsed = Pattern::parse(&bytes).unwrap();
assert_eq!(parsed, pattern);
```
"#]

extern crate alloc;

mod channel;
pub use channel::*;

pub mod event;
pub mod file;
pub mod reader;
pub mod varlen;
pub mod writer;

#[doc = r#"
Commonly used types and functions
"#]
pub mod prelude {
    pub use crate::channel::*;
    pub use crate::event::{
        ChannelEvent, ChannelKind, ChannelKindDescriptor, EventMessage, KeySignature, MetaEvent,
        MetaKind, MetaKindDescriptor, RawEvent, SmpteError, SmpteFps, SmpteOffset, SysexEvent,
        TimeSignature, UnknownMetaEvent,
        registry::{MetaDescriptor, Registry, RegistryBuilder, RegistryError},
    };
    #[cfg(feature = "std")]
    pub use crate::file::io::*;
    pub use crate::file::{FileHeader, FormatType, Pattern, TickMode, Track};
    pub use crate::reader::{
        ReadResult, Reader, ReaderError, ReaderErrorKind, TrackDecoder, read_pattern,
    };
    pub use crate::varlen::{VarLen, decode_varlen, encode_varlen};
    pub use crate::writer::{TrackEncoder, Writer, WriterError, write_pattern};
}
