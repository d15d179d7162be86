#![doc = r#"
Lookup of event kinds by their wire codes

A [`Registry`] maps the high nibble of a channel status byte to a
[`ChannelKindDescriptor`], and a meta command byte to a
[`MetaKindDescriptor`]. It is assembled once by a [`RegistryBuilder`] and
never changes afterwards, so a shared reference can be used from any
number of threads without locking.

The decoder uses [`Registry::global`], built from [`CHANNEL_KINDS`] and
[`META_KINDS`] the first time it is needed.

# Example
```rust
# use patternio::prelude::*;
let registry = Registry::global();
assert_eq!(registry.lookup_channel(0x9).unwrap().kind, ChannelKind::NoteOn);
assert!(registry.lookup_channel(0xF).is_none());
assert_eq!(registry.lookup_meta(0x7C), MetaDescriptor::Unknown(0x7C));
```
"#]

use super::{
    CHANNEL_KINDS, ChannelKindDescriptor, EventMessage, META_KINDS, MetaEvent, MetaKindDescriptor,
    UnknownMetaEvent,
};
use alloc::vec::Vec;
use bevy_platform::sync::LazyLock;
use thiserror::Error;

/// A conflict found while assembling a [`Registry`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two channel kinds share a status nibble.
    #[error("{new} registers status {status:#04X} already taken by {existing}")]
    DuplicateChannelStatus {
        /// The contested status byte, channel nibble cleared.
        status: u8,
        /// The kind already registered.
        existing: &'static str,
        /// The kind being registered.
        new: &'static str,
    },
    /// Two meta kinds share a command byte.
    #[error("{new} registers meta command {command:#04X} already taken by {existing}")]
    DuplicateMetaCommand {
        /// The contested command byte.
        command: u8,
        /// The kind already registered.
        existing: &'static str,
        /// The kind being registered.
        new: &'static str,
    },
    /// A channel kind carrying no data bytes or more than two.
    #[error("{name} declares {length} data bytes, expected 1 or 2")]
    InvalidChannelLength {
        /// The declared length.
        length: usize,
        /// The kind being registered.
        name: &'static str,
    },
    /// A channel kind whose status is not `0x80`..=`0xE0` with a clear low nibble.
    #[error("{name} has invalid channel status {status:#04X}")]
    InvalidChannelStatus {
        /// The offending status.
        status: u8,
        /// The kind being registered.
        name: &'static str,
    },
}

/// The result of looking up a meta command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaDescriptor {
    /// The command is registered.
    Known(&'static MetaKindDescriptor),
    /// The command is not registered; the event is kept opaque.
    Unknown(u8),
}

impl MetaDescriptor {
    /// True if the command is registered.
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// The command byte looked up.
    pub const fn command(&self) -> u8 {
        match self {
            Self::Known(d) => d.command,
            Self::Unknown(c) => *c,
        }
    }

    /// Build the event this descriptor stands for, with the given payload.
    pub fn build(self, data: Vec<u8>) -> EventMessage {
        match self {
            Self::Known(d) => EventMessage::Meta(MetaEvent::new(d.kind, data)),
            Self::Unknown(command) => {
                EventMessage::UnknownMeta(UnknownMetaEvent::new(command, data))
            }
        }
    }
}

/// An immutable table of event kinds, keyed by wire code.
#[derive(Debug)]
pub struct Registry {
    channel: [Option<&'static ChannelKindDescriptor>; 16],
    meta: [Option<&'static MetaKindDescriptor>; 256],
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(|| {
    RegistryBuilder::standard()
        .map(RegistryBuilder::build)
        .expect("the built-in event catalogues contain a duplicate code")
});

impl Registry {
    /// The registry of the built-in catalogues, built on first use.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// The channel kind registered for the high nibble of a status byte.
    ///
    /// `nibble` is the status shifted right by four, e.g. `0x9` for note on.
    pub fn lookup_channel(&self, nibble: u8) -> Option<&'static ChannelKindDescriptor> {
        self.channel.get(nibble as usize).copied().flatten()
    }

    /// The channel kind for a full status byte.
    pub fn lookup_status(&self, status: u8) -> Option<&'static ChannelKindDescriptor> {
        self.lookup_channel(status >> 4)
    }

    /// The meta kind registered for `command`, or [`MetaDescriptor::Unknown`].
    pub fn lookup_meta(&self, command: u8) -> MetaDescriptor {
        match self.meta[command as usize] {
            Some(d) => MetaDescriptor::Known(d),
            None => MetaDescriptor::Unknown(command),
        }
    }

    /// All registered channel kinds, by status.
    pub fn channel_kinds(&self) -> impl Iterator<Item = &'static ChannelKindDescriptor> + '_ {
        self.channel.iter().filter_map(|d| *d)
    }

    /// All registered meta kinds, by command.
    pub fn meta_kinds(&self) -> impl Iterator<Item = &'static MetaKindDescriptor> + '_ {
        self.meta.iter().filter_map(|d| *d)
    }
}

#[doc = r#"
Assembles a [`Registry`], rejecting conflicting codes.

# Example
```rust
# use patternio::prelude::*;
# use patternio::event::CHANNEL_KINDS;
let mut builder = RegistryBuilder::new();
builder.register_channel(&CHANNEL_KINDS[0]).unwrap();
assert!(builder.register_channel(&CHANNEL_KINDS[0]).is_err());
let registry = builder.build();
assert_eq!(registry.channel_kinds().count(), 1);
```
"#]
#[derive(Debug)]
pub struct RegistryBuilder {
    inner: Registry,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// An empty builder.
    pub const fn new() -> Self {
        Self {
            inner: Registry {
                channel: [None; 16],
                meta: [None; 256],
            },
        }
    }

    /// A builder holding every kind of the built-in catalogues.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut builder = Self::new();
        for descriptor in &CHANNEL_KINDS {
            builder.register_channel(descriptor)?;
        }
        for descriptor in &META_KINDS {
            builder.register_meta(descriptor)?;
        }
        Ok(builder)
    }

    /// Register a channel kind under the high nibble of its status.
    pub fn register_channel(
        &mut self,
        descriptor: &'static ChannelKindDescriptor,
    ) -> Result<&mut Self, RegistryError> {
        let status = descriptor.status;
        if status & 0x0F != 0 || !(0x80..0xF0).contains(&status) {
            return Err(RegistryError::InvalidChannelStatus {
                status,
                name: descriptor.name,
            });
        }
        if !(1..=2).contains(&descriptor.length) {
            return Err(RegistryError::InvalidChannelLength {
                length: descriptor.length,
                name: descriptor.name,
            });
        }
        let slot = &mut self.inner.channel[(status >> 4) as usize];
        if let Some(existing) = slot {
            return Err(RegistryError::DuplicateChannelStatus {
                status,
                existing: existing.name,
                new: descriptor.name,
            });
        }
        *slot = Some(descriptor);
        Ok(self)
    }

    /// Register a meta kind under its command byte.
    pub fn register_meta(
        &mut self,
        descriptor: &'static MetaKindDescriptor,
    ) -> Result<&mut Self, RegistryError> {
        let slot = &mut self.inner.meta[descriptor.command as usize];
        if let Some(existing) = slot {
            return Err(RegistryError::DuplicateMetaCommand {
                command: descriptor.command,
                existing: existing.name,
                new: descriptor.name,
            });
        }
        *slot = Some(descriptor);
        Ok(self)
    }

    /// Freeze the table.
    pub fn build(self) -> Registry {
        self.inner
    }
}
