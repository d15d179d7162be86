use alloc::vec::Vec;

/// Status byte opening a system exclusive message.
pub const SYSEX_START: u8 = 0xF0;
/// Byte closing a system exclusive message.
pub const SYSEX_END: u8 = 0xF7;

#[doc = r#"
A system exclusive message.

The payload excludes both the opening `0xF0` and the closing `0xF7`.
Since the message is delimited by its terminator, the payload must not
contain `0xF7` itself.
"#]
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SysexEvent {
    data: Vec<u8>,
}

impl SysexEvent {
    /// Create a message from its payload.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
    /// The payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    /// The payload, mutably.
    pub fn data_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }
}
