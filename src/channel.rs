use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
One of the sixteen MIDI channels.

Channels are addressed by the low nibble of a status byte, so
[`Channel::One`] is `0` on the wire and [`Channel::Sixteen`] is `15`.

# Example
```rust
# use patternio::prelude::*;
let channel = Channel::try_from(9u8).unwrap();
assert_eq!(channel, Channel::Ten);
assert_eq!(u8::from(channel), 9);
assert!(Channel::try_from(16u8).is_err());
```
"#]
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, TryFromPrimitive, IntoPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Channel {
    One = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Default for Channel {
    fn default() -> Self {
        Self::One
    }
}

impl Channel {
    /// Extracts the channel from the low nibble of a status byte.
    pub const fn from_status(status: u8) -> Self {
        use Channel::*;
        match status & 0x0F {
            0 => One,
            1 => Two,
            2 => Three,
            3 => Four,
            4 => Five,
            5 => Six,
            6 => Seven,
            7 => Eight,
            8 => Nine,
            9 => Ten,
            10 => Eleven,
            11 => Twelve,
            12 => Thirteen,
            13 => Fourteen,
            14 => Fifteen,
            _ => Sixteen,
        }
    }

    /// The zero-based wire value of the channel.
    #[inline]
    pub const fn to_nibble(self) -> u8 {
        self as u8
    }
}

#[test]
fn status_low_nibble_is_the_channel() {
    use pretty_assertions::assert_eq;
    assert_eq!(Channel::from_status(0x90), Channel::One);
    assert_eq!(Channel::from_status(0x8F), Channel::Sixteen);
    assert_eq!(Channel::from_status(0xB4).to_nibble(), 4);
}
