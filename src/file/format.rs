use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
How the tracks of a [`Pattern`](super::Pattern) relate to each other.

The value is stored in the file header as a big-endian `u16`:

| value | format |
|---|---|
| 0 | [`FormatType::SingleMultiChannel`] |
| 1 | [`FormatType::Simultaneous`] |
| 2 | [`FormatType::SequentiallyIndependent`] |
"#]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0: one track holding every channel.
    SingleMultiChannel = 0,
    /// Format 1: tracks played together.
    Simultaneous = 1,
    /// Format 2: independent single-track sequences.
    SequentiallyIndependent = 2,
}

impl Default for FormatType {
    fn default() -> Self {
        Self::Simultaneous
    }
}

impl FormatType {
    /// The header value of the format.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }
}

#[test]
fn header_values() {
    use pretty_assertions::assert_eq;
    assert_eq!(FormatType::try_from(0u16).unwrap(), FormatType::SingleMultiChannel);
    assert_eq!(FormatType::try_from(2u16).unwrap(), FormatType::SequentiallyIndependent);
    assert!(FormatType::try_from(3u16).is_err());
    assert_eq!(u16::from(FormatType::Simultaneous), 1);
}
