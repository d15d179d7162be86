#![doc = r#"
Variable-length quantities

Delta times and meta-event lengths are stored as big-endian groups of 7 bits.
Every byte except the last has its high bit set:

```text
value        encoded
0x00000000   00
0x0000007F   7F
0x00000080   81 00
0x00003FFF   FF 7F
0x0FFFFFFF   FF FF FF 7F
```

The format caps a quantity at four groups, so the largest value is
[`VARLEN_MAX`].
"#]

use crate::{reader::ReaderErrorKind, writer::WriterError};

/// The largest value that fits in four 7-bit groups.
pub const VARLEN_MAX: u32 = 0x0FFF_FFFF;

const MAX_GROUPS: usize = 4;

/// An encoded variable-length quantity.
///
/// Lives on the stack; use [`VarLen::as_bytes`] to get at the encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VarLen {
    buf: [u8; MAX_GROUPS],
    len: u8,
}

impl VarLen {
    /// The encoded bytes, most significant group first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Number of encoded bytes (1 to 4).
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl AsRef<[u8]> for VarLen {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Encodes `value` with the minimal number of groups.
///
/// Fails with [`WriterError::ValueOutOfRange`] above [`VARLEN_MAX`].
pub fn encode_varlen(value: u32) -> Result<VarLen, WriterError> {
    if value > VARLEN_MAX {
        return Err(WriterError::ValueOutOfRange(value));
    }

    let mut groups = 1;
    let mut rest = value >> 7;
    while rest != 0 {
        groups += 1;
        rest >>= 7;
    }

    let mut buf = [0u8; MAX_GROUPS];
    let mut i = 0;
    while i < groups {
        let shift = 7 * (groups - 1 - i);
        let mut byte = ((value >> shift) & 0x7F) as u8;
        if i + 1 < groups {
            byte |= 0x80;
        }
        buf[i] = byte;
        i += 1;
    }

    Ok(VarLen {
        buf,
        len: groups as u8,
    })
}

/// Decodes a quantity from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed. Running out of bytes
/// before a terminating group is [`ReaderErrorKind::TruncatedStream`], even
/// after four continuation groups; [`ReaderErrorKind::VarLenTooLong`] needs
/// a fifth byte to be present.
pub fn decode_varlen(bytes: &[u8]) -> Result<(u32, usize), ReaderErrorKind> {
    let mut value: u32 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if i == MAX_GROUPS {
            return Err(ReaderErrorKind::VarLenTooLong);
        }
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(ReaderErrorKind::TruncatedStream)
}
