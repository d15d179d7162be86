use thiserror::Error;

/// The four frame rates a SMPTE offset can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 fps
    TwentyFour,
    /// 25 fps
    TwentyFive,
    /// 29.97 fps, drop frame
    TwentyNine,
    /// 30 fps
    Thirty,
}

impl SmpteFps {
    /// Frames per second.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => 30_000. / 1_001.,
            Self::Thirty => 30.,
        }
    }

    /// The two `rr` bits of the hour byte.
    const fn rate_bits(&self) -> u8 {
        match self {
            Self::TwentyFour => 0,
            Self::TwentyFive => 1,
            Self::TwentyNine => 2,
            Self::Thirty => 3,
        }
    }
}

/// A malformed SMPTE offset payload.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SmpteError {
    /// The payload is not five bytes long.
    #[error("SMPTE offset must be 5 bytes, found {0}")]
    Length(usize),
    /// The rate bits name no frame rate.
    #[error("Invalid frame rate bits {0:#04b}")]
    FrameRate(u8),
    /// Hours above 23.
    #[error("Invalid hour {0}")]
    Hour(u8),
    /// Minutes above 59.
    #[error("Invalid minute {0}")]
    Minute(u8),
    /// Seconds above 59.
    #[error("Invalid second {0}")]
    Second(u8),
    /// Frame not below the frame rate.
    #[error("Invalid frame {0}")]
    Frame(u8),
    /// Subframes above 99.
    #[error("Invalid subframe {0}")]
    Subframe(u8),
}

#[doc = r#"
The time at which a track starts, from a `0x54` meta event.

The payload is five bytes:

```text
0rrhhhhh  minutes  seconds  frames  subframes (1/100 frame)
```
"#]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// Frame rate of the offset.
    pub fps: SmpteFps,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
    /// Below the frame rate.
    pub frame: u8,
    /// 0-99
    pub subframe: u8,
}

impl SmpteOffset {
    /// Parse the five payload bytes of a SMPTE offset event.
    pub const fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        let [rate_hour, minute, second, frame, subframe] = *data else {
            return Err(SmpteError::Length(data.len()));
        };

        let fps = match rate_hour >> 5 {
            0 => SmpteFps::TwentyFour,
            1 => SmpteFps::TwentyFive,
            2 => SmpteFps::TwentyNine,
            3 => SmpteFps::Thirty,
            v => return Err(SmpteError::FrameRate(v)),
        };
        let hour = rate_hour & 0x1F;
        if hour > 23 {
            return Err(SmpteError::Hour(hour));
        }
        if minute > 59 {
            return Err(SmpteError::Minute(minute));
        }
        if second > 59 {
            return Err(SmpteError::Second(second));
        }
        if frame as f64 >= fps.as_f64() {
            return Err(SmpteError::Frame(frame));
        }
        if subframe > 99 {
            return Err(SmpteError::Subframe(subframe));
        }
        Ok(Self {
            fps,
            hour,
            minute,
            second,
            frame,
            subframe,
        })
    }

    /// The five payload bytes.
    pub const fn to_bytes(&self) -> [u8; 5] {
        [
            (self.fps.rate_bits() << 5) | (self.hour & 0x1F),
            self.minute,
            self.second,
            self.frame,
            self.subframe,
        ]
    }

    /// The offset in microseconds.
    pub fn as_micros(&self) -> f64 {
        let whole_seconds =
            self.hour as u64 * 3600 + self.minute as u64 * 60 + self.second as u64;
        let frames = self.frame as f64 + self.subframe as f64 / 100.;
        whole_seconds as f64 * 1_000_000. + frames * 1_000_000. / self.fps.as_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_offset() {
        // payload of 00 FF 54 05 ..
        let bytes = [0x41, 0x17, 0x2D, 0x0C, 0x22];
        let offset = SmpteOffset::parse(&bytes).unwrap();

        assert_eq!(offset.fps, SmpteFps::TwentyNine);
        assert_eq!(offset.hour, 1);
        assert_eq!(offset.minute, 23);
        assert_eq!(offset.second, 45);
        assert_eq!(offset.frame, 12);
        assert_eq!(offset.subframe, 34);
        assert_eq!(offset.to_bytes(), bytes);
    }

    #[test]
    fn reject_out_of_range_fields() {
        assert_eq!(
            SmpteOffset::parse(&[0x7F, 0x17, 0x2D, 0x0C, 0x22]),
            Err(SmpteError::Hour(31))
        );
        assert_eq!(
            SmpteOffset::parse(&[0x41, 0x50, 0x2D, 0x0C, 0x22]),
            Err(SmpteError::Minute(80))
        );
        assert_eq!(
            SmpteOffset::parse(&[0x01, 0x00, 0x00, 24, 0x00]),
            Err(SmpteError::Frame(24))
        );
        assert_eq!(
            SmpteOffset::parse(&[0x81, 0x00, 0x00, 0x00, 0x00]),
            Err(SmpteError::FrameRate(4))
        );
        assert_eq!(SmpteOffset::parse(&[0x00; 3]), Err(SmpteError::Length(3)));
    }

    #[test]
    fn micros() {
        let offset = SmpteOffset {
            fps: SmpteFps::TwentyFive,
            hour: 0,
            minute: 1,
            second: 2,
            frame: 5,
            subframe: 50,
        };
        assert_eq!(offset.as_micros(), 62_220_000.);
    }
}
