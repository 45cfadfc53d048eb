//! Standard errors that may occur when decoding P25 trunking messages.

use thiserror::Error;

/// P25 decoding errors.
///
/// Every variant is local to a single message: the message is dropped and decoding of
/// the surrounding stream carries on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum P25Error {
    /// A field addressed bits beyond the end of the buffer, usually a layout/version
    /// mismatch.
    #[error("bits {offset}..{end} out of range for {size}-bit buffer", end = .offset + .length)]
    OutOfRange {
        /// First bit of the access.
        offset: usize,
        /// Number of bits accessed.
        length: usize,
        /// Number of bits in the buffer.
        size: usize,
    },
    /// Buffer was too short to hold a message header.
    #[error("{length}-bit message shorter than required {required} bits")]
    ShortMessage {
        /// Bits available.
        length: usize,
        /// Bits required.
        required: usize,
    },
    /// Checksum carried in the message didn't match the one calculated over it.
    #[error("crc mismatch: message carries {expected:#06x}, calculated {computed:#06x}")]
    CrcMismatch {
        /// CRC carried in the message.
        expected: u16,
        /// CRC calculated over the message.
        computed: u16,
    },
    /// Channel resolution was requested for a band not (yet) in the band table.
    #[error("no parameters known for band {0}")]
    UnknownBand(u8),
}

/// Standard result using `P25Error`.
pub type Result<T> = std::result::Result<T, P25Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let e = P25Error::OutOfRange { offset: 90, length: 16, size: 96 };
        assert_eq!(e.to_string(), "bits 90..106 out of range for 96-bit buffer");

        let e = P25Error::CrcMismatch { expected: 0xBEEF, computed: 0x1234 };
        assert_eq!(e.to_string(),
                   "crc mismatch: message carries 0xbeef, calculated 0x1234");

        assert_eq!(P25Error::UnknownBand(7).to_string(), "no parameters known for band 7");
    }
}
