//! CRC-CCITT protecting each trunking signalling block.
//!
//! The CRC is the remainder of the message times x^16 divided by the generator, with
//! the result inverted. It's calculated with a shift register fed one bit at a time,
//! which lets it run directly over a span of a bit buffer.

use crate::bits::CorrectedBitBuffer;
use crate::error::{P25Error, Result};

/// Generator polynomial x^16 + x^12 + x^5 + 1, without the x^16 coefficient.
const GEN: u16 = 0x1021;
/// Mask inverting the final remainder.
const INV: u16 = 0xFFFF;

/// Running 16-bit CRC over a stream of bits, MSB first.
#[derive(Copy, Clone, Debug, Default)]
pub struct Crc16 {
    /// Current remainder.
    reg: u16,
}

impl Crc16 {
    /// Construct a new `Crc16` with empty remainder.
    pub fn new() -> Crc16 { Crc16::default() }

    /// Feed in a single bit.
    pub fn feed_bit(&mut self, bit: bool) -> &mut Self {
        let carry = self.reg >> 15 == 1;

        self.reg <<= 1;

        if carry != bit {
            self.reg ^= GEN;
        }

        self
    }

    /// Feed in the given byte stream, MSB of each byte first.
    pub fn feed_bytes<T: IntoIterator<Item = u8>>(&mut self, bytes: T) -> &mut Self {
        for byte in bytes {
            for i in (0..8).rev() {
                self.feed_bit(byte >> i & 1 == 1);
            }
        }

        self
    }

    /// Resulting CRC of the bits fed so far.
    pub fn finish(&self) -> u16 { self.reg ^ INV }
}

/// Calculate the CRC over `length` bits of the buffer starting at `offset`.
pub fn calc(bits: &CorrectedBitBuffer, offset: usize, length: usize) -> Result<u16> {
    bits.check(offset, length)?;

    let mut crc = Crc16::new();

    for pos in offset..offset + length {
        crc.feed_bit(bits.get_bit(pos)?);
    }

    Ok(crc.finish())
}

/// Verify the `length` bits starting at `offset` are followed by their CRC.
pub fn verify(bits: &CorrectedBitBuffer, offset: usize, length: usize) -> Result<()> {
    let expected = bits.read_uint(offset + length, 16)? as u16;
    let computed = calc(bits, offset, length)?;

    if expected == computed {
        Ok(())
    } else {
        Err(P25Error::CrcMismatch { expected, computed })
    }
}
