//! Bit-addressable buffer over an error-corrected message.

use bitvec::prelude::*;

use crate::error::{P25Error, Result};

/// Bits of a received message, MSB first, along with a flag for each bit recording
/// whether upstream error correction changed it from the received value.
///
/// The length is fixed at construction and the buffer is never modified afterwards.
/// Correction flags don't take part in field extraction: the FEC stage has already
/// produced its best estimate of each bit, and the flags are only kept for quality
/// reporting.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CorrectedBitBuffer {
    /// Message bits.
    bits: BitVec<u8, Msb0>,
    /// Set for each bit that was corrected.
    corrected: BitVec<u8, Msb0>,
}

impl CorrectedBitBuffer {
    /// Create a new `CorrectedBitBuffer` from the given message bytes and a parallel,
    /// bit-packed mask of corrected bits.
    ///
    /// Panics if the mask doesn't cover exactly the message bytes.
    pub fn new(bytes: &[u8], mask: &[u8]) -> CorrectedBitBuffer {
        assert_eq!(bytes.len(), mask.len(), "corrected mask must parallel message bytes");

        CorrectedBitBuffer {
            bits: BitVec::from_slice(bytes),
            corrected: BitVec::from_slice(mask),
        }
    }

    /// Create a new `CorrectedBitBuffer` with no corrected bits.
    pub fn from_bytes(bytes: &[u8]) -> CorrectedBitBuffer {
        CorrectedBitBuffer {
            bits: BitVec::from_slice(bytes),
            corrected: BitVec::repeat(false, bytes.len() * 8),
        }
    }

    /// Create a new `CorrectedBitBuffer` with the bits at the given positions flagged as
    /// corrected.
    ///
    /// Panics if a position lies outside the message.
    pub fn with_corrections<I>(bytes: &[u8], positions: I) -> CorrectedBitBuffer
        where I: IntoIterator<Item = usize>
    {
        let mut buf = Self::from_bytes(bytes);

        for pos in positions {
            assert!(pos < buf.len(), "corrected bit {} outside message", pos);
            buf.corrected.set(pos, true);
        }

        buf
    }

    /// Number of bits in the buffer.
    pub fn len(&self) -> usize { self.bits.len() }

    /// Whether the buffer holds no bits.
    pub fn is_empty(&self) -> bool { self.bits.is_empty() }

    /// Verify the given span lies within the buffer.
    pub fn check(&self, offset: usize, length: usize) -> Result<()> {
        match offset.checked_add(length) {
            Some(end) if end <= self.len() => Ok(()),
            _ => Err(P25Error::OutOfRange { offset, length, size: self.len() }),
        }
    }

    /// Value of the bit at the given position.
    pub fn get_bit(&self, pos: usize) -> Result<bool> {
        self.check(pos, 1)?;
        Ok(self.bits[pos])
    }

    /// Whether the bit at the given position was corrected by FEC.
    pub fn is_corrected(&self, pos: usize) -> Result<bool> {
        self.check(pos, 1)?;
        Ok(self.corrected[pos])
    }

    /// Read `length` bits starting at `offset` as a big-endian unsigned integer.
    ///
    /// Panics if `length` isn't within 1 to 64 bits.
    pub fn read_uint(&self, offset: usize, length: usize) -> Result<u64> {
        assert!(length >= 1 && length <= 64, "invalid field length {}", length);

        self.check(offset, length)?;
        Ok(self.bits[offset..offset + length].load_be::<u64>())
    }

    /// Read a span already verified with `check`.
    pub(crate) fn load(&self, offset: usize, length: usize) -> u64 {
        debug_assert!(length >= 1 && length <= 64);
        self.bits[offset..offset + length].load_be::<u64>()
    }

    /// Total number of corrected bits.
    pub fn corrected_count(&self) -> usize { self.corrected.count_ones() }

    /// Number of corrected bits within the given span.
    pub fn corrected_in(&self, offset: usize, length: usize) -> Result<usize> {
        self.check(offset, length)?;
        Ok(self.corrected[offset..offset + length].count_ones())
    }

    /// Bytes of the message.
    pub fn to_bytes(&self) -> Vec<u8> { self.bits.as_raw_slice().to_vec() }

    /// Bytes of the message starting at the given bit, with a trailing partial byte
    /// padded with zeros.
    pub fn bytes_from(&self, offset: usize) -> Vec<u8> {
        self.bytes_in(offset, self.len().saturating_sub(offset))
    }

    /// Bytes of the `length` bits starting at `offset`, clipped to the end of the
    /// message, with a trailing partial byte padded with zeros.
    pub fn bytes_in(&self, offset: usize, length: usize) -> Vec<u8> {
        if offset >= self.len() {
            return Vec::new();
        }

        let end = offset.saturating_add(length).min(self.len());

        self.bits[offset..end].chunks(8)
            .map(|c| c.load_be::<u8>() << (8 - c.len()))
            .collect()
    }

    /// Uppercase hex rendering of the message bytes.
    pub fn hex(&self) -> String { hex::encode_upper(self.bits.as_raw_slice()) }
}
