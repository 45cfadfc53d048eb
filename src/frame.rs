//! Received message bits along with their reception metadata.

use std::sync::Arc;

use crate::bits::CorrectedBitBuffer;
use crate::error::Result;
use crate::field::IntField;
use crate::error::P25Error;
use crate::nid::{NetworkAccessCode, NetworkId, UnitType};

/// A single received message: its corrected bits, the protocol unit it arrived in, the
/// NAC/color code of the channel, and its arrival time.
///
/// Fields are addressed relative to the frame's structure offset, which lets several
/// Phase 2 MAC structures share the bits of one MAC PDU.
#[derive(Clone, Debug)]
pub struct MessageFrame {
    /// Shared message bits.
    bits: Arc<CorrectedBitBuffer>,
    /// Bit where this frame's fields start.
    offset: usize,
    /// Number of bits belonging to this frame, or `None` to run to the end of the bits.
    span: Option<usize>,
    /// Protocol unit type.
    unit: UnitType,
    /// Network access code or color code.
    nac: NetworkAccessCode,
    /// Arrival time in milliseconds since the epoch.
    timestamp: u64,
}

impl MessageFrame {
    /// Create a new `MessageFrame` over the given bits, with fields starting at the
    /// first bit.
    pub fn new(bits: CorrectedBitBuffer, unit: UnitType, nac: NetworkAccessCode,
               timestamp: u64)
        -> MessageFrame
    {
        MessageFrame {
            bits: Arc::new(bits),
            offset: 0,
            span: None,
            unit,
            nac,
            timestamp,
        }
    }

    /// Create a new `MessageFrame` over the bits of a Phase 1 packet preceded by the
    /// given NID.
    pub fn phase1(bits: CorrectedBitBuffer, nid: NetworkId, timestamp: u64) -> MessageFrame {
        Self::new(bits, UnitType::Phase1(nid.unit), nid.nac, timestamp)
    }

    /// Create a frame sharing the same bits and metadata with fields starting at the
    /// given absolute bit and running to the end of the bits.
    pub fn at_offset(&self, offset: usize) -> MessageFrame {
        MessageFrame {
            bits: self.bits.clone(),
            offset,
            span: None,
            ..*self
        }
    }

    /// Create a frame sharing the same bits and metadata covering the `length` bits
    /// starting at the given absolute bit.
    pub fn at_span(&self, offset: usize, length: usize) -> MessageFrame {
        MessageFrame {
            bits: self.bits.clone(),
            offset,
            span: Some(length),
            ..*self
        }
    }

    /// Underlying message bits.
    pub fn bits(&self) -> &CorrectedBitBuffer { &self.bits }
    /// Absolute bit where this frame's fields start.
    pub fn offset(&self) -> usize { self.offset }
    /// Protocol unit the message arrived in.
    pub fn unit(&self) -> UnitType { self.unit }
    /// NAC or color code of the channel.
    pub fn nac(&self) -> NetworkAccessCode { self.nac }
    /// Arrival time in milliseconds since the epoch.
    pub fn timestamp(&self) -> u64 { self.timestamp }

    /// Number of bits from the structure offset to the end of the frame.
    pub fn len(&self) -> usize {
        let rest = self.bits.len().saturating_sub(self.offset);
        self.span.map_or(rest, |s| s.min(rest))
    }

    /// Number of bits the frame was bounded to, if any.
    pub fn span(&self) -> Option<usize> { self.span }

    /// Whether no bits follow the structure offset.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Verify the frame holds at least the given number of bits past its offset.
    pub fn require(&self, bits: usize) -> Result<()> {
        self.bits.check(self.offset, bits)?;
        self.check_span(bits)
    }

    /// Verify the given number of bits past the offset lies within the frame's span.
    fn check_span(&self, bits: usize) -> Result<()> {
        match self.span {
            Some(span) if bits > span => Err(P25Error::OutOfRange {
                offset: self.offset,
                length: bits,
                size: self.offset + span,
            }),
            _ => Ok(()),
        }
    }

    /// Read the given field as an unsigned integer.
    pub fn get_int(&self, field: IntField) -> Result<u32> {
        self.check_span(field.end())?;
        self.bits.read_uint(self.offset + field.offset(), field.length()).map(|v| v as u32)
    }

    /// Whether the given field holds a nonzero value.
    pub fn has_nonzero(&self, field: IntField) -> Result<bool> {
        self.get_int(field).map(|v| v != 0)
    }

    /// Value of the given bit.
    pub fn get_bit(&self, bit: usize) -> Result<bool> {
        self.check_span(bit + 1)?;
        self.bits.get_bit(self.offset + bit)
    }

    /// Read a field whose extent was verified with `require`.
    pub(crate) fn int(&self, field: IntField) -> u32 {
        self.bits.load(self.offset + field.offset(), field.length()) as u32
    }

    /// Read a single-bit field whose extent was verified with `require`.
    pub(crate) fn flag(&self, field: IntField) -> bool { self.int(field) != 0 }

    /// Number of corrected bits past the structure offset.
    pub fn corrected_count(&self) -> usize {
        self.bits.corrected_in(self.offset, self.len()).unwrap_or(0)
    }

    /// Bytes from the structure offset to the end of the frame.
    pub fn bytes(&self) -> Vec<u8> { self.bits.bytes_in(self.offset, self.len()) }

    /// Uppercase hex rendering of the bytes of the frame.
    pub fn hex(&self) -> String { hex::encode_upper(self.bytes()) }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::field::*;
    use crate::nid::DataUnit;
    use hex_literal::hex;

    /// Frame over the given bytes as a trunking signalling packet.
    pub fn frame(bytes: &[u8]) -> MessageFrame {
        let nid = NetworkId::from_bits(0x2937).unwrap();
        MessageFrame::phase1(CorrectedBitBuffer::from_bytes(bytes), nid, 1_500_000_000_000)
    }

    #[test]
    fn test_fields() {
        let f = frame(&hex!("00 12 34 00 00"));

        assert_eq!(f.get_int(IntField::length8(OCTET_2_BIT_8)), Ok(0x12));
        assert_eq!(f.get_int(IntField::length12(OCTET_2_BIT_8 + 4)), Ok(0x234));
        assert_eq!(f.has_nonzero(IntField::length16(OCTET_4_BIT_24)), Ok(false));
        assert_eq!(f.has_nonzero(IntField::length4(OCTET_2_BIT_8)), Ok(true));
        assert_eq!(f.get_bit(11), Ok(true));
        assert_eq!(f.get_int(IntField::length16(OCTET_5_BIT_32)),
                   Err(P25Error::OutOfRange { offset: 32, length: 16, size: 40 }));
    }

    #[test]
    fn test_offset() {
        let f = frame(&hex!("FF AB CD EF"));
        let s = f.at_offset(8);

        assert_eq!(s.offset(), 8);
        assert_eq!(s.len(), 24);
        assert_eq!(s.get_int(IntField::length8(OCTET_1_BIT_0)), Ok(0xAB));
        assert_eq!(s.get_int(IntField::length16(OCTET_2_BIT_8)), Ok(0xCDEF));
        assert_eq!(s.require(24), Ok(()));
        assert_eq!(s.require(25),
                   Err(P25Error::OutOfRange { offset: 8, length: 25, size: 32 }));
        assert_eq!(s.hex(), "ABCDEF");
        assert_eq!(s.timestamp(), f.timestamp());
        assert_eq!(s.nac(), NetworkAccessCode::Default);
        assert!(f.at_offset(40).is_empty());
    }

    #[test]
    fn test_corrected() {
        let bits = CorrectedBitBuffer::with_corrections(&hex!("00 00"), vec![1, 9, 12]);
        let f = MessageFrame::new(bits, UnitType::Phase1(DataUnit::TrunkingSignaling),
                                  NetworkAccessCode::Other(0x3A1), 0);

        assert_eq!(f.corrected_count(), 3);
        assert_eq!(f.at_offset(8).corrected_count(), 2);
    }

    #[test]
    fn test_span() {
        let f = frame(&hex!("80 11 22 33 44 55"));
        let s = f.at_span(8, 16);

        assert_eq!(f.unit(), UnitType::Phase1(DataUnit::TrunkingSignaling));
        assert_eq!(s.len(), 16);
        assert_eq!(s.span(), Some(16));
        assert_eq!(s.hex(), "1122");
        assert_eq!(s.bytes(), hex!("11 22").to_vec());
        assert_eq!(s.require(16), Ok(()));
        assert_eq!(s.require(24),
                   Err(P25Error::OutOfRange { offset: 8, length: 24, size: 24 }));
        assert_eq!(s.get_int(IntField::length8(OCTET_2_BIT_8)), Ok(0x22));
        assert!(s.get_int(IntField::length8(OCTET_3_BIT_16)).is_err());

        // Spans running past the bits are clipped.
        assert_eq!(f.at_span(40, 16).len(), 8);
        assert_eq!(f.at_span(40, 16).hex(), "55");
        assert_eq!(f.at_offset(8).hex(), "1122334455");
    }
}
