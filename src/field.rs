//! Declarative bit-field addressing.
//!
//! Message layouts are described by `IntField` constants giving the starting bit and
//! length of each field. Offsets are expressed through the `OCTET_n_BIT_m` constants,
//! where octet numbering starts at 1 and `m` is the absolute bit position of the
//! octet's MSB.

/// Bit span of an unsigned integer field within a message.
///
/// Fields are layout-agnostic constants: whether a field fits a particular buffer is
/// checked when the field is read, not when it's defined.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct IntField {
    /// First bit of the field.
    offset: u32,
    /// Number of bits in the field.
    length: u8,
}

impl IntField {
    /// Create a new `IntField` covering `length` bits starting at `offset`.
    ///
    /// Panics if the length isn't within 1 to 32 bits.
    pub const fn new(offset: u32, length: u8) -> IntField {
        assert!(length >= 1 && length <= 32);
        IntField { offset, length }
    }

    pub const fn length1(offset: u32) -> IntField { IntField::new(offset, 1) }
    pub const fn length4(offset: u32) -> IntField { IntField::new(offset, 4) }
    pub const fn length8(offset: u32) -> IntField { IntField::new(offset, 8) }
    pub const fn length12(offset: u32) -> IntField { IntField::new(offset, 12) }
    pub const fn length16(offset: u32) -> IntField { IntField::new(offset, 16) }
    pub const fn length24(offset: u32) -> IntField { IntField::new(offset, 24) }
    pub const fn length32(offset: u32) -> IntField { IntField::new(offset, 32) }

    /// First bit of the field.
    pub const fn offset(&self) -> usize { self.offset as usize }
    /// Number of bits in the field.
    pub const fn length(&self) -> usize { self.length as usize }
    /// One past the last bit of the field.
    pub const fn end(&self) -> usize { self.offset() + self.length() }
    /// Largest value the field can hold.
    pub const fn max(&self) -> u32 { (u32::MAX) >> (32 - self.length) }
}

pub const OCTET_1_BIT_0: u32 = 0;
pub const OCTET_2_BIT_8: u32 = 8;
pub const OCTET_3_BIT_16: u32 = 16;
pub const OCTET_4_BIT_24: u32 = 24;
pub const OCTET_5_BIT_32: u32 = 32;
pub const OCTET_6_BIT_40: u32 = 40;
pub const OCTET_7_BIT_48: u32 = 48;
pub const OCTET_8_BIT_56: u32 = 56;
pub const OCTET_9_BIT_64: u32 = 64;
pub const OCTET_10_BIT_72: u32 = 72;
pub const OCTET_11_BIT_80: u32 = 80;
pub const OCTET_12_BIT_88: u32 = 88;

/// Largest extent of the given fields, in bits.
pub const fn extent(fields: &[IntField]) -> usize {
    let mut end = 0;
    let mut i = 0;

    while i < fields.len() {
        if fields[i].end() > end {
            end = fields[i].end();
        }

        i += 1;
    }

    end
}
