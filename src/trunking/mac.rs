//! Phase 2 MAC PDUs and the signalling structures they carry.
//!
//! A MAC PDU starts with an 8-bit header, followed by one or more variable-length
//! structures packed back to back. Each structure starts with an 8-bit opcode which
//! determines its length, so structures are walked in order until a null opcode, an
//! undecoded opcode, or the end of the PDU.

use std::fmt;

use crate::error::{P25Error, Result};
use crate::field::*;
use crate::frame::MessageFrame;
use crate::identifier::Role;
use crate::message::{AddressField, Grant, GrantFields, GroupUpdate, Message, Opaque,
                     UpdateFields};

/// Number of bits in the MAC PDU header.
pub const HEADER_BITS: usize = 8;

/// Bits of a structure opcode.
const STRUCTURE_OPCODE_BITS: usize = 8;

const PDU_TYPE: IntField = IntField::new(OCTET_1_BIT_0, 3);
const PDU_OFFSET: IntField = IntField::new(OCTET_1_BIT_0 + 3, 3);
const OPCODE: IntField = IntField::length8(OCTET_1_BIT_0);

/// Type of MAC PDU, which determines what follows the header.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MacPduType {
    /// Signalling on the control channel.
    Signal,
    /// Start of a voice transmission.
    PushToTalk,
    /// End of a voice transmission.
    EndPushToTalk,
    /// Idle signalling.
    Idle,
    /// Signalling during an active call.
    Active,
    /// Signalling during call hangtime.
    Hangtime,
    Reserved(u8),
}

impl MacPduType {
    /// Parse a PDU type from the given 3 bits.
    pub fn from_bits(bits: u8) -> MacPduType {
        use self::MacPduType::*;

        assert!(bits >> 3 == 0);

        match bits {
            0b000 => Signal,
            0b001 => PushToTalk,
            0b010 => EndPushToTalk,
            0b011 => Idle,
            0b100 => Active,
            0b110 => Hangtime,
            b => Reserved(b),
        }
    }

    /// Whether PDUs of this type carry signalling structures.
    pub fn has_structures(&self) -> bool {
        match *self {
            MacPduType::PushToTalk | MacPduType::EndPushToTalk |
                MacPduType::Reserved(_) => false,
            _ => true,
        }
    }
}

impl fmt::Display for MacPduType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MacPduType::Signal => f.write_str("MAC SIGNAL"),
            MacPduType::PushToTalk => f.write_str("MAC PUSH-TO-TALK"),
            MacPduType::EndPushToTalk => f.write_str("MAC END PUSH-TO-TALK"),
            MacPduType::Idle => f.write_str("MAC IDLE"),
            MacPduType::Active => f.write_str("MAC ACTIVE"),
            MacPduType::Hangtime => f.write_str("MAC HANGTIME"),
            MacPduType::Reserved(b) => write!(f, "MAC RESERVED {}", b),
        }
    }
}

/// Opcode of a MAC structure.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MacOpcode {
    /// Padding filling the remainder of the PDU.
    Null,
    /// Padding with a bit pattern avoiding zero bias.
    NullAvoidZeroBias,
    GroupVoiceGrantImplicit,
    GroupVoiceUpdateImplicit,
    UnitVoiceGrantAbbreviated,
    PhoneGrantImplicit,
    Other(u8),
}

impl MacOpcode {
    /// Parse an opcode from the given byte.
    pub fn from_bits(bits: u8) -> MacOpcode {
        use self::MacOpcode::*;

        match bits {
            0x00 => Null,
            0x08 => NullAvoidZeroBias,
            0x40 => GroupVoiceGrantImplicit,
            0x42 => GroupVoiceUpdateImplicit,
            0x44 => UnitVoiceGrantAbbreviated,
            0x48 => PhoneGrantImplicit,
            b => Other(b),
        }
    }

    /// Whether the opcode marks the end of the structures in a PDU.
    pub fn is_null(&self) -> bool {
        matches!(*self, MacOpcode::Null | MacOpcode::NullAvoidZeroBias)
    }
}

/// Layout of a group voice channel grant with implicit channel.
#[derive(Debug)]
pub struct GroupVoiceGrantImplicitFields;

impl GrantFields for GroupVoiceGrantImplicitFields {
    const NAME: &'static str = "GROUP VOICE CHANNEL GRANT";
    const OPTIONS: Option<IntField> = Some(IntField::length8(OCTET_2_BIT_8));
    const BAND: IntField = IntField::length4(OCTET_3_BIT_16);
    const NUMBER: IntField = IntField::length12(OCTET_3_BIT_16 + 4);
    const TARGET: AddressField =
        AddressField::Talkgroup(Role::To, IntField::length16(OCTET_5_BIT_32));
    const SOURCE: Option<AddressField> =
        Some(AddressField::Radio(Role::From, IntField::length24(OCTET_7_BIT_48)));
}

/// Grant of a traffic channel to a talkgroup.
pub type GroupVoiceChannelGrantImplicit = Grant<GroupVoiceGrantImplicitFields>;

/// Layout of a group voice channel grant update with implicit channels.
#[derive(Debug)]
pub struct GroupVoiceUpdateImplicitFields;

impl UpdateFields for GroupVoiceUpdateImplicitFields {
    const NAME: &'static str = "GROUP VOICE CHANNEL GRANT UPDATE";
    const BAND_A: IntField = IntField::length4(OCTET_2_BIT_8);
    const NUMBER_A: IntField = IntField::length12(OCTET_2_BIT_8 + 4);
    const GROUP_A: IntField = IntField::length16(OCTET_4_BIT_24);
    const BAND_B: IntField = IntField::length4(OCTET_6_BIT_40);
    const NUMBER_B: IntField = IntField::length12(OCTET_6_BIT_40 + 4);
    const GROUP_B: IntField = IntField::length16(OCTET_8_BIT_56);
}

/// Reminder of the talkgroups active on up to two traffic channels.
pub type GroupVoiceChannelGrantUpdateImplicit = GroupUpdate<GroupVoiceUpdateImplicitFields>;

/// Layout of an abbreviated unit to unit voice channel grant.
#[derive(Debug)]
pub struct UnitVoiceGrantAbbreviatedFields;

impl GrantFields for UnitVoiceGrantAbbreviatedFields {
    const NAME: &'static str = "UNIT-TO-UNIT VOICE CHANNEL GRANT";
    const OPTIONS: Option<IntField> = Some(IntField::length8(OCTET_2_BIT_8));
    const BAND: IntField = IntField::length4(OCTET_3_BIT_16);
    const NUMBER: IntField = IntField::length12(OCTET_3_BIT_16 + 4);
    const TARGET: AddressField =
        AddressField::Radio(Role::To, IntField::length24(OCTET_5_BIT_32));
    const SOURCE: Option<AddressField> =
        Some(AddressField::Radio(Role::From, IntField::length24(OCTET_8_BIT_56)));
}

/// Grant of a traffic channel for a call between two units.
pub type UnitToUnitVoiceChannelGrantAbbreviated = Grant<UnitVoiceGrantAbbreviatedFields>;

/// Layout of a telephone interconnect voice channel grant with implicit channel.
#[derive(Debug)]
pub struct PhoneGrantImplicitFields;

impl GrantFields for PhoneGrantImplicitFields {
    const NAME: &'static str = "TELEPHONE INTERCONNECT VOICE CHANNEL GRANT";
    const OPTIONS: Option<IntField> = Some(IntField::length8(OCTET_2_BIT_8));
    const BAND: IntField = IntField::length4(OCTET_4_BIT_24);
    const NUMBER: IntField = IntField::length12(OCTET_4_BIT_24 + 4);
    const TIMER: Option<IntField> = Some(IntField::length16(OCTET_6_BIT_40));
    const TARGET: AddressField =
        AddressField::Radio(Role::To, IntField::length24(OCTET_8_BIT_56));
}

/// Grant of a traffic channel for a phone call. Carries no source address.
pub type TelephoneInterconnectVoiceChannelGrantImplicit = Grant<PhoneGrantImplicitFields>;

/// Decoded MAC structure.
#[derive(Debug)]
pub enum MacStructure {
    GroupVoiceGrant(GroupVoiceChannelGrantImplicit),
    GroupVoiceUpdate(GroupVoiceChannelGrantUpdateImplicit),
    UnitVoiceGrant(UnitToUnitVoiceChannelGrantAbbreviated),
    PhoneGrant(TelephoneInterconnectVoiceChannelGrantImplicit),
    /// Structure that isn't decoded, covering the rest of the PDU.
    Opaque(Opaque),
}

delegate_message!(MacStructure {
    GroupVoiceGrant,
    GroupVoiceUpdate,
    UnitVoiceGrant,
    PhoneGrant,
    Opaque,
});

impl MacStructure {
    /// Decode the structure starting at the given frame's offset, returning it along with
    /// its length in bits, or `None` for a null opcode.
    ///
    /// Decoded structures are bounded to their own bits. Undecoded opcodes produce an
    /// opaque structure running to the end of the frame, whose length is unknown.
    pub fn decode(frame: MessageFrame) -> Result<Option<(MacStructure, Option<usize>)>> {
        frame.require(STRUCTURE_OPCODE_BITS)?;

        let opcode = MacOpcode::from_bits(frame.int(OPCODE) as u8);

        Ok(Some(match opcode {
            MacOpcode::Null | MacOpcode::NullAvoidZeroBias => return Ok(None),
            MacOpcode::GroupVoiceGrantImplicit => {
                let len = GroupVoiceGrantImplicitFields::extent();
                let bits = frame.at_span(frame.offset(), len);
                (MacStructure::GroupVoiceGrant(Grant::new(bits)?), Some(len))
            },
            MacOpcode::GroupVoiceUpdateImplicit => {
                let len = GroupVoiceUpdateImplicitFields::extent();
                let bits = frame.at_span(frame.offset(), len);
                (MacStructure::GroupVoiceUpdate(GroupUpdate::new(bits)?), Some(len))
            },
            MacOpcode::UnitVoiceGrantAbbreviated => {
                let len = UnitVoiceGrantAbbreviatedFields::extent();
                let bits = frame.at_span(frame.offset(), len);
                (MacStructure::UnitVoiceGrant(Grant::new(bits)?), Some(len))
            },
            MacOpcode::PhoneGrantImplicit => {
                let len = PhoneGrantImplicitFields::extent();
                let bits = frame.at_span(frame.offset(), len);
                (MacStructure::PhoneGrant(Grant::new(bits)?), Some(len))
            },
            MacOpcode::Other(b) => (
                MacStructure::Opaque(Opaque::new(frame, format!("MAC OPCODE {:#04x}", b))),
                None,
            ),
        }))
    }

    /// Raw opcode of the structure.
    pub fn opcode(&self) -> u8 { self.frame().int(OPCODE) as u8 }
}

/// MAC PDU split into its structures.
#[derive(Debug)]
pub struct MacPdu {
    frame: MessageFrame,
    structures: Vec<MacStructure>,
    /// Error that cut the structure walk short.
    truncated: Option<P25Error>,
}

impl MacPdu {
    /// Walk the structures of the PDU held by the given frame.
    ///
    /// A structure that runs past the end of the PDU stops the walk. The structures
    /// decoded before it are kept, and the error is available from `truncated`.
    pub fn decode(frame: MessageFrame) -> Result<MacPdu> {
        if frame.len() < HEADER_BITS {
            return Err(P25Error::ShortMessage {
                length: frame.len(),
                required: HEADER_BITS,
            });
        }

        let pdu_type = MacPduType::from_bits(frame.int(PDU_TYPE) as u8);
        let mut structures = Vec::new();
        let mut truncated = None;

        if !pdu_type.has_structures() {
            structures.push(MacStructure::Opaque(
                Opaque::new(frame.clone(), pdu_type.to_string())));

            return Ok(MacPdu { frame, structures, truncated });
        }

        let mut pos = HEADER_BITS;

        while frame.len() >= pos + STRUCTURE_OPCODE_BITS {
            let rest = frame.at_span(frame.offset() + pos, frame.len() - pos);

            let (s, len) = match MacStructure::decode(rest) {
                Ok(Some(s)) => s,
                Ok(None) => break,
                Err(e) => {
                    truncated = Some(e);
                    break;
                },
            };

            structures.push(s);

            match len {
                Some(len) => pos += len,
                None => break,
            }
        }

        Ok(MacPdu { frame, structures, truncated })
    }

    /// Frame holding the whole PDU.
    pub fn frame(&self) -> &MessageFrame { &self.frame }

    /// Type of the PDU.
    pub fn pdu_type(&self) -> MacPduType {
        MacPduType::from_bits(self.frame.int(PDU_TYPE) as u8)
    }

    /// Raw offset to the second structure, as carried in the header.
    pub fn second_offset(&self) -> u8 { self.frame.int(PDU_OFFSET) as u8 }

    /// Decoded structures, in PDU order.
    pub fn structures(&self) -> &[MacStructure] { &self.structures }

    /// Take the decoded structures.
    pub fn into_structures(self) -> Vec<MacStructure> { self.structures }

    /// Error that stopped the structure walk early, if any.
    pub fn truncated(&self) -> Option<P25Error> { self.truncated }
}
