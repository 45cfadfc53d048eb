//! Phase 1 trunking signalling blocks (TSBK) sent outbound on the control channel.
//!
//! Each block carries an 8-bit header (last block flag, protected flag, 6-bit opcode),
//! a manufacturer ID, 8 octets of opcode-specific payload, and a 16-bit CRC.

use std::fmt;

use crate::channel::{BandTable, ChannelParams};
use crate::error::{P25Error, Result};
use crate::field::*;
use crate::frame::MessageFrame;
use crate::identifier::{Identifier, Role};
use crate::message::{AddressField, Grant, GrantFields, GroupUpdate, Message, Opaque,
                     UpdateFields};

/// Number of bits in an uncoded TSBK.
pub const TSBK_BITS: usize = 96;
/// Number of bits covered by the CRC.
pub const PAYLOAD_BITS: usize = 80;
/// Number of bits needed to dispatch a TSBK.
pub const HEADER_BITS: usize = 16;

/// Manufacturer ID of standard messages.
pub const MFID_STANDARD: u8 = 0x00;
/// Alternate manufacturer ID of standard messages.
pub const MFID_STANDARD_ALT: u8 = 0x01;
/// Manufacturer ID of Motorola messages.
pub const MFID_MOTOROLA: u8 = 0x90;

/// Motorola opcode identifying a traffic channel.
const MOTOROLA_TRAFFIC_CHANNEL: u8 = 0x05;

const LAST_BLOCK: IntField = IntField::length1(OCTET_1_BIT_0);
const PROTECTED: IntField = IntField::length1(OCTET_1_BIT_0 + 1);
const OPCODE: IntField = IntField::new(OCTET_1_BIT_0 + 2, 6);
const VENDOR: IntField = IntField::length8(OCTET_2_BIT_8);

/// Opcode of a standard outbound TSBK.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TsbkOpcode {
    GroupVoiceGrant,
    GroupVoiceUpdate,
    GroupVoiceUpdateExplicit,
    UnitVoiceGrant,
    UnitCallRequest,
    UnitVoiceUpdate,
    PhoneGrant,
    PhoneCallRequest,
    UnitDataGrant,
    GroupDataGrant,
    GroupDataAnnounce,
    GroupDataAnnounceExplicit,
    UnitStatusUpdate,
    UnitStatusQuery,
    UnitShortMessage,
    UnitMonitor,
    UnitCallAlert,
    AckResponse,
    QueuedResponse,
    ExtendedFunctionResponse,
    DenyResponse,
    GroupAffiliationResponse,
    GroupAffiliationQuery,
    LocRegistrationResponse,
    UnitRegistrationResponse,
    UnitRegistrationCommand,
    AuthCommand,
    DeregistrationAck,
    RoamingAddrCommand,
    RoamingAddrUpdate,
    SystemServiceBroadcast,
    AltControlBroadcast,
    RfssStatusBroadcast,
    NetworkStatusBroadcast,
    AdjacentSiteBroadcast,
    IdentifierUpdate,
    ProtectionParamBroadcast,
    ProtectionParamUpdate,
    Reserved(u8),
}

impl TsbkOpcode {
    /// Parse an opcode from the given 6 bits.
    pub fn from_bits(bits: u8) -> TsbkOpcode {
        use self::TsbkOpcode::*;

        assert!(bits >> 6 == 0);

        match bits {
            0x00 => GroupVoiceGrant,
            0x02 => GroupVoiceUpdate,
            0x03 => GroupVoiceUpdateExplicit,
            0x04 => UnitVoiceGrant,
            0x05 => UnitCallRequest,
            0x06 => UnitVoiceUpdate,
            0x08 => PhoneGrant,
            0x0A => PhoneCallRequest,
            0x10 => UnitDataGrant,
            0x11 => GroupDataGrant,
            0x12 => GroupDataAnnounce,
            0x13 => GroupDataAnnounceExplicit,
            0x18 => UnitStatusUpdate,
            0x1A => UnitStatusQuery,
            0x1C => UnitShortMessage,
            0x1D => UnitMonitor,
            0x1F => UnitCallAlert,
            0x20 => AckResponse,
            0x21 => QueuedResponse,
            0x24 => ExtendedFunctionResponse,
            0x27 => DenyResponse,
            0x28 => GroupAffiliationResponse,
            0x2A => GroupAffiliationQuery,
            0x2B => LocRegistrationResponse,
            0x2C => UnitRegistrationResponse,
            0x2D => UnitRegistrationCommand,
            0x2E => AuthCommand,
            0x2F => DeregistrationAck,
            0x36 => RoamingAddrCommand,
            0x37 => RoamingAddrUpdate,
            0x38 => SystemServiceBroadcast,
            0x39 => AltControlBroadcast,
            0x3A => RfssStatusBroadcast,
            0x3B => NetworkStatusBroadcast,
            0x3C => AdjacentSiteBroadcast,
            0x3D => IdentifierUpdate,
            0x3E => ProtectionParamBroadcast,
            0x3F => ProtectionParamUpdate,
            _ => Reserved(bits),
        }
    }
}

/// Fields common to every TSBK.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TsbkHeader {
    /// Whether this is the last block of the transmission.
    pub last_block: bool,
    /// Whether the payload is encrypted.
    pub protected: bool,
    /// Raw 6-bit opcode.
    pub opcode: u8,
    /// Manufacturer ID, which scopes the opcode.
    pub vendor: u8,
}

impl TsbkHeader {
    /// Parse the header of the given frame.
    pub fn decode(frame: &MessageFrame) -> Result<TsbkHeader> {
        if frame.len() < HEADER_BITS {
            return Err(P25Error::ShortMessage {
                length: frame.len(),
                required: HEADER_BITS,
            });
        }

        Ok(TsbkHeader::read(frame))
    }

    /// Read the header from a frame already known to hold it.
    fn read(frame: &MessageFrame) -> TsbkHeader {
        TsbkHeader {
            last_block: frame.flag(LAST_BLOCK),
            protected: frame.flag(PROTECTED),
            opcode: frame.int(OPCODE) as u8,
            vendor: frame.int(VENDOR) as u8,
        }
    }

    /// Whether the opcode is defined by the standard rather than a manufacturer.
    pub fn is_standard(&self) -> bool {
        self.vendor == MFID_STANDARD || self.vendor == MFID_STANDARD_ALT
    }
}

/// Layout of a group voice channel grant.
#[derive(Debug)]
pub struct GroupVoiceGrantFields;

impl GrantFields for GroupVoiceGrantFields {
    const NAME: &'static str = "GROUP VOICE CHANNEL GRANT";
    const OPTIONS: Option<IntField> = Some(IntField::length8(OCTET_3_BIT_16));
    const BAND: IntField = IntField::length4(OCTET_4_BIT_24);
    const NUMBER: IntField = IntField::length12(OCTET_4_BIT_24 + 4);
    const TARGET: AddressField =
        AddressField::Talkgroup(Role::To, IntField::length16(OCTET_6_BIT_40));
    const SOURCE: Option<AddressField> =
        Some(AddressField::Radio(Role::From, IntField::length24(OCTET_8_BIT_56)));
}

/// Grant of a traffic channel to a talkgroup.
pub type GroupVoiceChannelGrant = Grant<GroupVoiceGrantFields>;

/// Layout of a unit to unit voice channel grant.
#[derive(Debug)]
pub struct UnitVoiceGrantFields;

impl GrantFields for UnitVoiceGrantFields {
    const NAME: &'static str = "UNIT-TO-UNIT VOICE CHANNEL GRANT";
    const BAND: IntField = IntField::length4(OCTET_3_BIT_16);
    const NUMBER: IntField = IntField::length12(OCTET_3_BIT_16 + 4);
    const TARGET: AddressField =
        AddressField::Radio(Role::To, IntField::length24(OCTET_5_BIT_32));
    const SOURCE: Option<AddressField> =
        Some(AddressField::Radio(Role::From, IntField::length24(OCTET_8_BIT_56)));
}

/// Grant of a traffic channel for a call between two units.
pub type UnitToUnitVoiceChannelGrant = Grant<UnitVoiceGrantFields>;

/// Layout of a telephone interconnect voice channel grant.
#[derive(Debug)]
pub struct PhoneGrantFields;

impl GrantFields for PhoneGrantFields {
    const NAME: &'static str = "TELEPHONE INTERCONNECT VOICE CHANNEL GRANT";
    const OPTIONS: Option<IntField> = Some(IntField::length8(OCTET_3_BIT_16));
    const BAND: IntField = IntField::length4(OCTET_4_BIT_24);
    const NUMBER: IntField = IntField::length12(OCTET_4_BIT_24 + 4);
    const TIMER: Option<IntField> = Some(IntField::length16(OCTET_6_BIT_40));
    const TARGET: AddressField =
        AddressField::Radio(Role::To, IntField::length24(OCTET_8_BIT_56));
}

/// Grant of a traffic channel for a phone call. Carries no source address.
pub type TelephoneInterconnectVoiceChannelGrant = Grant<PhoneGrantFields>;

/// Layout of a group voice channel grant update.
#[derive(Debug)]
pub struct GroupVoiceUpdateFields;

impl UpdateFields for GroupVoiceUpdateFields {
    const NAME: &'static str = "GROUP VOICE CHANNEL GRANT UPDATE";
    const BAND_A: IntField = IntField::length4(OCTET_3_BIT_16);
    const NUMBER_A: IntField = IntField::length12(OCTET_3_BIT_16 + 4);
    const GROUP_A: IntField = IntField::length16(OCTET_5_BIT_32);
    const BAND_B: IntField = IntField::length4(OCTET_7_BIT_48);
    const NUMBER_B: IntField = IntField::length12(OCTET_7_BIT_48 + 4);
    const GROUP_B: IntField = IntField::length16(OCTET_9_BIT_64);
}

/// Reminder of the talkgroups active on up to two traffic channels.
pub type GroupVoiceChannelGrantUpdate = GroupUpdate<GroupVoiceUpdateFields>;

/// Advertisement of the parameters used to calculate TX/RX frequencies for the channels
/// of a band.
#[derive(Debug)]
pub struct IdentifierUpdate {
    frame: MessageFrame,
}

impl IdentifierUpdate {
    const BAND: IntField = IntField::length4(OCTET_3_BIT_16);
    const BANDWIDTH: IntField = IntField::new(OCTET_3_BIT_16 + 4, 9);
    const OFFSET: IntField = IntField::new(OCTET_4_BIT_24 + 5, 9);
    const SPACING: IntField = IntField::new(OCTET_5_BIT_32 + 6, 10);
    const BASE: IntField = IntField::length32(OCTET_7_BIT_48);

    /// Create a new `IdentifierUpdate` over the given frame.
    pub fn new(frame: MessageFrame) -> Result<Self> {
        frame.require(Self::BASE.end())?;
        Ok(IdentifierUpdate { frame })
    }

    /// Band identifier the parameters apply to.
    pub fn band(&self) -> u8 { self.frame.int(Self::BAND) as u8 }

    /// Parameters of the band.
    pub fn params(&self) -> ChannelParams {
        ChannelParams::new(self.frame.int(Self::BASE),
                           self.frame.int(Self::BANDWIDTH) as u16,
                           self.frame.int(Self::OFFSET) as u16,
                           self.frame.int(Self::SPACING) as u16)
    }

    /// Record the band's parameters in the given table, returning the ones replaced.
    pub fn apply(&self, table: &mut BandTable) -> Option<ChannelParams> {
        table.insert(self.band(), self.params())
    }
}

impl BandTable {
    /// Record the band parameters advertised by the given identifier update.
    pub fn update_from(&mut self, update: &IdentifierUpdate) -> Option<ChannelParams> {
        update.apply(self)
    }
}

impl Message for IdentifierUpdate {
    fn frame(&self) -> &MessageFrame { &self.frame }
    fn identifiers(&self) -> &[Identifier] { &[] }
}

impl fmt::Display for IdentifierUpdate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let p = self.params();

        write!(f, "IDENTIFIER UPDATE BAND:{} BASE:{} SPACING:{} OFFSET:{} BANDWIDTH:{}",
               self.band(), p.base(), p.spacing(), p.offset(), p.bandwidth())
    }
}

/// Motorola traffic channel announcement, whose payload isn't interpreted.
#[derive(Debug)]
pub struct MotorolaTrafficChannel {
    frame: MessageFrame,
}

impl MotorolaTrafficChannel {
    /// Create a new `MotorolaTrafficChannel` over the given frame.
    pub fn new(frame: MessageFrame) -> Self { MotorolaTrafficChannel { frame } }
}

impl Message for MotorolaTrafficChannel {
    fn frame(&self) -> &MessageFrame { &self.frame }
    fn identifiers(&self) -> &[Identifier] { &[] }
}

impl fmt::Display for MotorolaTrafficChannel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MOTOROLA TRAFFIC CHANNEL {}", self.frame.hex())
    }
}

/// Decoded outbound TSBK.
#[derive(Debug)]
pub enum Tsbk {
    GroupVoiceGrant(GroupVoiceChannelGrant),
    GroupVoiceUpdate(GroupVoiceChannelGrantUpdate),
    UnitVoiceGrant(UnitToUnitVoiceChannelGrant),
    PhoneGrant(TelephoneInterconnectVoiceChannelGrant),
    IdentifierUpdate(IdentifierUpdate),
    MotorolaTrafficChannel(MotorolaTrafficChannel),
    /// Block whose opcode isn't decoded, or whose payload is encrypted.
    Opaque(Opaque),
}

delegate_message!(Tsbk {
    GroupVoiceGrant,
    GroupVoiceUpdate,
    UnitVoiceGrant,
    PhoneGrant,
    IdentifierUpdate,
    MotorolaTrafficChannel,
    Opaque,
});

impl Tsbk {
    /// Decode the TSBK held by the given frame.
    ///
    /// Unknown opcodes produce `Tsbk::Opaque` rather than an error. Errors are only
    /// returned when the frame is too short for its header or for the fields of its
    /// opcode.
    pub fn decode(frame: MessageFrame) -> Result<Tsbk> {
        let header = TsbkHeader::decode(&frame)?;

        if header.protected {
            return Ok(Tsbk::Opaque(Opaque::new(frame,
                format!("TSBK ENCRYPTED OPCODE {:#04x}", header.opcode))));
        }

        if header.is_standard() {
            return Self::decode_standard(header, frame);
        }

        if header.vendor == MFID_MOTOROLA && header.opcode == MOTOROLA_TRAFFIC_CHANNEL {
            return Ok(Tsbk::MotorolaTrafficChannel(MotorolaTrafficChannel::new(frame)));
        }

        Ok(Tsbk::Opaque(Opaque::new(frame,
            format!("TSBK MFID {:#04x} OPCODE {:#04x}", header.vendor, header.opcode))))
    }

    fn decode_standard(header: TsbkHeader, frame: MessageFrame) -> Result<Tsbk> {
        Ok(match TsbkOpcode::from_bits(header.opcode) {
            TsbkOpcode::GroupVoiceGrant => Tsbk::GroupVoiceGrant(Grant::new(frame)?),
            TsbkOpcode::GroupVoiceUpdate => Tsbk::GroupVoiceUpdate(GroupUpdate::new(frame)?),
            TsbkOpcode::UnitVoiceGrant => Tsbk::UnitVoiceGrant(Grant::new(frame)?),
            TsbkOpcode::PhoneGrant => Tsbk::PhoneGrant(Grant::new(frame)?),
            TsbkOpcode::IdentifierUpdate =>
                Tsbk::IdentifierUpdate(IdentifierUpdate::new(frame)?),
            TsbkOpcode::Reserved(op) => Tsbk::Opaque(Opaque::new(frame,
                format!("TSBK RESERVED OPCODE {:#04x}", op))),
            op => Tsbk::Opaque(Opaque::new(frame, format!("TSBK {:?}", op))),
        })
    }

    /// Header of the block.
    pub fn header(&self) -> TsbkHeader { TsbkHeader::read(self.frame()) }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::channel::ChannelDescriptor;
    use crate::crc::Crc16;
    use crate::frame::test::frame;
    use crate::trunking::fields::ServiceOptions;
    use hex_literal::hex;

    /// Frame holding the given TSBK payload followed by its CRC.
    pub fn tsbk(payload: [u8; 10]) -> MessageFrame {
        let crc = Crc16::new().feed_bytes(payload.iter().cloned()).finish();
        let mut bytes = payload.to_vec();

        bytes.push((crc >> 8) as u8);
        bytes.push(crc as u8);

        frame(&bytes)
    }

    #[test]
    fn test_opcode() {
        assert_eq!(TsbkOpcode::from_bits(0x00), TsbkOpcode::GroupVoiceGrant);
        assert_eq!(TsbkOpcode::from_bits(0x08), TsbkOpcode::PhoneGrant);
        assert_eq!(TsbkOpcode::from_bits(0x3D), TsbkOpcode::IdentifierUpdate);
        assert_eq!(TsbkOpcode::from_bits(0x01), TsbkOpcode::Reserved(0x01));
        assert_eq!(TsbkOpcode::from_bits(0x30), TsbkOpcode::Reserved(0x30));
    }

    #[test]
    fn test_header() {
        let h = TsbkHeader::decode(&frame(&hex!("C8 90"))).unwrap();

        assert!(h.last_block);
        assert!(h.protected);
        assert_eq!(h.opcode, 0x08);
        assert_eq!(h.vendor, MFID_MOTOROLA);
        assert!(!h.is_standard());

        assert_eq!(TsbkHeader::decode(&frame(&hex!("C8"))),
                   Err(P25Error::ShortMessage { length: 8, required: 16 }));
    }

    #[test]
    fn test_phone_grant() {
        let t = Tsbk::decode(tsbk(hex!("08 00 00 20 64 02 58 12 34 56"))).unwrap();

        let g = match t {
            Tsbk::PhoneGrant(ref g) => g,
            _ => panic!(),
        };

        assert_eq!(g.channel(), &ChannelDescriptor::new(2, 100));
        assert!(!g.channel().is_resolved());
        assert!(g.has_call_timer());
        assert_eq!(g.call_timer(), Some(60_000));
        assert_eq!(g.target_address(), &Identifier::radio_to(0x123456));
        assert_eq!(g.source_address(), None);
        assert_eq!(t.identifiers(), &[
            Identifier::radio_to(0x123456),
            Identifier::Channel(ChannelDescriptor::new(2, 100)),
        ]);

        let grant = t.as_grant().unwrap();
        assert_eq!(grant.source_address(), None);
        assert_eq!(grant.call_timer(), Some(60_000));
        assert_eq!(grant.target_address(), &Identifier::radio_to(0x123456));

        assert_eq!(t.to_string(),
                   "TELEPHONE INTERCONNECT VOICE CHANNEL GRANT TO:1193046 CHAN:2-100 \
                    TIMER:60s SERVICE OPTIONS [CLEAR HALF-DUPLEX CIRCUIT PRI0]");
        assert_eq!(t.header().opcode, 0x08);
        assert!(!t.is_opaque());
    }

    #[test]
    fn test_phone_grant_no_timer() {
        let t = Tsbk::decode(tsbk(hex!("08 00 24 20 64 00 00 12 34 56"))).unwrap();
        let g = t.as_grant().unwrap();

        assert_eq!(g.call_timer(), None);
        assert_eq!(g.service_options(), ServiceOptions::new(0x24));
        assert!(t.to_string().contains("TIMER:none"));
    }

    #[test]
    fn test_group_grant() {
        let t = Tsbk::decode(tsbk(hex!("00 00 80 10 0A 01 23 AB CD EF"))).unwrap();
        let g = t.as_grant().unwrap();

        assert!(matches!(t, Tsbk::GroupVoiceGrant(_)));
        assert!(g.service_options().emergency());
        assert_eq!(g.channel(), &ChannelDescriptor::new(1, 10));
        assert_eq!(g.target_address(), &Identifier::talkgroup_to(0x0123));
        assert_eq!(g.source_address(), Some(&Identifier::radio_from(0xABCDEF)));
        assert_eq!(g.call_timer(), None);
        assert_eq!(t.identifiers(), &[
            Identifier::talkgroup_to(0x0123),
            Identifier::radio_from(0xABCDEF),
            Identifier::Channel(ChannelDescriptor::new(1, 10)),
        ]);
        assert_eq!(t.as_band_receiver().unwrap().channels(),
                   &[ChannelDescriptor::new(1, 10)]);
    }

    #[test]
    fn test_unit_grant() {
        let t = Tsbk::decode(tsbk(hex!("04 00 30 05 00 00 64 00 00 C8"))).unwrap();
        let g = t.as_grant().unwrap();

        assert!(matches!(t, Tsbk::UnitVoiceGrant(_)));
        assert_eq!(g.channel(), &ChannelDescriptor::new(3, 5));
        assert_eq!(g.target_address(), &Identifier::radio_to(100));
        assert_eq!(g.source_address(), Some(&Identifier::radio_from(200)));
        assert_eq!(g.service_options(), ServiceOptions::default());
        assert_eq!(t.to_string(),
                   "UNIT-TO-UNIT VOICE CHANNEL GRANT FROM:200 TO:100 CHAN:3-5");
    }

    #[test]
    fn test_group_update() {
        let t = Tsbk::decode(tsbk(hex!("02 00 10 01 00 0A 20 02 00 0B"))).unwrap();

        assert!(t.as_grant().is_none());
        assert_eq!(t.as_band_receiver().unwrap().channels(), &[
            ChannelDescriptor::new(1, 1),
            ChannelDescriptor::new(2, 2),
        ]);
        assert_eq!(t.identifiers().len(), 4);
    }

    #[test]
    fn test_identifier_update() {
        let t = Tsbk::decode(tsbk(hex!("3D 00 13 22 D0 32 0A 25 10 A2"))).unwrap();

        let u = match t {
            Tsbk::IdentifierUpdate(ref u) => u,
            _ => panic!(),
        };

        assert_eq!(u.band(), 1);
        assert_eq!(u.params(), ChannelParams::new(170201250, 0x64, 0b010110100, 0x32));
        assert!(t.identifiers().is_empty());

        let mut table = BandTable::new();
        assert_eq!(table.update_from(u), None);
        assert_eq!(u.apply(&mut table), Some(u.params()));
        assert_eq!(ChannelDescriptor::new(1, 9).resolve(&table).map(|f| f.downlink),
                   Some(851_062_500));
        assert_eq!(t.to_string(), "IDENTIFIER UPDATE BAND:1 BASE:851006250 SPACING:6250 \
                                   OFFSET:-45000000 BANDWIDTH:12500");
    }

    #[test]
    fn test_motorola() {
        let t = Tsbk::decode(tsbk(hex!("05 90 01 02 03 04 05 06 07 08"))).unwrap();

        assert!(matches!(t, Tsbk::MotorolaTrafficChannel(_)));
        assert!(t.identifiers().is_empty());
        assert!(t.to_string().starts_with("MOTOROLA TRAFFIC CHANNEL 05900102030405060708"));

        let t = Tsbk::decode(tsbk(hex!("06 90 01 02 03 04 05 06 07 08"))).unwrap();
        assert!(t.is_opaque());
        assert!(t.to_string().starts_with("TSBK MFID 0x90 OPCODE 0x06 "));
    }

    #[test]
    fn test_opaque() {
        let bytes = hex!("28 00 DE AD BE EF 01 02 03 04 55 AA");
        let t = Tsbk::decode(frame(&bytes)).unwrap();

        assert!(t.is_opaque());
        assert!(t.identifiers().is_empty());
        assert_eq!(t.hex(), hex::encode_upper(bytes));

        let o = match t {
            Tsbk::Opaque(ref o) => o,
            _ => panic!(),
        };

        assert_eq!(o.bytes(), bytes.to_vec());
        assert_eq!(o.label(), "TSBK GroupAffiliationResponse");

        let t = Tsbk::decode(frame(&hex!("31 00 00 00"))).unwrap();
        assert_eq!(t.to_string(), "TSBK RESERVED OPCODE 0x31 31000000");
    }

    #[test]
    fn test_protected() {
        let t = Tsbk::decode(tsbk(hex!("48 00 00 20 64 02 58 12 34 56"))).unwrap();

        assert!(t.is_opaque());
        assert!(t.as_grant().is_none());
        assert!(t.header().protected);
        assert_eq!(Ok(t.header()), TsbkHeader::decode(t.frame()));
    }

    #[test]
    fn test_truncated() {
        let r = Tsbk::decode(frame(&hex!("08 00 00 20 64 02 58 12")));
        assert_eq!(r.unwrap_err(), P25Error::OutOfRange { offset: 0, length: 80, size: 64 });

        // Unknown opcodes don't need their payload.
        assert!(Tsbk::decode(frame(&hex!("28 00"))).unwrap().is_opaque());
    }
}
