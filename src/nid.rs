//! Network Access Code (NAC) and data unit tags carried alongside each message.

/// "Digital squelch" NAC field of the NID, or the color code of a Phase 2 channel.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub enum NetworkAccessCode {
    /// Default P25 NAC.
    Default,
    /// Allows receiver to unsquelch on any NAC (shouldn't be transmitted.)
    ReceiveAny,
    /// Allows repeater to unsquelch/retransmit any NAC (shouldn't be transmitted.)
    RepeatAny,
    /// Custom NAC.
    Other(u16),
}

/// Reserved NAC values, which can't be carried as `NetworkAccessCode::Other`.
const RESERVED_NACS: [(u16, NetworkAccessCode); 3] = [
    (0x293, NetworkAccessCode::Default),
    (0xF7E, NetworkAccessCode::ReceiveAny),
    (0xF7F, NetworkAccessCode::RepeatAny),
];

impl NetworkAccessCode {
    /// Parse the given 12 bits into a NAC.
    pub fn from_bits(bits: u16) -> NetworkAccessCode {
        assert!(bits >> 12 == 0);

        RESERVED_NACS.iter()
            .find(|&&(b, _)| b == bits)
            .map_or(NetworkAccessCode::Other(bits), |&(_, nac)| nac)
    }

    /// 12-bit word of the NAC.
    pub fn to_bits(self) -> u16 {
        match self {
            NetworkAccessCode::Other(bits) => bits,
            nac => RESERVED_NACS.iter()
                .find(|&&(_, n)| n == nac)
                .map_or(0, |&(b, _)| b),
        }
    }
}

/// Phase 1 data unit of associated packet.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub enum DataUnit {
    /// Voice header packet.
    VoiceHeader,
    /// Simple terminator packet.
    VoiceSimpleTerminator,
    /// Terminator packet with link control word.
    VoiceLCTerminator,
    /// Link control voice frame group.
    VoiceLCFrameGroup,
    /// Crypto control voice frame group.
    VoiceCCFrameGroup,
    /// Confirmed/Unconfirmed data packet
    DataPacket,
    /// Trunking signalling packet.
    TrunkingSignaling,
}

/// DUID of each data unit.
const DUIDS: [(u8, DataUnit); 7] = [
    (0b0000, DataUnit::VoiceHeader),
    (0b0011, DataUnit::VoiceSimpleTerminator),
    (0b1111, DataUnit::VoiceLCTerminator),
    (0b0101, DataUnit::VoiceLCFrameGroup),
    (0b1010, DataUnit::VoiceCCFrameGroup),
    (0b1100, DataUnit::DataPacket),
    (0b0111, DataUnit::TrunkingSignaling),
];

impl DataUnit {
    /// Parse the given 4-bit DUID, or `None` if it's reserved.
    pub fn from_bits(bits: u8) -> Option<DataUnit> {
        assert!(bits >> 4 == 0);

        DUIDS.iter().find(|&&(b, _)| b == bits).map(|&(_, du)| du)
    }
}

/// Network ID word preceding every Phase 1 packet: a 12-bit NAC followed by a 4-bit
/// DUID.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NetworkId {
    /// NAC of the channel.
    pub nac: NetworkAccessCode,
    /// Type of the packet that follows.
    pub unit: DataUnit,
}

impl NetworkId {
    /// Parse the given 16-bit NID word, or `None` if the DUID is reserved.
    pub fn from_bits(bits: u16) -> Option<NetworkId> {
        Some(NetworkId {
            nac: NetworkAccessCode::from_bits(bits >> 4),
            unit: DataUnit::from_bits((bits & 0xF) as u8)?,
        })
    }
}

/// Phase 2 logical channel carrying a MAC PDU.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub enum MacChannel {
    /// Fast associated control channel, stolen from voice bursts.
    Facch,
    /// Slow associated control channel.
    Sacch,
    /// Logical control channel of a TDMA control channel.
    Lcch,
}

/// Protocol unit a message was received in, passed through untouched by decoding.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitType {
    /// Phase 1 data unit.
    Phase1(DataUnit),
    /// Phase 2 MAC channel.
    Phase2(MacChannel),
}
