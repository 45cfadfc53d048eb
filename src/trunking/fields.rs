//! Values shared across trunking message layouts.

use std::fmt;

/// Options requested/granted for a service, such as a voice call.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceOptions(u8);

impl ServiceOptions {
    /// Create a new `ServiceOptions` from the given 8-bit word.
    pub fn new(opts: u8) -> ServiceOptions { ServiceOptions(opts) }

    /// Raw option bits.
    pub fn bits(&self) -> u8 { self.0 }

    /// Whether the service is an emergency.
    pub fn emergency(&self) -> bool { self.0 >> 7 == 1 }
    /// Whether the service is encrypted.
    pub fn protected(&self) -> bool { self.0 >> 6 & 1 == 1 }
    /// Whether the service is full duplex, rather than half duplex.
    pub fn duplex(&self) -> bool { self.0 >> 5 & 1 == 1 }
    /// Whether the service is packet switched, rather than circuit switched.
    pub fn packet_switched(&self) -> bool { self.0 >> 4 & 1 == 1 }
    /// Priority of the service, from 1 (lowest) to 7 (highest.)
    pub fn prio(&self) -> u8 { self.0 & 0x7 }
}

impl fmt::Display for ServiceOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SERVICE OPTIONS [")?;

        if self.emergency() {
            write!(f, "EMERGENCY ")?;
        }

        write!(f, "{} {} {} PRI{}]",
               if self.protected() { "ENCRYPTED" } else { "CLEAR" },
               if self.duplex() { "FULL-DUPLEX" } else { "HALF-DUPLEX" },
               if self.packet_switched() { "PACKET" } else { "CIRCUIT" },
               self.prio())
    }
}

/// Identifies which group a message belongs to.
///
/// In a production P25 system, users can set their radios to receive one or more
/// talkgroups, and the radio will only unsquelch if one of those talkgroups is seen.
/// Additionally, the user directs each transmission to a talkgroup selected on the
/// radio.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub enum TalkGroup {
    /// Includes nobody.
    Nobody,
    /// Default talkgroup when no other is selected.
    Default,
    /// Includes everybody.
    Everbody,
    /// Specific group of users.
    Other(u16),
}

impl TalkGroup {
    /// Parse a talkgroup from the given 16 bits.
    pub fn from_bits(bits: u16) -> TalkGroup {
        use self::TalkGroup::*;

        match bits {
            0x0000 => Nobody,
            0x0001 => Default,
            0xFFFF => Everbody,
            _ => Other(bits),
        }
    }

    /// Convert the talkgroup to its 16-bit address.
    pub fn to_bits(self) -> u16 {
        use self::TalkGroup::*;

        match self {
            Nobody => 0x0000,
            Default => 0x0001,
            Everbody => 0xFFFF,
            Other(bits) => bits,
        }
    }
}
