//! Addresses and channels referenced by decoded messages.

use std::fmt;

use crate::channel::ChannelDescriptor;
use crate::trunking::fields::TalkGroup;

/// Part an address plays in a message.
///
/// The role comes from the message layout, not the address bits: the same address in a
/// "to" field and a "from" field yields distinct identifiers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Source of the call or message.
    From,
    /// Destination of the call or message.
    To,
    /// Participant whose direction the message doesn't distinguish.
    Any,
}

/// Value referenced by a message, tagged with its kind and role.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub enum Identifier {
    /// 24-bit subscriber unit address.
    Radio {
        /// Role of the unit.
        role: Role,
        /// Unit address.
        address: u32,
    },
    /// 16-bit talkgroup address.
    Talkgroup {
        /// Role of the group.
        role: Role,
        /// Group address.
        group: TalkGroup,
    },
    /// Traffic channel.
    Channel(ChannelDescriptor),
}

impl Identifier {
    /// Radio unit a message is directed to.
    pub fn radio_to(address: u32) -> Identifier {
        Identifier::Radio { role: Role::To, address }
    }

    /// Radio unit a message originates from.
    pub fn radio_from(address: u32) -> Identifier {
        Identifier::Radio { role: Role::From, address }
    }

    /// Radio unit taking part in a message without a stated direction.
    pub fn radio_any(address: u32) -> Identifier {
        Identifier::Radio { role: Role::Any, address }
    }

    /// Talkgroup a message is directed to.
    pub fn talkgroup_to(bits: u16) -> Identifier {
        Identifier::Talkgroup { role: Role::To, group: TalkGroup::from_bits(bits) }
    }

    /// Talkgroup a message originates from.
    pub fn talkgroup_from(bits: u16) -> Identifier {
        Identifier::Talkgroup { role: Role::From, group: TalkGroup::from_bits(bits) }
    }

    /// Role of an address, or `None` for a channel.
    pub fn role(&self) -> Option<Role> {
        match *self {
            Identifier::Radio { role, .. } | Identifier::Talkgroup { role, .. } => Some(role),
            Identifier::Channel(_) => None,
        }
    }

    /// Numeric value of an address, or `None` for a channel.
    pub fn value(&self) -> Option<u32> {
        match *self {
            Identifier::Radio { address, .. } => Some(address),
            Identifier::Talkgroup { group, .. } => Some(group.to_bits() as u32),
            Identifier::Channel(_) => None,
        }
    }

    /// Channel referenced by the identifier, if it is one.
    pub fn channel(&self) -> Option<&ChannelDescriptor> {
        match *self {
            Identifier::Channel(ref c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Role::From => "FROM",
            Role::To => "TO",
            Role::Any => "TO/FROM",
        })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Identifier::Radio { role, address } => write!(f, "{}:{}", role, address),
            Identifier::Talkgroup { role, group } =>
                write!(f, "{}:TG{}", role, group.to_bits()),
            Identifier::Channel(ref c) => write!(f, "CHAN:{}", c),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_role() {
        let to = Identifier::radio_to(0x123456);
        let from = Identifier::radio_from(0x123456);

        assert_ne!(to, from);
        assert_eq!(to.value(), from.value());
        assert_eq!(to.value(), Some(0x123456));
        assert_eq!(to.role(), Some(Role::To));
        assert_eq!(from.role(), Some(Role::From));
        assert_eq!(to, Identifier::radio_to(0x123456));
        assert_ne!(Identifier::radio_any(5), Identifier::radio_to(5));
    }

    #[test]
    fn test_kinds() {
        let tg = Identifier::talkgroup_to(0x0042);
        assert_eq!(tg, Identifier::Talkgroup { role: Role::To, group: TalkGroup::Other(0x42) });
        assert_ne!(tg.value(), None);
        assert_ne!(tg, Identifier::radio_to(0x42));
        assert_eq!(Identifier::talkgroup_from(0xFFFF).value(), Some(0xFFFF));

        let c = Identifier::Channel(ChannelDescriptor::new(1, 2));
        assert_eq!(c.role(), None);
        assert_eq!(c.value(), None);
        assert_eq!(c.channel(), Some(&ChannelDescriptor::new(1, 2)));
        assert_eq!(tg.channel(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Identifier::radio_to(1193046).to_string(), "TO:1193046");
        assert_eq!(Identifier::talkgroup_from(100).to_string(), "FROM:TG100");
        assert_eq!(Identifier::radio_any(7).to_string(), "TO/FROM:7");
        assert_eq!(Identifier::Channel(ChannelDescriptor::new(2, 100)).to_string(),
                   "CHAN:2-100");
    }
}
