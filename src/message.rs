//! Decoded message types and the layouts they're built from.
//!
//! Most trunking messages are variations on a few shapes, differing only in where each
//! field sits. Those shapes are implemented once, generic over a layout trait listing
//! the fields, and each concrete message is a type alias pairing a shape with its
//! layout.

use std::fmt;
use std::marker::PhantomData;
use std::sync::OnceLock;

use crate::channel::ChannelDescriptor;
use crate::error::Result;
use crate::field::{self, IntField};
use crate::frame::MessageFrame;
use crate::grant::{self, ChannelGrant, FrequencyBandReceiver};
use crate::identifier::{Identifier, Role};
use crate::trunking::fields::{ServiceOptions, TalkGroup};
use crate::trunking::mac::MacStructure;
use crate::trunking::tsbk::Tsbk;

/// Behavior common to every decoded message.
pub trait Message: fmt::Display + Send + Sync {
    /// Frame the message was decoded from.
    fn frame(&self) -> &MessageFrame;

    /// Every address and channel referenced by the message, in message order. Empty
    /// for messages that reference none.
    fn identifiers(&self) -> &[Identifier];

    /// Channel grant view, for messages that grant a traffic channel.
    fn as_grant(&self) -> Option<&dyn ChannelGrant> { None }

    /// Channel list view, for messages that reference channels.
    fn as_band_receiver(&self) -> Option<&dyn FrequencyBandReceiver> { None }

    /// Whether the message was left undecoded.
    fn is_opaque(&self) -> bool { false }

    /// Uppercase hex rendering of the message bytes.
    fn hex(&self) -> String { self.frame().hex() }
}

/// Message whose contents aren't decoded, kept with its raw bits for display.
#[derive(Debug)]
pub struct Opaque {
    frame: MessageFrame,
    /// Description of what the message is known to be.
    label: String,
}

impl Opaque {
    /// Create a new `Opaque` message with the given description.
    pub fn new<S: Into<String>>(frame: MessageFrame, label: S) -> Opaque {
        Opaque {
            frame,
            label: label.into(),
        }
    }

    /// Description of what the message is known to be.
    pub fn label(&self) -> &str { &self.label }

    /// Raw message bytes.
    pub fn bytes(&self) -> Vec<u8> { self.frame.bytes() }
}

impl Message for Opaque {
    fn frame(&self) -> &MessageFrame { &self.frame }
    fn identifiers(&self) -> &[Identifier] { &[] }
    fn is_opaque(&self) -> bool { true }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.label, self.frame.hex())
    }
}

/// Field in which a layout carries an address, along with the role the layout assigns
/// it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AddressField {
    /// 24-bit radio unit address.
    Radio(Role, IntField),
    /// 16-bit talkgroup address.
    Talkgroup(Role, IntField),
}

impl AddressField {
    /// Bits holding the address.
    pub const fn field(&self) -> IntField {
        match *self {
            AddressField::Radio(_, f) | AddressField::Talkgroup(_, f) => f,
        }
    }

    /// Read the address from a frame whose extent was verified.
    fn read(&self, frame: &MessageFrame) -> Identifier {
        match *self {
            AddressField::Radio(role, f) => Identifier::Radio {
                role,
                address: frame.int(f),
            },
            AddressField::Talkgroup(role, f) => Identifier::Talkgroup {
                role,
                group: TalkGroup::from_bits(frame.int(f) as u16),
            },
        }
    }
}

/// Field layout of a single-channel grant.
pub trait GrantFields: fmt::Debug + Send + Sync {
    /// Name used when describing the message.
    const NAME: &'static str;
    /// Service options, if carried.
    const OPTIONS: Option<IntField> = None;
    /// Band identifier of the granted channel.
    const BAND: IntField;
    /// Channel number of the granted channel.
    const NUMBER: IntField;
    /// Address the channel is granted to.
    const TARGET: AddressField;
    /// Address the call originates from, if carried.
    const SOURCE: Option<AddressField> = None;
    /// Call timer in units of 100ms, if carried.
    const TIMER: Option<IntField> = None;

    /// Number of bits the layout spans.
    fn extent() -> usize {
        field::extent(&[
            Self::BAND,
            Self::NUMBER,
            Self::TARGET.field(),
            Self::OPTIONS.unwrap_or(Self::BAND),
            Self::SOURCE.map_or(Self::BAND, |s| s.field()),
            Self::TIMER.unwrap_or(Self::BAND),
        ])
    }
}

/// Grant of a single traffic channel, decoded with the layout `F`.
///
/// Derived values are computed on first access and cached, so a grant can be shared
/// between threads and read concurrently.
#[derive(Debug)]
pub struct Grant<F: GrantFields> {
    frame: MessageFrame,
    channel: OnceLock<ChannelDescriptor>,
    target: OnceLock<Identifier>,
    source: OnceLock<Option<Identifier>>,
    identifiers: OnceLock<Vec<Identifier>>,
    fields: PhantomData<F>,
}

impl<F: GrantFields> Grant<F> {
    /// Create a new `Grant` over the given frame, verifying the frame holds every field
    /// of the layout.
    pub fn new(frame: MessageFrame) -> Result<Self> {
        frame.require(F::extent())?;

        Ok(Grant {
            frame,
            channel: OnceLock::new(),
            target: OnceLock::new(),
            source: OnceLock::new(),
            identifiers: OnceLock::new(),
            fields: PhantomData,
        })
    }

    /// Granted traffic channel.
    pub fn channel(&self) -> &ChannelDescriptor {
        self.channel.get_or_init(|| {
            ChannelDescriptor::new(self.frame.int(F::BAND) as u8,
                                   self.frame.int(F::NUMBER) as u16)
        })
    }

    /// Address the channel is granted to.
    pub fn target_address(&self) -> &Identifier {
        self.target.get_or_init(|| F::TARGET.read(&self.frame))
    }

    /// Address the call originates from, if the layout carries one.
    pub fn source_address(&self) -> Option<&Identifier> {
        self.source.get_or_init(|| F::SOURCE.map(|s| s.read(&self.frame))).as_ref()
    }

    /// Whether the grant carries a nonzero call timer.
    pub fn has_call_timer(&self) -> bool {
        F::TIMER.map_or(false, |t| self.frame.int(t) != 0)
    }

    /// Call timer in milliseconds, where a raw value of 0 means no timer.
    pub fn call_timer(&self) -> Option<u32> {
        F::TIMER.and_then(|t| grant::call_timer_millis(self.frame.int(t)))
    }

    /// Options granted for the call.
    pub fn service_options(&self) -> ServiceOptions {
        F::OPTIONS.map_or_else(ServiceOptions::default,
                               |o| ServiceOptions::new(self.frame.int(o) as u8))
    }
}

impl<F: GrantFields> ChannelGrant for Grant<F> {
    fn source_address(&self) -> Option<&Identifier> { Grant::source_address(self) }
    fn target_address(&self) -> &Identifier { Grant::target_address(self) }
    fn channel(&self) -> &ChannelDescriptor { Grant::channel(self) }
    fn call_timer(&self) -> Option<u32> { Grant::call_timer(self) }
    fn service_options(&self) -> ServiceOptions { Grant::service_options(self) }
}

impl<F: GrantFields> FrequencyBandReceiver for Grant<F> {
    fn channels(&self) -> &[ChannelDescriptor] {
        std::slice::from_ref(self.channel())
    }
}

impl<F: GrantFields> Message for Grant<F> {
    fn frame(&self) -> &MessageFrame { &self.frame }

    fn identifiers(&self) -> &[Identifier] {
        self.identifiers.get_or_init(|| {
            let mut ids = vec![self.target_address().clone()];
            ids.extend(self.source_address().cloned());
            ids.push(Identifier::Channel(self.channel().clone()));
            ids
        })
    }

    fn as_grant(&self) -> Option<&dyn ChannelGrant> { Some(self) }
    fn as_band_receiver(&self) -> Option<&dyn FrequencyBandReceiver> { Some(self) }
}

impl<F: GrantFields> fmt::Display for Grant<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(F::NAME)?;

        if let Some(src) = self.source_address() {
            write!(f, " {}", src)?;
        }

        write!(f, " {} CHAN:{}", self.target_address(), self.channel())?;

        if F::TIMER.is_some() {
            match self.call_timer() {
                Some(ms) => write!(f, " TIMER:{}s", ms as f64 / 1000.0)?,
                None => write!(f, " TIMER:none")?,
            }
        }

        if F::OPTIONS.is_some() {
            write!(f, " {}", self.service_options())?;
        }

        Ok(())
    }
}

/// Field layout of a message announcing two channel/talkgroup pairs.
pub trait UpdateFields: fmt::Debug + Send + Sync {
    /// Name used when describing the message.
    const NAME: &'static str;
    /// Band identifier of the first channel.
    const BAND_A: IntField;
    /// Channel number of the first channel.
    const NUMBER_A: IntField;
    /// Talkgroup active on the first channel.
    const GROUP_A: IntField;
    /// Band identifier of the second channel.
    const BAND_B: IntField;
    /// Channel number of the second channel.
    const NUMBER_B: IntField;
    /// Talkgroup active on the second channel.
    const GROUP_B: IntField;

    /// Number of bits the layout spans.
    fn extent() -> usize {
        field::extent(&[
            Self::BAND_A, Self::NUMBER_A, Self::GROUP_A,
            Self::BAND_B, Self::NUMBER_B, Self::GROUP_B,
        ])
    }
}

/// Announcement of the talkgroups active on up to two channels, decoded with the
/// layout `F`.
///
/// When only one pair is being announced, the message repeats it in the second slot;
/// the repeat isn't reported.
#[derive(Debug)]
pub struct GroupUpdate<F: UpdateFields> {
    frame: MessageFrame,
    channels: OnceLock<Vec<ChannelDescriptor>>,
    groups: OnceLock<Vec<Identifier>>,
    identifiers: OnceLock<Vec<Identifier>>,
    fields: PhantomData<F>,
}

impl<F: UpdateFields> GroupUpdate<F> {
    /// Create a new `GroupUpdate` over the given frame, verifying the frame holds every
    /// field of the layout.
    pub fn new(frame: MessageFrame) -> Result<Self> {
        frame.require(F::extent())?;

        Ok(GroupUpdate {
            frame,
            channels: OnceLock::new(),
            groups: OnceLock::new(),
            identifiers: OnceLock::new(),
            fields: PhantomData,
        })
    }

    /// Whether the second slot holds a distinct pair.
    pub fn has_second(&self) -> bool {
        self.frame.int(F::BAND_A) != self.frame.int(F::BAND_B) ||
            self.frame.int(F::NUMBER_A) != self.frame.int(F::NUMBER_B) ||
            self.frame.int(F::GROUP_A) != self.frame.int(F::GROUP_B)
    }

    /// Talkgroups of each announced pair.
    pub fn groups(&self) -> &[Identifier] {
        self.groups.get_or_init(|| {
            let mut groups = vec![Identifier::talkgroup_to(self.frame.int(F::GROUP_A) as u16)];

            if self.has_second() {
                groups.push(Identifier::talkgroup_to(self.frame.int(F::GROUP_B) as u16));
            }

            groups
        })
    }

    /// Announced channel and talkgroup pairs.
    pub fn updates(&self) -> impl Iterator<Item = (&ChannelDescriptor, &Identifier)> {
        self.channels().iter().zip(self.groups())
    }
}

impl<F: UpdateFields> FrequencyBandReceiver for GroupUpdate<F> {
    fn channels(&self) -> &[ChannelDescriptor] {
        self.channels.get_or_init(|| {
            let mut channels = vec![
                ChannelDescriptor::new(self.frame.int(F::BAND_A) as u8,
                                       self.frame.int(F::NUMBER_A) as u16),
            ];

            if self.has_second() {
                channels.push(ChannelDescriptor::new(self.frame.int(F::BAND_B) as u8,
                                                     self.frame.int(F::NUMBER_B) as u16));
            }

            channels
        })
    }
}

impl<F: UpdateFields> Message for GroupUpdate<F> {
    fn frame(&self) -> &MessageFrame { &self.frame }

    fn identifiers(&self) -> &[Identifier] {
        self.identifiers.get_or_init(|| {
            self.updates()
                .flat_map(|(c, g)| vec![g.clone(), Identifier::Channel(c.clone())])
                .collect()
        })
    }

    fn as_band_receiver(&self) -> Option<&dyn FrequencyBandReceiver> { Some(self) }
}

impl<F: UpdateFields> fmt::Display for GroupUpdate<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(F::NAME)?;

        for (c, g) in self.updates() {
            write!(f, " {} CHAN:{}", g, c)?;
        }

        Ok(())
    }
}

/// Any decoded message.
#[derive(Debug)]
pub enum P25Message {
    /// Phase 1 trunking signalling block.
    Tsbk(Tsbk),
    /// Phase 2 MAC structure.
    Mac(MacStructure),
    /// Message in a protocol unit that isn't decoded.
    Opaque(Opaque),
}

delegate_message!(P25Message { Tsbk, Mac, Opaque });

#[cfg(test)]
mod test {
    use super::*;
    use crate::field::*;
    use crate::frame::test::frame;
    use hex_literal::hex;

    #[derive(Debug)]
    struct TestGrant;

    impl GrantFields for TestGrant {
        const NAME: &'static str = "TEST GRANT";
        const BAND: IntField = IntField::length4(OCTET_1_BIT_0);
        const NUMBER: IntField = IntField::length12(OCTET_1_BIT_0 + 4);
        const TARGET: AddressField =
            AddressField::Talkgroup(Role::To, IntField::length16(OCTET_3_BIT_16));
        const TIMER: Option<IntField> = Some(IntField::length8(OCTET_5_BIT_32));
    }

    #[derive(Debug)]
    struct TestUpdate;

    impl UpdateFields for TestUpdate {
        const NAME: &'static str = "TEST UPDATE";
        const BAND_A: IntField = IntField::length4(OCTET_1_BIT_0);
        const NUMBER_A: IntField = IntField::length12(OCTET_1_BIT_0 + 4);
        const GROUP_A: IntField = IntField::length16(OCTET_3_BIT_16);
        const BAND_B: IntField = IntField::length4(OCTET_5_BIT_32);
        const NUMBER_B: IntField = IntField::length12(OCTET_5_BIT_32 + 4);
        const GROUP_B: IntField = IntField::length16(OCTET_7_BIT_48);
    }

    #[test]
    fn test_grant() {
        let g = Grant::<TestGrant>::new(frame(&hex!("30 0A 00 64 00"))).unwrap();

        assert_eq!(TestGrant::extent(), 40);
        assert_eq!(g.channel(), &ChannelDescriptor::new(3, 10));
        assert_eq!(g.target_address(), &Identifier::talkgroup_to(100));
        assert_eq!(g.source_address(), None);
        assert!(!g.has_call_timer());
        assert_eq!(g.call_timer(), None);
        assert_eq!(g.service_options(), ServiceOptions::default());
        assert_eq!(g.identifiers(), &[
            Identifier::talkgroup_to(100),
            Identifier::Channel(ChannelDescriptor::new(3, 10)),
        ]);
        assert_eq!(g.to_string(), "TEST GRANT TO:TG100 CHAN:3-10 TIMER:none");

        // Cached values are handed out by reference.
        assert!(std::ptr::eq(g.channel(), g.channel()));
        assert!(std::ptr::eq(g.identifiers(), g.identifiers()));
    }

    #[test]
    fn test_grant_short() {
        assert!(Grant::<TestGrant>::new(frame(&hex!("30 0A 00 64"))).is_err());
    }

    #[test]
    fn test_update() {
        let u = GroupUpdate::<TestUpdate>::new(
            frame(&hex!("10 01 00 0A 20 02 00 0B"))).unwrap();

        assert!(u.has_second());
        assert_eq!(u.channels(), &[
            ChannelDescriptor::new(1, 1),
            ChannelDescriptor::new(2, 2),
        ]);
        assert_eq!(u.identifiers(), &[
            Identifier::talkgroup_to(10),
            Identifier::Channel(ChannelDescriptor::new(1, 1)),
            Identifier::talkgroup_to(11),
            Identifier::Channel(ChannelDescriptor::new(2, 2)),
        ]);
        assert_eq!(u.to_string(), "TEST UPDATE TO:TG10 CHAN:1-1 TO:TG11 CHAN:2-2");

        let u = GroupUpdate::<TestUpdate>::new(
            frame(&hex!("10 01 00 0A 10 01 00 0A"))).unwrap();

        assert!(!u.has_second());
        assert_eq!(u.channels(), &[ChannelDescriptor::new(1, 1)]);
        assert_eq!(u.groups(), &[Identifier::talkgroup_to(10)]);
        assert_eq!(u.identifiers().len(), 2);
    }

    #[test]
    fn test_opaque() {
        let o = Opaque::new(frame(&hex!("3F 90 01 02")), "TSBK OPCODE 0x3F");

        assert!(o.is_opaque());
        assert!(o.identifiers().is_empty());
        assert!(o.as_grant().is_none());
        assert_eq!(o.bytes(), hex!("3F 90 01 02").to_vec());
        assert_eq!(o.hex(), "3F900102");
        assert_eq!(o.to_string(), "TSBK OPCODE 0x3F 3F900102");
    }
}
