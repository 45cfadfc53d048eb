//! Decoding of APCO P25 trunking control messages.
//!
//! Phase 1 trunking signalling blocks and Phase 2 MAC structures are decoded from their
//! error-corrected bits into typed messages. Messages that grant a traffic channel
//! share the `ChannelGrant` view, and the channels they reference are resolved to
//! frequencies with band parameters learned from the control channel.

#[macro_use]
mod macros;

pub mod bits;
pub mod channel;
pub mod config;
pub mod crc;
pub mod decoder;
pub mod error;
pub mod field;
pub mod frame;
pub mod grant;
pub mod identifier;
pub mod message;
pub mod nid;
pub mod stats;
pub mod trunking;

pub use crate::bits::CorrectedBitBuffer;
pub use crate::channel::{BandTable, ChannelDescriptor, ChannelFrequency, ChannelParams};
pub use crate::config::DecoderConfig;
pub use crate::decoder::MessageDecoder;
pub use crate::error::{P25Error, Result};
pub use crate::field::IntField;
pub use crate::frame::MessageFrame;
pub use crate::grant::{ChannelGrant, FrequencyBandReceiver};
pub use crate::identifier::{Identifier, Role};
pub use crate::message::{Message, P25Message};
