//! Stream-level decoding of received trunking messages.

use std::sync::Arc;

use crate::channel::{BandTable, ChannelDescriptor, ChannelFrequency};
use crate::config::DecoderConfig;
use crate::crc;
use crate::error::Result;
use crate::frame::MessageFrame;
use crate::message::{Message, Opaque, P25Message};
use crate::nid::{DataUnit, UnitType};
use crate::stats::{HasStats, Stats};
use crate::trunking::mac::{MacPdu, MacStructure};
use crate::trunking::tsbk::{self, Tsbk, TsbkHeader};

/// Decodes a stream of received message frames, learning band parameters along the
/// way.
///
/// Errors are local to the message that caused them: they're logged, counted, and
/// returned, and the decoder is ready for the next frame.
pub struct MessageDecoder {
    config: DecoderConfig,
    /// Current band parameters, replaced rather than mutated while shared.
    bands: Arc<BandTable>,
    stats: Stats,
}

impl MessageDecoder {
    /// Create a new `MessageDecoder` with the given options.
    pub fn new(config: DecoderConfig) -> MessageDecoder {
        MessageDecoder {
            bands: Arc::new(config.bands),
            config,
            stats: Stats::default(),
        }
    }

    /// Options the decoder was created with.
    pub fn config(&self) -> &DecoderConfig { &self.config }

    /// Band parameters known so far.
    pub fn bands(&self) -> &BandTable { &self.bands }

    /// Snapshot of the band parameters known so far, unaffected by later updates.
    pub fn band_snapshot(&self) -> Arc<BandTable> { self.bands.clone() }

    /// Resolve the given channel against the band parameters known so far.
    pub fn resolve(&self, chan: &ChannelDescriptor) -> Option<ChannelFrequency> {
        chan.resolve(&self.bands)
    }

    /// Decode the TSBK held by the given frame, or `None` if it was dropped for being
    /// protected.
    pub fn decode_tsbk(&mut self, frame: MessageFrame) -> Result<Option<Tsbk>> {
        let header = TsbkHeader::decode(&frame)?;

        if self.config.verify_crc {
            crc::verify(frame.bits(), frame.offset(), tsbk::PAYLOAD_BITS)?;
        }

        if header.protected && self.config.drop_protected {
            log::trace!("dropping protected tsbk opcode {:#04x}", header.opcode);
            self.stats.messages.protected += 1;
            return Ok(None);
        }

        let t = Tsbk::decode(frame)?;

        if let Tsbk::IdentifierUpdate(ref u) = t {
            if self.config.learn_bands {
                Arc::make_mut(&mut self.bands).update_from(u);
            }
        }

        Ok(Some(t))
    }

    /// Decode the structures of the MAC PDU held by the given frame.
    ///
    /// When the walk is cut short, the structures before the failure are still returned.
    pub fn decode_mac(&mut self, frame: MessageFrame) -> Result<Vec<MacStructure>> {
        let pdu = MacPdu::decode(frame)?;

        if let Some(e) = pdu.truncated() {
            log::warn!("mac pdu truncated after {} structures: {}",
                       pdu.structures().len(), e);
            self.stats.truncated_pdus += 1;
        }

        Ok(pdu.into_structures())
    }

    /// Decode every message held by the given frame.
    pub fn decode(&mut self, frame: MessageFrame) -> Result<Vec<P25Message>> {
        self.stats.messages.received += 1;
        self.stats.corrected_bits += frame.corrected_count();

        let decoded = match frame.unit() {
            UnitType::Phase1(DataUnit::TrunkingSignaling) =>
                self.decode_tsbk(frame).map(|t| t.into_iter().map(P25Message::Tsbk).collect()),
            UnitType::Phase2(_) =>
                self.decode_mac(frame).map(|s| s.into_iter().map(P25Message::Mac).collect()),
            UnitType::Phase1(unit) => {
                let label = format!("{:?}", unit).to_uppercase();
                Ok(vec![P25Message::Opaque(Opaque::new(frame, label))])
            },
        };

        let msgs: Vec<P25Message> = match decoded {
            Ok(msgs) => msgs,
            Err(e) => {
                log::warn!("dropping message: {}", e);
                self.stats.record_err(e);
                return Err(e);
            },
        };

        for msg in msgs.iter() {
            if msg.is_opaque() {
                log::trace!("{}", msg);
                self.stats.messages.opaque += 1;
                continue;
            }

            log::debug!("nac {:03X}: {}", msg.frame().nac().to_bits(), msg);
            self.stats.messages.decoded += 1;

            if let Some(r) = msg.as_band_receiver() {
                for chan in r.channels() {
                    if chan.resolve(&self.bands).is_none() {
                        self.stats.errors.unknown_band += 1;
                    }
                }
            }
        }

        Ok(msgs)
    }

    /// Decode each of the given frames in order, skipping those that fail.
    pub fn decode_all<I>(&mut self, frames: I) -> Vec<P25Message>
        where I: IntoIterator<Item = MessageFrame>
    {
        frames.into_iter()
            .filter_map(|f| self.decode(f).ok())
            .flatten()
            .collect()
    }
}

impl Default for MessageDecoder {
    fn default() -> Self { MessageDecoder::new(DecoderConfig::default()) }
}

impl HasStats for MessageDecoder {
    fn stats(&mut self) -> &mut Stats { &mut self.stats }
}
