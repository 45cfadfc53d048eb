//! Runtime statistics.

use crate::error::P25Error;

/// Tracks how many messages ended in each outcome.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct MessageStats {
    /// Total number of received messages.
    pub received: usize,
    /// Number of messages decoded into a known variant.
    pub decoded: usize,
    /// Number of messages left opaque.
    pub opaque: usize,
    /// Number of messages dropped for being protected.
    pub protected: usize,
}

impl MessageStats {
    /// Merge in the stats from the given object and clear the other stats.
    fn merge(&mut self, other: &mut MessageStats) {
        self.received += other.received;
        self.decoded += other.decoded;
        self.opaque += other.opaque;
        self.protected += other.protected;

        *other = MessageStats::default();
    }
}

/// Tracks how many messages were dropped with each kind of error.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorStats {
    /// Fields addressed past the end of the message.
    pub out_of_range: usize,
    /// Messages shorter than their header.
    pub short: usize,
    /// Failed checksums.
    pub crc: usize,
    /// Channel resolutions against unknown bands.
    pub unknown_band: usize,
}

impl ErrorStats {
    /// Total number of errors.
    pub fn total(&self) -> usize {
        self.out_of_range + self.short + self.crc + self.unknown_band
    }

    fn merge(&mut self, other: &mut ErrorStats) {
        self.out_of_range += other.out_of_range;
        self.short += other.short;
        self.crc += other.crc;
        self.unknown_band += other.unknown_band;

        *other = ErrorStats::default();
    }
}

/// Records various runtime statistics.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Stats for message outcomes.
    pub messages: MessageStats,
    /// Stats for dropped messages.
    pub errors: ErrorStats,
    /// Number of bits corrected by upstream error correction in received messages.
    pub corrected_bits: usize,
    /// Number of MAC PDUs whose structure walk was cut short.
    pub truncated_pdus: usize,
}

impl Stats {
    /// Merge in the stats from the given object and reset the other stats back to
    /// default.
    pub fn merge<T: HasStats>(&mut self, other: &mut T) {
        let stats = other.stats();

        self.messages.merge(&mut stats.messages);
        self.errors.merge(&mut stats.errors);
        self.corrected_bits += stats.corrected_bits;
        self.truncated_pdus += stats.truncated_pdus;

        stats.corrected_bits = 0;
        stats.truncated_pdus = 0;
    }

    /// Clear all stats.
    pub fn clear(&mut self) {
        *self = Stats::default();
    }

    /// Record the given error into the current stats.
    pub fn record_err(&mut self, err: P25Error) {
        use crate::error::P25Error::*;

        match err {
            OutOfRange { .. } => self.errors.out_of_range += 1,
            ShortMessage { .. } => self.errors.short += 1,
            CrcMismatch { .. } => self.errors.crc += 1,
            UnknownBand(_) => self.errors.unknown_band += 1,
        }
    }
}

/// Indicates an object tracks runtime stats.
pub trait HasStats {
    /// Retrieve stats for the object.
    fn stats(&mut self) -> &mut Stats;
}

impl HasStats for Stats {
    fn stats(&mut self) -> &mut Stats { self }
}
