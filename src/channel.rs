//! Logical channels and their resolution to physical frequencies.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::error::{P25Error, Result};

/// Number of band identifiers (4 bits) a site can advertise.
pub const BANDS: usize = 16;

/// Computes TX/RX frequencies and bandwidth for channel numbers within a band.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelParams {
    /// Base frequency in Hz.
    base: u64,
    /// Channel spacing in Hz.
    spacing: u32,
    /// Transmit frequency offset in Hz.
    offset: i64,
    /// Channel bandwidth in Hz.
    bandwidth: u32,
}

impl ChannelParams {
    /// Create a new `ChannelParams` from the given base frequency (5Hz steps), bandwidth
    /// (125Hz steps), TX offset (250kHz steps), and inter-channel spacing (125Hz steps.)
    pub fn new(base: u32, bandwidth: u16, offset: u16, spacing: u16) -> ChannelParams {
        // The MSB denotes the sign and the lower byte is the actual offset.
        let off = (offset as i64 & 0xFF) * 250_000;

        ChannelParams {
            base: base as u64 * 5,
            spacing: spacing as u32 * 125,
            offset: if offset >> 8 == 0 { -off } else { off },
            bandwidth: bandwidth as u32 * 125,
        }
    }

    /// Create a new `ChannelParams` from a base frequency and channel spacing in Hz, with
    /// no TX offset and unspecified bandwidth.
    pub fn from_hz(base: u64, spacing: u32) -> ChannelParams {
        ChannelParams {
            base,
            spacing,
            offset: 0,
            bandwidth: 0,
        }
    }

    /// Base frequency in Hz.
    pub fn base(&self) -> u64 { self.base }
    /// Spacing between channel numbers in Hz.
    pub fn spacing(&self) -> u32 { self.spacing }
    /// Offset of the TX frequency from the RX frequency in Hz.
    pub fn offset(&self) -> i64 { self.offset }
    /// Channel bandwidth in Hz.
    pub fn bandwidth(&self) -> u32 { self.bandwidth }

    /// Receive frequency for the given channel number in Hz.
    pub fn rx_freq(&self, ch: u16) -> u64 {
        self.base + self.spacing as u64 * ch as u64
    }

    /// Transmit frequency for the given channel number in Hz, or `None` if the offset
    /// takes it below 0Hz.
    pub fn tx_freq(&self, ch: u16) -> Option<u64> {
        self.rx_freq(ch).checked_add_signed(self.offset)
    }

    /// Frequencies of the given channel number.
    fn frequency(&self, ch: u16) -> ChannelFrequency {
        ChannelFrequency {
            downlink: self.rx_freq(ch),
            uplink: self.tx_freq(ch),
            bandwidth: self.bandwidth,
        }
    }
}

/// Map band identifier (maximum 16 per control channel) to its parameters.
///
/// Bands are learned from control channel traffic, so missing entries are normal. The
/// table is meant to be shared read-only between decoders, for example as an
/// `Arc<BandTable>` snapshot replaced whenever a band changes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub struct BandTable([Option<ChannelParams>; BANDS]);

impl BandTable {
    /// Create a new, empty `BandTable`.
    pub fn new() -> BandTable { BandTable::default() }

    /// Parameters of the given band, if known.
    pub fn get(&self, band: u8) -> Option<&ChannelParams> {
        self.0.get(band as usize).and_then(|p| p.as_ref())
    }

    /// Set the parameters of the given band, returning the previous ones.
    ///
    /// Panics if the band identifier doesn't fit in 4 bits.
    pub fn insert(&mut self, band: u8, params: ChannelParams) -> Option<ChannelParams> {
        assert!((band as usize) < BANDS, "band {} out of range", band);

        let prev = self.0[band as usize].replace(params);

        if prev != Some(params) {
            log::debug!("band {} base {} Hz spacing {} Hz", band, params.base,
                        params.spacing);
        }

        prev
    }

    /// Forget the parameters of the given band.
    pub fn remove(&mut self, band: u8) -> Option<ChannelParams> {
        self.0.get_mut(band as usize).and_then(|p| p.take())
    }

    /// Number of known bands.
    pub fn len(&self) -> usize { self.0.iter().filter(|p| p.is_some()).count() }

    /// Whether no bands are known.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Iterate over the known bands and their parameters.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &ChannelParams)> {
        self.0.iter().enumerate().filter_map(|(b, p)| p.as_ref().map(|p| (b as u8, p)))
    }
}

/// Physical frequencies of a resolved channel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelFrequency {
    /// Frequency the subscriber receives on (site transmit) in Hz.
    pub downlink: u64,
    /// Frequency the subscriber transmits on in Hz, or `None` if the band's offset
    /// doesn't yield a valid one.
    pub uplink: Option<u64>,
    /// Channel bandwidth in Hz, or 0 if unknown.
    pub bandwidth: u32,
}

/// Logical channel referenced by a message: a band identifier and a channel number
/// within that band.
///
/// The frequency is resolved lazily against a band table, since the band may not be
/// known yet when the message is decoded. Resolution always consults the given table:
/// the first result is cached along with the band parameters it came from, and only
/// reused while the table holds the same parameters.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelDescriptor {
    /// Band identifier.
    band: u8,
    /// Channel number within the band.
    number: u16,
    /// First resolution and the band parameters it was computed from.
    #[cfg_attr(feature = "ser", serde(skip))]
    resolved: OnceLock<(ChannelParams, ChannelFrequency)>,
}

impl ChannelDescriptor {
    /// Create a new, unresolved `ChannelDescriptor`.
    pub fn new(band: u8, number: u16) -> ChannelDescriptor {
        ChannelDescriptor {
            band,
            number,
            resolved: OnceLock::new(),
        }
    }

    /// Parse a channel from the given 16 bits: a 4-bit band followed by a 12-bit
    /// channel number.
    pub fn from_bits(bits: u16) -> ChannelDescriptor {
        Self::new((bits >> 12) as u8, bits & 0xFFF)
    }

    /// Band identifier whose parameters to use.
    pub fn band(&self) -> u8 { self.band }
    /// Individual channel number within the band.
    pub fn number(&self) -> u16 { self.number }

    /// Resolve the channel's frequencies with the given band table, or `None` if the
    /// band isn't known.
    pub fn resolve(&self, table: &BandTable) -> Option<ChannelFrequency> {
        let params = match table.get(self.band) {
            Some(p) => p,
            None => {
                log::trace!("channel {} unresolved: band not known", self);
                return None;
            },
        };

        let &(cached, freq) = self.resolved
            .get_or_init(|| (*params, params.frequency(self.number)));

        if cached == *params {
            Some(freq)
        } else {
            Some(params.frequency(self.number))
        }
    }

    /// Resolve the channel's frequencies, failing with `UnknownBand` if the band isn't
    /// known.
    pub fn try_resolve(&self, table: &BandTable) -> Result<ChannelFrequency> {
        self.resolve(table).ok_or(P25Error::UnknownBand(self.band))
    }

    /// Frequencies from a previous successful resolution.
    pub fn resolved(&self) -> Option<ChannelFrequency> {
        self.resolved.get().map(|&(_, f)| f)
    }

    /// Whether the channel has been resolved.
    pub fn is_resolved(&self) -> bool { self.resolved.get().is_some() }

    /// Downlink frequency from a previous successful resolution.
    pub fn downlink(&self) -> Option<u64> { self.resolved().map(|f| f.downlink) }
}

impl PartialEq for ChannelDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.band == other.band && self.number == other.number
    }
}

impl Eq for ChannelDescriptor {}

impl Hash for ChannelDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.band.hash(state);
        self.number.hash(state);
    }
}

impl fmt::Display for ChannelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.band, self.number)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_channel_params() {
        // Example from the standard.
        let p = ChannelParams::new(170201250, 0x64, 0b010110100, 0x32);
        assert_eq!(p.base(), 851_006_250);
        assert_eq!(p.spacing(), 6_250);
        assert_eq!(p.offset(), -45_000_000);
        assert_eq!(p.bandwidth(), 12_500);
        assert_eq!(p.rx_freq(0b1001), 851_062_500);
        assert_eq!(p.tx_freq(0b1001), Some(806_062_500));

        let p = ChannelParams::new(30_000_000, 0x64, 0b100000010, 0x64);
        assert_eq!(p.offset(), 500_000);
        assert_eq!(p.tx_freq(0), Some(150_500_000));

        // Negative offset larger than the receive frequency.
        let p = ChannelParams::new(1_000, 0x64, 0b010110100, 0x32);
        assert_eq!(p.rx_freq(0), 5_000);
        assert_eq!(p.tx_freq(0), None);
    }

    #[test]
    fn test_from_bits() {
        let c = ChannelDescriptor::from_bits(0b1000_100001110111);
        assert_eq!(c.band(), 0b1000);
        assert_eq!(c.number(), 0b100001110111);
        assert_eq!(c.to_string(), "8-2167");
    }

    #[test]
    fn test_resolve() {
        let mut t = BandTable::new();
        let c = ChannelDescriptor::new(2, 100);

        assert_eq!(c.resolve(&t), None);
        assert_eq!(c.try_resolve(&t), Err(P25Error::UnknownBand(2)));
        assert!(!c.is_resolved());

        t.insert(2, ChannelParams::from_hz(851_006_250, 12_500));
        let f = c.resolve(&t).unwrap();

        assert_eq!(f.downlink, 851_006_250 + 100 * 12_500);
        assert_eq!(f.uplink, Some(f.downlink));
        assert!(c.is_resolved());
        assert_eq!(c.downlink(), Some(852_256_250));

        // Identical inputs resolve identically.
        let d = ChannelDescriptor::new(2, 100);
        assert_eq!(d.resolve(&t), Some(f));
        assert_eq!(c, d);

        // Absent band is unresolved, whatever was resolved before.
        t.remove(2);
        assert_eq!(c.resolve(&t), None);
        assert_eq!(ChannelDescriptor::new(2, 100).resolve(&t), None);
        assert_eq!(c.resolved(), Some(f));

        // Resolution follows the table passed in.
        let mut other = BandTable::new();
        other.insert(2, ChannelParams::from_hz(460_000_000, 6_250));
        let g = c.resolve(&other).unwrap();
        assert_eq!(g.downlink, 460_625_000);
        assert_eq!(ChannelDescriptor::new(2, 100).resolve(&other), Some(g));

        t.insert(2, ChannelParams::from_hz(851_006_250, 12_500));
        assert_eq!(c.resolve(&t), Some(f));
    }

    #[test]
    fn test_band_table() {
        let mut t = BandTable::new();
        assert!(t.is_empty());

        let p = ChannelParams::from_hz(450_000_000, 6_250);
        assert_eq!(t.insert(15, p), None);
        assert_eq!(t.insert(15, p), Some(p));
        assert_eq!(t.insert(3, p), None);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(15), Some(&p));
        assert_eq!(t.get(16), None);
        assert_eq!(t.get(200), None);
        assert_eq!(t.iter().map(|(b, _)| b).collect::<Vec<_>>(), vec![3, 15]);
        assert_eq!(t.remove(3), Some(p));
        assert_eq!(t.remove(3), None);
        assert_eq!(t.remove(99), None);
    }

    #[test]
    #[should_panic]
    fn test_insert_range() {
        BandTable::new().insert(16, ChannelParams::from_hz(0, 0));
    }

    #[test]
    fn test_shared_resolve() {
        let mut t = BandTable::new();
        t.insert(1, ChannelParams::new(170201250, 0x64, 0b010110100, 0x32));

        let table = Arc::new(t);
        let chan = Arc::new(ChannelDescriptor::new(1, 9));

        let handles = (0..8).map(|_| {
            let table = table.clone();
            let chan = chan.clone();

            thread::spawn(move || chan.resolve(&table))
        }).collect::<Vec<_>>();

        for h in handles {
            assert_eq!(h.join().unwrap().map(|f| f.downlink), Some(851_062_500));
        }
    }
}
