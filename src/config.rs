//! Decoder options.

use crate::channel::BandTable;

/// Options controlling how a `MessageDecoder` treats received messages.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ser", serde(default))]
pub struct DecoderConfig {
    /// Drop TSBKs whose CRC doesn't match.
    pub verify_crc: bool,
    /// Drop protected (encrypted) TSBKs instead of passing them on as opaque messages.
    pub drop_protected: bool,
    /// Record band parameters from received identifier updates.
    pub learn_bands: bool,
    /// Band parameters known up front, for example from a site survey.
    pub bands: BandTable,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            verify_crc: true,
            drop_protected: false,
            learn_bands: true,
            bands: BandTable::default(),
        }
    }
}

impl DecoderConfig {
    /// Set whether CRCs are verified.
    pub fn verify_crc(mut self, verify: bool) -> Self {
        self.verify_crc = verify;
        self
    }

    /// Set whether protected messages are dropped.
    pub fn drop_protected(mut self, drop: bool) -> Self {
        self.drop_protected = drop;
        self
    }

    /// Set whether bands are learned from identifier updates.
    pub fn learn_bands(mut self, learn: bool) -> Self {
        self.learn_bands = learn;
        self
    }

    /// Start with the given band parameters.
    pub fn bands(mut self, bands: BandTable) -> Self {
        self.bands = bands;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::channel::ChannelParams;

    #[test]
    fn test_builder() {
        let c = DecoderConfig::default();
        assert!(c.verify_crc);
        assert!(!c.drop_protected);
        assert!(c.learn_bands);
        assert!(c.bands.is_empty());

        let mut t = BandTable::new();
        t.insert(1, ChannelParams::from_hz(851_006_250, 6_250));

        let c = DecoderConfig::default().verify_crc(false).drop_protected(true).bands(t);
        assert!(!c.verify_crc);
        assert!(c.drop_protected);
        assert_eq!(c.bands.len(), 1);
    }

    #[cfg(feature = "ser")]
    #[test]
    fn test_serde() {
        let c: DecoderConfig = serde_json::from_str(r#"{"verify_crc": false}"#).unwrap();

        assert!(!c.verify_crc);
        assert!(c.learn_bands);

        let json = serde_json::to_string(&c.clone().learn_bands(false)).unwrap();
        let back: DecoderConfig = serde_json::from_str(&json).unwrap();
        assert!(!back.learn_bands);
        assert_eq!(back.bands, c.bands);
    }
}
