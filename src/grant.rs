//! Uniform views over messages that assign or reference traffic channels.

use crate::channel::ChannelDescriptor;
use crate::identifier::Identifier;
use crate::trunking::fields::ServiceOptions;

/// Common view of every message that grants a traffic channel, independent of how the
/// message lays out its fields.
pub trait ChannelGrant {
    /// Unit or group the call originates from. Many grants carry no source, which isn't
    /// an error.
    fn source_address(&self) -> Option<&Identifier>;

    /// Unit or group the channel is granted to.
    fn target_address(&self) -> &Identifier;

    /// Granted traffic channel.
    fn channel(&self) -> &ChannelDescriptor;

    /// Maximum duration of the call in milliseconds, or `None` if the grant carries no
    /// timer.
    fn call_timer(&self) -> Option<u32> { None }

    /// Options granted for the call. Grants that carry no options report none set.
    fn service_options(&self) -> ServiceOptions { ServiceOptions::default() }
}

/// Message that references one or more channels whose frequencies are resolved through
/// the band table.
pub trait FrequencyBandReceiver {
    /// Every channel referenced by the message.
    fn channels(&self) -> &[ChannelDescriptor];
}

/// Convert a raw call timer in units of 100ms to milliseconds, treating 0 as no timer.
pub fn call_timer_millis(raw: u32) -> Option<u32> {
    match raw {
        0 => None,
        t => Some(t * 100),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_call_timer() {
        assert_eq!(call_timer_millis(0), None);
        assert_eq!(call_timer_millis(1), Some(100));
        assert_eq!(call_timer_millis(600), Some(60_000));
        assert_eq!(call_timer_millis(0xFFFF), Some(6_553_500));
    }
}
