/// Implement `Message` and `Display` for an enum whose variants each wrap a single
/// message type, forwarding every call to the wrapped message.
macro_rules! delegate_message {
    ($name:ident { $($variant:ident),* $(,)* }) => {
        impl $crate::message::Message for $name {
            fn frame(&self) -> &$crate::frame::MessageFrame {
                match *self {
                    $($name::$variant(ref m) => $crate::message::Message::frame(m),)*
                }
            }

            fn identifiers(&self) -> &[$crate::identifier::Identifier] {
                match *self {
                    $($name::$variant(ref m) => $crate::message::Message::identifiers(m),)*
                }
            }

            fn as_grant(&self) -> Option<&dyn $crate::grant::ChannelGrant> {
                match *self {
                    $($name::$variant(ref m) => $crate::message::Message::as_grant(m),)*
                }
            }

            fn as_band_receiver(&self)
                -> Option<&dyn $crate::grant::FrequencyBandReceiver>
            {
                match *self {
                    $($name::$variant(ref m) =>
                        $crate::message::Message::as_band_receiver(m),)*
                }
            }

            fn is_opaque(&self) -> bool {
                match *self {
                    $($name::$variant(ref m) => $crate::message::Message::is_opaque(m),)*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                match *self {
                    $($name::$variant(ref m) => ::std::fmt::Display::fmt(m, f),)*
                }
            }
        }
    };
}
