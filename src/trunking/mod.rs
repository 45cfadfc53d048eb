//! Trunking control channel messages.

pub mod fields;
pub mod mac;
pub mod tsbk;
