//! Defines the channel capability handle.

use core::fmt::{Debug, Error as FmtError, Formatter};

/// Proof that the holder may send and acknowledge packets on a channel.
///
/// Only the channel keeper mints capabilities. Middleware layers receive a
/// reference and pass it down unchanged; the handle can be neither cloned
/// nor serialized.
#[derive(PartialEq, Eq)]
pub struct ChannelCapability {
    index: u64,
}

impl ChannelCapability {
    /// Mints a new capability. Intended for channel keepers only.
    pub fn issue(index: u64) -> Self {
        Self { index }
    }
}

impl Debug for ChannelCapability {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "ChannelCapability({})", self.index)
    }
}
