//! Data structures shared by the packet middleware layers sitting between the
//! core channel keeper and the ICS-20 transfer application.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod acknowledgement;
pub mod capability;
pub mod channel;
pub mod contract;
pub mod error;
pub mod events;
pub mod memo;
pub mod packet;
pub mod path;
pub mod serializers;
pub mod transfer;

/// Re-exports the identifiers used to key packets and stores.
pub mod identifiers {
    pub use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
}

pub use ibc_primitives::Signer;
