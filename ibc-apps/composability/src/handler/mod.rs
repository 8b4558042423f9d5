//! Implementation of the composability overrides.

mod on_recv_packet;
mod write_acknowledgement;

pub use on_recv_packet::*;
pub use write_acknowledgement::*;
