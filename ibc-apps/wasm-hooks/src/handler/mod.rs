//! Implementation of the wasm hooks overrides.

mod on_acknowledgement_packet;
mod on_recv_packet;
mod on_timeout_packet;
mod send_packet;

pub use on_acknowledgement_packet::*;
pub use on_recv_packet::*;
pub use on_timeout_packet::*;
pub use send_packet::*;
