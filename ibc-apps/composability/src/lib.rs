//! Composability middleware: translates the `gateway_ibc_token_bridge_payload`
//! memo of a received ICS-20 transfer into instructions for the layers below.
//!
//! When the routing contract knows a local channel serving the target chain,
//! the memo becomes a packet forward (`forward`) instruction and the original
//! packet data is kept aside, so that the acknowledgement written later
//! refers to what the sender actually sent. Otherwise the memo becomes a
//! `wasm` call into the routing contract itself.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod error;
pub mod format;
pub mod handler;
pub mod hooks;
pub mod params;
pub mod payload;
pub mod routing;

pub use error::ComposabilityError;
pub use hooks::Composability;
pub use params::ComposabilityParams;
