//! Composition primitives for packet middleware.
//!
//! A middleware wraps the next layer of the stack, either an application
//! ([`module::IbcModule`]) on the receive side or the channel keeper
//! ([`ics4::Ics4Wrapper`]) on the send side, and decides per operation
//! through a [`hooks`] registry whether to replace, observe or simply forward
//! the call.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod ack;
pub mod context;
pub mod hooks;
pub mod ics4;
pub mod ics4_middleware;
pub mod middleware;
pub mod module;
pub mod store;

/// Re-exports data structures from the types crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_middleware_types::*;
}
