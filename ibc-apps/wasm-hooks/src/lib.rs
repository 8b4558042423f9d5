//! Wasm hooks: an ICS-20 middleware that turns a transfer carrying a `wasm`
//! memo into a contract execution funded by the transferred tokens, and that
//! notifies contracts registered through `ibc_callback` once their outbound
//! transfers are acknowledged or time out.
//!
//! Received funds are never handed to the contract address named by the
//! sender directly. They are credited to an intermediate account derived
//! from the (channel, sender) pair, which then executes the contract.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod ack;
pub mod config;
pub mod denom;
pub mod error;
pub mod execute;
pub mod handler;
pub mod hooks;
pub mod memo;
pub mod sender;

pub use config::WasmHooksConfig;
pub use error::HooksError;
pub use hooks::WasmHooks;
