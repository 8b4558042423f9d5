//! The applications at both ends of a middleware stack.

mod channel;
mod transfer;

pub use channel::*;
pub use transfer::*;
