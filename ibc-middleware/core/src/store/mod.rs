//! Keepers for the per-packet records the middleware persists between the
//! moment a packet is rewritten and the moment its lifecycle completes.

mod callbacks;
mod transposed;

pub use callbacks::*;
pub use transposed::*;
