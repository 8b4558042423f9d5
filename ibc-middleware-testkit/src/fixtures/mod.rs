mod acknowledgement;
mod packet;
mod signer;
mod transfer;

pub use acknowledgement::*;
pub use packet::*;
pub use signer::*;
pub use transfer::*;
