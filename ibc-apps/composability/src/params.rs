use serde::{Deserialize, Serialize};

/// One hour, in nanoseconds.
pub const DEFAULT_FORWARD_TIMEOUT_NS: u64 = 3_600_000_000_000;
pub const DEFAULT_FORWARD_RETRIES: u8 = 0;

/// Parameters of the `forward` instructions built for gateway transfers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposabilityParams {
    /// Relative timeout of the forwarded packet.
    pub forward_timeout_ns: u64,
    /// How often the forwarding layer retries a failed hop.
    pub forward_retries: u8,
}

impl Default for ComposabilityParams {
    fn default() -> Self {
        Self {
            forward_timeout_ns: DEFAULT_FORWARD_TIMEOUT_NS,
            forward_retries: DEFAULT_FORWARD_RETRIES,
        }
    }
}
