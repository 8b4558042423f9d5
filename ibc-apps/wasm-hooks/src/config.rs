use serde::{Deserialize, Serialize};

/// Default human readable part of account addresses on the host chain.
pub const DEFAULT_BECH32_PREFIX: &str = "wormhole";

/// Configuration of the wasm hooks middleware.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WasmHooksConfig {
    /// Prefix used to encode intermediate sender accounts and to validate
    /// contract addresses found in memos.
    pub bech32_prefix: String,
}

impl WasmHooksConfig {
    pub fn new(bech32_prefix: impl Into<String>) -> Self {
        Self {
            bech32_prefix: bech32_prefix.into(),
        }
    }
}

impl Default for WasmHooksConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BECH32_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: WasmHooksConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.bech32_prefix, "wormhole");

        let config: WasmHooksConfig =
            serde_json::from_str(r#"{"bech32_prefix":"osmo"}"#).unwrap();
        assert_eq!(config, WasmHooksConfig::new("osmo"));
    }
}
