//! Derivation of the intermediate account that receives routed funds, and
//! validation of account addresses.

use ibc_middleware_types::identifiers::ChannelId;
use ibc_middleware_types::Signer;
use sha2::{Digest, Sha256};
use subtle_encoding::bech32;

/// Domain separator of the intermediate sender derivation.
pub const SENDER_PREFIX: &str = "ibc-wasm-hook-intermediary";

/// Upper bound on the length of a bech32 string.
const BECH32_MAX_LENGTH: usize = 90;

/// Derives the account that receives the funds of a wasm-routed transfer and
/// then executes the contract.
///
/// The address is `bech32(prefix, sha256(sha256(SENDER_PREFIX) || "{channel}/{sender}"))`,
/// so every (channel, original sender) pair owns a distinct account that no
/// other pair can act as.
pub fn derive_intermediate_sender(
    channel_id: &ChannelId,
    original_sender: &str,
    bech32_prefix: &str,
) -> Result<Signer, String> {
    validate_prefix(bech32_prefix)?;

    let type_hash = Sha256::digest(SENDER_PREFIX.as_bytes());
    let mut hasher = Sha256::new();
    hasher.update(type_hash);
    hasher.update(format!("{channel_id}/{original_sender}").as_bytes());
    let address = hasher.finalize();

    let encoded = bech32::encode(bech32_prefix, address);
    if encoded.len() > BECH32_MAX_LENGTH {
        return Err(format!(
            "encoded address exceeds {BECH32_MAX_LENGTH} characters"
        ));
    }
    Ok(Signer::from(encoded))
}

/// Checks that `address` is a bech32 account address under `bech32_prefix`.
pub fn validate_address(address: &str, bech32_prefix: &str) -> Result<(), String> {
    if address.is_empty() {
        return Err("empty address string is not allowed".to_string());
    }
    let (hrp, data) =
        bech32::decode(address).map_err(|e| format!("decoding bech32 failed: {e:?}"))?;
    if hrp != bech32_prefix {
        return Err(format!(
            "invalid Bech32 prefix; expected {bech32_prefix}, got {hrp}"
        ));
    }
    if data.is_empty() || data.len() > 255 {
        return Err(format!("invalid address length {}", data.len()));
    }
    Ok(())
}

fn validate_prefix(prefix: &str) -> Result<(), String> {
    let valid = !prefix.is_empty()
        && prefix
            .bytes()
            .all(|b| (33..=126).contains(&b) && !b.is_ascii_uppercase());
    if valid {
        Ok(())
    } else {
        Err(format!("invalid bech32 prefix `{prefix}`"))
    }
}
