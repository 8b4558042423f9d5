use ibc_middleware_types::Signer;
use subtle_encoding::bech32;

/// The account prefix of the mock host.
pub const DUMMY_BECH32_PREFIX: &str = "wormhole";

/// Returns a valid account address whose 32 bytes are all `seed`.
///
/// `dummy_account(1)` is
/// `wormhole1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqsu0fcrz`.
pub fn dummy_account(seed: u8) -> Signer {
    Signer::from(bech32::encode(DUMMY_BECH32_PREFIX, [seed; 32]))
}

/// Returns the address of a remote chain user; it is never decoded locally.
pub fn dummy_remote_account() -> Signer {
    Signer::from("cosmos1sender".to_string())
}
