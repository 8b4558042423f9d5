//! Memo envelope keys and helpers to inspect ICS-20 memos as JSON objects.

use serde_json::{Map, Value};

/// Routes the received funds into a contract execution.
pub const WASM_KEY: &str = "wasm";
pub const WASM_CONTRACT_KEY: &str = "contract";
pub const WASM_MSG_KEY: &str = "msg";
/// Registers a contract to notify once an outbound packet settles.
pub const IBC_CALLBACK_KEY: &str = "ibc_callback";
/// Carries a token bridge gateway transfer to be translated.
pub const GATEWAY_PAYLOAD_KEY: &str = "gateway_ibc_token_bridge_payload";

pub type JsonObject = Map<String, Value>;

/// Parses a memo as a JSON object; `None` for anything else (empty,
/// not JSON, or JSON that is not an object).
pub fn parse_memo_object(memo: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(memo) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Returns the memo's JSON object when it has `key` at the top level.
///
/// Keys are compared after decoding, so escaped spellings such as
/// `"\u0077asm"` match as well.
pub fn json_object_with_key(memo: &str, key: &str) -> Option<JsonObject> {
    parse_memo_object(memo).filter(|map| map.contains_key(key))
}
