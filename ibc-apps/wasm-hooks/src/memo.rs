//! Parsing of the `wasm` and `ibc_callback` memo envelopes.

use displaydoc::Display;
use ibc_middleware_types::memo::{
    json_object_with_key, IBC_CALLBACK_KEY, WASM_CONTRACT_KEY, WASM_KEY, WASM_MSG_KEY,
};
use ibc_middleware_types::Signer;
use serde_json::Value;

use crate::sender::validate_address;

/// Reasons a `wasm` envelope is rejected.
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum WasmMemoError {
    /// wasm metadata is not a valid JSON map object
    NotAnObject,
    /// Could not find key wasm["contract"]
    MissingContract,
    /// wasm["contract"] is not a valid bech32 address
    InvalidContract,
    /// wasm["contract"] should be the same as the receiver of the packet
    ContractNotReceiver,
    /// Could not find key wasm["msg"]
    MissingMsg,
    /// wasm["msg"] is not a map object
    MsgNotObject,
}

/// A validated `wasm` envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WasmMemo {
    pub contract: Signer,
    /// The serialized `msg` object, passed verbatim to the contract.
    pub msg: Vec<u8>,
}

/// Describes an invalid memo in the form reported in error events.
pub fn describe_memo_error(memo: &str, err: &WasmMemoError) -> String {
    format!("wasm metadata not properly formatted for: '{memo}'. {err}")
}

/// Extracts the `wasm` envelope of a memo.
///
/// Returns `Ok(None)` when the memo is not routed to a contract at all (no
/// memo, not a JSON object, or no `wasm` key), in which case the packet must
/// pass through untouched.
pub fn validate_and_parse_memo(
    memo: &str,
    receiver: &str,
    bech32_prefix: &str,
) -> Result<Option<WasmMemo>, WasmMemoError> {
    let Some(mut metadata) = json_object_with_key(memo, WASM_KEY) else {
        return Ok(None);
    };

    let Some(Value::Object(mut wasm)) = metadata.remove(WASM_KEY) else {
        return Err(WasmMemoError::NotAnObject);
    };

    let contract = match wasm.get(WASM_CONTRACT_KEY) {
        Some(Value::String(contract)) => contract.clone(),
        _ => return Err(WasmMemoError::MissingContract),
    };

    validate_address(&contract, bech32_prefix).map_err(|_| WasmMemoError::InvalidContract)?;

    // Binds the transfer's destination to the contract being routed to.
    if contract != receiver {
        return Err(WasmMemoError::ContractNotReceiver);
    }

    let msg = match wasm.remove(WASM_MSG_KEY) {
        None | Some(Value::Null) => return Err(WasmMemoError::MissingMsg),
        Some(msg @ Value::Object(_)) => msg,
        Some(_) => return Err(WasmMemoError::MsgNotObject),
    };

    Ok(Some(WasmMemo {
        contract: Signer::from(contract),
        msg: msg.to_string().into_bytes(),
    }))
}

/// The memo of an outbound packet once its `ibc_callback` key is removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrippedCallback {
    /// The memo to send; empty when nothing but the callback was present.
    pub memo: String,
    /// The raw callback value, which may not be a valid address.
    pub callback: Value,
}

/// Removes the `ibc_callback` key from an outbound memo.
///
/// Returns `Ok(None)` when the memo does not register a callback.
pub fn strip_callback(memo: &str) -> Result<Option<StrippedCallback>, serde_json::Error> {
    let Some(mut metadata) = json_object_with_key(memo, IBC_CALLBACK_KEY) else {
        return Ok(None);
    };
    let callback = metadata.remove(IBC_CALLBACK_KEY).unwrap_or(Value::Null);

    let memo = if metadata.is_empty() {
        String::new()
    } else {
        serde_json::to_string(&metadata)?
    };

    Ok(Some(StrippedCallback { memo, callback }))
}
