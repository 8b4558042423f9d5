//! Builds the memos handed to the layers below for a parsed gateway payload.

use ibc_middleware_types::identifiers::ChannelId;
use ibc_middleware_types::serializers::base64_bytes;
use ibc_middleware_types::transfer::PORT_ID_STR;
use ibc_middleware_types::Signer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::params::ComposabilityParams;
use crate::payload::{GatewayPayloadError, ParsedGatewayPayload};

#[derive(Serialize)]
struct ForwardMemo {
    forward: ForwardMetadata,
}

/// The instruction read by the packet forward middleware.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForwardMetadata {
    pub receiver: String,
    pub port: String,
    pub channel: String,
    pub timeout: u64,
    pub retries: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Value>,
}

/// The message executed on the routing contract when no channel serves the
/// target chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayConvertMsg {
    GatewayConvertAndTransfer {
        #[serde(with = "base64_bytes")]
        recipient: Vec<u8>,
        chain: u16,
        fee: String,
        nonce: u32,
    },
    GatewayConvertAndTransferWithPayload {
        #[serde(with = "base64_bytes")]
        contract: Vec<u8>,
        chain: u16,
        #[serde(with = "base64_bytes")]
        payload: Vec<u8>,
        nonce: u32,
    },
}

impl From<&ParsedGatewayPayload> for GatewayConvertMsg {
    fn from(parsed: &ParsedGatewayPayload) -> Self {
        match &parsed.payload {
            None => Self::GatewayConvertAndTransfer {
                recipient: parsed.recipient.clone(),
                chain: parsed.chain_id,
                fee: parsed.fee.clone(),
                nonce: parsed.nonce,
            },
            Some(payload) => Self::GatewayConvertAndTransferWithPayload {
                contract: parsed.recipient.clone(),
                chain: parsed.chain_id,
                payload: payload.clone(),
                nonce: parsed.nonce,
            },
        }
    }
}

impl From<GatewayConvertMsg> for ParsedGatewayPayload {
    fn from(msg: GatewayConvertMsg) -> Self {
        match msg {
            GatewayConvertMsg::GatewayConvertAndTransfer {
                recipient,
                chain,
                fee,
                nonce,
            } => Self {
                chain_id: chain,
                recipient,
                fee,
                nonce,
                payload: None,
            },
            GatewayConvertMsg::GatewayConvertAndTransferWithPayload {
                contract,
                chain,
                payload,
                nonce,
            } => Self {
                chain_id: chain,
                recipient: contract,
                fee: String::new(),
                nonce,
                payload: Some(payload),
            },
        }
    }
}

#[derive(Serialize)]
struct WasmMemo<'a> {
    wasm: WasmCall<'a>,
}

#[derive(Serialize)]
struct WasmCall<'a> {
    contract: &'a str,
    msg: GatewayConvertMsg,
}

fn encode<T: Serialize>(memo: &T) -> Result<String, GatewayPayloadError> {
    serde_json::to_string(memo).map_err(|e| GatewayPayloadError::Encode {
        reason: e.to_string(),
    })
}

/// Builds the `forward` memo sending the funds on over `channel`.
///
/// The recipient bytes are the receiver on the next chain. A payload is
/// passed on as `next`: as JSON when it parses as JSON, otherwise as text.
pub fn format_pfm_memo(
    parsed: &ParsedGatewayPayload,
    channel: &ChannelId,
    params: &ComposabilityParams,
) -> Result<String, GatewayPayloadError> {
    let receiver = String::from_utf8(parsed.recipient.clone())
        .map_err(|_| GatewayPayloadError::RecipientNotUtf8)?;

    let next = match &parsed.payload {
        None => None,
        Some(payload) => Some(match serde_json::from_slice::<Value>(payload) {
            Ok(json) => json,
            Err(_) => Value::String(
                String::from_utf8(payload.clone())
                    .map_err(|_| GatewayPayloadError::PayloadNotUtf8)?,
            ),
        }),
    };

    encode(&ForwardMemo {
        forward: ForwardMetadata {
            receiver,
            port: PORT_ID_STR.to_string(),
            channel: channel.to_string(),
            timeout: params.forward_timeout_ns,
            retries: params.forward_retries,
            next,
        },
    })
}

/// Builds the `wasm` memo asking the routing contract to convert and bridge
/// the funds itself.
pub fn format_ibc_hooks_memo(
    parsed: &ParsedGatewayPayload,
    contract: &Signer,
) -> Result<String, GatewayPayloadError> {
    encode(&WasmMemo {
        wasm: WasmCall {
            contract: contract.as_ref(),
            msg: parsed.into(),
        },
    })
}

#[cfg(test)]
mod tests {
    use ibc_middleware_testkit::fixtures::dummy_account;
    use serde_json::json;

    use super::*;
    use crate::payload::verify_and_parse_gateway_payload;

    fn plain() -> ParsedGatewayPayload {
        ParsedGatewayPayload {
            chain_id: 1,
            recipient: b"recipient".to_vec(),
            fee: "0uworm".to_string(),
            nonce: 1,
            payload: None,
        }
    }

    fn with_payload(payload: &[u8]) -> ParsedGatewayPayload {
        ParsedGatewayPayload {
            chain_id: 20,
            recipient: b"osmo1contract".to_vec(),
            fee: String::new(),
            nonce: 7,
            payload: Some(payload.to_vec()),
        }
    }

    #[test]
    fn pfm_memo_for_plain_transfer() {
        let memo = format_pfm_memo(&plain(), &ChannelId::new(7), &ComposabilityParams::default())
            .unwrap();

        assert_eq!(
            memo,
            r#"{"forward":{"receiver":"recipient","port":"transfer","channel":"channel-7","timeout":3600000000000,"retries":0}}"#
        );
    }

    #[test]
    fn pfm_memo_passes_json_payload_as_next() {
        let params = ComposabilityParams {
            forward_timeout_ns: 60,
            forward_retries: 2,
        };
        let memo = format_pfm_memo(
            &with_payload(br#"{"wasm":{"contract":"osmo1c","msg":{}}}"#),
            &ChannelId::new(3),
            &params,
        )
        .unwrap();

        assert_eq!(
            memo,
            r#"{"forward":{"receiver":"osmo1contract","port":"transfer","channel":"channel-3","timeout":60,"retries":2,"next":{"wasm":{"contract":"osmo1c","msg":{}}}}}"#
        );
    }

    #[test]
    fn pfm_memo_passes_text_payload_as_string() {
        let memo = format_pfm_memo(
            &with_payload(b"hello"),
            &ChannelId::new(3),
            &ComposabilityParams::default(),
        )
        .unwrap();

        let value: Value = serde_json::from_str(&memo).unwrap();
        assert_eq!(value["forward"]["next"], json!("hello"));
    }

    #[test]
    fn pfm_memo_rejects_binary_recipient() {
        let mut parsed = plain();
        parsed.recipient = vec![0xff, 0xfe];

        let result = format_pfm_memo(&parsed, &ChannelId::new(7), &ComposabilityParams::default());

        assert_eq!(result, Err(GatewayPayloadError::RecipientNotUtf8));
    }

    #[test]
    fn hooks_memo_for_plain_transfer() {
        let contract = dummy_account(1);

        let memo = format_ibc_hooks_memo(&plain(), &contract).unwrap();

        assert_eq!(
            memo,
            format!(
                r#"{{"wasm":{{"contract":"{contract}","msg":{{"gateway_convert_and_transfer":{{"recipient":"cmVjaXBpZW50","chain":1,"fee":"0uworm","nonce":1}}}}}}}}"#
            )
        );
    }

    #[test]
    fn hooks_memo_for_transfer_with_payload() {
        let contract = dummy_account(1);

        let memo = format_ibc_hooks_memo(&with_payload(br#"{"a":1}"#), &contract).unwrap();

        let value: Value = serde_json::from_str(&memo).unwrap();
        assert_eq!(
            value["wasm"]["msg"],
            json!({
                "gateway_convert_and_transfer_with_payload": {
                    "contract": "b3NtbzFjb250cmFjdA==",
                    "chain": 20,
                    "payload": "eyJhIjoxfQ==",
                    "nonce": 7,
                }
            })
        );
    }

    #[test]
    fn hooks_memo_round_trips_to_the_parsed_payload() {
        let contract = dummy_account(1);
        for memo in [
            r#"{"gateway_ibc_token_bridge_payload":{"gateway_transfer":{"chain":1,"recipient":"cmVjaXBpZW50","fee":"0uworm","nonce":1}}}"#,
            r#"{"gateway_ibc_token_bridge_payload":{"gateway_transfer_with_payload":{"chain":20,"contract":"Y29udHJhY3Q=","payload":"eyJhIjoxfQ==","nonce":7}}}"#,
        ] {
            let parsed = verify_and_parse_gateway_payload(memo).unwrap().unwrap();

            let hooks_memo = format_ibc_hooks_memo(&parsed, &contract).unwrap();
            let value: Value = serde_json::from_str(&hooks_memo).unwrap();
            assert_eq!(value["wasm"]["contract"], json!(contract.to_string()));
            let msg: GatewayConvertMsg =
                serde_json::from_value(value["wasm"]["msg"].clone()).unwrap();

            assert_eq!(ParsedGatewayPayload::from(msg), parsed);
        }
    }
}
