//! Parsing of the `gateway_ibc_token_bridge_payload` memo envelope.

use displaydoc::Display;
use ibc_middleware_types::memo::{json_object_with_key, GATEWAY_PAYLOAD_KEY};
use ibc_middleware_types::serializers::base64_bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ComposabilityError;

/// The gateway payload as it appears in the memo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayIbcTokenBridgePayload {
    /// A plain transfer to `recipient` on chain `chain`.
    GatewayTransfer {
        chain: u16,
        #[serde(with = "base64_bytes")]
        recipient: Vec<u8>,
        fee: String,
        nonce: u32,
    },
    /// A transfer handing `payload` to `contract` on chain `chain`.
    GatewayTransferWithPayload {
        chain: u16,
        #[serde(with = "base64_bytes")]
        contract: Vec<u8>,
        #[serde(with = "base64_bytes")]
        payload: Vec<u8>,
        nonce: u32,
    },
}

/// A validated gateway payload, flattened over both transfer shapes.
///
/// For payload-carrying transfers `recipient` holds the target contract and
/// `fee` is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedGatewayPayload {
    pub chain_id: u16,
    pub recipient: Vec<u8>,
    pub fee: String,
    pub nonce: u32,
    pub payload: Option<Vec<u8>>,
}

impl ParsedGatewayPayload {
    pub fn no_payload(&self) -> bool {
        self.payload.is_none()
    }
}

impl TryFrom<GatewayIbcTokenBridgePayload> for ParsedGatewayPayload {
    type Error = GatewayPayloadError;

    fn try_from(raw: GatewayIbcTokenBridgePayload) -> Result<Self, Self::Error> {
        match raw {
            GatewayIbcTokenBridgePayload::GatewayTransfer {
                chain,
                recipient,
                fee,
                nonce,
            } => {
                if recipient.is_empty() {
                    return Err(GatewayPayloadError::EmptyRecipient);
                }
                Ok(Self {
                    chain_id: chain,
                    recipient,
                    fee,
                    nonce,
                    payload: None,
                })
            }
            GatewayIbcTokenBridgePayload::GatewayTransferWithPayload {
                chain,
                contract,
                payload,
                nonce,
            } => {
                if contract.is_empty() {
                    return Err(GatewayPayloadError::EmptyContract);
                }
                Ok(Self {
                    chain_id: chain,
                    recipient: contract,
                    fee: String::new(),
                    nonce,
                    payload: Some(payload),
                })
            }
        }
    }
}

/// Reasons a gateway payload cannot be translated.
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum GatewayPayloadError {
    /// gateway payload is not a JSON object
    NotAnObject,
    /// cannot decode gateway payload: `{reason}`
    Malformed { reason: String },
    /// gateway transfer has an empty recipient
    EmptyRecipient,
    /// gateway transfer has an empty contract
    EmptyContract,
    /// recipient is not valid UTF-8
    RecipientNotUtf8,
    /// payload is neither JSON nor UTF-8 text
    PayloadNotUtf8,
    /// cannot encode the translated memo: `{reason}`
    Encode { reason: String },
}

impl From<&GatewayPayloadError> for ComposabilityError {
    fn from(err: &GatewayPayloadError) -> Self {
        match err {
            GatewayPayloadError::Encode { .. } => ComposabilityError::Marshal,
            _ => ComposabilityError::InvalidPayload,
        }
    }
}

/// Describes an invalid payload in the form reported in error events.
pub fn describe_payload_error(memo: &str, err: &GatewayPayloadError) -> String {
    format!("gateway payload not properly formatted for: '{memo}'. {err}")
}

/// Extracts the gateway payload of a memo.
///
/// Returns `Ok(None)` when the memo carries no gateway payload, in which
/// case the packet passes through untouched.
pub fn verify_and_parse_gateway_payload(
    memo: &str,
) -> Result<Option<ParsedGatewayPayload>, GatewayPayloadError> {
    let Some(mut metadata) = json_object_with_key(memo, GATEWAY_PAYLOAD_KEY) else {
        return Ok(None);
    };

    let raw = match metadata.remove(GATEWAY_PAYLOAD_KEY) {
        Some(raw @ Value::Object(_)) => raw,
        _ => return Err(GatewayPayloadError::NotAnObject),
    };

    let payload: GatewayIbcTokenBridgePayload =
        serde_json::from_value(raw).map_err(|e| GatewayPayloadError::Malformed {
            reason: e.to_string(),
        })?;

    ParsedGatewayPayload::try_from(payload).map(Some)
}
