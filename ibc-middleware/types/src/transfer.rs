//! ICS-20 fungible token packet data as it travels on the wire, plus the
//! denomination tracing helpers of `ibc-app-transfer-types`.

use serde::{Deserialize, Serialize};

pub use ibc_app_transfer_types::{is_receiver_chain_source, Amount, PrefixedDenom, TracePrefix};

/// The port identifier that ICS-20 applications typically bind with.
pub const PORT_ID_STR: &str = "transfer";

/// ICS-20 application version.
pub const VERSION: &str = "ics20-1";

/// The JSON packet data of a fungible token transfer.
///
/// Fields are kept as raw strings so that a packet can be decoded, have its
/// memo or receiver rewritten and be encoded again without normalizing any
/// other field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleTokenPacketData {
    pub denom: String,
    pub amount: String,
    pub sender: String,
    pub receiver: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
}

impl FungibleTokenPacketData {
    /// Decodes packet bytes; `None` when they are not ICS-20 packet data.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_transfer_packets_only() {
        let raw = br#"{"denom":"uworm","amount":"100","sender":"a","receiver":"b","memo":"{}"}"#;
        let data = FungibleTokenPacketData::decode(raw).unwrap();
        assert_eq!(data.memo, "{}");
        assert_eq!(data.amount, "100");

        let no_memo = br#"{"denom":"uworm","amount":"1","sender":"a","receiver":"b"}"#;
        assert_eq!(FungibleTokenPacketData::decode(no_memo).unwrap().memo, "");

        assert!(FungibleTokenPacketData::decode(b"\x01\x02").is_none());
        assert!(FungibleTokenPacketData::decode(br#"{"denom":"uworm"}"#).is_none());
    }

    #[test]
    fn empty_memo_is_omitted() {
        let data = FungibleTokenPacketData {
            denom: "uworm".to_string(),
            amount: "5".to_string(),
            sender: "a".to_string(),
            receiver: "b".to_string(),
            memo: String::new(),
        };
        assert_eq!(
            data.encode().unwrap(),
            br#"{"denom":"uworm","amount":"5","sender":"a","receiver":"b"}"#.to_vec()
        );
    }
}
