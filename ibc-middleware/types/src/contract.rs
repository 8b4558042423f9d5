//! Types exchanged with the contract execution engine.

use serde::{Deserialize, Serialize};

use crate::identifiers::{ChannelId, Sequence};
use crate::serializers::base64_bytes;
use crate::transfer::Amount;

/// Funds attached to a contract execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: Amount) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

/// What a contract returned from an execution or privileged call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractResponse {
    pub data: Option<Vec<u8>>,
}

impl ContractResponse {
    pub fn new(data: Option<Vec<u8>>) -> Self {
        Self { data }
    }
}

/// The privileged message delivered to a callback contract once one of its
/// outbound packets has been settled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SudoMsg {
    #[serde(rename = "ibc_lifecycle_complete")]
    IbcLifecycleComplete(IbcLifecycleComplete),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IbcLifecycleComplete {
    #[serde(rename = "ibc_ack")]
    IbcAck {
        channel: String,
        sequence: u64,
        #[serde(with = "base64_bytes")]
        ack: Vec<u8>,
        success: bool,
    },
    #[serde(rename = "ibc_timeout")]
    IbcTimeout { channel: String, sequence: u64 },
}

impl SudoMsg {
    pub fn ack(channel: &ChannelId, sequence: Sequence, ack: Vec<u8>, success: bool) -> Self {
        Self::IbcLifecycleComplete(IbcLifecycleComplete::IbcAck {
            channel: channel.to_string(),
            sequence: sequence.value(),
            ack,
            success,
        })
    }

    pub fn timeout(channel: &ChannelId, sequence: Sequence) -> Self {
        Self::IbcLifecycleComplete(IbcLifecycleComplete::IbcTimeout {
            channel: channel.to_string(),
            sequence: sequence.value(),
        })
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
