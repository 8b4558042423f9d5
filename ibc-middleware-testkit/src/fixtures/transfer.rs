use ibc_middleware_types::transfer::FungibleTokenPacketData;
use ibc_middleware_types::Signer;
use serde_json::{json, Value};
use typed_builder::TypedBuilder;

use super::signer::{dummy_account, dummy_remote_account};

/// Configuration of ICS-20 packet data for building dummy transfers.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = FungibleTokenPacketData))]
pub struct TransferDataConfig {
    #[builder(default = "uatom".to_string(), setter(into))]
    pub denom: String,
    #[builder(default = "100".to_string(), setter(into))]
    pub amount: String,
    #[builder(default = dummy_remote_account().to_string(), setter(into))]
    pub sender: String,
    #[builder(default = dummy_account(9).to_string(), setter(into))]
    pub receiver: String,
    #[builder(default, setter(into))]
    pub memo: String,
}

impl From<TransferDataConfig> for FungibleTokenPacketData {
    fn from(config: TransferDataConfig) -> Self {
        FungibleTokenPacketData {
            denom: config.denom,
            amount: config.amount,
            sender: config.sender,
            receiver: config.receiver,
            memo: config.memo,
        }
    }
}

/// Encodes ICS-20 packet data the way a counterparty chain would.
pub fn encode_transfer_data(data: &FungibleTokenPacketData) -> Vec<u8> {
    data.encode()
        .expect("FungibleTokenPacketData's infallible Serialize impl failed")
}

/// Returns the memo routing a transfer into `contract` with `msg`.
pub fn dummy_wasm_memo(contract: &Signer, msg: Value) -> String {
    json!({ "wasm": { "contract": contract.to_string(), "msg": msg } }).to_string()
}
