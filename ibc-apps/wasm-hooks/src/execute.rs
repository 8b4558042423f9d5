//! Contract execution requested by a wasm-routed transfer.

use ibc_middleware_core::context::ContractKeeper;
use ibc_middleware_types::contract::{Coin, ContractResponse};
use ibc_middleware_types::transfer::Amount;
use ibc_middleware_types::Signer;
use tracing::info;

use crate::error::HooksError;
use crate::sender::validate_address;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecuteContractMsg {
    pub sender: Signer,
    pub contract: Signer,
    pub msg: Vec<u8>,
    pub funds: Vec<Coin>,
}

impl ExecuteContractMsg {
    /// Stateless checks run before handing the message to the engine.
    pub fn validate_basic(&self, bech32_prefix: &str) -> Result<(), HooksError> {
        let bad = |reason: String| HooksError::BadExecutionMsg { reason };

        validate_address(self.sender.as_ref(), bech32_prefix)
            .map_err(|e| bad(format!("sender: {e}")))?;
        validate_address(self.contract.as_ref(), bech32_prefix)
            .map_err(|e| bad(format!("contract: {e}")))?;

        match serde_json::from_slice::<serde_json::Value>(&self.msg) {
            Ok(serde_json::Value::Object(_)) => {}
            _ => return Err(bad("msg: invalid".to_string())),
        }

        for coin in &self.funds {
            validate_denom(&coin.denom).map_err(|e| bad(format!("funds: {e}")))?;
            if coin.amount == Amount::from(0u64) {
                return Err(bad(format!("funds: {} amount is not positive", coin.denom)));
            }
        }
        Ok(())
    }
}

/// Validates and runs an execution against the contract engine. The error
/// describes what went wrong, for use as an error context.
pub fn execute_contract<Ctx>(
    ctx: &mut Ctx,
    msg: &ExecuteContractMsg,
    bech32_prefix: &str,
) -> Result<ContractResponse, String>
where
    Ctx: ContractKeeper,
{
    msg.validate_basic(bech32_prefix)
        .map_err(|e| e.to_string())?;

    info!(contract = %msg.contract, sender = %msg.sender, "executing contract for routed transfer");

    ctx.execute_contract(&msg.contract, &msg.sender, &msg.msg, &msg.funds)
        .map_err(|e| e.to_string())
}

/// A denom starts with a letter, followed by 2 to 127 letters, digits or any
/// of `/:._-`.
fn validate_denom(denom: &str) -> Result<(), String> {
    let mut chars = denom.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    if starts_with_letter && rest_valid && (3..=128).contains(&denom.len()) {
        Ok(())
    } else {
        Err(format!("invalid denom: {denom}"))
    }
}
