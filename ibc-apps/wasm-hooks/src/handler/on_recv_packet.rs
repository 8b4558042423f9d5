use core::str::FromStr;

use ibc_middleware_core::context::{ContractKeeper, MiddlewareContext};
use ibc_middleware_core::hooks::RecvPacketArgs;
use ibc_middleware_core::module::IbcModule;
use ibc_middleware_types::acknowledgement::Acknowledgement;
use ibc_middleware_types::contract::Coin;
use ibc_middleware_types::transfer::{Amount, FungibleTokenPacketData};
use tracing::{debug, info};

use crate::ack::{contract_acknowledgement, emit_error_acknowledgement};
use crate::config::WasmHooksConfig;
use crate::denom::local_denom_on_recv;
use crate::error::HooksError;
use crate::execute::{execute_contract, ExecuteContractMsg};
use crate::memo::{describe_memo_error, validate_and_parse_memo};
use crate::sender::derive_intermediate_sender;

/// Routes a received transfer carrying a `wasm` memo into a contract call.
///
/// The funds are first credited to the intermediate account of the
/// (destination channel, sender) pair by the wrapped application. Only when
/// that succeeds is the contract executed, with the intermediate account as
/// sender and the received tokens as funds. Failures past that point leave
/// the funds on the intermediate account.
pub fn on_recv_packet<Ctx>(
    config: &WasmHooksConfig,
    app: &mut dyn IbcModule<Ctx>,
    ctx: &mut Ctx,
    args: RecvPacketArgs<'_>,
) -> Option<Acknowledgement>
where
    Ctx: MiddlewareContext + ContractKeeper,
{
    let packet = args.packet;

    let Some(mut data) = FungibleTokenPacketData::decode(&packet.data) else {
        debug!(%packet, "not an ICS-20 packet, passing through");
        return args.delegate(app, ctx);
    };

    let memo = match validate_and_parse_memo(&data.memo, &data.receiver, &config.bech32_prefix) {
        Ok(Some(memo)) => memo,
        Ok(None) => {
            debug!(%packet, "packet is not wasm routed, passing through");
            return args.delegate(app, ctx);
        }
        Err(e) => {
            let context = describe_memo_error(&data.memo, &e);
            return Some(emit_error_acknowledgement(
                ctx,
                HooksError::MemoValidation,
                &[context],
            ));
        }
    };

    let channel = &packet.chan_id_on_b;
    let intermediate_sender =
        match derive_intermediate_sender(channel, &data.sender, &config.bech32_prefix) {
            Ok(sender) => sender,
            Err(e) => {
                let context = format!(
                    "cannot convert sender address {channel}/{} to bech32: {e}",
                    data.sender
                );
                return Some(emit_error_acknowledgement(
                    ctx,
                    HooksError::BadSender,
                    &[context],
                ));
            }
        };

    // Credit the funds to the intermediate account instead of the contract.
    data.receiver = intermediate_sender.to_string();
    let rewritten = match data.encode() {
        Ok(bytes) => packet.with_data(bytes),
        Err(e) => {
            return Some(emit_error_acknowledgement(
                ctx,
                HooksError::Marshal,
                &[e.to_string()],
            ))
        }
    };

    let Some(ack) = app.on_recv_packet(ctx, &rewritten, args.relayer) else {
        return Some(emit_error_acknowledgement(
            ctx,
            HooksError::InvalidPacket,
            &["asynchronous acknowledgement is not supported for wasm routed packets".to_string()],
        ));
    };
    if !ack.is_successful() {
        return Some(ack);
    }

    let Ok(amount) = Amount::from_str(&data.amount) else {
        return Some(emit_error_acknowledgement(
            ctx,
            HooksError::InvalidPacket,
            &["Amount is not an int".to_string()],
        ));
    };

    let denom = match local_denom_on_recv(packet, &data.denom) {
        Ok(denom) => denom,
        Err(e) => {
            return Some(emit_error_acknowledgement(
                ctx,
                HooksError::InvalidPacket,
                &[e],
            ))
        }
    };

    let msg = ExecuteContractMsg {
        sender: intermediate_sender,
        contract: memo.contract,
        msg: memo.msg,
        funds: vec![Coin::new(denom, amount)],
    };
    let response = match execute_contract(ctx, &msg, &config.bech32_prefix) {
        Ok(response) => response,
        Err(e) => {
            return Some(emit_error_acknowledgement(
                ctx,
                HooksError::WasmExecution,
                &[e],
            ))
        }
    };

    info!(%packet, contract = %msg.contract, "wasm routed packet executed");

    match contract_acknowledgement(response.data, &ack) {
        Ok(ack) => Some(ack),
        Err(e) => Some(emit_error_acknowledgement(ctx, e, &[])),
    }
}
