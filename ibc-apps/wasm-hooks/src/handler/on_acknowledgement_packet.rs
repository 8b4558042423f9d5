use ibc_middleware_core::context::{ContractKeeper, MiddlewareContext};
use ibc_middleware_core::hooks::AckPacketArgs;
use ibc_middleware_core::module::IbcModule;
use ibc_middleware_core::store::PacketCallbackKeeper;
use ibc_middleware_types::acknowledgement::is_json_ack_error;
use ibc_middleware_types::contract::SudoMsg;
use ibc_middleware_types::error::MiddlewareError;
use tracing::info;

use crate::config::WasmHooksConfig;
use crate::error::HooksError;
use crate::sender::validate_address;

/// Delegates the acknowledgement and then notifies the callback contract of
/// the packet, if one was registered.
///
/// A failing notification fails the whole acknowledgement, so the callback
/// record stays in place and the transaction is rolled back.
pub fn on_acknowledgement_packet<Ctx>(
    config: &WasmHooksConfig,
    app: &mut dyn IbcModule<Ctx>,
    ctx: &mut Ctx,
    args: AckPacketArgs<'_>,
) -> Result<(), MiddlewareError>
where
    Ctx: MiddlewareContext + ContractKeeper,
{
    args.delegate(&mut *app, &mut *ctx)?;

    let packet = args.packet;
    let Some(contract) = ctx.get_packet_callback(&packet.chan_id_on_a, packet.seq_on_a) else {
        return Ok(());
    };

    validate_address(contract.as_ref(), &config.bech32_prefix)
        .map_err(|reason| HooksError::AckCallback { reason })?;

    let ack = args.acknowledgement.as_bytes();
    let success = !is_json_ack_error(ack);
    let msg = SudoMsg::ack(&packet.chan_id_on_a, packet.seq_on_a, ack.to_vec(), success)
        .to_json_bytes()
        .map_err(|e| HooksError::AckCallback {
            reason: e.to_string(),
        })?;

    ctx.sudo_contract(&contract, &msg)
        .map_err(|e| HooksError::AckCallback {
            reason: e.to_string(),
        })?;

    info!(%packet, %contract, success, "notified callback contract of acknowledgement");
    ctx.delete_packet_callback(&packet.chan_id_on_a, packet.seq_on_a);

    Ok(())
}
