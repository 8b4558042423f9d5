use ibc_middleware_core::context::{ContractKeeper, MiddlewareContext};
use ibc_middleware_core::hooks::TimeoutPacketArgs;
use ibc_middleware_core::module::IbcModule;
use ibc_middleware_core::store::PacketCallbackKeeper;
use ibc_middleware_types::contract::SudoMsg;
use ibc_middleware_types::error::MiddlewareError;
use ibc_middleware_types::events::TimeoutCallbackErrorEvent;
use tracing::{info, warn};

use crate::config::WasmHooksConfig;
use crate::error::HooksError;
use crate::sender::validate_address;

/// Delegates the timeout and then notifies the callback contract of the
/// packet, if one was registered.
///
/// Unlike acknowledgements, a failing notification only emits an event: the
/// packet can no longer be answered, so the callback is removed either way.
pub fn on_timeout_packet<Ctx>(
    config: &WasmHooksConfig,
    app: &mut dyn IbcModule<Ctx>,
    ctx: &mut Ctx,
    args: TimeoutPacketArgs<'_>,
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
        .map_err(|reason| HooksError::TimeoutCallback { reason })?;

    let msg = SudoMsg::timeout(&packet.chan_id_on_a, packet.seq_on_a)
        .to_json_bytes()
        .map_err(|e| HooksError::TimeoutCallback {
            reason: e.to_string(),
        })?;

    match ctx.sudo_contract(&contract, &msg) {
        Ok(_) => info!(%packet, %contract, "notified callback contract of timeout"),
        Err(e) => {
            warn!(%packet, %contract, error = %e, "timeout callback failed");
            ctx.emit_module_event(
                TimeoutCallbackErrorEvent {
                    contract: contract.to_string(),
                    message: String::from_utf8_lossy(&msg).into_owned(),
                    error: e.to_string(),
                }
                .into(),
            );
        }
    }
    ctx.delete_packet_callback(&packet.chan_id_on_a, packet.seq_on_a);

    Ok(())
}
