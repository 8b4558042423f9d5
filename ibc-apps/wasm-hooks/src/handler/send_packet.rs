use ibc_middleware_core::context::MiddlewareContext;
use ibc_middleware_core::hooks::SendPacketArgs;
use ibc_middleware_core::ics4::Ics4Wrapper;
use ibc_middleware_core::store::PacketCallbackKeeper;
use ibc_middleware_types::error::MiddlewareError;
use ibc_middleware_types::identifiers::Sequence;
use ibc_middleware_types::transfer::FungibleTokenPacketData;
use ibc_middleware_types::Signer;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::WasmHooksConfig;
use crate::error::HooksError;
use crate::memo::strip_callback;
use crate::sender::validate_address;

/// Strips the `ibc_callback` key from an outbound transfer memo, sends the
/// packet, and registers the callback contract for the packet's sequence.
///
/// The memo collapses to empty when the callback was its only key, so that
/// receivers unaware of memos still accept the packet. A callback value that
/// is not a valid address is dropped silently after the send.
pub fn send_packet<Ctx>(
    config: &WasmHooksConfig,
    next: &mut dyn Ics4Wrapper<Ctx>,
    ctx: &mut Ctx,
    args: SendPacketArgs<'_>,
) -> Result<Sequence, MiddlewareError>
where
    Ctx: MiddlewareContext,
{
    let packet = args.packet;

    let Some(mut data) = FungibleTokenPacketData::decode(&packet.data) else {
        return args.delegate(next, ctx);
    };

    let stripped = strip_callback(&data.memo).map_err(|e| HooksError::SendCallback {
        reason: e.to_string(),
    })?;
    let Some(stripped) = stripped else {
        debug!(%packet, "no callback registered, passing through");
        return args.delegate(next, ctx);
    };

    data.memo = stripped.memo;
    let bytes = data.encode().map_err(|e| HooksError::SendCallback {
        reason: e.to_string(),
    })?;

    let sequence = next.send_packet(ctx, args.capability, &packet.with_data(bytes))?;

    let Value::String(contract) = stripped.callback else {
        warn!(%packet, "ignoring callback that is not a string");
        return Ok(sequence);
    };
    if let Err(e) = validate_address(&contract, &config.bech32_prefix) {
        warn!(%packet, %contract, error = %e, "ignoring callback that is not a valid address");
        return Ok(sequence);
    }

    info!(channel = %packet.chan_id_on_a, %sequence, %contract, "registered packet callback");
    ctx.store_packet_callback(&packet.chan_id_on_a, sequence, &Signer::from(contract));

    Ok(sequence)
}
