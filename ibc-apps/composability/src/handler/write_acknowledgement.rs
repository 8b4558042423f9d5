use ibc_middleware_core::context::MiddlewareContext;
use ibc_middleware_core::hooks::WriteAckArgs;
use ibc_middleware_core::ics4::Ics4Wrapper;
use ibc_middleware_core::store::TransposedDataKeeper;
use ibc_middleware_types::error::MiddlewareError;
use tracing::info;

/// Writes an asynchronous acknowledgement against the packet data the
/// sender originally sent, if this layer rewrote it on receipt.
pub fn write_acknowledgement<Ctx>(
    next: &mut dyn Ics4Wrapper<Ctx>,
    ctx: &mut Ctx,
    args: WriteAckArgs<'_>,
) -> Result<(), MiddlewareError>
where
    Ctx: MiddlewareContext,
{
    let packet = args.packet;

    let Some(original) =
        ctx.get_and_clear_transposed_data(&packet.chan_id_on_b, &packet.port_id_on_b, packet.seq_on_a)
    else {
        return args.delegate(next, ctx);
    };

    info!(%packet, "restoring original packet data for acknowledgement");
    next.write_acknowledgement(
        ctx,
        args.capability,
        &packet.with_data(original),
        args.acknowledgement,
    )
}
