use ibc_middleware_core::ack::emit_error_acknowledgement;
use ibc_middleware_core::context::{ComposabilityContext, ContractKeeper, MiddlewareContext};
use ibc_middleware_core::hooks::RecvPacketArgs;
use ibc_middleware_core::module::IbcModule;
use ibc_middleware_core::store::TransposedDataKeeper;
use ibc_middleware_types::acknowledgement::Acknowledgement;
use ibc_middleware_types::events::ComposabilityEvent;
use ibc_middleware_types::transfer::FungibleTokenPacketData;
use tracing::{debug, info, warn};

use crate::error::ComposabilityError;
use crate::format::{format_ibc_hooks_memo, format_pfm_memo};
use crate::params::ComposabilityParams;
use crate::payload::{describe_payload_error, verify_and_parse_gateway_payload};
use crate::routing::query_routing_channel;

/// How a gateway transfer leaves this chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutingStrategy {
    /// Forwarded over a local channel by the packet forward middleware.
    Forward,
    /// Handed to the routing contract through a `wasm` memo.
    IbcHooks,
}

impl RoutingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::IbcHooks => "ibc_hooks",
        }
    }
}

/// Rewrites the memo of a received gateway transfer and passes the packet on.
///
/// On the forward strategy the original packet data is stored as transposed
/// data until the acknowledgement is written. If the layers below answer
/// synchronously instead, no acknowledgement will be written through this
/// layer and the record is dropped again.
pub fn on_recv_packet<Ctx>(
    params: &ComposabilityParams,
    app: &mut dyn IbcModule<Ctx>,
    ctx: &mut Ctx,
    args: RecvPacketArgs<'_>,
) -> Option<Acknowledgement>
where
    Ctx: MiddlewareContext + ContractKeeper + ComposabilityContext,
{
    let packet = args.packet;

    let Some(mut data) = FungibleTokenPacketData::decode(&packet.data) else {
        debug!(%packet, "not an ICS-20 packet, passing through");
        return args.delegate(app, ctx);
    };

    let parsed = match verify_and_parse_gateway_payload(&data.memo) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            debug!(%packet, "no gateway payload, passing through");
            return args.delegate(app, ctx);
        }
        Err(e) => {
            let context = describe_payload_error(&data.memo, &e);
            return Some(emit_error_acknowledgement(
                ctx,
                ComposabilityError::from(&e),
                &[context],
            ));
        }
    };

    let Some(routing_contract) = ctx.routing_contract() else {
        return Some(emit_error_acknowledgement(
            ctx,
            ComposabilityError::MissingRoutingContract,
            &[],
        ));
    };

    let (strategy, memo) = match query_routing_channel(ctx, &routing_contract, parsed.chain_id) {
        Ok(channel) => (
            RoutingStrategy::Forward,
            format_pfm_memo(&parsed, &channel, params),
        ),
        Err(e) => {
            warn!(%packet, chain_id = parsed.chain_id, error = %e, "no channel for chain, routing through contract");
            (
                RoutingStrategy::IbcHooks,
                format_ibc_hooks_memo(&parsed, &routing_contract),
            )
        }
    };
    let memo = match memo {
        Ok(memo) => memo,
        Err(e) => {
            let context = describe_payload_error(&data.memo, &e);
            return Some(emit_error_acknowledgement(
                ctx,
                ComposabilityError::from(&e),
                &[context],
            ));
        }
    };

    data.memo = memo;
    let rewritten = match data.encode() {
        Ok(bytes) => packet.with_data(bytes),
        Err(e) => {
            return Some(emit_error_acknowledgement(
                ctx,
                ComposabilityError::Marshal,
                &[e.to_string()],
            ))
        }
    };

    let (channel, port, sequence) = (&packet.chan_id_on_b, &packet.port_id_on_b, packet.seq_on_a);
    if strategy == RoutingStrategy::Forward {
        ctx.set_transposed_data(channel, port, sequence, packet.data.clone());
    }

    info!(%packet, strategy = strategy.as_str(), memo = %data.memo, "translated gateway payload");
    ctx.emit_module_event(
        ComposabilityEvent {
            strategy: strategy.as_str().to_string(),
            channel: channel.to_string(),
            sequence: sequence.value(),
        }
        .into(),
    );

    let ack = app.on_recv_packet(ctx, &rewritten, args.relayer);

    if ack.is_some() && strategy == RoutingStrategy::Forward {
        ctx.get_and_clear_transposed_data(channel, port, sequence);
    }

    ack
}
