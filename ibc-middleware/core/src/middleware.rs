//! The generic middleware wrapping an application.

use ibc_middleware_types::acknowledgement::Acknowledgement;
use ibc_middleware_types::capability::ChannelCapability;
use ibc_middleware_types::channel::{Counterparty, Order, Version};
use ibc_middleware_types::error::MiddlewareError;
use ibc_middleware_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_middleware_types::packet::Packet;
use ibc_middleware_types::Signer;

use crate::hooks::*;
use crate::module::IbcModule;

/// Resolves one hook slot against the wrapped layer.
macro_rules! dispatch {
    ($slot:expr, $inner:expr, $ctx:expr, $args:expr) => {{
        let args = $args;
        match $slot {
            HookSlot::Override(handler) => handler($inner, &mut *$ctx, args),
            HookSlot::Observe { before, after } => {
                if let Some(before) = before {
                    before(&mut *$ctx, &args);
                }
                let out = args.delegate($inner, &mut *$ctx);
                if let Some(after) = after {
                    after(&mut *$ctx, &args, &out);
                }
                out
            }
            HookSlot::Passthrough => args.delegate($inner, &mut *$ctx),
        }
    }};
}

pub(crate) use dispatch;

/// Wraps an application `A`, presenting itself to the layer above as an
/// application too. Which operations it intercepts is decided by the
/// [`ModuleHooks`] registry it was built with.
pub struct IbcMiddleware<A, Ctx> {
    app: A,
    hooks: ModuleHooks<Ctx>,
}

impl<A, Ctx> IbcMiddleware<A, Ctx>
where
    A: IbcModule<Ctx>,
{
    pub fn new(app: A, hooks: ModuleHooks<Ctx>) -> Self {
        Self { app, hooks }
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn hooks(&self) -> &ModuleHooks<Ctx> {
        &self.hooks
    }

    pub fn into_inner(self) -> A {
        self.app
    }
}

impl<A, Ctx> IbcModule<Ctx> for IbcMiddleware<A, Ctx>
where
    A: IbcModule<Ctx>,
{
    fn on_chan_open_init(
        &mut self,
        ctx: &mut Ctx,
        order: Order,
        connection_hops: &[ConnectionId],
        port_id: &PortId,
        channel_id: &ChannelId,
        capability: &ChannelCapability,
        counterparty: &Counterparty,
        version: &Version,
    ) -> Result<Version, MiddlewareError> {
        dispatch!(
            &self.hooks.chan_open_init,
            &mut self.app,
            ctx,
            ChanOpenInitArgs {
                order,
                connection_hops,
                port_id,
                channel_id,
                capability,
                counterparty,
                version,
            }
        )
    }

    fn on_chan_open_try(
        &mut self,
        ctx: &mut Ctx,
        order: Order,
        connection_hops: &[ConnectionId],
        port_id: &PortId,
        channel_id: &ChannelId,
        capability: &ChannelCapability,
        counterparty: &Counterparty,
        counterparty_version: &Version,
    ) -> Result<Version, MiddlewareError> {
        dispatch!(
            &self.hooks.chan_open_try,
            &mut self.app,
            ctx,
            ChanOpenTryArgs {
                order,
                connection_hops,
                port_id,
                channel_id,
                capability,
                counterparty,
                counterparty_version,
            }
        )
    }

    fn on_chan_open_ack(
        &mut self,
        ctx: &mut Ctx,
        port_id: &PortId,
        channel_id: &ChannelId,
        counterparty_channel_id: &ChannelId,
        counterparty_version: &Version,
    ) -> Result<(), MiddlewareError> {
        dispatch!(
            &self.hooks.chan_open_ack,
            &mut self.app,
            ctx,
            ChanOpenAckArgs {
                port_id,
                channel_id,
                counterparty_channel_id,
                counterparty_version,
            }
        )
    }

    fn on_chan_open_confirm(
        &mut self,
        ctx: &mut Ctx,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(), MiddlewareError> {
        dispatch!(
            &self.hooks.chan_open_confirm,
            &mut self.app,
            ctx,
            ChanOpenConfirmArgs {
                port_id,
                channel_id
            }
        )
    }

    fn on_chan_close_init(
        &mut self,
        ctx: &mut Ctx,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(), MiddlewareError> {
        dispatch!(
            &self.hooks.chan_close_init,
            &mut self.app,
            ctx,
            ChanCloseInitArgs {
                port_id,
                channel_id
            }
        )
    }

    fn on_chan_close_confirm(
        &mut self,
        ctx: &mut Ctx,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(), MiddlewareError> {
        dispatch!(
            &self.hooks.chan_close_confirm,
            &mut self.app,
            ctx,
            ChanCloseConfirmArgs {
                port_id,
                channel_id
            }
        )
    }

    fn on_recv_packet(
        &mut self,
        ctx: &mut Ctx,
        packet: &Packet,
        relayer: &Signer,
    ) -> Option<Acknowledgement> {
        dispatch!(
            &self.hooks.recv_packet,
            &mut self.app,
            ctx,
            RecvPacketArgs { packet, relayer }
        )
    }

    fn on_acknowledgement_packet(
        &mut self,
        ctx: &mut Ctx,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> Result<(), MiddlewareError> {
        dispatch!(
            &self.hooks.acknowledgement_packet,
            &mut self.app,
            ctx,
            AckPacketArgs {
                packet,
                acknowledgement,
                relayer,
            }
        )
    }

    fn on_timeout_packet(
        &mut self,
        ctx: &mut Ctx,
        packet: &Packet,
        relayer: &Signer,
    ) -> Result<(), MiddlewareError> {
        dispatch!(
            &self.hooks.timeout_packet,
            &mut self.app,
            ctx,
            TimeoutPacketArgs { packet, relayer }
        )
    }
}

#[cfg(test)]
mod tests {
    use ibc_middleware_types::identifiers::{PortId, Sequence};
    use ibc_middleware_types::packet::TimeoutHeight;

    use super::*;

    type Trace = Vec<String>;

    struct RecordingApp;

    impl IbcModule<Trace> for RecordingApp {
        fn on_chan_open_init(
            &mut self,
            ctx: &mut Trace,
            _order: Order,
            _connection_hops: &[ConnectionId],
            _port_id: &PortId,
            _channel_id: &ChannelId,
            _capability: &ChannelCapability,
            _counterparty: &Counterparty,
            version: &Version,
        ) -> Result<Version, MiddlewareError> {
            ctx.push("app:open_init".to_string());
            Ok(version.clone())
        }

        fn on_chan_open_try(
            &mut self,
            _ctx: &mut Trace,
            _order: Order,
            _connection_hops: &[ConnectionId],
            _port_id: &PortId,
            _channel_id: &ChannelId,
            _capability: &ChannelCapability,
            _counterparty: &Counterparty,
            counterparty_version: &Version,
        ) -> Result<Version, MiddlewareError> {
            Ok(counterparty_version.clone())
        }

        fn on_recv_packet(
            &mut self,
            ctx: &mut Trace,
            packet: &Packet,
            _relayer: &Signer,
        ) -> Option<Acknowledgement> {
            ctx.push(format!("app:recv:{}", packet.seq_on_a));
            Acknowledgement::try_from(b"app-ack".to_vec()).ok()
        }

        fn on_acknowledgement_packet(
            &mut self,
            ctx: &mut Trace,
            _packet: &Packet,
            _acknowledgement: &Acknowledgement,
            _relayer: &Signer,
        ) -> Result<(), MiddlewareError> {
            ctx.push("app:ack".to_string());
            Ok(())
        }

        fn on_timeout_packet(
            &mut self,
            ctx: &mut Trace,
            _packet: &Packet,
            _relayer: &Signer,
        ) -> Result<(), MiddlewareError> {
            ctx.push("app:timeout".to_string());
            Err(MiddlewareError::App {
                description: "timeout refused".to_string(),
            })
        }
    }

    fn packet() -> Packet {
        Packet {
            seq_on_a: Sequence::from(1),
            port_id_on_a: PortId::transfer(),
            chan_id_on_a: ChannelId::new(0),
            port_id_on_b: PortId::transfer(),
            chan_id_on_b: ChannelId::new(1),
            data: Vec::new(),
            timeout_height_on_b: TimeoutHeight::Never,
            timeout_timestamp_on_b: 0,
        }
    }

    fn relayer() -> Signer {
        Signer::from("relayer".to_string())
    }

    #[test]
    fn passthrough_delegates_once() {
        let mut middleware = IbcMiddleware::new(RecordingApp, ModuleHooks::new());
        let mut trace = Trace::new();

        let ack = middleware.on_recv_packet(&mut trace, &packet(), &relayer());

        assert_eq!(ack.map(Vec::from), Some(b"app-ack".to_vec()));
        assert_eq!(trace, vec!["app:recv:1"]);
    }

    #[test]
    fn observers_wrap_the_delegated_call() {
        let hooks = ModuleHooks::new()
            .before_recv_packet(|ctx: &mut Trace, args| {
                ctx.push(format!("before:{}", args.packet.seq_on_a))
            })
            .after_recv_packet(|ctx: &mut Trace, _, ack| {
                ctx.push(format!("after:{}", ack.is_some()))
            });
        let mut middleware = IbcMiddleware::new(RecordingApp, hooks);
        let mut trace = Trace::new();

        middleware.on_recv_packet(&mut trace, &packet(), &relayer());

        assert_eq!(trace, vec!["before:1", "app:recv:1", "after:true"]);
    }

    #[test]
    fn after_hook_sees_errors() {
        let hooks = ModuleHooks::new().after_timeout_packet(|ctx: &mut Trace, _, res| {
            ctx.push(format!("after:{}", res.is_err()))
        });
        let mut middleware = IbcMiddleware::new(RecordingApp, hooks);
        let mut trace = Trace::new();

        let res = middleware.on_timeout_packet(&mut trace, &packet(), &relayer());

        assert!(res.is_err());
        assert_eq!(trace, vec!["app:timeout", "after:true"]);
    }

    #[test]
    fn override_replaces_default_behavior() {
        let hooks = ModuleHooks::new().override_acknowledgement_packet(|_app, ctx: &mut Trace, _| {
            ctx.push("override:ack".to_string());
            Ok(())
        });
        let mut middleware = IbcMiddleware::new(RecordingApp, hooks);
        let mut trace = Trace::new();
        let ack = Acknowledgement::try_from(b"x".to_vec()).unwrap();

        middleware
            .on_acknowledgement_packet(&mut trace, &packet(), &ack, &relayer())
            .unwrap();

        assert_eq!(trace, vec!["override:ack"]);
    }

    #[test]
    fn override_may_delegate_to_the_wrapped_app() {
        let hooks = ModuleHooks::new().override_chan_open_init(|app, ctx: &mut Trace, args| {
            ctx.push("override:open_init".to_string());
            args.delegate(app, ctx)
                .map(|v| Version::new(format!("wrapped-{v}")))
        });
        let mut middleware = IbcMiddleware::new(RecordingApp, hooks);
        let mut trace = Trace::new();

        let version = middleware
            .on_chan_open_init(
                &mut trace,
                Order::Unordered,
                &[],
                &PortId::transfer(),
                &ChannelId::new(0),
                &ChannelCapability::issue(0),
                &Counterparty::new(PortId::transfer(), None),
                &Version::new("ics20-1".to_string()),
            )
            .unwrap();

        assert_eq!(version.as_str(), "wrapped-ics20-1");
        assert_eq!(trace, vec!["override:open_init", "app:open_init"]);
    }

    #[test]
    fn middlewares_nest() {
        let inner = IbcMiddleware::new(
            RecordingApp,
            ModuleHooks::new().before_recv_packet(|ctx: &mut Trace, _| ctx.push("inner".to_string())),
        );
        let mut outer = IbcMiddleware::new(
            inner,
            ModuleHooks::new().before_recv_packet(|ctx: &mut Trace, _| ctx.push("outer".to_string())),
        );
        let mut trace = Trace::new();

        outer.on_recv_packet(&mut trace, &packet(), &relayer());

        assert_eq!(trace, vec!["outer", "inner", "app:recv:1"]);
    }
}
