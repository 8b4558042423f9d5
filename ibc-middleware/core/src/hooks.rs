//! Per-operation hook registry.
//!
//! Every lifecycle operation a middleware intercepts owns one [`HookSlot`].
//! The slot is resolved with a fixed priority: an override replaces the
//! default behavior entirely; otherwise the optional before hook runs, the
//! call is delegated to the wrapped layer and the optional after hook
//! observes the outcome; with nothing registered the call is only delegated.

use core::fmt::{Debug, Error as FmtError, Formatter};

use ibc_middleware_types::acknowledgement::Acknowledgement;
use ibc_middleware_types::capability::ChannelCapability;
use ibc_middleware_types::channel::{Counterparty, Order, Version};
use ibc_middleware_types::error::MiddlewareError;
use ibc_middleware_types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_middleware_types::packet::Packet;
use ibc_middleware_types::Signer;

use crate::ics4::Ics4Wrapper;
use crate::module::IbcModule;

/// The handlers registered for one operation.
pub enum HookSlot<O: ?Sized, B: ?Sized, A: ?Sized> {
    /// Replaces the default behavior. The handler receives the wrapped layer
    /// and decides itself whether to delegate.
    Override(Box<O>),
    /// Keeps the default behavior, with side effects before and observation
    /// after the delegated call.
    Observe {
        before: Option<Box<B>>,
        after: Option<Box<A>>,
    },
    Passthrough,
}

impl<O: ?Sized, B: ?Sized, A: ?Sized> HookSlot<O, B, A> {
    pub fn is_override(&self) -> bool {
        matches!(self, HookSlot::Override(_))
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, HookSlot::Passthrough)
    }

    /// Registers an override, replacing whatever the slot held.
    pub fn set_override(&mut self, handler: Box<O>) {
        *self = HookSlot::Override(handler);
    }

    /// Registers a before hook. Ignored while an override is registered,
    /// since the override would shadow it.
    pub fn set_before(&mut self, hook: Box<B>) {
        match self {
            HookSlot::Override(_) => {}
            HookSlot::Observe { before, .. } => *before = Some(hook),
            HookSlot::Passthrough => {
                *self = HookSlot::Observe {
                    before: Some(hook),
                    after: None,
                }
            }
        }
    }

    /// Registers an after hook. Ignored while an override is registered.
    pub fn set_after(&mut self, hook: Box<A>) {
        match self {
            HookSlot::Override(_) => {}
            HookSlot::Observe { after, .. } => *after = Some(hook),
            HookSlot::Passthrough => {
                *self = HookSlot::Observe {
                    before: None,
                    after: Some(hook),
                }
            }
        }
    }
}

impl<O: ?Sized, B: ?Sized, A: ?Sized> Default for HookSlot<O, B, A> {
    fn default() -> Self {
        HookSlot::Passthrough
    }
}

impl<O: ?Sized, B: ?Sized, A: ?Sized> Debug for HookSlot<O, B, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            HookSlot::Override(_) => write!(f, "Override"),
            HookSlot::Observe { before, after } => write!(
                f,
                "Observe {{ before: {}, after: {} }}",
                before.is_some(),
                after.is_some()
            ),
            HookSlot::Passthrough => write!(f, "Passthrough"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ChanOpenInitArgs<'a> {
    pub order: Order,
    pub connection_hops: &'a [ConnectionId],
    pub port_id: &'a PortId,
    pub channel_id: &'a ChannelId,
    pub capability: &'a ChannelCapability,
    pub counterparty: &'a Counterparty,
    pub version: &'a Version,
}

impl<'a> ChanOpenInitArgs<'a> {
    pub fn delegate<Ctx, M>(self, app: &mut M, ctx: &mut Ctx) -> Result<Version, MiddlewareError>
    where
        M: IbcModule<Ctx> + ?Sized,
    {
        app.on_chan_open_init(
            ctx,
            self.order,
            self.connection_hops,
            self.port_id,
            self.channel_id,
            self.capability,
            self.counterparty,
            self.version,
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ChanOpenTryArgs<'a> {
    pub order: Order,
    pub connection_hops: &'a [ConnectionId],
    pub port_id: &'a PortId,
    pub channel_id: &'a ChannelId,
    pub capability: &'a ChannelCapability,
    pub counterparty: &'a Counterparty,
    pub counterparty_version: &'a Version,
}

impl<'a> ChanOpenTryArgs<'a> {
    pub fn delegate<Ctx, M>(self, app: &mut M, ctx: &mut Ctx) -> Result<Version, MiddlewareError>
    where
        M: IbcModule<Ctx> + ?Sized,
    {
        app.on_chan_open_try(
            ctx,
            self.order,
            self.connection_hops,
            self.port_id,
            self.channel_id,
            self.capability,
            self.counterparty,
            self.counterparty_version,
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ChanOpenAckArgs<'a> {
    pub port_id: &'a PortId,
    pub channel_id: &'a ChannelId,
    pub counterparty_channel_id: &'a ChannelId,
    pub counterparty_version: &'a Version,
}

impl<'a> ChanOpenAckArgs<'a> {
    pub fn delegate<Ctx, M>(self, app: &mut M, ctx: &mut Ctx) -> Result<(), MiddlewareError>
    where
        M: IbcModule<Ctx> + ?Sized,
    {
        app.on_chan_open_ack(
            ctx,
            self.port_id,
            self.channel_id,
            self.counterparty_channel_id,
            self.counterparty_version,
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ChanOpenConfirmArgs<'a> {
    pub port_id: &'a PortId,
    pub channel_id: &'a ChannelId,
}

impl<'a> ChanOpenConfirmArgs<'a> {
    pub fn delegate<Ctx, M>(self, app: &mut M, ctx: &mut Ctx) -> Result<(), MiddlewareError>
    where
        M: IbcModule<Ctx> + ?Sized,
    {
        app.on_chan_open_confirm(ctx, self.port_id, self.channel_id)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ChanCloseInitArgs<'a> {
    pub port_id: &'a PortId,
    pub channel_id: &'a ChannelId,
}

impl<'a> ChanCloseInitArgs<'a> {
    pub fn delegate<Ctx, M>(self, app: &mut M, ctx: &mut Ctx) -> Result<(), MiddlewareError>
    where
        M: IbcModule<Ctx> + ?Sized,
    {
        app.on_chan_close_init(ctx, self.port_id, self.channel_id)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ChanCloseConfirmArgs<'a> {
    pub port_id: &'a PortId,
    pub channel_id: &'a ChannelId,
}

impl<'a> ChanCloseConfirmArgs<'a> {
    pub fn delegate<Ctx, M>(self, app: &mut M, ctx: &mut Ctx) -> Result<(), MiddlewareError>
    where
        M: IbcModule<Ctx> + ?Sized,
    {
        app.on_chan_close_confirm(ctx, self.port_id, self.channel_id)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RecvPacketArgs<'a> {
    pub packet: &'a Packet,
    pub relayer: &'a Signer,
}

impl<'a> RecvPacketArgs<'a> {
    pub fn delegate<Ctx, M>(self, app: &mut M, ctx: &mut Ctx) -> Option<Acknowledgement>
    where
        M: IbcModule<Ctx> + ?Sized,
    {
        app.on_recv_packet(ctx, self.packet, self.relayer)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AckPacketArgs<'a> {
    pub packet: &'a Packet,
    pub acknowledgement: &'a Acknowledgement,
    pub relayer: &'a Signer,
}

impl<'a> AckPacketArgs<'a> {
    pub fn delegate<Ctx, M>(self, app: &mut M, ctx: &mut Ctx) -> Result<(), MiddlewareError>
    where
        M: IbcModule<Ctx> + ?Sized,
    {
        app.on_acknowledgement_packet(ctx, self.packet, self.acknowledgement, self.relayer)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TimeoutPacketArgs<'a> {
    pub packet: &'a Packet,
    pub relayer: &'a Signer,
}

impl<'a> TimeoutPacketArgs<'a> {
    pub fn delegate<Ctx, M>(self, app: &mut M, ctx: &mut Ctx) -> Result<(), MiddlewareError>
    where
        M: IbcModule<Ctx> + ?Sized,
    {
        app.on_timeout_packet(ctx, self.packet, self.relayer)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SendPacketArgs<'a> {
    pub capability: &'a ChannelCapability,
    pub packet: &'a Packet,
}

impl<'a> SendPacketArgs<'a> {
    pub fn delegate<Ctx, W>(self, next: &mut W, ctx: &mut Ctx) -> Result<Sequence, MiddlewareError>
    where
        W: Ics4Wrapper<Ctx> + ?Sized,
    {
        next.send_packet(ctx, self.capability, self.packet)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct WriteAckArgs<'a> {
    pub capability: &'a ChannelCapability,
    pub packet: &'a Packet,
    pub acknowledgement: &'a Acknowledgement,
}

impl<'a> WriteAckArgs<'a> {
    pub fn delegate<Ctx, W>(self, next: &mut W, ctx: &mut Ctx) -> Result<(), MiddlewareError>
    where
        W: Ics4Wrapper<Ctx> + ?Sized,
    {
        next.write_acknowledgement(ctx, self.capability, self.packet, self.acknowledgement)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AppVersionArgs<'a> {
    pub port_id: &'a PortId,
    pub channel_id: &'a ChannelId,
}

impl<'a> AppVersionArgs<'a> {
    pub fn delegate<Ctx, W>(self, next: &W, ctx: &Ctx) -> Option<Version>
    where
        W: Ics4Wrapper<Ctx> + ?Sized,
    {
        next.get_app_version(ctx, self.port_id, self.channel_id)
    }
}

/// Slot for an [`IbcModule`] callback taking `Args` and producing `Out`.
macro_rules! module_slot {
    ($args:ident, $out:ty) => {
        HookSlot<
            dyn Fn(&mut dyn IbcModule<Ctx>, &mut Ctx, $args<'_>) -> $out,
            dyn Fn(&mut Ctx, &$args<'_>),
            dyn Fn(&mut Ctx, &$args<'_>, &$out),
        >
    };
}

/// Slot for an [`Ics4Wrapper`] method taking `Args` and producing `Out`.
macro_rules! ics4_slot {
    ($args:ident, $out:ty) => {
        HookSlot<
            dyn Fn(&mut dyn Ics4Wrapper<Ctx>, &mut Ctx, $args<'_>) -> $out,
            dyn Fn(&mut Ctx, &$args<'_>),
            dyn Fn(&mut Ctx, &$args<'_>, &$out),
        >
    };
}

pub type ChanOpenInitSlot<Ctx> = module_slot!(ChanOpenInitArgs, Result<Version, MiddlewareError>);
pub type ChanOpenTrySlot<Ctx> = module_slot!(ChanOpenTryArgs, Result<Version, MiddlewareError>);
pub type ChanOpenAckSlot<Ctx> = module_slot!(ChanOpenAckArgs, Result<(), MiddlewareError>);
pub type ChanOpenConfirmSlot<Ctx> = module_slot!(ChanOpenConfirmArgs, Result<(), MiddlewareError>);
pub type ChanCloseInitSlot<Ctx> = module_slot!(ChanCloseInitArgs, Result<(), MiddlewareError>);
pub type ChanCloseConfirmSlot<Ctx> =
    module_slot!(ChanCloseConfirmArgs, Result<(), MiddlewareError>);
pub type RecvPacketSlot<Ctx> = module_slot!(RecvPacketArgs, Option<Acknowledgement>);
pub type AckPacketSlot<Ctx> = module_slot!(AckPacketArgs, Result<(), MiddlewareError>);
pub type TimeoutPacketSlot<Ctx> = module_slot!(TimeoutPacketArgs, Result<(), MiddlewareError>);

pub type SendPacketSlot<Ctx> = ics4_slot!(SendPacketArgs, Result<Sequence, MiddlewareError>);
pub type WriteAckSlot<Ctx> = ics4_slot!(WriteAckArgs, Result<(), MiddlewareError>);
pub type AppVersionSlot<Ctx> = HookSlot<
    dyn Fn(&dyn Ics4Wrapper<Ctx>, &Ctx, AppVersionArgs<'_>) -> Option<Version>,
    dyn Fn(&Ctx, &AppVersionArgs<'_>),
    dyn Fn(&Ctx, &AppVersionArgs<'_>, &Option<Version>),
>;

/// Generates the override/before/after registration methods of one slot.
macro_rules! module_slot_setters {
    ($(
        $field:ident: $args:ident -> $out:ty {
            $override_fn:ident, $before_fn:ident, $after_fn:ident $(,)?
        }
    )*) => {
        $(
            pub fn $override_fn(
                mut self,
                handler: impl Fn(&mut dyn IbcModule<Ctx>, &mut Ctx, $args<'_>) -> $out + 'static,
            ) -> Self {
                self.$field.set_override(Box::new(handler));
                self
            }

            pub fn $before_fn(mut self, hook: impl Fn(&mut Ctx, &$args<'_>) + 'static) -> Self {
                self.$field.set_before(Box::new(hook));
                self
            }

            pub fn $after_fn(
                mut self,
                hook: impl Fn(&mut Ctx, &$args<'_>, &$out) + 'static,
            ) -> Self {
                self.$field.set_after(Box::new(hook));
                self
            }
        )*
    };
}

/// The hooks a middleware registers around the application it wraps.
pub struct ModuleHooks<Ctx> {
    pub chan_open_init: ChanOpenInitSlot<Ctx>,
    pub chan_open_try: ChanOpenTrySlot<Ctx>,
    pub chan_open_ack: ChanOpenAckSlot<Ctx>,
    pub chan_open_confirm: ChanOpenConfirmSlot<Ctx>,
    pub chan_close_init: ChanCloseInitSlot<Ctx>,
    pub chan_close_confirm: ChanCloseConfirmSlot<Ctx>,
    pub recv_packet: RecvPacketSlot<Ctx>,
    pub acknowledgement_packet: AckPacketSlot<Ctx>,
    pub timeout_packet: TimeoutPacketSlot<Ctx>,
}

impl<Ctx> ModuleHooks<Ctx> {
    /// A registry where every operation passes straight through.
    pub fn new() -> Self {
        Self {
            chan_open_init: HookSlot::default(),
            chan_open_try: HookSlot::default(),
            chan_open_ack: HookSlot::default(),
            chan_open_confirm: HookSlot::default(),
            chan_close_init: HookSlot::default(),
            chan_close_confirm: HookSlot::default(),
            recv_packet: HookSlot::default(),
            acknowledgement_packet: HookSlot::default(),
            timeout_packet: HookSlot::default(),
        }
    }

    module_slot_setters! {
        chan_open_init: ChanOpenInitArgs -> Result<Version, MiddlewareError> {
            override_chan_open_init, before_chan_open_init, after_chan_open_init
        }
        chan_open_try: ChanOpenTryArgs -> Result<Version, MiddlewareError> {
            override_chan_open_try, before_chan_open_try, after_chan_open_try
        }
        chan_open_ack: ChanOpenAckArgs -> Result<(), MiddlewareError> {
            override_chan_open_ack, before_chan_open_ack, after_chan_open_ack
        }
        chan_open_confirm: ChanOpenConfirmArgs -> Result<(), MiddlewareError> {
            override_chan_open_confirm, before_chan_open_confirm, after_chan_open_confirm
        }
        chan_close_init: ChanCloseInitArgs -> Result<(), MiddlewareError> {
            override_chan_close_init, before_chan_close_init, after_chan_close_init
        }
        chan_close_confirm: ChanCloseConfirmArgs -> Result<(), MiddlewareError> {
            override_chan_close_confirm, before_chan_close_confirm, after_chan_close_confirm
        }
        recv_packet: RecvPacketArgs -> Option<Acknowledgement> {
            override_recv_packet, before_recv_packet, after_recv_packet
        }
        acknowledgement_packet: AckPacketArgs -> Result<(), MiddlewareError> {
            override_acknowledgement_packet,
            before_acknowledgement_packet,
            after_acknowledgement_packet,
        }
        timeout_packet: TimeoutPacketArgs -> Result<(), MiddlewareError> {
            override_timeout_packet, before_timeout_packet, after_timeout_packet
        }
    }
}

impl<Ctx> Default for ModuleHooks<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> Debug for ModuleHooks<Ctx> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.debug_struct("ModuleHooks")
            .field("chan_open_init", &self.chan_open_init)
            .field("chan_open_try", &self.chan_open_try)
            .field("chan_open_ack", &self.chan_open_ack)
            .field("chan_open_confirm", &self.chan_open_confirm)
            .field("chan_close_init", &self.chan_close_init)
            .field("chan_close_confirm", &self.chan_close_confirm)
            .field("recv_packet", &self.recv_packet)
            .field("acknowledgement_packet", &self.acknowledgement_packet)
            .field("timeout_packet", &self.timeout_packet)
            .finish()
    }
}

/// The hooks a middleware registers around the ICS4 wrapper it wraps.
pub struct Ics4Hooks<Ctx> {
    pub send_packet: SendPacketSlot<Ctx>,
    pub write_acknowledgement: WriteAckSlot<Ctx>,
    pub get_app_version: AppVersionSlot<Ctx>,
}

impl<Ctx> Ics4Hooks<Ctx> {
    pub fn new() -> Self {
        Self {
            send_packet: HookSlot::default(),
            write_acknowledgement: HookSlot::default(),
            get_app_version: HookSlot::default(),
        }
    }

    pub fn override_send_packet(
        mut self,
        handler: impl Fn(&mut dyn Ics4Wrapper<Ctx>, &mut Ctx, SendPacketArgs<'_>) -> Result<Sequence, MiddlewareError>
            + 'static,
    ) -> Self {
        self.send_packet.set_override(Box::new(handler));
        self
    }

    pub fn before_send_packet(mut self, hook: impl Fn(&mut Ctx, &SendPacketArgs<'_>) + 'static) -> Self {
        self.send_packet.set_before(Box::new(hook));
        self
    }

    pub fn after_send_packet(
        mut self,
        hook: impl Fn(&mut Ctx, &SendPacketArgs<'_>, &Result<Sequence, MiddlewareError>) + 'static,
    ) -> Self {
        self.send_packet.set_after(Box::new(hook));
        self
    }

    pub fn override_write_acknowledgement(
        mut self,
        handler: impl Fn(&mut dyn Ics4Wrapper<Ctx>, &mut Ctx, WriteAckArgs<'_>) -> Result<(), MiddlewareError>
            + 'static,
    ) -> Self {
        self.write_acknowledgement.set_override(Box::new(handler));
        self
    }

    pub fn before_write_acknowledgement(
        mut self,
        hook: impl Fn(&mut Ctx, &WriteAckArgs<'_>) + 'static,
    ) -> Self {
        self.write_acknowledgement.set_before(Box::new(hook));
        self
    }

    pub fn after_write_acknowledgement(
        mut self,
        hook: impl Fn(&mut Ctx, &WriteAckArgs<'_>, &Result<(), MiddlewareError>) + 'static,
    ) -> Self {
        self.write_acknowledgement.set_after(Box::new(hook));
        self
    }

    pub fn override_get_app_version(
        mut self,
        handler: impl Fn(&dyn Ics4Wrapper<Ctx>, &Ctx, AppVersionArgs<'_>) -> Option<Version> + 'static,
    ) -> Self {
        self.get_app_version.set_override(Box::new(handler));
        self
    }

    pub fn before_get_app_version(mut self, hook: impl Fn(&Ctx, &AppVersionArgs<'_>) + 'static) -> Self {
        self.get_app_version.set_before(Box::new(hook));
        self
    }

    pub fn after_get_app_version(
        mut self,
        hook: impl Fn(&Ctx, &AppVersionArgs<'_>, &Option<Version>) + 'static,
    ) -> Self {
        self.get_app_version.set_after(Box::new(hook));
        self
    }
}

impl<Ctx> Default for Ics4Hooks<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> Debug for Ics4Hooks<Ctx> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.debug_struct("Ics4Hooks")
            .field("send_packet", &self.send_packet)
            .field("write_acknowledgement", &self.write_acknowledgement)
            .field("get_app_version", &self.get_app_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ctx;

    #[test]
    fn registry_starts_as_passthrough() {
        let hooks = ModuleHooks::<Ctx>::new();
        assert!(hooks.recv_packet.is_passthrough());
        assert!(hooks.chan_open_init.is_passthrough());

        let ics4 = Ics4Hooks::<Ctx>::default();
        assert!(ics4.send_packet.is_passthrough());
        assert!(ics4.get_app_version.is_passthrough());
    }

    #[test]
    fn observers_do_not_displace_an_override() {
        let hooks = ModuleHooks::<Ctx>::new()
            .override_recv_packet(|_, _, _| None)
            .before_recv_packet(|_, _| {})
            .after_recv_packet(|_, _, _| {});
        assert!(hooks.recv_packet.is_override());
    }

    #[test]
    fn before_and_after_share_one_slot() {
        let hooks = ModuleHooks::<Ctx>::new()
            .before_timeout_packet(|_, _| {})
            .after_timeout_packet(|_, _, _| {});
        assert_eq!(
            format!("{:?}", hooks.timeout_packet),
            "Observe { before: true, after: true }"
        );
    }

    #[test]
    fn later_override_replaces_observers() {
        let hooks = Ics4Hooks::<Ctx>::new()
            .before_write_acknowledgement(|_, _| {})
            .override_write_acknowledgement(|_, _, _| Ok(()));
        assert!(hooks.write_acknowledgement.is_override());
    }
}
