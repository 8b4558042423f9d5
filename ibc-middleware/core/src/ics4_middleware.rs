//! The generic middleware wrapping an ICS4 wrapper.

use ibc_middleware_types::acknowledgement::Acknowledgement;
use ibc_middleware_types::capability::ChannelCapability;
use ibc_middleware_types::channel::Version;
use ibc_middleware_types::error::MiddlewareError;
use ibc_middleware_types::identifiers::{ChannelId, PortId, Sequence};
use ibc_middleware_types::packet::Packet;

use crate::hooks::*;
use crate::ics4::Ics4Wrapper;
use crate::middleware::dispatch;

/// Wraps the next ICS4 wrapper `W` down the send path, which is either
/// another middleware or the channel keeper itself.
pub struct Ics4Middleware<W, Ctx> {
    next: W,
    hooks: Ics4Hooks<Ctx>,
}

impl<W, Ctx> Ics4Middleware<W, Ctx>
where
    W: Ics4Wrapper<Ctx>,
{
    pub fn new(next: W, hooks: Ics4Hooks<Ctx>) -> Self {
        Self { next, hooks }
    }

    pub fn next(&self) -> &W {
        &self.next
    }

    pub fn next_mut(&mut self) -> &mut W {
        &mut self.next
    }

    pub fn hooks(&self) -> &Ics4Hooks<Ctx> {
        &self.hooks
    }
}

impl<W, Ctx> Ics4Wrapper<Ctx> for Ics4Middleware<W, Ctx>
where
    W: Ics4Wrapper<Ctx>,
{
    fn send_packet(
        &mut self,
        ctx: &mut Ctx,
        capability: &ChannelCapability,
        packet: &Packet,
    ) -> Result<Sequence, MiddlewareError> {
        dispatch!(
            &self.hooks.send_packet,
            &mut self.next,
            ctx,
            SendPacketArgs { capability, packet }
        )
    }

    fn write_acknowledgement(
        &mut self,
        ctx: &mut Ctx,
        capability: &ChannelCapability,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
    ) -> Result<(), MiddlewareError> {
        dispatch!(
            &self.hooks.write_acknowledgement,
            &mut self.next,
            ctx,
            WriteAckArgs {
                capability,
                packet,
                acknowledgement,
            }
        )
    }

    fn get_app_version(
        &self,
        ctx: &Ctx,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Option<Version> {
        let args = AppVersionArgs {
            port_id,
            channel_id,
        };
        match &self.hooks.get_app_version {
            HookSlot::Override(handler) => handler(&self.next, ctx, args),
            HookSlot::Observe { before, after } => {
                if let Some(before) = before {
                    before(ctx, &args);
                }
                let version = args.delegate(&self.next, ctx);
                if let Some(after) = after {
                    after(ctx, &args, &version);
                }
                version
            }
            HookSlot::Passthrough => args.delegate(&self.next, ctx),
        }
    }
}
