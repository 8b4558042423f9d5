//! The send side of a channel, as seen by an application.

use ibc_middleware_types::acknowledgement::Acknowledgement;
use ibc_middleware_types::capability::ChannelCapability;
use ibc_middleware_types::channel::Version;
use ibc_middleware_types::error::MiddlewareError;
use ibc_middleware_types::identifiers::{ChannelId, PortId, Sequence};
use ibc_middleware_types::packet::Packet;

/// Implemented by the channel keeper and by every middleware wrapping it.
pub trait Ics4Wrapper<Ctx> {
    /// Commits an outbound packet and returns its sequence.
    fn send_packet(
        &mut self,
        ctx: &mut Ctx,
        capability: &ChannelCapability,
        packet: &Packet,
    ) -> Result<Sequence, MiddlewareError>;

    /// Writes the acknowledgement of a packet whose receive was answered
    /// asynchronously.
    fn write_acknowledgement(
        &mut self,
        ctx: &mut Ctx,
        capability: &ChannelCapability,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
    ) -> Result<(), MiddlewareError>;

    /// Returns the application version negotiated on the channel, if the
    /// channel exists.
    fn get_app_version(&self, ctx: &Ctx, port_id: &PortId, channel_id: &ChannelId)
        -> Option<Version>;
}
