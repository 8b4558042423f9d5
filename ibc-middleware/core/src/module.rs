//! The callbacks an application exposes to the channel handshake and packet
//! lifecycle.

use ibc_middleware_types::acknowledgement::Acknowledgement;
use ibc_middleware_types::capability::ChannelCapability;
use ibc_middleware_types::channel::{Counterparty, Order, Version};
use ibc_middleware_types::error::MiddlewareError;
use ibc_middleware_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_middleware_types::packet::Packet;
use ibc_middleware_types::Signer;

/// An IBC application, or a middleware presenting itself as one to the layer
/// above it.
///
/// Every callback receives the execution context `Ctx`, which carries the
/// transactional store and the host services for the current packet.
pub trait IbcModule<Ctx> {
    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<Version, MiddlewareError>;

    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<Version, MiddlewareError>;

    fn on_chan_open_ack(
        &mut self,
        _ctx: &mut Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty_channel_id: &ChannelId,
        _counterparty_version: &Version,
    ) -> Result<(), MiddlewareError> {
        Ok(())
    }

    fn on_chan_open_confirm(
        &mut self,
        _ctx: &mut Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), MiddlewareError> {
        Ok(())
    }

    fn on_chan_close_init(
        &mut self,
        _ctx: &mut Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), MiddlewareError> {
        Ok(())
    }

    fn on_chan_close_confirm(
        &mut self,
        _ctx: &mut Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), MiddlewareError> {
        Ok(())
    }

    /// Processes a received packet.
    ///
    /// Note: there is no failing variant; if any error occurs an "error
    /// acknowledgement" must be returned. `None` means the application will
    /// write the acknowledgement later through the ICS4 wrapper.
    fn on_recv_packet(
        &mut self,
        ctx: &mut Ctx,
        packet: &Packet,
        relayer: &Signer,
    ) -> Option<Acknowledgement>;

    fn on_acknowledgement_packet(
        &mut self,
        ctx: &mut Ctx,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> Result<(), MiddlewareError>;

    /// Note: `MsgTimeout` and `MsgTimeoutOnClose` use the same callback
    fn on_timeout_packet(
        &mut self,
        ctx: &mut Ctx,
        packet: &Packet,
        relayer: &Signer,
    ) -> Result<(), MiddlewareError>;
}
