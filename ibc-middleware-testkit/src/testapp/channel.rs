use std::collections::BTreeMap;

use ibc_middleware_core::ics4::Ics4Wrapper;
use ibc_middleware_types::acknowledgement::Acknowledgement;
use ibc_middleware_types::capability::ChannelCapability;
use ibc_middleware_types::channel::Version;
use ibc_middleware_types::error::MiddlewareError;
use ibc_middleware_types::identifiers::{ChannelId, PortId, Sequence};
use ibc_middleware_types::packet::Packet;
use tracing::debug;

/// The core channel keeper at the bottom of an ICS4 chain.
///
/// Sequences are assigned per channel starting at 1; the sequence carried by
/// the packet handed in is ignored.
#[derive(Debug, Default)]
pub struct MockChannelKeeper {
    pub next_sequence_send: BTreeMap<ChannelId, u64>,
    pub sent_packets: Vec<Packet>,
    pub written_acks: Vec<(Packet, Acknowledgement)>,
    pub app_versions: BTreeMap<(PortId, ChannelId), Version>,
    /// Makes every send fail with this description.
    pub send_failure: Option<String>,
}

impl MockChannelKeeper {
    pub fn with_channel(mut self, port_id: PortId, channel_id: ChannelId, version: Version) -> Self {
        self.app_versions.insert((port_id, channel_id), version);
        self
    }

    pub fn failing_sends(mut self, description: &str) -> Self {
        self.send_failure = Some(description.to_string());
        self
    }

    pub fn last_sent_packet(&self) -> Option<&Packet> {
        self.sent_packets.last()
    }
}

impl<Ctx> Ics4Wrapper<Ctx> for MockChannelKeeper {
    fn send_packet(
        &mut self,
        _ctx: &mut Ctx,
        _capability: &ChannelCapability,
        packet: &Packet,
    ) -> Result<Sequence, MiddlewareError> {
        if let Some(description) = &self.send_failure {
            return Err(MiddlewareError::Channel {
                description: description.clone(),
            });
        }

        let next = self
            .next_sequence_send
            .entry(packet.chan_id_on_a.clone())
            .or_insert(1);
        let sequence = Sequence::from(*next);
        *next += 1;

        let mut sent = packet.clone();
        sent.seq_on_a = sequence;
        debug!(packet = %sent, "mock channel committed packet");
        self.sent_packets.push(sent);

        Ok(sequence)
    }

    fn write_acknowledgement(
        &mut self,
        _ctx: &mut Ctx,
        _capability: &ChannelCapability,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
    ) -> Result<(), MiddlewareError> {
        self.written_acks
            .push((packet.clone(), acknowledgement.clone()));
        Ok(())
    }

    fn get_app_version(
        &self,
        _ctx: &Ctx,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Option<Version> {
        self.app_versions
            .get(&(port_id.clone(), channel_id.clone()))
            .cloned()
    }
}
