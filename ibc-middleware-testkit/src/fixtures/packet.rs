use ibc_middleware_types::identifiers::{ChannelId, PortId, Sequence};
use ibc_middleware_types::packet::{Packet, TimeoutHeight};
use typed_builder::TypedBuilder;

/// Configuration of the `Packet` type for building dummy packets.
///
/// By default the packet travels from `transfer/channel-0` on the sending
/// chain to `transfer/channel-1` on the receiving chain, with sequence 1.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = Packet))]
pub struct PacketConfig {
    #[builder(default = Sequence::from(1))]
    pub seq_on_a: Sequence,
    #[builder(default = PortId::transfer())]
    pub port_id_on_a: PortId,
    #[builder(default = ChannelId::new(0))]
    pub chan_id_on_a: ChannelId,
    #[builder(default = PortId::transfer())]
    pub port_id_on_b: PortId,
    #[builder(default = ChannelId::new(1))]
    pub chan_id_on_b: ChannelId,
    #[builder(default)]
    pub data: Vec<u8>,
    #[builder(default = TimeoutHeight::Never)]
    pub timeout_height_on_b: TimeoutHeight,
    #[builder(default = 0)]
    pub timeout_timestamp_on_b: u64,
}

impl From<PacketConfig> for Packet {
    fn from(config: PacketConfig) -> Self {
        Packet {
            seq_on_a: config.seq_on_a,
            port_id_on_a: config.port_id_on_a,
            chan_id_on_a: config.chan_id_on_a,
            port_id_on_b: config.port_id_on_b,
            chan_id_on_b: config.chan_id_on_b,
            data: config.data,
            timeout_height_on_b: config.timeout_height_on_b,
            timeout_timestamp_on_b: config.timeout_timestamp_on_b,
        }
    }
}
