//! Defines the store paths under which the middleware keeps per-packet state.

use derive_more::{Display, From};

use crate::identifiers::{ChannelId, PortId, Sequence};

pub const PACKET_CALLBACK_PREFIX: &str = "packetCallbacks";
pub const TRANSPOSED_DATA_PREFIX: &str = "transposedData";
pub const CHANNEL_PREFIX: &str = "channels";
pub const PORT_PREFIX: &str = "ports";
pub const SEQUENCE_PREFIX: &str = "sequences";

/// The Path enum abstracts out the different sub-paths.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, From, Display)]
pub enum Path {
    PacketCallback(PacketCallbackPath),
    TransposedData(TransposedDataPath),
}

impl Path {
    /// Returns the raw store key for this path.
    pub fn into_bytes(self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

/// Location of the contract address to notify once an outbound packet is
/// acknowledged or times out. Keyed by the packet's source channel.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{PACKET_CALLBACK_PREFIX}/{CHANNEL_PREFIX}/{channel_id}/{SEQUENCE_PREFIX}/{sequence}")]
pub struct PacketCallbackPath {
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl PacketCallbackPath {
    pub fn new(channel_id: &ChannelId, sequence: Sequence) -> PacketCallbackPath {
        PacketCallbackPath {
            channel_id: channel_id.clone(),
            sequence,
        }
    }
}

/// Location of the original payload of a received packet whose data was
/// rewritten before being handed down the stack. Keyed by the packet's
/// destination channel and port.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(
    fmt = "{TRANSPOSED_DATA_PREFIX}/{CHANNEL_PREFIX}/{channel_id}/{PORT_PREFIX}/{port_id}/{SEQUENCE_PREFIX}/{sequence}"
)]
pub struct TransposedDataPath {
    pub channel_id: ChannelId,
    pub port_id: PortId,
    pub sequence: Sequence,
}

impl TransposedDataPath {
    pub fn new(channel_id: &ChannelId, port_id: &PortId, sequence: Sequence) -> TransposedDataPath {
        TransposedDataPath {
            channel_id: channel_id.clone(),
            port_id: port_id.clone(),
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_callback_path_format() {
        let path = PacketCallbackPath::new(&ChannelId::new(4), Sequence::from(12));
        assert_eq!(
            path.to_string(),
            "packetCallbacks/channels/channel-4/sequences/12"
        );
    }

    #[test]
    fn transposed_data_path_format() {
        let path =
            TransposedDataPath::new(&ChannelId::new(0), &PortId::transfer(), Sequence::from(1));
        assert_eq!(
            Path::from(path).into_bytes(),
            b"transposedData/channels/channel-0/ports/transfer/sequences/1".to_vec()
        );
    }

    #[test]
    fn paths_do_not_collide_across_channels() {
        let a = PacketCallbackPath::new(&ChannelId::new(1), Sequence::from(10));
        let b = PacketCallbackPath::new(&ChannelId::new(11), Sequence::from(0));
        assert_ne!(a.to_string(), b.to_string());
    }
}
