use ibc_middleware_types::identifiers::{ChannelId, Sequence};
use ibc_middleware_types::path::{PacketCallbackPath, Path};
use ibc_middleware_types::Signer;
use tracing::debug;

use crate::context::{KvStore, MiddlewareContext};

/// Records which contract to notify once an outbound packet is acknowledged
/// or times out, keyed by (source channel, sequence).
pub trait PacketCallbackKeeper {
    fn store_packet_callback(&mut self, channel_id: &ChannelId, sequence: Sequence, contract: &Signer);

    fn get_packet_callback(&self, channel_id: &ChannelId, sequence: Sequence) -> Option<Signer>;

    fn delete_packet_callback(&mut self, channel_id: &ChannelId, sequence: Sequence);
}

impl<Ctx> PacketCallbackKeeper for Ctx
where
    Ctx: MiddlewareContext + ?Sized,
{
    fn store_packet_callback(&mut self, channel_id: &ChannelId, sequence: Sequence, contract: &Signer) {
        let key = Path::from(PacketCallbackPath::new(channel_id, sequence)).into_bytes();
        debug!(%channel_id, %sequence, %contract, "storing packet callback");
        self.store_mut()
            .set(key, contract.as_ref().as_bytes().to_vec());
    }

    fn get_packet_callback(&self, channel_id: &ChannelId, sequence: Sequence) -> Option<Signer> {
        let key = Path::from(PacketCallbackPath::new(channel_id, sequence)).into_bytes();
        self.store()
            .get(&key)
            .and_then(|raw| String::from_utf8(raw).ok())
            .filter(|contract| !contract.is_empty())
            .map(Signer::from)
    }

    fn delete_packet_callback(&mut self, channel_id: &ChannelId, sequence: Sequence) {
        let key = Path::from(PacketCallbackPath::new(channel_id, sequence)).into_bytes();
        self.store_mut().delete(&key);
    }
}
