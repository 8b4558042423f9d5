use ibc_middleware_types::identifiers::{ChannelId, PortId, Sequence};
use ibc_middleware_types::path::{Path, TransposedDataPath};
use tracing::debug;

use crate::context::{KvStore, MiddlewareContext};

/// Keeps the original payload of a received packet whose data was rewritten
/// on its way down the stack, keyed by (destination channel, destination
/// port, sequence).
pub trait TransposedDataKeeper {
    fn set_transposed_data(
        &mut self,
        channel_id: &ChannelId,
        port_id: &PortId,
        sequence: Sequence,
        data: Vec<u8>,
    );

    fn get_transposed_data(
        &self,
        channel_id: &ChannelId,
        port_id: &PortId,
        sequence: Sequence,
    ) -> Option<Vec<u8>>;

    /// Returns the stored payload and removes it, so that only the first
    /// call for a key yields data.
    fn get_and_clear_transposed_data(
        &mut self,
        channel_id: &ChannelId,
        port_id: &PortId,
        sequence: Sequence,
    ) -> Option<Vec<u8>>;
}

impl<Ctx> TransposedDataKeeper for Ctx
where
    Ctx: MiddlewareContext + ?Sized,
{
    fn set_transposed_data(
        &mut self,
        channel_id: &ChannelId,
        port_id: &PortId,
        sequence: Sequence,
        data: Vec<u8>,
    ) {
        let key = Path::from(TransposedDataPath::new(channel_id, port_id, sequence)).into_bytes();
        debug!(%channel_id, %port_id, %sequence, "storing transposed packet data");
        self.store_mut().set(key, data);
    }

    fn get_transposed_data(
        &self,
        channel_id: &ChannelId,
        port_id: &PortId,
        sequence: Sequence,
    ) -> Option<Vec<u8>> {
        let key = Path::from(TransposedDataPath::new(channel_id, port_id, sequence)).into_bytes();
        self.store().get(&key)
    }

    fn get_and_clear_transposed_data(
        &mut self,
        channel_id: &ChannelId,
        port_id: &PortId,
        sequence: Sequence,
    ) -> Option<Vec<u8>> {
        let key = Path::from(TransposedDataPath::new(channel_id, port_id, sequence)).into_bytes();
        let data = self.store().get(&key)?;
        self.store_mut().delete(&key);
        Some(data)
    }
}
