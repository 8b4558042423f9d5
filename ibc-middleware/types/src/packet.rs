//! Defines the packet type seen by the middleware layers.

use core::fmt::{Debug, Display, Error as FmtError, Formatter};

use crate::identifiers::{ChannelId, PortId, Sequence};

/// Height on the destination chain after which a packet times out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TimeoutHeight {
    #[default]
    Never,
    At {
        revision_number: u64,
        revision_height: u64,
    },
}

impl Display for TimeoutHeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::Never => write!(f, "no timeout"),
            Self::At {
                revision_number,
                revision_height,
            } => write!(f, "{revision_number}-{revision_height}"),
        }
    }
}

/// The packet type; this is what applications send to one another.
///
/// The identity of a packet (ports, channels and sequence) is fixed once it
/// has been sent. Middleware may only produce rewritten copies through
/// [`Packet::with_data`], which keeps that identity.
#[derive(Clone, Hash, PartialEq, Eq)]
pub struct Packet {
    pub seq_on_a: Sequence,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub data: Vec<u8>,
    pub timeout_height_on_b: TimeoutHeight,
    /// Timeout as nanoseconds since the unix epoch; zero means none.
    pub timeout_timestamp_on_b: u64,
}

impl Packet {
    /// Returns a copy of this packet carrying `data` instead of the
    /// original payload.
    pub fn with_data(&self, data: Vec<u8>) -> Self {
        Self {
            data,
            ..self.clone()
        }
    }
}

struct PacketData<'a>(&'a [u8]);

impl<'a> Debug for PacketData<'a> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(formatter, "{:?}", self.0)
    }
}

impl Debug for Packet {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), FmtError> {
        // Exhaustive so that a new field cannot be left out of the output.
        let Packet {
            seq_on_a: _,
            port_id_on_a: _,
            chan_id_on_a: _,
            port_id_on_b: _,
            chan_id_on_b: _,
            data,
            timeout_height_on_b: _,
            timeout_timestamp_on_b: _,
        } = self;
        let data_wrapper = PacketData(data);

        formatter
            .debug_struct("Packet")
            .field("sequence", &self.seq_on_a)
            .field("source_port", &self.port_id_on_a)
            .field("source_channel", &self.chan_id_on_a)
            .field("destination_port", &self.port_id_on_b)
            .field("destination_channel", &self.chan_id_on_b)
            .field("data", &data_wrapper)
            .field("timeout_height", &self.timeout_height_on_b)
            .field("timeout_timestamp", &self.timeout_timestamp_on_b)
            .finish()
    }
}

/// Custom display output to omit the packet data
impl Display for Packet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "seq:{}, path:{}/{}->{}/{}, toh:{}, tos:{}",
            self.seq_on_a,
            self.chan_id_on_a,
            self.port_id_on_a,
            self.chan_id_on_b,
            self.port_id_on_b,
            self.timeout_height_on_b,
            self.timeout_timestamp_on_b
        )
    }
}
