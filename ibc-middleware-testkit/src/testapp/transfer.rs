use ibc_middleware_core::module::IbcModule;
use ibc_middleware_types::acknowledgement::Acknowledgement;
use ibc_middleware_types::capability::ChannelCapability;
use ibc_middleware_types::channel::{Counterparty, Order, Version};
use ibc_middleware_types::error::MiddlewareError;
use ibc_middleware_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_middleware_types::packet::Packet;
use ibc_middleware_types::transfer::{FungibleTokenPacketData, VERSION};
use ibc_middleware_types::Signer;

use crate::fixtures::{dummy_error_ack, dummy_success_ack};

/// How the mock transfer application answers a received transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RecvOutcome {
    /// Credits the receiver and answers `{"result":"AQ=="}`.
    #[default]
    Success,
    /// Answers with an error acknowledgement carrying the message.
    Error(String),
    /// Defers the acknowledgement.
    Async,
}

/// An ICS-20 application that records every callback it receives.
///
/// Packets that do not decode as ICS-20 packet data are answered with an
/// error acknowledgement, whatever the configured outcome.
#[derive(Debug, Default)]
pub struct MockTransferModule {
    pub recv_outcome: RecvOutcome,
    /// Makes acknowledgement and timeout callbacks fail with this description.
    pub callback_failure: Option<String>,
    pub handshake_calls: Vec<String>,
    pub received: Vec<Packet>,
    pub acknowledged: Vec<(Packet, Acknowledgement)>,
    pub timed_out: Vec<Packet>,
}

impl MockTransferModule {
    pub fn with_recv_outcome(mut self, outcome: RecvOutcome) -> Self {
        self.recv_outcome = outcome;
        self
    }

    pub fn failing_callbacks(mut self, description: &str) -> Self {
        self.callback_failure = Some(description.to_string());
        self
    }

    /// The packet data of every transfer the application credited.
    pub fn credited_transfers(&self) -> Vec<FungibleTokenPacketData> {
        self.received
            .iter()
            .filter_map(|packet| FungibleTokenPacketData::decode(&packet.data))
            .collect()
    }

    fn callback_result(&self) -> Result<(), MiddlewareError> {
        match &self.callback_failure {
            Some(description) => Err(MiddlewareError::App {
                description: description.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl<Ctx> IbcModule<Ctx> for MockTransferModule {
    fn on_chan_open_init(
        &mut self,
        _ctx: &mut Ctx,
        _order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        channel_id: &ChannelId,
        _capability: &ChannelCapability,
        _counterparty: &Counterparty,
        version: &Version,
    ) -> Result<Version, MiddlewareError> {
        self.handshake_calls.push(format!("open_init {channel_id}"));
        if version.is_empty() {
            return Ok(Version::new(VERSION.to_string()));
        }
        if version.as_str() != VERSION {
            return Err(MiddlewareError::App {
                description: format!("expected version {VERSION}, got {version}"),
            });
        }
        Ok(version.clone())
    }

    fn on_chan_open_try(
        &mut self,
        _ctx: &mut Ctx,
        _order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        channel_id: &ChannelId,
        _capability: &ChannelCapability,
        _counterparty: &Counterparty,
        counterparty_version: &Version,
    ) -> Result<Version, MiddlewareError> {
        self.handshake_calls.push(format!("open_try {channel_id}"));
        Ok(counterparty_version.clone())
    }

    fn on_chan_open_ack(
        &mut self,
        _ctx: &mut Ctx,
        _port_id: &PortId,
        channel_id: &ChannelId,
        _counterparty_channel_id: &ChannelId,
        _counterparty_version: &Version,
    ) -> Result<(), MiddlewareError> {
        self.handshake_calls.push(format!("open_ack {channel_id}"));
        Ok(())
    }

    fn on_chan_open_confirm(
        &mut self,
        _ctx: &mut Ctx,
        _port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(), MiddlewareError> {
        self.handshake_calls.push(format!("open_confirm {channel_id}"));
        Ok(())
    }

    fn on_chan_close_init(
        &mut self,
        _ctx: &mut Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), MiddlewareError> {
        Err(MiddlewareError::App {
            description: "transfer channels cannot be closed by users".to_string(),
        })
    }

    fn on_chan_close_confirm(
        &mut self,
        _ctx: &mut Ctx,
        _port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(), MiddlewareError> {
        self.handshake_calls.push(format!("close_confirm {channel_id}"));
        Ok(())
    }

    fn on_recv_packet(
        &mut self,
        _ctx: &mut Ctx,
        packet: &Packet,
        _relayer: &Signer,
    ) -> Option<Acknowledgement> {
        if FungibleTokenPacketData::decode(&packet.data).is_none() {
            return Some(dummy_error_ack(
                "cannot unmarshal ICS-20 transfer packet data",
            ));
        }

        match &self.recv_outcome {
            RecvOutcome::Success => {
                self.received.push(packet.clone());
                Some(dummy_success_ack())
            }
            RecvOutcome::Error(message) => Some(dummy_error_ack(message)),
            RecvOutcome::Async => {
                self.received.push(packet.clone());
                None
            }
        }
    }

    fn on_acknowledgement_packet(
        &mut self,
        _ctx: &mut Ctx,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> Result<(), MiddlewareError> {
        self.callback_result()?;
        self.acknowledged
            .push((packet.clone(), acknowledgement.clone()));
        Ok(())
    }

    fn on_timeout_packet(
        &mut self,
        _ctx: &mut Ctx,
        packet: &Packet,
        _relayer: &Signer,
    ) -> Result<(), MiddlewareError> {
        self.callback_result()?;
        self.timed_out.push(packet.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{dummy_account, encode_transfer_data, PacketConfig, TransferDataConfig};

    fn transfer_packet() -> Packet {
        let data = TransferDataConfig::builder().build();
        PacketConfig::builder()
            .data(encode_transfer_data(&data))
            .build()
    }

    #[test]
    fn credits_transfers_and_answers_success() {
        let mut app = MockTransferModule::default();

        let ack = app.on_recv_packet(&mut (), &transfer_packet(), &dummy_account(0));

        assert_eq!(ack, Some(dummy_success_ack()));
        assert_eq!(app.credited_transfers().len(), 1);
    }

    #[test]
    fn rejects_non_transfer_data() {
        let mut app = MockTransferModule::default();
        let packet: Packet = PacketConfig::builder().data(b"\x01".to_vec()).build();

        let ack = app
            .on_recv_packet(&mut (), &packet, &dummy_account(0))
            .unwrap();

        assert!(!ack.is_successful());
        assert!(app.received.is_empty());
    }

    #[test]
    fn error_outcome_credits_nothing() {
        let mut app =
            MockTransferModule::default().with_recv_outcome(RecvOutcome::Error("no".to_string()));

        let ack = app
            .on_recv_packet(&mut (), &transfer_packet(), &dummy_account(0))
            .unwrap();

        assert_eq!(ack.as_bytes(), br#"{"error":"no"}"#);
        assert!(app.credited_transfers().is_empty());
    }
}
