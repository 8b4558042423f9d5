use ibc_middleware_core::ics4::Ics4Wrapper;
use ibc_middleware_core::module::IbcModule;
use ibc_middleware_core::store::{PacketCallbackKeeper, TransposedDataKeeper};
use ibc_middleware_testkit::context::{ContractCall, MockContext, MockContract};
use ibc_middleware_testkit::fixtures::{
    dummy_account, dummy_success_ack, encode_transfer_data, PacketConfig, TransferDataConfig,
};
use ibc_middleware_testkit::testapp::{MockChannelKeeper, MockTransferModule, RecvOutcome};
use ibc_middleware_types::acknowledgement::{Acknowledgement, AcknowledgementStatus, ContractAck};
use ibc_middleware_types::capability::ChannelCapability;
use ibc_middleware_types::channel::{Counterparty, Order, Version};
use ibc_middleware_types::events::{EVENT_TYPE_ACK_ERROR, EVENT_TYPE_COMPOSABILITY};
use ibc_middleware_types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_middleware_types::packet::Packet;
use ibc_middleware_types::serializers::decode_base64;
use ibc_middleware_types::transfer::FungibleTokenPacketData;
use ibc_middleware_types::Signer;
use rstest::rstest;
use serde_json::json;
use tests_integration::Stack;

/// Intermediate account of `cosmos1sender` arriving over `channel-0`.
const SENDER_ON_CHANNEL_0: &str =
    "wormhole1d9wa3m5gfzfut69wlaqal6r03vt3sjdgr2g7zk0fex79zqttqdvsse4uk2";

/// Local denomination of `uatom` arriving over `transfer/channel-0`.
const UATOM_ON_CHANNEL_0: &str =
    "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2";

fn routing_contract() -> Signer {
    dummy_account(1)
}

fn callback_contract() -> Signer {
    dummy_account(3)
}

/// A chain whose routing contract serves chain 1 over `channel-7`.
fn chain() -> MockContext {
    MockContext::default()
        .with_contract(
            &routing_contract(),
            MockContract::builder()
                .queries(vec![(
                    json!({"ibc_channel": {"chain_id": 1}}),
                    br#"{"channel":"channel-7"}"#.to_vec(),
                )])
                .build(),
        )
        .with_contract(&callback_contract(), MockContract::default())
        .with_routing_contract(&routing_contract())
}

fn gateway_packet(chain_id: u16) -> Packet {
    let memo = json!({
        "gateway_ibc_token_bridge_payload": {
            "gateway_transfer": {
                "chain": chain_id,
                "recipient": "cmVjaXBpZW50",
                "fee": "0uworm",
                "nonce": 1,
            }
        }
    });
    let data: FungibleTokenPacketData = TransferDataConfig::builder()
        .receiver(routing_contract().to_string())
        .memo(memo.to_string())
        .build();
    PacketConfig::builder()
        .seq_on_a(Sequence::from(12))
        .chan_id_on_a(ChannelId::new(5))
        .chan_id_on_b(ChannelId::new(0))
        .data(encode_transfer_data(&data))
        .build()
}

fn outbound_packet(memo: &str) -> Packet {
    let data: FungibleTokenPacketData = TransferDataConfig::builder()
        .denom("uworm")
        .memo(memo)
        .build();
    PacketConfig::builder()
        .data(encode_transfer_data(&data))
        .build()
}

#[test_log::test]
fn gateway_transfer_without_channel_executes_routing_contract() {
    let mut ctx = chain();
    let mut stack = Stack::default();

    let ack = stack
        .transfer
        .on_recv_packet(&mut ctx, &gateway_packet(2), &dummy_account(0))
        .unwrap();

    assert!(ack.is_successful());
    let AcknowledgementStatus::Success(result) =
        serde_json::from_slice::<AcknowledgementStatus>(ack.as_bytes()).unwrap()
    else {
        panic!("expected a success acknowledgement");
    };
    let ack: ContractAck =
        serde_json::from_slice(&decode_base64(result.as_str()).unwrap()).unwrap();
    assert_eq!(ack.ibc_ack, dummy_success_ack().as_bytes());

    // The funds land on the intermediate account, never on the contract.
    let credited = stack.app().credited_transfers();
    assert_eq!(credited.len(), 1);
    assert_eq!(credited[0].receiver, SENDER_ON_CHANNEL_0);

    let executions = ctx.executions();
    assert_eq!(executions.len(), 1);
    let ContractCall::Execute {
        contract,
        sender,
        funds,
        ..
    } = executions[0]
    else {
        panic!("expected a contract execution");
    };
    assert_eq!(contract, &routing_contract());
    assert_eq!(sender.to_string(), SENDER_ON_CHANNEL_0);
    assert_eq!(funds.len(), 1);
    assert_eq!(funds[0].denom, UATOM_ON_CHANNEL_0);
    assert_eq!(funds[0].amount.to_string(), "100");
    assert_eq!(
        executions[0].msg_json(),
        Some(json!({
            "gateway_convert_and_transfer": {
                "recipient": "cmVjaXBpZW50",
                "chain": 2,
                "fee": "0uworm",
                "nonce": 1,
            }
        }))
    );

    assert_eq!(
        ctx.events_of_kind(EVENT_TYPE_COMPOSABILITY)[0].attributes[0].value,
        "ibc_hooks"
    );
}

#[test_log::test]
fn forwarded_gateway_transfer_is_acknowledged_with_original_data() {
    let mut ctx = chain();
    let mut stack = Stack::new(
        MockTransferModule::default().with_recv_outcome(RecvOutcome::Async),
        MockChannelKeeper::default(),
    );
    let packet = gateway_packet(1);

    let ack = stack
        .transfer
        .on_recv_packet(&mut ctx, &packet, &dummy_account(0));
    assert_eq!(ack, None);

    // The forward memo is not a wasm memo, so nothing was executed.
    assert!(ctx.executions().is_empty());
    let forwarded = stack.app().received[0].clone();
    assert_eq!(
        FungibleTokenPacketData::decode(&forwarded.data).unwrap().memo,
        r#"{"forward":{"receiver":"recipient","port":"transfer","channel":"channel-7","timeout":3600000000000,"retries":0}}"#
    );

    stack
        .channel
        .write_acknowledgement(
            &mut ctx,
            &ChannelCapability::issue(0),
            &forwarded,
            &dummy_success_ack(),
        )
        .unwrap();

    assert_eq!(stack.keeper().written_acks, vec![(packet.clone(), dummy_success_ack())]);
    assert_eq!(
        ctx.get_transposed_data(&packet.chan_id_on_b, &packet.port_id_on_b, packet.seq_on_a),
        None
    );
}

#[test_log::test]
fn malformed_gateway_payload_never_reaches_lower_layers() {
    let mut ctx = chain();
    let mut stack = Stack::default();
    let memo = r#"{"gateway_ibc_token_bridge_payload":{"gateway_transfer":{"chain":1}}}"#;
    let data: FungibleTokenPacketData = TransferDataConfig::builder().memo(memo).build();
    let packet = PacketConfig::builder()
        .data(encode_transfer_data(&data))
        .build();

    let ack = stack
        .transfer
        .on_recv_packet(&mut ctx, &packet, &dummy_account(0))
        .unwrap();

    assert_eq!(ack.as_bytes(), br#"{"error":"invalid gateway payload"}"#);
    assert!(stack.app().received.is_empty());
    assert!(ctx.executions().is_empty());
    assert_eq!(ctx.events_of_kind(EVENT_TYPE_ACK_ERROR).len(), 1);
}

#[test_log::test]
fn outbound_callback_is_registered_and_notified() {
    let mut ctx = chain();
    let mut stack = Stack::default();
    let memo = json!({"ibc_callback": callback_contract().to_string()}).to_string();

    let sequence = stack
        .channel
        .send_packet(&mut ctx, &ChannelCapability::issue(0), &outbound_packet(&memo))
        .unwrap();

    let sent = stack.keeper().last_sent_packet().cloned().unwrap();
    assert_eq!(sent.seq_on_a, sequence);
    assert_eq!(FungibleTokenPacketData::decode(&sent.data).unwrap().memo, "");
    assert_eq!(
        ctx.get_packet_callback(&ChannelId::new(0), sequence),
        Some(callback_contract())
    );

    let ack = Acknowledgement::try_from(br#"{"result":"AQ=="}"#.to_vec()).unwrap();
    stack
        .transfer
        .on_acknowledgement_packet(&mut ctx, &sent, &ack, &dummy_account(0))
        .unwrap();

    assert_eq!(stack.app().acknowledged.len(), 1);
    let sudo = ctx.sudo_calls();
    assert_eq!(sudo.len(), 1);
    assert_eq!(sudo[0].contract(), &callback_contract());
    assert_eq!(ctx.get_packet_callback(&ChannelId::new(0), sequence), None);
}

#[test_log::test]
fn outbound_timeout_notifies_the_callback() {
    let mut ctx = chain();
    let mut stack = Stack::default();
    let memo = json!({"ibc_callback": callback_contract().to_string()}).to_string();
    stack
        .channel
        .send_packet(&mut ctx, &ChannelCapability::issue(0), &outbound_packet(&memo))
        .unwrap();
    let sent = stack.keeper().last_sent_packet().cloned().unwrap();

    stack
        .transfer
        .on_timeout_packet(&mut ctx, &sent, &dummy_account(0))
        .unwrap();

    assert_eq!(stack.app().timed_out, vec![sent]);
    assert_eq!(ctx.sudo_calls().len(), 1);
    assert_eq!(ctx.get_packet_callback(&ChannelId::new(0), Sequence::from(1)), None);
}

#[test_log::test]
fn handshake_reaches_the_transfer_application() {
    let mut ctx = chain();
    let mut stack = Stack::default();
    let channel_id = ChannelId::new(3);

    let version = stack
        .transfer
        .on_chan_open_init(
            &mut ctx,
            Order::Unordered,
            &[ConnectionId::new(0)],
            &PortId::transfer(),
            &channel_id,
            &ChannelCapability::issue(3),
            &Counterparty::new(PortId::transfer(), None),
            &Version::empty(),
        )
        .unwrap();
    assert_eq!(version.as_str(), "ics20-1");

    stack
        .transfer
        .on_chan_open_confirm(&mut ctx, &PortId::transfer(), &channel_id)
        .unwrap();
    assert!(stack
        .transfer
        .on_chan_close_init(&mut ctx, &PortId::transfer(), &channel_id)
        .is_err());

    assert_eq!(
        stack.app().handshake_calls,
        vec!["open_init channel-3".to_string(), "open_confirm channel-3".to_string()]
    );
}

#[test_log::test]
fn app_version_is_read_from_the_channel_keeper() {
    let ctx = chain();
    let keeper = MockChannelKeeper::default().with_channel(
        PortId::transfer(),
        ChannelId::new(0),
        Version::new("ics20-1".to_string()),
    );
    let stack = Stack::new(MockTransferModule::default(), keeper);

    assert_eq!(
        stack
            .channel
            .get_app_version(&ctx, &PortId::transfer(), &ChannelId::new(0)),
        Some(Version::new("ics20-1".to_string()))
    );
    assert_eq!(
        stack
            .channel
            .get_app_version(&ctx, &PortId::transfer(), &ChannelId::new(9)),
        None
    );
}

#[rstest]
#[case::served_chain(1, "forward")]
#[case::unserved_chain(2, "ibc_hooks")]
fn routing_strategy_follows_the_routing_contract(#[case] chain_id: u16, #[case] strategy: &str) {
    let mut ctx = chain();
    let mut stack = Stack::new(
        MockTransferModule::default().with_recv_outcome(RecvOutcome::Async),
        MockChannelKeeper::default(),
    );

    stack
        .transfer
        .on_recv_packet(&mut ctx, &gateway_packet(chain_id), &dummy_account(0));

    let events = ctx.events_of_kind(EVENT_TYPE_COMPOSABILITY);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].attributes[0].value, strategy);
}
