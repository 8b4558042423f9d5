#![allow(dead_code)]

use ibc_app_wasm_hooks::{WasmHooks, WasmHooksConfig};
use ibc_middleware_core::hooks::{Ics4Hooks, ModuleHooks};
use ibc_middleware_core::ics4_middleware::Ics4Middleware;
use ibc_middleware_core::middleware::IbcMiddleware;
use ibc_middleware_testkit::context::MockContext;
use ibc_middleware_testkit::fixtures::{encode_transfer_data, PacketConfig, TransferDataConfig};
use ibc_middleware_testkit::testapp::{MockChannelKeeper, MockTransferModule};
use ibc_middleware_types::identifiers::ChannelId;
use ibc_middleware_types::packet::Packet;
use ibc_middleware_types::transfer::FungibleTokenPacketData;

/// Intermediate account of `cosmos1sender` arriving over `channel-0`.
pub const SENDER_ON_CHANNEL_0: &str =
    "wormhole1d9wa3m5gfzfut69wlaqal6r03vt3sjdgr2g7zk0fex79zqttqdvsse4uk2";

/// Local denomination of `uatom` arriving over `transfer/channel-0`.
pub const UATOM_ON_CHANNEL_0: &str =
    "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2";

pub type HookedTransfer = IbcMiddleware<MockTransferModule, MockContext>;
pub type HookedChannel = Ics4Middleware<MockChannelKeeper, MockContext>;

pub fn hooked_transfer(app: MockTransferModule) -> HookedTransfer {
    let hooks = WasmHooks::new(WasmHooksConfig::default());
    IbcMiddleware::new(app, hooks.module_hooks(ModuleHooks::new()))
}

pub fn hooked_channel(keeper: MockChannelKeeper) -> HookedChannel {
    let hooks = WasmHooks::new(WasmHooksConfig::default());
    Ics4Middleware::new(keeper, hooks.ics4_hooks(Ics4Hooks::new()))
}

/// A packet received over `channel-0` from the counterparty's `channel-5`.
pub fn inbound_packet(data: &FungibleTokenPacketData) -> Packet {
    PacketConfig::builder()
        .chan_id_on_a(ChannelId::new(5))
        .chan_id_on_b(ChannelId::new(0))
        .data(encode_transfer_data(data))
        .build()
}

/// A packet sent from our `channel-0`.
pub fn outbound_packet(memo: &str) -> Packet {
    let data: FungibleTokenPacketData = TransferDataConfig::builder()
        .denom("uworm")
        .memo(memo)
        .build();
    PacketConfig::builder()
        .data(encode_transfer_data(&data))
        .build()
}
