//! Assembles the middleware stack the way a chain wires it:
//!
//! ```text
//! recv:  composability -> wasm hooks -> transfer
//! ics4:  wasm hooks -> composability -> channel keeper
//! ```
//!
//! Composability sits right above the channel keeper on the ICS4 side so the
//! acknowledgements written by everything below it on the receive side are
//! restored to the original packet data.
#![forbid(unsafe_code)]

use ibc_app_composability::{Composability, ComposabilityParams};
use ibc_app_wasm_hooks::{WasmHooks, WasmHooksConfig};
use ibc_middleware_core::hooks::{Ics4Hooks, ModuleHooks};
use ibc_middleware_core::ics4_middleware::Ics4Middleware;
use ibc_middleware_core::middleware::IbcMiddleware;
use ibc_middleware_testkit::context::MockContext;
use ibc_middleware_testkit::testapp::{MockChannelKeeper, MockTransferModule};

pub type HookedTransfer = IbcMiddleware<MockTransferModule, MockContext>;
pub type TransferStack = IbcMiddleware<HookedTransfer, MockContext>;

pub type ComposableChannel = Ics4Middleware<MockChannelKeeper, MockContext>;
pub type ChannelStack = Ics4Middleware<ComposableChannel, MockContext>;

/// Both sides of the middleware stack over the mock transfer application
/// and channel keeper.
pub struct Stack {
    pub transfer: TransferStack,
    pub channel: ChannelStack,
}

impl Stack {
    pub fn new(app: MockTransferModule, keeper: MockChannelKeeper) -> Self {
        let hooks = WasmHooks::new(WasmHooksConfig::default());
        let composability = Composability::new(ComposabilityParams::default());

        let hooked = IbcMiddleware::new(app, hooks.module_hooks(ModuleHooks::new()));
        let transfer = IbcMiddleware::new(hooked, composability.module_hooks(ModuleHooks::new()));

        let composable = Ics4Middleware::new(keeper, composability.ics4_hooks(Ics4Hooks::new()));
        let channel = Ics4Middleware::new(composable, hooks.ics4_hooks(Ics4Hooks::new()));

        Self { transfer, channel }
    }

    /// The transfer application at the bottom of the receive side.
    pub fn app(&self) -> &MockTransferModule {
        self.transfer.app().app()
    }

    /// The channel keeper at the bottom of the ICS4 side.
    pub fn keeper(&self) -> &MockChannelKeeper {
        self.channel.next().next()
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new(MockTransferModule::default(), MockChannelKeeper::default())
    }
}
