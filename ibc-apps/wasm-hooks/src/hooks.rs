//! Registration of the wasm hooks into the middleware registries.

use ibc_middleware_core::context::{ContractKeeper, MiddlewareContext};
use ibc_middleware_core::hooks::{Ics4Hooks, ModuleHooks};

use crate::config::WasmHooksConfig;
use crate::handler;

/// The wasm hooks middleware.
///
/// It intercepts the receive, acknowledgement and timeout callbacks of the
/// application it wraps, and the send path of the ICS4 wrapper below it.
/// Register both halves when building the stack:
///
/// ```ignore
/// let hooks = WasmHooks::new(WasmHooksConfig::default());
/// let app = IbcMiddleware::new(transfer, hooks.module_hooks(ModuleHooks::new()));
/// let ics4 = Ics4Middleware::new(channel, hooks.ics4_hooks(Ics4Hooks::new()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct WasmHooks {
    config: WasmHooksConfig,
}

impl WasmHooks {
    pub fn new(config: WasmHooksConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WasmHooksConfig {
        &self.config
    }

    /// Adds the receive, acknowledgement and timeout overrides to `hooks`.
    pub fn module_hooks<Ctx>(&self, hooks: ModuleHooks<Ctx>) -> ModuleHooks<Ctx>
    where
        Ctx: MiddlewareContext + ContractKeeper + 'static,
    {
        let recv_config = self.config.clone();
        let ack_config = self.config.clone();
        let timeout_config = self.config.clone();

        hooks
            .override_recv_packet(move |app, ctx, args| {
                handler::on_recv_packet(&recv_config, app, ctx, args)
            })
            .override_acknowledgement_packet(move |app, ctx, args| {
                handler::on_acknowledgement_packet(&ack_config, app, ctx, args)
            })
            .override_timeout_packet(move |app, ctx, args| {
                handler::on_timeout_packet(&timeout_config, app, ctx, args)
            })
    }

    /// Adds the send packet override to `hooks`.
    pub fn ics4_hooks<Ctx>(&self, hooks: Ics4Hooks<Ctx>) -> Ics4Hooks<Ctx>
    where
        Ctx: MiddlewareContext + 'static,
    {
        let config = self.config.clone();

        hooks.override_send_packet(move |next, ctx, args| {
            handler::send_packet(&config, next, ctx, args)
        })
    }
}
