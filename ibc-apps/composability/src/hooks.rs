//! Registration of the composability middleware into the hook registries.

use ibc_middleware_core::context::{ComposabilityContext, ContractKeeper, MiddlewareContext};
use ibc_middleware_core::hooks::{Ics4Hooks, ModuleHooks};

use crate::handler;
use crate::params::ComposabilityParams;

/// The composability middleware.
///
/// It sits above the wasm hooks on the receive side, and right above the
/// channel keeper on the ICS4 side so that acknowledgements written by the
/// layers below it reach the channel with the original packet data.
#[derive(Clone, Debug, Default)]
pub struct Composability {
    params: ComposabilityParams,
}

impl Composability {
    pub fn new(params: ComposabilityParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ComposabilityParams {
        &self.params
    }

    /// Adds the receive override to `hooks`.
    pub fn module_hooks<Ctx>(&self, hooks: ModuleHooks<Ctx>) -> ModuleHooks<Ctx>
    where
        Ctx: MiddlewareContext + ContractKeeper + ComposabilityContext + 'static,
    {
        let params = self.params.clone();

        hooks.override_recv_packet(move |app, ctx, args| {
            handler::on_recv_packet(&params, app, ctx, args)
        })
    }

    /// Adds the write acknowledgement override to `hooks`.
    pub fn ics4_hooks<Ctx>(&self, hooks: Ics4Hooks<Ctx>) -> Ics4Hooks<Ctx>
    where
        Ctx: MiddlewareContext + 'static,
    {
        hooks.override_write_acknowledgement(handler::write_acknowledgement::<Ctx>)
    }
}
