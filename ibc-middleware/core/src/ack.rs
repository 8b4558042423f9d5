//! Error acknowledgements shared by the middleware layers.

use core::fmt::Display;

use ibc_middleware_types::acknowledgement::{Acknowledgement, AcknowledgementStatus, StatusValue};
use ibc_middleware_types::events::{AckErrorEvent, ModuleExtras, EVENT_TYPE_ACK_ERROR};
use tracing::error;

use crate::context::MiddlewareContext;

/// Creates an error acknowledgement after emitting an event with the details
/// of the error. Each context is also logged.
///
/// The acknowledgement only carries the error itself; the contexts, which
/// may echo user input, go to the event and the logs.
pub fn emit_error_acknowledgement<Ctx, E>(
    ctx: &mut Ctx,
    err: E,
    contexts: &[String],
) -> Acknowledgement
where
    Ctx: MiddlewareContext + ?Sized,
    E: Display + Into<StatusValue>,
{
    let mut log = Vec::with_capacity(contexts.len());
    for context in contexts {
        error!(module = EVENT_TYPE_ACK_ERROR, error = %err, "error-context: {context}");
        log.push(format!("error-context: {context}"));
    }

    let event = AckErrorEvent {
        error: err.to_string(),
        contexts: contexts.to_vec(),
    };
    ctx.emit_extras(ModuleExtras {
        events: vec![event.into()],
        log,
    });

    AcknowledgementStatus::error(err.into()).into()
}
