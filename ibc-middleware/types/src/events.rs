//! Defines the module events emitted by the middleware layers.

pub use ibc_core_router_types::event::{ModuleEvent, ModuleEventAttribute};
pub use ibc_core_router_types::module::ModuleExtras;

pub const EVENT_TYPE_ACK_ERROR: &str = "ibc-acknowledgement-error";
pub const EVENT_TYPE_TIMEOUT_CALLBACK_ERROR: &str = "ibc-timeout-callback-error";
pub const EVENT_TYPE_COMPOSABILITY: &str = "ibc-composability";

pub const ATTRIBUTE_KEY_ERROR: &str = "error";
pub const ATTRIBUTE_KEY_ERROR_CONTEXT: &str = "error-context";
pub const ATTRIBUTE_KEY_CONTRACT: &str = "contract";
pub const ATTRIBUTE_KEY_MESSAGE: &str = "message";
pub const ATTRIBUTE_KEY_CHANNEL: &str = "channel";
pub const ATTRIBUTE_KEY_SEQUENCE: &str = "sequence";
pub const ATTRIBUTE_KEY_STRATEGY: &str = "strategy";

/// Emitted whenever a received packet is answered with an error
/// acknowledgement.
pub struct AckErrorEvent {
    pub error: String,
    pub contexts: Vec<String>,
}

impl From<AckErrorEvent> for ModuleEvent {
    fn from(ev: AckErrorEvent) -> Self {
        let AckErrorEvent { error, contexts } = ev;
        let mut attributes: Vec<ModuleEventAttribute> = vec![(ATTRIBUTE_KEY_ERROR, error).into()];
        attributes.extend(
            contexts
                .into_iter()
                .map(|context| (ATTRIBUTE_KEY_ERROR_CONTEXT, context).into()),
        );
        Self {
            kind: EVENT_TYPE_ACK_ERROR.to_string(),
            attributes,
        }
    }
}

/// Emitted when notifying a callback contract about a timed-out packet fails.
pub struct TimeoutCallbackErrorEvent {
    pub contract: String,
    pub message: String,
    pub error: String,
}

impl From<TimeoutCallbackErrorEvent> for ModuleEvent {
    fn from(ev: TimeoutCallbackErrorEvent) -> Self {
        let TimeoutCallbackErrorEvent {
            contract,
            message,
            error,
        } = ev;
        Self {
            kind: EVENT_TYPE_TIMEOUT_CALLBACK_ERROR.to_string(),
            attributes: vec![
                (ATTRIBUTE_KEY_CONTRACT, contract).into(),
                (ATTRIBUTE_KEY_MESSAGE, message).into(),
                (ATTRIBUTE_KEY_ERROR, error).into(),
            ],
        }
    }
}

/// Emitted when a gateway payload is translated, naming the routing
/// strategy that was picked.
pub struct ComposabilityEvent {
    pub strategy: String,
    pub channel: String,
    pub sequence: u64,
}

impl From<ComposabilityEvent> for ModuleEvent {
    fn from(ev: ComposabilityEvent) -> Self {
        Self {
            kind: EVENT_TYPE_COMPOSABILITY.to_string(),
            attributes: vec![
                (ATTRIBUTE_KEY_STRATEGY, ev.strategy).into(),
                (ATTRIBUTE_KEY_CHANNEL, ev.channel).into(),
                (ATTRIBUTE_KEY_SEQUENCE, ev.sequence).into(),
            ],
        }
    }
}
