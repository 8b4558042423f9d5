//! Defines the wasm hooks error type

use displaydoc::Display;
use ibc_middleware_types::acknowledgement::StatusValue;
use ibc_middleware_types::error::MiddlewareError;

#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum HooksError {
    /// error in wasmhook message validation
    MemoValidation,
    /// bad sender
    BadSender,
    /// cannot marshal the ICS20 packet
    Marshal,
    /// wasm error
    WasmExecution,
    /// cannot create response
    BadResponse,
    /// invalid packet data
    InvalidPacket,
    /// cannot execute contract: `{reason}`
    BadExecutionMsg { reason: String },
    /// ack callback error: `{reason}`
    AckCallback { reason: String },
    /// timeout callback error: `{reason}`
    TimeoutCallback { reason: String },
    /// send packet with callback error: `{reason}`
    SendCallback { reason: String },
}

impl std::error::Error for HooksError {}

impl From<HooksError> for StatusValue {
    fn from(err: HooksError) -> Self {
        StatusValue::from_error(err)
    }
}

impl From<HooksError> for MiddlewareError {
    fn from(err: HooksError) -> Self {
        MiddlewareError::Hooks {
            description: err.to_string(),
        }
    }
}
