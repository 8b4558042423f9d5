//! Defines the error types shared across the middleware layers.

use displaydoc::Display;

/// Hard failures returned from channel callbacks and ICS4 methods.
///
/// Unlike an error acknowledgement, returning one of these aborts the
/// surrounding transaction.
#[derive(Debug, Display)]
pub enum MiddlewareError {
    /// channel error: `{description}`
    Channel { description: String },
    /// application error: `{description}`
    App { description: String },
    /// wasm hooks error: `{description}`
    Hooks { description: String },
    /// composability error: `{description}`
    Composability { description: String },
    /// contract error: `{0}`
    Contract(ContractError),
    /// empty acknowledgement
    EmptyAcknowledgement,
    /// empty acknowledgement status not allowed
    EmptyAcknowledgementStatus,
}

impl std::error::Error for MiddlewareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Contract(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContractError> for MiddlewareError {
    fn from(err: ContractError) -> MiddlewareError {
        Self::Contract(err)
    }
}

/// Failures reported by the contract execution engine.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum ContractError {
    /// contract `{contract}` not found
    NotFound { contract: String },
    /// contract `{contract}` failed to execute: `{reason}`
    Execution { contract: String, reason: String },
    /// contract `{contract}` failed to answer query: `{reason}`
    Query { contract: String, reason: String },
    /// contract `{contract}` rejected privileged call: `{reason}`
    Sudo { contract: String, reason: String },
}

impl std::error::Error for ContractError {}
