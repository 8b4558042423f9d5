//! Defines the composability error type

use displaydoc::Display;
use ibc_middleware_types::acknowledgement::StatusValue;
use ibc_middleware_types::error::MiddlewareError;

#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum ComposabilityError {
    /// invalid gateway payload
    InvalidPayload,
    /// routing query failed: `{reason}`
    RoutingQuery { reason: String },
    /// routing contract is not configured
    MissingRoutingContract,
    /// cannot marshal the translated packet
    Marshal,
}

impl std::error::Error for ComposabilityError {}

impl From<ComposabilityError> for StatusValue {
    fn from(err: ComposabilityError) -> Self {
        StatusValue::from_error(err)
    }
}

impl From<ComposabilityError> for MiddlewareError {
    fn from(err: ComposabilityError) -> Self {
        MiddlewareError::Composability {
            description: err.to_string(),
        }
    }
}
