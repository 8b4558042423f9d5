//! Defines acknowledgement types returned by the receive path.

use core::fmt::{Display, Error as FmtError, Formatter};

use derive_more::Into;
use serde::{Deserialize, Serialize};

use crate::error::MiddlewareError;
use crate::serializers::{base64_bytes, base64_opt_bytes};

/// A generic Acknowledgement type that modules may interpret as they like.
///
/// NOTE: An acknowledgement cannot be empty.
#[derive(Clone, Debug, PartialEq, Eq, Into)]
pub struct Acknowledgement(Vec<u8>);

impl Acknowledgement {
    // Returns the data as a slice of bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Returns false only for acknowledgements that decode as a JSON error
    /// acknowledgement, i.e. `{"error": "<non-empty>"}`.
    pub fn is_successful(&self) -> bool {
        !is_json_ack_error(&self.0)
    }
}

impl AsRef<[u8]> for Acknowledgement {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl TryFrom<Vec<u8>> for Acknowledgement {
    type Error = MiddlewareError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            Err(MiddlewareError::EmptyAcknowledgement)
        } else {
            Ok(Self(bytes))
        }
    }
}

/// Defines a convenience type for constructing an [`Acknowledgement`] based
/// on the success or failure of processing a received packet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcknowledgementStatus {
    /// Successful Acknowledgement
    /// e.g. `{"result":"AQ=="}`
    #[serde(rename = "result")]
    Success(StatusValue),
    /// Error Acknowledgement
    /// e.g. `{"error":"wasm error"}`
    #[serde(rename = "error")]
    Error(StatusValue),
}

/// A wrapper type that guards variants of [`AcknowledgementStatus`] against
/// being constructed with an empty value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusValue(String);

/// Reported in place of an error whose message renders empty.
pub const UNKNOWN_ERROR: &str = "unknown error";

impl StatusValue {
    /// Constructs a new instance of `StatusValue` if the given value is not empty.
    pub fn new(value: impl ToString) -> Result<Self, MiddlewareError> {
        let value = value.to_string();

        if value.is_empty() {
            return Err(MiddlewareError::EmptyAcknowledgementStatus);
        }

        Ok(Self(value))
    }

    /// Builds the value of an error acknowledgement from an error's message.
    pub fn from_error(err: impl Display) -> Self {
        Self::new(err).unwrap_or_else(|_| Self(UNKNOWN_ERROR.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StatusValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{status_value}", status_value = self.0)
    }
}

impl AcknowledgementStatus {
    /// Creates a success acknowledgement status with the given value.
    pub fn success(value: StatusValue) -> Self {
        Self::Success(value)
    }

    /// Creates an error acknowledgement status with the given value.
    pub fn error(value: StatusValue) -> Self {
        Self::Error(value)
    }

    /// Returns true if the acknowledgement status is successful.
    pub fn is_successful(&self) -> bool {
        matches!(self, AcknowledgementStatus::Success(_))
    }
}

impl Display for AcknowledgementStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            AcknowledgementStatus::Success(v) | AcknowledgementStatus::Error(v) => write!(f, "{v}"),
        }
    }
}

/// Converts an acknowledgement result into a vector of bytes.
impl From<AcknowledgementStatus> for Vec<u8> {
    fn from(ack: AcknowledgementStatus) -> Self {
        // WARNING: Make sure all branches always return a non-empty vector.
        // Otherwise, the conversion to `Acknowledgement` will not hold its invariant.
        let (key, value) = match ack {
            AcknowledgementStatus::Success(v) => ("result", v.0),
            AcknowledgementStatus::Error(v) => ("error", v.0),
        };
        let value = serde_json::Value::String(value);
        format!(r#"{{"{key}":{value}}}"#).into_bytes()
    }
}

impl From<AcknowledgementStatus> for Acknowledgement {
    fn from(ack_status: AcknowledgementStatus) -> Self {
        Self(ack_status.into())
    }
}

#[derive(Deserialize)]
struct ErrorAck {
    error: String,
}

/// Checks whether raw acknowledgement bytes carry a JSON error
/// acknowledgement with a non-empty message.
pub fn is_json_ack_error(acknowledgement: &[u8]) -> bool {
    serde_json::from_slice::<ErrorAck>(acknowledgement)
        .map(|ack| !ack.error.is_empty())
        .unwrap_or(false)
}

/// The composite result returned for packets routed into a contract: the
/// contract's response data next to the transfer application's own
/// acknowledgement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAck {
    #[serde(with = "base64_opt_bytes")]
    pub contract_result: Option<Vec<u8>>,
    #[serde(with = "base64_bytes")]
    pub ibc_ack: Vec<u8>,
}
