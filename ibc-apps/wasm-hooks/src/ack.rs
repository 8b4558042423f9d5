//! Construction of the acknowledgements returned for wasm-routed packets.

pub use ibc_middleware_core::ack::emit_error_acknowledgement;
use ibc_middleware_types::acknowledgement::{
    Acknowledgement, AcknowledgementStatus, ContractAck, StatusValue,
};
use ibc_middleware_types::serializers::encode_base64;

use crate::error::HooksError;

/// Wraps the transfer acknowledgement and the contract response into the
/// composite success acknowledgement.
pub fn contract_acknowledgement(
    contract_result: Option<Vec<u8>>,
    ibc_ack: &Acknowledgement,
) -> Result<Acknowledgement, HooksError> {
    let full_ack = ContractAck {
        contract_result,
        ibc_ack: ibc_ack.as_bytes().to_vec(),
    };
    let bytes = serde_json::to_vec(&full_ack).map_err(|_| HooksError::BadResponse)?;
    let value = StatusValue::new(encode_base64(bytes)).map_err(|_| HooksError::BadResponse)?;
    Ok(AcknowledgementStatus::success(value).into())
}

#[cfg(test)]
mod tests {
    use ibc_middleware_testkit::context::MockContext;
    use ibc_middleware_types::acknowledgement::is_json_ack_error;
    use ibc_middleware_types::events::EVENT_TYPE_ACK_ERROR;
    use ibc_middleware_types::serializers::decode_base64;

    use super::*;

    #[test]
    fn error_ack_emits_event_and_logs_contexts() {
        let mut ctx = MockContext::default();

        let ack = emit_error_acknowledgement(
            &mut ctx,
            HooksError::WasmExecution,
            &["contract panicked".to_string()],
        );

        assert_eq!(ack.as_bytes(), br#"{"error":"wasm error"}"#);
        assert!(is_json_ack_error(ack.as_bytes()));

        let events = ctx.events_of_kind(EVENT_TYPE_ACK_ERROR);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].attributes.len(), 2);
        assert_eq!(events[0].attributes[1].value, "contract panicked");
        assert_eq!(ctx.logs(), ["error-context: contract panicked"]);
    }

    #[test]
    fn contract_ack_wraps_both_results() {
        let ibc_ack = Acknowledgement::try_from(br#"{"result":"AQ=="}"#.to_vec()).unwrap();

        let ack = contract_acknowledgement(Some(b"done".to_vec()), &ibc_ack).unwrap();

        let status: AcknowledgementStatus = serde_json::from_slice(ack.as_bytes()).unwrap();
        let AcknowledgementStatus::Success(value) = status else {
            panic!("expected a success acknowledgement");
        };
        let inner: ContractAck =
            serde_json::from_slice(&decode_base64(value.as_str()).unwrap()).unwrap();
        assert_eq!(inner.contract_result, Some(b"done".to_vec()));
        assert_eq!(inner.ibc_ack, ibc_ack.as_bytes().to_vec());
    }
}
