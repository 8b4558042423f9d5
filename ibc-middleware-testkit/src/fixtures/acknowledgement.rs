use ibc_middleware_types::acknowledgement::{Acknowledgement, AcknowledgementStatus, StatusValue};

/// The acknowledgement the mock transfer application answers with: `{"result":"AQ=="}`.
pub fn dummy_success_ack() -> Acknowledgement {
    AcknowledgementStatus::success(
        StatusValue::new("AQ==").expect("constant status value is not empty"),
    )
    .into()
}

/// Returns an error acknowledgement carrying `message`, e.g. `{"error":"insufficient funds"}`.
pub fn dummy_error_ack(message: &str) -> Acknowledgement {
    let value = StatusValue::new(message).expect("error ack message must not be empty");
    AcknowledgementStatus::error(value).into()
}
