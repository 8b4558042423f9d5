//! Queries to the routing contract mapping chain ids to local channels.

use core::str::FromStr;

use ibc_middleware_core::context::ContractKeeper;
use ibc_middleware_types::identifiers::ChannelId;
use ibc_middleware_types::Signer;
use serde::{Deserialize, Serialize};

use crate::error::ComposabilityError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingQueryMsg {
    IbcChannel { chain_id: u16 },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChannelResponse {
    pub channel: String,
}

/// Asks `contract` for the local channel serving `chain_id`.
///
/// Any failure only means the chain is not reachable by forwarding; callers
/// fall back to routing through the contract.
pub fn query_routing_channel<Ctx>(
    ctx: &Ctx,
    contract: &Signer,
    chain_id: u16,
) -> Result<ChannelId, ComposabilityError>
where
    Ctx: ContractKeeper + ?Sized,
{
    let query_error = |reason: String| ComposabilityError::RoutingQuery { reason };

    let msg = serde_json::to_vec(&RoutingQueryMsg::IbcChannel { chain_id })
        .map_err(|e| query_error(e.to_string()))?;
    let response = ctx
        .query_contract(contract, &msg)
        .map_err(|e| query_error(e.to_string()))?;
    let ChannelResponse { channel } =
        serde_json::from_slice(&response).map_err(|e| query_error(e.to_string()))?;

    ChannelId::from_str(&channel).map_err(|e| query_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use ibc_middleware_testkit::context::{MockContext, MockContract};
    use ibc_middleware_testkit::fixtures::dummy_account;
    use serde_json::json;

    use super::*;

    fn routing_ctx(response: &[u8]) -> MockContext {
        MockContext::default().with_contract(
            &dummy_account(1),
            MockContract::builder()
                .queries(vec![(
                    json!({"ibc_channel": {"chain_id": 1}}),
                    response.to_vec(),
                )])
                .build(),
        )
    }

    #[test]
    fn resolves_known_chain() {
        let ctx = routing_ctx(br#"{"channel":"channel-7"}"#);

        let channel = query_routing_channel(&ctx, &dummy_account(1), 1).unwrap();

        assert_eq!(channel, ChannelId::new(7));
    }

    #[test]
    fn unknown_chain_is_a_query_error() {
        let ctx = routing_ctx(br#"{"channel":"channel-7"}"#);

        let err = query_routing_channel(&ctx, &dummy_account(1), 2).unwrap_err();

        assert!(matches!(err, ComposabilityError::RoutingQuery { .. }));
    }

    #[test]
    fn invalid_channel_is_a_query_error() {
        let ctx = routing_ctx(br#"{"channel":"not a channel"}"#);

        assert!(query_routing_channel(&ctx, &dummy_account(1), 1).is_err());
    }
}
