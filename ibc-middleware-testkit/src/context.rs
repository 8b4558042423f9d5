//! An in-memory host for running middleware stacks in tests.

use std::collections::BTreeMap;

use ibc_middleware_core::context::{ComposabilityContext, ContractKeeper, MiddlewareContext};
use ibc_middleware_types::contract::{Coin, ContractResponse};
use ibc_middleware_types::error::ContractError;
use ibc_middleware_types::events::ModuleEvent;
use ibc_middleware_types::Signer;
use serde_json::Value;
use tracing::debug;
use typed_builder::TypedBuilder;

pub type MockStore = BTreeMap<Vec<u8>, Vec<u8>>;

/// The scripted behaviour of a contract deployed on the mock host.
///
/// Executions and privileged calls answer with the configured result.
/// Queries are matched against `queries` by JSON value, so key order and
/// whitespace of the incoming message do not matter.
#[derive(Clone, Debug, TypedBuilder)]
pub struct MockContract {
    #[builder(default = Ok(ContractResponse::default()))]
    pub execute: Result<ContractResponse, String>,
    #[builder(default = Ok(ContractResponse::default()))]
    pub sudo: Result<ContractResponse, String>,
    #[builder(default)]
    pub queries: Vec<(Value, Vec<u8>)>,
}

impl Default for MockContract {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A call that reached the contract engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractCall {
    Execute {
        contract: Signer,
        sender: Signer,
        msg: Vec<u8>,
        funds: Vec<Coin>,
    },
    Sudo {
        contract: Signer,
        msg: Vec<u8>,
    },
}

impl ContractCall {
    pub fn contract(&self) -> &Signer {
        match self {
            Self::Execute { contract, .. } | Self::Sudo { contract, .. } => contract,
        }
    }

    /// The call's message, parsed as JSON.
    pub fn msg_json(&self) -> Option<Value> {
        let msg = match self {
            Self::Execute { msg, .. } | Self::Sudo { msg, .. } => msg,
        };
        serde_json::from_slice(msg).ok()
    }
}

/// A host context implementing every service the middleware layers need.
///
/// All fields are public so tests can seed state and inspect what the
/// middleware left behind.
#[derive(Debug, Default)]
pub struct MockContext {
    pub store: MockStore,
    pub events: Vec<ModuleEvent>,
    pub logs: Vec<String>,
    pub contracts: BTreeMap<String, MockContract>,
    pub contract_calls: Vec<ContractCall>,
    pub routing_contract: Option<Signer>,
}

impl MockContext {
    pub fn with_contract(mut self, address: &Signer, contract: MockContract) -> Self {
        self.contracts.insert(address.to_string(), contract);
        self
    }

    pub fn with_routing_contract(mut self, address: &Signer) -> Self {
        self.routing_contract = Some(address.clone());
        self
    }

    pub fn events(&self) -> &[ModuleEvent] {
        &self.events
    }

    pub fn events_of_kind(&self, kind: &str) -> Vec<&ModuleEvent> {
        self.events.iter().filter(|e| e.kind == kind).collect()
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn contract_calls(&self) -> &[ContractCall] {
        &self.contract_calls
    }

    pub fn executions(&self) -> Vec<&ContractCall> {
        self.contract_calls
            .iter()
            .filter(|call| matches!(call, ContractCall::Execute { .. }))
            .collect()
    }

    pub fn sudo_calls(&self) -> Vec<&ContractCall> {
        self.contract_calls
            .iter()
            .filter(|call| matches!(call, ContractCall::Sudo { .. }))
            .collect()
    }

    fn contract(&self, address: &Signer) -> Result<&MockContract, ContractError> {
        self.contracts
            .get(&address.to_string())
            .ok_or_else(|| ContractError::NotFound {
                contract: address.to_string(),
            })
    }
}

impl MiddlewareContext for MockContext {
    type Store = MockStore;

    fn store(&self) -> &Self::Store {
        &self.store
    }

    fn store_mut(&mut self) -> &mut Self::Store {
        &mut self.store
    }

    fn emit_module_event(&mut self, event: ModuleEvent) {
        self.events.push(event);
    }

    fn log_message(&mut self, message: String) {
        self.logs.push(message);
    }
}

impl ContractKeeper for MockContext {
    fn execute_contract(
        &mut self,
        contract: &Signer,
        sender: &Signer,
        msg: &[u8],
        funds: &[Coin],
    ) -> Result<ContractResponse, ContractError> {
        let response = self.contract(contract)?.execute.clone();
        debug!(%contract, %sender, "mock contract executed");

        // Failed executions are rolled back by the engine and leave no trace.
        let response = response.map_err(|reason| ContractError::Execution {
            contract: contract.to_string(),
            reason,
        })?;

        self.contract_calls.push(ContractCall::Execute {
            contract: contract.clone(),
            sender: sender.clone(),
            msg: msg.to_vec(),
            funds: funds.to_vec(),
        });

        Ok(response)
    }

    fn sudo_contract(
        &mut self,
        contract: &Signer,
        msg: &[u8],
    ) -> Result<ContractResponse, ContractError> {
        let response = self.contract(contract)?.sudo.clone();

        self.contract_calls.push(ContractCall::Sudo {
            contract: contract.clone(),
            msg: msg.to_vec(),
        });

        response.map_err(|reason| ContractError::Sudo {
            contract: contract.to_string(),
            reason,
        })
    }

    fn query_contract(&self, contract: &Signer, msg: &[u8]) -> Result<Vec<u8>, ContractError> {
        let query_error = |reason: String| ContractError::Query {
            contract: contract.to_string(),
            reason,
        };

        let scripted = self.contract(contract)?;
        let msg: Value = serde_json::from_slice(msg).map_err(|e| query_error(e.to_string()))?;

        scripted
            .queries
            .iter()
            .find(|(query, _)| *query == msg)
            .map(|(_, response)| response.clone())
            .ok_or_else(|| query_error(format!("unknown query: {msg}")))
    }
}

impl ComposabilityContext for MockContext {
    fn routing_contract(&self) -> Option<Signer> {
        self.routing_contract.clone()
    }
}
