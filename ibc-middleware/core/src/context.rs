//! Host services available to the middleware while it processes a packet.

use std::collections::BTreeMap;

use ibc_middleware_types::contract::{Coin, ContractResponse};
use ibc_middleware_types::error::ContractError;
use ibc_middleware_types::events::{ModuleEvent, ModuleExtras};
use ibc_middleware_types::Signer;

/// Transactional key/value storage scoped to the current execution.
///
/// Writes are visible to later reads within the same execution. Whether
/// they survive is decided by the host when the transaction ends.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    fn delete(&mut self, key: &[u8]);
}

impl KvStore for BTreeMap<Vec<u8>, Vec<u8>> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        BTreeMap::get(self, key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.remove(key);
    }
}

/// Store access plus the event and log sinks of the host.
pub trait MiddlewareContext {
    type Store: KvStore;

    fn store(&self) -> &Self::Store;

    fn store_mut(&mut self) -> &mut Self::Store;

    /// Emits a module event to the host's event manager.
    fn emit_module_event(&mut self, event: ModuleEvent);

    /// Logs a message through the host's logger.
    fn log_message(&mut self, message: String);

    /// Emits all events and logs a callback produced.
    fn emit_extras(&mut self, extras: ModuleExtras) {
        let ModuleExtras { events, log } = extras;
        events
            .into_iter()
            .for_each(|event| self.emit_module_event(event));
        log.into_iter()
            .for_each(|message| self.log_message(message));
    }
}

/// Access to the contract execution engine.
///
/// Calls run synchronously inside the current transaction.
pub trait ContractKeeper {
    fn execute_contract(
        &mut self,
        contract: &Signer,
        sender: &Signer,
        msg: &[u8],
        funds: &[Coin],
    ) -> Result<ContractResponse, ContractError>;

    /// Privileged entry point, used to deliver packet lifecycle notifications.
    fn sudo_contract(
        &mut self,
        contract: &Signer,
        msg: &[u8],
    ) -> Result<ContractResponse, ContractError>;

    fn query_contract(&self, contract: &Signer, msg: &[u8]) -> Result<Vec<u8>, ContractError>;
}

/// Host configuration consulted when translating gateway payloads.
pub trait ComposabilityContext {
    /// The contract answering which local channel serves a given chain.
    fn routing_contract(&self) -> Option<Signer>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn btree_store_reads_its_own_writes() {
        let mut store: BTreeMap<Vec<u8>, Vec<u8>> = BTreeMap::new();
        KvStore::set(&mut store, b"k".to_vec(), b"v".to_vec());
        assert_eq!(KvStore::get(&store, b"k"), Some(b"v".to_vec()));

        KvStore::set(&mut store, b"k".to_vec(), b"w".to_vec());
        assert_eq!(KvStore::get(&store, b"k"), Some(b"w".to_vec()));

        KvStore::delete(&mut store, b"k");
        assert_eq!(KvStore::get(&store, b"k"), None);
    }
}
