use crate::address::Address;
use crate::hash::Hash;
use crate::hexutil;
use crate::quantity::Quantity;
use crate::rpc::JsonText;
use serde::{Deserialize, Serialize};

/// Indexed log topic.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(#[serde(with = "hexutil::bytes")] pub Vec<u8>);

impl Topic {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Hash> for Topic {
    fn from(hash: Hash) -> Self {
        Self(hash.as_bytes().to_vec())
    }
}

/// Event emitted during execution.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    #[serde(default, with = "hexutil::u64_hex")]
    pub log_index: u64,
    /// `None` for pending logs
    #[serde(default)]
    pub block_number: Option<Quantity>,
    pub block_hash: Hash,
    pub transaction_hash: Hash,
    #[serde(default, with = "hexutil::u64_hex")]
    pub transaction_index: u64,
    pub address: Address,
    #[serde(with = "hexutil::bytes")]
    pub data: Vec<u8>,
    pub topics: Vec<Topic>,
}

impl Log {
    /// First topic, the event signature for non-anonymous events
    pub fn signature(&self) -> Option<&Topic> {
        self.topics.first()
    }
}

impl JsonText for Log {}

/// Result of executing a transaction (`eth_getTransactionReceipt`).
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    #[serde(rename = "transactionHash")]
    pub hash: Hash,
    #[serde(with = "hexutil::u64_hex")]
    pub transaction_index: u64,
    pub block_number: Quantity,
    pub block_hash: Hash,
    pub cumulative_gas_used: Quantity,
    pub gas_used: Quantity,
    /// Address of the created contract; `None` unless the transaction
    /// was a contract creation
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    pub fn is_contract_creation(&self) -> bool {
        self.contract_address.is_some()
    }

    /// Logs emitted by `address`
    pub fn logs_from<'a>(&'a self, address: &'a Address) -> impl Iterator<Item = &'a Log> + 'a {
        self.logs.iter().filter(move |log| &log.address == address)
    }
}

impl JsonText for TransactionReceipt {}
