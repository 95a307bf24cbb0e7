use crate::address::Address;
use crate::hash::Hash;
use crate::hexutil;
use crate::quantity::Quantity;
use crate::rpc::JsonText;
use serde::{Deserialize, Serialize};

/// A block as reported by `eth_getBlockByHash` with transaction hashes only.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// `None` for a pending block
    #[serde(default)]
    pub number: Option<Quantity>,
    /// `None` for a pending block
    #[serde(default)]
    pub hash: Option<Hash>,
    pub parent_hash: Hash,
    #[serde(default, with = "hexutil::bytes")]
    pub nonce: Vec<u8>,
    pub sha3_uncles: Hash,
    #[serde(default, with = "hexutil::bytes")]
    pub logs_bloom: Vec<u8>,
    pub transactions_root: Hash,
    pub state_root: Hash,
    pub miner: Address,
    #[serde(default)]
    pub difficulty: Quantity,
    #[serde(default)]
    pub total_difficulty: Quantity,
    #[serde(default, with = "hexutil::bytes")]
    pub extra_data: Vec<u8>,
    #[serde(default)]
    pub size: Quantity,
    pub gas_limit: Quantity,
    pub gas_used: Quantity,
    pub timestamp: Quantity,
    #[serde(default)]
    pub transactions: Vec<Hash>,
    #[serde(default)]
    pub uncles: Vec<Hash>,
}

impl Block {
    pub fn is_pending(&self) -> bool {
        self.hash.is_none()
    }

    pub fn contains_transaction(&self, tx_hash: &Hash) -> bool {
        self.transactions.contains(tx_hash)
    }
}

impl JsonText for Block {}
