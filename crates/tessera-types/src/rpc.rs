//! JSON-RPC document shapes that are not blocks or receipts.
//!
//! Field names follow the node's JSON-RPC wire names. Rendering to text is
//! fallible and reports serializer failures instead of hiding them.

use crate::address::Address;
use crate::config::TxDefaults;
use crate::error::{Result, TypesError};
use crate::hash::Hash;
use crate::hexutil;
use crate::quantity::Quantity;
use crate::transaction::Transaction;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// JSON text rendering for RPC shapes.
pub trait JsonText: Serialize {
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Result of `eth_syncing`: `false`, or the sync progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncStatus {
    pub syncing: bool,
    pub starting_block: Quantity,
    pub current_block: Quantity,
    pub highest_block: Quantity,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SyncStatusWire {
    Idle(bool),
    #[serde(rename_all = "camelCase")]
    Progress {
        starting_block: Quantity,
        current_block: Quantity,
        highest_block: Quantity,
    },
}

impl Serialize for SyncStatus {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !self.syncing {
            return SyncStatusWire::Idle(false).serialize(serializer);
        }
        SyncStatusWire::Progress {
            starting_block: self.starting_block.clone(),
            current_block: self.current_block.clone(),
            highest_block: self.highest_block.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SyncStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match SyncStatusWire::deserialize(deserializer)? {
            SyncStatusWire::Idle(true) => Err(serde::de::Error::custom(
                "sync status `true` carries no progress",
            )),
            SyncStatusWire::Idle(false) => Ok(SyncStatus::default()),
            SyncStatusWire::Progress {
                starting_block,
                current_block,
                highest_block,
            } => Ok(SyncStatus {
                syncing: true,
                starting_block,
                current_block,
                highest_block,
            }),
        }
    }
}

impl JsonText for SyncStatus {}

/// Parameters of `eth_sendTransaction` / `eth_call`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    /// `None` for contract creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<Quantity>,
    #[serde(default, alias = "gasprice", skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,
    #[serde(default, with = "hexutil::bytes", skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
}

impl TransactionRequest {
    /// Build an unsigned transaction, filling unset gas fields from
    /// `defaults`. An unset value stays zero.
    pub fn to_transaction(&self, nonce: u64, defaults: &TxDefaults) -> Result<Transaction> {
        let gas_limit = match &self.gas {
            Some(gas) => gas
                .to_u64()
                .ok_or_else(|| TypesError::InvalidQuantity(format!("gas out of range: {}", gas)))?,
            None => defaults.gas_limit,
        };
        let gas_price = self
            .gas_price
            .clone()
            .unwrap_or_else(|| defaults.gas_price.clone());

        Ok(Transaction::new(
            nonce,
            self.to,
            self.value.clone(),
            gas_limit,
            Some(gas_price),
            &self.data,
        ))
    }
}

impl JsonText for TransactionRequest {}

/// A transaction as reported by the node (`eth_getTransactionByHash`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    pub hash: Hash,
    pub nonce: Quantity,
    /// `None` while pending
    #[serde(default)]
    pub block_hash: Option<Hash>,
    #[serde(default)]
    pub block_number: Option<Quantity>,
    #[serde(default)]
    pub transaction_index: Option<Quantity>,
    pub from: Address,
    /// `None` for contract creation
    #[serde(default)]
    pub to: Option<Address>,
    pub gas: Quantity,
    #[serde(alias = "gasprice")]
    pub gas_price: Quantity,
    pub value: Quantity,
    #[serde(with = "hexutil::bytes")]
    pub input: Vec<u8>,
}

impl RpcTransaction {
    pub fn is_pending(&self) -> bool {
        self.block_hash.is_none()
    }
}

impl JsonText for RpcTransaction {}
