//! Tessera Types - canonical primitives for the Tessera ledger client.
//!
//! This crate provides:
//! - Identifiers: [`Hash`] (32 bytes) and [`Address`] (20 bytes)
//! - [`Quantity`], the arbitrary-precision numeric field
//! - [`Transaction`], with deterministic RLP encoding and memoized
//!   hash / size / sender
//! - JSON-RPC document shapes (blocks, receipts, logs, requests)
//! - The [`Signer`] and [`SenderRecovery`] collaborator boundaries

pub mod address;
pub mod block;
pub mod config;
pub mod error;
pub mod hash;
pub mod hexutil;
pub mod memo;
pub mod quantity;
pub mod receipt;
pub mod rlp;
pub mod rpc;
pub mod signer;
pub mod transaction;

pub use address::Address;
pub use block::Block;
pub use config::TxDefaults;
pub use error::{Result, TypesError};
pub use hash::Hash;
pub use memo::Memo;
pub use quantity::Quantity;
pub use receipt::{Log, Topic, TransactionReceipt};
pub use rpc::{JsonText, RpcTransaction, SyncStatus, TransactionRequest};
pub use signer::{SenderRecovery, Signature, Signer};
pub use transaction::{Transaction, TxField, TX_FIELDS};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Address, Block, Hash, JsonText, Log, Quantity, RpcTransaction, SenderRecovery,
        Signature, Signer, SyncStatus, Topic, Transaction, TransactionReceipt,
        TransactionRequest, TxDefaults, TypesError,
    };
}
