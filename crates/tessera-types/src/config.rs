//! Transaction defaults.
//!
//! Values applied when a [`TransactionRequest`](crate::rpc::TransactionRequest)
//! leaves gas or gas price unset. Loaded from TOML text by the embedding
//! application.

use crate::error::Result;
use crate::quantity::Quantity;
use serde::{Deserialize, Serialize};

/// Gas limit of a plain value transfer.
pub const TRANSFER_GAS: u64 = 21_000;

/// One gwei in wei.
pub const GWEI: u64 = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxDefaults {
    /// Gas limit when the request has none
    pub gas_limit: u64,
    /// Gas price when the request has none
    pub gas_price: Quantity,
}

impl Default for TxDefaults {
    fn default() -> Self {
        Self {
            gas_limit: TRANSFER_GAS,
            gas_price: Quantity::from(GWEI),
        }
    }
}

impl TxDefaults {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
