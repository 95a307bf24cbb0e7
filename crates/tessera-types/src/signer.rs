//! Boundary to the signing collaborator.
//!
//! Nothing in this crate does elliptic-curve work. A signer produces
//! `(v, r, s)` over a transaction's signing hash, and a recovery backend
//! maps a signed transaction back to the address that signed it.

use crate::address::Address;
use crate::error::Result;
use crate::hash::Hash;
use crate::quantity::Quantity;
use crate::transaction::Transaction;

/// Signature values as stored on a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Signature {
    pub v: Quantity,
    pub r: Quantity,
    pub s: Quantity,
}

impl Signature {
    pub fn new(v: Quantity, r: Quantity, s: Quantity) -> Self {
        Self { v, r, s }
    }

    /// All three components are zero, i.e. the transaction is unsigned.
    pub fn is_empty(&self) -> bool {
        self.v.is_zero() && self.r.is_zero() && self.s.is_zero()
    }
}

/// Produces signatures over signing hashes.
pub trait Signer {
    fn sign(&self, signing_hash: &Hash) -> Result<Signature>;
}

/// Recovers the sender of a signed transaction.
pub trait SenderRecovery {
    fn recover_sender(&self, tx: &Transaction) -> Result<Address>;
}
