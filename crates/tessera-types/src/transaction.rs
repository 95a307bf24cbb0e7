use crate::address::Address;
use crate::error::{Result, TypesError};
use crate::hash::Hash;
use crate::hexutil;
use crate::memo::Memo;
use crate::quantity::Quantity;
use crate::rlp::{RlpDecoder, RlpStream};
use crate::signer::{SenderRecovery, Signature, Signer};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io;

/// Transaction fields in wire order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxField {
    Nonce,
    GasPrice,
    GasLimit,
    Recipient,
    Amount,
    Payload,
    V,
    R,
    S,
}

/// The RLP field-order table. Both the encoder and the decoder walk this
/// list; nothing else decides the layout.
pub const TX_FIELDS: [TxField; 9] = [
    TxField::Nonce,
    TxField::GasPrice,
    TxField::GasLimit,
    TxField::Recipient,
    TxField::Amount,
    TxField::Payload,
    TxField::V,
    TxField::R,
    TxField::S,
];

/// Consensus fields of a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
struct TxData {
    nonce: u64,
    gas_price: Quantity,
    gas_limit: u64,
    /// `None` means contract creation
    recipient: Option<Address>,
    amount: Quantity,
    payload: Vec<u8>,
    v: Quantity,
    r: Quantity,
    s: Quantity,
}

impl TxData {
    fn rlp_stream(&self, with_signature: bool) -> RlpStream {
        let zero = Quantity::zero();
        let mut stream = RlpStream::new();
        for field in TX_FIELDS {
            match field {
                TxField::Nonce => stream.append_u64(self.nonce),
                TxField::GasPrice => stream.append_quantity(&self.gas_price),
                TxField::GasLimit => stream.append_u64(self.gas_limit),
                TxField::Recipient => match &self.recipient {
                    Some(to) => stream.append_bytes(to.as_bytes()),
                    None => stream.append_empty(),
                },
                TxField::Amount => stream.append_quantity(&self.amount),
                TxField::Payload => stream.append_bytes(&self.payload),
                TxField::V if with_signature => stream.append_quantity(&self.v),
                TxField::R if with_signature => stream.append_quantity(&self.r),
                TxField::S if with_signature => stream.append_quantity(&self.s),
                TxField::V | TxField::R | TxField::S => stream.append_quantity(&zero),
            };
        }
        stream
    }

    /// Decode a complete list with no trailing input.
    fn decode_envelope(bytes: &[u8]) -> Result<Self> {
        let mut outer = RlpDecoder::new(bytes);
        let mut items = outer.next_list()?;
        let data = Self::decode(&mut items)?;
        items.finish()?;
        outer.finish()?;
        Ok(data)
    }

    fn decode(items: &mut RlpDecoder<'_>) -> Result<Self> {
        let mut data = TxData::default();
        for field in TX_FIELDS {
            match field {
                TxField::Nonce => data.nonce = items.next_u64()?,
                TxField::GasPrice => data.gas_price = items.next_quantity()?,
                TxField::GasLimit => data.gas_limit = items.next_u64()?,
                TxField::Recipient => {
                    let raw = items.next_bytes()?;
                    data.recipient = match raw.len() {
                        0 => None,
                        Address::LEN => Some(Address::new(raw)),
                        n => return Err(TypesError::InvalidAddressLength(n)),
                    };
                }
                TxField::Amount => data.amount = items.next_quantity()?,
                TxField::Payload => data.payload = items.next_bytes()?.to_vec(),
                TxField::V => data.v = items.next_quantity()?,
                TxField::R => data.r = items.next_quantity()?,
                TxField::S => data.s = items.next_quantity()?,
            }
        }
        Ok(data)
    }
}

/// An immutable ledger transaction.
///
/// Hash, encoded size and sender are memoized on first use. A `Transaction`
/// can be shared across threads without locking; concurrent first calls may
/// compute the same value twice but always observe a complete one.
#[derive(Clone)]
pub struct Transaction {
    data: TxData,
    hash: Memo<Hash>,
    size: Memo<usize>,
    from: Memo<Address>,
}

impl Transaction {
    /// Create a new unsigned transaction.
    ///
    /// `recipient: None` creates a contract. Absent `amount`/`gas_price`
    /// become zero. `payload` is copied; the caller keeps its buffer.
    pub fn new(
        nonce: u64,
        recipient: Option<Address>,
        amount: Option<Quantity>,
        gas_limit: u64,
        gas_price: Option<Quantity>,
        payload: &[u8],
    ) -> Self {
        Self::from_data(TxData {
            nonce,
            gas_price: Quantity::or_zero(gas_price),
            gas_limit,
            recipient,
            amount: Quantity::or_zero(amount),
            payload: payload.to_vec(),
            v: Quantity::zero(),
            r: Quantity::zero(),
            s: Quantity::zero(),
        })
    }

    /// Message call to `to`.
    pub fn call(
        nonce: u64,
        to: Address,
        amount: Option<Quantity>,
        gas_limit: u64,
        gas_price: Option<Quantity>,
        payload: &[u8],
    ) -> Self {
        Self::new(nonce, Some(to), amount, gas_limit, gas_price, payload)
    }

    /// Contract creation with `init_code` as payload.
    pub fn contract_creation(
        nonce: u64,
        amount: Option<Quantity>,
        gas_limit: u64,
        gas_price: Option<Quantity>,
        init_code: &[u8],
    ) -> Self {
        Self::new(nonce, None, amount, gas_limit, gas_price, init_code)
    }

    fn from_data(data: TxData) -> Self {
        Self {
            data,
            hash: Memo::new(),
            size: Memo::new(),
            from: Memo::new(),
        }
    }

    pub fn nonce(&self) -> u64 {
        self.data.nonce
    }

    pub fn gas_price(&self) -> &Quantity {
        &self.data.gas_price
    }

    pub fn gas_limit(&self) -> u64 {
        self.data.gas_limit
    }

    /// Recipient, `None` for contract creation
    pub fn recipient(&self) -> Option<&Address> {
        self.data.recipient.as_ref()
    }

    pub fn amount(&self) -> &Quantity {
        &self.data.amount
    }

    pub fn payload(&self) -> &[u8] {
        &self.data.payload
    }

    pub fn signature(&self) -> Signature {
        Signature::new(self.data.v.clone(), self.data.r.clone(), self.data.s.clone())
    }

    pub fn is_contract_creation(&self) -> bool {
        self.data.recipient.is_none()
    }

    pub fn is_signed(&self) -> bool {
        !self.signature().is_empty()
    }

    /// Copy of this transaction carrying the given signature values.
    ///
    /// Caches are not carried over: hash, size and sender all depend on the
    /// signature.
    pub fn with_signature(&self, signature: Signature) -> Self {
        let mut data = self.data.clone();
        data.v = signature.v;
        data.r = signature.r;
        data.s = signature.s;
        Self::from_data(data)
    }

    /// Sign with an external signer and return the signed copy.
    pub fn sign_with(&self, signer: &dyn Signer) -> Result<Self> {
        let signing_hash = self.signing_hash();
        let signature = signer.sign(&signing_hash)?;
        tracing::debug!(%signing_hash, nonce = self.data.nonce, "transaction signed");
        Ok(self.with_signature(signature))
    }

    /// RLP encoding of all fields, as broadcast.
    pub fn rlp_bytes(&self) -> Vec<u8> {
        self.data.rlp_stream(true).out()
    }

    /// RLP encoding with the signature fields zeroed, as signed.
    pub fn signing_bytes(&self) -> Vec<u8> {
        self.data.rlp_stream(false).out()
    }

    /// Write the broadcast encoding into `w`.
    pub fn encode_rlp<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        self.data.rlp_stream(true).write_to(w)?;
        Ok(())
    }

    /// Hash the signer commits to.
    pub fn signing_hash(&self) -> Hash {
        Hash::keccak256(&self.signing_bytes())
    }

    /// Keccak-256 of the broadcast encoding. Memoized.
    pub fn hash(&self) -> Hash {
        *self.hash.get_or_compute(|| Hash::keccak256(&self.rlp_bytes()))
    }

    /// Length in bytes of the broadcast encoding. Memoized.
    pub fn encoded_size(&self) -> usize {
        *self.size.get_or_compute(|| self.data.rlp_stream(true).encoded_len())
    }

    /// Sender address, recovered once through `recovery` and then memoized.
    ///
    /// The cache belongs to this instance; a later call with a different
    /// backend returns the address already published.
    pub fn sender(&self, recovery: &dyn SenderRecovery) -> Result<Address> {
        self.from
            .get_or_try_compute(|| recovery.recover_sender(self))
            .copied()
    }

    /// Parse broadcast bytes.
    pub fn decode_rlp(bytes: &[u8]) -> Result<Self> {
        match TxData::decode_envelope(bytes) {
            Ok(data) => Ok(Self::from_data(data)),
            Err(e) => {
                tracing::debug!(error = %e, len = bytes.len(), "rejected transaction bytes");
                Err(e)
            }
        }
    }

    /// JSON text of this transaction.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn to_json_view(&self) -> TransactionJson {
        TransactionJson {
            nonce: Quantity::from(self.data.nonce),
            gas_price: self.data.gas_price.clone(),
            gas: Quantity::from(self.data.gas_limit),
            to: self.data.recipient,
            value: self.data.amount.clone(),
            input: self.data.payload.clone(),
            v: self.data.v.clone(),
            r: self.data.r.clone(),
            s: self.data.s.clone(),
            hash: Some(self.hash()),
        }
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Transaction {}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("nonce", &self.data.nonce)
            .field("gas_price", &self.data.gas_price)
            .field("gas_limit", &self.data.gas_limit)
            .field("recipient", &self.data.recipient)
            .field("amount", &self.data.amount)
            .field("payload", &hexutil::encode_prefixed(&self.data.payload))
            .field("v", &self.data.v)
            .field("r", &self.data.r)
            .field("s", &self.data.s)
            .finish()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to = match &self.data.recipient {
            Some(to) => to.to_string(),
            None => "<create>".to_string(),
        };
        write!(
            f,
            "Transaction {{ nonce: {}, to: {}, value: {}, gas: {} }}",
            self.data.nonce, to, self.data.amount, self.data.gas_limit
        )
    }
}

/// JSON shape of a transaction.
///
/// `hash` is never part of the RLP encoding. It is always written; on input
/// it is optional, and when present it must match the hash of the fields.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionJson {
    nonce: Quantity,
    gas_price: Quantity,
    gas: Quantity,
    to: Option<Address>,
    value: Quantity,
    #[serde(with = "hexutil::bytes")]
    input: Vec<u8>,
    v: Quantity,
    r: Quantity,
    s: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hash: Option<Hash>,
}

fn quantity_to_u64(q: &Quantity, field: &str) -> Result<u64> {
    q.to_u64()
        .ok_or_else(|| TypesError::InvalidQuantity(format!("{} out of range: {}", field, q)))
}

impl Serialize for Transaction {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json_view().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = TransactionJson::deserialize(deserializer)?;
        let nonce = quantity_to_u64(&json.nonce, "nonce").map_err(serde::de::Error::custom)?;
        let gas_limit = quantity_to_u64(&json.gas, "gas").map_err(serde::de::Error::custom)?;
        let tx = Self::from_data(TxData {
            nonce,
            gas_price: json.gas_price,
            gas_limit,
            recipient: json.to,
            amount: json.value,
            payload: json.input,
            v: json.v,
            r: json.r,
            s: json.s,
        });
        if let Some(claimed) = json.hash {
            let actual = tx.hash();
            if claimed != actual {
                return Err(serde::de::Error::custom(format!(
                    "hash mismatch: document says {}, fields hash to {}",
                    claimed, actual
                )));
            }
        }
        Ok(tx)
    }
}
