use thiserror::Error;

/// Result alias used across tessera-types.
pub type Result<T> = std::result::Result<T, TypesError>;

/// Errors that can occur in type operations.
///
/// Construction of identifiers and transactions never fails; these cover
/// parsing, decoding, rendering and the encoding sink.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid hash length: expected 32, got {0}")]
    InvalidHashLength(usize),

    #[error("Invalid address length: expected 20, got {0}")]
    InvalidAddressLength(usize),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("RLP decode error: {0}")]
    Rlp(#[from] alloy_rlp::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Signer error: {0}")]
    Signer(String),
}

impl From<hex::FromHexError> for TypesError {
    fn from(e: hex::FromHexError) -> Self {
        TypesError::InvalidHex(e.to_string())
    }
}

impl From<toml::de::Error> for TypesError {
    fn from(e: toml::de::Error) -> Self {
        TypesError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for TypesError {
    fn from(e: toml::ser::Error) -> Self {
        TypesError::Config(e.to_string())
    }
}
