//! Hex text helpers shared by identifiers, quantities and JSON shapes.

use crate::error::Result;

/// Strip an optional `0x`/`0X` prefix.
pub fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Lowercase, `0x`-prefixed hex.
pub fn encode_prefixed(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode hex text with or without the `0x` prefix.
pub fn decode_prefixed(s: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(strip_prefix(s))?)
}

/// serde adapter: `Vec<u8>` as `0x` hex text.
pub mod bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::encode_prefixed(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::decode_prefixed(&s).map_err(serde::de::Error::custom)
    }
}

/// serde adapter: `u64` as a hex quantity (`0x1a`), accepting decimal
/// strings and JSON numbers on input.
pub mod u64_hex {
    use crate::quantity::Quantity;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:#x}", value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let q = Quantity::deserialize(deserializer)?;
        q.to_u64()
            .ok_or_else(|| serde::de::Error::custom(format!("value out of u64 range: {}", q)))
    }
}
