use crate::error::TypesError;
use crate::hexutil;
use num_bigint::{BigInt, BigUint};
use num_traits::{ToPrimitive, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Arbitrary-precision numeric field (gas price, amount, signature values).
///
/// The wire encoding is an unsigned big-endian integer, so a quantity is
/// never negative: signed inputs are checked where they enter (`FromStr`,
/// serde, `TryFrom<BigInt>`) and rejected rather than folded onto their
/// magnitude.
///
/// A constructed [`Transaction`](crate::Transaction) never holds an absent
/// quantity: optional inputs are replaced with [`Quantity::zero`] through
/// [`Quantity::or_zero`] so encoding only ever looks at values.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Quantity(BigUint);

impl Quantity {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Absent becomes a fresh zero; present values are taken as-is.
    pub fn or_zero(value: Option<Quantity>) -> Self {
        value.unwrap_or_else(Self::zero)
    }

    pub fn from_biguint(value: BigUint) -> Self {
        Self(value)
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_biguint(self) -> BigUint {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Value as `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    /// Minimal big-endian bytes; zero yields no bytes.
    pub fn to_minimal_be_bytes(&self) -> Vec<u8> {
        if self.0.is_zero() {
            return Vec::new();
        }
        self.0.to_bytes_be()
    }

    /// Parse a big-endian unsigned integer, as found in RLP payloads.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    /// Quantity text: `0x`-prefixed lowercase hex, `0x0` for zero.
    pub fn to_hex(&self) -> String {
        format!("0x{}", self.0.to_str_radix(16))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quantity({})", self.0)
    }
}

impl fmt::LowerHex for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Quantity {
    type Err = TypesError;

    /// Accepts decimal (`1000`) or hex (`0x3e8`). Signs are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('-') {
            return Err(TypesError::InvalidQuantity(format!("negative: {}", s)));
        }

        let digits = hexutil::strip_prefix(trimmed);
        let radix = if digits.len() != trimmed.len() { 16 } else { 10 };

        BigUint::parse_bytes(digits.as_bytes(), radix)
            .filter(|_| !digits.starts_with(['+', '-']))
            .map(Self)
            .ok_or_else(|| TypesError::InvalidQuantity(s.to_string()))
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for Quantity {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<BigUint> for Quantity {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl TryFrom<BigInt> for Quantity {
    type Error = TypesError;

    fn try_from(value: BigInt) -> Result<Self, Self::Error> {
        value
            .to_biguint()
            .map(Self)
            .ok_or_else(|| TypesError::InvalidQuantity(format!("negative: {}", value)))
    }
}

impl TryFrom<i64> for Quantity {
    type Error = TypesError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_from(BigInt::from(value))
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a decimal/0x-hex string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Quantity, E> {
        Quantity::from_str(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quantity, E> {
        Ok(Quantity::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Quantity, E> {
        Ok(Quantity::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Quantity, E> {
        Quantity::try_from(v).map_err(E::custom)
    }

    // JSON parsers hand integers beyond u64 over as floats.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Quantity, E> {
        Err(E::custom(format!(
            "numeric quantity {} is not an exact integer; pass values above 2^64 as strings",
            v
        )))
    }
}

/// Accepts strings (decimal or `0x` hex, any width) and native integers.
///
/// Bare JSON numbers are limited to the `u64` range: wider values arrive
/// as floats and are rejected with an error asking for the string form.
impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_zero_defaults_absent() {
        assert!(Quantity::or_zero(None).is_zero());
        assert_eq!(
            Quantity::or_zero(Some(Quantity::from(7u64))),
            Quantity::from(7u64)
        );
    }

    #[test]
    fn test_minimal_be_bytes() {
        assert!(Quantity::zero().to_minimal_be_bytes().is_empty());
        assert_eq!(Quantity::from(1u64).to_minimal_be_bytes(), vec![0x01]);
        assert_eq!(Quantity::from(0x80u64).to_minimal_be_bytes(), vec![0x80]);
        assert_eq!(Quantity::from(1000u64).to_minimal_be_bytes(), vec![0x03, 0xe8]);
        assert_eq!(Quantity::from(0x0100u64).to_minimal_be_bytes(), vec![0x01, 0x00]);
    }

    #[test]
    fn test_wider_than_u64() {
        let q = Quantity::from(u128::MAX);
        assert_eq!(q.to_minimal_be_bytes(), vec![0xff; 16]);
        assert_eq!(Quantity::from_be_bytes(&[0xff; 16]), q);
    }

    #[test]
    fn test_parse_decimal_and_hex() {
        assert_eq!("1000".parse::<Quantity>().unwrap(), Quantity::from(1000u64));
        assert_eq!("0x3e8".parse::<Quantity>().unwrap(), Quantity::from(1000u64));
        assert_eq!("0X3E8".parse::<Quantity>().unwrap(), Quantity::from(1000u64));
        assert!("0x".parse::<Quantity>().is_err());
        assert!("ten".parse::<Quantity>().is_err());
        assert!("+5".parse::<Quantity>().is_err());
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!("-5".parse::<Quantity>().is_err());
        assert!("-0x3e8".parse::<Quantity>().is_err());
        assert!(Quantity::try_from(-1i64).is_err());
        assert!(Quantity::try_from(BigInt::from(-1000)).is_err());
        assert_eq!(
            Quantity::try_from(BigInt::from(1000)).unwrap(),
            Quantity::from(1000u64)
        );
        assert_eq!(Quantity::try_from(0i64).unwrap(), Quantity::zero());
    }

    #[test]
    fn test_hex_text() {
        assert_eq!(Quantity::zero().to_hex(), "0x0");
        assert_eq!(Quantity::from(1000u64).to_hex(), "0x3e8");
        assert_eq!(Quantity::from(1000u64).to_string(), "1000");
    }

    #[test]
    fn test_serde() {
        let q = Quantity::from(21000u64);
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, "\"0x5208\"");
        assert_eq!(serde_json::from_str::<Quantity>(&json).unwrap(), q);
        assert_eq!(serde_json::from_str::<Quantity>("21000").unwrap(), q);
        assert_eq!(serde_json::from_str::<Quantity>("\"21000\"").unwrap(), q);
        assert!(serde_json::from_str::<Quantity>("-3").is_err());
        assert!(serde_json::from_str::<Quantity>("\"-0x3\"").is_err());
        assert!(serde_json::from_str::<Quantity>("1.5").is_err());
    }

    #[test]
    fn test_serde_beyond_u64() {
        let wide = Quantity::from(u128::from(u64::MAX) + 1);
        assert_eq!(
            serde_json::from_str::<Quantity>("\"0x10000000000000000\"").unwrap(),
            wide
        );
        assert_eq!(
            serde_json::from_str::<Quantity>("\"18446744073709551616\"").unwrap(),
            wide
        );

        let err = serde_json::from_str::<Quantity>("18446744073709551616").unwrap_err();
        assert!(err.to_string().contains("as strings"), "{}", err);
    }
}
