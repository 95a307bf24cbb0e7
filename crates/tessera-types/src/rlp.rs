//! Recursive-length-prefix encoding over `alloy-rlp`.
//!
//! `alloy-rlp` supplies headers, byte strings and fixed-width integers.
//! This module adds [`Quantity`] integers and a flat-list builder and
//! cursor, which the transaction field-order table drives item by item.

use crate::error::{Result, TypesError};
use crate::quantity::Quantity;
use alloy_rlp::{BufMut, Decodable, Encodable, Header, EMPTY_STRING_CODE};
use std::io;

/// Append a quantity as a minimal big-endian integer. Zero is the empty
/// string.
pub fn encode_quantity(value: &Quantity, out: &mut dyn BufMut) {
    value.to_minimal_be_bytes().as_slice().encode(out);
}

/// Encoded length of a quantity, header included.
pub fn quantity_length(value: &Quantity) -> usize {
    value.to_minimal_be_bytes().as_slice().length()
}

/// Read a minimal big-endian integer of any width.
pub fn decode_quantity(buf: &mut &[u8]) -> Result<Quantity> {
    let bytes = Header::decode_bytes(buf, false)?;
    if bytes.first() == Some(&0) {
        return Err(alloy_rlp::Error::LeadingZero.into());
    }
    Ok(Quantity::from_be_bytes(bytes))
}

/// Builder for a flat RLP list.
///
/// Items are appended in call order, which makes the caller's sequence of
/// `append_*` calls the field-order table of the encoded structure.
#[derive(Debug, Default, Clone)]
pub struct RlpStream {
    payload: Vec<u8>,
}

impl RlpStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append<E: Encodable + ?Sized>(&mut self, item: &E) -> &mut Self {
        item.encode(&mut self.payload);
        self
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.append(bytes)
    }

    pub fn append_u64(&mut self, value: u64) -> &mut Self {
        self.append(&value)
    }

    pub fn append_quantity(&mut self, value: &Quantity) -> &mut Self {
        encode_quantity(value, &mut self.payload);
        self
    }

    /// Append the empty byte string.
    pub fn append_empty(&mut self) -> &mut Self {
        self.payload.push(EMPTY_STRING_CODE);
        self
    }

    fn header(&self) -> Header {
        Header {
            list: true,
            payload_length: self.payload.len(),
        }
    }

    /// Length of the concatenated items, excluding the list header.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Length of the finished list, header included.
    pub fn encoded_len(&self) -> usize {
        self.header().length() + self.payload.len()
    }

    /// Finish into a single buffer.
    pub fn out(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.header().encode(&mut out);
        out.extend_from_slice(&self.payload);
        out
    }

    /// Write the finished list to `w`. Sink errors are returned as-is.
    pub fn write_to<W: io::Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.out())
    }
}

/// Cursor over a sequence of RLP items.
#[derive(Debug, Clone)]
pub struct RlpDecoder<'a> {
    buf: &'a [u8],
}

impl<'a> RlpDecoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Next item as a byte string.
    pub fn next_bytes(&mut self) -> Result<&'a [u8]> {
        Ok(Header::decode_bytes(&mut self.buf, false)?)
    }

    /// Next item as a list; returns a decoder over its items.
    pub fn next_list(&mut self) -> Result<RlpDecoder<'a>> {
        Ok(RlpDecoder::new(Header::decode_bytes(&mut self.buf, true)?))
    }

    pub fn next_u64(&mut self) -> Result<u64> {
        Ok(u64::decode(&mut self.buf)?)
    }

    pub fn next_quantity(&mut self) -> Result<Quantity> {
        decode_quantity(&mut self.buf)
    }

    /// Fails if items remain.
    pub fn finish(self) -> Result<()> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(TypesError::Rlp(alloy_rlp::Error::Custom("trailing bytes")))
        }
    }
}
