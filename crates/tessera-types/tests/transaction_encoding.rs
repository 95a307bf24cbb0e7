//! Wire-format tests for transaction encoding.
//!
//! Golden vectors are built by hand from the field order and the minimal
//! big-endian integer rule, then cross-checked against alloy-rlp.

use alloy_rlp::{Decodable, Header};
use num_bigint::BigInt;
use std::io;
use tessera_types::{Address, Hash, Quantity, Signature, Transaction, TypesError};

fn reference_call() -> Transaction {
    Transaction::new(
        0,
        Some(Address::from_bytes([0x01; 20])),
        Some(Quantity::from(1000u64)),
        21000,
        Some(Quantity::from(1u64)),
        &[],
    )
}

fn reference_creation() -> Transaction {
    Transaction::new(
        0,
        None,
        Some(Quantity::from(1000u64)),
        21000,
        Some(Quantity::from(1u64)),
        &[],
    )
}

/// nonce, gasPrice, gasLimit, to, value, data, v, r, s
fn golden_call_bytes() -> Vec<u8> {
    let mut expected = vec![
        0xe1, // list, 33 bytes of payload
        0x80, // nonce 0
        0x01, // gas price 1
        0x82, 0x52, 0x08, // gas limit 21000
        0x94, // 20-byte string
    ];
    expected.extend_from_slice(&[0x01; 20]);
    expected.extend_from_slice(&[
        0x82, 0x03, 0xe8, // value 1000
        0x80, // empty payload
        0x80, 0x80, 0x80, // v, r, s
    ]);
    expected
}

#[test]
fn golden_vector_message_call() {
    let tx = reference_call();
    let expected = golden_call_bytes();
    assert_eq!(tx.rlp_bytes(), expected);
    assert_eq!(tx.encoded_size(), 34);
    assert_eq!(tx.hash(), Hash::keccak256(&expected));
}

#[test]
fn golden_vector_contract_creation() {
    let tx = reference_creation();
    let expected = vec![
        0xcdu8, 0x80, 0x01, 0x82, 0x52, 0x08, 0x80, 0x82, 0x03, 0xe8, 0x80, 0x80, 0x80, 0x80,
    ];
    assert_eq!(tx.rlp_bytes(), expected);
    assert_eq!(tx.encoded_size(), 14);
}

#[test]
fn contract_creation_differs_only_in_recipient_span() {
    let call = reference_call().rlp_bytes();
    let create = reference_creation().rlp_bytes();

    // list header, then nonce/gasPrice/gasLimit (5 bytes)
    assert_eq!(&call[1..6], &create[1..6]);
    // recipient: 21 bytes vs the empty string
    assert_eq!(&call[6..27], &[&[0x94u8][..], &[0x01; 20][..]].concat()[..]);
    assert_eq!(create[6], 0x80);
    // everything after the recipient is identical
    assert_eq!(&call[27..], &create[7..]);
}

#[test]
fn absent_recipient_and_zero_address_never_collapse() {
    let create = Transaction::new(0, None, None, 21000, None, &[]);
    let zero = Transaction::new(0, Some(Address::ZERO), None, 21000, None, &[]);

    assert_ne!(create.rlp_bytes(), zero.rlp_bytes());
    assert_ne!(create.hash(), zero.hash());
    assert_eq!(zero.encoded_size(), create.encoded_size() + 20);

    let decoded = Transaction::decode_rlp(&zero.rlp_bytes()).unwrap();
    assert_eq!(decoded.recipient(), Some(&Address::ZERO));
    let decoded = Transaction::decode_rlp(&create.rlp_bytes()).unwrap();
    assert!(decoded.recipient().is_none());
}

#[test]
fn encoding_is_deterministic_across_instances() {
    let payload: Vec<u8> = (0..=255).collect();
    let build = || {
        Transaction::call(
            77,
            Address::from_bytes([0xee; 20]),
            Some(Quantity::from(10u128.pow(20))),
            1_000_000,
            Some(Quantity::from(50_000_000_000u64)),
            &payload,
        )
    };
    let a = build();
    let b = build();
    assert_eq!(a.rlp_bytes(), b.rlp_bytes());
    assert_eq!(a.hash(), b.hash());

    let mut streamed = Vec::new();
    a.encode_rlp(&mut streamed).unwrap();
    assert_eq!(streamed, b.rlp_bytes());
}

#[test]
fn long_payload_uses_long_form_headers() {
    let tx = Transaction::contract_creation(0, None, 3_000_000, None, &[0x60; 300]);
    let bytes = tx.rlp_bytes();
    // list longer than 255 bytes: 0xf9 + two length bytes
    assert_eq!(bytes[0], 0xf9);
    let payload_len = u16::from_be_bytes([bytes[1], bytes[2]]) as usize;
    assert_eq!(payload_len, bytes.len() - 3);
    // payload string header: 0xb9 0x01 0x2c (300)
    let needle = [0xb9u8, 0x01, 0x2c];
    assert!(bytes.windows(3).any(|w| w == needle));
}

#[test]
fn alloy_rlp_decodes_our_bytes() {
    let tx = reference_call().with_signature(Signature::new(
        Quantity::from(27u64),
        Quantity::from(0x1234u64),
        Quantity::from(0x5678u64),
    ));
    let bytes = tx.rlp_bytes();
    let mut buf: &[u8] = &bytes;

    let header = Header::decode(&mut buf).unwrap();
    assert!(header.list);
    assert_eq!(header.payload_length, buf.len());

    assert_eq!(u64::decode(&mut buf).unwrap(), 0);
    assert_eq!(u64::decode(&mut buf).unwrap(), 1);
    assert_eq!(u64::decode(&mut buf).unwrap(), 21000);
    assert_eq!(&alloy_rlp::Bytes::decode(&mut buf).unwrap()[..], &[0x01u8; 20]);
    assert_eq!(u64::decode(&mut buf).unwrap(), 1000);
    assert!(alloy_rlp::Bytes::decode(&mut buf).unwrap().is_empty());
    assert_eq!(u64::decode(&mut buf).unwrap(), 27);
    assert_eq!(u64::decode(&mut buf).unwrap(), 0x1234);
    assert_eq!(u64::decode(&mut buf).unwrap(), 0x5678);
    assert!(buf.is_empty());
}

#[test]
fn integer_encoding_matches_alloy_rlp() {
    for value in [0u64, 1, 0x7f, 0x80, 0xff, 0x100, 21000, u32::MAX as u64, u64::MAX] {
        let tx = Transaction::new(value, None, None, 0, None, &[]);
        let ours = tx.rlp_bytes();
        let theirs = alloy_rlp::encode(value);
        // nonce is the first item after the list header
        assert_eq!(&ours[1..1 + theirs.len()], &theirs[..], "value {}", value);
    }
}

#[test]
fn signed_transaction_roundtrips_through_wire() {
    let tx = reference_creation().with_signature(Signature::new(
        Quantity::from(0x25u64),
        Quantity::from_be_bytes(&[0xaa; 32]),
        Quantity::from_be_bytes(&[0x7f; 32]),
    ));
    let decoded = Transaction::decode_rlp(&tx.rlp_bytes()).unwrap();
    assert_eq!(decoded, tx);
    assert_eq!(decoded.signature(), tx.signature());
    assert_eq!(decoded.hash(), tx.hash());
    assert_eq!(decoded.signing_hash(), reference_creation().hash());
}

/// Sink that accepts `capacity` bytes and then fails.
struct ShortSink {
    capacity: usize,
    written: Vec<u8>,
}

impl io::Write for ShortSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.capacity - self.written.len();
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = room.min(buf.len());
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_surface_unmodified() {
    let tx = reference_call();
    let mut sink = ShortSink {
        capacity: 10,
        written: Vec::new(),
    };
    match tx.encode_rlp(&mut sink) {
        Err(TypesError::Io(e)) => {
            assert_eq!(e.kind(), io::ErrorKind::BrokenPipe);
            assert_eq!(e.to_string(), "sink closed");
        }
        other => panic!("expected sink error, got {:?}", other),
    }
    assert_eq!(sink.written, golden_call_bytes()[..10].to_vec());

    let mut roomy = ShortSink {
        capacity: 64,
        written: Vec::new(),
    };
    tx.encode_rlp(&mut roomy).unwrap();
    assert_eq!(roomy.written, golden_call_bytes());
}

#[test]
fn negative_amount_cannot_alias_its_magnitude() {
    let positive = reference_call();

    // every way a signed value can enter is refused
    assert!(Quantity::try_from(BigInt::from(-1000)).is_err());
    assert!(Quantity::try_from(-1000i64).is_err());
    assert!("-1000".parse::<Quantity>().is_err());
    assert!("-0x3e8".parse::<Quantity>().is_err());

    let json = positive.to_json().unwrap();
    assert!(json.contains(r#""value":"0x3e8""#));
    let negative_json = json.replace(r#""value":"0x3e8""#, r#""value":"-0x3e8""#);
    assert!(serde_json::from_str::<Transaction>(&negative_json).is_err());

    // the magnitude itself still goes through and keeps its own hash
    let amount = Quantity::try_from(BigInt::from(1000)).unwrap();
    let rebuilt = Transaction::new(
        0,
        Some(Address::from_bytes([0x01; 20])),
        Some(amount),
        21000,
        Some(Quantity::from(1u64)),
        &[],
    );
    assert_eq!(rebuilt.hash(), positive.hash());
    assert_eq!(rebuilt.rlp_bytes(), golden_call_bytes());
}
