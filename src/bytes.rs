/**
 * @file bytes.rs
 * @author Krisna Pranav
 * @brief Bytes codec
 * @version 0.1
 * @date 2023-05-06
 *
 * @copyright Copyright (c) 2023 Krisna Pranav, NanoBlocksDevelopers
 *
 */

use crate::{
    cbor::{Primitive, BOUNDED_BYTES_LIMIT},
    error::{DecodingError, DeserializeError, SerializeError},
    serial::Serializable,
};
use serde_json::json;

/// A byte payload, split by wire form at the 64-byte boundary. The split is
/// decided once, on construction; the wire-level chunking itself is carried
/// by the byte-string primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bytes {
    Bounded(Vec<u8>),
    Unbounded(Vec<u8>),
}

impl Bytes {
    pub fn new(payload: Vec<u8>) -> Self {
        if payload.len() <= BOUNDED_BYTES_LIMIT {
            Bytes::Bounded(payload)
        } else {
            Bytes::Unbounded(payload)
        }
    }

    pub fn payload(&self) -> &[u8] {
        match self {
            Bytes::Bounded(payload) | Bytes::Unbounded(payload) => payload,
        }
    }

    pub fn len(&self) -> usize {
        self.payload().len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload().is_empty()
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(payload: Vec<u8>) -> Self {
        Bytes::new(payload)
    }
}

impl From<&[u8]> for Bytes {
    fn from(payload: &[u8]) -> Self {
        Bytes::new(payload.to_vec())
    }
}

impl Serializable for Bytes {
    fn to_primitive(&self) -> Result<Primitive, SerializeError> {
        Ok(Primitive::Bytes(self.payload().to_vec()))
    }

    fn from_primitive(primitive: &Primitive) -> Result<Self, DeserializeError> {
        match primitive {
            Primitive::Bytes(payload) => Ok(Bytes::new(payload.clone())),
            // Some producers ship short payloads as text; treat as UTF-8.
            Primitive::Text(text) => Ok(Bytes::new(text.as_bytes().to_vec())),
            other => Err(DeserializeError::UnexpectedPrimitive {
                expected: "a byte string",
                found: other.kind(),
            }),
        }
    }

    fn to_dict(&self) -> Result<serde_json::Value, SerializeError> {
        Ok(json!({ "bytes": hex::encode(self.payload()) }))
    }

    fn from_dict(value: &serde_json::Value) -> Result<Self, DecodingError> {
        let text = value
            .get("bytes")
            .ok_or(DecodingError::MissingField("bytes"))?
            .as_str()
            .ok_or(DecodingError::MistypedField {
                field: "bytes",
                expected: "a hex string",
            })?;

        Ok(Bytes::new(hex::decode(text)?))
    }
}
