/**
 * @file data.rs
 * @author Krisna Pranav
 * @brief PlutusData
 * @version 0.1
 * @date 2023-05-06
 *
 * @copyright Copyright (c) 2023 Krisna Pranav, NanoBlocksDevelopers
 *
 */

use crate::{
    bigint::BigInteger,
    bytes::Bytes,
    cbor::Primitive,
    constr::{constr_index_from_tag, Constr, GENERAL_CONSTR_TAG},
    error::{DecodingError, DeserializeError, SerializeError},
    hashing::{self, Hash},
    serial::{self, Serializable},
};
use num_bigint::BigInt;
use serde::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, Serializer},
};
use serde_json::json;
use std::fmt;

/// The recursive Plutus Data value model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlutusData {
    Constr(Constr),
    Map(Vec<(PlutusData, PlutusData)>),
    Array(Vec<PlutusData>),
    IndefArray(Vec<PlutusData>),
    BigInt(BigInteger),
    Bytes(Bytes),
}

impl PlutusData {
    pub fn integer(i: BigInt) -> PlutusData {
        PlutusData::BigInt(i.into())
    }

    pub fn bytestring(bytes: Vec<u8>) -> PlutusData {
        PlutusData::Bytes(Bytes::new(bytes))
    }

    pub fn map(kvs: Vec<(PlutusData, PlutusData)>) -> PlutusData {
        PlutusData::Map(kvs)
    }

    pub fn list(xs: Vec<PlutusData>) -> PlutusData {
        PlutusData::Array(xs)
    }

    pub fn constr(ix: u64, fields: Vec<PlutusData>) -> PlutusData {
        PlutusData::Constr(Constr::new(ix, fields))
    }

    /// The datum hash: blake2b-256 over the canonical wire bytes.
    pub fn hash(&self) -> Result<Hash<32>, SerializeError> {
        Ok(hashing::blake2b_256(&self.to_cbor()?))
    }
}

impl Serializable for PlutusData {
    fn to_primitive(&self) -> Result<Primitive, SerializeError> {
        Ok(match self {
            PlutusData::Constr(constr) => constr.to_primitive()?,
            PlutusData::Map(pairs) => Primitive::Map(
                pairs
                    .iter()
                    .map(|(key, value)| Ok((key.to_primitive()?, value.to_primitive()?)))
                    .collect::<Result<Vec<_>, SerializeError>>()?,
            ),
            PlutusData::Array(items) => Primitive::Array(
                items
                    .iter()
                    .map(|item| item.to_primitive())
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            PlutusData::IndefArray(items) => Primitive::IndefArray(
                items
                    .iter()
                    .map(|item| item.to_primitive())
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            PlutusData::BigInt(value) => value.to_primitive()?,
            PlutusData::Bytes(value) => value.to_primitive()?,
        })
    }

    fn from_primitive(primitive: &Primitive) -> Result<Self, DeserializeError> {
        match primitive {
            Primitive::Tagged(tag, _)
                if constr_index_from_tag(*tag).is_some() || *tag == GENERAL_CONSTR_TAG =>
            {
                Ok(PlutusData::Constr(Constr::from_primitive(primitive)?))
            }
            Primitive::Tagged(tag, _) => Err(DeserializeError::TagMismatch {
                found: *tag,
                expected: "a constructor tag (121..=127, 1280..=1400 or 102)",
            }),
            Primitive::UInt(_)
            | Primitive::Int(_)
            | Primitive::BigUInt(_)
            | Primitive::BigNInt(_) => {
                Ok(PlutusData::BigInt(BigInteger::from_primitive(primitive)?))
            }
            Primitive::Bytes(_) | Primitive::Text(_) => {
                Ok(PlutusData::Bytes(Bytes::from_primitive(primitive)?))
            }
            Primitive::Array(items) => Ok(PlutusData::Array(
                items
                    .iter()
                    .map(PlutusData::from_primitive)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Primitive::IndefArray(items) => Ok(PlutusData::IndefArray(
                items
                    .iter()
                    .map(PlutusData::from_primitive)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Primitive::Map(pairs) => Ok(PlutusData::Map(
                pairs
                    .iter()
                    .map(|(key, value)| {
                        Ok((
                            PlutusData::from_primitive(key)?,
                            PlutusData::from_primitive(value)?,
                        ))
                    })
                    .collect::<Result<Vec<_>, DeserializeError>>()?,
            )),
            Primitive::Null => Err(DeserializeError::UnexpectedPrimitive {
                expected: "a plutus data value",
                found: primitive.kind(),
            }),
        }
    }

    fn to_cbor(&self) -> Result<Vec<u8>, SerializeError> {
        match self {
            PlutusData::Constr(constr) => constr.to_cbor(),
            _ => serial::primitive_to_bytes(&self.to_primitive()?, false),
        }
    }

    fn to_cbor_deterministic(&self) -> Result<Vec<u8>, SerializeError> {
        match self {
            PlutusData::Constr(constr) => constr.to_cbor_deterministic(),
            _ => serial::primitive_to_bytes(&self.to_primitive()?, true),
        }
    }

    fn to_dict(&self) -> Result<serde_json::Value, SerializeError> {
        Ok(match self {
            PlutusData::Constr(constr) => constr.to_dict()?,
            PlutusData::Map(pairs) => json!({
                "map": pairs
                    .iter()
                    .map(|(key, value)| {
                        Ok(json!({ "k": key.to_dict()?, "v": value.to_dict()? }))
                    })
                    .collect::<Result<Vec<_>, SerializeError>>()?
            }),
            PlutusData::Array(items) | PlutusData::IndefArray(items) => json!({
                "list": items
                    .iter()
                    .map(|item| item.to_dict())
                    .collect::<Result<Vec<_>, _>>()?
            }),
            PlutusData::BigInt(value) => value.to_dict()?,
            PlutusData::Bytes(value) => value.to_dict()?,
        })
    }

    fn from_dict(value: &serde_json::Value) -> Result<Self, DecodingError> {
        let object = value.as_object().ok_or(DecodingError::UnknownShape)?;

        if object.contains_key("constructor") {
            return Ok(PlutusData::Constr(Constr::from_dict(value)?));
        }

        if object.contains_key("int") {
            return Ok(PlutusData::BigInt(BigInteger::from_dict(value)?));
        }

        if object.contains_key("bytes") {
            return Ok(PlutusData::Bytes(Bytes::from_dict(value)?));
        }

        if let Some(items) = object.get("list") {
            let items = items.as_array().ok_or(DecodingError::MistypedField {
                field: "list",
                expected: "an array",
            })?;

            return Ok(PlutusData::Array(
                items
                    .iter()
                    .map(PlutusData::from_dict)
                    .collect::<Result<Vec<_>, _>>()?,
            ));
        }

        if let Some(entries) = object.get("map") {
            let entries = entries.as_array().ok_or(DecodingError::MistypedField {
                field: "map",
                expected: "an array of entries",
            })?;

            let pairs = entries
                .iter()
                .map(|entry| {
                    let key = entry.get("k").ok_or(DecodingError::MissingField("k"))?;
                    let value = entry.get("v").ok_or(DecodingError::MissingField("v"))?;

                    Ok((
                        PlutusData::from_dict(key)?,
                        PlutusData::from_dict(value)?,
                    ))
                })
                .collect::<Result<Vec<_>, DecodingError>>()?;

            return Ok(PlutusData::Map(pairs));
        }

        Err(DecodingError::UnknownShape)
    }
}

impl fmt::Display for PlutusData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl Serialize for PlutusData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let dict = self.to_dict().map_err(serde::ser::Error::custom)?;

        dict.serialize(serializer)
    }
}

impl<'a> Deserialize<'a> for PlutusData {
    fn deserialize<D: Deserializer<'a>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;

        PlutusData::from_dict(&value).map_err(serde::de::Error::custom)
    }
}
