/**
 * @file bigint.rs
 * @author Krisna Pranav
 * @brief BigInteger codec
 * @version 0.1
 * @date 2023-05-06
 *
 * @copyright Copyright (c) 2023 Krisna Pranav, NanoBlocksDevelopers
 *
 */

use crate::{
    cbor::Primitive,
    error::{DecodingError, DeserializeError, SerializeError},
    serial::Serializable,
};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;
use serde_json::json;
use std::fmt;

/// An arbitrary-precision integer, split by wire form. Which variant
/// produced a value is preserved on re-encode: a small magnitude that
/// arrived in the extended form never collapses to the compact one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BigInteger {
    Int(i64),
    BigUInt(BigUint),
    BigNInt(BigUint),
}

impl BigInteger {
    /// The extended unsigned form, regardless of magnitude.
    pub fn big_uint(magnitude: BigUint) -> Self {
        BigInteger::BigUInt(magnitude)
    }

    /// The extended negative form; `magnitude` is the tag-3 payload, so the
    /// denoted value is `-1 - magnitude`.
    pub fn big_nint(magnitude: BigUint) -> Self {
        BigInteger::BigNInt(magnitude)
    }

    pub fn int_value(&self) -> Option<i64> {
        self.to_bigint().to_i64()
    }

    pub fn big_uint_value(&self) -> Option<BigUint> {
        match self {
            BigInteger::Int(value) if *value >= 0 => Some(BigUint::from(*value as u64)),
            BigInteger::Int(_) => None,
            BigInteger::BigUInt(magnitude) => Some(magnitude.clone()),
            BigInteger::BigNInt(_) => None,
        }
    }

    pub fn big_nint_value(&self) -> Option<BigUint> {
        match self {
            BigInteger::Int(value) if *value < 0 => Some(BigUint::from((-(*value + 1)) as u64)),
            BigInteger::Int(_) => None,
            BigInteger::BigUInt(_) => None,
            BigInteger::BigNInt(magnitude) => Some(magnitude.clone()),
        }
    }

    /// The denoted value, independent of wire form.
    pub fn to_bigint(&self) -> BigInt {
        match self {
            BigInteger::Int(value) => BigInt::from(*value),
            BigInteger::BigUInt(magnitude) => BigInt::from(magnitude.clone()),
            BigInteger::BigNInt(magnitude) => -BigInt::from(magnitude.clone()) - 1,
        }
    }
}

impl From<i64> for BigInteger {
    fn from(value: i64) -> Self {
        BigInteger::Int(value)
    }
}

impl From<BigInt> for BigInteger {
    fn from(value: BigInt) -> Self {
        match value.to_i64() {
            Some(value) => BigInteger::Int(value),
            None => {
                let (sign, magnitude) = value.into_parts();

                match sign {
                    Sign::Minus => BigInteger::BigNInt(magnitude - 1u32),
                    _ => BigInteger::BigUInt(magnitude),
                }
            }
        }
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bigint())
    }
}

impl Serializable for BigInteger {
    fn to_primitive(&self) -> Result<Primitive, SerializeError> {
        Ok(match self {
            BigInteger::Int(value) if *value >= 0 => Primitive::UInt(*value as u64),
            BigInteger::Int(value) => Primitive::Int(*value),
            BigInteger::BigUInt(magnitude) => Primitive::BigUInt(magnitude.to_bytes_be()),
            BigInteger::BigNInt(magnitude) => Primitive::BigNInt(magnitude.to_bytes_be()),
        })
    }

    fn from_primitive(primitive: &Primitive) -> Result<Self, DeserializeError> {
        match primitive {
            Primitive::UInt(value) => i64::try_from(*value)
                .map(BigInteger::Int)
                .map_err(|_| DeserializeError::IntegerOutOfRange),
            Primitive::Int(value) => Ok(BigInteger::Int(*value)),
            Primitive::BigUInt(raw) => Ok(BigInteger::BigUInt(BigUint::from_bytes_be(raw))),
            Primitive::BigNInt(raw) => Ok(BigInteger::BigNInt(BigUint::from_bytes_be(raw))),
            other => Err(DeserializeError::UnexpectedPrimitive {
                expected: "an integer",
                found: other.kind(),
            }),
        }
    }

    fn to_dict(&self) -> Result<serde_json::Value, SerializeError> {
        let number: serde_json::Number = serde_json::from_str(&self.to_bigint().to_string())?;

        Ok(json!({ "int": number }))
    }

    fn from_dict(value: &serde_json::Value) -> Result<Self, DecodingError> {
        let number = match value.get("int") {
            Some(serde_json::Value::Number(number)) => number,
            Some(_) => {
                return Err(DecodingError::MistypedField {
                    field: "int",
                    expected: "an integer",
                })
            }
            None => return Err(DecodingError::MissingField("int")),
        };

        let value = number
            .to_string()
            .parse::<BigInt>()
            .map_err(|_| DecodingError::InvalidInteger(number.to_string()))?;

        Ok(value.into())
    }
}
