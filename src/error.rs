/**
 * @file error.rs
 * @author Krisna Pranav
 * @brief Error Codes
 * @version 0.1
 * @date 2023-05-06
 *
 * @copyright Copyright (c) 2023 Krisna Pranav, NanoBlocksDevelopers
 *
 */

use crate::cbor;
use miette::Diagnostic;
use thiserror::Error;

/// Malformed binary input.
#[derive(Error, Debug, Diagnostic)]
pub enum DeserializeError {
    #[error("Unexpected cbor tag {found}, expected {expected}")]
    TagMismatch { found: u64, expected: &'static str },
    #[error("Expected {expected}, found {found}")]
    UnexpectedPrimitive {
        expected: &'static str,
        found: &'static str,
    },
    #[error("Expected {expected} elements, found {found}")]
    WrongElementCount { expected: usize, found: usize },
    #[error("Integer does not fit the 64-bit compact range")]
    IntegerOutOfRange,
    #[error(transparent)]
    Decode(#[from] cbor::decode::Error),
    #[error(transparent)]
    InvalidHex(#[from] hex::FromHexError),
}

/// Malformed JSON-tree input.
#[derive(Error, Debug, Diagnostic)]
pub enum DecodingError {
    #[error("Missing field {0:?}")]
    MissingField(&'static str),
    #[error("Mistyped field {field:?}, expected {expected}")]
    MistypedField {
        field: &'static str,
        expected: &'static str,
    },
    #[error("Unrecognized value shape, expected one of constructor, map, list, int, bytes")]
    UnknownShape,
    #[error("Invalid integer literal {0:?}")]
    InvalidInteger(String),
    #[error(transparent)]
    InvalidHex(#[from] hex::FromHexError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failure while producing output.
#[derive(Error, Debug, Diagnostic)]
pub enum SerializeError {
    #[error(transparent)]
    Encode(#[from] cbor::encode::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
}
