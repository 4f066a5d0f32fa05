/**
 * @file errors.rs
 * @author Krisna Pranav
 * @brief Errors[Decode]
 * @version 0.1
 * @date 2023-05-06
 *
 * @copyright Copyright (c) 2023 Krisna Pranav, NanoBlocksDevelopers
 *
 */

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("Reached end of the buffer")]
    EndOfBuffer,
    #[error("Not enough data available, required {0} bytes")]
    NotEnoughBytes(usize),
    #[error("Malformed type header 0x{0:02x} at position {1}")]
    MalformedHeader(u8, usize),
    #[error("Unexpected break marker at position {0}")]
    UnexpectedBreak(usize),
    #[error("Indefinite-length {0} is outside the ledger data grammar, at position {1}")]
    UnsupportedIndefinite(&'static str, usize),
    #[error("Floating-point items are outside the ledger data grammar, at position {0}")]
    UnsupportedFloat(usize),
    #[error("Simple value {0} is outside the ledger data grammar, at position {1}")]
    UnsupportedSimple(u64, usize),
    #[error("Negative integer at position {0} does not fit the 64-bit range")]
    IntegerOverflow(usize),
    #[error("Indefinite byte string may only carry definite chunks, at position {0}")]
    InvalidChunk(usize),
    #[error("Bignum tag {0} must wrap a byte string, at position {1}")]
    InvalidBignum(u64, usize),
    #[error("Nesting depth exceeds the {0} limit")]
    NestingLimitExceeded(usize),
    #[error("Trailing bytes after the outermost value, {0} unread")]
    TrailingBytes(usize),
    #[error(transparent)]
    DecodeUtf8(#[from] std::string::FromUtf8Error),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
