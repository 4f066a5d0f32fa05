/**
 * @file lib.rs
 * @author Krisna Pranav
 * @version 0.1
 * @date 2023-05-06
 *
 * @copyright Copyright (c) 2023 Krisna Pranav, NanoBlocksDevelopers
 *
*/

pub mod bigint;
pub mod bytes;
pub mod cbor;
pub mod constr;
pub mod data;
pub mod error;
pub mod hashing;
pub mod serial;

pub use bigint::BigInteger;
pub use bytes::Bytes;
pub use cbor::Primitive;
pub use constr::{compact_constr_tag, derive_constructor_index, Constr, GENERAL_CONSTR_TAG};
pub use data::PlutusData;
pub use error::{DecodingError, DeserializeError, SerializeError};
pub use hashing::Hash;
pub use serial::Serializable;

pub fn plutus_data(bytes: &[u8]) -> Result<PlutusData, DeserializeError> {
    PlutusData::from_cbor(bytes)
}

pub fn plutus_data_to_bytes(data: &PlutusData) -> Result<Vec<u8>, SerializeError> {
    data.to_cbor()
}
