/**
 * @file serial.rs
 * @author Krisna Pranav
 * @brief Serializable capability
 * @version 0.1
 * @date 2023-05-06
 *
 * @copyright Copyright (c) 2023 Krisna Pranav, NanoBlocksDevelopers
 *
 */

use crate::{
    cbor::{encode::Encoder, Primitive},
    error::{DecodingError, DeserializeError, SerializeError},
};

pub(crate) fn primitive_to_bytes(
    primitive: &Primitive,
    deterministic: bool,
) -> Result<Vec<u8>, SerializeError> {
    let mut e = if deterministic {
        Encoder::deterministic()
    } else {
        Encoder::new()
    };

    e.encode(primitive)?;

    Ok(e.buffer)
}

/// The shared codec contract: every serializable type lowers to the
/// [`Primitive`] wire tree and out of it, and from there to binary bytes,
/// hex, and the JSON tree form. The JSON path carries logical content only;
/// wire-form choices (list form, integer form, bytes form) do not survive
/// it.
pub trait Serializable: Sized {
    fn to_primitive(&self) -> Result<Primitive, SerializeError>;

    fn from_primitive(primitive: &Primitive) -> Result<Self, DeserializeError>;

    fn to_dict(&self) -> Result<serde_json::Value, SerializeError>;

    fn from_dict(value: &serde_json::Value) -> Result<Self, DecodingError>;

    fn to_cbor(&self) -> Result<Vec<u8>, SerializeError> {
        primitive_to_bytes(&self.to_primitive()?, false)
    }

    /// Like [`Serializable::to_cbor`], additionally sorting map entries by
    /// their encoded key bytes wherever wire order is not otherwise fixed.
    fn to_cbor_deterministic(&self) -> Result<Vec<u8>, SerializeError> {
        primitive_to_bytes(&self.to_primitive()?, true)
    }

    fn from_cbor(bytes: &[u8]) -> Result<Self, DeserializeError> {
        log::trace!("decoding {} bytes", bytes.len());

        let primitive = Primitive::from_bytes(bytes)?;

        Self::from_primitive(&primitive)
    }

    fn to_cbor_hex(&self) -> Result<String, SerializeError> {
        Ok(hex::encode(self.to_cbor()?))
    }

    fn from_cbor_hex(text: &str) -> Result<Self, DeserializeError> {
        Self::from_cbor(&hex::decode(text)?)
    }

    fn to_json(&self) -> Result<String, SerializeError> {
        Ok(serde_json::to_string(&self.to_dict()?)?)
    }

    fn from_json(text: &str) -> Result<Self, DecodingError> {
        Self::from_dict(&serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{data::PlutusData, serial::Serializable};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_round_trip() {
        let value = PlutusData::constr(0, vec![PlutusData::integer(77.into())]);
        let decoded = PlutusData::from_cbor_hex(&value.to_cbor_hex().unwrap()).unwrap();

        assert_eq!(decoded, value);
    }

    #[test]
    fn json_text_round_trip() {
        let text = indoc! {r#"
            {
              "constructor": 0,
              "fields": [
                { "int": 42 },
                { "bytes": "00ff" },
                { "list": [{ "int": 1 }, { "int": 2 }] },
                { "map": [{ "k": { "int": 0 }, "v": { "bytes": "" } }] }
              ]
            }
        "#};

        let value = PlutusData::from_json(text).unwrap();

        assert_eq!(
            value.to_cbor_hex().unwrap(),
            PlutusData::from_json(&value.to_json().unwrap())
                .unwrap()
                .to_cbor_hex()
                .unwrap()
        );
    }

    #[test]
    fn malformed_json_is_a_decoding_error() {
        assert!(PlutusData::from_json(r#"{"constructor": "zero"}"#).is_err());
        assert!(PlutusData::from_json(r#"{"ints": 1}"#).is_err());
    }
}
