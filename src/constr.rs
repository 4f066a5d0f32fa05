/**
 * @file constr.rs
 * @author Krisna Pranav
 * @brief Constructor encoding
 * @version 0.1
 * @date 2023-05-06
 *
 * @copyright Copyright (c) 2023 Krisna Pranav, NanoBlocksDevelopers
 *
 */

use crate::{
    cbor::{encode::Encoder, Primitive},
    data::PlutusData,
    error::{DecodingError, DeserializeError, SerializeError},
    hashing,
    serial::Serializable,
};
use serde_json::json;
use std::collections::BTreeMap;

/// Wrapper tag for constructor indices beyond both compact ranges; the inner
/// value is the 2-element list `[index, fields]`.
pub const GENERAL_CONSTR_TAG: u64 = 102;

/// Compact alternative tag for a constructor index, when one exists.
/// Indices 0..=6 map onto tags 121..=127, indices 7..=127 onto 1280..=1400.
pub fn compact_constr_tag(index: u64) -> Option<u64> {
    if index < 7 {
        Some(121 + index)
    } else if index < 128 {
        Some(1280 + index - 7)
    } else {
        None
    }
}

/// Inverse of [`compact_constr_tag`].
pub fn constr_index_from_tag(tag: u64) -> Option<u64> {
    match tag {
        121..=127 => Some(tag - 121),
        1280..=1400 => Some(tag - 1280 + 7),
        _ => None,
    }
}

/// Derives a constructor index from a declared shape fingerprint: the
/// blake2b-256 digest of the fingerprint, read as a big-endian integer and
/// reduced modulo 2^32. The same fingerprint always yields the same index,
/// across processes and versions, without any registry.
pub fn derive_constructor_index(fingerprint: &str) -> u64 {
    let digest = hashing::blake2b_256(fingerprint.as_bytes());
    let bytes = digest.as_bytes();

    u64::from(u32::from_be_bytes([bytes[28], bytes[29], bytes[30], bytes[31]]))
}

/// A tagged, ordered tuple of fields. Field order is significant and
/// preserved exactly.
#[derive(Debug, Clone)]
pub struct Constr {
    pub tag: Option<u64>,
    pub fields: Vec<PlutusData>,
    pub use_indefinite_list: bool,
    fingerprint: Option<String>,
    // Encode-side cache only; never part of value equality.
    raw_fields: BTreeMap<usize, Vec<u8>>,
}

impl Constr {
    pub fn new(tag: u64, fields: Vec<PlutusData>) -> Self {
        Constr {
            tag: Some(tag),
            fields,
            use_indefinite_list: true,
            fingerprint: None,
            raw_fields: BTreeMap::new(),
        }
    }

    /// A constructor without a pinned index; the index is derived from the
    /// declared fingerprint on encode.
    pub fn from_fingerprint(fingerprint: impl Into<String>, fields: Vec<PlutusData>) -> Self {
        Constr {
            tag: None,
            fields,
            use_indefinite_list: true,
            fingerprint: Some(fingerprint.into()),
            raw_fields: BTreeMap::new(),
        }
    }

    pub fn with_definite_list(mut self) -> Self {
        self.use_indefinite_list = false;
        self
    }

    /// The index used on the wire: the explicit tag when pinned, otherwise
    /// derived from the fingerprint.
    pub fn resolved_tag(&self) -> u64 {
        match self.tag {
            Some(tag) => tag,
            None => derive_constructor_index(self.fingerprint.as_deref().unwrap_or("")),
        }
    }

    /// Registers already-encoded wire bytes for the field at `position`.
    /// The outermost encode call splices them verbatim in place of the
    /// field's structural encoding; nested encodes ignore them.
    pub fn set_raw_field(&mut self, position: usize, bytes: Vec<u8>) {
        self.raw_fields.insert(position, bytes);
    }

    pub fn clear_raw_fields(&mut self) {
        self.raw_fields.clear();
    }

    fn fields_primitive(&self) -> Result<Primitive, SerializeError> {
        let fields = self
            .fields
            .iter()
            .map(|field| field.to_primitive())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(if fields.is_empty() {
            Primitive::Array(Vec::new())
        } else if self.use_indefinite_list {
            Primitive::IndefArray(fields)
        } else {
            Primitive::Array(fields)
        })
    }

    /// Root-only encoding path: identical bytes to the structural path,
    /// except that registered raw fields are spliced in verbatim.
    pub(crate) fn encode_root(&self, e: &mut Encoder) -> Result<(), SerializeError> {
        if !self.raw_fields.is_empty() {
            log::trace!(
                "splicing {} raw field(s) at the encode root",
                self.raw_fields.len()
            );
        }

        let index = self.resolved_tag();

        match compact_constr_tag(index) {
            Some(tag) => {
                e.tag(tag);
            }
            None => {
                e.tag(GENERAL_CONSTR_TAG).array(2).unsigned(index);
            }
        }

        if self.fields.is_empty() {
            e.array(0);
            return Ok(());
        }

        if self.use_indefinite_list {
            e.begin_array();
        } else {
            e.array(self.fields.len() as u64);
        }

        for (position, field) in self.fields.iter().enumerate() {
            match self.raw_fields.get(&position) {
                Some(raw) => {
                    e.raw(raw);
                }
                None => {
                    e.encode(&field.to_primitive()?)?;
                }
            }
        }

        if self.use_indefinite_list {
            e.break_marker();
        }

        Ok(())
    }

    fn field_list(primitive: &Primitive) -> Result<(Vec<PlutusData>, bool), DeserializeError> {
        let (items, indefinite) = match primitive {
            Primitive::Array(items) => (items, false),
            Primitive::IndefArray(items) => (items, true),
            other => {
                return Err(DeserializeError::UnexpectedPrimitive {
                    expected: "a field list",
                    found: other.kind(),
                })
            }
        };

        let fields = items
            .iter()
            .map(PlutusData::from_primitive)
            .collect::<Result<Vec<_>, _>>()?;

        // An empty definite list is the wire form of either flag value.
        let use_indefinite_list = indefinite || fields.is_empty();

        Ok((fields, use_indefinite_list))
    }
}

impl PartialEq for Constr {
    fn eq(&self, other: &Self) -> bool {
        self.resolved_tag() == other.resolved_tag()
            && self.fields == other.fields
            && (self.fields.is_empty() || self.use_indefinite_list == other.use_indefinite_list)
    }
}

impl Eq for Constr {}

impl Serializable for Constr {
    fn to_primitive(&self) -> Result<Primitive, SerializeError> {
        let index = self.resolved_tag();
        let fields = self.fields_primitive()?;

        Ok(match compact_constr_tag(index) {
            Some(tag) => Primitive::Tagged(tag, Box::new(fields)),
            None => Primitive::Tagged(
                GENERAL_CONSTR_TAG,
                Box::new(Primitive::Array(vec![Primitive::UInt(index), fields])),
            ),
        })
    }

    fn from_primitive(primitive: &Primitive) -> Result<Self, DeserializeError> {
        let (tag, inner) = match primitive {
            Primitive::Tagged(tag, inner) => (*tag, inner.as_ref()),
            other => {
                return Err(DeserializeError::UnexpectedPrimitive {
                    expected: "a constructor tag",
                    found: other.kind(),
                })
            }
        };

        if let Some(index) = constr_index_from_tag(tag) {
            let (fields, use_indefinite_list) = Constr::field_list(inner)?;

            return Ok(Constr {
                tag: Some(index),
                fields,
                use_indefinite_list,
                fingerprint: None,
                raw_fields: BTreeMap::new(),
            });
        }

        if tag != GENERAL_CONSTR_TAG {
            return Err(DeserializeError::TagMismatch {
                found: tag,
                expected: "a constructor tag (121..=127, 1280..=1400 or 102)",
            });
        }

        let elements = match inner {
            Primitive::Array(items) | Primitive::IndefArray(items) => items,
            other => {
                return Err(DeserializeError::UnexpectedPrimitive {
                    expected: "an [index, fields] pair",
                    found: other.kind(),
                })
            }
        };

        let (index, fields) = match elements.as_slice() {
            [Primitive::UInt(index), fields] => (*index, fields),
            [other, _] => {
                return Err(DeserializeError::UnexpectedPrimitive {
                    expected: "an unsigned constructor index",
                    found: other.kind(),
                })
            }
            _ => {
                return Err(DeserializeError::WrongElementCount {
                    expected: 2,
                    found: elements.len(),
                })
            }
        };

        let (fields, use_indefinite_list) = Constr::field_list(fields)?;

        Ok(Constr {
            tag: Some(index),
            fields,
            use_indefinite_list,
            fingerprint: None,
            raw_fields: BTreeMap::new(),
        })
    }

    fn to_cbor(&self) -> Result<Vec<u8>, SerializeError> {
        let mut e = Encoder::new();
        self.encode_root(&mut e)?;

        Ok(e.buffer)
    }

    fn to_cbor_deterministic(&self) -> Result<Vec<u8>, SerializeError> {
        let mut e = Encoder::deterministic();
        self.encode_root(&mut e)?;

        Ok(e.buffer)
    }

    fn to_dict(&self) -> Result<serde_json::Value, SerializeError> {
        let fields = self
            .fields
            .iter()
            .map(|field| field.to_dict())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(json!({ "constructor": self.resolved_tag(), "fields": fields }))
    }

    fn from_dict(value: &serde_json::Value) -> Result<Self, DecodingError> {
        let index = value
            .get("constructor")
            .ok_or(DecodingError::MissingField("constructor"))?
            .as_u64()
            .ok_or(DecodingError::MistypedField {
                field: "constructor",
                expected: "an unsigned integer",
            })?;

        let fields = value
            .get("fields")
            .ok_or(DecodingError::MissingField("fields"))?
            .as_array()
            .ok_or(DecodingError::MistypedField {
                field: "fields",
                expected: "an array",
            })?
            .iter()
            .map(PlutusData::from_dict)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Constr::new(index, fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn compact_ranges_cover_the_first_128_indices() {
        assert_eq!(compact_constr_tag(0), Some(121));
        assert_eq!(compact_constr_tag(6), Some(127));
        assert_eq!(compact_constr_tag(7), Some(1280));
        assert_eq!(compact_constr_tag(127), Some(1400));
        assert_eq!(compact_constr_tag(128), None);

        for index in 0..128 {
            let tag = compact_constr_tag(index).unwrap();
            assert_eq!(constr_index_from_tag(tag), Some(index));
        }

        assert_eq!(constr_index_from_tag(102), None);
        assert_eq!(constr_index_from_tag(120), None);
        assert_eq!(constr_index_from_tag(1401), None);
    }

    #[test]
    fn empty_fields_encode_as_an_empty_definite_list() {
        assert_eq!(Constr::new(0, vec![]).to_cbor_hex().unwrap(), "d87980");
        assert_eq!(
            Constr::new(1, vec![]).with_definite_list().to_cbor_hex().unwrap(),
            "d87a80"
        );
    }

    #[test]
    fn indices_beyond_both_ranges_use_the_general_form() {
        let value = Constr::new(128, vec![]);

        assert_eq!(value.to_cbor_hex().unwrap(), "d86682188080");

        let decoded = Constr::from_cbor_hex("d86682188080").unwrap();

        assert_eq!(decoded, value);
    }

    #[test]
    fn general_form_requires_two_elements() {
        // 102([]) is missing both the index and the field list.
        assert!(matches!(
            Constr::from_cbor_hex("d86680"),
            Err(DeserializeError::WrongElementCount {
                expected: 2,
                found: 0
            })
        ));
    }

    #[test]
    fn unknown_tags_are_a_tag_mismatch() {
        assert!(matches!(
            Constr::from_cbor_hex("d9076280"),
            Err(DeserializeError::TagMismatch { found: 1890, .. })
        ));
    }

    #[test]
    fn fingerprint_indices_are_deterministic() {
        let index = derive_constructor_index("wallet/output(bytes,int)");

        assert_eq!(index, derive_constructor_index("wallet/output(bytes,int)"));
        assert!(index < 1 << 32);
        assert_ne!(index, derive_constructor_index("wallet/output(int,bytes)"));
    }

    #[test]
    fn unpinned_constructors_resolve_through_their_fingerprint() {
        let value = Constr::from_fingerprint("wallet/output(bytes,int)", vec![]);

        assert_eq!(
            value.resolved_tag(),
            derive_constructor_index("wallet/output(bytes,int)")
        );

        let pinned = Constr::new(value.resolved_tag(), vec![]);

        assert_eq!(value, pinned);
        assert_eq!(
            value.to_cbor_hex().unwrap(),
            pinned.to_cbor_hex().unwrap()
        );
    }

    #[test]
    fn raw_fields_are_spliced_at_the_root_only() {
        let mut value = Constr::new(0, vec![PlutusData::integer(0.into())]);
        value.set_raw_field(0, hex::decode("d87980").unwrap());

        assert_eq!(value.to_cbor_hex().unwrap(), "d8799fd87980ff");

        // Nested under an array, the same constructor re-encodes its
        // structural field instead.
        let nested = PlutusData::Array(vec![PlutusData::Constr(value)]);

        assert_eq!(nested.to_cbor_hex().unwrap(), "81d8799f00ff");
    }
}
