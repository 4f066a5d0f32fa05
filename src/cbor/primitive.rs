/**
 * @file primitive.rs
 * @author Krisna Pranav
 * @brief Primitive wire values
 * @version 0.1
 * @date 2023-05-06
 *
 * @copyright Copyright (c) 2023 Krisna Pranav, NanoBlocksDevelopers
 *
 */

use super::{
    decode::{self, Decode, Decoder, Head},
    encode::{self, Encode, Encoder},
    BIG_NINT_TAG, BIG_UINT_TAG,
};

/// A generic ledger-CBOR value tree. Decoding wire bytes into a `Primitive`
/// and re-encoding reproduces the input bytes for every shape the ledger
/// data grammar can produce; shapes it cannot produce are decode errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    UInt(u64),
    Int(i64),
    BigUInt(Vec<u8>),
    BigNInt(Vec<u8>),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Primitive>),
    IndefArray(Vec<Primitive>),
    Map(Vec<(Primitive, Primitive)>),
    Tagged(u64, Box<Primitive>),
    Null,
}

impl Primitive {
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::UInt(_) | Primitive::Int(_) => "an integer",
            Primitive::BigUInt(_) => "a big unsigned integer",
            Primitive::BigNInt(_) => "a big negative integer",
            Primitive::Bytes(_) => "a byte string",
            Primitive::Text(_) => "a text string",
            Primitive::Array(_) => "an array",
            Primitive::IndefArray(_) => "an indefinite array",
            Primitive::Map(_) => "a map",
            Primitive::Tagged(..) => "a tagged value",
            Primitive::Null => "null",
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, encode::Error> {
        let mut e = Encoder::new();
        self.encode(&mut e)?;

        Ok(e.buffer)
    }

    pub fn to_bytes_deterministic(&self) -> Result<Vec<u8>, encode::Error> {
        let mut e = Encoder::deterministic();
        self.encode(&mut e)?;

        Ok(e.buffer)
    }

    /// Decodes exactly one value; trailing bytes are an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Primitive, decode::Error> {
        let mut d = Decoder::new(bytes);
        let primitive = d.decode::<Primitive>()?;
        d.finish()?;

        Ok(primitive)
    }
}

impl Encode for Primitive {
    fn encode(&self, e: &mut Encoder) -> Result<(), encode::Error> {
        match self {
            Primitive::UInt(value) => {
                e.header(0, *value);
            }
            Primitive::Int(value) => {
                if *value >= 0 {
                    e.header(0, *value as u64);
                } else {
                    e.header(1, (-(*value + 1)) as u64);
                }
            }
            Primitive::BigUInt(magnitude) => {
                e.tag(BIG_UINT_TAG).bytes(magnitude);
            }
            Primitive::BigNInt(magnitude) => {
                e.tag(BIG_NINT_TAG).bytes(magnitude);
            }
            Primitive::Bytes(bytes) => {
                e.bytes(bytes);
            }
            Primitive::Text(text) => {
                e.text(text);
            }
            Primitive::Array(items) => {
                e.array(items.len() as u64);

                for item in items {
                    item.encode(e)?;
                }
            }
            Primitive::IndefArray(items) => {
                e.begin_array();

                for item in items {
                    item.encode(e)?;
                }

                e.break_marker();
            }
            Primitive::Map(pairs) => {
                e.map(pairs.len() as u64);

                if e.is_deterministic() {
                    let mut entries = Vec::with_capacity(pairs.len());

                    for (key, value) in pairs {
                        entries.push((
                            key.to_bytes_deterministic()?,
                            value.to_bytes_deterministic()?,
                        ));
                    }

                    entries.sort_by(|(a, _), (b, _)| {
                        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
                    });

                    for (key, value) in entries {
                        e.raw(&key).raw(&value);
                    }
                } else {
                    for (key, value) in pairs {
                        key.encode(e)?;
                        value.encode(e)?;
                    }
                }
            }
            Primitive::Tagged(tag, inner) => {
                e.tag(*tag);
                inner.encode(e)?;
            }
            Primitive::Null => {
                e.null();
            }
        }

        Ok(())
    }
}

impl<'b> Decode<'b> for Primitive {
    fn decode(d: &mut Decoder<'b>) -> Result<Self, decode::Error> {
        d.enter()?;

        let start = d.pos;
        let (major, head) = d.type_header()?;

        let primitive = match (major, head) {
            (0, Head::Value(value)) => Primitive::UInt(value),
            (1, Head::Value(value)) => {
                if value > i64::MAX as u64 {
                    return Err(decode::Error::IntegerOverflow(start));
                }

                Primitive::Int(-1 - value as i64)
            }
            (2, Head::Value(len)) => Primitive::Bytes(d.take(len as usize)?.to_vec()),
            (2, Head::Indefinite) => {
                let mut payload = Vec::new();

                while !d.peek_break() {
                    let chunk_start = d.pos;

                    match d.type_header()? {
                        (2, Head::Value(len)) => {
                            payload.extend_from_slice(d.take(len as usize)?)
                        }
                        _ => return Err(decode::Error::InvalidChunk(chunk_start)),
                    }
                }

                d.consume_break()?;

                Primitive::Bytes(payload)
            }
            (3, Head::Value(len)) => {
                Primitive::Text(String::from_utf8(d.take(len as usize)?.to_vec())?)
            }
            (3, Head::Indefinite) => {
                return Err(decode::Error::UnsupportedIndefinite("text string", start))
            }
            (4, Head::Value(len)) => {
                let mut items = Vec::new();

                for _ in 0..len {
                    items.push(Primitive::decode(d)?);
                }

                Primitive::Array(items)
            }
            (4, Head::Indefinite) => {
                let mut items = Vec::new();

                while !d.peek_break() {
                    items.push(Primitive::decode(d)?);
                }

                d.consume_break()?;

                Primitive::IndefArray(items)
            }
            (5, Head::Value(len)) => {
                let mut pairs = Vec::new();

                for _ in 0..len {
                    let key = Primitive::decode(d)?;
                    let value = Primitive::decode(d)?;
                    pairs.push((key, value));
                }

                Primitive::Map(pairs)
            }
            (5, Head::Indefinite) => {
                return Err(decode::Error::UnsupportedIndefinite("map", start))
            }
            (6, Head::Value(tag)) => match (tag, Primitive::decode(d)?) {
                (BIG_UINT_TAG, Primitive::Bytes(magnitude)) => Primitive::BigUInt(magnitude),
                (BIG_NINT_TAG, Primitive::Bytes(magnitude)) => Primitive::BigNInt(magnitude),
                (BIG_UINT_TAG | BIG_NINT_TAG, _) => {
                    return Err(decode::Error::InvalidBignum(tag, start))
                }
                (tag, inner) => Primitive::Tagged(tag, Box::new(inner)),
            },
            (7, Head::Value(22)) => Primitive::Null,
            (7, Head::Value(simple)) => {
                return Err(decode::Error::UnsupportedSimple(simple, start))
            }
            (initial, _) => {
                return Err(decode::Error::MalformedHeader(initial << 5, start))
            }
        };

        d.exit();

        Ok(primitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn round_trip(hex_bytes: &str) -> Primitive {
        let bytes = hex::decode(hex_bytes).unwrap();
        let primitive = Primitive::from_bytes(&bytes).unwrap();

        assert_eq!(hex::encode(primitive.to_bytes().unwrap()), hex_bytes);

        primitive
    }

    #[test]
    fn integers() {
        assert_eq!(round_trip("00"), Primitive::UInt(0));
        assert_eq!(round_trip("1864"), Primitive::UInt(100));
        assert_eq!(round_trip("20"), Primitive::Int(-1));
        assert_eq!(
            round_trip("3b7fffffffffffffff"),
            Primitive::Int(i64::MIN)
        );
    }

    #[test]
    fn negative_beyond_sixty_four_bits_is_rejected() {
        let bytes = hex::decode("3b8000000000000000").unwrap();

        assert!(matches!(
            Primitive::from_bytes(&bytes),
            Err(decode::Error::IntegerOverflow(0))
        ));
    }

    #[test]
    fn bignums_carry_raw_magnitudes() {
        assert_eq!(
            round_trip("c249010000000000000000"),
            Primitive::BigUInt(hex::decode("010000000000000000").unwrap())
        );
        assert_eq!(
            round_trip("c349010000000000000000"),
            Primitive::BigNInt(hex::decode("010000000000000000").unwrap())
        );
    }

    #[test]
    fn bignum_must_wrap_bytes() {
        let bytes = hex::decode("c200").unwrap();

        assert!(matches!(
            Primitive::from_bytes(&bytes),
            Err(decode::Error::InvalidBignum(2, 0))
        ));
    }

    #[test]
    fn definite_and_indefinite_arrays_stay_distinct() {
        assert_eq!(
            round_trip("820001"),
            Primitive::Array(vec![Primitive::UInt(0), Primitive::UInt(1)])
        );
        assert_eq!(
            round_trip("9f0001ff"),
            Primitive::IndefArray(vec![Primitive::UInt(0), Primitive::UInt(1)])
        );
    }

    #[test]
    fn chunked_byte_strings_concatenate() {
        let bytes = hex::decode("5f42abcd41efff").unwrap();

        assert_eq!(
            Primitive::from_bytes(&bytes).unwrap(),
            Primitive::Bytes(hex::decode("abcdef").unwrap())
        );
    }

    #[test]
    fn maps_preserve_insertion_order() {
        let primitive = round_trip("a2016161026162");

        assert_eq!(
            primitive,
            Primitive::Map(vec![
                (Primitive::UInt(1), Primitive::Text("a".into())),
                (Primitive::UInt(2), Primitive::Text("b".into())),
            ])
        );
    }

    #[test]
    fn deterministic_mode_sorts_map_keys() {
        let primitive = Primitive::Map(vec![
            (Primitive::UInt(256), Primitive::UInt(0)),
            (Primitive::UInt(1), Primitive::UInt(0)),
        ]);

        assert_eq!(hex::encode(primitive.to_bytes().unwrap()), "a2190100000100");
        assert_eq!(
            hex::encode(primitive.to_bytes_deterministic().unwrap()),
            "a2010019010000"
        );
    }

    #[test]
    fn foreign_tags_pass_through() {
        assert_eq!(
            round_trip("d818456449455446"),
            Primitive::Tagged(
                24,
                Box::new(Primitive::Bytes(hex::decode("6449455446").unwrap()))
            )
        );
    }

    #[test]
    fn rejects_indefinite_maps() {
        let bytes = hex::decode("bf0001ff").unwrap();

        assert!(matches!(
            Primitive::from_bytes(&bytes),
            Err(decode::Error::UnsupportedIndefinite("map", 0))
        ));
    }

    #[test]
    fn rejects_booleans() {
        let bytes = hex::decode("f5").unwrap();

        assert!(matches!(
            Primitive::from_bytes(&bytes),
            Err(decode::Error::UnsupportedSimple(21, 0))
        ));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let bytes = hex::decode("0000").unwrap();

        assert!(matches!(
            Primitive::from_bytes(&bytes),
            Err(decode::Error::TrailingBytes(1))
        ));
    }

    #[test]
    fn nesting_is_bounded() {
        let mut bytes = Vec::new();

        for _ in 0..=super::super::decode::MAX_NESTING {
            bytes.push(0x81);
        }

        bytes.push(0x00);

        assert!(matches!(
            Primitive::from_bytes(&bytes),
            Err(decode::Error::NestingLimitExceeded(_))
        ));
    }

    #[test]
    fn accepts_non_minimal_heads() {
        let bytes = hex::decode("1b0000000000000001").unwrap();

        assert_eq!(
            Primitive::from_bytes(&bytes).unwrap(),
            Primitive::UInt(1)
        );
    }
}
