/**
 * @file encoder.rs
 * @author Krisna Pranav
 * @brief Encoder
 * @version 0.1
 * @date 2023-05-06
 *
 * @copyright Copyright (c) 2023 Krisna Pranav, NanoBlocksDevelopers
 *
 */

use super::{Encode, Error};
use crate::cbor::BOUNDED_BYTES_LIMIT;

const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_BYTES: u8 = 2;
const MAJOR_TEXT: u8 = 3;
const MAJOR_ARRAY: u8 = 4;
const MAJOR_MAP: u8 = 5;
const MAJOR_TAG: u8 = 6;

const INDEF_BYTES: u8 = 0x5f;
const INDEF_ARRAY: u8 = 0x9f;
const BREAK: u8 = 0xff;
const NULL: u8 = 0xf6;

pub struct Encoder {
    pub buffer: Vec<u8>,
    deterministic: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Encoder {
        Encoder {
            buffer: Vec::new(),
            deterministic: false,
        }
    }

    /// An encoder that additionally sorts map entries by their encoded key
    /// bytes, shortest first then lexicographic.
    pub fn deterministic() -> Encoder {
        Encoder {
            buffer: Vec::new(),
            deterministic: true,
        }
    }

    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    pub fn encode<T: Encode>(&mut self, x: &T) -> Result<&mut Self, Error> {
        x.encode(self)?;

        Ok(self)
    }

    /// Writes a type header with a minimal-length argument.
    pub fn header(&mut self, major: u8, value: u64) -> &mut Self {
        let t = major << 5;

        match value {
            0..=0x17 => self.buffer.push(t | value as u8),
            0x18..=0xff => {
                self.buffer.push(t | 24);
                self.buffer.push(value as u8);
            }
            0x100..=0xffff => {
                self.buffer.push(t | 25);
                self.buffer.extend((value as u16).to_be_bytes());
            }
            0x1_0000..=0xffff_ffff => {
                self.buffer.push(t | 26);
                self.buffer.extend((value as u32).to_be_bytes());
            }
            _ => {
                self.buffer.push(t | 27);
                self.buffer.extend(value.to_be_bytes());
            }
        }

        self
    }

    pub fn unsigned(&mut self, value: u64) -> &mut Self {
        self.header(MAJOR_UNSIGNED, value)
    }

    pub fn tag(&mut self, tag: u64) -> &mut Self {
        self.header(MAJOR_TAG, tag)
    }

    /// Payloads beyond the bounded limit become an indefinite byte string of
    /// bounded chunks.
    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        if bytes.len() <= BOUNDED_BYTES_LIMIT {
            self.header(MAJOR_BYTES, bytes.len() as u64);
            self.buffer.extend_from_slice(bytes);
        } else {
            self.buffer.push(INDEF_BYTES);

            for chunk in bytes.chunks(BOUNDED_BYTES_LIMIT) {
                self.header(MAJOR_BYTES, chunk.len() as u64);
                self.buffer.extend_from_slice(chunk);
            }

            self.buffer.push(BREAK);
        }

        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.header(MAJOR_TEXT, text.len() as u64);
        self.buffer.extend_from_slice(text.as_bytes());

        self
    }

    pub fn array(&mut self, len: u64) -> &mut Self {
        self.header(MAJOR_ARRAY, len)
    }

    pub fn begin_array(&mut self) -> &mut Self {
        self.buffer.push(INDEF_ARRAY);

        self
    }

    pub fn map(&mut self, len: u64) -> &mut Self {
        self.header(MAJOR_MAP, len)
    }

    pub fn break_marker(&mut self) -> &mut Self {
        self.buffer.push(BREAK);

        self
    }

    pub fn null(&mut self) -> &mut Self {
        self.buffer.push(NULL);

        self
    }

    /// Splices already-encoded wire bytes verbatim.
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(bytes);

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn written(f: impl FnOnce(&mut Encoder)) -> String {
        let mut e = Encoder::new();
        f(&mut e);
        hex::encode(e.buffer)
    }

    #[test]
    fn minimal_length_headers() {
        assert_eq!(written(|e| {
            e.unsigned(0);
        }), "00");
        assert_eq!(written(|e| {
            e.unsigned(23);
        }), "17");
        assert_eq!(written(|e| {
            e.unsigned(24);
        }), "1818");
        assert_eq!(written(|e| {
            e.unsigned(255);
        }), "18ff");
        assert_eq!(written(|e| {
            e.unsigned(256);
        }), "190100");
        assert_eq!(written(|e| {
            e.unsigned(65536);
        }), "1a00010000");
        assert_eq!(written(|e| {
            e.unsigned(u64::MAX);
        }), "1bffffffffffffffff");
    }

    #[test]
    fn bounded_bytes_stay_in_one_chunk() {
        let payload = vec![0xab; BOUNDED_BYTES_LIMIT];

        assert_eq!(
            written(|e| {
                e.bytes(&payload);
            }),
            format!("5840{}", hex::encode(&payload))
        );
    }

    #[test]
    fn oversized_bytes_are_chunked() {
        let payload = vec![0xab; BOUNDED_BYTES_LIMIT + 1];

        assert_eq!(
            written(|e| {
                e.bytes(&payload);
            }),
            format!(
                "5f5840{}41ab{}",
                hex::encode(&payload[..BOUNDED_BYTES_LIMIT]),
                "ff"
            )
        );
    }

    #[test]
    fn text_and_null() {
        assert_eq!(written(|e| {
            e.text("hello");
        }), "6568656c6c6f");
        assert_eq!(written(|e| {
            e.null();
        }), "f6");
    }
}
