/**
 * @file hashing.rs
 * @author Krisna Pranav
 * @brief Digest helpers
 * @version 0.1
 * @date 2023-05-06
 *
 * @copyright Copyright (c) 2023 Krisna Pranav, NanoBlocksDevelopers
 *
 */

use cryptoxide::{blake2b::Blake2b, digest::Digest};
use std::{fmt, str::FromStr};

/// A fixed-size digest output, displayed and parsed as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash<const BYTES: usize>([u8; BYTES]);

impl<const BYTES: usize> Hash<BYTES> {
    pub const fn new(bytes: [u8; BYTES]) -> Self {
        Hash(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; BYTES] {
        &self.0
    }
}

impl<const BYTES: usize> From<[u8; BYTES]> for Hash<BYTES> {
    fn from(bytes: [u8; BYTES]) -> Self {
        Hash(bytes)
    }
}

impl<const BYTES: usize> AsRef<[u8]> for Hash<BYTES> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const BYTES: usize> fmt::Debug for Hash<BYTES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash<{}>({})", BYTES, hex::encode(self.0))
    }
}

impl<const BYTES: usize> fmt::Display for Hash<BYTES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl<const BYTES: usize> FromStr for Hash<BYTES> {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0; BYTES];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Hash(bytes))
    }
}

pub fn blake2b_256(data: &[u8]) -> Hash<32> {
    let mut context = Blake2b::new(32);
    context.input(data);

    let mut digest = [0; 32];
    context.result(&mut digest);

    Hash::new(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hash_hex_round_trip() {
        let digest = blake2b_256(b"datum");
        let parsed: Hash<32> = digest.to_string().parse().unwrap();

        assert_eq!(digest, parsed);
    }

    #[test]
    fn hash_rejects_wrong_length() {
        assert!("abcd".parse::<Hash<32>>().is_err());
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(blake2b_256(b"datum"), blake2b_256(b"datum"));
        assert_ne!(blake2b_256(b"datum"), blake2b_256(b"mutad"));
    }
}
