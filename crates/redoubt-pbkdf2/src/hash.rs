// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Whole-message SHA-2 hashing and algorithm selection.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use zeroize::Zeroize;

use crate::consts::{SHA256_BLOCK_LEN, SHA256_HASH_LEN, SHA512_BLOCK_LEN, SHA512_HASH_LEN};
use crate::error::Pbkdf2Error;
use crate::sha256::Sha256State;
use crate::sha512::Sha512State;

/// Incremental SHA-2 engine shared by the HMAC and PBKDF2 layers.
///
/// `finalize` leaves the state reset to H(0), ready for the next message.
pub(crate) trait Sha2Core: Clone + Zeroize {
    const BLOCK_LEN: usize;
    const HASH_LEN: usize;

    type Block: AsRef<[u8]> + AsMut<[u8]> + Zeroize;
    type Digest: AsRef<[u8]> + AsMut<[u8]> + Zeroize;

    fn new() -> Self;
    fn zero_block() -> Self::Block;
    fn zero_digest() -> Self::Digest;
    fn update(&mut self, data: &[u8]);
    fn finalize(&mut self, out: &mut Self::Digest);
    fn reset(&mut self);

    /// Every field, H included, holds zero
    #[cfg(test)]
    fn is_zeroized(&self) -> bool;

    /// H holds H(0) and every other field holds zero
    #[cfg(test)]
    fn is_reset(&self) -> bool;
}

/// SHA-2 variant selecting the hash behind [`hash()`](crate::hash()),
/// [`hmac()`](crate::hmac()) and [`derive()`](crate::derive()).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256: 32-bit words, 64-byte blocks, 32-byte digest
    #[default]
    Sha256,
    /// SHA-512: 64-bit words, 128-byte blocks, 64-byte digest
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes
    pub const fn hash_len(self) -> usize {
        match self {
            Self::Sha256 => SHA256_HASH_LEN,
            Self::Sha512 => SHA512_HASH_LEN,
        }
    }

    /// Block length in bytes
    pub const fn block_len(self) -> usize {
        match self {
            Self::Sha256 => SHA256_BLOCK_LEN,
            Self::Sha512 => SHA512_BLOCK_LEN,
        }
    }

    /// Canonical lowercase identifier
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Pbkdf2Error;

    /// Accepts `sha256`, `sha-256`, `sha512`, `sha-512` (ASCII case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NAMES: [(&str, HashAlgorithm); 4] = [
            ("sha256", HashAlgorithm::Sha256),
            ("sha-256", HashAlgorithm::Sha256),
            ("sha512", HashAlgorithm::Sha512),
            ("sha-512", HashAlgorithm::Sha512),
        ];

        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, algorithm)| *algorithm)
            .ok_or(Pbkdf2Error::InvalidParameter("unsupported hash algorithm"))
    }
}

pub(crate) fn digest_into<H: Sha2Core>(message: &[u8], out: &mut H::Digest) {
    let mut state = H::new();
    state.update(message);
    state.finalize(out);
}

fn digest_vec<H: Sha2Core>(message: &[u8]) -> Vec<u8> {
    let mut digest = H::zero_digest();
    digest_into::<H>(message, &mut digest);
    let out = digest.as_ref().to_vec();
    digest.zeroize();
    out
}

/// SHA-256 of `message`.
///
/// # Example
///
/// ```rust
/// use redoubt_pbkdf2::{sha256, SHA256_HASH_LEN};
///
/// let mut digest = [0u8; SHA256_HASH_LEN];
/// sha256(b"abc", &mut digest);
/// assert_eq!(digest[..4], [0xba, 0x78, 0x16, 0xbf]);
/// ```
pub fn sha256(message: &[u8], out: &mut [u8; SHA256_HASH_LEN]) {
    digest_into::<Sha256State>(message, out);
}

/// SHA-512 of `message`.
pub fn sha512(message: &[u8], out: &mut [u8; SHA512_HASH_LEN]) {
    digest_into::<Sha512State>(message, out);
}

/// Hash `message` with `algorithm`, returning `algorithm.hash_len()` bytes.
///
/// Total over all inputs, the empty message included.
pub fn hash(algorithm: HashAlgorithm, message: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => digest_vec::<Sha256State>(message),
        HashAlgorithm::Sha512 => digest_vec::<Sha512State>(message),
    }
}
