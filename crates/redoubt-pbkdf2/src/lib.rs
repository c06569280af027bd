// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! PBKDF2 with secure memory handling
//!
//! SHA-256 / SHA-512 (FIPS 180-4), HMAC (RFC 2104) and PBKDF2 (RFC 8018),
//! implemented from first principles. All intermediate values are zeroized.
//!
//! Layers depend strictly downwards: PBKDF2 → HMAC → SHA-2. Every entry point
//! is a pure function over its arguments; nothing is shared between calls and
//! nothing is printed or logged unless the caller installs a `tracing`
//! subscriber.
//!
//! ```rust
//! use redoubt_pbkdf2::{derive, hash, HashAlgorithm};
//!
//! let digest = hash(HashAlgorithm::Sha256, b"");
//! assert_eq!(digest.len(), 32);
//!
//! let key = derive("hunter2".as_bytes(), b"salt", 1_000, Some(48), HashAlgorithm::Sha512)?;
//! assert_eq!(key.len(), 48);
//! # Ok::<(), redoubt_pbkdf2::Pbkdf2Error>(())
//! ```
//!
//! References:
//! - FIPS 180-4: Secure Hash Standard (SHS)
//!   <https://nvlpubs.nist.gov/nistpubs/fips/nist.fips.180-4.pdf>
//! - RFC 2104: HMAC: Keyed-Hashing for Message Authentication
//!   <https://datatracker.ietf.org/doc/html/rfc2104>
//! - RFC 8018: PKCS #5: Password-Based Cryptography Specification Version 2.1
//!   <https://datatracker.ietf.org/doc/html/rfc8018>

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod consts;
mod error;
mod hash;
mod hmac;
mod pbkdf2;
mod sha2;
mod sha256;
mod sha512;
mod word;

pub use consts::{MAX_BLOCK_COUNT, SHA256_BLOCK_LEN, SHA256_HASH_LEN, SHA512_BLOCK_LEN, SHA512_HASH_LEN};
pub use error::Pbkdf2Error;
pub use hash::{HashAlgorithm, hash, sha256, sha512};
pub use hmac::{hmac, hmac_sha256, hmac_sha512};
pub use pbkdf2::{derive, pbkdf2, pbkdf2_sha256, pbkdf2_sha512};
