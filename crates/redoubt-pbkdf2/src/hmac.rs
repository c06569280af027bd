// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! HMAC over SHA-2 per RFC 2104

use alloc::vec::Vec;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::{SHA256_HASH_LEN, SHA512_HASH_LEN};
use crate::hash::{HashAlgorithm, Sha2Core};
use crate::sha256::Sha256State;
use crate::sha512::Sha512State;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// HMAC state with all intermediate buffers.
///
/// Keying absorbs `K ⊕ ipad` and `K ⊕ opad` once into two hash states; every
/// `mac` call then starts from a copy of those snapshots, so a fixed key (the
/// PBKDF2 password) is processed only once per derivation.
pub(crate) struct HmacState<H: Sha2Core> {
    /// K ⊕ ipad
    k_ipad: H::Block,
    /// K ⊕ opad
    k_opad: H::Block,
    /// Key zero-padded to one block (hashed first when longer than a block)
    key_block: H::Block,
    /// Hash state after absorbing K ⊕ ipad
    inner_keyed: H,
    /// Hash state after absorbing K ⊕ opad
    outer_keyed: H,
    /// Working copy for the current message
    sha: H,
    /// H(K ⊕ ipad || message)
    inner_hash: H::Digest,
}

impl<H: Sha2Core> HmacState<H> {
    /// Create an unkeyed HMAC state; `init` must run before `mac`
    pub fn new() -> Self {
        Self {
            k_ipad: H::zero_block(),
            k_opad: H::zero_block(),
            key_block: H::zero_block(),
            inner_keyed: H::new(),
            outer_keyed: H::new(),
            sha: H::new(),
            inner_hash: H::zero_digest(),
        }
    }

    /// Key the state per RFC 2104 Section 2
    pub fn init(&mut self, key: &[u8]) {
        self.key_block.zeroize();

        if key.len() > H::BLOCK_LEN {
            // Long keys are replaced by H(key)
            self.sha.reset();
            self.sha.update(key);
            self.sha.finalize(&mut self.inner_hash);
            self.key_block.as_mut()[..H::HASH_LEN].copy_from_slice(self.inner_hash.as_ref());
            self.inner_hash.zeroize();
        } else {
            self.key_block.as_mut()[..key.len()].copy_from_slice(key);
        }

        for ((ipad, opad), k) in self
            .k_ipad
            .as_mut()
            .iter_mut()
            .zip(self.k_opad.as_mut().iter_mut())
            .zip(self.key_block.as_ref())
        {
            *ipad = k ^ IPAD;
            *opad = k ^ OPAD;
        }

        self.inner_keyed.reset();
        self.inner_keyed.update(self.k_ipad.as_ref());
        self.outer_keyed.reset();
        self.outer_keyed.update(self.k_opad.as_ref());

        self.k_ipad.zeroize();
        self.k_opad.zeroize();
        self.key_block.zeroize();
    }

    /// H(K ⊕ opad || H(K ⊕ ipad || data)) with the current key
    pub fn mac(&mut self, data: &[u8], out: &mut H::Digest) {
        // Inner hash
        self.sha.clone_from(&self.inner_keyed);
        self.sha.update(data);
        self.sha.finalize(&mut self.inner_hash);

        // Outer hash
        self.sha.clone_from(&self.outer_keyed);
        self.sha.update(self.inner_hash.as_ref());
        self.sha.finalize(out);

        self.inner_hash.zeroize();
    }

    /// Key, then MAC a single message
    pub fn compute(&mut self, key: &[u8], data: &[u8], out: &mut H::Digest) {
        self.init(key);
        self.mac(data, out);
    }

    #[cfg(test)]
    fn buffers_are_zeroized(&self) -> bool {
        [
            self.k_ipad.as_ref(),
            self.k_opad.as_ref(),
            self.key_block.as_ref(),
            self.inner_hash.as_ref(),
        ]
        .iter()
        .all(|bytes| bytes.iter().all(|&b| b == 0))
    }

    /// Scratch cleared after keying or a MAC; keyed snapshots untouched
    #[cfg(test)]
    pub(crate) fn scratch_is_zeroized(&self) -> bool {
        self.buffers_are_zeroized() && self.sha.is_reset()
    }

    #[cfg(test)]
    pub(crate) fn is_zeroized(&self) -> bool {
        self.buffers_are_zeroized()
            && self.sha.is_zeroized()
            && self.inner_keyed.is_zeroized()
            && self.outer_keyed.is_zeroized()
    }
}

impl<H: Sha2Core> Zeroize for HmacState<H> {
    fn zeroize(&mut self) {
        self.k_ipad.zeroize();
        self.k_opad.zeroize();
        self.key_block.zeroize();
        self.inner_keyed.zeroize();
        self.outer_keyed.zeroize();
        self.sha.zeroize();
        self.inner_hash.zeroize();
    }
}

impl<H: Sha2Core> Drop for HmacState<H> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<H: Sha2Core> ZeroizeOnDrop for HmacState<H> {}

fn hmac_vec<H: Sha2Core>(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut state = HmacState::<H>::new();
    let mut tag = H::zero_digest();
    state.compute(key, message, &mut tag);
    let out = tag.as_ref().to_vec();
    tag.zeroize();
    out
}

/// HMAC-SHA256 of `message` under `key` (any key length).
///
/// # Example
///
/// ```rust
/// use redoubt_pbkdf2::{hmac_sha256, SHA256_HASH_LEN};
///
/// let mut tag = [0u8; SHA256_HASH_LEN];
/// hmac_sha256(b"Jefe", b"what do ya want for nothing?", &mut tag);
/// assert_eq!(tag[..4], [0x5b, 0xdc, 0xc1, 0x46]);
/// ```
pub fn hmac_sha256(key: &[u8], message: &[u8], out: &mut [u8; SHA256_HASH_LEN]) {
    HmacState::<Sha256State>::new().compute(key, message, out);
}

/// HMAC-SHA512 of `message` under `key` (any key length).
pub fn hmac_sha512(key: &[u8], message: &[u8], out: &mut [u8; SHA512_HASH_LEN]) {
    HmacState::<Sha512State>::new().compute(key, message, out);
}

/// HMAC of `message` under `key` with `algorithm`, returning
/// `algorithm.hash_len()` bytes.
pub fn hmac(algorithm: HashAlgorithm, key: &[u8], message: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => hmac_vec::<Sha256State>(key, message),
        HashAlgorithm::Sha512 => hmac_vec::<Sha512State>(key, message),
    }
}
