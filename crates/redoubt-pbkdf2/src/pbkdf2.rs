// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! PBKDF2 per RFC 8018 Section 5.2

use alloc::vec;
use alloc::vec::Vec;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::MAX_BLOCK_COUNT;
use crate::error::Pbkdf2Error;
use crate::hash::{HashAlgorithm, Sha2Core};
use crate::hmac::HmacState;
use crate::sha256::Sha256State;
use crate::sha512::Sha512State;

/// PBKDF2 state with all intermediate buffers
pub(crate) struct Pbkdf2State<H: Sha2Core> {
    /// PRF keyed with the password for the whole derivation
    prf: HmacState<H>,
    /// U(k-1), then U(k)
    u: H::Digest,
    /// Scratch output for the next PRF call
    u_next: H::Digest,
    /// T(i) = U(1) ⊕ ... ⊕ U(c)
    t: H::Digest,
    /// S || INT(i)
    salt_block: Vec<u8>,
}

impl<H: Sha2Core> Pbkdf2State<H> {
    pub fn new() -> Self {
        Self {
            prf: HmacState::new(),
            u: H::zero_digest(),
            u_next: H::zero_digest(),
            t: H::zero_digest(),
            salt_block: Vec::new(),
        }
    }

    /// Fill `out` with DK. Parameters must already be validated.
    pub fn derive(&mut self, password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) {
        self.prf.init(password);

        self.salt_block.clear();
        self.salt_block.extend_from_slice(salt);
        self.salt_block.extend_from_slice(&[0u8; 4]);
        let index_at = salt.len();

        for (i, chunk) in (1u32..=u32::MAX).zip(out.chunks_mut(H::HASH_LEN)) {
            // U(1) = PRF(P, S || INT(i))
            self.salt_block[index_at..].copy_from_slice(&i.to_be_bytes());
            self.prf.mac(&self.salt_block, &mut self.u);
            self.t.as_mut().copy_from_slice(self.u.as_ref());

            // U(k) = PRF(P, U(k-1)), T ^= U(k)
            for _ in 1..iterations {
                self.prf.mac(self.u.as_ref(), &mut self.u_next);
                core::mem::swap(&mut self.u, &mut self.u_next);
                xor_in_place(self.t.as_mut(), self.u.as_ref());
            }

            // Final block is truncated by the chunk length
            chunk.copy_from_slice(&self.t.as_ref()[..chunk.len()]);
        }

        self.zeroize();
    }

    #[cfg(test)]
    pub(crate) fn is_zeroized(&self) -> bool {
        [self.u.as_ref(), self.u_next.as_ref(), self.t.as_ref()]
            .iter()
            .all(|bytes| bytes.iter().all(|&b| b == 0))
            && self.salt_block.is_empty()
            && self.prf.is_zeroized()
    }
}

impl<H: Sha2Core> Zeroize for Pbkdf2State<H> {
    fn zeroize(&mut self) {
        self.prf.zeroize();
        self.u.zeroize();
        self.u_next.zeroize();
        self.t.zeroize();
        self.salt_block.zeroize();
    }
}

impl<H: Sha2Core> Drop for Pbkdf2State<H> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<H: Sha2Core> ZeroizeOnDrop for Pbkdf2State<H> {}

/// acc ^= rhs, eight bytes at a time with a byte-wise tail.
///
/// Byte-wise XOR is position independent, so lane width does not change the result.
#[inline]
pub(crate) fn xor_in_place(acc: &mut [u8], rhs: &[u8]) {
    debug_assert_eq!(acc.len(), rhs.len());

    let mut acc_lanes = acc.chunks_exact_mut(8);
    let mut rhs_lanes = rhs.chunks_exact(8);

    for (a, b) in (&mut acc_lanes).zip(&mut rhs_lanes) {
        let mut lane_a = [0u8; 8];
        let mut lane_b = [0u8; 8];
        lane_a.copy_from_slice(a);
        lane_b.copy_from_slice(b);

        let x = u64::from_ne_bytes(lane_a) ^ u64::from_ne_bytes(lane_b);
        a.copy_from_slice(&x.to_ne_bytes());

        lane_a.zeroize();
        lane_b.zeroize();
    }

    for (a, b) in acc_lanes
        .into_remainder()
        .iter_mut()
        .zip(rhs_lanes.remainder())
    {
        *a ^= b;
    }
}

/// Reject parameters before any work is done.
fn validate(algorithm: HashAlgorithm, iterations: u32, out_len: usize) -> Result<(), Pbkdf2Error> {
    if iterations == 0 {
        tracing::debug!(%algorithm, "pbkdf2 rejected: iteration count is zero");
        return Err(Pbkdf2Error::InvalidParameter("iteration count must be at least 1"));
    }

    // l = CEIL(dkLen / hLen) must fit INT(i)
    let block_count = (out_len as u64).div_ceil(algorithm.hash_len() as u64);
    if block_count > MAX_BLOCK_COUNT {
        tracing::debug!(%algorithm, out_len, block_count, "pbkdf2 rejected: derived key too long");
        return Err(Pbkdf2Error::KeyTooLong { requested: out_len });
    }

    Ok(())
}

fn run<H: Sha2Core>(password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) {
    Pbkdf2State::<H>::new().derive(password, salt, iterations, out);
}

/// PBKDF2 with HMAC-`algorithm` as PRF, writing `out.len()` bytes of derived key.
///
/// # Errors
///
/// - [`Pbkdf2Error::InvalidParameter`] if `iterations == 0`
/// - [`Pbkdf2Error::KeyTooLong`] if `out` needs more than 2^32 - 1 blocks
///
/// An empty `out` is valid and leaves nothing to compute.
pub fn pbkdf2(
    algorithm: HashAlgorithm,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<(), Pbkdf2Error> {
    validate(algorithm, iterations, out.len())?;

    tracing::trace!(%algorithm, iterations, out_len = out.len(), "pbkdf2 derive");

    if out.is_empty() {
        return Ok(());
    }

    match algorithm {
        HashAlgorithm::Sha256 => run::<Sha256State>(password, salt, iterations, out),
        HashAlgorithm::Sha512 => run::<Sha512State>(password, salt, iterations, out),
    }

    Ok(())
}

/// PBKDF2-HMAC-SHA256
pub fn pbkdf2_sha256(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<(), Pbkdf2Error> {
    pbkdf2(HashAlgorithm::Sha256, password, salt, iterations, out)
}

/// PBKDF2-HMAC-SHA512
pub fn pbkdf2_sha512(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<(), Pbkdf2Error> {
    pbkdf2(HashAlgorithm::Sha512, password, salt, iterations, out)
}

/// Derive a key of `output_len` bytes (digest length of `algorithm` when `None`).
///
/// Text passwords and salts are passed as their UTF-8 bytes (`str::as_bytes`).
///
/// # Example
///
/// ```rust
/// use redoubt_pbkdf2::{derive, HashAlgorithm, Pbkdf2Error};
///
/// let key = derive(b"password", b"salt", 1, None, HashAlgorithm::Sha256)?;
/// assert_eq!(key.len(), 32);
/// assert_eq!(key[..4], [0x12, 0x0f, 0xb6, 0xcf]);
///
/// let err = derive(b"password", b"salt", 0, Some(16), HashAlgorithm::Sha256);
/// assert!(matches!(err, Err(Pbkdf2Error::InvalidParameter(_))));
/// # Ok::<(), Pbkdf2Error>(())
/// ```
pub fn derive(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    output_len: Option<usize>,
    algorithm: HashAlgorithm,
) -> Result<Vec<u8>, Pbkdf2Error> {
    let out_len = output_len.unwrap_or(algorithm.hash_len());

    // Validate before allocating: an oversized request must not reach the allocator
    validate(algorithm, iterations, out_len)?;

    let mut key = vec![0u8; out_len];
    pbkdf2(algorithm, password, salt, iterations, &mut key)?;
    Ok(key)
}
