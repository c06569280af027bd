// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Word32 / Word64 - fixed-width SHA-2 words with zeroization on drop.
//!
//! The word width is pinned by the wrapped integer type, so every add is a
//! `wrapping_add` modulo 2^32 (resp. 2^64) and every rotation is the native
//! fused `rotate_right` on that width. Nothing is ever widened or sign-extended.

use zeroize::{Zeroize, ZeroizeOnDrop};

macro_rules! sha2_word {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty) {
            bsig0: ($b0a:literal, $b0b:literal, $b0c:literal),
            bsig1: ($b1a:literal, $b1b:literal, $b1c:literal),
            ssig0: ($s0a:literal, $s0b:literal, shr $s0c:literal),
            ssig1: ($s1a:literal, $s1b:literal, shr $s1c:literal) $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
        #[repr(transparent)]
        pub(crate) struct $name($inner);

        impl $name {
            /// Size of the word in bytes
            pub const BYTES: usize = core::mem::size_of::<$inner>();

            #[inline(always)]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            #[inline(always)]
            pub const fn zero() -> Self {
                Self(0)
            }

            #[inline(always)]
            pub fn get(&self) -> $inner {
                self.0
            }

            #[inline(always)]
            pub fn set(&mut self, value: $inner) {
                self.0 = value;
            }

            #[inline(always)]
            pub fn copy_from(&mut self, src: &Self) {
                self.0 = src.0;
            }

            /// Load word from exactly `BYTES` big-endian bytes
            #[inline(always)]
            pub fn fill_with_be_bytes(&mut self, bytes: &[u8]) {
                let mut raw = [0u8; core::mem::size_of::<$inner>()];
                raw.copy_from_slice(bytes);
                self.0 = <$inner>::from_be_bytes(raw);
                raw.zeroize();
            }

            /// Store word as exactly `BYTES` big-endian bytes
            #[inline(always)]
            pub fn write_be_bytes(&self, out: &mut [u8]) {
                out.copy_from_slice(&self.0.to_be_bytes());
            }

            // ═══════════════════════════════════════════════════════════════
            // In-place arithmetic / bitwise operations
            // ═══════════════════════════════════════════════════════════════

            /// self += rhs (mod 2^w)
            #[inline(always)]
            pub fn wrapping_add_assign(&mut self, rhs: &Self) {
                self.0 = self.0.wrapping_add(rhs.0);
            }

            /// self += rhs (mod 2^w, raw value)
            #[inline(always)]
            pub fn wrapping_add_assign_val(&mut self, rhs: $inner) {
                self.0 = self.0.wrapping_add(rhs);
            }

            #[inline(always)]
            pub fn xor_assign(&mut self, rhs: &Self) {
                self.0 ^= rhs.0;
            }

            #[inline(always)]
            pub fn and_assign(&mut self, rhs: &Self) {
                self.0 &= rhs.0;
            }

            #[inline(always)]
            pub fn not_assign(&mut self) {
                self.0 = !self.0;
            }

            // ═══════════════════════════════════════════════════════════════
            // SHA-2 functions per FIPS 180-4 Section 4.1
            // ═══════════════════════════════════════════════════════════════

            /// Ch(x,y,z) = (x ∧ y) ⊕ (¬x ∧ z)
            #[inline(always)]
            pub fn set_ch(out: &mut Self, x: &Self, y: &Self, z: &Self) {
                let mut not_x_and_z = x.clone();
                not_x_and_z.not_assign();
                not_x_and_z.and_assign(z);

                out.copy_from(x);
                out.and_assign(y);
                out.xor_assign(&not_x_and_z);
            }

            /// Maj(x,y,z) = (x ∧ y) ⊕ (x ∧ z) ⊕ (y ∧ z)
            ///
            /// Computed as (x & y) ^ (z & (x ^ y)).
            #[inline(always)]
            pub fn set_maj(out: &mut Self, x: &Self, y: &Self, z: &Self) {
                let mut z_and_x_xor_y = x.clone();
                z_and_x_xor_y.xor_assign(y);
                z_and_x_xor_y.and_assign(z);

                out.copy_from(x);
                out.and_assign(y);
                out.xor_assign(&z_and_x_xor_y);
            }

            #[doc = concat!("Σ0(x) = ROTR^", $b0a, "(x) ⊕ ROTR^", $b0b, "(x) ⊕ ROTR^", $b0c, "(x)")]
            #[inline(always)]
            pub fn set_bsig0(out: &mut Self, x: &Self) {
                out.0 = x.0.rotate_right($b0a) ^ x.0.rotate_right($b0b) ^ x.0.rotate_right($b0c);
            }

            #[doc = concat!("Σ1(x) = ROTR^", $b1a, "(x) ⊕ ROTR^", $b1b, "(x) ⊕ ROTR^", $b1c, "(x)")]
            #[inline(always)]
            pub fn set_bsig1(out: &mut Self, x: &Self) {
                out.0 = x.0.rotate_right($b1a) ^ x.0.rotate_right($b1b) ^ x.0.rotate_right($b1c);
            }

            #[doc = concat!("σ0(x) = ROTR^", $s0a, "(x) ⊕ ROTR^", $s0b, "(x) ⊕ SHR^", $s0c, "(x)")]
            #[inline(always)]
            pub fn set_ssig0(out: &mut Self, x: &Self) {
                out.0 = x.0.rotate_right($s0a) ^ x.0.rotate_right($s0b) ^ (x.0 >> $s0c);
            }

            #[doc = concat!("σ1(x) = ROTR^", $s1a, "(x) ⊕ ROTR^", $s1b, "(x) ⊕ SHR^", $s1c, "(x)")]
            #[inline(always)]
            pub fn set_ssig1(out: &mut Self, x: &Self) {
                out.0 = x.0.rotate_right($s1a) ^ x.0.rotate_right($s1b) ^ (x.0 >> $s1c);
            }

            /// Returns `true` if the word holds zero
            #[cfg(test)]
            pub(crate) fn is_zeroized(&self) -> bool {
                self.0 == 0
            }
        }
    };
}

sha2_word! {
    /// 32-bit SHA-256 word
    Word32(u32) {
        bsig0: (2, 13, 22),
        bsig1: (6, 11, 25),
        ssig0: (7, 18, shr 3),
        ssig1: (17, 19, shr 10),
    }
}

sha2_word! {
    /// 64-bit SHA-512 word
    Word64(u64) {
        bsig0: (28, 34, 39),
        bsig1: (14, 18, 41),
        ssig0: (1, 8, shr 7),
        ssig1: (19, 61, shr 6),
    }
}
