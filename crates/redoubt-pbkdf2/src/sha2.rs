// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! SHA-2 state machine per FIPS 180-4 Sections 5.1 and 6.
//!
//! SHA-256 and SHA-512 share the same message schedule, round structure and
//! padding; they differ only in word type, round constants, block size and the
//! width of the trailing length field. `sha2_state!` generates one state type
//! per variant from those parameters.

macro_rules! sha2_state {
    (
        $(#[$meta:meta])*
        $name:ident {
            word: $word:ident($inner:ty),
            length: $len:ty,
            block_len: $block_len:expr,
            hash_len: $hash_len:expr,
            k: $k:ident,
            h0: $h0:ident $(,)?
        }
    ) => {
        $(#[$meta])*
        ///
        /// All working variables live in the struct so they are zeroized on drop.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub(crate) struct $name {
            // Hash state H(i)
            h: [$word; 8],

            // Message schedule W[0..ROUNDS-1]
            w: [$word; $k.len()],

            // Working variables a..h
            wv: [$word; 8],

            // T1 = h + Σ1(e) + Ch(e,f,g) + K[t] + W[t]
            t1: $word,
            // T2 = Σ0(a) + Maj(a,b,c)
            t2: $word,
            // σ/Σ/Ch/Maj results
            scratch: $word,

            // Input buffering
            buffer: [u8; $block_len],
            tmp_block: [u8; $block_len],
            buffer_len: usize,
            // Total message length in bytes
            total_len: $len,
        }

        impl $name {
            /// Message length field: big-endian bit count
            const LEN_FIELD: usize = core::mem::size_of::<$len>();

            /// Create new state initialized with H(0)
            pub fn new() -> Self {
                Self {
                    h: $h0.map($word::new),
                    w: core::array::from_fn(|_| $word::zero()),
                    wv: core::array::from_fn(|_| $word::zero()),
                    t1: $word::zero(),
                    t2: $word::zero(),
                    scratch: $word::zero(),
                    buffer: [0u8; $block_len],
                    tmp_block: [0u8; $block_len],
                    buffer_len: 0,
                    total_len: 0,
                }
            }

            /// Single compression of `block` into a caller supplied chaining value.
            #[cfg(test)]
            pub fn compress_block(&mut self, h: &mut [$inner; 8], block: &[u8; $block_len]) {
                for (word, value) in self.h.iter_mut().zip(h.iter()) {
                    word.set(*value);
                }

                self.tmp_block.copy_from_slice(block);
                self.compress();
                self.tmp_block.zeroize();

                for (value, word) in h.iter_mut().zip(self.h.iter()) {
                    *value = word.get();
                }
                self.reset();
            }

            /// Compress `tmp_block` into H per FIPS 180-4 Section 6.2.2 / 6.4.2
            fn compress(&mut self) {
                // W[0..15] from block (big-endian)
                for (wt, chunk) in self
                    .w
                    .iter_mut()
                    .zip(self.tmp_block.chunks_exact($word::BYTES))
                {
                    wt.fill_with_be_bytes(chunk);
                }

                // W[t] = σ1(W[t-2]) + W[t-7] + σ0(W[t-15]) + W[t-16]
                for t in 16..$k.len() {
                    $word::set_ssig1(&mut self.scratch, &self.w[t - 2]);
                    self.w[t].copy_from(&self.scratch);

                    self.w[t].wrapping_add_assign_val(self.w[t - 7].get());

                    $word::set_ssig0(&mut self.scratch, &self.w[t - 15]);
                    self.w[t].wrapping_add_assign(&self.scratch);

                    self.w[t].wrapping_add_assign_val(self.w[t - 16].get());
                }

                for (wv, h) in self.wv.iter_mut().zip(self.h.iter()) {
                    wv.copy_from(h);
                }

                for (k, wt) in $k.iter().zip(self.w.iter_mut()) {
                    self.t1.copy_from(&self.wv[7]);

                    $word::set_bsig1(&mut self.scratch, &self.wv[4]);
                    self.t1.wrapping_add_assign(&self.scratch);

                    $word::set_ch(&mut self.scratch, &self.wv[4], &self.wv[5], &self.wv[6]);
                    self.t1.wrapping_add_assign(&self.scratch);

                    self.t1.wrapping_add_assign_val(*k);
                    self.t1.wrapping_add_assign(wt);

                    // W[t] no longer needed
                    wt.zeroize();

                    $word::set_bsig0(&mut self.t2, &self.wv[0]);
                    $word::set_maj(&mut self.scratch, &self.wv[0], &self.wv[1], &self.wv[2]);
                    self.t2.wrapping_add_assign(&self.scratch);

                    // h=g, g=f, f=e, e=d+T1, d=c, c=b, b=a, a=T1+T2
                    self.wv.rotate_right(1);
                    self.wv[4].wrapping_add_assign(&self.t1);
                    self.wv[0].copy_from(&self.t1);
                    self.wv[0].wrapping_add_assign(&self.t2);
                }

                self.t1.zeroize();
                self.t2.zeroize();
                self.scratch.zeroize();

                // H(i) = H(i-1) + working variables
                for (h, wv) in self.h.iter_mut().zip(self.wv.iter_mut()) {
                    h.wrapping_add_assign(wv);
                    wv.zeroize();
                }
            }

            /// Compress `buffer` (always a full block here)
            fn compress_buffer(&mut self) {
                self.tmp_block.copy_from_slice(&self.buffer);
                self.compress();
                self.tmp_block.zeroize();
                self.buffer.zeroize();
                self.buffer_len = 0;
            }

            #[cfg(test)]
            fn scratch_is_zeroized(&self) -> bool {
                self.w.iter().all(|w| w.is_zeroized())
                    && self.wv.iter().all(|w| w.is_zeroized())
                    && self.t1.is_zeroized()
                    && self.t2.is_zeroized()
                    && self.scratch.is_zeroized()
                    && self.buffer.iter().all(|&b| b == 0)
                    && self.tmp_block.iter().all(|&b| b == 0)
                    && self.buffer_len == 0
                    && self.total_len == 0
            }
        }

        impl Sha2Core for $name {
            const BLOCK_LEN: usize = $block_len;
            const HASH_LEN: usize = $hash_len;

            type Block = [u8; $block_len];
            type Digest = [u8; $hash_len];

            fn new() -> Self {
                $name::new()
            }

            fn zero_block() -> Self::Block {
                [0u8; $block_len]
            }

            fn zero_digest() -> Self::Digest {
                [0u8; $hash_len]
            }

            fn update(&mut self, data: &[u8]) {
                let mut offset = 0;
                self.total_len = self.total_len.wrapping_add(data.len() as $len);

                // Top up a partially filled buffer first
                if self.buffer_len > 0 {
                    let copy_len = core::cmp::min($block_len - self.buffer_len, data.len());

                    self.buffer[self.buffer_len..self.buffer_len + copy_len]
                        .copy_from_slice(&data[..copy_len]);
                    self.buffer_len += copy_len;
                    offset = copy_len;

                    if self.buffer_len == $block_len {
                        self.compress_buffer();
                    }
                }

                // Full blocks straight from the input
                while offset + $block_len <= data.len() {
                    self.tmp_block
                        .copy_from_slice(&data[offset..offset + $block_len]);
                    self.compress();
                    self.tmp_block.zeroize();
                    offset += $block_len;
                }

                if offset < data.len() {
                    let remaining = data.len() - offset;
                    self.buffer[..remaining].copy_from_slice(&data[offset..]);
                    self.buffer_len = remaining;
                }
            }

            fn finalize(&mut self, out: &mut Self::Digest) {
                // Padding per FIPS 180-4 Section 5.1
                let bit_len = self.total_len.wrapping_mul(8);

                self.buffer[self.buffer_len] = 0x80;
                self.buffer_len += 1;

                // Not enough room for the length field: pad out this block first
                if self.buffer_len > $block_len - Self::LEN_FIELD {
                    self.buffer[self.buffer_len..].fill(0);
                    self.compress_buffer();
                }

                self.buffer[self.buffer_len..$block_len - Self::LEN_FIELD].fill(0);
                self.buffer[$block_len - Self::LEN_FIELD..].copy_from_slice(&bit_len.to_be_bytes());
                self.compress_buffer();

                for (word, chunk) in self.h.iter().zip(out.chunks_exact_mut($word::BYTES)) {
                    word.write_be_bytes(chunk);
                }

                self.reset();
            }

            fn reset(&mut self) {
                self.zeroize();
                for (word, value) in self.h.iter_mut().zip($h0) {
                    word.set(value);
                }
            }

            #[cfg(test)]
            fn is_zeroized(&self) -> bool {
                self.h.iter().all(|w| w.is_zeroized()) && self.scratch_is_zeroized()
            }

            #[cfg(test)]
            fn is_reset(&self) -> bool {
                self.h.iter().map(|w| w.get()).eq($h0) && self.scratch_is_zeroized()
            }
        }
    };
}

pub(crate) use sha2_state;
