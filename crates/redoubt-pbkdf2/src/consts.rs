// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// SHA-256 output size in bytes
pub const SHA256_HASH_LEN: usize = 32;

/// SHA-256 block size in bytes
pub const SHA256_BLOCK_LEN: usize = 64;

/// SHA-512 output size in bytes
pub const SHA512_HASH_LEN: usize = 64;

/// SHA-512 block size in bytes
pub const SHA512_BLOCK_LEN: usize = 128;

/// Largest PBKDF2 block index: INT(i) is a 32-bit big-endian field (RFC 8018 Section 5.2)
pub const MAX_BLOCK_COUNT: u64 = u32::MAX as u64;
