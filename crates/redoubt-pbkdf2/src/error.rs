// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// PBKDF2 error
///
/// Every variant is raised during parameter validation, before any hashing
/// starts, so a failed call never leaves partial output behind.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pbkdf2Error {
    /// A parameter is outside its domain (zero iterations, unknown hash algorithm)
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// Requested key needs more than 2^32 - 1 PRF blocks (RFC 8018 Section 5.2)
    #[error("derived key too long: {requested} bytes needs more than 2^32 - 1 blocks")]
    KeyTooLong {
        /// Requested output length in bytes
        requested: usize,
    },
}
