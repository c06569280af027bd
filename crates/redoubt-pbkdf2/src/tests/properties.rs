// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use crate::{HashAlgorithm, Pbkdf2Error, derive, hash, hmac};

fn algorithm() -> impl Strategy<Value = HashAlgorithm> {
    prop_oneof![Just(HashAlgorithm::Sha256), Just(HashAlgorithm::Sha512)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn digest_has_fixed_length_and_is_deterministic(
        algorithm in algorithm(),
        message in prop::collection::vec(any::<u8>(), 0..300),
    ) {
        let first = hash(algorithm, &message);
        let second = hash(algorithm, &message);

        prop_assert_eq!(first.len(), algorithm.hash_len());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn hmac_has_digest_length(
        algorithm in algorithm(),
        key in prop::collection::vec(any::<u8>(), 0..200),
        message in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        prop_assert_eq!(hmac(algorithm, &key, &message).len(), algorithm.hash_len());
    }

    #[test]
    fn derived_key_has_requested_length(
        algorithm in algorithm(),
        len in 0usize..200,
        iterations in 1u32..4,
    ) {
        let key = derive(b"password", b"salt", iterations, Some(len), algorithm)
            .expect("Failed to derive(..)");
        prop_assert_eq!(key.len(), len);
    }

    #[test]
    fn single_byte_change_alters_key(
        password in prop::collection::vec(any::<u8>(), 1..40),
        salt in prop::collection::vec(any::<u8>(), 1..40),
        flip_password in any::<bool>(),
        index in any::<prop::sample::Index>(),
    ) {
        let original = derive(&password, &salt, 2, None, HashAlgorithm::Sha256)
            .expect("Failed to derive(..)");

        let (mut password, mut salt) = (password, salt);
        let target = if flip_password { &mut password } else { &mut salt };
        let at = index.index(target.len());
        target[at] ^= 0x01;

        let changed = derive(&password, &salt, 2, None, HashAlgorithm::Sha256)
            .expect("Failed to derive(..)");
        prop_assert_ne!(original, changed);
    }

    #[test]
    fn zero_iterations_always_rejected(
        algorithm in algorithm(),
        password in prop::collection::vec(any::<u8>(), 0..40),
        len in prop::option::of(0usize..100),
    ) {
        let result = derive(&password, b"salt", 0, len, algorithm);
        prop_assert!(matches!(result, Err(Pbkdf2Error::InvalidParameter(_))));
    }
}
