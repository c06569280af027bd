// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::thread;

use crate::{HashAlgorithm, derive, hash, hmac};

const THREADS: usize = 8;

#[test]
fn test_parallel_calls_match_sequential() {
    let algorithms = [HashAlgorithm::Sha256, HashAlgorithm::Sha512];

    let expected: Vec<(Vec<u8>, Vec<u8>, Vec<u8>)> = (0..THREADS)
        .map(|i| {
            let algorithm = algorithms[i % 2];
            let password = [i as u8; 24];
            (
                hash(algorithm, &password),
                hmac(algorithm, &password, b"message"),
                derive(&password, b"salt", 50, Some(70), algorithm).expect("Failed to derive(..)"),
            )
        })
        .collect();

    let results: Vec<(Vec<u8>, Vec<u8>, Vec<u8>)> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                s.spawn(move || {
                    let algorithm = algorithms[i % 2];
                    let password = [i as u8; 24];
                    (
                        hash(algorithm, &password),
                        hmac(algorithm, &password, b"message"),
                        derive(&password, b"salt", 50, Some(70), algorithm)
                            .expect("Failed to derive(..)"),
                    )
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("Failed to join(..)"))
            .collect()
    });

    assert_eq!(results, expected);
}

#[test]
fn test_parallel_same_input_is_identical() {
    let reference = derive(b"mypassword", b"mysalt", 1_000, None, HashAlgorithm::Sha256)
        .expect("Failed to derive(..)");

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                let key = derive(b"mypassword", b"mysalt", 1_000, None, HashAlgorithm::Sha256)
                    .expect("Failed to derive(..)");
                assert_eq!(key, reference);
            });
        }
    });
}
