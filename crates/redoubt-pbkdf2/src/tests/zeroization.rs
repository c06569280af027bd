// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::{SHA256_HASH_LEN, SHA512_HASH_LEN};
use crate::hash::Sha2Core;
use crate::hmac::HmacState;
use crate::pbkdf2::Pbkdf2State;
use crate::sha256::Sha256State;
use crate::sha512::Sha512State;
use crate::word::{Word32, Word64};

fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}

#[test]
fn test_states_zeroize_on_drop() {
    assert_zeroize_on_drop::<Word32>();
    assert_zeroize_on_drop::<Word64>();
    assert_zeroize_on_drop::<Sha256State>();
    assert_zeroize_on_drop::<Sha512State>();
    assert_zeroize_on_drop::<HmacState<Sha256State>>();
    assert_zeroize_on_drop::<HmacState<Sha512State>>();
    assert_zeroize_on_drop::<Pbkdf2State<Sha256State>>();
    assert_zeroize_on_drop::<Pbkdf2State<Sha512State>>();
}

#[test]
fn test_sha256_state_reset_after_finalize() {
    let mut state = Sha256State::new();
    assert!(state.is_reset());

    // Leaves a partial block buffered
    state.update(&[0xa5; 100]);
    assert!(!state.is_reset());

    let mut digest = [0u8; SHA256_HASH_LEN];
    state.finalize(&mut digest);
    assert!(state.is_reset());

    state.update(b"abc");
    state.zeroize();
    assert!(state.is_zeroized());
}

#[test]
fn test_sha512_state_reset_after_finalize() {
    let mut state = Sha512State::new();
    state.update(&[0x5a; 200]);
    assert!(!state.is_reset());

    let mut digest = [0u8; SHA512_HASH_LEN];
    state.finalize(&mut digest);
    assert!(state.is_reset());

    state.zeroize();
    assert!(state.is_zeroized());
}

#[test]
fn test_hmac_scratch_cleared_after_init_and_mac() {
    let mut state = HmacState::<Sha256State>::new();
    assert!(state.scratch_is_zeroized());

    // Longer than a block: hashed through the working state
    state.init(&[0xaa; 131]);
    assert!(state.scratch_is_zeroized());

    let mut tag = [0u8; SHA256_HASH_LEN];
    state.mac(b"message", &mut tag);
    assert!(state.scratch_is_zeroized());
    assert_ne!(tag, [0u8; SHA256_HASH_LEN]);

    state.zeroize();
    assert!(state.is_zeroized());
}

#[test]
fn test_hmac_sha512_scratch_cleared_after_compute() {
    let mut state = HmacState::<Sha512State>::new();
    let mut tag = [0u8; SHA512_HASH_LEN];

    state.compute(b"Jefe", b"what do ya want for nothing?", &mut tag);
    assert!(state.scratch_is_zeroized());
    assert!(!state.is_zeroized());
}

#[test]
fn test_pbkdf2_state_zeroized_after_derive() {
    let mut state = Pbkdf2State::<Sha256State>::new();
    let mut key = [0u8; 40];

    state.derive(b"password", b"salt", 2, &mut key);

    assert!(state.is_zeroized());
    assert_eq!(
        hex::encode(&key[..32]),
        "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
    );
}

#[test]
fn test_pbkdf2_sha512_state_zeroized_after_derive() {
    let mut state = Pbkdf2State::<Sha512State>::new();
    let mut key = [0u8; 100];

    state.derive(b"pw", b"na", 3, &mut key);

    assert!(state.is_zeroized());
    assert_ne!(key, [0u8; 100]);
}
