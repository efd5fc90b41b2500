//! Property-based tests for the Flow exchange core
//!
//! These tests verify the fundamental invariants of the exchange:
//!
//! 1. **Involution**: complement(complement(n)) == n for all nonces
//! 2. **Round-trip**: a sealed response opens under the complemented nonce
//!    and yields exactly the canonical JSON of the body
//! 3. **Tamper rejection**: flipping any single bit of a sealed blob makes
//!    authentication fail with no partial plaintext
//! 4. **Normalization**: no binary leaf survives normalization and the
//!    tree structure is preserved

use std::collections::BTreeMap;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce as GcmNonce};
use base64::Engine as _;
use base64::prelude::BASE64_STANDARD;
use flowseal_crypto::{FlowValue, Nonce, SymmetricKey, encrypt_response};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>()
}

fn nonce_strategy() -> impl Strategy<Value = [u8; 12]> {
    any::<[u8; 12]>()
}

fn body_strategy() -> impl Strategy<Value = BTreeMap<String, i64>> {
    prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..8)
}

fn body_value(entries: &BTreeMap<String, i64>) -> FlowValue {
    FlowValue::Mapping(
        entries
            .iter()
            .map(|(key, value)| {
                (key.clone(), FlowValue::Number(serde_json::Number::from(*value)))
            })
            .collect(),
    )
}

fn contains_binary(value: &FlowValue) -> bool {
    match value {
        FlowValue::Bytes(_) => true,
        FlowValue::Sequence(items) => items.iter().any(contains_binary),
        FlowValue::Mapping(entries) => entries.values().any(contains_binary),
        _ => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_complement_is_involution(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let nonce = Nonce::new(bytes);
        prop_assert_eq!(nonce.complement().complement(), nonce);
    }

    #[test]
    fn prop_complement_never_equals_original(bytes in prop::collection::vec(any::<u8>(), 1..64)) {
        let nonce = Nonce::new(bytes);
        prop_assert_ne!(nonce.complement(), nonce);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_sealed_response_opens_under_complement(
        key_bytes in key_strategy(),
        nonce_bytes in nonce_strategy(),
        entries in body_strategy(),
    ) {
        let key = SymmetricKey::from_bytes(&key_bytes).unwrap();
        let nonce = Nonce::new(nonce_bytes.to_vec());

        let sealed_b64 = encrypt_response(&body_value(&entries), &key, &nonce).unwrap();
        let sealed = BASE64_STANDARD.decode(sealed_b64).unwrap();

        let cipher = Aes256Gcm::new(&key_bytes.into());
        let plaintext = cipher
            .decrypt(GcmNonce::from_slice(nonce.complement().as_bytes()), sealed.as_slice())
            .unwrap();

        let expected: serde_json::Value = serde_json::to_value(&entries).unwrap();
        prop_assert_eq!(serde_json::to_vec(&expected).unwrap(), plaintext);
    }

    #[test]
    fn prop_response_never_opens_under_request_nonce(
        key_bytes in key_strategy(),
        nonce_bytes in nonce_strategy(),
        entries in body_strategy(),
    ) {
        let key = SymmetricKey::from_bytes(&key_bytes).unwrap();
        let nonce = Nonce::new(nonce_bytes.to_vec());

        let sealed_b64 = encrypt_response(&body_value(&entries), &key, &nonce).unwrap();
        let sealed = BASE64_STANDARD.decode(sealed_b64).unwrap();

        // The response nonce is derived, not identical: opening with the
        // request nonce itself must fail authentication.
        let cipher = Aes256Gcm::new(&key_bytes.into());
        let result = cipher.decrypt(GcmNonce::from_slice(&nonce_bytes), sealed.as_slice());
        prop_assert!(result.is_err());
    }

    #[test]
    fn prop_single_bit_flip_breaks_authentication(
        key_bytes in key_strategy(),
        nonce_bytes in nonce_strategy(),
        entries in body_strategy(),
        flip_seed in any::<usize>(),
    ) {
        let key = SymmetricKey::from_bytes(&key_bytes).unwrap();
        let nonce = Nonce::new(nonce_bytes.to_vec());

        let sealed_b64 = encrypt_response(&body_value(&entries), &key, &nonce).unwrap();
        let mut sealed = BASE64_STANDARD.decode(sealed_b64).unwrap();

        // Flip one bit anywhere in ciphertext or tag
        let bit = flip_seed % (sealed.len() * 8);
        sealed[bit / 8] ^= 1 << (bit % 8);

        let cipher = Aes256Gcm::new(&key_bytes.into());
        let result = cipher
            .decrypt(GcmNonce::from_slice(nonce.complement().as_bytes()), sealed.as_slice());
        prop_assert!(result.is_err());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_normalize_removes_every_binary_leaf(
        texts in prop::collection::vec("[ -~]{0,16}", 1..8),
    ) {
        let value = FlowValue::Mapping(
            texts
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    let leaf = if i % 2 == 0 {
                        FlowValue::Bytes(text.clone().into_bytes())
                    } else {
                        FlowValue::Sequence(vec![FlowValue::Bytes(text.clone().into_bytes())])
                    };
                    (format!("k{i}"), leaf)
                })
                .collect(),
        );

        let normalized = value.normalize().unwrap();
        prop_assert!(!contains_binary(&normalized));

        // Structure preserved: same keys, sequences still sequences
        if let (FlowValue::Mapping(before), FlowValue::Mapping(after)) = (&value, &normalized) {
            prop_assert_eq!(
                before.keys().collect::<Vec<_>>(),
                after.keys().collect::<Vec<_>>()
            );
            for (key, leaf) in before {
                let is_seq = matches!(leaf, FlowValue::Sequence(_));
                prop_assert_eq!(is_seq, matches!(after[key], FlowValue::Sequence(_)));
            }
        } else {
            prop_assert!(false, "normalization changed the top-level shape");
        }
    }

    #[test]
    fn prop_normalize_is_idempotent_on_normalized_trees(
        texts in prop::collection::vec("[a-z]{0,12}", 0..6),
    ) {
        let value = FlowValue::Sequence(
            texts.into_iter().map(|text| FlowValue::Bytes(text.into_bytes())).collect(),
        );

        let once = value.normalize().unwrap();
        let twice = once.normalize().unwrap();
        prop_assert_eq!(once, twice);
    }
}
