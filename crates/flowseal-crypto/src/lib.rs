//! Flowseal Cryptographic Core
//!
//! Request/response encryption for Flow endpoints. Pure functions with
//! deterministic outputs; no state survives a single request/response
//! exchange.
//!
//! # Exchange Lifecycle
//!
//! Each Flow exchange carries an RSA-wrapped AES key, an AES-256-GCM
//! sealed request body, and a nonce. The response is sealed under the
//! same key with the byte-wise complement of the request nonce, so the
//! two AEAD invocations sharing one key never share a nonce.
//!
//! ```text
//! WrappedRequest (base64 fields)
//!        │
//!        ▼
//! RSA-OAEP(SHA-256) unwrap → SymmetricKey (32 bytes)
//!        │
//!        ▼
//! AES-256-GCM open (request nonce) → JSON body
//!        │
//!        ▼ (host business logic)
//! FlowValue::normalize → JSON bytes
//!        │
//!        ▼
//! AES-256-GCM seal (complemented nonce) → base64 response
//! ```
//!
//! # Security
//!
//! Authenticity:
//! - AES-256-GCM rejects any ciphertext or tag modification
//! - No plaintext bytes are returned on a failed authentication
//!
//! Oracle resistance:
//! - OAEP unwrap failure and GCM authentication failure collapse into one
//!   opaque [`FlowError::DecryptFailed`] carrying no distinguishing detail
//!
//! Key hygiene:
//! - Symmetric keys and PEM material are zeroized on drop
//! - Keys and nonces are scoped to exactly one exchange
//!
//! Nonce discipline:
//! - The response nonce is the byte-wise complement of the request nonce,
//!   a platform-mandated derivation that keeps the two directions from
//!   reusing a (key, nonce) pair without a second key exchange

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod flow;

pub use flow::{
    AUTH_TAG_SIZE, DecryptedRequest, FlowError, FlowValue, MAX_NESTING_DEPTH, NONCE_SIZE, Nonce,
    PrivateKeyMaterial, SYMMETRIC_KEY_SIZE, SymmetricKey, WrappedRequest, decrypt_request,
    encrypt_response, unwrap_key,
};
