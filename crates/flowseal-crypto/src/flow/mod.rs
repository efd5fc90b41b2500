//! Flow exchange: the request/response encryption transform
//!
//! One Flow is a single secured request/response pair. The host hands in
//! a [`WrappedRequest`] and private key material, gets back the decrypted
//! JSON body plus the per-exchange key and nonce, runs its business logic,
//! and seals the reply with [`encrypt_response`].
//!
//! # Wire Conventions
//!
//! - Symmetric cipher: AES-256 in GCM mode, empty AAD
//! - Asymmetric wrap: RSA-OAEP, SHA-256 digest and SHA-256 MGF1, empty label
//! - Tag placement: trailing 16 bytes of every AEAD output (`ciphertext || tag`)
//! - Nonce: 12 bytes, shared length between request and derived response
//! - All three request fields and the response are standard base64 text

pub mod error;
pub mod material;
pub mod request;
pub mod response;
pub mod value;

pub use error::FlowError;
pub use material::{NONCE_SIZE, Nonce, PrivateKeyMaterial, SYMMETRIC_KEY_SIZE, SymmetricKey};
pub use request::{AUTH_TAG_SIZE, DecryptedRequest, WrappedRequest, decrypt_request, unwrap_key};
pub use response::encrypt_response;
pub use value::{FlowValue, MAX_NESTING_DEPTH};
