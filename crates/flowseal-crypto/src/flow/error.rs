//! Error types for Flow exchange operations

use thiserror::Error;

/// Errors from Flow request decryption and response encryption.
///
/// Every failure is terminal for the exchange; callers must not retry
/// against the same or mutated inputs.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Input that should be base64 or UTF-8 text was not
    #[error("invalid encoding in {context}")]
    Encoding {
        /// Which input failed to decode
        context: &'static str,
    },

    /// Private key material could not be loaded (malformed PEM or wrong
    /// passphrase)
    #[error("key load failed: {reason}")]
    KeyLoad {
        /// Reason reported by the PKCS#8 parser
        reason: String,
    },

    /// Opaque decryption failure.
    ///
    /// Covers both an OAEP unwrap failure and a GCM authentication
    /// failure. The two are indistinguishable by construction so that an
    /// untrusted caller cannot build a padding or authentication oracle.
    /// Underlying causes are logged at debug level only.
    #[error("decryption failed")]
    DecryptFailed,

    /// AEAD seal failure (plaintext exceeds the GCM length bound)
    #[error("encryption failed")]
    EncryptFailed,

    /// Decryption succeeded but the plaintext is not valid JSON
    #[error("malformed payload: {reason}")]
    MalformedPayload {
        /// Reason reported by the JSON parser or serializer
        reason: String,
    },

    /// Symmetric key material has the wrong length
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Nonce length doesn't match the cipher's nonce size
    #[error("invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength {
        /// Expected nonce length in bytes
        expected: usize,
        /// Actual nonce length in bytes
        actual: usize,
    },

    /// Value tree nesting exceeded the normalizer's depth bound
    #[error("value nesting exceeds depth limit {limit}")]
    NestingTooDeep {
        /// Maximum supported nesting depth
        limit: usize,
    },
}
