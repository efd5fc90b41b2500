//! Response encryption under the request key and the complemented nonce

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce as GcmNonce};
use base64::Engine as _;
use base64::prelude::BASE64_STANDARD;

use super::error::FlowError;
use super::material::{NONCE_SIZE, Nonce, SymmetricKey};
use super::value::FlowValue;

/// Encrypt a response body for the current exchange.
///
/// Normalizes `body`, serializes it to canonical JSON (sorted mapping
/// keys), and seals it with AES-256-GCM under the request's key and the
/// byte-wise complement of the request nonce. The platform contract fixes
/// one key and one nonce per exchange; the complement keeps the two AEAD
/// invocations sharing that key from ever sharing a nonce. Output is the
/// base64 of `ciphertext || tag`.
///
/// # Errors
///
/// - `Encoding`: If a binary leaf in `body` is not valid UTF-8
/// - `NestingTooDeep`: If `body` nests deeper than the normalizer allows
/// - `InvalidNonceLength`: If `request_nonce` is not 12 bytes
/// - `EncryptFailed`: If the AEAD seal fails (plaintext over the GCM
///   length bound)
pub fn encrypt_response(
    body: &FlowValue,
    key: &SymmetricKey,
    request_nonce: &Nonce,
) -> Result<String, FlowError> {
    let normalized = body.normalize()?;

    if request_nonce.len() != NONCE_SIZE {
        return Err(FlowError::InvalidNonceLength {
            expected: NONCE_SIZE,
            actual: request_nonce.len(),
        });
    }
    let response_nonce = request_nonce.complement();

    let json = normalized.into_json()?;
    let plaintext = serde_json::to_vec(&json)
        .map_err(|err| FlowError::MalformedPayload { reason: err.to_string() })?;

    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let sealed = cipher
        .encrypt(GcmNonce::from_slice(response_nonce.as_bytes()), plaintext.as_slice())
        .map_err(|err| {
            tracing::debug!(%err, "response seal failed");
            FlowError::EncryptFailed
        })?;

    Ok(BASE64_STANDARD.encode(sealed))
}
