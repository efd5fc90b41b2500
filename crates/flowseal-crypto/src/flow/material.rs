//! Per-exchange key and nonce material
//!
//! All types here live for exactly one request/response pair. Secret
//! material is zeroized on drop.

use rsa::RsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use zeroize::Zeroize;

use super::error::FlowError;

/// Size of the AES-256 key in bytes
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// Size of the GCM nonce in bytes (standard 96-bit nonce)
pub const NONCE_SIZE: usize = 12;

/// A 32-byte AES-256 key recovered from the request's wrapped key.
///
/// Valid for the current request/response pair only. The key bytes are
/// zeroized when the value is dropped.
#[derive(Clone)]
pub struct SymmetricKey([u8; SYMMETRIC_KEY_SIZE]);

impl SymmetricKey {
    /// Construct a key from raw bytes.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: If `bytes` is not exactly 32 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FlowError> {
        if bytes.len() != SYMMETRIC_KEY_SIZE {
            return Err(FlowError::InvalidKeyLength {
                expected: SYMMETRIC_KEY_SIZE,
                actual: bytes.len(),
            });
        }

        let mut key = [0u8; SYMMETRIC_KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    /// Raw key bytes for the AEAD cipher.
    pub fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_SIZE] {
        &self.0
    }
}

// Implement Drop to zeroize key material
impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// The per-exchange AEAD nonce.
///
/// The request nonce arrives with the wrapped request; the response nonce
/// is its byte-wise complement. Both share the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce(Vec<u8>);

impl Nonce {
    /// Wrap raw nonce bytes as supplied by the caller, unmodified.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Nonce length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the nonce is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Byte-wise complement of this nonce (XOR every byte with `0xFF`).
    ///
    /// This derives the response nonce from the request nonce. The
    /// operation is an involution: complementing twice recovers the
    /// original. Length and byte order are preserved, and for non-empty
    /// nonces the result never equals the input.
    pub fn complement(&self) -> Self {
        Self(self.0.iter().map(|byte| byte ^ 0xFF).collect())
    }
}

/// PEM-encoded RSA private key plus optional passphrase.
///
/// Externally provisioned, read-only input. An empty or absent passphrase
/// means the PEM is unencrypted. Both the PEM and the passphrase are
/// zeroized on drop.
pub struct PrivateKeyMaterial {
    pem: String,
    passphrase: Option<String>,
}

impl PrivateKeyMaterial {
    /// Bundle a PKCS#8 PEM string with its optional passphrase.
    ///
    /// An empty-string passphrase is treated as absent.
    pub fn new(pem: impl Into<String>, passphrase: Option<String>) -> Self {
        let passphrase = passphrase.filter(|p| !p.is_empty());
        Self { pem: pem.into(), passphrase }
    }

    /// Load the RSA private key from the PEM.
    ///
    /// # Errors
    ///
    /// - `KeyLoad`: If the PEM is malformed or the passphrase is wrong
    pub(crate) fn load(&self) -> Result<RsaPrivateKey, FlowError> {
        let loaded = match &self.passphrase {
            Some(passphrase) => RsaPrivateKey::from_pkcs8_encrypted_pem(&self.pem, passphrase),
            None => RsaPrivateKey::from_pkcs8_pem(&self.pem),
        };

        loaded.map_err(|err| FlowError::KeyLoad { reason: err.to_string() })
    }
}

impl Drop for PrivateKeyMaterial {
    fn drop(&mut self) {
        self.pem.zeroize();
        if let Some(passphrase) = &mut self.passphrase {
            passphrase.zeroize();
        }
    }
}
