//! # Signing Capability
//!
//! The SDK never touches key material directly. Anything that can turn a
//! transaction hash into a signature implements [`Signer`]: an in-process
//! Ed25519 key, a BLS wallet supplied by the host, or a split-key signer that
//! asks an external authorizer to co-sign.
//!
//! Ed25519 signs the raw bytes of the hex-encoded hash and returns the
//! signature hex-encoded, which is what miners expect on the wire.

use async_trait::async_trait;
use ed25519_dalek::{Signer as _, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroize;

use crate::CryptoError;

/// `sign(hash) -> signature` capability.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Sign a hex-encoded transaction hash.
    async fn sign(&self, hash: &str) -> Result<String, CryptoError>;

    /// Hex-encoded public key placed in transactions.
    fn public_key(&self) -> String;

    /// Scheme name as used in network configuration (`ed25519`, `bls0chain`).
    fn scheme(&self) -> &'static str;
}

/// In-process Ed25519 signer. `SigningKey` wipes the key when dropped.
pub struct Ed25519Signer {
    signing_key: SigningKey,
}

impl Ed25519Signer {
    /// Generate a random key.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from a 32-byte secret seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        Self { signing_key }
    }

    /// Create from a hex-encoded 32-byte secret seed.
    pub fn from_hex_seed(seed_hex: &str) -> Result<Self, CryptoError> {
        let mut bytes =
            hex::decode(seed_hex).map_err(|e| CryptoError::InvalidHashEncoding(e.to_string()))?;
        if bytes.len() != 32 {
            let actual = bytes.len();
            bytes.zeroize();
            return Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual,
            });
        }
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&bytes);
        bytes.zeroize();
        let signer = Self::from_seed(seed);
        seed.zeroize();
        Ok(signer)
    }

    /// Sign synchronously.
    pub fn sign_hash(&self, hash: &str) -> Result<String, CryptoError> {
        let raw = hex::decode(hash).map_err(|e| CryptoError::InvalidHashEncoding(e.to_string()))?;
        Ok(hex::encode(self.signing_key.sign(&raw).to_bytes()))
    }
}

#[async_trait]
impl Signer for Ed25519Signer {
    async fn sign(&self, hash: &str) -> Result<String, CryptoError> {
        self.sign_hash(hash)
    }

    fn public_key(&self) -> String {
        hex::encode(self.signing_key.verifying_key().to_bytes())
    }

    fn scheme(&self) -> &'static str {
        "ed25519"
    }
}

/// Verify a hex Ed25519 signature over a hex hash with a hex public key.
pub fn verify_ed25519(public_key: &str, hash: &str, signature: &str) -> Result<(), CryptoError> {
    let pk: [u8; 32] = hex::decode(public_key)
        .map_err(|_| CryptoError::InvalidPublicKey)?
        .try_into()
        .map_err(|_| CryptoError::InvalidPublicKey)?;
    let verifying_key = VerifyingKey::from_bytes(&pk).map_err(|_| CryptoError::InvalidPublicKey)?;

    let sig: [u8; 64] = hex::decode(signature)
        .map_err(|_| CryptoError::InvalidSignatureFormat)?
        .try_into()
        .map_err(|_| CryptoError::InvalidSignatureFormat)?;
    let sig = ed25519_dalek::Signature::from_bytes(&sig);

    let raw = hex::decode(hash).map_err(|e| CryptoError::InvalidHashEncoding(e.to_string()))?;
    verifying_key
        .verify(&raw, &sig)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}
