//! Private keys, hashing and WIF.

use crate::cashaddr::Address;
use crate::errors::CoreError;
use crate::network::Network;
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature, SigningKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

/// SHA-256 applied twice.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160 of SHA-256.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let ripe = Ripemd160::digest(Sha256::digest(data));
    let mut out = [0u8; 20];
    out.copy_from_slice(&ripe);
    out
}

/// A secp256k1 private key.
#[derive(Clone)]
pub struct PrivateKey {
    key: SigningKey,
}

impl PrivateKey {
    /// Wraps an existing signing key.
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Creates a key from its 32-byte scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let key = SigningKey::from_slice(bytes).map_err(|e| CoreError::InvalidKey(e.to_string()))?;
        Ok(Self { key })
    }

    /// Decodes a WIF string, returning the key and whether it was marked compressed.
    pub fn from_wif(wif: &str, network: Network) -> Result<(Self, bool), CoreError> {
        let decoded = bs58::decode(wif.trim())
            .with_check(None)
            .into_vec()
            .map_err(|e| CoreError::InvalidWif(e.to_string()))?;

        let (version, payload) = decoded
            .split_first()
            .ok_or_else(|| CoreError::InvalidWif("empty payload".to_string()))?;
        if *version != network.wif_version() {
            return Err(CoreError::InvalidWif(format!(
                "version 0x{:02x} does not belong to {}",
                version, network
            )));
        }

        let compressed = match payload.len() {
            33 if payload[32] == 0x01 => true,
            32 => false,
            len => return Err(CoreError::InvalidWif(format!("invalid length {}", len + 1))),
        };
        Ok((Self::from_bytes(&payload[..32])?, compressed))
    }

    /// Encodes the key as compressed WIF for `network`.
    pub fn to_wif(&self, network: Network) -> String {
        let mut payload = Vec::with_capacity(34);
        payload.push(network.wif_version());
        payload.extend_from_slice(&self.to_bytes());
        payload.push(0x01);
        bs58::encode(payload).with_check().into_string()
    }

    /// Returns the 32-byte scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.key.to_bytes());
        out
    }

    /// Returns the compressed SEC1 public key.
    pub fn public_key(&self) -> [u8; 33] {
        let point = self.key.verifying_key().to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Returns the hash160 of the compressed public key.
    pub fn public_key_hash(&self) -> [u8; 20] {
        hash160(&self.public_key())
    }

    /// Returns the P2PKH address of this key.
    pub fn address(&self, network: Network) -> Address {
        Address::p2pkh(network, self.public_key_hash())
    }

    /// Signs a 32-byte digest, returning a low-S DER signature.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<Vec<u8>, CoreError> {
        let signature: Signature = self
            .key
            .sign_prehash(digest)
            .map_err(|e| CoreError::SigningFailed(e.to_string()))?;
        let signature = signature.normalize_s().unwrap_or(signature);
        Ok(signature.to_der().as_bytes().to_vec())
    }

    /// Returns the underlying signing key.
    pub fn signing_key(&self) -> &SigningKey {
        &self.key
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &hex::encode(self.public_key()))
            .finish()
    }
}
