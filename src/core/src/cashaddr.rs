//! CashAddr encoding and decoding.
//!
//! A CashAddr is `prefix:payload` where the payload is the base32 encoding of a
//! version byte, the hash, and a 40-bit BCH-code checksum computed over the
//! prefix and the payload.

use crate::errors::CoreError;
use crate::network::Network;
use crate::script;
use std::fmt;

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// The kind of locking bytecode an address commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Pay to public key hash
    P2pkh,
    /// Pay to script hash (20 or 32 byte hash)
    P2sh,
}

/// A decoded CashAddr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    prefix: String,
    kind: AddressKind,
    token_aware: bool,
    hash: Vec<u8>,
}

impl Address {
    /// Creates a P2PKH address for a 20-byte public key hash.
    pub fn p2pkh(network: Network, pubkey_hash: [u8; 20]) -> Self {
        Self {
            prefix: network.cashaddr_prefix().to_string(),
            kind: AddressKind::P2pkh,
            token_aware: false,
            hash: pubkey_hash.to_vec(),
        }
    }

    /// Returns the same address with the token-aware type bits set or cleared.
    pub fn with_token_support(mut self, token_aware: bool) -> Self {
        self.token_aware = token_aware;
        self
    }

    /// Decodes an address, requiring it to belong to `network`.
    ///
    /// An address without a prefix is assumed to use the network's prefix.
    pub fn decode(address: &str, network: Network) -> Result<Self, CoreError> {
        let expected = network.cashaddr_prefix();
        let address = address.trim();
        let has_lower = address.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = address.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper {
            return Err(CoreError::InvalidAddress("mixed case".to_string()));
        }
        let address = address.to_lowercase();

        let (prefix, payload) = match address.split_once(':') {
            Some((prefix, payload)) => (prefix.to_string(), payload),
            None => (expected.to_string(), address.as_str()),
        };
        if prefix != expected {
            return Err(CoreError::NetworkMismatch {
                expected: expected.to_string(),
                actual: prefix,
            });
        }

        let mut data = Vec::with_capacity(payload.len());
        for c in payload.bytes() {
            let value = CHARSET
                .iter()
                .position(|&x| x == c)
                .ok_or_else(|| {
                    CoreError::InvalidAddress(format!("invalid character '{}'", c as char))
                })?;
            data.push(value as u8);
        }
        if data.len() < 8 {
            return Err(CoreError::InvalidAddress("payload too short".to_string()));
        }

        let mut checked = prefix_bits(&prefix);
        checked.push(0);
        checked.extend_from_slice(&data);
        if polymod(&checked) != 0 {
            return Err(CoreError::InvalidAddress("checksum mismatch".to_string()));
        }

        let payload = convert_bits(&data[..data.len() - 8], 5, 8, false)
            .ok_or_else(|| CoreError::InvalidAddress("invalid padding".to_string()))?;
        let (&version, hash) = payload
            .split_first()
            .ok_or_else(|| CoreError::InvalidAddress("empty payload".to_string()))?;

        if version & 0x80 != 0 {
            return Err(CoreError::InvalidAddress("reserved version bit set".to_string()));
        }
        let (kind, token_aware) = match (version >> 3) & 0x0f {
            0 => (AddressKind::P2pkh, false),
            1 => (AddressKind::P2sh, false),
            2 => (AddressKind::P2pkh, true),
            3 => (AddressKind::P2sh, true),
            other => {
                return Err(CoreError::InvalidAddress(format!("unknown address type {}", other)))
            }
        };
        let expected_len = match version & 0x07 {
            0 => 20,
            3 => 32,
            other => {
                return Err(CoreError::InvalidAddress(format!("unsupported hash size {}", other)))
            }
        };
        if hash.len() != expected_len || (kind == AddressKind::P2pkh && expected_len != 20) {
            return Err(CoreError::InvalidAddress(format!(
                "hash length {} does not match version",
                hash.len()
            )));
        }

        Ok(Self {
            prefix,
            kind,
            token_aware,
            hash: hash.to_vec(),
        })
    }

    /// Encodes the address with its prefix.
    pub fn encode(&self) -> String {
        let type_bits: u8 = match (self.kind, self.token_aware) {
            (AddressKind::P2pkh, false) => 0,
            (AddressKind::P2sh, false) => 1,
            (AddressKind::P2pkh, true) => 2,
            (AddressKind::P2sh, true) => 3,
        };
        let size_bits: u8 = if self.hash.len() == 32 { 3 } else { 0 };

        let mut payload = Vec::with_capacity(self.hash.len() + 1);
        payload.push((type_bits << 3) | size_bits);
        payload.extend_from_slice(&self.hash);
        // Converting 8-bit groups with padding never fails.
        let data = convert_bits(&payload, 8, 5, true).unwrap_or_default();

        let mut checked = prefix_bits(&self.prefix);
        checked.push(0);
        checked.extend_from_slice(&data);
        checked.extend_from_slice(&[0u8; 8]);
        let checksum = polymod(&checked);

        let mut out = String::with_capacity(self.prefix.len() + 1 + data.len() + 8);
        out.push_str(&self.prefix);
        out.push(':');
        for d in &data {
            out.push(CHARSET[*d as usize] as char);
        }
        for i in 0..8 {
            let d = (checksum >> (5 * (7 - i))) & 0x1f;
            out.push(CHARSET[d as usize] as char);
        }
        out
    }

    /// Returns the kind of locking bytecode this address pays to.
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// Returns the hash the address commits to.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Returns the locking bytecode paying to this address.
    pub fn locking_bytecode(&self) -> Vec<u8> {
        match self.kind {
            AddressKind::P2pkh => {
                let mut hash = [0u8; 20];
                hash.copy_from_slice(&self.hash);
                script::p2pkh_locking_bytecode(&hash)
            }
            AddressKind::P2sh => script::p2sh_locking_bytecode(&self.hash),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

fn prefix_bits(prefix: &str) -> Vec<u8> {
    prefix.bytes().map(|b| b & 0x1f).collect()
}

fn polymod(values: &[u8]) -> u64 {
    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(d);
        if c0 & 0x01 != 0 {
            c ^= 0x98_f2bc_8e61;
        }
        if c0 & 0x02 != 0 {
            c ^= 0x79_b76d_99e2;
        }
        if c0 & 0x04 != 0 {
            c ^= 0xf3_3e5f_b3c4;
        }
        if c0 & 0x08 != 0 {
            c ^= 0xae_2eab_e2a8;
        }
        if c0 & 0x10 != 0 {
            c ^= 0x1e_4f43_e470;
        }
    }
    c ^ 1
}

/// Regroups bits; returns `None` on non-zero padding when `pad` is false.
fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max = (1u32 << to) - 1;
    let max_acc = (1u32 << (from + to - 1)) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    for &value in data {
        let value = u32::from(value);
        if value >> from != 0 {
            return None;
        }
        acc = ((acc << from) | value) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max) as u8);
        }
    }
    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max) != 0 {
        return None;
    }
    Some(out)
}
