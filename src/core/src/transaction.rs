//! Transaction drafts, encoding and P2PKH signing.
//!
//! Inputs are signed with `SIGHASH_ALL | SIGHASH_FORKID`. The signing
//! serialization follows BIP143 with the token prefix of the spent output
//! inserted immediately before the covered bytecode.

use crate::errors::CoreError;
use crate::keys::{double_sha256, PrivateKey};
use crate::script;
use crate::types::{Satoshis, TokenData, Utxo};
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;
use tracing::debug;

/// `SIGHASH_ALL | SIGHASH_FORKID`
pub const SIGHASH_ALL_FORKID: u32 = 0x41;

/// Version of every transaction the wallet builds.
pub const TX_VERSION: u32 = 2;

const SEQUENCE_FINAL: u32 = 0xffff_ffff;

/// Appends a Bitcoin compact-size integer.
pub fn write_compact_size(buf: &mut Vec<u8>, n: u64) {
    if n < 0xfd {
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(0xfd);
        put_u16(buf, n as u16);
    } else if n <= 0xffff_ffff {
        buf.push(0xfe);
        put_u32(buf, n as u32);
    } else {
        buf.push(0xff);
        put_u64(buf, n);
    }
}

fn put_u16(buf: &mut Vec<u8>, value: u16) {
    let mut bytes = [0u8; 2];
    LittleEndian::write_u16(&mut bytes, value);
    buf.extend_from_slice(&bytes);
}

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    let mut bytes = [0u8; 4];
    LittleEndian::write_u32(&mut bytes, value);
    buf.extend_from_slice(&bytes);
}

fn put_u64(buf: &mut Vec<u8>, value: u64) {
    let mut bytes = [0u8; 8];
    LittleEndian::write_u64(&mut bytes, value);
    buf.extend_from_slice(&bytes);
}

/// Subtracts `required` from `available`, failing instead of underflowing.
pub fn remaining(available: Satoshis, required: Satoshis) -> Result<Satoshis, CoreError> {
    available
        .checked_sub(required)
        .ok_or(CoreError::InsufficientFunds { required, available })
}

/// Signs P2PKH inputs that belong to a single key.
#[derive(Debug, Clone)]
pub struct P2pkhUnlocker {
    key: PrivateKey,
}

impl P2pkhUnlocker {
    /// Creates an unlocker for `key`.
    pub fn new(key: PrivateKey) -> Self {
        Self { key }
    }

    /// The locking bytecode this unlocker can spend, also used as covered bytecode.
    pub fn locking_bytecode(&self) -> Vec<u8> {
        script::p2pkh_locking_bytecode(&self.key.public_key_hash())
    }

    /// Produces the unlocking bytecode for a signing-serialization digest.
    pub fn unlock(&self, sighash: &[u8; 32]) -> Result<Vec<u8>, CoreError> {
        let mut signature = self.key.sign_digest(sighash)?;
        signature.push(SIGHASH_ALL_FORKID as u8);
        script::p2pkh_unlocking_bytecode(&signature, &self.key.public_key())
    }
}

/// A transaction input: the UTXO being spent and how to unlock it.
#[derive(Debug, Clone)]
pub struct Input {
    /// The output being spent
    pub utxo: Utxo,
    /// The capability that signs for it
    pub unlocker: P2pkhUnlocker,
}

/// A transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// The locking bytecode
    pub locking_bytecode: Vec<u8>,
    /// Amount in satoshis
    pub satoshis: Satoshis,
    /// Token payload, if any
    pub token: Option<TokenData>,
}

impl Output {
    /// Creates an output paying `satoshis` (and optionally tokens) to `locking_bytecode`.
    pub fn new(locking_bytecode: Vec<u8>, satoshis: Satoshis, token: Option<TokenData>) -> Self {
        Self {
            locking_bytecode,
            satoshis,
            token,
        }
    }

    /// Creates a zero-value data-carrier output from its pushes.
    pub fn data_carrier(chunks: &[&[u8]]) -> Result<Self, CoreError> {
        Ok(Self {
            locking_bytecode: script::data_carrier(chunks)?,
            satoshis: 0,
            token: None,
        })
    }

    /// Returns whether this output is an OP_RETURN output.
    pub fn is_data_carrier(&self) -> bool {
        self.locking_bytecode.first() == Some(&script::OP_RETURN)
    }

    /// Appends the wire encoding of the output.
    pub fn encode(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        put_u64(buf, self.satoshis);
        let prefix = match &self.token {
            Some(token) => token.encode_prefix()?,
            None => Vec::new(),
        };
        write_compact_size(buf, (prefix.len() + self.locking_bytecode.len()) as u64);
        buf.extend_from_slice(&prefix);
        buf.extend_from_slice(&self.locking_bytecode);
        Ok(())
    }
}

/// An unsigned transaction with ordered inputs and outputs.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    /// Inputs in spending order
    pub inputs: Vec<Input>,
    /// Outputs in creation order
    pub outputs: Vec<Output>,
}

impl TransactionDraft {
    /// Creates a draft.
    pub fn new(inputs: Vec<Input>, outputs: Vec<Output>) -> Self {
        Self { inputs, outputs }
    }

    /// Total satoshis provided by the inputs.
    pub fn input_total(&self) -> Satoshis {
        self.inputs.iter().map(|input| input.utxo.satoshis).sum()
    }

    /// Total satoshis locked by the outputs.
    pub fn output_total(&self) -> Satoshis {
        self.outputs.iter().map(|output| output.satoshis).sum()
    }

    /// Returns the signing serialization of the input at `index`.
    pub fn signing_serialization(&self, index: usize) -> Result<Vec<u8>, CoreError> {
        let commitments = self.commitments()?;
        self.preimage(&commitments, index)
    }

    /// Signs every input and encodes the transaction.
    pub fn sign(&self) -> Result<SignedTransaction, CoreError> {
        if self.inputs.is_empty() {
            return Err(CoreError::EmptyDraft("no inputs"));
        }
        if self.outputs.is_empty() {
            return Err(CoreError::EmptyDraft("no outputs"));
        }
        remaining(self.input_total(), self.output_total())?;

        let commitments = self.commitments()?;
        let mut unlocking = Vec::with_capacity(self.inputs.len());
        for (index, input) in self.inputs.iter().enumerate() {
            let preimage = self.preimage(&commitments, index)?;
            unlocking.push(input.unlocker.unlock(&double_sha256(&preimage))?);
        }

        let (outpoints, outputs) = (&commitments.outpoints, &commitments.outputs);
        let mut bytes = Vec::with_capacity(outputs.len() + unlocking.len() * 150 + 16);
        put_u32(&mut bytes, TX_VERSION);
        write_compact_size(&mut bytes, self.inputs.len() as u64);
        for ((hash, input), script) in outpoints.iter().zip(&self.inputs).zip(&unlocking) {
            bytes.extend_from_slice(hash);
            put_u32(&mut bytes, input.utxo.vout);
            write_compact_size(&mut bytes, script.len() as u64);
            bytes.extend_from_slice(script);
            put_u32(&mut bytes, SEQUENCE_FINAL);
        }
        write_compact_size(&mut bytes, self.outputs.len() as u64);
        bytes.extend_from_slice(outputs);
        put_u32(&mut bytes, 0);

        debug!(
            "Signed {} inputs and {} outputs ({} bytes)",
            self.inputs.len(),
            self.outputs.len(),
            bytes.len()
        );
        Ok(SignedTransaction { bytes })
    }

    fn commitments(&self) -> Result<Commitments, CoreError> {
        let outpoints = self
            .inputs
            .iter()
            .map(|input| input.utxo.outpoint_hash())
            .collect::<Result<Vec<_>, _>>()?;

        let mut prevouts = Vec::with_capacity(outpoints.len() * 36);
        let mut sequences = Vec::with_capacity(outpoints.len() * 4);
        for (hash, input) in outpoints.iter().zip(&self.inputs) {
            prevouts.extend_from_slice(hash);
            put_u32(&mut prevouts, input.utxo.vout);
            put_u32(&mut sequences, SEQUENCE_FINAL);
        }

        let mut outputs = Vec::new();
        for output in &self.outputs {
            output.encode(&mut outputs)?;
        }

        Ok(Commitments {
            hash_prevouts: double_sha256(&prevouts),
            hash_sequence: double_sha256(&sequences),
            hash_outputs: double_sha256(&outputs),
            outpoints,
            outputs,
        })
    }

    // The token prefix of the spent output sits between the outpoint and the
    // covered bytecode length.
    fn preimage(&self, commitments: &Commitments, index: usize) -> Result<Vec<u8>, CoreError> {
        let input = self.inputs.get(index).ok_or(CoreError::InputOutOfRange(index))?;
        let covered = input.unlocker.locking_bytecode();

        let mut preimage = Vec::with_capacity(256);
        put_u32(&mut preimage, TX_VERSION);
        preimage.extend_from_slice(&commitments.hash_prevouts);
        preimage.extend_from_slice(&commitments.hash_sequence);
        preimage.extend_from_slice(&commitments.outpoints[index]);
        put_u32(&mut preimage, input.utxo.vout);
        if let Some(token) = &input.utxo.token {
            preimage.extend_from_slice(&token.encode_prefix()?);
        }
        write_compact_size(&mut preimage, covered.len() as u64);
        preimage.extend_from_slice(&covered);
        put_u64(&mut preimage, input.utxo.satoshis);
        put_u32(&mut preimage, SEQUENCE_FINAL);
        preimage.extend_from_slice(&commitments.hash_outputs);
        put_u32(&mut preimage, 0);
        put_u32(&mut preimage, SIGHASH_ALL_FORKID);
        Ok(preimage)
    }
}

/// Hashes shared by the signing serialization of every input.
struct Commitments {
    outpoints: Vec<[u8; 32]>,
    outputs: Vec<u8>,
    hash_prevouts: [u8; 32],
    hash_sequence: [u8; 32],
    hash_outputs: [u8; 32],
}

/// A fully signed, encoded transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    bytes: Vec<u8>,
}

impl SignedTransaction {
    /// Returns the encoded transaction.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the encoded size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Returns the transaction id in display byte order.
    pub fn txid(&self) -> String {
        let mut hash = double_sha256(&self.bytes);
        hash.reverse();
        hex::encode(hash)
    }
}

impl fmt::Display for SignedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
