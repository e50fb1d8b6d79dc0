//! Bytecode helpers for the handful of scripts the wallet produces.

use crate::errors::CoreError;

pub const OP_RETURN: u8 = 0x6a;
pub const OP_DUP: u8 = 0x76;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_HASH256: u8 = 0xaa;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;

/// Appends a data push using the smallest push opcode for its length.
pub fn push_data(script: &mut Vec<u8>, data: &[u8]) -> Result<(), CoreError> {
    match data.len() {
        len @ 0..=75 => script.push(len as u8),
        len @ 76..=255 => {
            script.push(OP_PUSHDATA1);
            script.push(len as u8);
        }
        len @ 256..=65535 => {
            script.push(OP_PUSHDATA2);
            script.extend_from_slice(&(len as u16).to_le_bytes());
        }
        len => return Err(CoreError::PushTooLarge(len)),
    }
    script.extend_from_slice(data);
    Ok(())
}

/// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`
pub fn p2pkh_locking_bytecode(pubkey_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(25);
    script.push(OP_DUP);
    script.push(OP_HASH160);
    script.push(20);
    script.extend_from_slice(pubkey_hash);
    script.push(OP_EQUALVERIFY);
    script.push(OP_CHECKSIG);
    script
}

/// `OP_HASH160 <hash20> OP_EQUAL`, or `OP_HASH256 <hash32> OP_EQUAL` for P2SH32.
pub fn p2sh_locking_bytecode(script_hash: &[u8]) -> Vec<u8> {
    let mut script = Vec::with_capacity(script_hash.len() + 3);
    script.push(if script_hash.len() == 32 { OP_HASH256 } else { OP_HASH160 });
    script.push(script_hash.len() as u8);
    script.extend_from_slice(script_hash);
    script.push(OP_EQUAL);
    script
}

/// `<signature> <public key>`
pub fn p2pkh_unlocking_bytecode(signature: &[u8], public_key: &[u8]) -> Result<Vec<u8>, CoreError> {
    let mut script = Vec::with_capacity(signature.len() + public_key.len() + 2);
    push_data(&mut script, signature)?;
    push_data(&mut script, public_key)?;
    Ok(script)
}

/// `OP_RETURN <chunk> <chunk> ...`
pub fn data_carrier(chunks: &[&[u8]]) -> Result<Vec<u8>, CoreError> {
    let mut script = vec![OP_RETURN];
    for chunk in chunks {
        push_data(&mut script, chunk)?;
    }
    Ok(script)
}

/// Splits the pushes of a data-carrier script, or `None` if it is not one.
pub fn parse_data_carrier(script: &[u8]) -> Option<Vec<Vec<u8>>> {
    let (&first, mut rest) = script.split_first()?;
    if first != OP_RETURN {
        return None;
    }
    let mut chunks = Vec::new();
    while let Some((&op, tail)) = rest.split_first() {
        let (len, tail) = match op {
            0..=75 => (op as usize, tail),
            OP_PUSHDATA1 => {
                let (&len, tail) = tail.split_first()?;
                (len as usize, tail)
            }
            OP_PUSHDATA2 => {
                if tail.len() < 2 {
                    return None;
                }
                (u16::from_le_bytes([tail[0], tail[1]]) as usize, &tail[2..])
            }
            _ => return None,
        };
        if tail.len() < len {
            return None;
        }
        chunks.push(tail[..len].to_vec());
        rest = &tail[len..];
    }
    Some(chunks)
}
