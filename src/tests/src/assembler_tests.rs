//! Tests for the two-pass transaction assembly.

use crate::mocks::{decode_outputs, keys, utxo};
use bch_cli::assembler::PLACEHOLDER_FEE;
use bch_cli::{assemble, WalletError};
use bch_core::transaction::remaining;
use bch_core::{CoreError, Input, Output, TransactionDraft, Utxo, DUST};
use std::cell::RefCell;

fn single_input_draft(funding: &Utxo, fee: u64) -> Result<TransactionDraft, WalletError> {
    let wallet = keys(0);
    Ok(TransactionDraft::new(
        vec![Input {
            utxo: funding.clone(),
            unlocker: wallet.unlocker(),
        }],
        vec![
            Output::new(keys(1).locking_bytecode(), DUST, None),
            Output::new(wallet.locking_bytecode(), remaining(funding.satoshis, DUST + fee)?, None),
        ],
    ))
}

#[test]
fn test_fee_is_measured_size_plus_one() {
    let funding = utxo(0, 20_000, None);
    let fees = RefCell::new(Vec::new());

    let assembled = assemble(|fee| {
        fees.borrow_mut().push(fee);
        single_input_draft(&funding, fee)
    })
    .unwrap();

    let sizing = single_input_draft(&funding, PLACEHOLDER_FEE)
        .unwrap()
        .sign()
        .unwrap();
    assert_eq!(*fees.borrow(), vec![PLACEHOLDER_FEE, sizing.size() as u64 + 1]);
    assert_eq!(assembled.fee, sizing.size() as u64 + 1);
    assert_eq!(
        assembled.draft.input_total() - assembled.draft.output_total(),
        assembled.fee
    );
}

#[test]
fn test_passes_differ_only_in_fee_bearing_output() {
    let funding = utxo(3, 20_000, None);
    let drafts = RefCell::new(Vec::new());

    let assembled = assemble(|fee| {
        let draft = single_input_draft(&funding, fee)?;
        drafts.borrow_mut().push(draft.clone());
        Ok(draft)
    })
    .unwrap();

    let drafts = drafts.into_inner();
    assert_eq!(drafts.len(), 2);
    let (sizing, last) = (&drafts[0], &drafts[1]);

    assert_eq!(sizing.inputs.len(), last.inputs.len());
    assert_eq!(sizing.inputs[0].utxo, last.inputs[0].utxo);
    assert_eq!(sizing.outputs.len(), last.outputs.len());
    assert_eq!(sizing.outputs[0], last.outputs[0]);
    assert_eq!(sizing.outputs[1].locking_bytecode, last.outputs[1].locking_bytecode);
    assert_eq!(sizing.outputs[1].satoshis, 20_000 - DUST - PLACEHOLDER_FEE);
    assert_eq!(last.outputs[1].satoshis, 20_000 - DUST - assembled.fee);

    let outputs = decode_outputs(&assembled.signed.to_hex());
    assert_eq!(outputs[1].satoshis, last.outputs[1].satoshis);
}

#[test]
fn test_underfunded_build_is_fatal() {
    let funding = utxo(0, 1500, None);
    let result = assemble(|fee| single_input_draft(&funding, fee));

    match result {
        Err(error @ WalletError::CoreError(CoreError::InsufficientFunds { .. })) => {
            assert!(!error.is_recoverable())
        }
        other => panic!("unexpected result {:?}", other.map(|a| a.fee)),
    }
}
