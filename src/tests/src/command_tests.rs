//! Tests for the menu commands against mocked services.

use crate::mocks::{
    decode_outputs, keys, printed, reported_fee, session, utxo, MockFetcher, MockProvider,
    BROADCAST_TXID,
};
use bch_cli::commands::{
    combine_inputs, encode_private_key, send_auth_head, show_utxos, update_bcmr,
};
use bch_cli::{Submission, WalletError};
use bch_core::keys::{double_sha256, sha256};
use bch_core::script::parse_data_carrier;
use bch_core::{Network, Nft, NftCapability, PrivateKey, TokenData, DUST};

const CATEGORY_A: &str = "aa00000000000000000000000000000000000000000000000000000000000001";
const CATEGORY_B: &str = "bb00000000000000000000000000000000000000000000000000000000000002";

fn nft(category: &str) -> TokenData {
    TokenData {
        category: category.to_string(),
        amount: 0,
        nft: Some(Nft {
            capability: NftCapability::Minting,
            commitment: String::new(),
        }),
    }
}

#[tokio::test]
async fn test_show_utxos_defaults_to_wallet_address() {
    let provider = MockProvider::new(vec![utxo(0, 5000, None), utxo(1, 6000, None)]);
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "\n");

    show_utxos::run(&mut session).await.unwrap();

    assert_eq!(provider.queries(), vec![keys(0).address().encode()]);
    let output = printed(&session);
    assert!(output.contains("Found '2' UTXOs"));
    assert!(output.contains("Input (0): "));
    assert!(output.contains("Input (1): "));
}

#[tokio::test]
async fn test_show_utxos_rejects_invalid_address() {
    let provider = MockProvider::new(Vec::new());
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "bitcoincash:qnotanaddress\n");

    let result = show_utxos::run(&mut session).await;
    assert!(matches!(result, Err(WalletError::InvalidAddress(_))));
    assert!(provider.queries().is_empty());
}

#[tokio::test]
async fn test_send_auth_head_rejects_small_input() {
    let provider = MockProvider::new(vec![utxo(0, 4 * DUST, None)]);
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "0\n");

    let result = send_auth_head::run(&mut session).await;
    assert!(matches!(result, Err(WalletError::InsufficientBalance(_))));
    assert!(provider.broadcasts().is_empty());
}

#[tokio::test]
async fn test_send_auth_head_moves_head_and_keeps_tokens() {
    let token = TokenData::fungible(CATEGORY_A, 5);
    let provider = MockProvider::new(vec![utxo(0, 10_000, Some(token))]);
    let fetcher = MockFetcher::new(200, "{}");
    let destination = keys(1);
    let input = format!("7\n0\nnot-an-address\n{}\ny\n", destination.address());
    let mut session = session(&provider, &fetcher, &input);

    let submission = send_auth_head::run(&mut session).await.unwrap();
    assert_eq!(
        submission,
        Submission::Broadcast {
            txid: BROADCAST_TXID.to_string()
        }
    );

    let output = printed(&session);
    assert!(output.contains("Invalid address"));
    let fee = reported_fee(&output);

    let broadcasts = provider.broadcasts();
    assert_eq!(broadcasts.len(), 1);
    let outputs = decode_outputs(&broadcasts[0]);
    assert_eq!(outputs.len(), 2);

    assert_eq!(outputs[0].satoshis, DUST);
    assert_eq!(outputs[0].script, destination.locking_bytecode());

    assert_eq!(outputs[1].satoshis, 10_000 - DUST - fee);
    assert_eq!(outputs[1].script[0], 0xef);
    assert!(outputs[1].script.ends_with(&keys(0).locking_bytecode()));
}

#[tokio::test]
async fn test_send_auth_head_declined_is_not_broadcast() {
    let provider = MockProvider::new(vec![utxo(0, 10_000, None)]);
    let fetcher = MockFetcher::new(200, "{}");
    let input = format!("0\n{}\n\n", keys(1).address());
    let mut session = session(&provider, &fetcher, &input);

    let submission = send_auth_head::run(&mut session).await.unwrap();
    let tx_hex = match submission {
        Submission::Inspected { tx_hex } => tx_hex,
        other => panic!("unexpected submission {:?}", other),
    };
    assert!(provider.broadcasts().is_empty());

    let mut txid = double_sha256(&hex::decode(&tx_hex).unwrap());
    txid.reverse();

    let output = printed(&session);
    assert!(output.contains(&tx_hex));
    assert!(output.contains(&format!("Transaction id: {}", hex::encode(txid))));
    assert!(output.contains("Input (0) token: none"));
    assert!(output.contains("Output (1) token: none"));
    assert!(!output.contains("(data carrier)"));
}

#[tokio::test]
async fn test_update_bcmr_rejects_bad_urls_before_fetching() {
    for url in ["http://example.com/meta.json", "https://example.com/"] {
        let provider = MockProvider::new(vec![utxo(0, 5000, None)]);
        let fetcher = MockFetcher::new(200, "{}");
        let input = format!("0\n{}\n", url);
        let mut session = session(&provider, &fetcher, &input);

        let result = update_bcmr::run(&mut session).await;
        assert!(matches!(result, Err(WalletError::InvalidUrl(_))));
        assert!(fetcher.fetched().is_empty());
        assert!(provider.broadcasts().is_empty());
    }
}

#[tokio::test]
async fn test_update_bcmr_rejects_unsuitable_inputs() {
    let provider = MockProvider::new(vec![
        utxo(0, 2 * DUST, None),
        utxo(1, 5000, Some(TokenData::fungible(CATEGORY_A, 1))),
    ]);
    let fetcher = MockFetcher::new(200, "{}");

    let mut session = session(&provider, &fetcher, "0\n");
    let result = update_bcmr::run(&mut session).await;
    assert!(matches!(result, Err(WalletError::InsufficientBalance(_))));

    let mut session = crate::mocks::session(&provider, &fetcher, "1\n");
    let result = update_bcmr::run(&mut session).await;
    assert!(matches!(result, Err(WalletError::InvalidSelection(_))));
    assert!(fetcher.fetched().is_empty());
}

#[tokio::test]
async fn test_update_bcmr_requires_successful_fetch() {
    let provider = MockProvider::new(vec![utxo(0, 5000, None)]);
    let fetcher = MockFetcher::new(404, "not found");
    let mut session = session(&provider, &fetcher, "0\nhttps://example.com/meta.json\n");

    let result = update_bcmr::run(&mut session).await;
    assert!(matches!(result, Err(WalletError::MetadataUnavailable(_))));
    assert_eq!(fetcher.fetched(), vec!["https://example.com/meta.json".to_string()]);
    assert!(provider.broadcasts().is_empty());
}

#[tokio::test]
async fn test_update_bcmr_publishes_reference() {
    let provider = MockProvider::new(vec![utxo(0, 5000, None)]);
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "0\nhttps://example.com/meta.json\nyes\n");

    update_bcmr::run(&mut session).await.unwrap();
    let fee = reported_fee(&printed(&session));

    let broadcasts = provider.broadcasts();
    assert_eq!(broadcasts.len(), 1);
    let outputs = decode_outputs(&broadcasts[0]);
    assert_eq!(outputs.len(), 2);

    assert_eq!(outputs[0].satoshis, 5000 - fee);
    assert_eq!(outputs[0].script, keys(0).locking_bytecode());

    assert_eq!(outputs[1].satoshis, 0);
    let pushes = parse_data_carrier(&outputs[1].script).unwrap();
    assert_eq!(
        pushes,
        vec![
            b"BCMR".to_vec(),
            sha256(b"{}").to_vec(),
            b"example.com/meta.json".to_vec(),
        ]
    );
}

#[tokio::test]
async fn test_update_bcmr_declined_marks_data_carrier() {
    let provider = MockProvider::new(vec![utxo(0, 5000, None)]);
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "0\nhttps://example.com/meta.json\n\n");

    let submission = update_bcmr::run(&mut session).await.unwrap();
    assert!(matches!(submission, Submission::Inspected { .. }));
    assert!(provider.broadcasts().is_empty());

    let output = printed(&session);
    assert!(output.contains("Output (0) token: none\n"));
    assert!(output.contains("Output (1) token: none (data carrier)"));
}

#[tokio::test]
async fn test_combine_requires_two_utxos_before_prompting() {
    let provider = MockProvider::new(vec![utxo(0, 50_000, None)]);
    let fetcher = MockFetcher::new(200, "{}");
    // No scripted answers: any index prompt would hit end of input.
    let mut session = session(&provider, &fetcher, "");

    let result = combine_inputs::run(&mut session).await;
    assert!(matches!(
        result,
        Err(WalletError::NotEnoughUtxos { required: 2, found: 1 })
    ));
}

#[tokio::test]
async fn test_combine_plain_inputs() {
    let provider = MockProvider::new(vec![utxo(0, 5000, None), utxo(1, 6000, None)]);
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "0\n0\n1\ny\n");

    combine_inputs::run(&mut session).await.unwrap();
    let output = printed(&session);
    assert!(output.contains("already selected"));
    let fee = reported_fee(&output);

    let outputs = decode_outputs(&provider.broadcasts()[0]);
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].satoshis, 11_000 - fee);
    assert_eq!(outputs[0].script, keys(0).locking_bytecode());
}

#[tokio::test]
async fn test_combine_rejects_small_total() {
    let provider = MockProvider::new(vec![utxo(0, 2000, None), utxo(1, 2000, None)]);
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "0\n1\n");

    let result = combine_inputs::run(&mut session).await;
    assert!(matches!(result, Err(WalletError::InsufficientBalance(_))));
}

#[tokio::test]
async fn test_combine_rejects_incompatible_tokens() {
    let cases = vec![
        (
            Some(TokenData::fungible(CATEGORY_A, 1)),
            Some(TokenData::fungible(CATEGORY_B, 1)),
        ),
        (None, Some(nft(CATEGORY_A))),
    ];
    for (first, second) in cases {
        let provider = MockProvider::new(vec![utxo(0, 5000, first), utxo(1, 6000, second)]);
        let fetcher = MockFetcher::new(200, "{}");
        let mut session = session(&provider, &fetcher, "0\n1\n");

        let result = combine_inputs::run(&mut session).await;
        assert!(matches!(result, Err(WalletError::IncompatibleTokens(_))));
        assert!(provider.broadcasts().is_empty());
    }
}

#[tokio::test]
async fn test_combine_plain_with_fungible_carries_tokens() {
    let token = TokenData::fungible(CATEGORY_A, 250);
    let provider = MockProvider::new(vec![utxo(0, 5000, None), utxo(1, 6000, Some(token.clone()))]);
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "1\n0\ny\n");

    combine_inputs::run(&mut session).await.unwrap();

    let outputs = decode_outputs(&provider.broadcasts()[0]);
    assert_eq!(outputs.len(), 1);
    let mut expected = token.encode_prefix().unwrap();
    expected.extend_from_slice(&keys(0).locking_bytecode());
    assert_eq!(outputs[0].script, expected);
}

#[tokio::test]
async fn test_encode_private_key_reprompts_for_network() {
    let provider = MockProvider::new(Vec::new());
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "bogus\nregtest\ntestnet\n");

    encode_private_key::run(&mut session).await.unwrap();

    let output = printed(&session);
    assert!(output.contains("Unknown network 'bogus'"));
    assert!(output.contains("Unknown network 'regtest'"));

    let wif = output
        .lines()
        .find_map(|line| line.split("WIF (testnet): ").nth(1))
        .unwrap()
        .trim()
        .to_string();
    let (decoded, compressed) = PrivateKey::from_wif(&wif, Network::Testnet).unwrap();
    assert!(compressed);
    assert_eq!(decoded.public_key_hash(), keys(0).address().hash());
}
