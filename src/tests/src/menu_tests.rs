//! Tests for the menu loop.

use crate::mocks::{printed, session, utxo, MockFetcher, MockProvider};
use bch_cli::{menu, WalletError};
use bch_network::NetworkError;

#[tokio::test]
async fn test_unknown_selection_rerenders_menu() {
    let provider = MockProvider::new(Vec::new());
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "9\n\nabc\n6\n");

    menu::run(&mut session).await.unwrap();

    let output = printed(&session);
    assert_eq!(output.matches("Unknown selection").count(), 2);
    assert_eq!(output.matches("Menu:").count(), 3);
}

#[tokio::test]
async fn test_recoverable_errors_keep_the_menu_running() {
    let provider = MockProvider::new(vec![utxo(0, 5000, None)]);
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "4\n3\n0\nftp://example.com\n6\n");

    menu::run(&mut session).await.unwrap();

    let output = printed(&session);
    assert!(output.contains("Not enough UTXOs"));
    assert!(output.contains("Invalid URL"));
    assert!(provider.broadcasts().is_empty());
}

#[tokio::test]
async fn test_fatal_errors_leave_the_menu() {
    let provider = MockProvider::failing();
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "1\n\n6\n");

    let result = menu::run(&mut session).await;
    assert!(matches!(
        result,
        Err(WalletError::NetworkError(NetworkError::ConnectionClosed(_)))
    ));
}

#[tokio::test]
async fn test_closed_console_is_fatal() {
    let provider = MockProvider::new(Vec::new());
    let fetcher = MockFetcher::new(200, "{}");
    let mut session = session(&provider, &fetcher, "");

    let result = menu::run(&mut session).await;
    assert!(matches!(result, Err(WalletError::FileError(_))));
}
