//! End-to-end integration tests for the chain harness
//!
//! These tests drive the real executors against the mock chain binary
//! (`src/bin/mock_client.rs`), which emulates the wallet client's and the
//! node's prompt and output surfaces.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use chain_harness::common::config::{Binaries, ChainConfig, Config, Timeouts};
use chain_harness::common::paths::ChainHome;
use chain_harness::daemon;
use chain_harness::driver::{Client, RunType};
use chain_harness::setup::NodeSetup;
use chain_harness::testing;
use chain_harness::Error;

fn mock_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mock_client"))
}

fn test_config(home: &Path) -> Config {
    Config {
        binaries: Binaries {
            node: mock_bin(),
            client: mock_bin(),
            engine: mock_bin(),
        },
        chain: ChainConfig {
            home: Some(home.to_path_buf()),
            ..ChainConfig::default()
        },
        timeouts: Timeouts {
            prompt_secs: 2,
            confirm_secs: 2,
        },
        ..Config::default()
    }
}

/// Scratch home + configured client for one test
fn harness() -> (TempDir, Config, ChainHome, Client) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    let home = ChainHome::new(&config).expect("chain home");
    let client = Client::new(&config, &home).expect("client");
    (tmp, config, home, client)
}

#[tokio::test]
async fn create_wallet_parses_structured_output() {
    let (_tmp, _config, _home, client) = harness();

    let wallet = client.create_wallet("alice", "12345678").await.unwrap();
    assert_eq!(wallet.address, "friday1alice");
    assert_eq!(wallet.pubkey, "fridaypub1alice");
    assert!(!wallet.mnemonic.is_empty());
}

#[tokio::test]
async fn create_wallet_parses_legacy_output() {
    let (_tmp, _config, _home, client) = harness();

    let wallet = client.create_wallet("legacy-bob", "12345678").await.unwrap();
    assert_eq!(wallet.address, "friday1legacybob");
    assert_eq!(wallet.pubkey, "fridaypub1legacybob");
    assert!(wallet.mnemonic.starts_with("salute vague"));
}

#[tokio::test]
async fn wallet_info_and_delete_round_trip() {
    let (_tmp, _config, _home, client) = harness();

    let info = client.wallet_info("alice").await.unwrap();
    assert_eq!(info["address"], "friday1alice");

    client.delete_wallet("alice", "12345678").await.unwrap();
}

#[tokio::test]
async fn transfer_returns_a_queryable_txhash() {
    let (_tmp, _config, _home, client) = harness();

    let hash = client
        .transfer_to("friday1carol", 1_000, 100_000_000, 30_000_000, "friday1alice", "12345678")
        .await
        .unwrap();
    assert!(!hash.is_empty());
    assert!(hash.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

    // The returned hash must be queryable and carry a boolean success flag.
    assert!(client.tx_succeeded(&hash).await.unwrap());
}

#[tokio::test]
async fn failed_transaction_queries_as_unsuccessful() {
    let (_tmp, _config, _home, client) = harness();

    assert!(!client.tx_succeeded("BADC0FFEE123").await.unwrap());
}

#[tokio::test]
async fn bond_unbond_and_nickname_extract_hashes() {
    let (_tmp, _config, _home, client) = harness();

    let bonded = client
        .bond(500, 100_000_000, 30_000_000, "friday1alice", "12345678")
        .await
        .unwrap();
    let unbonded = client
        .unbond(500, 100_000_000, 30_000_000, "friday1alice", "12345678")
        .await
        .unwrap();
    let nicked = client
        .set_nickname("alice", "friday1alice", "12345678")
        .await
        .unwrap();
    assert_eq!(bonded, unbonded);
    assert_eq!(bonded, nicked);

    let resolved = client.resolve_nickname("alice").await.unwrap();
    assert_eq!(resolved["address"], "friday1alice");
}

#[tokio::test]
async fn contract_run_requires_a_known_run_type() {
    let (_tmp, _config, _home, client) = harness();

    // Rejected before any process is spawned.
    let err = "evil".parse::<RunType>().unwrap_err();
    assert!(matches!(err, Error::InvalidContractRunType(_)));

    let hash = client
        .run_contract(
            RunType::Wasm,
            "counter.wasm",
            r#"{"method": "inc"}"#,
            100_000_000,
            30_000_000,
            "friday1alice",
            "12345678",
        )
        .await
        .unwrap();
    assert!(!hash.is_empty());
}

#[tokio::test]
async fn interactive_read_timeout_is_finished_with_error() {
    let (_tmp, _config, _home, client) = harness();

    // The mock delays its first prompt well past the configured budget.
    let err = client
        .transfer_to("sleepy", 1, 1, 1, "friday1alice", "12345678")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::FinishedWithError(_)));
}

#[tokio::test]
async fn config_writes_all_four_settings() {
    let (_tmp, _config, home, client) = harness();

    client.write_config("testchain").await.unwrap();

    let log = std::fs::read_to_string(home.client_home().join("config_calls.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(
        lines,
        vec![
            "chain-id testchain",
            "output json",
            "trust-node true",
            "indent true"
        ]
    );
}

#[tokio::test]
async fn config_aborts_on_first_failing_command() {
    let (_tmp, _config, home, client) = harness();

    let err = client.write_config("badchain").await.unwrap_err();
    assert!(matches!(err, Error::FinishedWithError(_)));

    // Only the failing command ran; the remaining settings were not attempted.
    let log = std::fs::read_to_string(home.client_home().join("config_calls.log")).unwrap();
    assert_eq!(log.lines().collect::<Vec<_>>(), vec!["chain-id badchain"]);
}

#[tokio::test]
async fn daemons_report_liveness_and_stop() {
    let (_tmp, config, home, _client) = harness();

    let mut node = daemon::spawn_node(&config).unwrap();
    assert!(node.is_alive());
    node.ensure_alive().unwrap();
    node.stop().await.unwrap();
    assert!(!node.is_alive());
    assert!(matches!(node.ensure_alive(), Err(Error::DeadDaemon(_))));

    let mut engine = daemon::spawn_engine(&config, &home).unwrap();
    assert!(engine.is_alive());
    // The socket's parent directory is prepared for the engine.
    assert!(home.engine_socket().parent().unwrap().exists());
    engine.stop().await.unwrap();
}

#[tokio::test]
async fn bootstrap_sequence_runs_against_the_node_binary() {
    let (_tmp, config, home, _client) = harness();
    let setup = NodeSetup::new(&config, &home).unwrap();

    setup.init_chain("testnode", "testchain").await.unwrap();

    let manifest = home.home().join("manifest.toml");
    std::fs::write(&manifest, "[genesis]\n").unwrap();
    setup.copy_manifest(&manifest).await.unwrap();
    assert!(home.manifest_path().exists());

    setup
        .add_genesis_account("friday1alice", 500_000_000, 1_000_000)
        .await
        .unwrap();
    setup.load_chainspec().await.unwrap();
    setup.gentx("validator", "12345678").await.unwrap();
    setup.collect_gentxs().await.unwrap();
    setup.validate_genesis().await.unwrap();
    setup.unsafe_reset_all().await.unwrap();
}

#[tokio::test]
async fn cleanup_leaves_a_fresh_home() {
    let (_tmp, _config, home, client) = harness();

    // Populate all three managed directories.
    std::fs::create_dir_all(home.node_config_dir()).unwrap();
    std::fs::create_dir_all(home.node_data_dir()).unwrap();
    client.write_config("testchain").await.unwrap();
    assert!(home.client_home().exists());

    home.cleanup().unwrap();
    assert!(!home.node_home().join("config").exists());
    assert!(!home.client_home().exists());

    // Idempotent on a fresh home.
    home.cleanup().unwrap();
}

#[tokio::test]
async fn scenario_runner_executes_a_transfer_flow() {
    let (tmp, config, _home, _client) = harness();

    let scenario = r#"
name: transfer smoke
description: wallet creation, transfer, tx assertion, balance check
steps:
  - action: create_wallet
    alias: alice
    passphrase: "12345678"
  - action: create_wallet
    alias: bob
    passphrase: "12345678"
  - action: transfer
    from: alice
    to: bob
    amount: 1000
    passphrase: "12345678"
  - action: assert_tx_ok
  - action: check_balance
    from: alice
    contains: "500000000"
"#;
    let path = tmp.path().join("transfer_smoke.yaml");
    std::fs::write(&path, scenario).unwrap();

    let result = testing::run_scenario(&config, &path, false).await.unwrap();
    assert!(result.passed, "scenario failed: {:?}", result.error);
    assert_eq!(result.steps_run, 5);
    assert_eq!(result.steps_total, 5);
}

#[tokio::test]
async fn scenario_runner_reports_invalid_run_type() {
    let (tmp, config, _home, _client) = harness();

    let scenario = r#"
name: invalid run type
steps:
  - action: run_contract
    run_type: evil
    value: counter.wasm
    from: alice
    passphrase: "12345678"
"#;
    let path = tmp.path().join("invalid_run_type.yaml");
    std::fs::write(&path, scenario).unwrap();

    let result = testing::run_scenario(&config, &path, false).await.unwrap();
    assert!(!result.passed);
    assert_eq!(result.steps_run, 0);
    assert!(result.error.unwrap().contains("Invalid contract run type"));
}
