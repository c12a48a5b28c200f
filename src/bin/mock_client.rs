//! Mock chain binaries for integration testing
//!
//! Emulates the subcommand surfaces of the wallet client and the node
//! daemon (and the execution engine's argument shape) without a real
//! chain, so executor and driver behavior can be tested end to end.
//!
//! Trigger arguments steer failure paths: an alias starting with `legacy`
//! selects the legacy text key output, a recipient named `sleepy` delays
//! the first prompt past any sane read timeout, a chain id of `badchain`
//! fails the config command, and a tx hash starting with `BAD` queries as
//! unsuccessful.

use std::io::{BufRead, BufReader, StdinLock, Write};
use std::path::PathBuf;
use std::{env, thread, time::Duration};

const TXHASH: &str = "B8E24B4A7A5D64A8CDE3A24A5D3A9E4F7C21D0B35E6F8A90B1C2D3E4F5A6B7C8";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let stdin = std::io::stdin();
    let mut input = BufReader::new(stdin.lock());

    match args.first().map(String::as_str) {
        Some("keys") => keys(&args[1..], &mut input),
        Some("config") => config(&args[1..]),
        Some("query") => query(&args[1..]),
        Some("nickname") => {
            if args.get(1).map(String::as_str) == Some("get-address") {
                let nickname = args.get(2).cloned().unwrap_or_default();
                println!(
                    r#"{{"nickname": "{}", "address": "{}"}}"#,
                    nickname,
                    address_for(&nickname)
                );
            } else {
                tx_flow(&args[1..], &mut input);
            }
        }
        Some("hdac") => {
            if args.get(1).map(String::as_str) == Some("getbalance") {
                println!(r#"{{"value": "500000000"}}"#);
            } else {
                tx_flow(&args[1..], &mut input);
            }
        }
        Some("contract") => tx_flow(&args[1..], &mut input),
        Some("init") => {
            let moniker = args.get(1).cloned().unwrap_or_default();
            println!(r#"{{"moniker": "{}", "chain_id": "mock", "app_message": {{}}}}"#, moniker);
        }
        Some("gentx") => {
            prompt("Password to sign with key:");
            read_line(&mut input);
            println!(r#"{{"gentx": "written"}}"#);
        }
        Some(
            "add-el-genesis-account" | "load-chainspec" | "collect-gentxs" | "validate-genesis"
            | "unsafe-reset-all",
        ) => {}
        Some("start") => daemon_loop(),
        // Engine invocation: a single socket-path argument.
        Some(path) if path.contains('/') => daemon_loop(),
        _ => {
            eprintln!("mock_client: unknown command {:?}", args);
            std::process::exit(2);
        }
    }
}

fn prompt(text: &str) {
    println!("{}", text);
    std::io::stdout().flush().ok();
}

fn read_line(input: &mut BufReader<StdinLock<'_>>) -> String {
    let mut line = String::new();
    input.read_line(&mut line).ok();
    line.trim().to_string()
}

/// Deterministic bech32-ish address derived from an alias
fn address_for(alias: &str) -> String {
    let suffix: String = alias
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    format!("friday1{}", if suffix.is_empty() { "empty".to_string() } else { suffix })
}

fn pubkey_for(alias: &str) -> String {
    format!("fridaypub1{}", address_for(alias).trim_start_matches("friday1"))
}

fn keys(args: &[String], input: &mut BufReader<StdinLock<'_>>) {
    match args.first().map(String::as_str) {
        Some("add") => {
            let alias = args.get(1).cloned().unwrap_or_default();
            if alias.contains("sleepy") {
                thread::sleep(Duration::from_secs(5));
            }
            prompt("Enter a passphrase to encrypt your key to disk:");
            read_line(input);
            prompt("Repeat the passphrase:");
            read_line(input);

            if alias.starts_with("legacy") {
                println!("NAME:\tTYPE:\tADDRESS:\t\tPUBKEY:");
                println!(
                    "{}\tlocal\taddress: {}\tpubkey: {}",
                    alias,
                    address_for(&alias),
                    pubkey_for(&alias)
                );
                println!();
                println!("**Important** write this mnemonic phrase in a safe place.");
                println!();
                println!("salute vague tower mango tonight slush badge exotic tomato usage mind tragic");
            } else {
                println!(
                    r#"{{"name": "{}", "address": "{}", "pubkey": "{}", "mnemonic": "salute vague tower mango tonight slush badge exotic tomato usage mind tragic"}}"#,
                    alias,
                    address_for(&alias),
                    pubkey_for(&alias)
                );
            }
        }
        Some("show") => {
            let alias = args.get(1).cloned().unwrap_or_default();
            println!(
                r#"{{"name": "{}", "address": "{}", "pubkey": "{}"}}"#,
                alias,
                address_for(&alias),
                pubkey_for(&alias)
            );
        }
        Some("delete") => {
            prompt("DANGER - enter password to permanently delete key:");
            read_line(input);
            println!("KEY DELETED");
        }
        _ => std::process::exit(2),
    }
}

/// Records every config invocation under the keystore home so tests can
/// assert which commands ran.
fn config(args: &[String]) {
    let key = args.first().cloned().unwrap_or_default();
    let value = args.get(1).cloned().unwrap_or_default();

    if let Some(home) = flag_value(args, "--home") {
        std::fs::create_dir_all(&home).ok();
        let log = home.join("config_calls.log");
        let mut entries = std::fs::read_to_string(&log).unwrap_or_default();
        entries.push_str(&format!("{} {}\n", key, value));
        std::fs::write(&log, entries).ok();
    }

    if key == "chain-id" && value == "badchain" {
        eprintln!("invalid chain id: badchain");
        std::process::exit(1);
    }
}

fn query(args: &[String]) {
    let hash = args.get(1).cloned().unwrap_or_default();
    let success = !hash.starts_with("BAD");
    let log = if success { "" } else { "out of gas" };
    println!(
        r#"{{"height": "7", "txhash": "{}", "logs": [{{"msg_index": 0, "success": {}, "log": "{}"}}]}}"#,
        hash, success, log
    );
}

fn tx_flow(args: &[String], input: &mut BufReader<StdinLock<'_>>) {
    if args.iter().any(|a| a == "sleepy") {
        thread::sleep(Duration::from_secs(5));
    }
    prompt("confirm transaction before signing and broadcasting [y/N]:");
    read_line(input);
    prompt("Password to sign with key:");
    read_line(input);
    println!(
        r#"{{"height": "0", "txhash": "{}", "raw_log": "[]"}}"#,
        TXHASH
    );
}

fn flag_value(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn daemon_loop() -> ! {
    loop {
        thread::sleep(Duration::from_secs(1));
    }
}
