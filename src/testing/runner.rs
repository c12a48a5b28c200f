//! Scenario runner implementation
//!
//! Executes scenario steps against the driver, making assertions against
//! structured results rather than fragile string matching.

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;

use colored::Colorize;
use tokio::process::Command as TokioCommand;

use crate::common::config::Config;
use crate::common::paths::ChainHome;
use crate::common::{Error, Result};
use crate::driver::{Client, RunType, WalletRecord};

use super::config::{Scenario, Step};

/// Result of a scenario run
#[derive(Debug)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    pub error: Option<String>,
}

/// Mutable state threaded through a scenario's steps
#[derive(Default)]
struct StepContext {
    /// Wallets created so far, by alias
    wallets: HashMap<String, WalletRecord>,
    /// Hash of the most recent transaction
    last_tx: Option<String>,
}

impl StepContext {
    /// Resolve a wallet alias to its address; literals pass through
    fn resolve(&self, name: &str) -> String {
        match self.wallets.get(name) {
            Some(wallet) => wallet.address.clone(),
            None => name.to_string(),
        }
    }
}

/// Run a test scenario from a YAML file
pub async fn run_scenario(config: &Config, path: &Path, verbose: bool) -> Result<ScenarioResult> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read scenario '{}': {}", path.display(), e))
    })?;

    let scenario: Scenario = serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse scenario: {}", e)))?;

    let steps_total = scenario.steps.len();

    println!(
        "\n{} {}",
        "Running Scenario:".blue().bold(),
        scenario.name.white().bold()
    );

    if let Some(desc) = &scenario.description {
        println!("  {}", desc.dimmed());
    }

    // Run setup steps
    if let Some(setup_steps) = &scenario.setup {
        println!("\n{}", "Setup:".cyan());
        for step in setup_steps {
            if verbose {
                println!("  $ {}", step.shell.dimmed());
            }

            let status = TokioCommand::new("sh")
                .arg("-c")
                .arg(&step.shell)
                .stdin(Stdio::null())
                .stdout(if verbose {
                    Stdio::inherit()
                } else {
                    Stdio::null()
                })
                .stderr(if verbose {
                    Stdio::inherit()
                } else {
                    Stdio::null()
                })
                .status()
                .await
                .map_err(|e| Error::Config(format!("Setup command failed to execute: {}", e)))?;

            if !status.success() {
                return Ok(ScenarioResult {
                    name: scenario.name.clone(),
                    passed: false,
                    steps_run: 0,
                    steps_total,
                    error: Some(format!(
                        "Setup command '{}' failed with exit code {:?}",
                        step.shell,
                        status.code()
                    )),
                });
            }
            println!("  {} {}", "✓".green(), step.shell.dimmed());
        }
    }

    // Scratch home for scenarios that should not touch the configured one.
    // The TempDir must outlive the steps.
    let mut scratch = None;
    let home = if scenario.ephemeral_home {
        let dir = tempfile::tempdir()?;
        let mut scoped = config.clone();
        scoped.chain.home = Some(dir.path().to_path_buf());
        let home = ChainHome::new(&scoped)?;
        scratch = Some(dir);
        home
    } else {
        ChainHome::new(config)?
    };

    let client = Client::new(config, &home)?;
    let mut ctx = StepContext::default();

    println!("\n{}", "Steps:".cyan());
    for (i, step) in scenario.steps.iter().enumerate() {
        match run_step(&client, step, &mut ctx).await {
            Ok(label) => {
                println!("  {} {}", "✓".green(), label);
            }
            Err(e) => {
                println!("  {} step {} failed: {}", "✗".red(), i + 1, e);
                return Ok(ScenarioResult {
                    name: scenario.name.clone(),
                    passed: false,
                    steps_run: i,
                    steps_total,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    drop(scratch);

    println!("\n{} {}", "PASS".green().bold(), scenario.name);
    Ok(ScenarioResult {
        name: scenario.name,
        passed: true,
        steps_run: steps_total,
        steps_total,
        error: None,
    })
}

async fn run_step(client: &Client, step: &Step, ctx: &mut StepContext) -> Result<String> {
    match step {
        Step::CreateWallet { alias, passphrase } => {
            let wallet = client.create_wallet(alias, passphrase).await?;
            let label = format!("create_wallet {} ({})", alias, wallet.address);
            ctx.wallets.insert(alias.clone(), wallet);
            Ok(label)
        }

        Step::DeleteWallet { alias, passphrase } => {
            client.delete_wallet(alias, passphrase).await?;
            ctx.wallets.remove(alias);
            Ok(format!("delete_wallet {}", alias))
        }

        Step::Transfer {
            from,
            to,
            amount,
            fee,
            gas_price,
            passphrase,
        } => {
            let recipient = ctx.resolve(to);
            let sender = ctx.resolve(from);
            let hash = client
                .transfer_to(&recipient, *amount, *fee, *gas_price, &sender, passphrase)
                .await?;
            let label = format!("transfer {} -> {} ({})", from, to, hash);
            ctx.last_tx = Some(hash);
            Ok(label)
        }

        Step::Bond {
            from,
            amount,
            fee,
            gas_price,
            passphrase,
        } => {
            let sender = ctx.resolve(from);
            let hash = client
                .bond(*amount, *fee, *gas_price, &sender, passphrase)
                .await?;
            let label = format!("bond {} ({})", from, hash);
            ctx.last_tx = Some(hash);
            Ok(label)
        }

        Step::Unbond {
            from,
            amount,
            fee,
            gas_price,
            passphrase,
        } => {
            let sender = ctx.resolve(from);
            let hash = client
                .unbond(*amount, *fee, *gas_price, &sender, passphrase)
                .await?;
            let label = format!("unbond {} ({})", from, hash);
            ctx.last_tx = Some(hash);
            Ok(label)
        }

        Step::SetNickname {
            nickname,
            owner,
            passphrase,
        } => {
            let address = ctx.resolve(owner);
            let hash = client.set_nickname(nickname, &address, passphrase).await?;
            let label = format!("set_nickname {} -> {} ({})", nickname, owner, hash);
            ctx.last_tx = Some(hash);
            Ok(label)
        }

        Step::RunContract {
            run_type,
            value,
            args,
            fee,
            gas_price,
            from,
            passphrase,
        } => {
            // Validated here, before any process is spawned.
            let run_type: RunType = run_type.parse()?;
            let sender = ctx.resolve(from);
            let hash = client
                .run_contract(run_type, value, args, *fee, *gas_price, &sender, passphrase)
                .await?;
            let label = format!("run_contract {} {} ({})", run_type, value, hash);
            ctx.last_tx = Some(hash);
            Ok(label)
        }

        Step::AssertTxOk => {
            let hash = ctx
                .last_tx
                .clone()
                .ok_or_else(|| Error::Scenario("assert_tx_ok before any transaction".into()))?;
            if !client.tx_succeeded(&hash).await? {
                return Err(Error::Scenario(format!("transaction {} failed", hash)));
            }
            Ok(format!("assert_tx_ok {}", hash))
        }

        Step::CheckBalance { from, contains } => {
            let address = ctx.resolve(from);
            let balance = client.get_balance(&address).await?;
            if let Some(expected) = contains {
                let serialized = balance.to_string();
                if !serialized.contains(expected.as_str()) {
                    return Err(Error::Scenario(format!(
                        "balance of {} does not contain '{}': {}",
                        from, expected, serialized
                    )));
                }
            }
            Ok(format!("check_balance {}", from))
        }
    }
}
