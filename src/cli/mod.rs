//! CLI command handling
//!
//! Dispatches harness commands against the configured chain home.

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::paths::ChainHome;
use crate::common::{Error, Result};
use crate::daemon;
use crate::driver::Client;
use crate::setup::NodeSetup;
use crate::testing;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Up => {
            let home = ChainHome::new(config)?;
            let mut engine = daemon::spawn_engine(config, &home)?;
            let mut node = daemon::spawn_node(config)?;

            // Give both a moment to fail fast on bad arguments.
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
            engine.ensure_alive()?;
            node.ensure_alive()?;

            println!(
                "engine running (pid {}), node running (pid {})",
                engine.id().unwrap_or(0),
                node.id().unwrap_or(0)
            );
            println!("Press Ctrl-C to stop.");

            tokio::signal::ctrl_c().await?;
            node.stop().await?;
            engine.stop().await?;
            println!("Stopped.");
            Ok(())
        }

        Commands::Bootstrap {
            moniker,
            chain_id,
            manifest,
            alias,
            passphrase,
            coins,
            stake,
        } => {
            let home = ChainHome::new(config)?;
            let setup = NodeSetup::new(config, &home)?;
            let client = Client::new(config, &home)?;

            setup.init_chain(&moniker, &chain_id).await?;
            println!("Initialized chain '{}' under {}", chain_id, home.node_home().display());

            if let Some(manifest) = &manifest {
                setup.copy_manifest(manifest).await?;
                println!("Installed manifest {}", manifest.display());
            }

            client.write_config(&chain_id).await?;

            let wallet = client.create_wallet(&alias, &passphrase).await?;
            println!("Created wallet '{}': {}", alias, wallet.address);

            setup
                .add_genesis_account(&wallet.address, coins, stake)
                .await?;
            println!("Registered genesis account with {} coins, {} stake", coins, stake);

            if manifest.is_some() {
                setup.load_chainspec().await?;
            }

            setup.gentx(&alias, &passphrase).await?;
            setup.collect_gentxs().await?;
            setup.validate_genesis().await?;
            println!("Genesis assembled and validated. Run 'chain-harness up' to start.");
            Ok(())
        }

        Commands::Clean => {
            let home = ChainHome::new(config)?;
            home.cleanup()?;
            println!("Removed {}", home.node_home().display());
            println!("Removed {}", home.client_home().display());
            Ok(())
        }

        Commands::Test {
            scenarios,
            verbose,
        } => {
            let mut failed = 0usize;
            let total = scenarios.len();

            for path in &scenarios {
                let result = testing::run_scenario(config, path, verbose).await?;
                if !result.passed {
                    failed += 1;
                }
            }

            println!();
            if failed > 0 {
                println!("{}/{} scenarios failed", failed, total);
                return Err(Error::Scenario(format!("{} of {} scenarios failed", failed, total)));
            }
            println!("All {} scenarios passed", total);
            Ok(())
        }
    }
}
