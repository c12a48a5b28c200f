//! Chain integration-test harness
//!
//! Drives an external blockchain node, its smart-contract execution
//! engine, and the command-line wallet client as black-box subprocesses:
//! spawning daemons, answering interactive prompts with scripted input,
//! and scraping structured or loosely structured output into typed
//! results. All chain state machines live in the external binaries; this
//! crate is the orchestration and scraping layer test suites build on.

pub mod cli;
pub mod commands;
pub mod common;
pub mod daemon;
pub mod driver;
pub mod remote;
pub mod setup;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use driver::{Client, ParseOutcome, RunType, WalletRecord};
