//! Line oriented front end over the ledger core.

pub mod commands;
pub mod context;
pub mod help;
pub mod output;
mod shell;
pub mod table;

pub use context::{CliError, CliMode, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
