pub mod commands;
pub mod core;
mod help;
pub mod output;
mod shell;

pub use self::core::{CliError, CommandError, ShellContext};
pub use shell::run_cli;
