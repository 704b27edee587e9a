use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::storage::STORE_SCHEMA_VERSION;
use crate::utils::{build_info, paths};

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("config", "Show active configuration", "config", cmd_config),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_config(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let base = context.app.base_dir();
    let config = context.app.config();
    output::section("Configuration");
    output::info(format!("  Data dir       : {}", base.display()));
    output::info(format!("  Config file    : {}", paths::config_file_in(base).display()));
    output::info(format!("  Home currency  : {}", config.home_currency));
    output::info(format!("  Week starts on : {}", config.first_weekday));
    output::info(format!("  Conversion     : {:?}", config.conversion_mode));
    output::info(format!(
        "  Goal default   : {} by {}",
        config.trip_goal.target, config.trip_goal.deadline
    ));
    let export_dir = config
        .export_dir
        .clone()
        .unwrap_or_else(|| paths::export_dir_in(base));
    output::info(format!("  Export dir     : {}", export_dir.display()));
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("kbudget {}", meta.version));
    output::info(format!("  Store schema : v{}", STORE_SCHEMA_VERSION));
    output::info(format!("  Build        : {}", meta.short()));
    output::info(format!("  Built at     : {}", meta.timestamp));
    output::info(format!("  Target       : {}", meta.target));
    output::info(format!("  Profile      : {}", meta.profile));
    output::info(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(command) => help::print_command(command),
            None => context.suggest_command(name),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
