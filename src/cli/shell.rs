use std::io::{self, BufRead, IsTerminal, Write};

use shell_words::split;

use crate::cli::core::{CliError, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::context::AppContext;
use crate::utils::paths;

const PROMPT: &str = "kbudget> ";

/// Runs the line-oriented shell over stdin against the data dir from the environment.
pub fn run_cli() -> Result<(), CliError> {
    let base = paths::app_data_dir();
    tracing::debug!(path = %base.display(), "opening data dir");
    let app = AppContext::init(base)?;
    let mut context = ShellContext::new(app);

    let interactive = io::stdin().is_terminal();
    if interactive {
        output::info("kbudget shell. Type `help` for commands.");
    }
    run_lines(&mut context, io::stdin().lock(), interactive)?;
    context.shutdown()
}

fn run_lines(
    context: &mut ShellContext,
    input: impl BufRead,
    interactive: bool,
) -> Result<(), CliError> {
    let mut lines = input.lines();
    while context.running {
        if interactive {
            print!("{}", PROMPT);
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return Ok(LoopControl::Continue);
        }
    };

    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

pub(crate) fn parse_command_line(line: &str) -> Result<Vec<String>, String> {
    split(line).map_err(|err| format!("Could not parse input: {}", err))
}
