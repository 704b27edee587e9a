use std::collections::HashMap;

pub mod budget;
pub mod expense;
pub mod rates;
pub mod system;

use crate::cli::core::{CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(budget::definitions());
    commands.extend(expense::definitions());
    commands.extend(rates::definitions());
    commands.extend(system::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Command lookup preserving registration order for help output.
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

/// Splits `args` into positionals and the values of `--flag value` pairs.
pub(crate) fn split_flags<'a>(
    args: &[&'a str],
    known: &[&str],
) -> Result<(Vec<&'a str>, HashMap<String, &'a str>), String> {
    let mut positionals = Vec::new();
    let mut flags = HashMap::new();
    let mut iter = args.iter().copied();
    while let Some(arg) = iter.next() {
        match arg.strip_prefix("--") {
            Some(flag) if known.contains(&flag) => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("`--{}` expects a value", flag))?;
                flags.insert(flag.to_string(), value);
            }
            Some(flag) => return Err(format!("unknown option `--{}`", flag)),
            None => positionals.push(arg),
        }
    }
    Ok((positionals, flags))
}
