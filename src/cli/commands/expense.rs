use std::path::Path;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::{ExpenseDraft, ExpenseService};
use crate::currency::{format_amount, CurrencyCode};

use super::{split_flags, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "add",
            "Record an expense",
            "add <category> <amount> [currency] [--merchant <name>] [--note <text>]",
            cmd_add,
        ),
        CommandDefinition::new(
            "history",
            "List expenses grouped by day, optionally filtered",
            "history [query]",
            cmd_history,
        ),
        CommandDefinition::new(
            "export",
            "Write all expenses to a CSV file",
            "export [directory]",
            cmd_export,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positionals, flags) =
        split_flags(args, &["merchant", "note"]).map_err(CommandError::InvalidArguments)?;
    let (category, amount, currency) = match positionals.as_slice() {
        [category, amount] => (*category, *amount, None),
        [category, amount, currency] => (*category, *amount, Some(*currency)),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: add <category> <amount> [currency] [--merchant <name>] [--note <text>]"
                    .into(),
            ))
        }
    };

    let category = context.app.find_category(category)?;
    let amount = ExpenseService::parse_amount(amount)?;
    let currency = currency
        .map(CurrencyCode::new)
        .unwrap_or_else(|| context.app.config().home_currency.clone());

    let mut draft = ExpenseDraft::new(category.id, amount, currency.0);
    if let Some(merchant) = flags.get("merchant") {
        draft = draft.with_merchant(*merchant);
    }
    if let Some(note) = flags.get("note") {
        draft = draft.with_note(*note);
    }

    let transaction = context.app.add_expense(draft)?;
    let home = &context.app.config().home_currency;
    output::success(format!(
        "Added {} to {}.",
        format_amount(transaction.amount_home, home),
        category.name
    ));
    Ok(())
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    let sections = context.app.history(&query);
    if sections.is_empty() {
        output::info("No matching expenses.");
        return Ok(());
    }

    let home = &context.app.config().home_currency;
    let today = context.app.today();
    for section in sections {
        output::section(format!(
            "{} ({})",
            section.title(today),
            format_amount(section.total(), home)
        ));
        for entry in &section.entries {
            let original = if entry.currency == home.as_str() {
                String::new()
            } else {
                format!(" [{} {}]", entry.amount_original, entry.currency)
            };
            output::info(format!(
                "  {:<20} {:<12} {:>12}{}",
                entry.title,
                entry.category,
                format_amount(entry.amount_home, home),
                original
            ));
        }
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let dir = match args {
        [] => None,
        [dir] => Some(Path::new(*dir)),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: export [directory]".into(),
            ))
        }
    };
    let path = context.app.export_csv(dir)?;
    output::success(format!("Exported to {}", path.display()));
    Ok(())
}
