use chrono::NaiveDate;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::currency::SUPPORTED_CURRENCIES;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("rates", "List cached exchange rates", "rates", cmd_rates),
        CommandDefinition::new(
            "rate",
            "Cache a rate to the home currency",
            "rate <code> <rate> [YYYY-MM-DD]",
            cmd_rate,
        ),
    ]
}

fn cmd_rates(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let config = context.app.config();
    output::section(format!(
        "Exchange rates to {} ({:?})",
        config.home_currency, config.conversion_mode
    ));
    let mut rates = context.app.fx_rates();
    if rates.is_empty() {
        output::info("  No rates cached.");
        return Ok(());
    }
    rates.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.code.0.cmp(&b.code.0)));
    for rate in rates {
        output::info(format!(
            "  {}  {:<4} {:>12.6}",
            rate.date, rate.code, rate.rate_to_home
        ));
    }
    Ok(())
}

fn cmd_rate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (code, raw_rate, raw_date) = match args {
        [code, rate] => (*code, *rate, None),
        [code, rate, date] => (*code, *rate, Some(*date)),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: rate <code> <rate> [YYYY-MM-DD]".into(),
            ))
        }
    };
    let rate: f64 = raw_rate
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not a number", raw_rate)))?;
    let date = raw_date
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                CommandError::InvalidArguments(format!("`{}` is not a YYYY-MM-DD date", raw))
            })
        })
        .transpose()?;

    let stored = context.app.upsert_rate(code, rate, date)?;
    if !SUPPORTED_CURRENCIES.contains(&stored.code.as_str()) {
        output::warning(format!(
            "{} is not one of the supported entry currencies ({}).",
            stored.code,
            SUPPORTED_CURRENCIES.join(", ")
        ));
    }
    output::success(format!(
        "Cached 1 {} = {} {} on {}.",
        stored.code,
        stored.rate_to_home,
        context.app.config().home_currency,
        stored.date
    ));
    Ok(())
}
