use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::currency::format_amount;
use crate::domain::CategoryRole;

use super::CommandDefinition;

const BAR_WIDTH: usize = 20;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "summary",
            "Show this month's remaining budget and trip progress",
            "summary",
            cmd_summary,
        ),
        CommandDefinition::new(
            "categories",
            "List categories with their monthly limits",
            "categories",
            cmd_categories,
        ),
        CommandDefinition::new("goal", "Show the trip savings goal", "goal", cmd_goal),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let home = &context.app.config().home_currency;
    let summary = context.app.dashboard();

    output::section(format!("Summary as of {}", summary.as_of.format("%d %b %Y")));
    output::info(format!("  Left this month : {}", format_amount(summary.month_remaining, home)));
    output::info(format!("  Left today      : {}", format_amount(summary.today_remaining, home)));
    output::info(format!("  Left this week  : {}", format_amount(summary.week_remaining, home)));
    output::info(format!(
        "  Projected spend : {} more by month end",
        format_amount(summary.projected_month_end, home)
    ));

    if let Some(trip) = summary.trip {
        let status = if trip.on_track { "on track" } else { "behind" };
        output::info(format!(
            "  Trip fund       : {} of {} ({:.0}%, {})",
            format_amount(trip.total_saved, home),
            format_amount(trip.target, home),
            trip.percent_saved() * 100.0,
            status
        ));
    }

    output::section("Categories");
    for row in &summary.categories {
        output::info(format!(
            "  {:<12} {} {} left of {}",
            row.name,
            output::progress_bar(row.progress(), BAR_WIDTH),
            format_amount(row.remaining, home),
            format_amount(row.total, home)
        ));
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let home = &context.app.config().home_currency;
    let categories = context.app.categories();
    if categories.is_empty() {
        output::warning("No categories defined.");
        return Ok(());
    }
    output::section("Categories");
    for category in categories {
        let mut notes = Vec::new();
        if category.role == CategoryRole::SavingsTarget {
            notes.push("savings");
        }
        if category.carry_over {
            notes.push("carry-over");
        }
        let suffix = if notes.is_empty() {
            String::new()
        } else {
            format!(" ({})", notes.join(", "))
        };
        output::info(format!(
            "  {:<12} {:>12}{}",
            category.name,
            format_amount(category.monthly_limit, home),
            suffix
        ));
    }
    Ok(())
}

fn cmd_goal(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let home = &context.app.config().home_currency;
    let goal = context
        .app
        .trip_goal()
        .ok_or_else(|| CommandError::InvalidArguments("No trip goal configured.".into()))?;
    let summary = context.app.dashboard();
    let weeks_left = context
        .app
        .calendar()
        .whole_weeks_between(summary.as_of, goal.deadline)
        .max(0);

    output::section("Trip goal");
    output::info(format!("  Target       : {}", format_amount(goal.target, home)));
    output::info(format!("  Deadline     : {}", goal.deadline.format("%d %b %Y")));
    output::info(format!("  Weeks left   : {}", weeks_left));
    output::info(format!(
        "  Weekly save  : {}",
        format_amount(goal.auto_save_weekly, home)
    ));
    if let Some(trip) = summary.trip {
        output::info(format!("  Saved        : {}", format_amount(trip.total_saved, home)));
        output::info(format!("  Still needed : {}", format_amount(trip.shortfall(), home)));
        let status = if trip.on_track { "on track" } else { "behind" };
        output::info(format!("  Status       : {}", status));
    }
    Ok(())
}
