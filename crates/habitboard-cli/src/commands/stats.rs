use chrono::NaiveDate;
use clap::Args;
use habitboard_core::{UserId, YearMonth};

use super::{open_board, parse_user, CommandResult};

#[derive(Args)]
pub struct StatsArgs {
    #[arg(value_parser = parse_user)]
    user: UserId,
    /// Month to report (YYYY-MM); defaults to the current month
    #[arg(long, value_parser = parse_month)]
    month: Option<YearMonth>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn parse_month(value: &str) -> Result<YearMonth, String> {
    value.parse().map_err(|e: habitboard_core::CoreError| e.to_string())
}

pub fn run(args: StatsArgs, today: NaiveDate) -> CommandResult {
    let (board, _) = open_board()?;
    let reference = match args.month {
        Some(month) if month != YearMonth::of(today) => month.first_day(),
        _ => today,
    };
    let report = board.report(&args.user, today, reference)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} - {}: {}% overall",
        report.user, report.month_label, report.overall
    );
    for line in &report.habits {
        println!(
            "  {:<24} streak {:>3}  {:>2}/{:<2} days  {:>3}%",
            line.habit.name,
            line.streak,
            line.monthly.checked_days,
            line.monthly.total_days,
            line.monthly.percentage
        );
    }
    Ok(())
}
