use chrono::NaiveDate;
use clap::Args;
use habitboard_core::UserId;
use serde_json::json;

use super::{open_board, parse_user, CommandResult};

#[derive(Args)]
pub struct CheckinArgs {
    #[arg(value_parser = parse_user)]
    user: UserId,
    /// Habit id
    habit_id: String,
}

#[derive(Args)]
pub struct TodayArgs {
    #[arg(value_parser = parse_user)]
    user: UserId,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CheckinArgs, today: NaiveDate) -> CommandResult {
    let (board, _) = open_board()?;
    let check_in = board.check_in(&args.user, &args.habit_id, today)?;
    println!("{}", serde_json::to_string_pretty(&check_in)?);
    Ok(())
}

pub fn run_today(args: TodayArgs, today: NaiveDate) -> CommandResult {
    let (board, _) = open_board()?;
    let rows = board.today(&args.user, today)?;

    if args.json {
        let rows: Vec<_> = rows
            .iter()
            .map(|(habit, status)| {
                json!({
                    "id": habit.id,
                    "name": habit.name,
                    "type": habit.habit_type,
                    "status": status,
                    "label": status.label(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{} on {today}", args.user);
    for (habit, status) in &rows {
        println!(
            "  {:<24} {:<12} {}",
            habit.name,
            status.label(),
            habit.habit_type.hint()
        );
    }
    Ok(())
}
