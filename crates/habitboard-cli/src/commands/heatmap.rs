use chrono::NaiveDate;
use clap::Args;
use habitboard_core::{UserId, WeekStart};

use super::{open_board, parse_user, CommandResult};

#[derive(Args)]
pub struct HeatmapArgs {
    #[arg(value_parser = parse_user)]
    user: UserId,
    /// Habit id
    habit_id: String,
    /// Start weeks on Monday instead of the configured day
    #[arg(long)]
    monday: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: HeatmapArgs, today: NaiveDate) -> CommandResult {
    let (board, config) = open_board()?;
    let week_start = if args.monday {
        WeekStart::Monday
    } else {
        config.week_start
    };

    let heatmap = board.heatmap(&args.user, &args.habit_id, today, week_start)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&heatmap)?);
    } else {
        let title = format!("{} / {} / {}", args.user, args.habit_id, heatmap.month);
        print!("{}", heatmap.render_ascii(&title));
    }
    Ok(())
}
