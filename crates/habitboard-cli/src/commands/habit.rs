use clap::Subcommand;
use habitboard_core::{ColorTheme, HabitType, NewHabit, UserId};

use super::{open_board, parse_user, CommandResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List a user's habits in board order
    List {
        #[arg(value_parser = parse_user)]
        user: UserId,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a habit to the end of a user's list
    Add {
        #[arg(value_parser = parse_user)]
        user: UserId,
        /// Display name
        name: String,
        /// Explicit id (generated from the name if omitted)
        #[arg(long)]
        id: Option<String>,
        /// standard or two-step
        #[arg(long = "type", default_value = "standard", value_parser = parse_type)]
        habit_type: HabitType,
        /// rose, peach, purple or indigo
        #[arg(long, default_value = "rose", value_parser = parse_color)]
        color: ColorTheme,
    },
    /// Remove a habit (its history is kept)
    Remove {
        #[arg(value_parser = parse_user)]
        user: UserId,
        id: String,
    },
    /// Move a habit to a new zero-based position
    Move {
        #[arg(value_parser = parse_user)]
        user: UserId,
        id: String,
        index: usize,
    },
}

fn parse_type(value: &str) -> Result<HabitType, String> {
    value.parse().map_err(|e: habitboard_core::CoreError| e.to_string())
}

fn parse_color(value: &str) -> Result<ColorTheme, String> {
    value.parse().map_err(|e: habitboard_core::CoreError| e.to_string())
}

pub fn run(action: HabitAction) -> CommandResult {
    let (board, _) = open_board()?;

    match action {
        HabitAction::List { user, json } => {
            let habits = board.habits(&user)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&habits)?);
            } else if habits.is_empty() {
                println!("No habits for {user}.");
            } else {
                for (index, habit) in habits.iter().enumerate() {
                    println!(
                        "{index:>2}. {:<24} {:<20} {:<8} {} ({})",
                        habit.id,
                        habit.name,
                        habit.habit_type,
                        habit.color_theme,
                        habit.color_theme.hex()
                    );
                }
            }
        }
        HabitAction::Add {
            user,
            name,
            id,
            habit_type,
            color,
        } => {
            let mut new = NewHabit::named(name)
                .with_type(habit_type)
                .with_color(color);
            if let Some(id) = id {
                new = new.with_id(id);
            }
            let habit = board.add_habit(&user, new)?;
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Remove { user, id } => {
            let habit = board.remove_habit(&user, &id)?;
            println!("Removed {} ({})", habit.name, habit.id);
        }
        HabitAction::Move { user, id, index } => {
            if board.reorder_habit(&user, &id, index)? {
                println!("Moved {id} to position {index}");
            } else {
                println!("{id} is already at position {index}");
            }
        }
    }
    Ok(())
}
