use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use habitboard_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "habitboard", version, about = "Shared habit board")]
struct Cli {
    /// Act as if today were this day (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = commands::parse_date)]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit list management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Check in a habit for today
    Checkin(commands::checkin::CheckinArgs),
    /// Today's status of every habit
    Today(commands::checkin::TodayArgs),
    /// Streaks and monthly consistency
    Stats(commands::stats::StatsArgs),
    /// Month calendar of one habit
    Heatmap(commands::heatmap::HeatmapArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging() {
    let fallback = Config::load_or_default().log_level;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let today = cli.date.unwrap_or_else(habitboard_core::today_local);
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Checkin(args) => commands::checkin::run(args, today),
        Commands::Today(args) => commands::checkin::run_today(args, today),
        Commands::Stats(args) => commands::stats::run(args, today),
        Commands::Heatmap(args) => commands::heatmap::run(args, today),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
