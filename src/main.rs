use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{handle_expense_command, ExpenseCommands};
use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track expenses and review the recent ones",
    long_about = "Record what you spend, edit or delete entries, and see the \
                  total of the last few days at a glance."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            let settings = Settings::load_or_create(&paths)?;
            let storage = Storage::new(paths)?;
            handle_expense_command(&storage, &settings, cmd, Utc::now()).map_err(|e| {
                error!(error = %e, "command failed");
                anyhow::anyhow!(e.user_message())
            })?;
        }
        Some(Commands::Init) => {
            let settings = Settings::load_or_create(&paths).unwrap_or_else(|e| {
                warn!(error = %e, "replacing unusable settings with defaults");
                Settings::default()
            });
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialized expense tracker at: {}", paths.base_dir().display());
        }
        Some(Commands::Config) => {
            let settings = Settings::load_or_create(&paths)?;
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Expense store:   {}", paths.expenses_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Recent window:   {} days", settings.recent_window_days);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
        }
        None => {
            let settings = Settings::load_or_create(&paths).unwrap_or_default();
            println!("Expense Tracker");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!(
                "Run 'expenses recent' to see the last {} days.",
                settings.recent_window_days
            );
        }
    }

    Ok(())
}
