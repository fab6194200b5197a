use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{
    handle_expense_command, handle_export_command, handle_history_command, ExpenseCommands,
    ExportArgs, HistoryArgs,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::storage::{LoadOutcome, Storage};

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track personal expenses from the terminal",
    long_about = "Record expenses with a title, amount, date and category, list and \
                  edit them, and see where the money goes with a per-category summary."
)]
struct Cli {
    /// Log verbosity (overridden by RUST_LOG)
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Export expenses as CSV, JSON or YAML
    Export(ExportArgs),

    /// Show the history of added, edited and removed expenses
    History(HistoryArgs),

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    if let LoadOutcome::Recovered { reason } = storage.load_all()? {
        eprintln!("Warning: stored expenses could not be read ({reason}).");
        eprintln!("Starting with an empty list; the unreadable data was kept as a backup.");
    }

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, args)?;
        }
        Some(Commands::History(args)) => {
            handle_history_command(&storage, &settings, args)?;
        }
        Some(Commands::Init) => {
            println!("Initializing expense tracker at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'expenses add <TITLE> <AMOUNT>' to record your first expense.");
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("History log:      {}", paths.history_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Default category: {}", settings.default_category);
        }
        None => {
            println!("Expense Tracker - personal expenses from the terminal");
            println!();
            println!("Run 'expenses --help' for usage information.");
        }
    }

    Ok(())
}

fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        // Without RUST_LOG only this crate's events are shown
        None => EnvFilter::new(format!(
            "expense_tracker={},{}={}",
            level,
            env!("CARGO_CRATE_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
