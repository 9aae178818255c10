use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::audit::AuditLogger;
use expense_tracker::config::{Settings, StoreFormat, SummaryScope, TrackerPaths};
use expense_tracker::display::DisplayOptions;
use expense_tracker::session::{Prompter, Session};
use expense_tracker::storage::open_store;

/// Environment variable holding the log filter
const LOG_ENV: &str = "EXPENSE_TRACKER_LOG";

#[derive(Parser)]
#[command(
    name = "expense-tracker",
    version,
    about = "Log expenses against a monthly budget from the terminal",
    long_about = "Expense Tracker records named, categorised expenses, keeps them in a \
                  local store, and after every entry shows what is left of the monthly \
                  budget and how much can be spent per remaining day."
)]
struct Cli {
    /// Directory holding the expense store, settings and audit log
    #[arg(long, env = "EXPENSE_TRACKER_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Store format for this run
    #[arg(long, value_enum, env = "EXPENSE_TRACKER_FORMAT", global = true)]
    format: Option<StoreFormat>,

    /// Which records count towards the summary
    #[arg(long, value_enum, env = "EXPENSE_TRACKER_SCOPE")]
    scope: Option<SummaryScope>,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Do not draw the category chart
    #[arg(long)]
    no_chart: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration and paths
    Config,

    /// Show the most recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let paths = match &cli.data_dir {
        Some(dir) => TrackerPaths::with_base_dir(dir.clone()),
        None => TrackerPaths::new()?,
    };

    let mut settings = Settings::load_or_create(&paths)?;
    if !paths.settings_file().exists() {
        settings.save(&paths)?;
    }

    // Flags override the saved settings for this run only
    if let Some(format) = cli.format {
        settings.store_format = format;
    }
    if let Some(scope) = cli.scope {
        settings.summary_scope = scope;
    }
    if cli.no_color {
        settings.color_output = false;
    }
    if cli.no_chart {
        settings.show_chart = false;
    }

    match cli.command {
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Store format:  {:?}", settings.store_format);
            println!("  Summary scope: {:?}", settings.summary_scope);
            println!("  Currency:      {}", settings.currency_symbol);
            println!("  Color output:  {}", settings.color_output);
            println!("  Show chart:    {}", settings.show_chart);
        }
        Some(Commands::History { count }) => {
            let logger = AuditLogger::new(paths.audit_log());
            let entries = logger.read_recent(count)?;
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            let store = open_store(&paths, settings.store_format)?;
            let session = Session::new(store.as_ref(), DisplayOptions::from_settings(&settings))
                .with_scope(settings.summary_scope)
                .with_timestamp_format(settings.timestamp_format.clone())
                .with_audit(AuditLogger::new(paths.audit_log()));

            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            let logged = session.run(&mut prompter)?;
            tracing::debug!(logged, "session finished");
        }
    }

    Ok(())
}
