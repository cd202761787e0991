use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use kahoot_board::config::{Config, StoreKind};
use kahoot_board::display::output::{
    display_alert_preview, display_error, display_info, display_leaderboard, display_menu,
    display_snapshot, display_success,
};
use kahoot_board::error::AppError;
use kahoot_board::notify::{AlertSchedule, WebhookNotifier};
use kahoot_board::render::{ranked_rows, Summary};
use kahoot_board::runner::{Runner, ScheduledOutcome};
use kahoot_board::sheets::{Access, CsvStore, SheetStore, SheetTarget, SheetsClient};
use kahoot_board::snapshot::RunSnapshot;
use kahoot_board::table::Layout;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_INTERVAL_SECS: u64 = 300;

#[derive(Parser, Debug)]
#[command(name = "kahoot-board")]
#[command(about = "Publish the Kahoot games leaderboard and send the bi-weekly alert", long_about = None)]
struct Cli {
    /// Input table shape (overrides LEADERBOARD_LAYOUT)
    #[arg(long, value_enum)]
    layout: Option<Layout>,

    /// Spreadsheet backend (overrides LEADERBOARD_STORE)
    #[arg(long, value_enum)]
    store: Option<StoreKind>,

    /// Directory for csv worksheets and the run snapshot (overrides LEADERBOARD_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Show at most this many players (overrides LEADERBOARD_MAX_ROWS)
    #[arg(long)]
    max_rows: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Rebuild the dashboard once
    Refresh,
    /// Rebuild the dashboard on a fixed interval
    Watch {
        /// Seconds between refreshes (at least 1)
        #[arg(short, long, default_value_t = DEFAULT_INTERVAL_SECS, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,

        /// Stop after this many refreshes
        #[arg(long)]
        cycles: Option<usize>,
    },
    /// Refresh and send the chat alert if one is due
    Scheduled {
        /// Print the alert instead of posting it
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the leaderboard without writing or creating any worksheet
    Preview,
    /// Interactive menu
    Menu,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(layout) = cli.layout {
        config.layout = layout;
    }
    if let Some(store) = cli.store {
        config.store = store;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if cli.max_rows.is_some() {
        config.max_rows = cli.max_rows;
    }

    let command = cli.command.unwrap_or(if config.scheduled_run {
        Command::Scheduled { dry_run: false }
    } else {
        Command::Menu
    });

    let access = match command {
        Command::Preview => Access::ReadOnly,
        _ => Access::ReadWrite,
    };
    let mut store = open_store(&config, access).context("Failed to connect to spreadsheet store")?;
    let mut runner = Runner::new(store.as_mut(), &config);

    match command {
        Command::Refresh => {
            refresh_once(&mut runner)?;
        }
        Command::Watch { interval, cycles } => {
            runner.watch(Duration::from_secs(interval), cycles);
        }
        Command::Scheduled { dry_run } => scheduled(&mut runner, &config, dry_run)?,
        Command::Preview => {
            let (table, board) = runner.load();
            display_leaderboard(
                &ranked_rows(&board, config.row_limit()),
                &Summary::new(&board, table.total_games()),
            );
        }
        Command::Menu => menu(&mut runner, &config)?,
    }

    Ok(())
}

fn open_store(config: &Config, access: Access) -> Result<Box<dyn SheetStore>, AppError> {
    match config.store {
        StoreKind::Sheets => {
            let (sheet_id, token) = config.sheets_credentials()?;
            let target = SheetTarget {
                spreadsheet_id: sheet_id.to_string(),
                access_token: token.to_string(),
                data_sheet: config.data_sheet.clone(),
                viz_sheet: config.viz_sheet.clone(),
            };
            let client = match access {
                Access::ReadWrite => SheetsClient::connect(target)?,
                Access::ReadOnly => SheetsClient::connect_read_only(target)?,
            };
            Ok(Box::new(client))
        }
        StoreKind::Csv => Ok(Box::new(CsvStore::open(
            &config.data_dir,
            &config.data_sheet,
            &config.viz_sheet,
        )?)),
    }
}

/// One refresh; `true` when something was published.
fn refresh_once(runner: &mut Runner) -> anyhow::Result<bool> {
    match runner.refresh(Utc::now()).context("Failed to refresh dashboard")? {
        Some(done) => {
            display_success(&format!(
                "Published {} players across {} games ({} formats applied, {} failed)",
                done.leaderboard.len(),
                done.table.total_games(),
                done.report.formats_applied,
                done.report.formats_failed
            ));
            Ok(true)
        }
        None => {
            display_info("Nothing to publish: the table has no scores");
            Ok(false)
        }
    }
}

fn scheduled(runner: &mut Runner, config: &Config, dry_run: bool) -> anyhow::Result<()> {
    let notifier = WebhookNotifier::new(config.webhook_url.clone());
    let outcome = runner
        .run_scheduled(&notifier, &AlertSchedule::biweekly(), Utc::now(), dry_run)
        .context("Error in scheduled tasks")?;

    match outcome {
        ScheduledOutcome::Skipped => display_info("Not an alert slot, nothing to do"),
        ScheduledOutcome::NoData => display_info("Alert due but no data to report"),
        ScheduledOutcome::Alerted(delivery) => display_info(&format!("Alert delivery: {:?}", delivery)),
        ScheduledOutcome::DryRun(message) => display_alert_preview(&message),
    }
    Ok(())
}

fn prompt(question: &str) -> io::Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn menu(runner: &mut Runner, config: &Config) -> anyhow::Result<()> {
    display_snapshot(RunSnapshot::load(&config.data_dir).ok().flatten().as_ref());
    let published = refresh_once(runner)?;
    display_menu(published);

    let choice = prompt("\nEnter your choice (1-4): ")?;
    match choice.as_str() {
        "2" => runner.watch(Duration::from_secs(DEFAULT_INTERVAL_SECS), None),
        "3" => match prompt("Enter refresh interval in seconds: ")?.parse::<u64>() {
            Ok(secs) if secs > 0 => runner.watch(Duration::from_secs(secs), None),
            _ => println!("Invalid interval. Using one-time refresh."),
        },
        "4" => scheduled(runner, config, true)?,
        _ => println!("One-time refresh completed. Run again to refresh manually."),
    }
    Ok(())
}
