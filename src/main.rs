use analytics::{HappinessEngine, HappinessReport, MomentumBlock};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use database::{connect, run_migrations, DbRepository};
use indicatif::{ProgressBar, ProgressStyle};
use std::net::SocketAddr;

mod seed;

/// The main entry point for the Lifeindex application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments before any config is read.
    let cli = Cli::parse();

    // Load environment variables from .env file when present.
    dotenvy::dotenv().ok();

    let config = configuration::load_config()?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, config).await,
        Commands::Record(args) => handle_record(args, &config).await,
        Commands::Report(args) => handle_report(args, &config).await,
        Commands::Seed(args) => handle_seed(args, &config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Track one happiness index per day and see how it moves.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Record a happiness index.
    Record(RecordArgs),
    /// Compute and print the dashboard statistics.
    Report(ReportArgs),
    /// Replace the database contents with deterministic sample data.
    Seed(SeedArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides the configured bind address (e.g., "127.0.0.1:8080").
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[derive(Parser)]
struct RecordArgs {
    /// The index to record, from -10 to 10.
    #[arg(long, allow_hyphen_values = true)]
    value: i32,

    /// The day the value belongs to (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Parser)]
struct ReportArgs {
    /// Compute as of this date instead of today (format: YYYY-MM-DD).
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Print the raw JSON report instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct SeedArgs {
    /// How many days of the current year to fill, starting Jan 1.
    #[arg(long, default_value_t = 60)]
    current_days: u32,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn build_engine(config: &Config) -> anyhow::Result<HappinessEngine> {
    Ok(
        HappinessEngine::new(config.aggregation.policy, config.reporting_zone()?)
            .with_smoothing(config.aggregation.smooth_series),
    )
}

async fn open_repository() -> anyhow::Result<DbRepository> {
    let db_pool = connect().await?;
    run_migrations(&db_pool).await?;
    Ok(DbRepository::new(db_pool))
}

async fn handle_serve(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(addr) = args.addr {
        config.server.host = addr.ip().to_string();
        config.server.port = addr.port();
    }
    web_server::run_server(&config).await
}

async fn handle_record(args: RecordArgs, config: &Config) -> anyhow::Result<()> {
    let engine = build_engine(config)?;
    let date = args.date.unwrap_or_else(|| engine.today(Utc::now()));

    let db_repo = open_repository().await?;
    let id = db_repo.save_observation(date, args.value).await?;
    println!("Day recorded: {} -> {} (id {})", date, args.value, id);
    Ok(())
}

async fn handle_report(args: ReportArgs, config: &Config) -> anyhow::Result<()> {
    let engine = build_engine(config)?;
    let today = args.today.unwrap_or_else(|| engine.today(Utc::now()));

    let db_repo = open_repository().await?;
    let ranges = engine.required_ranges(today)?;
    let observations = db_repo.fetch_observations(&ranges).await?;
    let report = engine.compute_for(&observations, today)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

async fn handle_seed(args: SeedArgs, config: &Config) -> anyhow::Result<()> {
    let year = build_engine(config)?.today(Utc::now()).year();
    let db_repo = open_repository().await?;
    let ranges = seed::seed_ranges(year, args.current_days)?;

    let progress_bar = ProgressBar::new(ranges.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    for range in ranges {
        progress_bar.set_message(format!("Seeding {} .. {}", range.start, range.end));
        let observations = seed::sample_observations(range);
        let deleted = db_repo.replace_range(range, &observations).await?;
        tracing::info!(
            start = %range.start,
            end = %range.end,
            deleted,
            inserted = observations.len(),
            "Seeded range."
        );
        progress_bar.inc(1);
    }

    progress_bar.finish_with_message("Seeding complete!");
    Ok(())
}

// ==============================================================================
// Output
// ==============================================================================

/// Renders a missing value with the dashboard's placeholder glyph.
fn show(value: Option<i32>) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{:+}", v))
}

fn print_report(report: &HappinessReport) {
    println!(
        "{} (day {} of {}): {:?}",
        report.current.today, report.current.day_of_year, report.current.days_in_year, report.headline
    );

    let mut periods = Table::new();
    periods.set_header(vec!["Period", "Now", "Key", "Last year", "Key"]);
    periods.add_row(vec![
        "Day".to_string(),
        show(report.stats.today.value),
        report.current.today.to_string(),
        show(report.last_year_value.day),
        report.last_year_current.date_key.to_string(),
    ]);
    periods.add_row(vec![
        "Week".to_string(),
        show(report.current_value.week),
        report.current.week_key.clone(),
        show(report.last_year_value.week),
        report.last_year_current.week_key.clone(),
    ]);
    periods.add_row(vec![
        "Month".to_string(),
        show(report.current_value.month),
        report.current.month_key.clone(),
        show(report.last_year_value.month),
        report.last_year_current.month_key.clone(),
    ]);
    periods.add_row(vec![
        "Year".to_string(),
        show(report.current_value.year),
        report.current.year_key.clone(),
        String::new(),
        String::new(),
    ]);
    println!("{periods}");

    let mut momentum = Table::new();
    momentum.set_header(vec!["Window", "Average", "Previous", "Delta", "Trend"]);
    for (name, block) in [("7 days", &report.stats.week), ("30 days", &report.stats.month)] {
        momentum.add_row(momentum_row(name, block));
    }
    println!("{momentum}");

    let stats = &report.stats;
    println!(
        "Yesterday {} -> Today {} ({:+})",
        show(stats.today.yesterday),
        show(stats.today.value),
        stats.today.delta
    );
    println!(
        "Best day: {} ({:+})   Worst day: {} ({:+})",
        stats.best_day.label, stats.best_day.value, stats.worst_day.label, stats.worst_day.value
    );
}

fn momentum_row(name: &str, block: &MomentumBlock) -> Vec<String> {
    vec![
        name.to_string(),
        format!("{:+}", block.avg),
        format!("{:+}", block.prev),
        format!("{:+}", block.delta),
        format!("{:?}", block.trend),
    ]
}
