use anyhow::Context;
use clap::Parser;
use tracing_subscriber::prelude::*;

/// Extracts per-round statistics from decoded demo traces into a SQLite database.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory searched recursively for traces.
    #[arg(long, default_value = "../demos")]
    demos: std::path::PathBuf,

    /// File extension of the traces to pick up.
    #[arg(long, default_value = "jsonl")]
    extension: String,

    #[arg(long, env = "DATABASE_URL", default_value = "csgo.db")]
    database_url: String,

    /// Register the match on the first round start, whatever the roster sizes.
    #[arg(long)]
    no_roster_guard: bool,

    /// Store rosters and survivors as display names instead of steam ids.
    #[arg(long)]
    name_keys: bool,

    /// Aggregate without writing to the database.
    #[arg(long)]
    dry_run: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = tracing_subscriber::EnvFilter::try_new(&cli.log_level)
        .with_context(|| format!("invalid log level {:?}", cli.log_level))?;
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(level)
        .with(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target().starts_with("ingest") || meta.target().starts_with("analysis")
        }));
    tracing::subscriber::set_global_default(registry)?;

    tracing::info!("Starting...");

    let options = analysis::AggregatorOptions {
        use_numeric_ids: !cli.name_keys,
        apply_roster_guard: !cli.no_roster_guard,
    };

    let mut target = if cli.dry_run {
        tracing::info!("Dry run, nothing is persisted");
        ingest::Target::DryRun
    } else {
        let mut connection = ingest::db_connection(&cli.database_url)
            .with_context(|| format!("connecting to {}", cli.database_url))?;

        tracing::info!("Applying Migrations");
        ingest::run_migrations(&mut connection)?;
        tracing::info!("Completed Migrations");

        ingest::Target::Database(connection)
    };

    let summary = ingest::run(&cli.demos, &cli.extension, &mut target, options)?;

    tracing::info!(
        processed = summary.processed,
        failed = summary.failed,
        rounds = summary.rounds,
        "Done"
    );

    Ok(())
}
