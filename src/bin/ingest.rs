use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use newsfeel::{
    config::Config,
    ingest::{IngestRequest, IngestService},
    repositories::ArticleRepository,
    telemetry,
};
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Run one ingestion from the command line and print a JSON summary.
#[derive(Debug, Parser)]
#[command(name = "ingest")]
#[command(about = "Search Google News per day, enrich and store the articles")]
struct Cli {
    #[arg(long)]
    query: String,
    /// First day searched (YYYY-MM-DD).
    #[arg(long)]
    start_date: NaiveDate,
    /// Exclusive end day; defaults to today (UTC).
    #[arg(long)]
    end_date: Option<NaiveDate>,
    #[arg(long, default_value_t = 20)]
    limit_per_day: u32,
    #[arg(long, env = "INGEST_REQUESTED_BY")]
    requested_by: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(config.database_url())
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let service = IngestService::from_config(&config, Arc::new(ArticleRepository::new(pool)))?;
    let request = IngestRequest {
        query: cli.query,
        limit_per_day: cli.limit_per_day,
        start_date: cli.start_date,
        end_date: cli.end_date.unwrap_or_else(|| Utc::now().date_naive()),
        requested_by: cli.requested_by,
    };

    let cancel = CancellationToken::new();
    let timeout = Duration::from_secs(config.ingest_timeout_secs());
    let watchdog = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(timeout) => warn!("time limit reached, cancelling"),
                _ = tokio::signal::ctrl_c() => warn!("interrupted, cancelling"),
            }
            cancel.cancel();
        })
    };

    let report = service.ingest(&request, &cancel).await;
    watchdog.abort();

    let summary = serde_json::json!({
        "stored": report.stored.len(),
        "ids": report.stored.iter().map(|r| r.id).collect::<Vec<_>>(),
        "failures": report.failures,
        "unavailable_days": report.unavailable_days,
        "days_processed": report.days_processed,
        "cancelled": report.cancelled,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
