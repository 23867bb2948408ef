use anyhow::Result;
use chrono::Utc;
use frascraper::{causes, export, fetch::pages, process};
use reqwest::Client;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Socrata endpoint for the rail equipment accident/incident dataset.
const ENDPOINT: &str = "https://data.transportation.gov/resource/85tf-25kj.json";

/// Where the filtered dataset lands; overwritten on every run.
const OUT_PATH: &str = "rail_accidents.csv";

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,frascraper=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) fetch every page ─────────────────────────────────────────
    let client = Client::new();
    let outcome = pages::fetch_all(
        &client,
        ENDPOINT,
        pages::DEFAULT_PAGE_SIZE,
        pages::DEFAULT_START_OFFSET,
    )
    .await?;

    let records = match outcome {
        pages::FetchOutcome::Complete(records) => records,
        pages::FetchOutcome::Partial { records, cause } => {
            // partial data is never exported; a failed run restarts
            // from offset zero
            error!(fetched = records.len(), %cause, "fetch incomplete");
            return Err(cause.into());
        }
    };
    info!("{} records fetched", records.len());

    // ─── 3) filter: exclusion, projection, recency ───────────────────
    let today = Utc::now().date_naive();
    let table = process::filter_records(&records, &causes::EXCLUDED_CODE_SET, today)?;
    if let Some(span) = table.span {
        info!(earliest = %span.earliest, latest = %span.latest, "report date range");
    }

    // ─── 4) export ───────────────────────────────────────────────────
    export::write_csv(&table, OUT_PATH)?;

    info!("all done");
    Ok(())
}
