use anyhow::Result;
use gpscrape::{config::Config, fetch, pipeline, store};
use std::{env, path::PathBuf};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) load config ──────────────────────────────────────────────
    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var("GPSCRAPE_CONFIG").ok())
        .map(PathBuf::from);
    let cfg = Config::load(config_path.as_deref())?;
    info!(
        first = cfg.first_year,
        last = cfg.last_year,
        seed = cfg.race_number_seed,
        output = %cfg.output.path.display(),
        "config loaded"
    );

    // ─── 3) collaborators ────────────────────────────────────────────
    let client = fetch::build_client(&cfg.user_agent, cfg.request_timeout())?;
    let mut sink = store::open_sink(&cfg.output)?;

    // ─── 4) scrape ───────────────────────────────────────────────────
    match pipeline::run(&cfg, &client, sink.as_mut()).await {
        Ok(summary) => {
            info!(
                seasons = summary.seasons,
                races = summary.races,
                skipped = summary.races_skipped,
                "all done"
            );
            Ok(())
        }
        Err(e) => {
            error!("run failed: {:#}", e);
            Err(e)
        }
    }
}
