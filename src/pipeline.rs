// src/pipeline.rs

use crate::config::Config;
use crate::extract::extract_table_from_html;
use crate::fetch::{race_result_url, race_slug, season_url, PageSource};
use crate::normalize::{
    normalize, season_records, RaceRecord, Row, SeasonRecord, RACE_SCHEMA, SEASON_SCHEMA,
};
use crate::store::{race_table_name, season_table_name, TableSink};
use anyhow::{Context, Result};
use tracing::{debug, error, info, instrument};

/// Archive id of the next race. Advances once per race attempted, across seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceCounter {
    next: u32,
}

impl RaceCounter {
    pub fn new(seed: u32) -> Self {
        Self { next: seed }
    }

    pub fn current(&self) -> u32 {
        self.next
    }

    /// Hand out the current number and move to the next one.
    pub fn advance(&mut self) -> u32 {
        let n = self.next;
        self.next += 1;
        n
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonPage {
    pub rows: Vec<Row>,
    pub records: Vec<SeasonRecord>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub seasons: usize,
    pub races: usize,
    pub races_skipped: usize,
    pub rows: usize,
}

/// Season index page → normalized rows plus the typed rounds used to walk the races.
pub fn parse_season_page(html: &str, table_class: &str) -> Result<SeasonPage> {
    let table = extract_table_from_html(html, table_class)?;
    let rows = normalize(&table, &SEASON_SCHEMA)?;
    let records = season_records(&rows)?;
    debug!(rounds = records.len(), first = ?records.first(), "season table");
    Ok(SeasonPage { rows, records })
}

/// Race result page → normalized rows.
pub fn parse_race_page(html: &str, table_class: &str) -> Result<Vec<Row>> {
    let table = extract_table_from_html(html, table_class)?;
    let rows = normalize(&table, &RACE_SCHEMA)?;
    if let Some(first) = rows.first() {
        let first = RaceRecord::try_from(first)?;
        debug!(entrants = rows.len(), first = ?first, "race table");
    }
    Ok(rows)
}

/// Scrape every season in `cfg.years()` and hand each table to `sink`.
///
/// Season pages must succeed. Race page failures abort the run unless
/// `skip_failed_pages` is set, in which case they are logged and counted.
#[instrument(level = "info", skip_all, fields(first = cfg.first_year, last = cfg.last_year))]
pub async fn run<S: PageSource>(
    cfg: &Config,
    source: &S,
    sink: &mut dyn TableSink,
) -> Result<RunSummary> {
    let mut counter = RaceCounter::new(cfg.race_number_seed);
    let mut summary = RunSummary::default();

    for year in cfg.years() {
        scrape_season(cfg, source, sink, year, &mut counter, &mut summary).await?;
    }

    info!(
        seasons = summary.seasons,
        races = summary.races,
        skipped = summary.races_skipped,
        rows = summary.rows,
        next_race_number = counter.current(),
        "run complete"
    );
    Ok(summary)
}

#[instrument(level = "info", skip(cfg, source, sink, counter, summary))]
async fn scrape_season<S: PageSource>(
    cfg: &Config,
    source: &S,
    sink: &mut dyn TableSink,
    year: i32,
    counter: &mut RaceCounter,
    summary: &mut RunSummary,
) -> Result<()> {
    let url = season_url(&cfg.base_url, year)?;
    info!(%url, "fetching season index");
    let html = source.fetch_page(&url).await?;
    let page = parse_season_page(&html, &cfg.table_class)
        .with_context(|| format!("season {} ({})", year, url))?;

    let table = season_table_name(year);
    sink.replace_table(&table, &SEASON_SCHEMA, &page.rows)
        .with_context(|| format!("writing {}", table))?;
    info!(table = %table, rounds = page.records.len(), "season written");
    summary.seasons += 1;
    summary.rows += page.rows.len();

    for round in &page.records {
        let number = counter.advance();
        let slug = race_slug(&round.grand_prix);
        match scrape_race(cfg, source, sink, year, number, &slug).await {
            Ok(n) => {
                summary.races += 1;
                summary.rows += n;
            }
            Err(e) if cfg.skip_failed_pages => {
                error!(race = number, slug = %slug, "skipping race page: {:#}", e);
                summary.races_skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

async fn scrape_race<S: PageSource>(
    cfg: &Config,
    source: &S,
    sink: &mut dyn TableSink,
    year: i32,
    number: u32,
    slug: &str,
) -> Result<usize> {
    let url = race_result_url(&cfg.base_url, year, number, slug)?;
    info!(%url, "fetching race result");
    let html = source.fetch_page(&url).await?;
    let rows = parse_race_page(&html, &cfg.table_class)
        .with_context(|| format!("race {} ({})", number, url))?;

    let table = race_table_name(year, number, slug);
    let written = sink
        .replace_table(&table, &RACE_SCHEMA, &rows)
        .with_context(|| format!("writing {}", table))?;
    info!(table = %table, rows = written, "race written");
    Ok(written)
}
