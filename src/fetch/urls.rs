// src/fetch/urls.rs
use anyhow::{Context, Result};
use url::Url;

/// Season index page: `{base}/{year}/races.html`.
pub fn season_url(base: &str, year: i32) -> Result<Url> {
    let raw = format!("{}/{}/races.html", base.trim_end_matches('/'), year);
    Url::parse(&raw).with_context(|| format!("building season URL {}", raw))
}

/// Race result page: `{base}/{year}/races/{race_number}/{slug}/race-result.html`.
pub fn race_result_url(base: &str, year: i32, race_number: u32, slug: &str) -> Result<Url> {
    let raw = format!(
        "{}/{}/races/{}/{}/race-result.html",
        base.trim_end_matches('/'),
        year,
        race_number,
        slug
    );
    Url::parse(&raw).with_context(|| format!("building race URL {}", raw))
}

/// Race identifier used in result URLs: lower-cased, spaces turned into hyphens.
pub fn race_slug(grand_prix: &str) -> String {
    grand_prix.replace(' ', "-").to_lowercase()
}
