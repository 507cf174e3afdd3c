// src/store/mod.rs

pub mod arrow;
pub mod duck;
pub mod parquet;

pub use self::duck::DuckSink;
pub use self::parquet::ParquetSink;

use crate::config::{OutputConfig, OutputFormat};
use crate::normalize::{Row, TableSchema};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_]+").expect("table name pattern should be valid"));

/// Destination for normalized tables. Every call replaces the whole table.
pub trait TableSink {
    /// Replace the contents of `name` with `rows`, returning the number of rows written.
    /// On error the previous contents must be left untouched.
    fn replace_table(&mut self, name: &str, schema: &TableSchema, rows: &[Row]) -> Result<usize>;
}

/// Lower-case and collapse anything outside `[a-z0-9_]` into `_`.
pub fn sanitize_table_name(raw: &str) -> String {
    NON_IDENT
        .replace_all(&raw.to_lowercase(), "_")
        .trim_matches('_')
        .to_string()
}

pub fn season_table_name(year: i32) -> String {
    format!("season_{}", year)
}

pub fn race_table_name(year: i32, race_number: u32, slug: &str) -> String {
    sanitize_table_name(&format!("race_{}_{}_{}", year, race_number, slug))
}

/// Open the sink selected in the output configuration.
pub fn open_sink(output: &OutputConfig) -> Result<Box<dyn TableSink>> {
    Ok(match output.format {
        OutputFormat::Duckdb => Box::new(DuckSink::open(&output.path)?),
        OutputFormat::Parquet => Box::new(ParquetSink::new(&output.path)?),
    })
}
