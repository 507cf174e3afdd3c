// src/normalize/records.rs

use super::schema::{RACE_SCHEMA, SEASON_SCHEMA};
use super::value::{Row, Value};
use crate::error::ScrapeError;
use chrono::{NaiveDate, NaiveTime};

type Result<T> = std::result::Result<T, ScrapeError>;

/// One round of a championship season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonRecord {
    pub grand_prix: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub winner: String,
    pub car: String,
    pub laps: Option<i64>,
}

/// One classified entrant of a race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceRecord {
    pub pos: Option<i64>,
    pub no: i64,
    pub driver: String,
    pub car: String,
    pub laps: Option<i64>,
    pub pts: Option<i64>,
}

/// Rows handed here come from `normalize`; anything else is a misaligned row.
fn misaligned(name: &str, expected: &str) -> ScrapeError {
    ScrapeError::Structure(format!("normalized row: `{}` is not {}", name, expected))
}

fn field<'a>(row: &'a Row, idx: Option<usize>, name: &str) -> Result<&'a Value> {
    idx.and_then(|i| row.get(i))
        .ok_or_else(|| misaligned(name, "present"))
}

fn text(row: &Row, idx: Option<usize>, name: &str) -> Result<String> {
    field(row, idx, name)?
        .as_text()
        .map(str::to_string)
        .ok_or_else(|| misaligned(name, "text"))
}

impl TryFrom<&Row> for SeasonRecord {
    type Error = ScrapeError;

    fn try_from(row: &Row) -> Result<Self> {
        let at = |name: &str| SEASON_SCHEMA.position(name);
        Ok(Self {
            grand_prix: text(row, at("Grand Prix"), "Grand Prix")?,
            date: field(row, at("Date"), "Date")?
                .as_date()
                .ok_or_else(|| misaligned("Date", "a date"))?,
            time: field(row, at("Time"), "Time")?.as_time(),
            winner: text(row, at("Winner"), "Winner")?,
            car: text(row, at("Car"), "Car")?,
            laps: field(row, at("Laps"), "Laps")?.as_int(),
        })
    }
}

impl TryFrom<&Row> for RaceRecord {
    type Error = ScrapeError;

    fn try_from(row: &Row) -> Result<Self> {
        let at = |name: &str| RACE_SCHEMA.position(name);
        Ok(Self {
            pos: field(row, at("Pos"), "Pos")?.as_int(),
            no: field(row, at("No"), "No")?
                .as_int()
                .ok_or_else(|| misaligned("No", "an integer"))?,
            driver: text(row, at("Driver"), "Driver")?,
            car: text(row, at("Car"), "Car")?,
            laps: field(row, at("Laps"), "Laps")?.as_int(),
            pts: field(row, at("PTS"), "PTS")?.as_int(),
        })
    }
}
