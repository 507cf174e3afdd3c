// src/normalize/mod.rs

pub mod date_parser;
pub mod records;
pub mod schema;
pub mod value;

pub use records::{RaceRecord, SeasonRecord};
pub use schema::{Column, ColumnKind, TableSchema, RACE_SCHEMA, SEASON_SCHEMA};
pub use value::{Row, Value};

use crate::error::ScrapeError;
use crate::extract::RawTable;
use tracing::warn;

/// Drop every whitespace character, not just the outer ones.
pub fn remove_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Convert one cell; `None` means the text is not a valid value of the column's kind.
fn coerce(kind: ColumnKind, raw: &str) -> Option<Value> {
    match kind {
        ColumnKind::Text if raw.is_empty() => None,
        ColumnKind::Text => Some(Value::Text(raw.to_string())),
        ColumnKind::Name => {
            let name = remove_whitespace(raw);
            (!name.is_empty()).then_some(Value::Text(name))
        }
        ColumnKind::Integer => raw.trim().parse::<i64>().ok().map(Value::Int),
        ColumnKind::Date => date_parser::parse_date(raw).map(Value::Date),
        ColumnKind::Time => date_parser::parse_time(raw).map(Value::Time),
    }
}

fn coerce_cell(column: &Column, raw: &str, row: usize) -> Result<Value, ScrapeError> {
    match coerce(column.kind, raw) {
        Some(v) => Ok(v),
        None if column.nullable => Ok(Value::Null),
        None => Err(ScrapeError::Coercion {
            row,
            column: column.name.to_string(),
            value: raw.to_string(),
            expected: column.kind.describe(),
        }),
    }
}

/// Build one typed row per data row of `table`, following `schema`.
///
/// Columns are looked up in the header by exact name and read positionally.
/// A row shorter than the header is read as if the missing trailing cells
/// were empty; extra cells are ignored. Both are logged.
pub fn normalize(table: &RawTable, schema: &TableSchema) -> Result<Vec<Row>, ScrapeError> {
    if !table.has_header() {
        return Err(ScrapeError::Structure(format!(
            "{} table has no header row",
            schema.name
        )));
    }

    let indices = schema
        .columns
        .iter()
        .map(|col| {
            table
                .column_index(col.name)
                .ok_or_else(|| ScrapeError::Schema {
                    schema: schema.name.to_string(),
                    column: col.name.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let width = table.headers.len();
    let mut out = Vec::with_capacity(table.rows.len());

    for (row_idx, raw) in table.rows.iter().enumerate() {
        if raw.len() != width {
            warn!(
                schema = schema.name,
                row = row_idx,
                cells = raw.len(),
                headers = width,
                "row/header arity mismatch"
            );
        }

        let row = schema
            .columns
            .iter()
            .zip(&indices)
            .map(|(col, &idx)| {
                let cell = raw.get(idx).map(String::as_str).unwrap_or("");
                coerce_cell(col, cell, row_idx)
            })
            .collect::<Result<Row, _>>()?;
        out.push(row);
    }

    Ok(out)
}

/// Normalize a season index table into typed records.
pub fn normalize_season(table: &RawTable) -> Result<Vec<SeasonRecord>, ScrapeError> {
    season_records(&normalize(table, &SEASON_SCHEMA)?)
}

/// Typed view of rows already normalized with [`SEASON_SCHEMA`].
pub fn season_records(rows: &[Row]) -> Result<Vec<SeasonRecord>, ScrapeError> {
    rows.iter().map(SeasonRecord::try_from).collect()
}

/// Normalize a race result table into typed records.
pub fn normalize_race(table: &RawTable) -> Result<Vec<RaceRecord>, ScrapeError> {
    race_records(&normalize(table, &RACE_SCHEMA)?)
}

/// Typed view of rows already normalized with [`RACE_SCHEMA`].
pub fn race_records(rows: &[Row]) -> Result<Vec<RaceRecord>, ScrapeError> {
    rows.iter().map(RaceRecord::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    const RACE_HEADERS: &[&str] = &["Pos", "No", "Driver", "Car", "Laps", "PTS"];

    #[test]
    fn race_row_with_all_values() {
        let t = table(
            RACE_HEADERS,
            &[&["1", "44", "Lewis Hamilton", "Mercedes", "58", "25"]],
        );
        let records = normalize_race(&t).unwrap();
        assert_eq!(
            records,
            vec![RaceRecord {
                pos: Some(1),
                no: 44,
                driver: "LewisHamilton".into(),
                car: "Mercedes".into(),
                laps: Some(58),
                pts: Some(25),
            }]
        );
    }

    #[test]
    fn unclassified_entrant_gets_null_position_and_points() {
        let t = table(
            RACE_HEADERS,
            &[&["NC", "23", "Driver Name", "Team", "12", ""]],
        );
        let records = normalize_race(&t).unwrap();
        assert_eq!(
            records,
            vec![RaceRecord {
                pos: None,
                no: 23,
                driver: "DriverName".into(),
                car: "Team".into(),
                laps: Some(12),
                pts: None,
            }]
        );
    }

    #[test]
    fn retired_position_is_null_not_an_error() {
        let t = table(
            RACE_HEADERS,
            &[&["Ret", "5", "Max Verstappen", "Red Bull", "DNF", "0"]],
        );
        let rows = normalize(&t, &RACE_SCHEMA).unwrap();
        assert_eq!(rows[0][0], Value::Null);
        assert_eq!(rows[0][4], Value::Null);
        assert_eq!(rows[0][5], Value::Int(0));
    }

    #[test]
    fn missing_car_number_value_is_a_coercion_error() {
        let t = table(
            RACE_HEADERS,
            &[&["1", "", "Lewis Hamilton", "Mercedes", "58", "25"]],
        );
        let err = normalize(&t, &RACE_SCHEMA).unwrap_err();
        assert!(matches!(err, ScrapeError::Coercion { ref column, row: 0, .. } if column == "No"));

        let t = table(RACE_HEADERS, &[&["1", "#44", "L H", "M", "58", "25"]]);
        assert!(matches!(
            normalize(&t, &RACE_SCHEMA),
            Err(ScrapeError::Coercion { .. })
        ));
    }

    #[test]
    fn missing_car_number_header_is_a_schema_error() {
        let t = table(
            &["Pos", "Driver", "Car", "Laps", "PTS"],
            &[&["1", "Lewis Hamilton", "Mercedes", "58", "25"]],
        );
        let err = normalize(&t, &RACE_SCHEMA).unwrap_err();
        assert_eq!(
            err,
            ScrapeError::Schema {
                schema: "race".into(),
                column: "No".into()
            }
        );
    }

    #[test]
    fn table_without_header_is_a_structure_error() {
        let t = table(&[], &[&["1", "44"]]);
        assert!(matches!(
            normalize(&t, &RACE_SCHEMA),
            Err(ScrapeError::Structure(_))
        ));
    }

    #[test]
    fn short_row_pads_nullable_trailing_columns() {
        // PTS cell dropped by row cleaning: the row is one short.
        let t = table(RACE_HEADERS, &[&["4", "7", "Kimi Raikkonen", "Ferrari", "58"]]);
        let records = normalize_race(&t).unwrap();
        assert_eq!(records[0].laps, Some(58));
        assert_eq!(records[0].pts, None);
    }

    #[test]
    fn long_row_ignores_extra_cells() {
        let t = table(
            RACE_HEADERS,
            &[&["1", "44", "Lewis Hamilton", "Mercedes", "58", "25", "extra"]],
        );
        assert_eq!(
            normalize_race(&t).unwrap(),
            vec![RaceRecord {
                pos: Some(1),
                no: 44,
                driver: "LewisHamilton".into(),
                car: "Mercedes".into(),
                laps: Some(58),
                pts: Some(25),
            }]
        );
    }

    #[test]
    fn typed_entry_points_keep_error_kinds() {
        let t = table(
            &["Pos", "Driver", "Car", "Laps", "PTS"],
            &[&["1", "Lewis Hamilton", "Mercedes", "58", "25"]],
        );
        assert!(matches!(
            normalize_race(&t),
            Err(ScrapeError::Schema { ref column, .. }) if column == "No"
        ));

        let t = table(
            &["Grand Prix", "Date", "Winner", "Car", "Laps", "Time"],
            &[&["Monaco", "sometime", "A B", "C", "1", ""]],
        );
        assert!(matches!(
            normalize_season(&t),
            Err(ScrapeError::Coercion { ref column, .. }) if column == "Date"
        ));
    }

    #[test]
    fn empty_row_fails_on_mandatory_columns() {
        let t = table(RACE_HEADERS, &[&[] as &[&str]]);
        assert!(matches!(
            normalize(&t, &RACE_SCHEMA),
            Err(ScrapeError::Coercion { .. })
        ));
    }

    #[test]
    fn columns_are_found_by_name_not_position() {
        let t = table(
            &["Driver", "PTS", "No", "Car", "Laps", "Pos", "Time/Retired"],
            &[&["Nino Farina", "9", "2", "Alfa Romeo", "70", "1", "2:13:23.600"]],
        );
        let r = &normalize_race(&t).unwrap()[0];
        assert_eq!(r.driver, "NinoFarina");
        assert_eq!(r.no, 2);
        assert_eq!(r.pos, Some(1));
        assert_eq!(r.pts, Some(9));
    }

    #[test]
    fn season_rows_preserve_order_and_types() {
        let t = table(
            &["Grand Prix", "Date", "Winner", "Car", "Laps", "Time"],
            &[
                &["Great Britain", "13 May 1950", "Nino Farina", "Alfa Romeo", "70", "2:13:23.600"],
                &["Monaco", "21 May 1950", "Juan Manuel Fangio", "Alfa Romeo", "100", "3:13:18.700"],
                &["Indianapolis 500", "30 May 1950", "Johnnie Parsons", "Kurtis Kraft Offenhauser", "138", ""],
            ],
        );
        let records = normalize_season(&t).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].grand_prix, "Great Britain");
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(1950, 5, 13).unwrap());
        assert_eq!(
            records[0].time,
            NaiveTime::from_hms_milli_opt(2, 13, 23, 600)
        );
        assert_eq!(records[1].winner, "JuanManuelFangio");
        assert_eq!(records[2].grand_prix, "Indianapolis 500");
        assert_eq!(records[2].time, None);
        assert_eq!(records[2].laps, Some(138));
    }

    #[test]
    fn season_date_must_parse() {
        let t = table(
            &["Grand Prix", "Date", "Winner", "Car", "Laps", "Time"],
            &[&["Monaco", "sometime", "A B", "C", "1", ""]],
        );
        assert!(matches!(
            normalize(&t, &SEASON_SCHEMA),
            Err(ScrapeError::Coercion { ref column, .. }) if column == "Date"
        ));
    }

    #[test]
    fn strict_time_column_rejects_malformed_text() {
        let col = Column::required("Time", ColumnKind::Time);
        assert!(coerce_cell(&col, "1:02:03.4", 0).is_ok());
        assert!(matches!(
            coerce_cell(&col, "+1 Lap", 3),
            Err(ScrapeError::Coercion { row: 3, .. })
        ));
    }

    #[test]
    fn name_cleanup_removes_every_space() {
        assert_eq!(remove_whitespace("Max Verstappen"), "MaxVerstappen");
        assert_eq!(remove_whitespace(" Juan  Manuel\tFangio "), "JuanManuelFangio");
        assert_eq!(remove_whitespace("Senna"), "Senna");
    }
}
