// src/store/arrow.rs

use crate::normalize::{ColumnKind, Row, TableSchema};
use anyhow::{Context, Result};
use arrow::{
    array::{
        ArrayRef, Date32Builder, Int64Builder, StringBuilder, Time64MicrosecondBuilder,
    },
    datatypes::{DataType, Field, Schema, TimeUnit},
    record_batch::RecordBatch,
};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use std::sync::Arc;

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// - Integer     → Int64
/// - Text, Name  → Utf8
/// - Date        → Date32
/// - Time        → Time64(µs)
pub fn map_to_arrow_type(kind: ColumnKind) -> DataType {
    match kind {
        ColumnKind::Integer => DataType::Int64,
        ColumnKind::Text | ColumnKind::Name => DataType::Utf8,
        ColumnKind::Date => DataType::Date32,
        ColumnKind::Time => DataType::Time64(TimeUnit::Microsecond),
    }
}

pub fn build_arrow_schema(schema: &TableSchema) -> Arc<Schema> {
    let fields: Vec<Field> = schema
        .columns
        .iter()
        .map(|col| Field::new(col.name, map_to_arrow_type(col.kind), col.nullable))
        .collect();
    Arc::new(Schema::new(fields))
}

fn date_to_days(d: NaiveDate) -> i32 {
    d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn time_to_micros(t: NaiveTime) -> i64 {
    i64::from(t.num_seconds_from_midnight()) * 1_000_000 + i64::from(t.nanosecond() / 1_000)
}

/// Column-wise copy of normalized rows into a single record batch.
pub fn rows_to_batch(schema: &TableSchema, rows: &[Row]) -> Result<RecordBatch> {
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.columns.len());

    for (i, col) in schema.columns.iter().enumerate() {
        let cells = rows.iter().map(|r| r.get(i));
        let array: ArrayRef = match col.kind {
            ColumnKind::Integer => {
                let mut b = Int64Builder::with_capacity(rows.len());
                for v in cells {
                    b.append_option(v.and_then(|v| v.as_int()));
                }
                Arc::new(b.finish())
            }
            ColumnKind::Text | ColumnKind::Name => {
                let mut b = StringBuilder::new();
                for v in cells {
                    b.append_option(v.and_then(|v| v.as_text()));
                }
                Arc::new(b.finish())
            }
            ColumnKind::Date => {
                let mut b = Date32Builder::with_capacity(rows.len());
                for v in cells {
                    b.append_option(v.and_then(|v| v.as_date()).map(date_to_days));
                }
                Arc::new(b.finish())
            }
            ColumnKind::Time => {
                let mut b = Time64MicrosecondBuilder::with_capacity(rows.len());
                for v in cells {
                    b.append_option(v.and_then(|v| v.as_time()).map(time_to_micros));
                }
                Arc::new(b.finish())
            }
        };
        columns.push(array);
    }

    RecordBatch::try_new(build_arrow_schema(schema), columns)
        .with_context(|| format!("building {} record batch", schema.name))
}
