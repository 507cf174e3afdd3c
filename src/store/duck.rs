// src/store/duck.rs

use super::TableSink;
use crate::normalize::{ColumnKind, Row, TableSchema, Value};
use anyhow::{Context, Result};
use duckdb::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use duckdb::{params_from_iter, Connection};
use std::path::Path;
use tracing::debug;

impl ToSql for Value {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Int(v) => ToSqlOutput::Owned(SqlValue::BigInt(*v)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            // Bound as ISO text and cast in the INSERT statement.
            Value::Date(_) | Value::Time(_) => ToSqlOutput::Owned(SqlValue::Text(self.to_string())),
        })
    }
}

fn sql_type(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Integer => "BIGINT",
        ColumnKind::Text | ColumnKind::Name => "VARCHAR",
        ColumnKind::Date => "DATE",
        ColumnKind::Time => "TIME",
    }
}

fn placeholder(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Date => "CAST(? AS DATE)",
        ColumnKind::Time => "CAST(? AS TIME)",
        _ => "?",
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Tables stored in a DuckDB database, one DuckDB table per results page.
pub struct DuckSink {
    conn: Connection,
}

impl DuckSink {
    /// Open a DuckDB database on disk at `path`, creating the file if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("opening duckdb at {}", path.display()))?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl TableSink for DuckSink {
    /// Drop, recreate and fill `name` inside one transaction.
    fn replace_table(&mut self, name: &str, schema: &TableSchema, rows: &[Row]) -> Result<usize> {
        let table = quote_ident(name);
        let columns = schema
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_ident(c.name), sql_type(c.kind)))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = schema
            .columns
            .iter()
            .map(|c| placeholder(c.kind))
            .collect::<Vec<_>>()
            .join(", ");

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table}; CREATE TABLE {table} ({columns});"
        ))
        .with_context(|| format!("recreating table {}", name))?;
        {
            let mut stmt = tx.prepare(&format!("INSERT INTO {table} VALUES ({placeholders})"))?;
            for (i, row) in rows.iter().enumerate() {
                stmt.execute(params_from_iter(row.iter()))
                    .with_context(|| format!("inserting row {} into {}", i, name))?;
            }
        }
        tx.commit()
            .with_context(|| format!("committing table {}", name))?;

        debug!(table = name, rows = rows.len(), "duckdb table replaced");
        Ok(rows.len())
    }
}
