// src/store/parquet.rs

use super::arrow::rows_to_batch;
use super::TableSink;
use crate::normalize::{Row, TableSchema};
use anyhow::{Context, Result};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::{fs, path::PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Tables stored as `<dir>/<name>.parquet`, one file per results page.
pub struct ParquetSink {
    dir: PathBuf,
}

impl ParquetSink {
    /// Create the output directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).with_context(|| format!("creating output directory {:?}", &dir))?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.parquet", name))
    }
}

impl TableSink for ParquetSink {
    /// Written to a temp file next to the target, then renamed over it.
    fn replace_table(&mut self, name: &str, schema: &TableSchema, rows: &[Row]) -> Result<usize> {
        let batch = rows_to_batch(schema, rows)?;
        let path = self.path_for(name);

        let tmp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("creating temp file in {:?}", &self.dir))?;
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let file = tmp.as_file().try_clone()?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
            .context("creating Arrow writer")?;
        writer.write(&batch).context("writing record batch")?;
        writer.close().context("closing parquet writer")?;

        tmp.persist(&path)
            .with_context(|| format!("replacing {:?}", &path))?;

        debug!(table = name, rows = rows.len(), path = %path.display(), "parquet table replaced");
        Ok(rows.len())
    }
}
