use anyhow::{bail, Context, Result};
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::{env, fs::File, path::Path};

/// Print the schema and rows of a results table written by the parquet sink.
fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        bail!("Usage: {} <PARQUET_FILE>", args[0]);
    }
    inspect_parquet(Path::new(&args[1]))
}

fn inspect_parquet(path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let total_rows = builder.metadata().file_metadata().num_rows();

    println!("=== {} ===", path.display());
    println!("Total rows: {}", total_rows);
    println!();

    println!("=== Columns ===");
    for field in schema.fields() {
        println!(
            "- {:<12} | {:<16} | nullable: {}",
            field.name(),
            field.data_type().to_string(),
            field.is_nullable()
        );
    }
    println!();

    println!("=== Rows ===");
    let header: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    println!("{}", header.join("\t"));
    for batch in builder.build()? {
        print_batch(&batch?)?;
    }
    Ok(())
}

fn print_batch(batch: &RecordBatch) -> Result<()> {
    let options = FormatOptions::default().with_null("NULL");
    let formatters = batch
        .columns()
        .iter()
        .map(|c| ArrayFormatter::try_new(c.as_ref(), &options))
        .collect::<Result<Vec<_>, _>>()?;

    for row in 0..batch.num_rows() {
        let cells: Vec<String> = formatters.iter().map(|f| f.value(row).to_string()).collect();
        println!("{}", cells.join("\t"));
    }
    Ok(())
}
