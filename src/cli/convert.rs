//! Convert command implementation.
//!
//! Re-renders a translation table in another format. The input format is
//! taken from the file extension (`.csv` parses as CSV, anything else as
//! YAML).

use std::fs;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{Result, TilecastError};
use crate::parser::{load_table, table_to_csv, table_to_yaml};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Csv,
}

/// Convert a translation table between YAML and CSV
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Translation table to convert
    pub table: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub to: Format,

    /// File to save the converted table to
    #[arg(long)]
    pub save: Option<PathBuf>,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let table = load_table(&args.table)?;

    let output = match args.to {
        Format::Csv => table_to_csv(&table),
        Format::Yaml => table_to_yaml(&table)?,
    };

    match &args.save {
        Some(save) => fs::write(save, output).map_err(|e| TilecastError::Io {
            path: save.clone(),
            message: format!("Problem saving file: {}", e),
        })?,
        None => print!("{}", output),
    }

    Ok(())
}
