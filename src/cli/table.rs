//! Table command implementation.
//!
//! Creates a translation table from a directory tree: first level names the
//! tilesets (DEFAULTS feeds the defaults section), second level names the
//! translation types, and the files below become tile translation values.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::dirconv::{ConvertOptions, DirectoryConverter};
use crate::error::{Result, TilecastError};
use crate::parser::{table_to_csv, table_to_yaml};

/// Create a translation table from the contents of a directory
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Directory the translation table is created from
    pub dir: PathBuf,

    /// Environment the translation table is targeted at
    #[arg(long, default_value = "default")]
    pub env: String,

    /// Output in CSV format instead of YAML
    #[arg(long)]
    pub csv: bool,

    /// Don't create default translations; ignore the DEFAULTS directory
    #[arg(long)]
    pub no_defaults: bool,

    /// File to save the generated table to
    #[arg(long)]
    pub save: Option<PathBuf>,
}

pub fn run(args: TableArgs) -> Result<()> {
    if !args.dir.is_dir() {
        return Err(TilecastError::Io {
            path: args.dir.clone(),
            message: "Problem opening directory. No such directory.".to_string(),
        });
    }

    // Values are written relative to wherever the table will live.
    let relative_dir = args
        .save
        .as_ref()
        .and_then(|save| save.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| args.dir.clone());

    let table_name = args
        .dir
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "default".to_string());

    let converter = DirectoryConverter::with_builtins()?;
    let options = ConvertOptions {
        directory: args.dir.clone(),
        relative_dir,
        environment: args.env.clone(),
        ignore_defaults: args.no_defaults,
        table_name,
        table_version: "0.1".to_string(),
    };

    let table = match converter.convert(&options) {
        Ok(table) => table,
        Err(TilecastError::ConflictingTranslations { conflicts }) => {
            eprintln!("Problem creating translation table.");
            eprintln!("The following conflicting tile translations were found:");
            for conflict in &conflicts {
                eprintln!("  {}", conflict);
            }
            return Err(TilecastError::ConflictingTranslations { conflicts });
        }
        Err(error) => return Err(error),
    };

    let output = if args.csv {
        table_to_csv(&table)
    } else {
        table_to_yaml(&table)?
    };

    match &args.save {
        Some(save) => {
            fs::write(save, output).map_err(|e| TilecastError::Io {
                path: save.clone(),
                message: format!("Problem saving file: {}", e),
            })?;
            eprintln!("Saved translation table to {}", save.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}
