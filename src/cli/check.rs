//! Check command implementation.
//!
//! Validates a tile map against a translation table without running a
//! placement: every recorded tile must resolve, remaps must point somewhere
//! real, and unused table sections are reported.

use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, TilecastError};
use crate::parser::{load_map, load_table};
use crate::validation::{print_diagnostics, validate, CheckOptions};

/// Check a tile map against a translation table without placing
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Tile map to check
    pub map: PathBuf,

    /// Translation table to check against
    pub table: PathBuf,

    /// Require every tile to supply this translation type
    #[arg(long = "type")]
    pub translation_type: Option<String>,

    /// Don't count default translations as a fallback
    #[arg(long)]
    pub no_defaults: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let map = load_map(&args.map)?;
    let table = load_table(&args.table)?;

    let options = CheckOptions {
        translation_type: args.translation_type.clone(),
        defaults_enabled: !args.no_defaults,
    };

    let result = validate(&map, &table, &options);
    print_diagnostics(&result);

    if result.has_errors() {
        return Err(TilecastError::Validation {
            message: format!("{} error(s) found", result.error_count()),
            help: Some("every tile in the map needs a reachable translation".to_string()),
        });
    }

    Ok(())
}
