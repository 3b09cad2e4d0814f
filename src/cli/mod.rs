pub mod check;
pub mod completions;
pub mod convert;
pub mod names;
pub mod place;
pub mod table;

use clap::{Parser, Subcommand};

/// tilecast - Tile-map translation pipeline
#[derive(Parser, Debug)]
#[command(name = "tilecast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a tile map and place the results into an environment
    Place(place::PlaceArgs),

    /// Create a translation table from the contents of a directory
    Table(table::TableArgs),

    /// Convert a translation table between YAML and CSV
    Convert(convert::ConvertArgs),

    /// List the tile names declared by a tile map's tilesets
    Names(names::NamesArgs),

    /// Check a tile map against a translation table without placing
    Check(check::CheckArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
