//! Place command implementation.
//!
//! Translates every tile of a map through a translation table and hands the
//! results to the selected environment's placer.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::parser::{load_map, load_table};
use crate::placer::{PlacementOptions, TilePlacer};
use crate::translator::TileTranslator;

/// Translate a tile map and place the results into an environment
#[derive(Args, Debug)]
pub struct PlaceArgs {
    /// Tile map to translate
    pub map: PathBuf,

    /// Translation table to translate with
    pub table: PathBuf,

    /// Translation type to use
    pub translation_type: String,

    /// Environment to place into
    #[arg(long, default_value = "terminal")]
    pub env: String,

    /// Link placed artifacts into the output instead of copying, if possible
    #[arg(long)]
    pub link: bool,

    /// Don't use default translations for tiles
    #[arg(long)]
    pub no_defaults: bool,

    /// Remap a tileset's translations to another tileset's
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    pub remap: Option<Vec<String>>,

    /// File to save the generated output to
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Per-axis distance between adjacent placed tiles
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [1.0, 1.0, 1.0], allow_negative_numbers = true)]
    pub steps: Vec<f64>,

    /// Directory relative translation values resolve against
    /// (defaults to the translation table's directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

pub fn run(args: PlaceArgs) -> Result<()> {
    let map = load_map(&args.map)?;
    let table = load_table(&args.table)?;

    let mut translator = TileTranslator::new(map, table);
    translator.set_defaults_enabled(!args.no_defaults);
    translator.set_translation_type(args.translation_type.as_str());
    if let Some(remap) = &args.remap {
        translator.set_remap(remap[0].as_str(), remap[1].as_str());
    }

    let working_directory = args
        .dir
        .clone()
        .or_else(|| args.table.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    let options = PlacementOptions {
        environment: args.env.clone(),
        translation_type: args.translation_type.clone(),
        use_link: args.link,
        working_directory,
        steps: (args.steps[0], args.steps[1], args.steps[2]),
        save_path: args.save.clone(),
    };

    let mut placer = TilePlacer::with_builtins()?;
    placer.place_tiles(&translator, &options)?;

    if let Some(save) = &args.save {
        eprintln!("Saved placement output to {}", save.display());
    }

    Ok(())
}
