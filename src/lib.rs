//! tilecast - Tile-map translation pipeline
//!
//! A library for translating per-tile metadata in tile maps into output
//! artifacts (placements, text fragments, file paths) through translation
//! tables, with path-keyed handler registries driving both tile placement
//! and directory-to-table conversion.

pub mod cli;
pub mod dirconv;
pub mod error;
pub mod parser;
pub mod placer;
pub mod registry;
pub mod translator;
pub mod validation;

pub use dirconv::{
    ConflictEntry, ConvertOptions, DirectoryConverter, RelativePathCreator, SceneObjectCreator,
    TranslationCreator, DEFAULT_CREATOR_KEY, DEFAULTS_DIR,
};
pub use error::{Result, TilecastError};
pub use parser::{
    load_map, load_table, parse_map, parse_map_tilesets, parse_table, table_from_csv,
    table_to_csv, table_to_yaml, TilesetNames,
};
pub use placer::{
    EnvironmentHandler, JsonEnvironment, JsonPlacer, PlacementHandler, PlacementOptions,
    PlacerConfig, TerminalEnvironment, TerminalPlacer, TilePlacer, DEFAULT_PLACER_KEY,
};
pub use registry::{HandlerRegistry, PathTrie, RegistrationPolicy, RegistryEntry, RegistryQuery};
pub use translator::{TileLayer, TileMap, TileRef, TileTranslator, TranslationTable, ValueSet};
pub use validation::{validate, CheckOptions, Diagnostic, Severity, ValidationResult};
