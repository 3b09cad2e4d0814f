//! Parser modules for tilecast documents.
//!
//! This is the data-access layer the rest of the crate sits on: tile maps
//! and translation tables come in as YAML documents, and translation tables
//! can additionally round-trip through a sectioned CSV layout for
//! spreadsheet editing.
//!
//! # Usage
//!
//! ```ignore
//! use tilecast::parser::{load_map, load_table};
//!
//! let map = load_map(Path::new("overworld.map.yaml"))?;
//! let table = load_table(Path::new("dungeon.ttt.yaml"))?;
//! ```

mod csv;
mod map;
mod table;

pub use csv::{table_from_csv, table_to_csv};
pub use map::{load_map, parse_map, parse_map_tilesets, TilesetNames};
pub use table::{load_table, parse_table, table_to_yaml};
