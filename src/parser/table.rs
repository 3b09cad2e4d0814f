//! Translation-table document parsing and rendering.
//!
//! Tables are YAML documents with a defaults section, per-tileset sections,
//! and remap declarations:
//!
//! ```yaml
//! name: dungeon
//! version: "0.1"
//! defaults:
//!   - tile: grass
//!     values:
//!       text: G
//! tilesets:
//!   - name: Tiles1
//!     tiles:
//!       - tile: wall
//!         values:
//!           text: W
//! remaps:
//!   - from: Tiles2
//!     to: Tiles1
//! ```
//!
//! Sections are parsed as ordered record lists and pushed through the
//! table's duplicate-rejecting operations, so a document declaring the same
//! tile twice fails instead of silently keeping one entry.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TilecastError};
use crate::parser::csv::table_from_csv;
use crate::translator::TranslationTable;

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawTable {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    defaults: Vec<RawTile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tilesets: Vec<RawTileset>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    remaps: Vec<RawRemap>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawTile {
    tile: String,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawTileset {
    name: String,
    #[serde(default)]
    tiles: Vec<RawTile>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawRemap {
    from: String,
    to: String,
}

/// Parse a translation-table document.
pub fn parse_table(source: &str) -> Result<TranslationTable> {
    let raw: RawTable = serde_yaml::from_str(source).map_err(|e| TilecastError::Parse {
        message: format!("Malformed translation table: {}", e),
        help: None,
    })?;

    let mut table = TranslationTable::new(
        raw.name.as_deref().unwrap_or("default"),
        raw.version.as_deref().unwrap_or("0.1"),
    );

    for tile in &raw.defaults {
        check_values(&tile.tile, &tile.values)?;
        table.add_default_tile(&tile.tile)?;
        for (translation_type, value) in &tile.values {
            table.add_default_value(&tile.tile, translation_type, value)?;
        }
    }

    for tileset in &raw.tilesets {
        if tileset.name.is_empty() {
            return Err(TilecastError::Parse {
                message: "Malformed tilesettranslation. Missing tileset name.".to_string(),
                help: None,
            });
        }
        for tile in &tileset.tiles {
            check_values(&tile.tile, &tile.values)?;
            table.add_tile(&tileset.name, &tile.tile)?;
            for (translation_type, value) in &tile.values {
                table.add_value(&tileset.name, &tile.tile, translation_type, value)?;
            }
        }
    }

    for remap in &raw.remaps {
        table.add_remap(&remap.from, &remap.to)?;
    }

    Ok(table)
}

fn check_values(tile: &str, values: &BTreeMap<String, String>) -> Result<()> {
    if values.is_empty() {
        return Err(TilecastError::Parse {
            message: format!(
                "Malformed tiletranslation. Missing translations for tile: {}",
                tile
            ),
            help: None,
        });
    }
    Ok(())
}

/// Render a table back into its YAML document form, sections sorted by name.
pub fn table_to_yaml(table: &TranslationTable) -> Result<String> {
    let raw = RawTable {
        name: Some(table.name().to_string()),
        version: Some(table.version().to_string()),
        defaults: table
            .default_tile_names()
            .into_iter()
            .map(|tile| raw_tile(tile, table.default_values(tile)))
            .collect(),
        tilesets: table
            .tileset_names()
            .into_iter()
            .map(|name| RawTileset {
                name: name.to_string(),
                tiles: table
                    .tile_names(name)
                    .into_iter()
                    .map(|tile| raw_tile(tile, table.tileset_values(name, tile)))
                    .collect(),
            })
            .collect(),
        remaps: {
            let mut remaps: Vec<RawRemap> = table
                .remaps()
                .iter()
                .map(|(from, to)| RawRemap {
                    from: from.clone(),
                    to: to.clone(),
                })
                .collect();
            remaps.sort_by(|a, b| a.from.cmp(&b.from));
            remaps
        },
    };

    serde_yaml::to_string(&raw).map_err(|e| TilecastError::Parse {
        message: format!("Failed to serialize translation table: {}", e),
        help: None,
    })
}

fn raw_tile(tile: &str, values: Option<&crate::translator::ValueSet>) -> RawTile {
    RawTile {
        tile: tile.to_string(),
        values: values
            .map(|values| {
                values
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Load a translation table from a file, dispatching on extension: `.csv`
/// parses as the CSV section format, anything else as YAML.
pub fn load_table(path: &Path) -> Result<TranslationTable> {
    let source = fs::read_to_string(path).map_err(|e| TilecastError::Io {
        path: path.to_path_buf(),
        message: format!("Problem opening translation table: {}", e),
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => table_from_csv(&source),
        _ => parse_table(&source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
name: dungeon
version: "0.2"
defaults:
  - tile: grass
    values:
      text: G
tilesets:
  - name: Tiles1
    tiles:
      - tile: wall
        values:
          text: W
          scene: objects/wall.glb
remaps:
  - from: Tiles2
    to: Tiles1
"#;

    #[test]
    fn test_parse_table() {
        let table = parse_table(SAMPLE).unwrap();

        assert_eq!(table.name(), "dungeon");
        assert_eq!(table.version(), "0.2");
        assert_eq!(
            table
                .tileset_values("Tiles1", "wall")
                .and_then(|v| v.get("scene"))
                .map(|v| v.as_str()),
            Some("objects/wall.glb")
        );
        assert_eq!(
            table
                .default_values("grass")
                .and_then(|v| v.get("text"))
                .map(|v| v.as_str()),
            Some("G")
        );
        assert_eq!(table.remap("Tiles2"), Some("Tiles1"));
    }

    #[test]
    fn test_duplicate_tile_rejected() {
        let source = r#"
tilesets:
  - name: Tiles1
    tiles:
      - tile: wall
        values:
          text: W
      - tile: wall
        values:
          text: X
"#;
        let result = parse_table(source);
        assert!(matches!(result, Err(TilecastError::Table { .. })));
    }

    #[test]
    fn test_duplicate_default_rejected() {
        let source = r#"
defaults:
  - tile: grass
    values:
      text: G
  - tile: grass
    values:
      text: H
"#;
        let result = parse_table(source);
        assert!(matches!(result, Err(TilecastError::Table { .. })));
    }

    #[test]
    fn test_empty_values_rejected() {
        let source = r#"
defaults:
  - tile: grass
"#;
        let result = parse_table(source);
        assert!(matches!(result, Err(TilecastError::Parse { .. })));
    }

    #[test]
    fn test_yaml_round_trip() {
        let table = parse_table(SAMPLE).unwrap();
        let rendered = table_to_yaml(&table).unwrap();
        let reparsed = parse_table(&rendered).unwrap();

        assert_eq!(reparsed.name(), "dungeon");
        assert_eq!(
            reparsed
                .tileset_values("Tiles1", "wall")
                .and_then(|v| v.get("text"))
                .map(|v| v.as_str()),
            Some("W")
        );
        assert_eq!(reparsed.remap("Tiles2"), Some("Tiles1"));
    }
}
