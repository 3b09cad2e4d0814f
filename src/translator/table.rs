//! Translation table: the lookup data tiles are translated through.
//!
//! A table maps tileset name -> tile name -> translation type -> value, with
//! a parallel defaults section keyed by tile name alone and a set of one-hop
//! remap declarations. Add-operations reject duplicates so a malformed
//! document or directory scan fails loudly instead of silently overwriting.
//! Once built, the table is read-only for the rest of the run.

use std::collections::HashMap;

use crate::error::{Result, TilecastError};

/// Per-tile value set: translation type -> value.
pub type ValueSet = HashMap<String, String>;

/// Translation data for a run, built once from a document or directory scan.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    name: String,
    version: String,
    defaults: HashMap<String, ValueSet>,
    tilesets: HashMap<String, HashMap<String, ValueSet>>,
    remaps: HashMap<String, String>,
}

impl Default for TranslationTable {
    fn default() -> Self {
        Self::new("default", "0.1")
    }
}

impl TranslationTable {
    /// Create an empty table.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            defaults: HashMap::new(),
            tilesets: HashMap::new(),
            remaps: HashMap::new(),
        }
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Table version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rename the table.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set the table version string.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// Declare a default tile with an empty value set.
    pub fn add_default_tile(&mut self, tile: &str) -> Result<()> {
        if self.defaults.contains_key(tile) {
            return Err(TilecastError::Table {
                message: format!("Duplicate default tile. Tile name: {}", tile),
                help: None,
            });
        }
        self.defaults.insert(tile.to_string(), ValueSet::new());
        Ok(())
    }

    /// Declare a tile in a tileset with an empty value set.
    pub fn add_tile(&mut self, tileset: &str, tile: &str) -> Result<()> {
        let tiles = self.tilesets.entry(tileset.to_string()).or_default();
        if tiles.contains_key(tile) {
            return Err(TilecastError::Table {
                message: format!(
                    "Duplicate tile in tileset. Tileset: {} Tile name: {}",
                    tileset, tile
                ),
                help: None,
            });
        }
        tiles.insert(tile.to_string(), ValueSet::new());
        Ok(())
    }

    /// Add a default translation value, creating the tile entry as needed.
    /// Fails on a duplicate translation type for the tile.
    pub fn add_default_value(
        &mut self,
        tile: &str,
        translation_type: &str,
        value: &str,
    ) -> Result<()> {
        let values = self.defaults.entry(tile.to_string()).or_default();
        if values.contains_key(translation_type) {
            return Err(TilecastError::Table {
                message: format!(
                    "Duplicate default translation. Tile name: {} Translation type: {}",
                    tile, translation_type
                ),
                help: None,
            });
        }
        values.insert(translation_type.to_string(), value.to_string());
        Ok(())
    }

    /// Add a tileset-scoped translation value, creating the tileset and tile
    /// entries as needed. Fails on a duplicate translation type for the tile.
    pub fn add_value(
        &mut self,
        tileset: &str,
        tile: &str,
        translation_type: &str,
        value: &str,
    ) -> Result<()> {
        let values = self
            .tilesets
            .entry(tileset.to_string())
            .or_default()
            .entry(tile.to_string())
            .or_default();
        if values.contains_key(translation_type) {
            return Err(TilecastError::Table {
                message: format!(
                    "Duplicate translation. Tileset: {} Tile name: {} Translation type: {}",
                    tileset, tile, translation_type
                ),
                help: None,
            });
        }
        values.insert(translation_type.to_string(), value.to_string());
        Ok(())
    }

    /// Declare a remap. Each source tileset may be remapped at most once.
    pub fn add_remap(&mut self, from: &str, to: &str) -> Result<()> {
        if self.remaps.contains_key(from) {
            return Err(TilecastError::Table {
                message: format!("Duplicate remap declaration. Tileset: {}", from),
                help: None,
            });
        }
        self.remaps.insert(from.to_string(), to.to_string());
        Ok(())
    }

    /// Value set for a tile in the defaults section.
    pub fn default_values(&self, tile: &str) -> Option<&ValueSet> {
        self.defaults.get(tile)
    }

    /// Value set for a tile in a tileset.
    pub fn tileset_values(&self, tileset: &str, tile: &str) -> Option<&ValueSet> {
        self.tilesets.get(tileset).and_then(|tiles| tiles.get(tile))
    }

    /// Declared remap target for a tileset, if any.
    pub fn remap(&self, from: &str) -> Option<&str> {
        self.remaps.get(from).map(|s| s.as_str())
    }

    /// All remap declarations.
    pub fn remaps(&self) -> &HashMap<String, String> {
        &self.remaps
    }

    /// Sorted tileset names.
    pub fn tileset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tilesets.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Sorted tile names in the defaults section.
    pub fn default_tile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.defaults.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Sorted tile names in a tileset. Empty for an unknown tileset.
    pub fn tile_names(&self, tileset: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .tilesets
            .get(tileset)
            .map(|tiles| tiles.keys().map(|s| s.as_str()).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Sorted translation types used anywhere in the table.
    pub fn translation_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .defaults
            .values()
            .chain(self.tilesets.values().flat_map(|tiles| tiles.values()))
            .flat_map(|values| values.keys())
            .map(|s| s.as_str())
            .collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// Sorted translation types used within one tileset.
    pub fn translation_types_for(&self, tileset: &str) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .tilesets
            .get(tileset)
            .map(|tiles| {
                tiles
                    .values()
                    .flat_map(|values| values.keys())
                    .map(|s| s.as_str())
                    .collect()
            })
            .unwrap_or_default();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// Sorted translation types used in the defaults section.
    pub fn default_translation_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .defaults
            .values()
            .flat_map(|values| values.keys())
            .map(|s| s.as_str())
            .collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// True when the table holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.tilesets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_look_up() {
        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Tiles1", "wall", "text", "W").unwrap();
        table.add_default_value("grass", "text", "G").unwrap();

        assert_eq!(
            table
                .tileset_values("Tiles1", "wall")
                .and_then(|v| v.get("text")),
            Some(&"W".to_string())
        );
        assert_eq!(
            table.default_values("grass").and_then(|v| v.get("text")),
            Some(&"G".to_string())
        );
        assert!(table.tileset_values("Tiles1", "grass").is_none());
    }

    #[test]
    fn test_duplicate_translation_type_rejected() {
        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Tiles1", "wall", "text", "W").unwrap();

        let result = table.add_value("Tiles1", "wall", "text", "X");
        assert!(matches!(result, Err(TilecastError::Table { .. })));

        // Distinct types on the same tile are fine.
        table
            .add_value("Tiles1", "wall", "scene", "wall.glb")
            .unwrap();
    }

    #[test]
    fn test_duplicate_tile_rejected() {
        let mut table = TranslationTable::new("test", "0.1");
        table.add_tile("Tiles1", "wall").unwrap();
        assert!(table.add_tile("Tiles1", "wall").is_err());

        table.add_default_tile("grass").unwrap();
        assert!(table.add_default_tile("grass").is_err());
    }

    #[test]
    fn test_duplicate_remap_rejected() {
        let mut table = TranslationTable::new("test", "0.1");
        table.add_remap("Set1", "Set2").unwrap();
        assert!(table.add_remap("Set1", "Set3").is_err());
        assert_eq!(table.remap("Set1"), Some("Set2"));
    }

    #[test]
    fn test_listings_are_sorted() {
        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Zed", "b", "text", "1").unwrap();
        table.add_value("Able", "a", "scene", "2").unwrap();
        table.add_default_value("grass", "text", "G").unwrap();

        assert_eq!(table.tileset_names(), vec!["Able", "Zed"]);
        assert_eq!(table.translation_types(), vec!["scene", "text"]);
        assert_eq!(table.translation_types_for("Zed"), vec!["text"]);
        assert_eq!(table.default_tile_names(), vec!["grass"]);
    }
}
