//! Tile translation: resolving map tiles to translation-table values.
//!
//! A [`TileTranslator`] joins a [`TileMap`] to a [`TranslationTable`] and
//! answers "what does the tile at (layer, x, y) translate to for this
//! translation type?". Resolution order:
//!
//! 1. Apply a remap to the tile's tileset, if one is declared (one hop, never
//!    chained).
//! 2. Look up the tile in the effective tileset's section of the table.
//! 3. If absent and defaults are enabled, fall back to the defaults section.
//! 4. Within the value set found, require the requested translation type.
//!
//! A coordinate with no recorded tile yields `Ok(None)` - sparse maps are the
//! norm, not a failure. Every other miss is an error.

mod map;
mod table;

pub use map::{TileLayer, TileMap, TileRef};
pub use table::{TranslationTable, ValueSet};

use std::collections::HashMap;

use crate::error::{Result, TilecastError};

/// Resolves tiles in a map to translation values.
#[derive(Debug)]
pub struct TileTranslator {
    map: TileMap,
    table: TranslationTable,
    remaps: HashMap<String, String>,
    defaults_enabled: bool,
    translation_type: Option<String>,
}

impl TileTranslator {
    /// Create a translator over a map and table. Remap declarations from the
    /// table are picked up; more can be added with
    /// [`set_remap`](Self::set_remap).
    pub fn new(map: TileMap, table: TranslationTable) -> Self {
        let remaps = table.remaps().clone();
        Self {
            map,
            table,
            remaps,
            defaults_enabled: false,
            translation_type: None,
        }
    }

    /// The map being translated.
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// The table translations are pulled from.
    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Whether the defaults section is consulted for tiles with no
    /// tileset-scoped entry.
    pub fn defaults_enabled(&self) -> bool {
        self.defaults_enabled
    }

    /// Enable or disable the defaults fallback.
    pub fn set_defaults_enabled(&mut self, enabled: bool) {
        self.defaults_enabled = enabled;
    }

    /// The configured translation type, if any.
    pub fn translation_type(&self) -> Option<&str> {
        self.translation_type.as_deref()
    }

    /// Set the translation type used when `translate` is called without an
    /// explicit one.
    pub fn set_translation_type(&mut self, translation_type: impl Into<String>) {
        self.translation_type = Some(translation_type.into());
    }

    /// The remap target for a tileset, if any.
    pub fn remap(&self, from: &str) -> Option<&str> {
        self.remaps.get(from).map(|s| s.as_str())
    }

    /// Remap a tileset so its tiles resolve through another tileset's section
    /// of the table. Replaces any previous remap of the same source.
    pub fn set_remap(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.remaps.insert(from.into(), to.into());
    }

    /// Drop every remap, including those declared by the table.
    pub fn clear_remaps(&mut self) {
        self.remaps.clear();
    }

    /// Number of layers in the map.
    pub fn layer_count(&self) -> usize {
        self.map.layer_count()
    }

    /// Width of a layer in tiles.
    pub fn layer_width(&self, layer: usize) -> Result<usize> {
        self.layer(layer).map(|l| l.width())
    }

    /// Height of a layer in tiles.
    pub fn layer_height(&self, layer: usize) -> Result<usize> {
        self.layer(layer).map(|l| l.height())
    }

    /// Resolve the tile at (layer, x, y) to a translation value.
    ///
    /// `translation_type` overrides the configured type for this call; with
    /// neither set the call fails. Returns `Ok(None)` when no tile is
    /// recorded at the coordinate.
    pub fn translate(
        &self,
        layer: usize,
        x: usize,
        y: usize,
        translation_type: Option<&str>,
    ) -> Result<Option<&str>> {
        let translation_type = match translation_type.or(self.translation_type.as_deref()) {
            Some(ty) => ty,
            None => return Err(TilecastError::TranslationTypeNotSet),
        };

        let layer_data = self.layer(layer)?;
        if x >= layer_data.width() {
            return Err(TilecastError::CoordinateOutOfBounds {
                axis: 'x',
                value: x,
                layer,
            });
        }
        if y >= layer_data.height() {
            return Err(TilecastError::CoordinateOutOfBounds {
                axis: 'y',
                value: y,
                layer,
            });
        }

        let tile = match layer_data.tile(x, y) {
            Some(tile) => tile,
            None => return Ok(None),
        };

        // Remap is applied once, before the tileset lookup. A remapped
        // tileset never resolves through its own entries.
        let tileset = self.remap(&tile.tileset).unwrap_or(&tile.tileset);

        let values = match self.table.tileset_values(tileset, &tile.name) {
            Some(values) => values,
            None => match self
                .defaults_enabled
                .then(|| self.table.default_values(&tile.name))
                .flatten()
            {
                Some(values) => values,
                None => {
                    return Err(TilecastError::MissingTranslation {
                        tile: tile.name.clone(),
                        tileset: tile.tileset.clone(),
                        remap: self.remap(&tile.tileset).map(|s| s.to_string()),
                        defaults_enabled: self.defaults_enabled,
                    })
                }
            },
        };

        match values.get(translation_type) {
            Some(value) => Ok(Some(value.as_str())),
            None => Err(TilecastError::MissingTranslationType {
                translation_type: translation_type.to_string(),
                tile: tile.name.clone(),
                tileset: tile.tileset.clone(),
                remap: self.remap(&tile.tileset).map(|s| s.to_string()),
                defaults_enabled: self.defaults_enabled,
            }),
        }
    }

    fn layer(&self, layer: usize) -> Result<&TileLayer> {
        self.map.layer(layer).ok_or(TilecastError::LayerOutOfBounds {
            layer,
            layers: self.map.layer_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_translator() -> TileTranslator {
        let mut map = TileMap::new("test");
        let mut layer = TileLayer::new(2, 1);
        layer.set_tile(0, 0, TileRef::new("Tiles1", "wall"));
        layer.set_tile(1, 0, TileRef::new("Tiles1", "grass"));
        map.add_layer(layer);

        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Tiles1", "wall", "text", "W").unwrap();
        table.add_default_value("grass", "text", "G").unwrap();

        TileTranslator::new(map, table)
    }

    #[test]
    fn test_tileset_scoped_translation() {
        let translator = sample_translator();
        assert_eq!(
            translator.translate(0, 0, 0, Some("text")).unwrap(),
            Some("W")
        );
    }

    #[test]
    fn test_defaults_fallback_only_when_enabled() {
        let mut translator = sample_translator();

        // Defaults disabled: the grass tile has no Tiles1-scoped entry.
        let result = translator.translate(0, 1, 0, Some("text"));
        assert!(matches!(
            result,
            Err(TilecastError::MissingTranslation { .. })
        ));

        translator.set_defaults_enabled(true);
        assert_eq!(
            translator.translate(0, 1, 0, Some("text")).unwrap(),
            Some("G")
        );
    }

    #[test]
    fn test_defaults_never_override_scoped_entry() {
        // A default for "wall" exists alongside the scoped entry; the scoped
        // one wins.
        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Tiles1", "wall", "text", "W").unwrap();
        table.add_default_value("wall", "text", "default-W").unwrap();
        let mut map = TileMap::new("test");
        let mut layer = TileLayer::new(1, 1);
        layer.set_tile(0, 0, TileRef::new("Tiles1", "wall"));
        map.add_layer(layer);

        let mut translator = TileTranslator::new(map, table);
        translator.set_defaults_enabled(true);
        assert_eq!(
            translator.translate(0, 0, 0, Some("text")).unwrap(),
            Some("W")
        );
    }

    #[test]
    fn test_remap_redirects_lookup() {
        let mut map = TileMap::new("test");
        let mut layer = TileLayer::new(1, 1);
        layer.set_tile(0, 0, TileRef::new("Set1", "door"));
        map.add_layer(layer);

        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Set1", "door", "text", "one").unwrap();
        table.add_value("Set2", "door", "text", "two").unwrap();

        let mut translator = TileTranslator::new(map, table);
        translator.set_remap("Set1", "Set2");

        // Set1 has its own entry for "door" but the remap wins.
        assert_eq!(
            translator.translate(0, 0, 0, Some("text")).unwrap(),
            Some("two")
        );
    }

    #[test]
    fn test_remap_is_not_chained() {
        let mut map = TileMap::new("test");
        let mut layer = TileLayer::new(1, 1);
        layer.set_tile(0, 0, TileRef::new("Set1", "door"));
        map.add_layer(layer);

        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Set2", "door", "text", "two").unwrap();
        table.add_value("Set3", "door", "text", "three").unwrap();

        let mut translator = TileTranslator::new(map, table);
        translator.set_remap("Set1", "Set2");
        translator.set_remap("Set2", "Set3");

        // One hop only: Set1 -> Set2, not Set1 -> Set2 -> Set3.
        assert_eq!(
            translator.translate(0, 0, 0, Some("text")).unwrap(),
            Some("two")
        );
    }

    #[test]
    fn test_table_remaps_are_picked_up() {
        let mut map = TileMap::new("test");
        let mut layer = TileLayer::new(1, 1);
        layer.set_tile(0, 0, TileRef::new("Set1", "door"));
        map.add_layer(layer);

        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Set2", "door", "text", "two").unwrap();
        table.add_remap("Set1", "Set2").unwrap();

        let translator = TileTranslator::new(map, table);
        assert_eq!(
            translator.translate(0, 0, 0, Some("text")).unwrap(),
            Some("two")
        );
    }

    #[test]
    fn test_empty_cell_is_no_data() {
        let mut map = TileMap::new("test");
        map.add_layer(TileLayer::new(2, 2));
        let table = TranslationTable::new("test", "0.1");

        let translator = TileTranslator::new(map, table);
        assert_eq!(translator.translate(0, 1, 1, Some("text")).unwrap(), None);
    }

    #[test]
    fn test_out_of_bounds() {
        let translator = sample_translator();

        assert!(matches!(
            translator.translate(1, 0, 0, Some("text")),
            Err(TilecastError::LayerOutOfBounds { .. })
        ));
        assert!(matches!(
            translator.translate(0, 2, 0, Some("text")),
            Err(TilecastError::CoordinateOutOfBounds { axis: 'x', .. })
        ));
        assert!(matches!(
            translator.translate(0, 0, 1, Some("text")),
            Err(TilecastError::CoordinateOutOfBounds { axis: 'y', .. })
        ));
    }

    #[test]
    fn test_missing_translation_type() {
        let translator = sample_translator();
        let result = translator.translate(0, 0, 0, Some("scene"));
        assert!(matches!(
            result,
            Err(TilecastError::MissingTranslationType { .. })
        ));
    }

    #[test]
    fn test_translation_type_configuration() {
        let mut translator = sample_translator();

        // Neither configured nor passed: a configuration error.
        assert!(matches!(
            translator.translate(0, 0, 0, None),
            Err(TilecastError::TranslationTypeNotSet)
        ));

        translator.set_translation_type("text");
        assert_eq!(translator.translate(0, 0, 0, None).unwrap(), Some("W"));

        // An explicit type overrides the configured one.
        assert!(matches!(
            translator.translate(0, 0, 0, Some("scene")),
            Err(TilecastError::MissingTranslationType { .. })
        ));
    }

    #[test]
    fn test_layer_dimensions() {
        let translator = sample_translator();
        assert_eq!(translator.layer_count(), 1);
        assert_eq!(translator.layer_width(0).unwrap(), 2);
        assert_eq!(translator.layer_height(0).unwrap(), 1);
        assert!(translator.layer_width(3).is_err());
    }
}
