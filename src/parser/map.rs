//! Tile-map document parsing.
//!
//! Maps are YAML documents declaring tilesets (a gid -> tile-name mapping)
//! and layers (declared dimensions plus a row-major gid grid, where gid 0
//! means "no tile here"):
//!
//! ```yaml
//! name: overworld
//! tilesets:
//!   - name: Tiles1
//!     tiles:
//!       3: wall
//!       7: grass
//! layers:
//!   - width: 2
//!     height: 1
//!     grid:
//!       - [3, 7]
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TilecastError};
use crate::translator::{TileLayer, TileMap, TileRef};

#[derive(Debug, Deserialize)]
struct RawMap {
    name: String,
    #[serde(default)]
    tilesets: Vec<RawTileset>,
    #[serde(default)]
    layers: Vec<RawLayer>,
}

#[derive(Debug, Deserialize)]
struct RawTileset {
    name: String,
    #[serde(default)]
    tiles: BTreeMap<u32, String>,
}

#[derive(Debug, Deserialize)]
struct RawLayer {
    width: usize,
    height: usize,
    #[serde(default)]
    grid: Vec<Vec<u32>>,
}

/// Parse a tile-map document.
pub fn parse_map(source: &str) -> Result<TileMap> {
    let raw: RawMap = serde_yaml::from_str(source).map_err(|e| TilecastError::Parse {
        message: format!("Malformed tile map: {}", e),
        help: None,
    })?;

    // Flatten the tilesets into one gid lookup. A gid claimed twice is a
    // document error, not a silent override.
    let mut tiles: HashMap<u32, TileRef> = HashMap::new();
    for tileset in &raw.tilesets {
        if tileset.name.is_empty() {
            return Err(TilecastError::Parse {
                message: "Malformed tileset. Missing name property.".to_string(),
                help: None,
            });
        }
        for (gid, tile_name) in &tileset.tiles {
            if *gid == 0 {
                return Err(TilecastError::Parse {
                    message: format!(
                        "Malformed tileset {}. gid 0 is reserved for empty cells.",
                        tileset.name
                    ),
                    help: None,
                });
            }
            if tiles
                .insert(*gid, TileRef::new(tileset.name.as_str(), tile_name.as_str()))
                .is_some()
            {
                return Err(TilecastError::Parse {
                    message: format!("Malformed tilesets. Duplicate gid: {}", gid),
                    help: None,
                });
            }
        }
    }

    let mut map = TileMap::new(raw.name.as_str());
    for (index, raw_layer) in raw.layers.iter().enumerate() {
        let mut layer = TileLayer::new(raw_layer.width, raw_layer.height);

        if raw_layer.grid.len() > raw_layer.height {
            return Err(TilecastError::Parse {
                message: format!(
                    "Malformed layer {}. Grid has {} rows but height is {}.",
                    index,
                    raw_layer.grid.len(),
                    raw_layer.height
                ),
                help: None,
            });
        }

        for (y, row) in raw_layer.grid.iter().enumerate() {
            if row.len() > raw_layer.width {
                return Err(TilecastError::Parse {
                    message: format!(
                        "Malformed layer {}. Row {} has {} cells but width is {}.",
                        index,
                        y,
                        row.len(),
                        raw_layer.width
                    ),
                    help: None,
                });
            }

            for (x, gid) in row.iter().enumerate() {
                if *gid == 0 {
                    continue;
                }
                let tile = tiles.get(gid).ok_or_else(|| TilecastError::Parse {
                    message: format!("Malformed tilemap. Unknown gid: {}", gid),
                    help: Some("declare every non-zero gid in a tileset".to_string()),
                })?;
                layer.set_tile(x, y, tile.clone());
            }
        }

        map.add_layer(layer);
    }

    Ok(map)
}

/// Tile names declared by one tileset section of a map document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetNames {
    pub tileset: String,
    pub names: Vec<String>,
}

/// Extract the tile names each tileset section declares, in gid order.
///
/// Unlike [`parse_map`], names declared but never placed in a layer are
/// included, and duplicate names within a tileset are preserved - the names
/// report counts on them.
pub fn parse_map_tilesets(source: &str) -> Result<Vec<TilesetNames>> {
    let raw: RawMap = serde_yaml::from_str(source).map_err(|e| TilecastError::Parse {
        message: format!("Malformed tile map: {}", e),
        help: None,
    })?;

    Ok(raw
        .tilesets
        .into_iter()
        .map(|tileset| TilesetNames {
            tileset: tileset.name,
            names: tileset.tiles.into_values().collect(),
        })
        .collect())
}

/// Load and parse a tile-map document from a file.
pub fn load_map(path: &Path) -> Result<TileMap> {
    let source = fs::read_to_string(path).map_err(|e| TilecastError::Io {
        path: path.to_path_buf(),
        message: format!("Problem opening tile map: {}", e),
    })?;
    parse_map(&source)
}
