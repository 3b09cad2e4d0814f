//! Tile-map model: named layers of sparse tile references.
//!
//! Layers carry declared dimensions alongside a sparse cell mapping - a
//! coordinate with no tile means "nothing here", not an error. Construction
//! happens in the parser layer; during translation the map is read-only.

use std::collections::HashMap;

/// A tile reference: the tileset a tile came from and its name there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRef {
    /// Name of the owning tileset.
    pub tileset: String,
    /// Tile name within the tileset.
    pub name: String,
}

impl TileRef {
    /// Create a new tile reference.
    pub fn new(tileset: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tileset: tileset.into(),
            name: name.into(),
        }
    }
}

/// One layer of a tile map.
#[derive(Debug, Clone)]
pub struct TileLayer {
    width: usize,
    height: usize,
    tiles: HashMap<(usize, usize), TileRef>,
}

impl TileLayer {
    /// Create an empty layer with the declared dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: HashMap::new(),
        }
    }

    /// Layer width in tiles.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Layer height in tiles.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Record a tile at (x, y), replacing any previous record there.
    pub fn set_tile(&mut self, x: usize, y: usize, tile: TileRef) {
        self.tiles.insert((x, y), tile);
    }

    /// Get the tile recorded at (x, y), if any.
    pub fn tile(&self, x: usize, y: usize) -> Option<&TileRef> {
        self.tiles.get(&(x, y))
    }

    /// Number of recorded tiles (not cells).
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Iterate over recorded tiles as ((x, y), tile).
    pub fn tiles(&self) -> impl Iterator<Item = (&(usize, usize), &TileRef)> {
        self.tiles.iter()
    }
}

/// A parsed tile map: an ordered list of layers.
#[derive(Debug, Clone)]
pub struct TileMap {
    name: String,
    layers: Vec<TileLayer>,
}

impl TileMap {
    /// Create an empty map.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: Vec::new(),
        }
    }

    /// Map name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a layer.
    pub fn add_layer(&mut self, layer: TileLayer) {
        self.layers.push(layer);
    }

    /// Number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Get a layer by index.
    pub fn layer(&self, index: usize) -> Option<&TileLayer> {
        self.layers.get(index)
    }

    /// All layers, bottom first.
    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }
}
