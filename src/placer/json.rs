//! Json environment: placements as structured records.
//!
//! Each placed tile becomes one record carrying its map coordinates, the
//! translation value, and the stepped position (x and z grow positive, y
//! grows negative, layers stack along z - the usual scene convention).

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, TilecastError};
use crate::placer::{EnvironmentHandler, PlacementHandler, PlacerConfig};
use crate::registry::RegistryEntry;

/// One placed tile in the json output.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementRecord {
    pub layer: usize,
    pub x: usize,
    pub y: usize,
    pub value: String,
    pub position: [f64; 3],
}

/// Environment handler for json output. Save writes the placer's teardown
/// token (the serialized record list) to a file.
#[derive(Debug, Default)]
pub struct JsonEnvironment;

impl JsonEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl RegistryEntry for JsonEnvironment {
    fn name(&self) -> &str {
        "JsonEnvironment"
    }
}

impl EnvironmentHandler for JsonEnvironment {
    fn setup(&mut self) -> Result<Option<String>> {
        Ok(None)
    }

    fn save(&self, path: &Path, token: Option<&str>) -> Result<()> {
        fs::write(path, token.unwrap_or("[]")).map_err(|e| TilecastError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to save placement output: {}", e),
        })
    }

    fn teardown(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Placer that collects structured placement records and returns them as a
/// JSON document token.
#[derive(Debug, Default)]
pub struct JsonPlacer {
    config: PlacerConfig,
    records: Vec<PlacementRecord>,
}

impl JsonPlacer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryEntry for JsonPlacer {
    fn name(&self) -> &str {
        "JsonPlacer"
    }
}

impl PlacementHandler for JsonPlacer {
    fn setup(&mut self, _token: Option<&str>) -> Result<()> {
        self.records.clear();
        Ok(())
    }

    fn set_steps(&mut self, x: f64, y: f64, z: f64) {
        self.config.steps = (x, y, z);
    }

    fn set_use_link(&mut self, use_link: bool) {
        self.config.use_link = use_link;
    }

    fn set_working_directory(&mut self, path: &Path) {
        self.config.working_directory = path.to_path_buf();
    }

    fn place_tile(&mut self, layer: usize, x: usize, y: usize, value: &str) -> Result<()> {
        let (step_x, step_y, step_z) = self.config.steps;
        self.records.push(PlacementRecord {
            layer,
            x,
            y,
            value: value.to_string(),
            position: [
                step_x * x as f64,
                -(step_y * y as f64),
                step_z * layer as f64,
            ],
        });
        Ok(())
    }

    fn teardown(&mut self) -> Result<Option<String>> {
        let document =
            serde_json::to_string_pretty(&self.records).map_err(|e| TilecastError::Parse {
                message: format!("Failed to serialize placement records: {}", e),
                help: None,
            })?;
        Ok(Some(document))
    }
}
