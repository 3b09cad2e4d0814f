//! Terminal environment: placements as printed lines of text.

use std::fs;
use std::path::Path;

use crate::error::{Result, TilecastError};
use crate::placer::{EnvironmentHandler, PlacementHandler, PlacerConfig};
use crate::registry::RegistryEntry;

/// Environment handler for plain text output. Setup and teardown are no-ops;
/// save writes the placer's teardown token to a file.
#[derive(Debug, Default)]
pub struct TerminalEnvironment;

impl TerminalEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl RegistryEntry for TerminalEnvironment {
    fn name(&self) -> &str {
        "TerminalEnvironment"
    }
}

impl EnvironmentHandler for TerminalEnvironment {
    fn setup(&mut self) -> Result<Option<String>> {
        Ok(None)
    }

    fn save(&self, path: &Path, token: Option<&str>) -> Result<()> {
        fs::write(path, token.unwrap_or_default()).map_err(|e| TilecastError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to save placement output: {}", e),
        })
    }

    fn teardown(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Placer that prints one line per placed tile and collects the lines as its
/// teardown token.
#[derive(Debug, Default)]
pub struct TerminalPlacer {
    config: PlacerConfig,
    placed: Vec<String>,
}

impl TerminalPlacer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryEntry for TerminalPlacer {
    fn name(&self) -> &str {
        "TerminalPlacer"
    }
}

impl PlacementHandler for TerminalPlacer {
    fn setup(&mut self, _token: Option<&str>) -> Result<()> {
        self.placed.clear();
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
        let line = format!("layer: {} x: {} y: {} data: {}", layer, x, y, value);
        println!("{}", line);
        self.placed.push(line);
        Ok(())
    }

    fn teardown(&mut self) -> Result<Option<String>> {
        Ok(Some(self.placed.join("\n")))
    }
}
