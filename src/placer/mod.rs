//! Tile placement: turning translation values into output artifacts.
//!
//! A placement run pairs two kinds of handlers, both living in path-keyed
//! registries:
//!
//! - [`EnvironmentHandler`]s, registered at `[environment]`, own the target
//!   context: set it up, save the result, tear it down.
//! - [`PlacementHandler`]s, registered at `[environment, translation-type]`
//!   (or `[environment]` for an environment-wide default, or `["DEFAULT"]`),
//!   place one translated tile at a time.
//!
//! [`TilePlacer::place_tiles`] drives the run: environment setup, placer
//! selection through the registry's fallback chain, one translate/place step
//! per map cell, placer teardown, optional save, environment teardown. Any
//! per-tile failure aborts the run immediately - there is no partial commit.

mod json;
mod terminal;

pub use json::{JsonEnvironment, JsonPlacer};
pub use terminal::{TerminalEnvironment, TerminalPlacer};

use std::path::{Path, PathBuf};

use crate::error::{Result, TilecastError};
use crate::registry::{HandlerRegistry, RegistryEntry};
use crate::translator::TileTranslator;

/// Registry path segment placers fall back to when neither the exact
/// (environment, type) pair nor the environment-wide default is registered.
pub const DEFAULT_PLACER_KEY: &str = "DEFAULT";

/// Owns the target context a placement run writes into.
pub trait EnvironmentHandler: RegistryEntry {
    /// Prepare the environment. The returned token is handed to the selected
    /// placer's setup.
    fn setup(&mut self) -> Result<Option<String>>;

    /// Persist whatever the run produced. `token` is the placer's teardown
    /// token.
    fn save(&self, path: &Path, token: Option<&str>) -> Result<()>;

    /// Release the environment.
    fn teardown(&mut self) -> Result<()>;
}

/// Places translated tiles into an environment.
pub trait PlacementHandler: RegistryEntry {
    /// Prepare the placer with the environment's setup token.
    fn setup(&mut self, token: Option<&str>) -> Result<()>;

    /// Set the per-axis distance between adjacent tiles.
    fn set_steps(&mut self, x: f64, y: f64, z: f64);

    /// Link placed artifacts instead of copying, where the environment
    /// distinguishes the two.
    fn set_use_link(&mut self, use_link: bool);

    /// Directory that relative translation values resolve against.
    fn set_working_directory(&mut self, path: &Path);

    /// Place one translated tile.
    fn place_tile(&mut self, layer: usize, x: usize, y: usize, value: &str) -> Result<()>;

    /// Finish placement. The returned token is handed to the environment's
    /// save.
    fn teardown(&mut self) -> Result<Option<String>>;
}

/// Common placement settings shared by the built-in placers.
#[derive(Debug, Clone)]
pub struct PlacerConfig {
    pub steps: (f64, f64, f64),
    pub use_link: bool,
    pub working_directory: PathBuf,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            steps: (1.0, 1.0, 1.0),
            use_link: false,
            working_directory: PathBuf::from("."),
        }
    }
}

/// Settings for one placement run.
#[derive(Debug, Clone)]
pub struct PlacementOptions {
    /// Environment to place into.
    pub environment: String,
    /// Translation type to resolve tiles with.
    pub translation_type: String,
    /// Link artifacts instead of copying, where supported.
    pub use_link: bool,
    /// Directory relative translation values resolve against.
    pub working_directory: PathBuf,
    /// Per-axis distance between adjacent tiles.
    pub steps: (f64, f64, f64),
    /// Where to save the produced artifact, if anywhere.
    pub save_path: Option<PathBuf>,
}

impl PlacementOptions {
    /// Options with the default step, link, and directory settings.
    pub fn new(environment: impl Into<String>, translation_type: impl Into<String>) -> Self {
        let config = PlacerConfig::default();
        Self {
            environment: environment.into(),
            translation_type: translation_type.into(),
            use_link: config.use_link,
            working_directory: config.working_directory,
            steps: config.steps,
            save_path: None,
        }
    }
}

/// Runs placement over a translated tile map using registered handlers.
pub struct TilePlacer {
    environments: HandlerRegistry<Box<dyn EnvironmentHandler>>,
    placers: HandlerRegistry<Box<dyn PlacementHandler>>,
}

impl Default for TilePlacer {
    fn default() -> Self {
        Self::new()
    }
}

impl TilePlacer {
    /// Create a placer with no handlers registered.
    pub fn new() -> Self {
        Self {
            environments: HandlerRegistry::new(),
            placers: HandlerRegistry::new(),
        }
    }

    /// Create a placer with the built-in handlers registered: the terminal
    /// environment with its line-per-tile placer, and the json environment
    /// with its structured-record placer.
    pub fn with_builtins() -> Result<Self> {
        let mut placer = Self::new();
        placer.register_environment(Box::new(TerminalEnvironment::new()), &["terminal"])?;
        placer.register_environment(Box::new(JsonEnvironment::new()), &["json"])?;
        placer.register_placer(Box::new(TerminalPlacer::new()), &["terminal"])?;
        placer.register_placer(Box::new(JsonPlacer::new()), &["json"])?;
        Ok(placer)
    }

    /// Register an environment handler, normally at `[name]`.
    pub fn register_environment(
        &mut self,
        environment: Box<dyn EnvironmentHandler>,
        path: &[&str],
    ) -> Result<bool> {
        self.environments.register(environment, path)
    }

    /// Register a placement handler at `[environment, translation-type]`,
    /// `[environment]`, or `["DEFAULT"]`.
    ///
    /// A handler whose policy demands a full path needs every intermediate
    /// segment occupied on retrieval, so register the environment-wide
    /// default before exact (environment, type) placers.
    pub fn register_placer(
        &mut self,
        placer: Box<dyn PlacementHandler>,
        path: &[&str],
    ) -> Result<bool> {
        self.placers.register(placer, path)
    }

    /// Names of environments with a registered environment handler.
    pub fn environments(&self) -> &[String] {
        self.environments.environments()
    }

    /// Run placement over every tile of the translator's map.
    ///
    /// Returns the placer's teardown token. Configure the translator
    /// (defaults, remaps) before calling; the translation type always comes
    /// from `options`.
    pub fn place_tiles(
        &mut self,
        translator: &TileTranslator,
        options: &PlacementOptions,
    ) -> Result<Option<String>> {
        let environment = self
            .environments
            .get_mut(&[options.environment.as_str()])?
            .ok_or_else(|| TilecastError::UnsupportedEnvironment {
                environment: options.environment.clone(),
            })?;

        let setup_token = environment.setup()?;

        let placer = self.placers.select_mut(
            &options.environment,
            &options.translation_type,
            DEFAULT_PLACER_KEY,
        )?;

        placer.setup(setup_token.as_deref())?;
        let (step_x, step_y, step_z) = options.steps;
        placer.set_steps(step_x, step_y, step_z);
        placer.set_use_link(options.use_link);
        placer.set_working_directory(&options.working_directory);

        for layer in 0..translator.layer_count() {
            let height = translator.layer_height(layer)?;
            let width = translator.layer_width(layer)?;
            for y in 0..height {
                for x in 0..width {
                    let translation = translator
                        .translate(layer, x, y, Some(&options.translation_type))
                        .map_err(|source| TilecastError::Translation {
                            layer,
                            x,
                            y,
                            source: Box::new(source),
                        })?;

                    if let Some(value) = translation {
                        placer.place_tile(layer, x, y, value).map_err(|source| {
                            TilecastError::Placement {
                                layer,
                                x,
                                y,
                                source: Box::new(source),
                            }
                        })?;
                    }
                }
            }
        }

        let teardown_token = placer.teardown()?;

        if let Some(save_path) = &options.save_path {
            environment.save(save_path, teardown_token.as_deref())?;
        }

        environment.teardown()?;

        Ok(teardown_token)
    }
}
