//! Directory-to-translation-table conversion.
//!
//! Builds a [`TranslationTable`] from a directory tree. With the scanned
//! directory as the root, the first level names the tilesets (the reserved
//! `DEFAULTS` directory feeds the defaults section), the second level names
//! the translation types, and everything below is searched recursively for
//! files to hand to a [`TranslationCreator`]. Names starting with a dot are
//! skipped at every level.
//!
//! Creators are selected per translation-type directory through the shared
//! registry fallback chain with the global default key `"default"`.
//!
//! Two files mapping to the same tile name within one (tileset, type) pair
//! are a conflict. Scanning keeps going across all tilesets so the failure
//! reports every conflicting entry at once, and no table is returned.

mod creators;

pub use creators::{RelativePathCreator, SceneObjectCreator, TranslationCreator};

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, TilecastError};
use crate::registry::HandlerRegistry;
use crate::translator::TranslationTable;

/// Registry path segment creators fall back to when neither the exact
/// (environment, type) pair nor the environment-wide default is registered.
pub const DEFAULT_CREATOR_KEY: &str = "default";

/// Directory name feeding the defaults section instead of a tileset.
pub const DEFAULTS_DIR: &str = "DEFAULTS";

/// One conflicting tile translation found during a directory scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictEntry {
    pub tileset: String,
    pub tile: String,
    pub translation_type: String,
    pub value: String,
    pub path: PathBuf,
}

impl fmt::Display for ConflictEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tile set: {} Tile name: {} Translation type: {} File: {}",
            self.tileset,
            self.tile,
            self.translation_type,
            self.path.display()
        )
    }
}

/// One translation record produced while scanning a type directory.
#[derive(Debug)]
struct Scanned {
    tile: String,
    translation_type: String,
    value: String,
    path: PathBuf,
}

/// Settings for one directory conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory the table is created from.
    pub directory: PathBuf,
    /// Directory translation values are made relative to.
    pub relative_dir: PathBuf,
    /// Environment the table is targeted at.
    pub environment: String,
    /// Skip the DEFAULTS directory entirely.
    pub ignore_defaults: bool,
    /// Name recorded on the produced table.
    pub table_name: String,
    /// Version recorded on the produced table.
    pub table_version: String,
}

/// Builds translation tables from directory trees using registered creators.
pub struct DirectoryConverter {
    creators: HandlerRegistry<Box<dyn TranslationCreator>>,
}

impl Default for DirectoryConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryConverter {
    /// Create a converter with no creators registered.
    pub fn new() -> Self {
        Self {
            creators: HandlerRegistry::new(),
        }
    }

    /// Create a converter with the built-in creators registered: the
    /// relative-path creator as the global default and for the json
    /// environment, and the scene-object creator for json sceneObject
    /// translations.
    pub fn with_builtins() -> Result<Self> {
        let mut converter = Self::new();
        converter.register_creator(Box::new(RelativePathCreator::new()), &[DEFAULT_CREATOR_KEY])?;
        converter.register_creator(Box::new(RelativePathCreator::new()), &["json"])?;
        converter.register_creator(
            Box::new(SceneObjectCreator::new("glb")),
            &["json", "sceneObject"],
        )?;
        Ok(converter)
    }

    /// Register a creator at `[environment, translation-type]`,
    /// `[environment]`, or `["default"]`.
    pub fn register_creator(
        &mut self,
        creator: Box<dyn TranslationCreator>,
        path: &[&str],
    ) -> Result<bool> {
        self.creators.register(creator, path)
    }

    /// Environments with at least one registered creator.
    pub fn environments(&self) -> &[String] {
        self.creators.environments()
    }

    /// Build a translation table from a directory tree.
    pub fn convert(&self, options: &ConvertOptions) -> Result<TranslationTable> {
        let mut table =
            TranslationTable::new(options.table_name.as_str(), options.table_version.as_str());
        let mut conflicts: Vec<ConflictEntry> = Vec::new();

        let mut tileset_dirs = list_directories(&options.directory)?;
        tileset_dirs.sort();

        for tileset_dir in tileset_dirs {
            let tileset_name = match tileset_dir.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            let is_defaults = tileset_name == DEFAULTS_DIR;
            if is_defaults && options.ignore_defaults {
                continue;
            }

            let (translations, set_conflicts) =
                self.scan_tileset(&tileset_dir, &tileset_name, options)?;

            conflicts.extend(set_conflicts);

            // Once any conflict has surfaced, keep scanning for the full
            // report but stop committing entries.
            if conflicts.is_empty() {
                for entry in translations {
                    if is_defaults {
                        table.add_default_value(&entry.tile, &entry.translation_type, &entry.value)?;
                    } else {
                        table.add_value(
                            &tileset_name,
                            &entry.tile,
                            &entry.translation_type,
                            &entry.value,
                        )?;
                    }
                }
            }
        }

        if !conflicts.is_empty() {
            return Err(TilecastError::ConflictingTranslations { conflicts });
        }

        Ok(table)
    }

    fn scan_tileset(
        &self,
        tileset_dir: &Path,
        tileset_name: &str,
        options: &ConvertOptions,
    ) -> Result<(Vec<Scanned>, Vec<ConflictEntry>)> {
        let mut translations = Vec::new();
        let mut conflicts = Vec::new();

        let mut type_dirs = list_directories(tileset_dir)?;
        type_dirs.sort();

        for type_dir in type_dirs {
            let translation_type = match type_dir.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            let current = self.scan_type_directory(&type_dir, &translation_type, options)?;

            conflicts.extend(find_conflicts(&current, tileset_name));
            translations.extend(current);
        }

        Ok((translations, conflicts))
    }

    fn scan_type_directory(
        &self,
        type_dir: &Path,
        translation_type: &str,
        options: &ConvertOptions,
    ) -> Result<Vec<Scanned>> {
        let creator =
            self.creators
                .select(&options.environment, translation_type, DEFAULT_CREATOR_KEY)?;

        let mut entries = Vec::new();

        for entry in WalkDir::new(type_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_dot_name(e.path()))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }

            if let Some((tile, value)) = creator.create_translation(
                path,
                &options.relative_dir,
                &options.environment,
                translation_type,
            )? {
                entries.push(Scanned {
                    tile,
                    translation_type: translation_type.to_string(),
                    value,
                    path: path.to_path_buf(),
                });
            }
        }

        Ok(entries)
    }
}

/// Non-dot subdirectories of `directory`.
fn list_directories(directory: &Path) -> Result<Vec<PathBuf>> {
    let reader = std::fs::read_dir(directory).map_err(|e| TilecastError::Io {
        path: directory.to_path_buf(),
        message: format!("Problem opening directory: {}", e),
    })?;

    let mut directories = Vec::new();
    for entry in reader.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() && !is_dot_name(&path) {
            directories.push(path);
        }
    }

    Ok(directories)
}

fn is_dot_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

/// Every entry whose tile name occurs more than once in `entries`.
fn find_conflicts(entries: &[Scanned], tileset: &str) -> Vec<ConflictEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.tile.as_str()).or_default() += 1;
    }

    entries
        .iter()
        .filter(|entry| counts.get(entry.tile.as_str()).copied().unwrap_or(0) > 1)
        .map(|entry| ConflictEntry {
            tileset: tileset.to_string(),
            tile: entry.tile.clone(),
            translation_type: entry.translation_type.clone(),
            value: entry.value.clone(),
            path: entry.path.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn convert_options(root: &Path) -> ConvertOptions {
        ConvertOptions {
            directory: root.to_path_buf(),
            relative_dir: root.to_path_buf(),
            environment: "default".to_string(),
            ignore_defaults: false,
            table_name: "test".to_string(),
            table_version: "0.1".to_string(),
        }
    }

    #[test]
    fn test_convert_builds_table_from_tree() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Interior/text")).unwrap();
        fs::create_dir_all(dir.path().join("DEFAULTS/text")).unwrap();
        fs::write(dir.path().join("Interior/text/door.txt"), "").unwrap();
        fs::write(dir.path().join("DEFAULTS/text/grass.txt"), "").unwrap();

        let converter = DirectoryConverter::with_builtins().unwrap();
        let table = converter.convert(&convert_options(dir.path())).unwrap();

        assert_eq!(table.name(), "test");
        assert_eq!(
            table
                .tileset_values("Interior", "door")
                .and_then(|v| v.get("text"))
                .map(|v| v.as_str()),
            Some("Interior/text/door.txt")
        );
        assert_eq!(
            table
                .default_values("grass")
                .and_then(|v| v.get("text"))
                .map(|v| v.as_str()),
            Some("DEFAULTS/text/grass.txt")
        );
    }

    #[test]
    fn test_ignore_defaults_skips_defaults_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("DEFAULTS/text")).unwrap();
        fs::write(dir.path().join("DEFAULTS/text/grass.txt"), "").unwrap();

        let converter = DirectoryConverter::with_builtins().unwrap();
        let mut options = convert_options(dir.path());
        options.ignore_defaults = true;

        let table = converter.convert(&options).unwrap();
        assert!(table.default_values("grass").is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_dot_names_are_skipped() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Interior/text")).unwrap();
        fs::create_dir_all(dir.path().join(".git/text")).unwrap();
        fs::write(dir.path().join("Interior/text/door.txt"), "").unwrap();
        fs::write(dir.path().join("Interior/text/.hidden.txt"), "").unwrap();
        fs::write(dir.path().join(".git/text/blob.txt"), "").unwrap();

        let converter = DirectoryConverter::with_builtins().unwrap();
        let table = converter.convert(&convert_options(dir.path())).unwrap();

        assert_eq!(table.tileset_names(), vec!["Interior"]);
        assert_eq!(table.tile_names("Interior"), vec!["door"]);
    }

    #[test]
    fn test_conflicts_collect_every_entry_and_commit_nothing() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Interior/text/sub")).unwrap();
        fs::create_dir_all(dir.path().join("Exterior/text")).unwrap();
        fs::write(dir.path().join("Interior/text/door.txt"), "").unwrap();
        fs::write(dir.path().join("Interior/text/sub/door.txt"), "").unwrap();
        fs::write(dir.path().join("Exterior/text/tree.txt"), "").unwrap();

        let converter = DirectoryConverter::with_builtins().unwrap();
        let result = converter.convert(&convert_options(dir.path()));

        match result {
            Err(TilecastError::ConflictingTranslations { conflicts }) => {
                assert_eq!(conflicts.len(), 2);
                assert!(conflicts.iter().all(|c| c.tile == "door"));
                assert!(conflicts.iter().all(|c| c.tileset == "Interior"));
            }
            other => panic!("expected conflict error, got {:?}", other),
        }
    }

    #[test]
    fn test_same_tile_name_across_types_is_not_a_conflict() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Interior/text")).unwrap();
        fs::create_dir_all(dir.path().join("Interior/scene")).unwrap();
        fs::write(dir.path().join("Interior/text/door.txt"), "").unwrap();
        fs::write(dir.path().join("Interior/scene/door.txt"), "").unwrap();

        let converter = DirectoryConverter::with_builtins().unwrap();
        let table = converter.convert(&convert_options(dir.path())).unwrap();

        let values = table.tileset_values("Interior", "door").unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_missing_directory() {
        let converter = DirectoryConverter::with_builtins().unwrap();
        let result = converter.convert(&convert_options(Path::new("/nonexistent/path")));
        assert!(matches!(result, Err(TilecastError::Io { .. })));
    }
}
