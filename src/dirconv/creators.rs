//! Built-in translation creators for directory conversion.

use std::path::{Component, Path, PathBuf};

use crate::error::Result;
use crate::registry::RegistryEntry;

/// Creates translation data from files found during a directory scan.
///
/// Returning `Ok(None)` means the file cannot be used for this environment
/// and translation type; the scan moves on without recording anything.
pub trait TranslationCreator: RegistryEntry {
    fn create_translation(
        &self,
        file: &Path,
        relative_dir: &Path,
        environment: &str,
        translation_type: &str,
    ) -> Result<Option<(String, String)>>;
}

/// Creator used when nothing more specific is registered: the tile name is
/// the file name up to its first dot, the value is the file's path relative
/// to the output directory.
#[derive(Debug, Default)]
pub struct RelativePathCreator;

impl RelativePathCreator {
    pub fn new() -> Self {
        Self
    }
}

impl RegistryEntry for RelativePathCreator {
    fn name(&self) -> &str {
        "RelativePathCreator"
    }
}

impl TranslationCreator for RelativePathCreator {
    fn create_translation(
        &self,
        file: &Path,
        relative_dir: &Path,
        _environment: &str,
        _translation_type: &str,
    ) -> Result<Option<(String, String)>> {
        let tile_name = match tile_name_for(file) {
            Some(name) => name,
            None => return Ok(None),
        };

        let value = relative_to(file, relative_dir).to_string_lossy().into_owned();
        Ok(Some((tile_name, value)))
    }
}

/// Creator for scene files: filters by extension and points the value at a
/// named object inside the file (`path#object`).
#[derive(Debug)]
pub struct SceneObjectCreator {
    extension: String,
}

impl SceneObjectCreator {
    /// Create a creator accepting files with the given extension (without
    /// the leading dot).
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl RegistryEntry for SceneObjectCreator {
    fn name(&self) -> &str {
        "SceneObjectCreator"
    }
}

impl TranslationCreator for SceneObjectCreator {
    fn create_translation(
        &self,
        file: &Path,
        relative_dir: &Path,
        _environment: &str,
        _translation_type: &str,
    ) -> Result<Option<(String, String)>> {
        let extension = file.extension().and_then(|e| e.to_str());
        if extension != Some(self.extension.as_str()) {
            return Ok(None);
        }

        let tile_name = match tile_name_for(file) {
            Some(name) => name,
            None => return Ok(None),
        };

        let relative = relative_to(file, relative_dir).to_string_lossy().into_owned();
        Ok(Some((tile_name.clone(), format!("{}#{}", relative, tile_name))))
    }
}

/// The file name up to its first dot.
fn tile_name_for(file: &Path) -> Option<String> {
    let file_name = file.file_name()?.to_str()?;
    let stem = file_name.split('.').next().unwrap_or(file_name);
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// `path` expressed relative to `base`, stepping up with `..` where needed.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_components: Vec<Component> = path.components().collect();
    let base_components: Vec<Component> = base.components().collect();

    let common = path_components
        .iter()
        .zip(base_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component);
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_creator() {
        let creator = RelativePathCreator::new();
        let result = creator
            .create_translation(
                Path::new("tables/Interior/text/door.txt"),
                Path::new("tables"),
                "default",
                "text",
            )
            .unwrap();

        assert_eq!(
            result,
            Some(("door".to_string(), "Interior/text/door.txt".to_string()))
        );
    }

    #[test]
    fn test_tile_name_stops_at_first_dot() {
        let creator = RelativePathCreator::new();
        let result = creator
            .create_translation(
                Path::new("tables/set/text/door.old.txt"),
                Path::new("tables"),
                "default",
                "text",
            )
            .unwrap();

        assert_eq!(result.map(|(name, _)| name), Some("door".to_string()));
    }

    #[test]
    fn test_relative_to_steps_up() {
        let relative = relative_to(Path::new("tables/set/door.txt"), Path::new("output/dist"));
        assert_eq!(relative, PathBuf::from("../../tables/set/door.txt"));
    }

    #[test]
    fn test_scene_object_creator_filters_extension() {
        let creator = SceneObjectCreator::new("glb");

        let skipped = creator
            .create_translation(
                Path::new("tables/set/scene/door.txt"),
                Path::new("tables"),
                "json",
                "sceneObject",
            )
            .unwrap();
        assert_eq!(skipped, None);

        let accepted = creator
            .create_translation(
                Path::new("tables/set/scene/door.glb"),
                Path::new("tables"),
                "json",
                "sceneObject",
            )
            .unwrap();
        assert_eq!(
            accepted,
            Some(("door".to_string(), "set/scene/door.glb#door".to_string()))
        );
    }
}
