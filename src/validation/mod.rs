//! Validation for tile maps against translation tables.
//!
//! Runs a suite of checks over a (map, table) pair and reports errors and
//! warnings without running a placement. Used by `tilecast check`.
//!
//! Unresolvable tiles are errors - the same lookup would abort a placement
//! run. Table sections nothing in the map can reach are warnings.

mod checks;
mod diagnostic;

pub use diagnostic::{Diagnostic, Severity, ValidationResult};

use crate::translator::{TileMap, TranslationTable};

/// Settings for one validation pass.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Translation type every tile must supply, if one is requested.
    pub translation_type: Option<String>,
    /// Whether the defaults section counts as a fallback.
    pub defaults_enabled: bool,
}

/// Run all checks over a map and table.
pub fn validate(map: &TileMap, table: &TranslationTable, options: &CheckOptions) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_remap_targets(table));
    result.merge(checks::check_shadowed_remaps(table));
    result.merge(checks::check_tile_translations(map, table, options));
    result.merge(checks::check_unused_tilesets(map, table));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult) {
    for diagnostic in result.iter() {
        eprintln!(
            "  {}[{}]: {}",
            diagnostic.severity, diagnostic.code, diagnostic.message
        );
        if let Some(help) = &diagnostic.help {
            eprintln!("    help: {}", help);
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        eprintln!("Check failed: {} error(s), {} warning(s)", errors, warnings);
    } else if warnings > 0 {
        eprintln!("Check passed ({} warning(s))", warnings);
    } else {
        eprintln!("Check passed.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{TileLayer, TileRef};

    fn sample_map() -> TileMap {
        let mut map = TileMap::new("test");
        let mut layer = TileLayer::new(2, 1);
        layer.set_tile(0, 0, TileRef::new("Tiles1", "wall"));
        layer.set_tile(1, 0, TileRef::new("Tiles1", "grass"));
        map.add_layer(layer);
        map
    }

    #[test]
    fn test_complete_table_passes() {
        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Tiles1", "wall", "text", "W").unwrap();
        table.add_value("Tiles1", "grass", "text", "G").unwrap();

        let result = validate(&sample_map(), &table, &CheckOptions::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_missing_translation_is_an_error() {
        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Tiles1", "wall", "text", "W").unwrap();

        let result = validate(&sample_map(), &table, &CheckOptions::default());
        assert!(result.has_errors());
    }

    #[test]
    fn test_defaults_satisfy_when_enabled() {
        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Tiles1", "wall", "text", "W").unwrap();
        table.add_default_value("grass", "text", "G").unwrap();

        let strict = validate(&sample_map(), &table, &CheckOptions::default());
        assert!(strict.has_errors());

        let with_defaults = validate(
            &sample_map(),
            &table,
            &CheckOptions {
                defaults_enabled: true,
                ..Default::default()
            },
        );
        assert!(!with_defaults.has_errors());
    }

    #[test]
    fn test_requested_type_must_exist() {
        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Tiles1", "wall", "text", "W").unwrap();
        table.add_value("Tiles1", "grass", "text", "G").unwrap();

        let result = validate(
            &sample_map(),
            &table,
            &CheckOptions {
                translation_type: Some("scene".to_string()),
                defaults_enabled: false,
            },
        );
        assert!(result.has_errors());
    }

    #[test]
    fn test_unused_tileset_is_a_warning() {
        let mut table = TranslationTable::new("test", "0.1");
        table.add_value("Tiles1", "wall", "text", "W").unwrap();
        table.add_value("Tiles1", "grass", "text", "G").unwrap();
        table.add_value("Nowhere", "thing", "text", "T").unwrap();

        let result = validate(&sample_map(), &table, &CheckOptions::default());
        assert!(!result.has_errors());
        assert!(result.has_warnings());
    }
}
