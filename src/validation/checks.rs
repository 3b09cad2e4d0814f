//! Validation checks over a map and translation table.
//!
//! Each check returns a `ValidationResult`; the orchestrator in `mod.rs`
//! merges them.

use std::collections::HashSet;

use super::diagnostic::{Diagnostic, ValidationResult};
use super::CheckOptions;
use crate::translator::{TileMap, TranslationTable};

/// Remap targets must have a section in the table.
pub fn check_remap_targets(table: &TranslationTable) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (from, to) in table.remaps() {
        if table.tileset_names().iter().all(|name| name != to) {
            result.push(
                Diagnostic::error(
                    "tilecast::check::remap-target",
                    format!("remap {} -> {} points at a tileset with no entries", from, to),
                )
                .with_help(format!("add a tilesets section named {}", to)),
            );
        }
    }

    result
}

/// A remapped tileset's own entries are unreachable.
pub fn check_shadowed_remaps(table: &TranslationTable) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (from, to) in table.remaps() {
        if table.tileset_names().iter().any(|name| name == from) {
            result.push(Diagnostic::warning(
                "tilecast::check::shadowed-remap",
                format!(
                    "tileset {} has entries of its own but is remapped to {}; they will never be used",
                    from, to
                ),
            ));
        }
    }

    result
}

/// Every recorded tile must resolve, through remap and (optionally) the
/// defaults section, to a value set - and to the requested translation type
/// when one is given.
pub fn check_tile_translations(
    map: &TileMap,
    table: &TranslationTable,
    options: &CheckOptions,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut reported: HashSet<(String, String)> = HashSet::new();

    for (layer_index, layer) in map.layers().iter().enumerate() {
        for (&(x, y), tile) in layer.tiles() {
            // One diagnostic per distinct (tileset, tile), not per cell.
            if !reported.insert((tile.tileset.clone(), tile.name.clone())) {
                continue;
            }

            let effective = table.remap(&tile.tileset).unwrap_or(&tile.tileset);
            let values = table.tileset_values(effective, &tile.name).or_else(|| {
                options
                    .defaults_enabled
                    .then(|| table.default_values(&tile.name))
                    .flatten()
            });

            match values {
                None => {
                    result.push(Diagnostic::error(
                        "tilecast::check::missing-translation",
                        format!(
                            "tile {} (tileset {}, first seen at layer {} x {} y {}) has no translation",
                            tile.name, tile.tileset, layer_index, x, y
                        ),
                    ));
                }
                Some(values) => {
                    if let Some(translation_type) = &options.translation_type {
                        if !values.contains_key(translation_type) {
                            result.push(Diagnostic::error(
                                "tilecast::check::missing-type",
                                format!(
                                    "tile {} (tileset {}) has no {} translation",
                                    tile.name, tile.tileset, translation_type
                                ),
                            ));
                        }
                    }
                }
            }
        }
    }

    result
}

/// Table sections no map tile can reach.
pub fn check_unused_tilesets(map: &TileMap, table: &TranslationTable) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut reachable: HashSet<&str> = HashSet::new();
    for layer in map.layers() {
        for (_, tile) in layer.tiles() {
            reachable.insert(table.remap(&tile.tileset).unwrap_or(&tile.tileset));
        }
    }
    // Remap targets stay reachable even when no tile currently lands there.
    for to in table.remaps().values() {
        reachable.insert(to);
    }

    for tileset in table.tileset_names() {
        if !reachable.contains(tileset) {
            result.push(Diagnostic::warning(
                "tilecast::check::unused-tileset",
                format!("tileset {} is never referenced by the map", tileset),
            ));
        }
    }

    result
}
