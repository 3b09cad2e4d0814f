//! CSV rendering of translation tables.
//!
//! The layout is sectioned: the `DEFAULTS` section first, then one section
//! per tileset, separated by blank rows. Each section opens with a header
//! row naming the section and the sorted translation types it uses, followed
//! by one row per tile (sorted by name) with a value cell per type:
//!
//! ```csv
//! DEFAULTS,text
//! grass,G
//!
//! Tiles1,scene,text
//! wall,objects/wall.glb,W
//! ```
//!
//! Cells are written unquoted, so values containing commas do not survive
//! this format; use the YAML form for those. Remap declarations have no CSV
//! representation.

use crate::error::{Result, TilecastError};
use crate::translator::TranslationTable;

/// Render a table in the sectioned CSV layout.
pub fn table_to_csv(table: &TranslationTable) -> String {
    let mut rows: Vec<String> = Vec::new();

    let default_types = table.default_translation_types();
    rows.push(header_row("DEFAULTS", &default_types));
    for tile in table.default_tile_names() {
        rows.push(tile_row(tile, table.default_values(tile), &default_types));
    }

    for tileset in table.tileset_names() {
        let types = table.translation_types_for(tileset);
        rows.push(String::new());
        rows.push(header_row(tileset, &types));
        for tile in table.tile_names(tileset) {
            rows.push(tile_row(tile, table.tileset_values(tileset, tile), &types));
        }
    }

    let mut output = rows.join("\n");
    output.push('\n');
    output
}

/// Parse the sectioned CSV layout back into a table.
pub fn table_from_csv(source: &str) -> Result<TranslationTable> {
    let mut table = TranslationTable::default();
    let mut header: Option<Vec<String>> = None;

    for line in source.lines() {
        let cells: Vec<&str> = line.trim_end_matches('\r').split(',').collect();

        if cells.iter().all(|cell| cell.is_empty()) {
            header = None;
            continue;
        }

        match &header {
            None => {
                header = Some(cells.iter().map(|c| c.to_string()).collect());
            }
            Some(section) => {
                let tile = cells[0];
                if tile.is_empty() {
                    return Err(TilecastError::Parse {
                        message: "Malformed CSV translation table. Row with no tile name."
                            .to_string(),
                        help: None,
                    });
                }

                for (column, value) in cells.iter().enumerate().skip(1) {
                    if value.is_empty() {
                        continue;
                    }
                    let translation_type =
                        section.get(column).ok_or_else(|| TilecastError::Parse {
                            message: format!(
                                "Malformed CSV translation table. Row for tile {} has more cells than its section header.",
                                tile
                            ),
                            help: None,
                        })?;

                    if section[0] == "DEFAULTS" {
                        table.add_default_value(tile, translation_type, value)?;
                    } else {
                        table.add_value(&section[0], tile, translation_type, value)?;
                    }
                }
            }
        }
    }

    Ok(table)
}

fn header_row(section: &str, types: &[&str]) -> String {
    let mut cells = vec![section.to_string()];
    cells.extend(types.iter().map(|t| t.to_string()));
    cells.join(",")
}

fn tile_row(
    tile: &str,
    values: Option<&crate::translator::ValueSet>,
    types: &[&str],
) -> String {
    let mut cells = vec![tile.to_string()];
    for translation_type in types {
        let value = values
            .and_then(|values| values.get(*translation_type))
            .map(|v| v.as_str())
            .unwrap_or("");
        cells.push(value.to_string());
    }
    cells.join(",")
}
