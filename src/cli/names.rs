//! Names command implementation.
//!
//! Lists the tile names each tileset of a map document declares, sorted,
//! with a duplicates report. Duplicate names within a tileset are usually a
//! mistake - two gids pointing at the same translation entry.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, TilecastError};
use crate::parser::parse_map_tilesets;

/// List the tile names declared by a tile map's tilesets
#[derive(Args, Debug)]
pub struct NamesArgs {
    /// Tile map to read tilesets from
    pub map: PathBuf,

    /// Output in CSV format
    #[arg(long)]
    pub csv: bool,

    /// File to save the output to
    #[arg(long)]
    pub save: Option<PathBuf>,
}

pub fn run(args: NamesArgs) -> Result<()> {
    let source = fs::read_to_string(&args.map).map_err(|e| TilecastError::Io {
        path: args.map.clone(),
        message: format!("Problem opening tile map: {}", e),
    })?;

    let tilesets = parse_map_tilesets(&source)?;

    let mut sections: Vec<(String, Vec<String>)> = Vec::new();
    let mut duplicates: Vec<(String, String, usize)> = Vec::new();

    for tileset in tilesets {
        let mut names = tileset.names;
        names.sort();

        let mut index = 0;
        while index < names.len() {
            let run = names[index..].iter().take_while(|n| **n == names[index]).count();
            if run > 1 {
                duplicates.push((tileset.tileset.clone(), names[index].clone(), run));
            }
            index += run;
        }

        sections.push((tileset.tileset, names));
    }

    let output = if args.csv {
        render_csv(&sections, &duplicates)
    } else {
        render_text(&sections, &duplicates)
    };

    match &args.save {
        Some(save) => fs::write(save, output).map_err(|e| TilecastError::Io {
            path: save.clone(),
            message: format!("Problem saving file: {}", e),
        })?,
        None => print!("{}", output),
    }

    Ok(())
}

fn render_text(sections: &[(String, Vec<String>)], duplicates: &[(String, String, usize)]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (tileset, names) in sections {
        lines.push(tileset.clone());
        for name in names {
            lines.push(name.clone());
        }
        lines.push(String::new());
    }

    lines.push("DUPLICATES".to_string());
    for (tileset, name, count) in duplicates {
        lines.push(format!("{} {} {}", tileset, name, count));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn render_csv(sections: &[(String, Vec<String>)], duplicates: &[(String, String, usize)]) -> String {
    let mut rows: Vec<String> = Vec::new();

    for (tileset, names) in sections {
        rows.push(tileset.clone());
        for name in names {
            rows.push(name.clone());
        }
        rows.push(String::new());
    }

    rows.push("DUPLICATES".to_string());
    for (tileset, name, count) in duplicates {
        rows.push(format!("{},{},{}", tileset, name, count));
    }

    let mut output = rows.join("\n");
    output.push('\n');
    output
}
