use miette::Diagnostic;
use thiserror::Error;

use crate::dirconv::ConflictEntry;

/// Main error type for tilecast operations
#[derive(Error, Diagnostic, Debug)]
pub enum TilecastError {
    #[error("IO error: {0}")]
    #[diagnostic(code(tilecast::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tilecast::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(tilecast::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(tilecast::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Translation table error: {message}")]
    #[diagnostic(code(tilecast::table))]
    Table {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Registration path is empty")]
    #[diagnostic(
        code(tilecast::registry::empty_path),
        help("handler paths need at least one segment, e.g. [\"terminal\"]")
    )]
    EmptyPath,

    #[error("Registration error: {message}")]
    #[diagnostic(code(tilecast::registry::registration))]
    Registration { message: String },

    /// Raised when a clobber event occurred and either side escalated.
    /// Both entry names are carried so neither escalation is lost when
    /// both flags fire on the same registration.
    #[error("Handler {new} clobbered handler {existing}")]
    #[diagnostic(code(tilecast::registry::clobber))]
    Clobber {
        new: String,
        existing: String,
        new_escalated: bool,
        existing_escalated: bool,
    },

    #[error("Full path required for handler {name}")]
    #[diagnostic(
        code(tilecast::registry::incomplete_path),
        help("register a handler at every intermediate path segment")
    )]
    IncompletePath { name: String },

    #[error("Layer index out of bounds. Layer index is too large. layer: {layer} layers: {layers}")]
    #[diagnostic(code(tilecast::translate::bounds))]
    LayerOutOfBounds { layer: usize, layers: usize },

    #[error("{axis} coordinate out of bounds. {axis} is too large. {axis}: {value} layer: {layer}")]
    #[diagnostic(code(tilecast::translate::bounds))]
    CoordinateOutOfBounds {
        axis: char,
        value: usize,
        layer: usize,
    },

    #[error(
        "Missing tile translation. Tile name: {tile} Set name: {tileset} Remap: {} Default tiles enabled: {defaults_enabled}",
        .remap.as_deref().unwrap_or("none")
    )]
    #[diagnostic(code(tilecast::translate::missing))]
    MissingTranslation {
        tile: String,
        tileset: String,
        remap: Option<String>,
        defaults_enabled: bool,
    },

    #[error(
        "Translation not specified for tile. Translation type: {translation_type} Tile name: {tile} Set name: {tileset} Remap: {} Default tiles enabled: {defaults_enabled}",
        .remap.as_deref().unwrap_or("none")
    )]
    #[diagnostic(code(tilecast::translate::missing_type))]
    MissingTranslationType {
        translation_type: String,
        tile: String,
        tileset: String,
        remap: Option<String>,
        defaults_enabled: bool,
    },

    #[error("Translation type is not set")]
    #[diagnostic(
        code(tilecast::translate::no_type),
        help("pass a translation type to translate() or configure one with set_translation_type()")
    )]
    TranslationTypeNotSet,

    #[error("Unsupported environment. Environment: {environment}")]
    #[diagnostic(code(tilecast::dispatch::environment))]
    UnsupportedEnvironment { environment: String },

    #[error(
        "Unsupported translation type for environment. Environment: {environment} Translation type: {translation_type}"
    )]
    #[diagnostic(code(tilecast::dispatch::translation_type))]
    UnsupportedTranslationType {
        environment: String,
        translation_type: String,
    },

    #[error("Problem translating tile. layer: {layer}, x: {x}, y: {y}")]
    #[diagnostic(code(tilecast::place::translation))]
    Translation {
        layer: usize,
        x: usize,
        y: usize,
        #[source]
        source: Box<TilecastError>,
    },

    #[error("Problem placing tile. layer: {layer}, x: {x}, y: {y}")]
    #[diagnostic(code(tilecast::place::placement))]
    Placement {
        layer: usize,
        x: usize,
        y: usize,
        #[source]
        source: Box<TilecastError>,
    },

    #[error("Problem setting up environment: {message}")]
    #[diagnostic(code(tilecast::place::environment))]
    Environment { message: String },

    #[error("Conflicting tile translations. {} conflicting entries found", .conflicts.len())]
    #[diagnostic(
        code(tilecast::dirconv::conflict),
        help("two or more files map to the same tile name within one tileset and translation type")
    )]
    ConflictingTranslations { conflicts: Vec<ConflictEntry> },
}

pub type Result<T> = std::result::Result<T, TilecastError>;
