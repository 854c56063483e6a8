use std::path::PathBuf;

/// Errors that abort a line list build.
#[derive(Debug, thiserror::Error)]
pub enum LineListError {
    /// Input directory missing, unreadable, or without matching files
    #[error("No line list files found in {}: {reason}", .dir.display())]
    Discovery { dir: PathBuf, reason: String },

    /// The merger was handed nothing to stack
    #[error("No tables to merge")]
    EmptyInput,

    /// A file failed both the delimited and the fixed-width strategy
    #[error(
        "Failed to parse {}: delimited parse failed ({delimited}); \
         fixed-width parse failed ({fixed_width})",
        .path.display()
    )]
    Parse {
        path: PathBuf,
        delimited: String,
        fixed_width: String,
    },

    /// Per-file tables disagree on their columns
    #[error("Schema mismatch in {source_name}: expected columns {expected:?}, found {found:?}")]
    SchemaMismatch {
        source_name: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Raw intensity could not be reduced to an integer
    #[error("Row {row} of {source_name}: intensity '{raw}' is not an integer after stripping strength codes")]
    Transform {
        source_name: String,
        row: usize,
        raw: String,
    },

    /// Output could not be written
    #[error("Failed to write {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },

    /// Combined CSV could not be read back
    #[error("Failed to read {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    /// Config file unreadable or invalid
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LineListError>;
