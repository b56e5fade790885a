//! Output path models and top-level error types.

use std::path::PathBuf;

use thiserror::Error;

/// Characters replaced when an entity key becomes a file name.
pub const TUP_FILE_NAME_ILLEGAL: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
/// Fallback file stem for keys that sanitize to nothing.
pub const C_ENTITY_KEY_FALLBACK: &str = "entity";
/// Suffix appended to the source base name to form the output directory.
pub const C_OUTPUT_DIR_SUFFIX: &str = "_output";

/// Output directory / destination path failures.
#[derive(Debug, Error)]
pub enum OutputPathError {
    /// Output directory could not be created.
    #[error("Failed to create output directory {}: {message}", path.display())]
    CreateDir {
        /// Directory path that failed initialization.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },

    /// Existing path could not be inspected or has the wrong type.
    #[error("Failed to inspect output path {}: {message}", path.display())]
    Inspect {
        /// Inspected path.
        path: PathBuf,
        /// Reason text.
        message: String,
    },
}
