//! `reportsplit_io_fs` v1:
//! Rust-side output path helpers.
//!
//! - `spec` : constants and errors
//! - `util` : source/output path derivation, unique naming, worker limits

pub mod spec;
mod util;

pub use spec::{C_ENTITY_KEY_FALLBACK, C_OUTPUT_DIR_SUFFIX, OutputPathError};
pub use util::{
    calculate_worker_limit, derive_base_name, derive_output_dir, derive_unique_output_path,
    ensure_output_dir, resolve_source_path, sanitize_entity_key,
};
