//! Source/output path helpers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::spec::{
    C_ENTITY_KEY_FALLBACK, C_OUTPUT_DIR_SUFFIX, OutputPathError, TUP_FILE_NAME_ILLEGAL,
};

////////////////////////////////////////////////////////////////////////////////
// #region SourcePaths

/// Append `.{ext}` when `input` carries no extension.
pub fn resolve_source_path(input: &str, ext: &str) -> PathBuf {
    let path_input = PathBuf::from(input.trim());
    if path_input.extension().is_some() {
        return path_input;
    }
    let mut c_path = path_input.into_os_string();
    c_path.push(format!(".{ext}"));
    PathBuf::from(c_path)
}

/// Strip the extension, keeping any parent directories.
pub fn derive_base_name(path_source: &Path) -> PathBuf {
    path_source.with_extension("")
}

/// `<dir>/<stem>_output` next to the source file.
pub fn derive_output_dir(path_source: &Path) -> PathBuf {
    let mut c_path = derive_base_name(path_source).into_os_string();
    c_path.push(C_OUTPUT_DIR_SUFFIX);
    PathBuf::from(c_path)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OutputPaths

/// Make an entity key usable as a file stem.
pub fn sanitize_entity_key(key: &str) -> String {
    let c_key: String = key
        .trim()
        .chars()
        .map(|chr| {
            if TUP_FILE_NAME_ILLEGAL.contains(&chr) || chr.is_control() {
                '_'
            } else {
                chr
            }
        })
        .collect();
    let c_key = c_key.trim_matches('.').to_string();
    if c_key.is_empty() {
        return C_ENTITY_KEY_FALLBACK.to_string();
    }
    c_key
}

/// Pick `<dir>/<key>.<ext>`, else the first free `<dir>/<key>_<n>.<ext>` (n from 0).
pub fn derive_unique_output_path(
    path_dir_out: &Path,
    key: &str,
    ext: &str,
) -> Result<PathBuf, OutputPathError> {
    let c_stem = sanitize_entity_key(key);
    let path_candidate = path_dir_out.join(format!("{c_stem}.{ext}"));
    if !is_path_taken(&path_candidate)? {
        return Ok(path_candidate);
    }

    let mut n_idx = 0usize;
    loop {
        let path_candidate = path_dir_out.join(format!("{c_stem}_{n_idx}.{ext}"));
        if !is_path_taken(&path_candidate)? {
            return Ok(path_candidate);
        }
        n_idx += 1;
    }
}

/// Create the output directory (and parents) if it does not exist yet.
pub fn ensure_output_dir(path_dir_out: &Path) -> Result<(), OutputPathError> {
    match fs::metadata(path_dir_out) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => {
            return Err(OutputPathError::Inspect {
                path: path_dir_out.to_path_buf(),
                message: "Destination exists and is not a directory.".to_string(),
            });
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(OutputPathError::Inspect {
                path: path_dir_out.to_path_buf(),
                message: e.to_string(),
            });
        }
    }

    fs::create_dir_all(path_dir_out).map_err(|e| OutputPathError::CreateDir {
        path: path_dir_out.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path_dir_out.display(), "output directory created");
    Ok(())
}

fn is_path_taken(path: &Path) -> Result<bool, OutputPathError> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(OutputPathError::Inspect {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Workers

/// Clamp requested worker count to `[1, available_parallelism]`.
pub fn calculate_worker_limit(num_workers_max: Option<usize>) -> usize {
    let n_cpu = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);

    match num_workers_max {
        Some(n) => n.clamp(1, n_cpu),
        None => n_cpu.clamp(1, 8),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_source_path_appends_missing_extension() {
        assert_eq!(
            resolve_source_path("reports/june", "xlsx"),
            PathBuf::from("reports/june.xlsx")
        );
        assert_eq!(
            resolve_source_path(" june.xlsx ", "xlsx"),
            PathBuf::from("june.xlsx")
        );
    }

    #[test]
    fn derive_output_dir_sits_next_to_source() {
        assert_eq!(
            derive_output_dir(Path::new("reports/june.xlsx")),
            PathBuf::from("reports/june_output")
        );
        assert_eq!(
            derive_base_name(Path::new("june.xlsx")),
            PathBuf::from("june")
        );
    }

    #[test]
    fn sanitize_entity_key_replaces_separators() {
        assert_eq!(sanitize_entity_key("12 Total"), "12 Total");
        assert_eq!(sanitize_entity_key("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_entity_key("  "), C_ENTITY_KEY_FALLBACK);
        assert_eq!(sanitize_entity_key(".."), C_ENTITY_KEY_FALLBACK);
    }

    #[test]
    fn derive_unique_output_path_never_reuses_taken_names() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_dir = tmp.path();

        let path_first = derive_unique_output_path(path_dir, "7", "xlsx").expect("first");
        assert_eq!(path_first, path_dir.join("7.xlsx"));
        fs::write(&path_first, b"x").expect("write first");

        let path_second = derive_unique_output_path(path_dir, "7", "xlsx").expect("second");
        assert_eq!(path_second, path_dir.join("7_0.xlsx"));
        fs::write(&path_second, b"x").expect("write second");

        let path_third = derive_unique_output_path(path_dir, "7", "xlsx").expect("third");
        assert_eq!(path_third, path_dir.join("7_1.xlsx"));
    }

    #[test]
    fn ensure_output_dir_creates_and_reuses() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_dir = tmp.path().join("a/b_output");

        ensure_output_dir(&path_dir).expect("create");
        assert!(path_dir.is_dir());
        ensure_output_dir(&path_dir).expect("reuse");
    }

    #[test]
    fn ensure_output_dir_rejects_file_destination() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_file = tmp.path().join("taken");
        fs::write(&path_file, b"x").expect("write");

        let err = ensure_output_dir(&path_file).expect_err("must fail");
        assert!(matches!(err, OutputPathError::Inspect { .. }));
    }

    #[test]
    fn calculate_worker_limit_clamps_to_at_least_one() {
        assert_eq!(calculate_worker_limit(Some(0)), 1);
        assert!(calculate_worker_limit(None) >= 1);
    }
}
