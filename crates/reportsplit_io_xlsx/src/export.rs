//! Flat CSV export of one grid.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::spec::{SpecSheetGrid, XlsxIoError};
use crate::util::derive_row_texts;

/// Write `grid` as CSV: one line per row holding its trimmed, non-empty texts.
///
/// Lines have varying field counts; blank cells are dropped rather than kept as
/// empty fields. A row without text becomes a bare newline.
pub fn write_grid_as_csv(grid: &SpecSheetGrid, path_file_out: &Path) -> Result<usize, XlsxIoError> {
    let file = File::create(path_file_out)?;
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(&file);

    let mut n_lines = 0usize;
    for row in &grid.rows {
        let l_texts = derive_row_texts(row);
        if l_texts.is_empty() {
            // csv quotes a lone empty field, so bypass it for blank lines.
            writer.flush()?;
            (&file).write_all(b"\n")?;
        } else {
            writer
                .write_record(&l_texts)
                .map_err(|err| XlsxIoError::Csv(err.to_string()))?;
        }
        n_lines += 1;
    }
    writer.flush()?;
    Ok(n_lines)
}
