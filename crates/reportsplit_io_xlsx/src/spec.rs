//! Shared grid, cell-format and error models.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::conf::C_FILL_PATTERN_NONE;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Visual style carried by one cell from reader to writer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<f64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Text wrap.
    pub text_wrap: Option<bool>,

    /// Top border override.
    pub top: Option<i64>,
    /// Bottom border override.
    pub bottom: Option<i64>,
    /// Left border override.
    pub left: Option<i64>,
    /// Right border override.
    pub right: Option<i64>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color (`#RRGGBB`).
    pub bg_color: Option<String>,
    /// Source fill pattern name (`solid`, `gray125`, ...).
    ///
    /// Set even when the fill color could not be resolved to `#RRGGBB`.
    pub fill_pattern: Option<String>,
    /// Font color (`#RRGGBB`).
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            text_wrap: other.text_wrap.or(self.text_wrap),
            top: other.top.or(self.top),
            bottom: other.bottom.or(self.bottom),
            left: other.left.or(self.left),
            right: other.right.or(self.right),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            fill_pattern: other
                .fill_pattern
                .clone()
                .or_else(|| self.fill_pattern.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }

    /// Whether the cell already carries a background fill.
    ///
    /// True for a resolved fill color or for any fill pattern other than `none`,
    /// so theme-colored fills count even without a `#RRGGBB` value.
    pub fn has_fill(&self) -> bool {
        let if_color = self.bg_color.as_deref().is_some_and(|val| !val.is_empty());
        let if_pattern = self
            .fill_pattern
            .as_deref()
            .is_some_and(|val| !val.is_empty() && val != C_FILL_PATTERN_NONE);
        if_color || if_pattern
    }

    /// Whether no property is set at all.
    pub fn is_plain(&self) -> bool {
        *self == SpecCellFormat::default()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region GridSpecification

/// One cell: display-formatted text plus its style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCell {
    /// Display text as formatted by the source workbook.
    pub text: String,
    /// Cell style.
    pub format: SpecCellFormat,
}

impl SpecCell {
    /// Plain text cell without any style.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: SpecCellFormat::default(),
        }
    }
}

/// In-memory sheet: ordered rows of ordered cells.
///
/// Rows may have different lengths; a row holds cells up to its last present cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetGrid {
    /// Sheet name.
    pub name: String,
    /// Row-major cell storage.
    pub rows: Vec<Vec<SpecCell>>,
    /// Explicit column widths by zero-based column index.
    pub widths_by_col: BTreeMap<usize, f64>,
    /// Explicit row heights by zero-based row index.
    pub heights_by_row: BTreeMap<usize, f64>,
}

impl SpecSheetGrid {
    /// Empty grid with a sheet name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build a style-free grid from text rows.
    pub fn from_text_rows<S: AsRef<str>>(name: impl Into<String>, rows: &[Vec<S>]) -> Self {
        let mut grid = Self::new(name);
        for row in rows {
            grid.push_row(row.iter().map(|val| SpecCell::from_text(val.as_ref())).collect());
        }
        grid
    }

    /// Total row count.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row length.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Row by index.
    pub fn row(&self, row_idx: usize) -> Option<&[SpecCell]> {
        self.rows.get(row_idx).map(Vec::as_slice)
    }

    /// Cell text by position; `None` when the row is shorter.
    pub fn text_at(&self, row_idx: usize, col_idx: usize) -> Option<&str> {
        self.rows
            .get(row_idx)
            .and_then(|row| row.get(col_idx))
            .map(|cell| cell.text.as_str())
    }

    /// Append one row.
    pub fn push_row(&mut self, row: Vec<SpecCell>) {
        self.rows.push(row);
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheet names emitted by the write call.
    pub sheets: Vec<String>,
    /// Rows written.
    pub cnt_rows: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Workbook read/write failures.
#[derive(Debug, Error)]
pub enum XlsxIoError {
    /// Source workbook path does not exist.
    #[error("unable to find file: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Workbook has no sheet with the requested name.
    #[error("sheet {sheet} does not exist in excel file {}", path.display())]
    SheetNotFound {
        /// Requested sheet name.
        sheet: String,
        /// Workbook path.
        path: PathBuf,
    },

    /// Workbook could not be parsed.
    #[error("failed to read workbook {}: {message}", path.display())]
    Read {
        /// Workbook path.
        path: PathBuf,
        /// Underlying parser error text.
        message: String,
    },

    /// Workbook could not be built or saved.
    #[error("xlsx write error: {0}")]
    Write(String),

    /// CSV export failure.
    #[error("csv write error: {0}")]
    Csv(String),

    /// Plain IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_right_side_values() {
        let base = SpecCellFormat {
            bold: Some(true),
            bg_color: Some("#00FF00".to_string()),
            ..Default::default()
        };
        let merged = base.merge(&SpecCellFormat {
            bg_color: Some("#FFFF00".to_string()),
            italic: Some(true),
            ..Default::default()
        });

        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.italic, Some(true));
        assert_eq!(merged.bg_color.as_deref(), Some("#FFFF00"));
    }

    #[test]
    fn has_fill_ignores_empty_color() {
        let mut fmt = SpecCellFormat::default();
        assert!(!fmt.has_fill());
        fmt.bg_color = Some(String::new());
        assert!(!fmt.has_fill());
        fmt.bg_color = Some("#112233".to_string());
        assert!(fmt.has_fill());
    }

    #[test]
    fn has_fill_counts_pattern_without_color() {
        let mut fmt = SpecCellFormat {
            fill_pattern: Some("none".to_string()),
            ..Default::default()
        };
        assert!(!fmt.has_fill());
        fmt.fill_pattern = Some("solid".to_string());
        assert!(fmt.has_fill());
    }

    #[test]
    fn grid_text_lookup_handles_ragged_rows() {
        let grid = SpecSheetGrid::from_text_rows("s", &[vec!["a", "b"], vec!["c"]]);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.text_at(0, 1), Some("b"));
        assert_eq!(grid.text_at(1, 1), None);
        assert_eq!(grid.text_at(5, 0), None);
    }
}
