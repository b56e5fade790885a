//! XLSX writer kernel that persists in-memory grids as workbooks.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::spec::{SpecCell, SpecCellFormat, SpecSheetGrid, SpecXlsxReport, XlsxIoError};
use crate::util::{cast_col_num, cast_row_num, create_sheet_identifier, sanitize_sheet_name};

/// Stateful workbook writer.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: PathBuf) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Return output file path.
    pub fn file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxIoError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(derive_xlsx_error)?;
        self.if_closed = true;
        tracing::debug!(path = %self.path_file_out.display(), "workbook saved");
        Ok(())
    }

    /// Write one grid as a new worksheet.
    ///
    /// Every source row becomes one destination row at the same index; cells keep
    /// their text and style. Explicit column widths and row heights are applied last.
    pub fn write_sheet_grid(&mut self, grid: &SpecSheetGrid) -> Result<(), XlsxIoError> {
        if self.if_closed {
            return Err(XlsxIoError::Write("Cannot write after close().".to_string()));
        }

        let mut report = SpecXlsxReport::default();
        let sheet_name_unique = self.derive_unique_sheet_name(&sanitize_sheet_name(&grid.name, "_"));
        if sheet_name_unique != grid.name {
            report.warn(format!(
                "Sheet name {:?} stored as {sheet_name_unique:?}.",
                grid.name
            ));
        }

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name_unique)
            .map_err(derive_xlsx_error)?;

        for (n_idx_row, row) in grid.rows.iter().enumerate() {
            for (n_idx_col, cell) in row.iter().enumerate() {
                write_cell_with_format(worksheet, n_idx_row, n_idx_col, cell)?;
            }
        }

        for (n_idx_col, n_width) in &grid.widths_by_col {
            worksheet
                .set_column_width(cast_col_num(*n_idx_col)?, *n_width)
                .map_err(derive_xlsx_error)?;
        }
        for (n_idx_row, n_height) in &grid.heights_by_row {
            worksheet
                .set_row_height(cast_row_num(*n_idx_row)?, *n_height)
                .map_err(derive_xlsx_error)?;
        }

        report.sheets.push(sheet_name_unique);
        report.cnt_rows = grid.height();
        self.l_reports.push(report);
        Ok(())
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let mut n_idx = 2usize;
        loop {
            let candidate = create_sheet_identifier(name, n_idx);
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

/// Write a single-sheet workbook for `grid` at `path_file_out`.
pub fn write_grid_to_path(grid: &SpecSheetGrid, path_file_out: &Path) -> Result<(), XlsxIoError> {
    let mut writer = XlsxWriter::new(path_file_out.to_path_buf());
    writer.write_sheet_grid(grid)?;
    for report in writer.report() {
        for warning in &report.warnings {
            tracing::warn!(path = %writer.file_out().display(), "{warning}");
        }
    }
    writer.close()
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    cell: &SpecCell,
) -> Result<(), XlsxIoError> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;

    if cell.format.is_plain() {
        if !cell.text.is_empty() {
            worksheet
                .write_string(n_row, n_col, &cell.text)
                .map_err(derive_xlsx_error)?;
        }
        return Ok(());
    }

    let format = derive_rust_xlsx_format(&cell.format);
    if cell.text.is_empty() {
        worksheet
            .write_blank(n_row, n_col, &format)
            .map_err(derive_xlsx_error)?;
    } else {
        worksheet
            .write_string_with_format(n_row, n_col, &cell.text, &format)
            .map_err(derive_xlsx_error)?;
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(val) = spec.top {
        format = format.set_border_top(derive_format_border(val));
    }
    if let Some(val) = spec.bottom {
        format = format.set_border_bottom(derive_format_border(val));
    }
    if let Some(val) = spec.left {
        format = format.set_border_left(derive_format_border(val));
    }
    if let Some(val) = spec.right {
        format = format.set_border_right(derive_format_border(val));
    }

    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

/// Inverse of `convert_border_style_to_code`; unknown codes draw no border.
fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        8 => FormatBorder::MediumDashed,
        9 => FormatBorder::DashDot,
        10 => FormatBorder::MediumDashDot,
        11 => FormatBorder::DashDotDot,
        12 => FormatBorder::MediumDashDotDot,
        13 => FormatBorder::SlantDashDot,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    match align.trim().to_ascii_lowercase().as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "fill" => Some(FormatAlign::Fill),
        "justify" => Some(FormatAlign::Justify),
        "center_across" => Some(FormatAlign::CenterAcross),
        "distributed" => Some(FormatAlign::Distributed),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" => Some(FormatAlign::VerticalCenter),
        "vjustify" => Some(FormatAlign::VerticalJustify),
        "vdistributed" => Some(FormatAlign::VerticalDistributed),
        _ => None,
    }
}

fn derive_xlsx_error(err: XlsxError) -> XlsxIoError {
    XlsxIoError::Write(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_unique_sheet_name_appends_suffix() {
        let mut writer = XlsxWriter::new(PathBuf::from("unused.xlsx"));
        assert_eq!(writer.derive_unique_sheet_name("7"), "7");
        assert_eq!(writer.derive_unique_sheet_name("7"), "7_2");
        assert_eq!(writer.derive_unique_sheet_name("7"), "7_3");
    }

    #[test]
    fn write_grid_to_path_creates_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_out = tmp.path().join("out.xlsx");

        let mut grid = SpecSheetGrid::from_text_rows("Data", &[vec!["h1", "h2"], vec!["1", ""]]);
        grid.rows[1][0].format.bg_color = Some("#FFFF00".to_string());
        grid.widths_by_col.insert(0, 14.0);
        grid.heights_by_row.insert(0, 30.0);

        write_grid_to_path(&grid, &path_out).expect("write grid");
        assert!(path_out.is_file());
    }

    #[test]
    fn write_sheet_grid_reports_renamed_sheets() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut writer = XlsxWriter::new(tmp.path().join("renamed.xlsx"));
        writer
            .write_sheet_grid(&SpecSheetGrid::from_text_rows("a/b", &[vec!["h"]]))
            .expect("sheet");
        writer
            .write_sheet_grid(&SpecSheetGrid::from_text_rows("a_b", &[vec!["h"], vec!["x"]]))
            .expect("sheet");

        let l_reports = writer.report();
        assert_eq!(l_reports[0].sheets, vec!["a_b"]);
        assert_eq!(l_reports[1].sheets, vec!["a_b_2"]);
        assert_eq!(l_reports[1].cnt_rows, 2);
        assert!(l_reports.iter().all(|report| report.warnings.len() == 1));
        assert_eq!(writer.file_out(), tmp.path().join("renamed.xlsx"));
        writer.close().expect("close");
    }

    #[test]
    fn write_after_close_is_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut writer = XlsxWriter::new(tmp.path().join("closed.xlsx"));
        writer
            .write_sheet_grid(&SpecSheetGrid::new("a"))
            .expect("first sheet");
        writer.close().expect("close");
        writer.close().expect("close is idempotent");

        let err = writer
            .write_sheet_grid(&SpecSheetGrid::new("b"))
            .expect_err("must fail");
        assert!(matches!(err, XlsxIoError::Write(_)));
    }

    #[test]
    fn derive_format_helpers_map_known_names() {
        assert_eq!(derive_format_border(1), FormatBorder::Thin);
        assert_eq!(derive_format_border(13), FormatBorder::SlantDashDot);
        assert_eq!(derive_format_border(99), FormatBorder::None);
        assert_eq!(derive_format_align(" Center "), Some(FormatAlign::Center));
        assert_eq!(derive_format_align("vcenter"), Some(FormatAlign::VerticalCenter));
        assert_eq!(derive_format_align("sideways"), None);
    }
}

