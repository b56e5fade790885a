//! XLSX reader kernel that loads one worksheet into a [`SpecSheetGrid`].

use std::path::Path;

use umya_spreadsheet::structs::drawing::Theme;
use umya_spreadsheet::{
    Cell, EnumTrait, HorizontalAlignmentValues, Spreadsheet, Style,
    VerticalAlignmentValues, Worksheet,
};

use crate::conf::{C_FILL_PATTERN_NONE, C_NUM_FORMAT_GENERAL};
use crate::spec::{SpecCell, SpecCellFormat, SpecSheetGrid, XlsxIoError};
use crate::util::{convert_argb_to_hex_color, convert_border_style_to_code};

/// Read sheet `sheet_name` from the workbook at `path_file_in`.
///
/// Each grid row holds cells from column A through the last present cell of that
/// row; gaps before it become empty cells. Row count equals the highest used row.
pub fn read_sheet_grid(path_file_in: &Path, sheet_name: &str) -> Result<SpecSheetGrid, XlsxIoError> {
    let book = open_workbook(path_file_in)?;
    let worksheet = book
        .get_sheet_by_name(sheet_name)
        .ok_or_else(|| XlsxIoError::SheetNotFound {
            sheet: sheet_name.to_string(),
            path: path_file_in.to_path_buf(),
        })?;

    let grid = derive_grid_from_worksheet(worksheet, sheet_name, book.get_theme());
    tracing::debug!(
        path = %path_file_in.display(),
        sheet = sheet_name,
        rows = grid.height(),
        "sheet loaded"
    );
    Ok(grid)
}

/// List worksheet names in workbook order.
pub fn list_sheet_names(path_file_in: &Path) -> Result<Vec<String>, XlsxIoError> {
    let book = open_workbook(path_file_in)?;
    Ok(book
        .get_sheet_collection()
        .iter()
        .map(|worksheet| worksheet.get_name().to_string())
        .collect())
}

fn open_workbook(path_file_in: &Path) -> Result<Spreadsheet, XlsxIoError> {
    if !path_file_in.is_file() {
        return Err(XlsxIoError::FileNotFound(path_file_in.to_path_buf()));
    }
    umya_spreadsheet::reader::xlsx::read(path_file_in).map_err(|err| XlsxIoError::Read {
        path: path_file_in.to_path_buf(),
        message: err.to_string(),
    })
}

fn derive_grid_from_worksheet(
    worksheet: &Worksheet,
    sheet_name: &str,
    theme: &Theme,
) -> SpecSheetGrid {
    let (n_col_max, n_row_max) = worksheet.get_highest_column_and_row();
    let mut grid = SpecSheetGrid::new(sheet_name);

    // umya coordinates are 1-based (col, row).
    for n_row in 1..=n_row_max {
        let mut l_cells: Vec<SpecCell> = Vec::new();
        let mut n_len_row = 0usize;
        for n_col in 1..=n_col_max {
            match worksheet.get_cell((n_col, n_row)) {
                Some(cell) => {
                    l_cells.push(derive_spec_cell(cell, theme));
                    n_len_row = l_cells.len();
                }
                None => l_cells.push(SpecCell::default()),
            }
        }
        l_cells.truncate(n_len_row);
        grid.push_row(l_cells);
    }

    grid
}

fn derive_spec_cell(cell: &Cell, theme: &Theme) -> SpecCell {
    SpecCell {
        text: cell.get_formatted_value(),
        format: derive_spec_cell_format(cell.get_style(), theme),
    }
}

fn derive_spec_cell_format(style: &Style, theme: &Theme) -> SpecCellFormat {
    let mut fmt = SpecCellFormat::default();

    if let Some(font) = style.get_font() {
        let c_font_name = font.get_name().to_string();
        if !c_font_name.is_empty() {
            fmt.font_name = Some(c_font_name);
        }
        let n_font_size: f64 = font.get_size().to_owned();
        if n_font_size > 0.0 {
            fmt.font_size = Some(n_font_size);
        }
        let if_bold: bool = font.get_bold().to_owned();
        if if_bold {
            fmt.bold = Some(true);
        }
        let if_italic: bool = font.get_italic().to_owned();
        if if_italic {
            fmt.italic = Some(true);
        }
        fmt.font_color = convert_argb_to_hex_color(&font.get_color().get_argb().to_string());
    }

    if let Some(number_format) = style.get_number_format() {
        let c_code = number_format.get_format_code().to_string();
        if !c_code.is_empty() && c_code != C_NUM_FORMAT_GENERAL {
            fmt.num_format = Some(c_code);
        }
    }

    if let Some(pattern_fill) = style.get_fill().and_then(|fill| fill.get_pattern_fill()) {
        let c_pattern = pattern_fill.get_pattern_type().get_value_string().to_string();
        if c_pattern != C_FILL_PATTERN_NONE {
            fmt.fill_pattern = Some(c_pattern);
            // Theme colors only resolve against the workbook theme.
            fmt.bg_color = style
                .get_background_color()
                .and_then(|color| convert_argb_to_hex_color(&color.get_argb_with_theme(theme)));
        }
    }

    if let Some(alignment) = style.get_alignment() {
        fmt.align = derive_align_name(alignment.get_horizontal()).map(str::to_string);
        fmt.valign = derive_valign_name(alignment.get_vertical()).map(str::to_string);
        let if_wrap: bool = alignment.get_wrap_text().to_owned();
        if if_wrap {
            fmt.text_wrap = Some(true);
        }
    }

    apply_border_codes(&mut fmt, style);

    fmt
}

/// Uniform sides collapse into `border`; mixed sides keep per-side overrides.
fn apply_border_codes(fmt: &mut SpecCellFormat, style: &Style) {
    let Some(borders) = style.get_borders() else {
        return;
    };
    let [n_top, n_bottom, n_left, n_right] = [
        borders.get_top(),
        borders.get_bottom(),
        borders.get_left(),
        borders.get_right(),
    ]
    .map(|border| convert_border_style_to_code(border.get_border_style()));

    if n_top.is_some() && [n_bottom, n_left, n_right].iter().all(|n| *n == n_top) {
        fmt.border = n_top;
        return;
    }
    fmt.top = n_top;
    fmt.bottom = n_bottom;
    fmt.left = n_left;
    fmt.right = n_right;
}

fn derive_align_name(align: &HorizontalAlignmentValues) -> Option<&'static str> {
    match align {
        HorizontalAlignmentValues::General => None,
        HorizontalAlignmentValues::Left => Some("left"),
        HorizontalAlignmentValues::Center => Some("center"),
        HorizontalAlignmentValues::Right => Some("right"),
        HorizontalAlignmentValues::Fill => Some("fill"),
        HorizontalAlignmentValues::Justify => Some("justify"),
        HorizontalAlignmentValues::CenterContinuous => Some("center_across"),
        HorizontalAlignmentValues::Distributed => Some("distributed"),
    }
}

fn derive_valign_name(valign: &VerticalAlignmentValues) -> Option<&'static str> {
    match valign {
        VerticalAlignmentValues::Bottom => None,
        VerticalAlignmentValues::Top => Some("top"),
        VerticalAlignmentValues::Center => Some("vcenter"),
        VerticalAlignmentValues::Justify => Some("vjustify"),
        VerticalAlignmentValues::Distributed => Some("vdistributed"),
    }
}
