//! Builds one output grid per planned segment.

use reportsplit_io_xlsx::{SpecCell, SpecCellFormat, SpecSheetGrid, derive_fill_format};

use crate::conf::SpecReportTypeConf;
use crate::spec::SpecSegment;

const N_ROW_HEADER: usize = 0;

/// Copy `segment` out of `grid_src` into a fresh grid named after its key.
///
/// Row order is: header, `rows_extra`, then `[row_start, row_end)`. Rows past the
/// source height are never emitted. Highlighting fills only data cells that have
/// no fill of their own; fixed widths/heights from `conf` are applied last.
pub fn derive_segment_grid(
    grid_src: &SpecSheetGrid,
    segment: &SpecSegment,
    conf: &SpecReportTypeConf,
) -> SpecSheetGrid {
    let mut grid_out = SpecSheetGrid::new(segment.key.as_str());
    let n_rows_max = grid_src.height();

    if let Some(row) = grid_src.row(N_ROW_HEADER) {
        grid_out.push_row(row.to_vec());
    }

    let fmt_fill = segment
        .if_highlight
        .then_some(conf.bg_color_highlight)
        .flatten()
        .map(derive_fill_format);

    let n_row_end = segment.row_end.min(n_rows_max);
    let l_rows_data = segment
        .rows_extra
        .iter()
        .copied()
        .chain(segment.row_start..n_row_end);
    for row_idx in l_rows_data {
        let Some(row) = grid_src.row(row_idx) else {
            continue;
        };
        let l_cells = match &fmt_fill {
            Some(fmt) => row.iter().map(|cell| copy_cell_with_fill(cell, fmt)).collect(),
            None => row.to_vec(),
        };
        grid_out.push_row(l_cells);
    }

    for (n_col, n_width) in conf.widths_by_col {
        grid_out.widths_by_col.insert(*n_col, *n_width);
    }
    for (n_row, n_height) in conf.heights_by_row {
        grid_out.heights_by_row.insert(*n_row, *n_height);
    }

    grid_out
}

/// Copy a cell, adding `fmt_fill` only when it has no fill yet.
pub fn copy_cell_with_fill(cell: &SpecCell, fmt_fill: &SpecCellFormat) -> SpecCell {
    if cell.format.has_fill() {
        return cell.clone();
    }
    SpecCell {
        text: cell.text.clone(),
        format: cell.format.merge(fmt_fill),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::C_BG_COLOR_MONTH;
    use crate::spec::EnumReportType;

    fn derive_source_grid() -> SpecSheetGrid {
        SpecSheetGrid::from_text_rows(
            "src",
            &[
                vec!["Name", "Id"],
                vec!["sub", "header"],
                vec!["a", "1"],
                vec!["b", "2"],
                vec!["c", "3"],
            ],
        )
    }

    fn derive_texts(grid: &SpecSheetGrid) -> Vec<String> {
        grid.rows
            .iter()
            .map(|row| row.first().map(|c| c.text.clone()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn header_first_then_extras_then_range() {
        let grid_src = derive_source_grid();
        let mut segment = SpecSegment::from_range("2X", 2, 4);
        segment.rows_extra = vec![1];

        let grid_out = derive_segment_grid(&grid_src, &segment, EnumReportType::Shift.conf());
        assert_eq!(grid_out.name, "2X");
        assert_eq!(derive_texts(&grid_out), vec!["Name", "sub", "a", "b"]);
        assert_eq!(grid_src, derive_source_grid());
    }

    #[test]
    fn range_past_source_is_truncated() {
        let grid_src = derive_source_grid();
        let segment = SpecSegment::from_range("k", 3, 50);
        let grid_out = derive_segment_grid(&grid_src, &segment, EnumReportType::Annual.conf());
        assert_eq!(derive_texts(&grid_out), vec!["Name", "b", "c"]);
    }

    #[test]
    fn empty_range_still_has_header() {
        let grid_src = derive_source_grid();
        let segment = SpecSegment::from_range("k", 4, 2);
        let grid_out = derive_segment_grid(&grid_src, &segment, EnumReportType::Annual.conf());
        assert_eq!(derive_texts(&grid_out), vec!["Name"]);
    }

    #[test]
    fn highlight_fills_unstyled_data_cells_only() {
        let mut grid_src = derive_source_grid();
        grid_src.rows[3][1].format.bg_color = Some("#00FF00".to_string());
        let mut segment = SpecSegment::from_range("k", 2, 4);
        segment.if_highlight = true;

        let grid_out = derive_segment_grid(&grid_src, &segment, EnumReportType::Month.conf());
        assert!(!grid_out.rows[0][0].format.has_fill());
        assert_eq!(
            grid_out.rows[1][0].format.bg_color.as_deref(),
            Some(C_BG_COLOR_MONTH)
        );
        assert_eq!(grid_out.rows[2][1].format.bg_color.as_deref(), Some("#00FF00"));
    }

    #[test]
    fn statement_applies_fixed_dimensions() {
        let grid_src = derive_source_grid();
        let segment = SpecSegment::from_range("1A", 2, 3);
        let grid_out =
            derive_segment_grid(&grid_src, &segment, EnumReportType::Statement.conf());
        assert_eq!(grid_out.widths_by_col.get(&0), Some(&14.0));
        assert_eq!(grid_out.widths_by_col.get(&1), Some(&48.0));
        assert_eq!(grid_out.heights_by_row.get(&0), Some(&30.0));
    }
}
