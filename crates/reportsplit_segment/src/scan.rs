//! Marker scanning over one grid column.

use regex::Regex;
use reportsplit_io_xlsx::SpecSheetGrid;

use crate::spec::{SegmentError, SpecMarker};

/// Compile a marker pattern anchored to the whole cell text.
pub fn compile_marker_regex(pattern: &str) -> Result<Regex, SegmentError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| SegmentError::RegexCompile {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Collect every row whose trimmed cell at `col_idx` fully matches `regex`.
///
/// Rows too short to reach `col_idx` are skipped. Output is in row order and may
/// be empty.
pub fn scan_markers(grid: &SpecSheetGrid, regex: &Regex, col_idx: usize) -> Vec<SpecMarker> {
    let mut l_markers = Vec::new();
    for (row_idx, row) in grid.rows.iter().enumerate() {
        let Some(cell) = row.get(col_idx) else {
            continue;
        };
        let c_text = cell.text.trim();
        if regex.is_match(c_text) {
            l_markers.push(SpecMarker {
                row_idx,
                col_idx,
                value: c_text.to_string(),
            });
        }
    }
    tracing::debug!(markers = l_markers.len(), col = col_idx, "markers scanned");
    l_markers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive_month_grid() -> SpecSheetGrid {
        SpecSheetGrid::from_text_rows(
            "s",
            &[
                vec!["Name", "Day"],
                vec!["a", "3"],
                vec!["b", " "],
                vec!["c", " 4March "],
                vec!["short"],
                vec!["d", "5March", "x"],
                vec!["e", "x5March"],
            ],
        )
    }

    #[test]
    fn scan_markers_returns_trimmed_matches_in_row_order() {
        let regex = compile_marker_regex(r"^\d+[a-zA-Z]+$").expect("regex");
        let l_markers = scan_markers(&derive_month_grid(), &regex, 1);

        assert_eq!(
            l_markers,
            vec![
                SpecMarker {
                    row_idx: 3,
                    col_idx: 1,
                    value: "4March".to_string()
                },
                SpecMarker {
                    row_idx: 5,
                    col_idx: 1,
                    value: "5March".to_string()
                },
            ]
        );
    }

    #[test]
    fn scan_markers_requires_full_match() {
        let regex = compile_marker_regex(r"\d+").expect("regex");
        let grid = SpecSheetGrid::from_text_rows("s", &[vec!["12"], vec!["12a"], vec!["a12"]]);
        let l_rows: Vec<usize> = scan_markers(&grid, &regex, 0)
            .into_iter()
            .map(|m| m.row_idx)
            .collect();
        assert_eq!(l_rows, vec![0]);
    }

    #[test]
    fn scan_markers_empty_when_column_out_of_reach() {
        let regex = compile_marker_regex(r".*").expect("regex");
        assert!(scan_markers(&derive_month_grid(), &regex, 9).is_empty());
    }

    #[test]
    fn compile_marker_regex_reports_bad_pattern() {
        let err = compile_marker_regex("(").expect_err("must fail");
        assert!(matches!(err, SegmentError::RegexCompile { .. }));
    }
}
