//! Stateless helper utilities used by the reader and writer kernels.

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::{SpecCell, XlsxIoError};

////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().trim_matches('\'').to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Create suffixed sheet name (`base_2`, `base_3`, ...), respecting length cap.
pub fn create_sheet_identifier(base_name: &str, part_idx_1based: usize) -> String {
    let c_sheet_name_suffix = format!("_{part_idx_1based}");
    let n_len_base_name_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_sheet_name_suffix.len());

    let c_sheet_name_base: String = base_name
        .chars()
        .take(usize::max(1, n_len_base_name_max))
        .collect();

    format!("{c_sheet_name_base}{c_sheet_name_suffix}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColorConversion

/// Convert an ARGB/RGB hex string (`FFFFFF00`, `FFFF00`) to `#RRGGBB`.
///
/// Returns `None` for empty or theme-only colors.
pub fn convert_argb_to_hex_color(argb: &str) -> Option<String> {
    let c_argb = argb.trim().trim_start_matches('#');
    if !c_argb.chars().all(|chr| chr.is_ascii_hexdigit()) {
        return None;
    }
    let c_rgb = match c_argb.len() {
        8 => &c_argb[2..],
        6 => c_argb,
        _ => return None,
    };
    Some(format!("#{}", c_rgb.to_ascii_uppercase()))
}

/// Map an OOXML border style name (`thin`, `mediumDashed`, ...) to its border code.
///
/// Returns `None` for `none`, empty or unknown names.
pub fn convert_border_style_to_code(style: &str) -> Option<i64> {
    let n_code = match style.trim() {
        "thin" => 1,
        "medium" => 2,
        "dashed" => 3,
        "dotted" => 4,
        "thick" => 5,
        "double" => 6,
        "hair" => 7,
        "mediumDashed" => 8,
        "dashDot" => 9,
        "mediumDashDot" => 10,
        "dashDotDot" => 11,
        "mediumDashDotDot" => 12,
        "slantDashDot" => 13,
        _ => return None,
    };
    Some(n_code)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellText

/// Trimmed, non-empty display texts of one row.
pub fn derive_row_texts(row: &[SpecCell]) -> Vec<String> {
    row.iter()
        .map(|cell| cell.text.trim())
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region IndexCasting

pub(crate) fn cast_row_num(value: usize) -> Result<u32, XlsxIoError> {
    u32::try_from(value).map_err(|_| XlsxIoError::Write(format!("row index overflow: {value}")))
}

pub(crate) fn cast_col_num(value: usize) -> Result<u16, XlsxIoError> {
    u16::try_from(value).map_err(|_| XlsxIoError::Write(format!("column index overflow: {value}")))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_sheet_name_replaces_illegal_chars() {
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");
        assert_eq!(
            sanitize_sheet_name(&"x".repeat(40), "_").len(),
            N_LEN_EXCEL_SHEET_NAME_MAX
        );
    }

    #[test]
    fn test_create_sheet_identifier_respects_length_cap() {
        let c_name = create_sheet_identifier(&"y".repeat(40), 12);
        assert_eq!(c_name.len(), N_LEN_EXCEL_SHEET_NAME_MAX);
        assert!(c_name.ends_with("_12"));
        assert_eq!(create_sheet_identifier("4March", 2), "4March_2");
    }

    #[test]
    fn test_convert_argb_to_hex_color() {
        assert_eq!(convert_argb_to_hex_color("FFFFFF00").as_deref(), Some("#FFFF00"));
        assert_eq!(convert_argb_to_hex_color("00ff00").as_deref(), Some("#00FF00"));
        assert_eq!(convert_argb_to_hex_color(""), None);
        assert_eq!(convert_argb_to_hex_color("theme"), None);
    }

    #[test]
    fn test_convert_border_style_to_code() {
        assert_eq!(convert_border_style_to_code("thin"), Some(1));
        assert_eq!(convert_border_style_to_code("mediumDashDot"), Some(10));
        assert_eq!(convert_border_style_to_code("none"), None);
        assert_eq!(convert_border_style_to_code(""), None);
    }

    #[test]
    fn test_derive_row_texts_drops_blank_cells() {
        let row = vec![
            SpecCell::from_text(" a "),
            SpecCell::from_text(""),
            SpecCell::from_text("  "),
            SpecCell::from_text("b"),
        ];
        assert_eq!(derive_row_texts(&row), vec!["a".to_string(), "b".to_string()]);
    }
}
