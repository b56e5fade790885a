//! XLSX constants and default preset factories.

use crate::spec::SpecCellFormat;

/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];
/// Default workbook extension for source and output files.
pub const C_EXT_XLSX: &str = "xlsx";
/// Extension used by CSV export.
pub const C_EXT_CSV: &str = "csv";
/// Number format code Excel treats as "no explicit format".
pub const C_NUM_FORMAT_GENERAL: &str = "General";
/// Fill pattern name meaning "no fill".
pub const C_FILL_PATTERN_NONE: &str = "none";

/// Fill-only patch used to highlight copied cells.
pub fn derive_fill_format(bg_color: &str) -> SpecCellFormat {
    SpecCellFormat {
        bg_color: Some(bg_color.to_string()),
        ..Default::default()
    }
}
