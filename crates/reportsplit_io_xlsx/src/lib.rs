//! `reportsplit_io_xlsx` v1:
//! Grid model plus XLSX read/write kernels.
//!
//! - `conf`   : constants and default presets
//! - `spec`   : grid/cell/format models and errors
//! - `util`   : pure helper functions
//! - `reader` : workbook sheet -> grid
//! - `writer` : grid -> workbook
//! - `export` : grid -> CSV
pub mod conf;
pub mod export;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{C_EXT_CSV, C_EXT_XLSX, N_LEN_EXCEL_SHEET_NAME_MAX, derive_fill_format};
pub use export::write_grid_as_csv;
pub use reader::{list_sheet_names, read_sheet_grid};
pub use spec::{SpecCell, SpecCellFormat, SpecSheetGrid, SpecXlsxReport, XlsxIoError};
pub use util::{
    convert_argb_to_hex_color, convert_border_style_to_code, derive_row_texts, sanitize_sheet_name,
};
pub use writer::{XlsxWriter, write_grid_to_path};
