//! Segmentation models, run options and top-level error types.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use reportsplit_io_fs::{OutputPathError, resolve_source_path};
use reportsplit_io_xlsx::{C_EXT_XLSX, XlsxIoError};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Closed set of supported report layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumReportType {
    /// Yearly report; entities end at `"<n><Month> Total"` rows.
    Annual,
    /// Monthly report; entities start at `"<n><Month>"` rows.
    Month,
    /// Shift report; entities end at `"<n>AM|PM Total"` rows, two header lines.
    Shift,
    /// Statement export; entities start at `"<n><letter>"` rows.
    Statement,
    /// Credit card export; rows grouped by numeric account id.
    CreditCard,
}

impl EnumReportType {
    /// Every report type in prompt order.
    pub const ALL: [EnumReportType; 5] = [
        EnumReportType::Annual,
        EnumReportType::Month,
        EnumReportType::Shift,
        EnumReportType::Statement,
        EnumReportType::CreditCard,
    ];

    /// Keyword typed by the user to select this type.
    pub fn keyword(self) -> &'static str {
        self.conf().keyword
    }
}

impl fmt::Display for EnumReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl FromStr for EnumReportType {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c_keyword = s.trim();
        Self::ALL
            .into_iter()
            .find(|report_type| report_type.keyword() == c_keyword)
            .ok_or_else(|| SegmentError::UnknownReportType(c_keyword.to_string()))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Structs

/// One matched cell in the marker column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecMarker {
    /// Zero-based source row.
    pub row_idx: usize,
    /// Zero-based source column.
    pub col_idx: usize,
    /// Trimmed cell text that matched the marker pattern.
    pub value: String,
}

/// Rows owned by one entity, excluding the always-copied header row 0.
///
/// Copy order is: header, `rows_extra`, then `[row_start, row_end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSegment {
    /// Entity key used for the output sheet and file name.
    pub key: String,
    /// Explicit source rows copied before the range.
    pub rows_extra: Vec<usize>,
    /// Inclusive range start.
    pub row_start: usize,
    /// Exclusive range end.
    pub row_end: usize,
    /// Fill unstyled data cells with the report type's highlight color.
    pub if_highlight: bool,
}

impl SpecSegment {
    /// Range-only segment.
    pub fn from_range(key: impl Into<String>, row_start: usize, row_end: usize) -> Self {
        Self {
            key: key.into(),
            rows_extra: Vec::new(),
            row_start,
            row_end,
            if_highlight: false,
        }
    }

    /// Number of rows in `[row_start, row_end)`.
    pub fn len_range(&self) -> usize {
        self.row_end.saturating_sub(self.row_start)
    }
}

/// Run of adjacent markers sharing one value (credit card reports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGroup {
    /// Shared marker value.
    pub value: String,
    /// Source rows to copy, header row 0 first.
    pub rows: Vec<usize>,
}

impl SpecGroup {
    /// Segment that copies the group's rows after the header.
    pub fn to_segment(&self) -> SpecSegment {
        SpecSegment {
            key: self.value.clone(),
            rows_extra: self.rows.iter().copied().filter(|row| *row != 0).collect(),
            row_start: 0,
            row_end: 0,
            if_highlight: false,
        }
    }
}

/// Input options for [`crate::split::split_workbook`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSplitOptions {
    /// Source workbook.
    pub path_file_source: PathBuf,
    /// Source sheet name.
    pub sheet_name: String,
    /// Report layout.
    pub report_type: EnumReportType,
    /// Output directory; defaults to `<source stem>_output`.
    pub path_dir_out: Option<PathBuf>,
}

impl SpecSplitOptions {
    /// Build options from raw user input, appending `.xlsx` when no extension is given.
    pub fn from_input(input: &str, sheet_name: &str, report_type: EnumReportType) -> Self {
        Self {
            path_file_source: resolve_source_path(input, C_EXT_XLSX),
            sheet_name: sheet_name.trim().to_string(),
            report_type,
            path_dir_out: None,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Segmentation failures.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Column designator outside `a..=z` / `A..=Z`.
    #[error("column {0:?} is not between (a -> Z)")]
    InvalidColumn(char),

    /// Report type keyword not recognized.
    #[error("{0} is not a valid report type")]
    UnknownReportType(String),

    /// Static marker pattern failed to compile.
    #[error("invalid marker pattern {pattern:?}: {message}")]
    RegexCompile {
        /// Pattern text.
        pattern: String,
        /// Compiler message.
        message: String,
    },

    /// Planned segment holds no usable rows; the entity is skipped.
    #[error("invalid id {key:?}: rows [{row_start}, {row_end}) hold no data")]
    InvalidSegment {
        /// Entity key.
        key: String,
        /// Planned start row.
        row_start: usize,
        /// Planned end row.
        row_end: usize,
    },

    /// Planner called with a marker index past the marker list.
    #[error("marker index {idx} out of range for {len} markers")]
    MarkerIndex {
        /// Requested index.
        idx: usize,
        /// Marker count.
        len: usize,
    },

    /// Workbook read/write failure (includes missing file or sheet).
    #[error(transparent)]
    Xlsx(#[from] XlsxIoError),

    /// Output directory or path failure.
    #[error(transparent)]
    Output(#[from] OutputPathError),
}

impl SegmentError {
    /// Whether the run may continue with the next entity.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidSegment { .. })
    }

    /// Whether the source file or sheet could not be found.
    pub fn is_missing_source(&self) -> bool {
        matches!(
            self,
            Self::Xlsx(XlsxIoError::FileNotFound(_)) | Self::Xlsx(XlsxIoError::SheetNotFound { .. })
        )
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_type_keywords_round_trip() {
        for report_type in EnumReportType::ALL {
            assert_eq!(
                report_type.keyword().parse::<EnumReportType>().expect("parse"),
                report_type
            );
        }
        assert_eq!(
            " credit ".parse::<EnumReportType>().expect("parse"),
            EnumReportType::CreditCard
        );
    }

    #[test]
    fn report_type_rejects_unknown_keyword() {
        let err = "weekly".parse::<EnumReportType>().expect_err("must fail");
        assert!(matches!(err, SegmentError::UnknownReportType(ref s) if s == "weekly"));
        assert!("Month".parse::<EnumReportType>().is_err());
    }

    #[test]
    fn group_segment_skips_header_row() {
        let group = SpecGroup {
            value: "5".to_string(),
            rows: vec![0, 3, 7],
        };
        let segment = group.to_segment();
        assert_eq!(segment.key, "5");
        assert_eq!(segment.rows_extra, vec![3, 7]);
        assert_eq!(segment.len_range(), 0);
    }

    #[test]
    fn only_invalid_segment_is_recoverable() {
        let err = SegmentError::InvalidSegment {
            key: "1A".to_string(),
            row_start: 3,
            row_end: 3,
        };
        assert!(err.is_recoverable());
        assert!(!SegmentError::InvalidColumn('1').is_recoverable());
        assert!(
            SegmentError::Xlsx(XlsxIoError::FileNotFound(PathBuf::from("x.xlsx")))
                .is_missing_source()
        );
    }

    #[test]
    fn split_options_append_default_extension() {
        let options = SpecSplitOptions::from_input("june", " Sheet1 ", EnumReportType::Month);
        assert_eq!(options.path_file_source, PathBuf::from("june.xlsx"));
        assert_eq!(options.sheet_name, "Sheet1");
    }
}
