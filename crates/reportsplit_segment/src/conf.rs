//! Static per-report-type configuration table.

use crate::plan::{PolicyAnnual, PolicyMonth, PolicyShift, PolicyStatement, SegmentPolicy};
use crate::spec::EnumReportType;

/// Fill applied to unstyled cells of month segments.
pub const C_BG_COLOR_MONTH: &str = "#FFFF00";

/// How markers become segments.
#[derive(Debug, Clone, Copy)]
pub enum EnumPlanMode {
    /// One segment per marker, planned by a row-range policy.
    Ranged(&'static dyn SegmentPolicy),
    /// Markers sorted by numeric value and merged into groups.
    Grouped,
}

/// Everything the engine needs to know about one report type.
#[derive(Debug)]
pub struct SpecReportTypeConf {
    /// User-facing keyword.
    pub keyword: &'static str,
    /// Spreadsheet column letter holding the markers.
    pub col_marker: char,
    /// Marker pattern; matched against the whole trimmed cell text.
    pub pattern_marker: &'static str,
    /// Planning mode.
    pub mode: EnumPlanMode,
    /// Fill for highlighted segments.
    pub bg_color_highlight: Option<&'static str>,
    /// Fixed output column widths `(col, width)`.
    pub widths_by_col: &'static [(usize, f64)],
    /// Fixed output row heights `(row, height)`.
    pub heights_by_row: &'static [(usize, f64)],
}

static CONF_ANNUAL: SpecReportTypeConf = SpecReportTypeConf {
    keyword: "annual",
    col_marker: 'E',
    pattern_marker: r"^\d+[a-zA-Z]+ Total$",
    mode: EnumPlanMode::Ranged(&PolicyAnnual),
    bg_color_highlight: None,
    widths_by_col: &[],
    heights_by_row: &[],
};

static CONF_MONTH: SpecReportTypeConf = SpecReportTypeConf {
    keyword: "month",
    col_marker: 'B',
    pattern_marker: r"^\d+[a-zA-Z]+$",
    mode: EnumPlanMode::Ranged(&PolicyMonth),
    bg_color_highlight: Some(C_BG_COLOR_MONTH),
    widths_by_col: &[],
    heights_by_row: &[],
};

static CONF_SHIFT: SpecReportTypeConf = SpecReportTypeConf {
    keyword: "shift",
    col_marker: 'D',
    pattern_marker: r"^\d+(AM|PM) Total$",
    mode: EnumPlanMode::Ranged(&PolicyShift),
    bg_color_highlight: None,
    widths_by_col: &[],
    heights_by_row: &[],
};

static CONF_STATEMENT: SpecReportTypeConf = SpecReportTypeConf {
    keyword: "statement",
    col_marker: 'B',
    pattern_marker: r"^\d+[a-zA-Z]$",
    mode: EnumPlanMode::Ranged(&PolicyStatement),
    bg_color_highlight: None,
    widths_by_col: &[(0, 14.0), (1, 48.0)],
    heights_by_row: &[(0, 30.0)],
};

static CONF_CREDIT_CARD: SpecReportTypeConf = SpecReportTypeConf {
    keyword: "credit",
    col_marker: 'O',
    pattern_marker: r"^\d+$",
    mode: EnumPlanMode::Grouped,
    bg_color_highlight: None,
    widths_by_col: &[],
    heights_by_row: &[],
};

impl EnumReportType {
    /// Static configuration record for this type.
    pub fn conf(self) -> &'static SpecReportTypeConf {
        match self {
            EnumReportType::Annual => &CONF_ANNUAL,
            EnumReportType::Month => &CONF_MONTH,
            EnumReportType::Shift => &CONF_SHIFT,
            EnumReportType::Statement => &CONF_STATEMENT,
            EnumReportType::CreditCard => &CONF_CREDIT_CARD,
        }
    }
}
