//! `reportsplit_segment` v1:
//! Splits one report sheet into per-entity workbooks.
//!
//! - `spec`   : report types, markers, segments, options and errors
//! - `conf`   : static per-report-type configuration table
//! - `column` : column letter resolution
//! - `scan`   : marker scanning
//! - `plan`   : row-range policies
//! - `group`  : credit card grouping
//! - `write`  : segment -> output grid
//! - `report` : run report and builder
//! - `split`  : orchestrator and output sinks
pub mod column;
pub mod conf;
pub mod group;
pub mod plan;
pub mod report;
pub mod scan;
pub mod spec;
pub mod split;
pub mod write;

pub use column::{column_distance, resolve_column};
pub use conf::{C_BG_COLOR_MONTH, EnumPlanMode, SpecReportTypeConf};
pub use group::{group_adjacent_markers, group_markers, sort_markers_by_value};
pub use plan::{PolicyAnnual, PolicyMonth, PolicyShift, PolicyStatement, SegmentPolicy};
pub use report::{ReportSplit, ReportSplitBuilder};
pub use scan::{compile_marker_regex, scan_markers};
pub use spec::{
    EnumReportType, SegmentError, SpecGroup, SpecMarker, SpecSegment, SpecSplitOptions,
};
pub use split::{SegmentSink, XlsxDirectorySink, split_sheet, split_workbook};
pub use write::derive_segment_grid;
