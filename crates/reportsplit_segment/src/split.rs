//! Segmentation orchestrator and output sinks.

use std::path::{Path, PathBuf};

use reportsplit_io_fs::{derive_output_dir, derive_unique_output_path, ensure_output_dir};
use reportsplit_io_xlsx::{C_EXT_XLSX, SpecSheetGrid, read_sheet_grid, write_grid_to_path};

use crate::column::resolve_column;
use crate::conf::EnumPlanMode;
use crate::group::group_markers;
use crate::report::{ReportSplit, ReportSplitBuilder};
use crate::scan::{compile_marker_regex, scan_markers};
use crate::spec::{EnumReportType, SegmentError, SpecSegment, SpecSplitOptions};
use crate::write::derive_segment_grid;

////////////////////////////////////////////////////////////////////////////////
// #region Sinks

/// Receives finished per-entity grids.
pub trait SegmentSink {
    /// Persist `grid` for entity `key`; returns where it landed.
    fn emit(
        &mut self,
        grid: &SpecSheetGrid,
        key: &str,
        report_type: EnumReportType,
    ) -> Result<PathBuf, SegmentError>;

    /// Directory outputs go to.
    fn dir_out(&self) -> &Path;
}

/// Writes each grid as `<dir>/<key>.xlsx`, disambiguating recurring keys.
///
/// The directory is created on the first emit only.
#[derive(Debug, Clone)]
pub struct XlsxDirectorySink {
    path_dir_out: PathBuf,
    if_dir_ready: bool,
}

impl XlsxDirectorySink {
    pub fn new(path_dir_out: PathBuf) -> Self {
        Self {
            path_dir_out,
            if_dir_ready: false,
        }
    }
}

impl SegmentSink for XlsxDirectorySink {
    fn emit(
        &mut self,
        grid: &SpecSheetGrid,
        key: &str,
        report_type: EnumReportType,
    ) -> Result<PathBuf, SegmentError> {
        if !self.if_dir_ready {
            ensure_output_dir(&self.path_dir_out)?;
            self.if_dir_ready = true;
        }
        let path_file_out = derive_unique_output_path(&self.path_dir_out, key, C_EXT_XLSX)?;
        write_grid_to_path(grid, &path_file_out)?;
        tracing::debug!(
            report_type = %report_type,
            key,
            rows = grid.height(),
            path = %path_file_out.display(),
            "segment written"
        );
        Ok(path_file_out)
    }

    fn dir_out(&self) -> &Path {
        &self.path_dir_out
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Orchestrator

/// Split one loaded sheet into per-entity grids handed to `sink`.
///
/// Zero markers is a successful, empty run. A segment the planner rejects as
/// [`SegmentError::InvalidSegment`] is skipped and counted; any other error
/// aborts the run, leaving already emitted outputs in place.
pub fn split_sheet(
    grid: &SpecSheetGrid,
    report_type: EnumReportType,
    sink: &mut dyn SegmentSink,
) -> Result<ReportSplit, SegmentError> {
    let conf = report_type.conf();
    let col_idx = resolve_column(conf.col_marker)?;
    let regex = compile_marker_regex(conf.pattern_marker)?;
    let l_markers = scan_markers(grid, &regex, col_idx);

    let mut builder = ReportSplitBuilder::new(report_type);
    builder.path_dir_output = sink.dir_out().to_path_buf();
    builder.set_markers(l_markers.len());

    if l_markers.is_empty() {
        tracing::info!(report_type = %report_type, sheet = %grid.name, "no markers found");
        return Ok(builder.build());
    }

    let n_rows_max = grid.height();
    match conf.mode {
        EnumPlanMode::Ranged(policy) => {
            for idx in 0..l_markers.len() {
                let segment = match policy.plan(&l_markers, idx, n_rows_max) {
                    Ok(segment) => segment,
                    Err(err) if err.is_recoverable() => {
                        tracing::warn!(error = %err, "segment skipped");
                        builder.add_skipped(err.to_string());
                        continue;
                    }
                    Err(err) => return Err(err),
                };
                emit_segment(grid, &segment, report_type, sink, &mut builder)?;
            }
        }
        EnumPlanMode::Grouped => {
            for group in group_markers(&l_markers) {
                emit_segment(grid, &group.to_segment(), report_type, sink, &mut builder)?;
            }
        }
    }

    Ok(builder.build())
}

/// Read the source sheet and split it into `<stem>_output/`.
pub fn split_workbook(options: &SpecSplitOptions) -> Result<ReportSplit, SegmentError> {
    tracing::info!(
        path = %options.path_file_source.display(),
        sheet = %options.sheet_name,
        report_type = %options.report_type,
        "split started"
    );
    let grid = read_sheet_grid(&options.path_file_source, &options.sheet_name)?;

    let path_dir_out = options
        .path_dir_out
        .clone()
        .unwrap_or_else(|| derive_output_dir(&options.path_file_source));
    let mut sink = XlsxDirectorySink::new(path_dir_out);

    let mut report = split_sheet(&grid, options.report_type, &mut sink)?;
    report.path_file_source = options.path_file_source.clone();
    tracing::info!(%report, "split finished");
    Ok(report)
}

fn emit_segment(
    grid: &SpecSheetGrid,
    segment: &SpecSegment,
    report_type: EnumReportType,
    sink: &mut dyn SegmentSink,
    builder: &mut ReportSplitBuilder,
) -> Result<(), SegmentError> {
    tracing::trace!(
        key = %segment.key,
        row_start = segment.row_start,
        row_end = segment.row_end,
        rows = segment.len_range(),
        extra = segment.rows_extra.len(),
        "segment planned"
    );
    let grid_out = derive_segment_grid(grid, segment, report_type.conf());
    let path_file_out = sink.emit(&grid_out, &segment.key, report_type)?;
    builder.add_written(path_file_out);
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
