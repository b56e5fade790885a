//! Subcommand bodies shared by the one-shot and interactive front ends.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reportsplit_io_fs::resolve_source_path;
use reportsplit_io_xlsx::{
    C_EXT_CSV, C_EXT_XLSX, XlsxIoError, list_sheet_names, read_sheet_grid, write_grid_as_csv,
};
use reportsplit_segment::{
    EnumReportType, ReportSplit, SegmentError, SpecSplitOptions, split_workbook,
};

/// Run one split, attaching the user-facing failure hint to errors.
pub fn run_split(options: &SpecSplitOptions) -> Result<ReportSplit> {
    split_workbook(options).map_err(|err| {
        let c_hint = derive_failure_hint(&err, options);
        anyhow::Error::new(err).context(c_hint)
    })
}

/// `split` subcommand.
pub fn cmd_split(
    input: &str,
    sheet_name: &str,
    report_type: EnumReportType,
    path_dir_out: Option<PathBuf>,
) -> Result<()> {
    let mut options = SpecSplitOptions::from_input(input, sheet_name, report_type);
    options.path_dir_out = path_dir_out;

    let report = run_split(&options)?;
    println!("{}", format_split_success(&report));
    tracing::info!(%report, "done");
    Ok(())
}

/// `to-csv` subcommand; returns the written path.
pub fn cmd_to_csv(input: &str, sheet_name: &str, path_file_out: Option<PathBuf>) -> Result<PathBuf> {
    let path_file_source = resolve_source_path(input, C_EXT_XLSX);
    let grid = read_sheet_grid(&path_file_source, sheet_name.trim())
        .with_context(|| derive_open_hint(&path_file_source, sheet_name))?;

    let path_file_out = path_file_out.unwrap_or_else(|| path_file_source.with_extension(C_EXT_CSV));
    let n_lines = write_grid_as_csv(&grid, &path_file_out)
        .with_context(|| format!("failed to write {}", path_file_out.display()))?;
    tracing::info!(
        path = %path_file_out.display(),
        lines = n_lines,
        cols = grid.width(),
        "csv written"
    );
    println!("wrote {n_lines} lines to {}", path_file_out.display());
    Ok(path_file_out)
}

/// `types` subcommand.
pub fn cmd_types() {
    for line in derive_type_lines() {
        println!("{line}");
    }
}

/// One line per report type: keyword, marker column, marker pattern.
pub fn derive_type_lines() -> Vec<String> {
    EnumReportType::ALL
        .iter()
        .map(|report_type| {
            let conf = report_type.conf();
            format!(
                "{:<10} column {}  {}",
                conf.keyword, conf.col_marker, conf.pattern_marker
            )
        })
        .collect()
}

/// Success message for one run.
pub fn format_split_success(report: &ReportSplit) -> String {
    let c_file = report.path_file_source.display();
    if report.is_empty() {
        return format!("successfully parsed {c_file}\nno entities found, no files written");
    }
    if report.cnt_written == 0 {
        return format!(
            "successfully parsed {c_file}\nall {} entities skipped, no files written",
            report.cnt_skipped
        );
    }
    let mut c_msg = format!(
        "successfully parsed {c_file}\ncheck out {} for files",
        report.path_dir_output.display()
    );
    if report.cnt_skipped > 0 {
        c_msg.push_str(&format!("\nskipped {} entities without rows", report.cnt_skipped));
    }
    c_msg
}

fn derive_failure_hint(err: &SegmentError, options: &SpecSplitOptions) -> String {
    match err {
        SegmentError::Xlsx(XlsxIoError::FileNotFound(path)) => format!(
            "unable to open file {}, perhaps it does not exist",
            path.display()
        ),
        SegmentError::Xlsx(XlsxIoError::SheetNotFound { sheet, path }) => format!(
            "unable to open sheet {sheet}, perhaps it does not exist{}",
            format_sheet_choices(path)
        ),
        _ => format!(
            "failed to parse {} ({})",
            options.path_file_source.display(),
            options.report_type
        ),
    }
}

fn derive_open_hint(path_file_source: &Path, sheet_name: &str) -> String {
    format!(
        "unable to open sheet {} of {}, perhaps it does not exist{}",
        sheet_name.trim(),
        path_file_source.display(),
        format_sheet_choices(path_file_source)
    )
}

/// ` (sheets: a, b)` when the workbook opens, empty otherwise.
fn format_sheet_choices(path_file_source: &Path) -> String {
    match list_sheet_names(path_file_source) {
        Ok(l_names) if !l_names.is_empty() => format!(" (sheets: {})", l_names.join(", ")),
        _ => String::new(),
    }
}
