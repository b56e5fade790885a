//! Split report model and its mutable builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::spec::EnumReportType;

/// Outcome of one segmentation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSplit {
    /// Report layout that was applied.
    pub report_type: EnumReportType,
    /// Source workbook.
    pub path_file_source: PathBuf,
    /// Output directory; only created when something was written.
    pub path_dir_output: PathBuf,
    /// Markers found in the marker column.
    pub cnt_markers: u64,
    /// Output files written.
    pub cnt_written: u64,
    /// Entities skipped because their segment held no rows.
    pub cnt_skipped: u64,
    /// Written files in emission order.
    pub paths_written: Vec<PathBuf>,
    /// Non-fatal diagnostics.
    pub warnings: Vec<String>,
}

impl ReportSplit {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Whether the run found no markers at all.
    pub fn is_empty(&self) -> bool {
        self.cnt_markers == 0
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_markers".to_string(), self.cnt_markers);
        dict_counts.insert("cnt_written".to_string(), self.cnt_written);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} markers={} written={} skipped={} warnings={}",
            dict_counts["cnt_markers"],
            dict_counts["cnt_written"],
            dict_counts["cnt_skipped"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[SPLIT]"))
    }
}

/// Mutable accumulator for split statistics.
#[derive(Debug, Clone)]
pub struct ReportSplitBuilder {
    /// See [`ReportSplit::report_type`].
    pub report_type: EnumReportType,
    /// See [`ReportSplit::path_file_source`].
    pub path_file_source: PathBuf,
    /// See [`ReportSplit::path_dir_output`].
    pub path_dir_output: PathBuf,
    /// See [`ReportSplit::cnt_markers`].
    pub cnt_markers: u64,
    /// See [`ReportSplit::cnt_skipped`].
    pub cnt_skipped: u64,
    /// See [`ReportSplit::paths_written`].
    pub paths_written: Vec<PathBuf>,
    /// See [`ReportSplit::warnings`].
    pub warnings: Vec<String>,
}

impl ReportSplitBuilder {
    pub fn new(report_type: EnumReportType) -> Self {
        Self {
            report_type,
            path_file_source: PathBuf::new(),
            path_dir_output: PathBuf::new(),
            cnt_markers: 0,
            cnt_skipped: 0,
            paths_written: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record the marker count.
    pub fn set_markers(&mut self, cnt_markers: usize) {
        self.cnt_markers = cnt_markers as u64;
    }

    /// Record one written output file.
    pub fn add_written(&mut self, path: PathBuf) {
        self.paths_written.push(path);
    }

    /// Record one skipped entity together with its reason.
    pub fn add_skipped(&mut self, warning: String) {
        self.cnt_skipped += 1;
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportSplit {
        ReportSplit {
            report_type: self.report_type,
            path_file_source: self.path_file_source,
            path_dir_output: self.path_dir_output,
            cnt_markers: self.cnt_markers,
            cnt_written: self.paths_written.len() as u64,
            cnt_skipped: self.cnt_skipped,
            paths_written: self.paths_written,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_split_format_lists_counters() {
        let mut builder = ReportSplitBuilder::new(EnumReportType::Statement);
        builder.set_markers(3);
        builder.add_written(PathBuf::from("out/1A.xlsx"));
        builder.add_skipped("invalid id".to_string());
        let report = builder.build();

        assert_eq!(
            report.to_string(),
            "[SPLIT] markers=3 written=1 skipped=1 warnings=1"
        );
        assert_eq!(report.format("[X]"), "[X] markers=3 written=1 skipped=1 warnings=1");
        assert!(!report.is_empty());
    }
}
