//! Row-range planning policies, one per ranged report type.
//!
//! Every policy returns a [`SpecSegment`] whose range is clamped to
//! `[0, n_rows_max]`; an end before the start collapses to an empty range.
//! The header row is never part of the range; the writer always copies it.

use std::fmt::Debug;

use crate::spec::{SegmentError, SpecMarker, SpecSegment};

/// Sub-header row replicated into every shift segment.
const N_ROW_SHIFT_SUBHEADER: usize = 1;

/// Plans the rows owned by marker `idx`.
///
/// `markers` must be in ascending row order, as produced by
/// [`crate::scan::scan_markers`].
pub trait SegmentPolicy: Send + Sync + Debug {
    fn plan(
        &self,
        markers: &[SpecMarker],
        idx: usize,
        n_rows_max: usize,
    ) -> Result<SpecSegment, SegmentError>;
}

////////////////////////////////////////////////////////////////////////////////
// #region Policies

/// Backward-looking: from just after the previous marker through this one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyAnnual;

impl SegmentPolicy for PolicyAnnual {
    fn plan(
        &self,
        markers: &[SpecMarker],
        idx: usize,
        n_rows_max: usize,
    ) -> Result<SpecSegment, SegmentError> {
        let marker = derive_marker(markers, idx)?;
        let n_row_start = match idx {
            0 => 1,
            _ => markers[idx - 1].row_idx + 1,
        };
        let n_row_end = marker.row_idx + 1;
        Ok(derive_clamped_segment(
            &marker.value,
            n_row_start,
            n_row_end,
            n_rows_max,
        ))
    }
}

/// Annual range plus the sub-header row copied first.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyShift;

impl SegmentPolicy for PolicyShift {
    fn plan(
        &self,
        markers: &[SpecMarker],
        idx: usize,
        n_rows_max: usize,
    ) -> Result<SpecSegment, SegmentError> {
        let mut segment = PolicyAnnual.plan(markers, idx, n_rows_max)?;
        if N_ROW_SHIFT_SUBHEADER < n_rows_max {
            segment.rows_extra.push(N_ROW_SHIFT_SUBHEADER);
        }
        Ok(segment)
    }
}

/// Forward-looking: from this marker up to the next one, highlighted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyMonth;

impl SegmentPolicy for PolicyMonth {
    fn plan(
        &self,
        markers: &[SpecMarker],
        idx: usize,
        n_rows_max: usize,
    ) -> Result<SpecSegment, SegmentError> {
        let marker = derive_marker(markers, idx)?;
        let n_row_end = markers
            .get(idx + 1)
            .map_or(n_rows_max, |next| next.row_idx);
        let mut segment =
            derive_clamped_segment(&marker.value, marker.row_idx, n_row_end, n_rows_max);
        segment.if_highlight = true;
        Ok(segment)
    }
}

/// Forward-looking like month, leaving one gap row before the next marker.
///
/// A range with no usable rows is reported as [`SegmentError::InvalidSegment`]
/// so the caller can skip the entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyStatement;

impl SegmentPolicy for PolicyStatement {
    fn plan(
        &self,
        markers: &[SpecMarker],
        idx: usize,
        n_rows_max: usize,
    ) -> Result<SpecSegment, SegmentError> {
        let marker = derive_marker(markers, idx)?;
        let n_row_end = markers
            .get(idx + 1)
            .map_or(n_rows_max, |next| next.row_idx.saturating_sub(1));
        let n_row_start = marker.row_idx.min(n_rows_max);
        let n_row_end = n_row_end.min(n_rows_max);
        if n_row_end <= n_row_start {
            return Err(SegmentError::InvalidSegment {
                key: marker.value.clone(),
                row_start: n_row_start,
                row_end: n_row_end,
            });
        }
        Ok(SpecSegment::from_range(
            marker.value.clone(),
            n_row_start,
            n_row_end,
        ))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Helpers

fn derive_marker(markers: &[SpecMarker], idx: usize) -> Result<&SpecMarker, SegmentError> {
    markers.get(idx).ok_or(SegmentError::MarkerIndex {
        idx,
        len: markers.len(),
    })
}

fn derive_clamped_segment(
    key: &str,
    n_row_start: usize,
    n_row_end: usize,
    n_rows_max: usize,
) -> SpecSegment {
    let n_row_start = n_row_start.min(n_rows_max);
    let n_row_end = n_row_end.clamp(n_row_start, n_rows_max);
    SpecSegment::from_range(key, n_row_start, n_row_end)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
