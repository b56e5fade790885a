//! Credit card entity grouping.

use std::cmp::Ordering;

use crate::spec::{SpecGroup, SpecMarker};

/// Header row prepended to every group.
const N_ROW_HEADER: usize = 0;

/// Compare two digit strings by numeric value without parsing.
///
/// Leading zeros are ignored, so arbitrarily long account ids never overflow.
pub fn compare_numeric_text(a: &str, b: &str) -> Ordering {
    let c_a = a.trim().trim_start_matches('0');
    let c_b = b.trim().trim_start_matches('0');
    c_a.len().cmp(&c_b.len()).then_with(|| c_a.cmp(c_b))
}

/// Stable sort by numeric marker value; equal values keep row order.
pub fn sort_markers_by_value(markers: &mut [SpecMarker]) {
    markers.sort_by(|a, b| compare_numeric_text(&a.value, &b.value));
}

/// Merge runs of immediately adjacent equal values into groups.
///
/// A value that reappears after a different one starts a new group.
pub fn group_adjacent_markers(markers: &[SpecMarker]) -> Vec<SpecGroup> {
    let mut l_groups: Vec<SpecGroup> = Vec::new();
    for marker in markers {
        let group_open = l_groups
            .last_mut()
            .filter(|group| compare_numeric_text(&group.value, &marker.value).is_eq());
        match group_open {
            Some(group) => group.rows.push(marker.row_idx),
            None => l_groups.push(SpecGroup {
                value: marker.value.clone(),
                rows: vec![N_ROW_HEADER, marker.row_idx],
            }),
        }
    }
    l_groups
}

/// Sort markers ascending by value, then group adjacent equal values.
pub fn group_markers(markers: &[SpecMarker]) -> Vec<SpecGroup> {
    let mut l_sorted = markers.to_vec();
    sort_markers_by_value(&mut l_sorted);
    let l_groups = group_adjacent_markers(&l_sorted);
    tracing::debug!(
        markers = markers.len(),
        groups = l_groups.len(),
        "markers grouped"
    );
    l_groups
}
