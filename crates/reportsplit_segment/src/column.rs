//! Column letter resolution.

use crate::spec::SegmentError;

const CHR_COLUMN_FIRST: char = 'a';
const CHR_COLUMN_LAST: char = 'z';

/// Map a single column letter (case-insensitive) to its zero-based index.
pub fn resolve_column(letter: char) -> Result<usize, SegmentError> {
    let chr_lower = letter.to_ascii_lowercase();
    if !(CHR_COLUMN_FIRST..=CHR_COLUMN_LAST).contains(&chr_lower) {
        return Err(SegmentError::InvalidColumn(letter));
    }
    Ok(chr_lower as usize - CHR_COLUMN_FIRST as usize)
}

/// Absolute index distance between two column letters.
pub fn column_distance(a: char, b: char) -> Result<usize, SegmentError> {
    Ok(resolve_column(a)?.abs_diff(resolve_column(b)?))
}
