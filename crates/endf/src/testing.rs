//! Helpers for building fixed-width tape fixtures in unit tests

use ndgen_utils::f;

/// Build one 80 column tape line from six content fields
///
/// Fields are right-justified into the 11 column cells; overlong text
/// (only used for skipped description lines) is truncated.
pub(crate) fn tape_line(fields: [&str; 6], mat: i32, mf: u32, mt: u32) -> String {
    let mut content = String::with_capacity(66);
    for field in fields {
        let mut cell = f!("{field:>11}");
        cell.truncate(11);
        content.push_str(&cell);
    }
    f!("{content}{mat:>4}{mf:>2}{mt:>3}{:>5}", 1)
}
