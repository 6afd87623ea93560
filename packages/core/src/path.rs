//! Path strings: building them from segments and taking them apart.
//!
//! A path is a flat string of segments joined by [`DELIMITER`]. The first
//! segment is the namespace root. Array elements get an index segment like
//! `[3]`. Segment names must never contain the delimiter themselves; that is
//! a caller contract and it is not validated here.

use lazy_static::lazy_static;
use regex::Regex;

/// The reserved character joining path segments.
pub const DELIMITER: char = '\\';

/// Join a child segment onto a parent path.
pub fn make_path(parent: &str, child: &str) -> String {
    format!("{}{}{}", parent, DELIMITER, child)
}

/// Build the path of array element `index` under `parent`.
pub fn make_array(parent: &str, index: usize) -> String {
    format!("{}{}[{}]", parent, DELIMITER, index)
}

/// Everything before the last delimiter, or `None` at a namespace root.
pub fn parent_of(path: &str) -> Option<&str> {
    path.rfind(DELIMITER).map(|i| &path[..i])
}

/// The trailing segment of `path` (the whole path when it has no delimiter).
pub fn leaf_name(path: &str) -> &str {
    match path.rfind(DELIMITER) {
        Some(i) => &path[i + DELIMITER.len_utf8()..],
        None => path,
    }
}

/// Whether `child` sits somewhere below `parent`.
pub fn is_descendant(parent: &str, child: &str) -> bool {
    child.len() > parent.len() + DELIMITER.len_utf8()
        && child.starts_with(parent)
        && child[parent.len()..].starts_with(DELIMITER)
}

/// Whether a segment name reads as an array index when rebuilding a document.
///
/// Only a single digit in brackets counts: `[0]` through `[9]`. `[10]` does
/// not, so a stored array of more than ten elements comes back as an object.
/// Stored data depends on this; widening it would change how existing
/// directories are rebuilt.
pub fn is_array_index_name(name: &str) -> bool {
    lazy_static! {
        static ref ARRAY_INDEX_NAME: Regex = Regex::new(r"^\[[0-9]\]$").unwrap();
    }

    ARRAY_INDEX_NAME.is_match(name)
}
