use std::path::{Path, PathBuf};

use crate::consts::{DEOVERLAPPED_EXT, OVERLAPS_EXT};

///
/// Strip a trailing `.gz` and append `ext` to the input file name.
///
fn with_added_extension(input: &Path, ext: &str) -> PathBuf {
    let base = match input.extension().and_then(|e| e.to_str()) {
        Some("gz") => input.with_extension(""),
        _ => input.to_path_buf(),
    };
    let mut name = base.into_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Where the kept rows of `input` are written by default.
pub fn deoverlapped_path(input: &Path) -> PathBuf {
    with_added_extension(input, DEOVERLAPPED_EXT)
}

/// Where the overlap diagnostics of `input` are written.
pub fn overlaps_path(input: &Path) -> PathBuf {
    with_added_extension(input, OVERLAPS_EXT)
}
