//! Filesystem assertions for integration tests

use std::path::Path;

/// Sorted file names in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()))
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Assert that no working area survived the run
pub fn assert_no_working_area(work_root: &Path) {
    let leftover = file_names(work_root);
    assert!(
        leftover.is_empty(),
        "working area not removed: {leftover:?} in {}",
        work_root.display()
    );
}
