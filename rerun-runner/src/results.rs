// Copyright (c) The trx-rerun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Locating the most recent result file in a results directory.

use crate::errors::ResultDirError;
use camino::{Utf8Path, Utf8PathBuf};

static TRX_EXTENSION: &str = "trx";

/// Returns the most recently produced TRX file in `results_dir`, or `None` if
/// the directory contains no TRX files.
///
/// Recency is judged by lexicographic file name ordering, not by modification
/// time: TRX file names embed a sortable timestamp, so the greatest name is
/// the newest file. That assumption is inherited from the TRX naming scheme
/// and breaks down if something else drops differently-named `.trx` files
/// into the directory.
///
/// A results directory that cannot be listed is an error; an empty one is
/// `Ok(None)`.
pub fn latest_result_file(results_dir: &Utf8Path) -> Result<Option<Utf8PathBuf>, ResultDirError> {
    let mut latest: Option<Utf8PathBuf> = None;
    for entry in results_dir
        .read_dir_utf8()
        .map_err(|error| ResultDirError::new(results_dir, error))?
    {
        let entry = entry.map_err(|error| ResultDirError::new(results_dir, error))?;
        if !entry.file_type().is_ok_and(|file_type| file_type.is_file()) {
            continue;
        }
        let path = entry.into_path();
        if !path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case(TRX_EXTENSION))
        {
            continue;
        }
        if latest
            .as_ref()
            .is_none_or(|current| path.file_name() > current.file_name())
        {
            latest = Some(path);
        }
    }
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::Utf8TempDir;
    use pretty_assertions::assert_eq;

    fn touch(dir: &Utf8TempDir, name: &str) {
        std::fs::write(dir.path().join(name), "").expect("temp dir should be writable");
    }

    #[test]
    fn picks_lexicographic_maximum() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        touch(&dir, "a.trx");
        touch(&dir, "c.trx");
        touch(&dir, "b.trx");

        let latest = latest_result_file(dir.path()).expect("directory should be listable");
        assert_eq!(latest, Some(dir.path().join("c.trx")));
    }

    #[test]
    fn ignores_files_with_other_extensions() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        touch(&dir, "a.trx");
        touch(&dir, "z.txt");
        touch(&dir, "z.trx.bak");

        let latest = latest_result_file(dir.path()).expect("directory should be listable");
        assert_eq!(latest, Some(dir.path().join("a.trx")));
    }

    #[test]
    fn matches_extension_case_insensitively() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        touch(&dir, "a.TRX");

        let latest = latest_result_file(dir.path()).expect("directory should be listable");
        assert_eq!(latest, Some(dir.path().join("a.TRX")));
    }

    #[test]
    fn ignores_directories() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        std::fs::create_dir(dir.path().join("z.trx")).expect("temp dir should be writable");
        touch(&dir, "a.trx");

        let latest = latest_result_file(dir.path()).expect("directory should be listable");
        assert_eq!(latest, Some(dir.path().join("a.trx")));
    }

    #[test]
    fn empty_directory_is_not_an_error() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");

        let latest = latest_result_file(dir.path()).expect("directory should be listable");
        assert_eq!(latest, None);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = Utf8TempDir::new().expect("should create the temp dir successfully");
        let missing = dir.path().join("does-not-exist");

        latest_result_file(&missing).expect_err("a missing directory should not be listable");
    }
}
