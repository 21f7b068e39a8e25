use crate::vex_generation::domain::AdvisoryDocument;
use crate::shared::Result;
use std::path::Path;

/// AdvisoryIndex port: package name lookup over a loaded advisory database
pub trait AdvisoryIndex {
    /// Returns every advisory document recorded for `package_name`
    ///
    /// An unknown package yields an empty vector, not an error.
    fn select_by_name(&self, package_name: &str) -> Result<Vec<AdvisoryDocument>>;
}

/// AdvisoryIndexLoader port for opening an advisory database on disk
pub trait AdvisoryIndexLoader {
    type Index: AdvisoryIndex;

    /// Opens the advisory database rooted at `dir`
    ///
    /// # Errors
    /// Returns `VexiError::IndexUnavailable` when the directory is missing
    /// or holds a malformed advisory file.
    fn open_index(&self, dir: &Path) -> Result<Self::Index>;
}
