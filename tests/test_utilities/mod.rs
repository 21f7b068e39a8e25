/// Shared helpers for the integration and end-to-end tests
pub mod mocks;

use std::path::PathBuf;

/// Absolute path of a file under `tests/fixtures`
pub fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}
