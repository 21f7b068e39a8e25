/// Filesystem adapters for file I/O operations
mod advisory_index;
mod file_writer;
mod sbom_reader;

pub use advisory_index::{DirectoryAdvisoryIndex, DirectoryAdvisoryIndexLoader};
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use sbom_reader::LocalSbomReader;
