/// Result alias used by every layer.
///
/// Errors are `anyhow::Error` so each pipeline stage can wrap the first
/// fatal `VexiError` it sees with the name of the failing stage.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
