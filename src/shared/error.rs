use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between argument mistakes
/// and failures that happened while distilling the VEX document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - a VEX document was written (possibly with zero statements)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (registry error, advisory error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for VEX generation.
///
/// The first five variants are the fatal pipeline failures. The remaining
/// ones cover the file handling around the pipeline.
#[derive(Debug, Error)]
pub enum VexiError {
    #[error("Invalid image reference: {reference}\nReason: {reason}\n\n💡 Hint: Use the form [registry/]repository[:tag][@digest], e.g. cgr.dev/chainguard/curl:latest")]
    InvalidReference { reference: String, reason: String },

    #[error("Failed to fetch attestations for {reference}\nDetails: {details}\n\n💡 Hint: Check that the image exists and that the registry is reachable")]
    FetchFailure { reference: String, details: String },

    #[error("Failed to parse SBOM document\nDetails: {details}\n\n💡 Hint: Only SPDX 2.x JSON and CycloneDX JSON documents are supported")]
    ParseFailure { details: String },

    #[error("Advisory data is unavailable: {path}\nDetails: {details}\n\n💡 Hint: Point --advisories at a checkout of the advisories repository, or omit it to clone one")]
    IndexUnavailable { path: PathBuf, details: String },

    #[error("Cannot merge VEX documents: {details}")]
    MergeConflict { details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },
}
