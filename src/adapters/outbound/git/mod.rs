/// Git adapters for provisioning advisory data
mod git_advisory_source;

pub use git_advisory_source::GitAdvisorySource;
