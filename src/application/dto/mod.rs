/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod repository_slug;
mod vex_request;
mod vex_response;

pub use repository_slug::RepositorySlug;
pub use vex_request::{AdvisoriesLocation, VexRequest, VexRequestBuilder};
pub use vex_response::VexResponse;
