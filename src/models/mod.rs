//! Data models for the details service
//!
//! Response bodies served to clients, the cached [`BookDetails`] record, and
//! the subset of the upstream catalog response that the service decodes.

pub mod details;
pub mod responses;
pub mod upstream;

// Re-export commonly used types
pub use details::BookDetails;
pub use responses::{ErrorResponse, StatusResponse};
pub use upstream::{VolumeInfo, VolumesResponse};
