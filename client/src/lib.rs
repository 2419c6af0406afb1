//! HTTP client for the project listing service.
//!
//! The service answers `GET <endpoint>?category=<id>` with a JSON object
//! whose `projects` field lists the projects in that category.

mod client;
mod error;
mod types;

pub use client::ProjectsClient;
pub use error::ClientError;
pub use types::ProjectRecord;
pub use types::parse_listing;

use async_trait::async_trait;

/// Anything that can list the projects of one category.
///
/// `ProjectsClient` is the production implementation; tests substitute
/// in-memory sources with controllable timing.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn list_projects(&self, category: &str) -> Result<Vec<ProjectRecord>, ClientError>;
}
