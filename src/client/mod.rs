//! Registry search extension client
//!
//! The [`SearchApi`] trait is the seam between the CLI commands and the
//! server; [`RegistryClient`] implements it over HTTP, and the test-only
//! mock implements it in memory.

use async_trait::async_trait;

use crate::cli::args::{CveListSort, ImageListSort};
use crate::error::Result;

pub mod capability;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod query;
pub mod registry;

pub use capability::ensure_supported;
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockSearchClient;
pub use models::{CveResultForImage, PaginatedImages, SchemaField};
pub use query::GqlQuery;
pub use registry::RegistryClient;

/// Operations of the registry's search extension
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Introspect the fields of the schema's query type
    async fn schema_queries(&self) -> Result<Vec<SchemaField>>;

    /// List CVEs affecting `image` (`repo:tag` or `repo@digest`),
    /// optionally narrowed to one searched CVE
    async fn cve_list_for_image(
        &self,
        image: &str,
        searched_cve: Option<&str>,
        sort: CveListSort,
    ) -> Result<CveResultForImage>;

    /// List images affected by `cve_id`, restricted to `repo` unless it is empty
    async fn image_list_for_cve(
        &self,
        cve_id: &str,
        repo: &str,
        sort: ImageListSort,
    ) -> Result<PaginatedImages>;

    /// List images of `repo` in which `cve_id` is fixed
    async fn image_list_with_cve_fixed(
        &self,
        cve_id: &str,
        repo: &str,
        sort: ImageListSort,
    ) -> Result<PaginatedImages>;
}
