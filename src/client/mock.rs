//! Mock search client for testing
//!
//! Implements [`SearchApi`] in memory so command pipelines can be exercised
//! without a server.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::SearchApi;
use super::models::{
    CveResultForImage, ImageSummary, PaginatedImages, SchemaArg, SchemaField, TypeRef,
};
use super::query::GqlQuery;
use crate::cli::args::{CveListSort, ImageListSort};
use crate::error::{ApiError, Result};

/// Mock search client.
///
/// # Example
/// ```ignore
/// let mock = MockSearchClient::supporting(&[IMAGE_LIST_FOR_CVE])
///     .with_images(vec![image("alpine", "3.18")]);
/// ```
#[derive(Default)]
pub struct MockSearchClient {
    /// Query fields returned from introspection
    schema: Arc<Mutex<Vec<SchemaField>>>,
    /// Result returned from cve_list_for_image
    cves: Arc<Mutex<CveResultForImage>>,
    /// Results returned from the image queries
    images: Arc<Mutex<Vec<ImageSummary>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub schema_queries: usize,
    pub cve_list_for_image: usize,
    pub image_list_for_cve: usize,
    pub image_list_with_cve_fixed: usize,
}

impl CallCounts {
    /// Calls to the three search operations, excluding introspection
    pub fn executions(&self) -> usize {
        self.cve_list_for_image + self.image_list_for_cve + self.image_list_with_cve_fixed
    }

    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.schema_queries + self.executions()
    }
}

/// A captured search request for test assertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedRequest {
    /// The API method called
    pub method: String,
    /// Image reference, for cve_list_for_image
    pub image: Option<String>,
    /// CVE id (searched CVE for cve_list_for_image)
    pub cve_id: Option<String>,
    /// Repository argument of the image queries
    pub repo: Option<String>,
    /// Sort option as rendered on the command line
    pub sort: String,
}

impl MockSearchClient {
    /// Create an empty mock whose schema supports nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose schema exposes `queries`
    pub fn supporting(queries: &[GqlQuery]) -> Self {
        Self {
            schema: Arc::new(Mutex::new(queries.iter().map(schema_field).collect())),
            ..Self::default()
        }
    }

    /// Set the result of cve_list_for_image
    pub fn with_cves(self, cves: CveResultForImage) -> Self {
        Self {
            cves: Arc::new(Mutex::new(cves)),
            ..self
        }
    }

    /// Set the results of the image queries
    pub fn with_images(self, images: Vec<ImageSummary>) -> Self {
        Self {
            images: Arc::new(Mutex::new(images)),
            ..self
        }
    }

    /// Fail the next call with `error`
    pub fn with_error(self, error: ApiError) -> Self {
        Self {
            error: Arc::new(Mutex::new(Some(error))),
            ..self
        }
    }

    /// Snapshot of call counts
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Requests captured so far
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    async fn take_error(&self) -> Result<()> {
        match self.error.lock().await.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    async fn capture(&self, request: CapturedRequest) {
        self.captured_requests.lock().await.push(request);
    }
}

/// Introspection entry matching a query descriptor
fn schema_field(query: &GqlQuery) -> SchemaField {
    SchemaField {
        name: query.name.to_string(),
        args: query
            .args
            .iter()
            .map(|a| SchemaArg {
                name: a.to_string(),
            })
            .collect(),
        field_type: TypeRef {
            name: None,
            kind: Some("NON_NULL".to_string()),
            of_type: Some(Box::new(TypeRef {
                name: Some(query.return_type.to_string()),
                kind: Some("OBJECT".to_string()),
                of_type: None,
            })),
        },
    }
}

#[async_trait]
impl SearchApi for MockSearchClient {
    async fn schema_queries(&self) -> Result<Vec<SchemaField>> {
        self.call_count.lock().await.schema_queries += 1;
        self.take_error().await?;
        Ok(self.schema.lock().await.clone())
    }

    async fn cve_list_for_image(
        &self,
        image: &str,
        searched_cve: Option<&str>,
        sort: CveListSort,
    ) -> Result<CveResultForImage> {
        self.call_count.lock().await.cve_list_for_image += 1;
        self.capture(CapturedRequest {
            method: "cve_list_for_image".to_string(),
            image: Some(image.to_string()),
            cve_id: searched_cve.map(str::to_string),
            repo: None,
            sort: sort.to_string(),
        })
        .await;
        self.take_error().await?;
        Ok(self.cves.lock().await.clone())
    }

    async fn image_list_for_cve(
        &self,
        cve_id: &str,
        repo: &str,
        sort: ImageListSort,
    ) -> Result<PaginatedImages> {
        self.call_count.lock().await.image_list_for_cve += 1;
        self.capture(CapturedRequest {
            method: "image_list_for_cve".to_string(),
            image: None,
            cve_id: Some(cve_id.to_string()),
            repo: Some(repo.to_string()),
            sort: sort.to_string(),
        })
        .await;
        self.take_error().await?;
        Ok(PaginatedImages {
            page: None,
            results: self.images.lock().await.clone(),
        })
    }

    async fn image_list_with_cve_fixed(
        &self,
        cve_id: &str,
        repo: &str,
        sort: ImageListSort,
    ) -> Result<PaginatedImages> {
        self.call_count.lock().await.image_list_with_cve_fixed += 1;
        self.capture(CapturedRequest {
            method: "image_list_with_cve_fixed".to_string(),
            image: None,
            cve_id: Some(cve_id.to_string()),
            repo: Some(repo.to_string()),
            sort: sort.to_string(),
        })
        .await;
        self.take_error().await?;
        Ok(PaginatedImages {
            page: None,
            results: self.images.lock().await.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::query::{IMAGE_LIST_FOR_CVE, IMAGE_LIST_WITH_CVE_FIXED};

    #[tokio::test]
    async fn test_mock_schema_reflects_supported_queries() {
        let mock = MockSearchClient::supporting(&[IMAGE_LIST_FOR_CVE]);
        let fields = mock.schema_queries().await.unwrap();

        assert!(IMAGE_LIST_FOR_CVE.is_supported_by(&fields));
        assert!(!IMAGE_LIST_WITH_CVE_FIXED.is_supported_by(&fields));
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockSearchClient::new().with_error(ApiError::Forbidden);

        assert!(mock.schema_queries().await.is_err());
        assert!(mock.schema_queries().await.is_ok());
        assert_eq!(mock.call_counts().await.schema_queries, 2);
    }

    #[tokio::test]
    async fn test_mock_captures_requests() {
        let mock = MockSearchClient::new();
        mock.image_list_with_cve_fixed("CVE-2020-1", "alpine", ImageListSort::UpdateTime)
            .await
            .unwrap();

        let captured = mock.captured_requests().await;
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].repo.as_deref(), Some("alpine"));
        assert_eq!(captured[0].sort, "update-time");
        assert_eq!(mock.call_counts().await.executions(), 1);
    }
}
