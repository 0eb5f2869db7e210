//! Search extension client over HTTP

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::models::{CveResultForImage, PaginatedImages, SchemaField};
use super::query::{
    CVE_LIST_FOR_IMAGE_DOCUMENT, IMAGE_LIST_FOR_CVE_DOCUMENT, IMAGE_LIST_WITH_CVE_FIXED_DOCUMENT,
    SCHEMA_DOCUMENT,
};
use super::SearchApi;
use crate::cli::args::{CveListSort, ImageListSort, SortOption};
use crate::config::{Credentials, SearchConfig};
use crate::error::{ApiError, Result};

/// Path of the search extension's GraphQL endpoint
pub const SEARCH_PATH: &str = "/v2/_zot/ext/search";

/// Request timeout for every query
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GqlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GqlErrorMessage {
    message: String,
}

impl<T> GqlResponse<T> {
    fn into_result(self) -> Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::GraphQl(messages.join("; ")).into());
        }
        self.data
            .ok_or_else(|| ApiError::InvalidResponse("Response has no data".to_string()).into())
    }
}

/// Search extension client
pub struct RegistryClient {
    http: HttpClient,
    endpoint: String,
    credentials: Option<Credentials>,
}

impl RegistryClient {
    /// Create a client for the server described by `config`
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}{}", config.base_url, SEARCH_PATH),
            credentials: config.credentials.clone(),
        })
    }

    /// Endpoint queries are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post a GraphQL document and decode its `data`
    async fn query<T: DeserializeOwned>(&self, document: &str, variables: Value) -> Result<T> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": document, "variables": variables }));

        if let Some(ref credentials) = self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        debug!("POST {} -> {}", self.endpoint, status);

        match status {
            StatusCode::OK => {
                let body: GqlResponse<T> = response.json().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                body.into_result()
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(self.endpoint.clone()).into()),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

#[async_trait]
impl SearchApi for RegistryClient {
    async fn schema_queries(&self) -> Result<Vec<SchemaField>> {
        #[derive(Deserialize)]
        struct QueryType {
            fields: Vec<SchemaField>,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Schema {
            query_type: QueryType,
        }

        #[derive(Deserialize)]
        struct SchemaData {
            #[serde(rename = "__schema")]
            schema: Schema,
        }

        let data: SchemaData = self.query(SCHEMA_DOCUMENT, json!({})).await?;
        Ok(data.schema.query_type.fields)
    }

    async fn cve_list_for_image(
        &self,
        image: &str,
        searched_cve: Option<&str>,
        sort: CveListSort,
    ) -> Result<CveResultForImage> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "CVEListForImage")]
            result: CveResultForImage,
        }

        let variables = json!({
            "image": image,
            "searchedCve": searched_cve,
            "page": { "sortBy": sort.criteria() },
        });
        let data: Data = self.query(CVE_LIST_FOR_IMAGE_DOCUMENT, variables).await?;
        Ok(data.result)
    }

    async fn image_list_for_cve(
        &self,
        cve_id: &str,
        repo: &str,
        sort: ImageListSort,
    ) -> Result<PaginatedImages> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "ImageListForCVE")]
            result: PaginatedImages,
        }

        let variables = json!({
            "id": cve_id,
            "page": { "sortBy": sort.criteria() },
        });
        let mut data: Data = self.query(IMAGE_LIST_FOR_CVE_DOCUMENT, variables).await?;

        // The query has no repository filter; narrow the page here
        if !repo.is_empty() {
            data.result.results.retain(|image| image.repo_name == repo);
        }
        Ok(data.result)
    }

    async fn image_list_with_cve_fixed(
        &self,
        cve_id: &str,
        repo: &str,
        sort: ImageListSort,
    ) -> Result<PaginatedImages> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "ImageListWithCVEFixed")]
            result: PaginatedImages,
        }

        let variables = json!({
            "id": cve_id,
            "image": repo,
            "page": { "sortBy": sort.criteria() },
        });
        let data: Data = self
            .query(IMAGE_LIST_WITH_CVE_FIXED_DOCUMENT, variables)
            .await?;
        Ok(data.result)
    }
}
