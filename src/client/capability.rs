//! Server capability check

use log::debug;

use super::{GqlQuery, SearchApi};
use crate::error::{ApiError, Error, Result};

/// Confirm the server exposes `query` before calling it.
///
/// Every failure, including an unreachable server, is reported with the
/// query name wrapped around the cause.
pub async fn ensure_supported<A>(api: &A, query: &GqlQuery) -> Result<()>
where
    A: SearchApi + ?Sized,
{
    debug!("Checking server support for {}", query.name);

    let fields = api
        .schema_queries()
        .await
        .map_err(|e| Error::unsupported(query.name, e))?;

    if !query.is_supported_by(&fields) {
        return Err(Error::unsupported(
            query.name,
            ApiError::QueryNotSupported.into(),
        ));
    }

    debug!("Server supports {}", query.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockSearchClient;
    use crate::client::query::{CVE_LIST_FOR_IMAGE, IMAGE_LIST_FOR_CVE};

    #[tokio::test]
    async fn test_supported_query_passes() {
        let mock = MockSearchClient::supporting(&[IMAGE_LIST_FOR_CVE]);
        assert!(ensure_supported(&mock, &IMAGE_LIST_FOR_CVE).await.is_ok());
        assert_eq!(mock.call_counts().await.schema_queries, 1);
    }

    #[tokio::test]
    async fn test_missing_query_names_it() {
        let mock = MockSearchClient::supporting(&[IMAGE_LIST_FOR_CVE]);
        let err = ensure_supported(&mock, &CVE_LIST_FOR_IMAGE)
            .await
            .unwrap_err();

        match &err {
            Error::Unsupported { query, source } => {
                assert_eq!(query, "CVEListForImage");
                assert!(matches!(**source, Error::Api(ApiError::QueryNotSupported)));
            }
            other => panic!("Expected Error::Unsupported, got {other:?}"),
        }
        assert!(err.to_string().contains("'CVEListForImage'"));
    }

    #[tokio::test]
    async fn test_introspection_failure_is_wrapped() {
        let mock = MockSearchClient::supporting(&[IMAGE_LIST_FOR_CVE])
            .with_error(ApiError::Network("Failed to connect to server".to_string()));
        let err = ensure_supported(&mock, &IMAGE_LIST_FOR_CVE)
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("Failed to connect"));
        assert!(msg.contains("'ImageListForCVE'"));
    }
}
