//! GraphQL query descriptors and documents for the search extension

use super::models::SchemaField;

/// A query the CLI needs from the server's schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GqlQuery {
    /// Field name on the query type
    pub name: &'static str,
    /// Arguments the CLI passes
    pub args: &'static [&'static str],
    /// Named return type, ignoring NON_NULL / LIST wrappers
    pub return_type: &'static str,
}

pub const CVE_LIST_FOR_IMAGE: GqlQuery = GqlQuery {
    name: "CVEListForImage",
    args: &["image", "requestedPage", "searchedCVE"],
    return_type: "CVEResultForImage",
};

pub const IMAGE_LIST_FOR_CVE: GqlQuery = GqlQuery {
    name: "ImageListForCVE",
    args: &["id", "requestedPage"],
    return_type: "PaginatedImagesResult",
};

pub const IMAGE_LIST_WITH_CVE_FIXED: GqlQuery = GqlQuery {
    name: "ImageListWithCVEFixed",
    args: &["id", "image", "requestedPage"],
    return_type: "PaginatedImagesResult",
};

impl GqlQuery {
    /// Whether the introspected query fields expose this query with the
    /// expected arguments and return type.
    pub fn is_supported_by(&self, fields: &[SchemaField]) -> bool {
        fields.iter().any(|field| {
            field.name == self.name
                && field.field_type.base_name() == Some(self.return_type)
                && self
                    .args
                    .iter()
                    .all(|arg| field.args.iter().any(|a| a.name == *arg))
        })
    }
}

/// Introspection of the query type's fields
pub const SCHEMA_DOCUMENT: &str = "{ __schema { queryType { fields { name args { name } \
    type { name kind ofType { name kind ofType { name kind } } } } } } }";

pub const CVE_LIST_FOR_IMAGE_DOCUMENT: &str = "\
query ($image: String!, $searchedCve: String, $page: PageInput) {
  CVEListForImage(image: $image, searchedCVE: $searchedCve, requestedPage: $page) {
    Tag
    Page { TotalCount ItemCount }
    CVEList {
      Id Title Description Severity
      PackageList { Name InstalledVersion FixedVersion }
    }
  }
}";

pub const IMAGE_LIST_FOR_CVE_DOCUMENT: &str = "\
query ($id: String!, $page: PageInput) {
  ImageListForCVE(id: $id, requestedPage: $page) {
    Page { TotalCount ItemCount }
    Results { RepoName Tag Digest LastUpdated Size }
  }
}";

pub const IMAGE_LIST_WITH_CVE_FIXED_DOCUMENT: &str = "\
query ($id: String!, $image: String!, $page: PageInput) {
  ImageListWithCVEFixed(id: $id, image: $image, requestedPage: $page) {
    Page { TotalCount ItemCount }
    Results { RepoName Tag Digest LastUpdated Size }
  }
}";
