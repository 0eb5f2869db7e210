//! Search extension data models
//!
//! Field names follow the server's GraphQL schema (PascalCase).

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
///
/// GraphQL fields are nullable unless declared otherwise, and
/// `#[serde(default)]` alone only covers absent keys.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paging metadata returned alongside results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_count: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub item_count: i64,
}

/// CVEs found in a single image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CveResultForImage {
    /// Image tag the scan ran against
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag: String,

    #[serde(default, rename = "CVEList", deserialize_with = "null_as_default")]
    pub cve_list: Vec<Cve>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
}

/// A single vulnerability
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cve {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// CRITICAL, HIGH, MEDIUM, LOW or UNKNOWN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub package_list: Vec<PackageInfo>,
}

/// Package affected by a CVE
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_version: Option<String>,
}

/// Page of image summaries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaginatedImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ImageSummary>,
}

/// Image summary as listed by the search extension
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub repo_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,

    /// RFC 3339 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    /// Size in bytes, as a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// A field of the schema's query type, from introspection
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaField {
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<SchemaArg>,

    #[serde(rename = "type")]
    pub field_type: TypeRef,
}

/// Argument of a schema field
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaArg {
    pub name: String,
}

/// Introspected type reference, possibly wrapped in NON_NULL / LIST
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeRef {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub kind: Option<String>,

    #[serde(default, rename = "ofType")]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// Name of the innermost named type, looking through NON_NULL and LIST
    /// wrappers
    pub fn base_name(&self) -> Option<&str> {
        match self.kind.as_deref() {
            Some("NON_NULL" | "LIST") => self.of_type.as_deref().and_then(TypeRef::base_name),
            _ => self.name.as_deref(),
        }
    }
}
