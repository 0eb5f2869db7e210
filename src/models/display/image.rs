//! Image display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{MISSING, format_size, format_timestamp, short_digest};
use crate::cli::OutputFormat;
use crate::client::models::{ImageSummary, PaginatedImages};
use crate::error::Result;
use crate::output::{Formattable, render};

/// Image row for table output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ImageDisplay {
    #[tabled(rename = "REPOSITORY")]
    pub repo: String,

    #[tabled(rename = "TAG")]
    pub tag: String,

    /// Short digest
    #[tabled(rename = "DIGEST")]
    pub digest: String,

    #[tabled(rename = "SIZE")]
    pub size: String,

    #[tabled(rename = "UPDATED")]
    pub updated: String,
}

impl From<&ImageSummary> for ImageDisplay {
    fn from(image: &ImageSummary) -> Self {
        Self {
            repo: image.repo_name.clone(),
            tag: image.tag.clone(),
            digest: image
                .digest
                .as_deref()
                .map(short_digest)
                .unwrap_or_else(|| MISSING.to_string()),
            size: image
                .size
                .as_deref()
                .map(format_size)
                .unwrap_or_else(|| MISSING.to_string()),
            updated: image
                .last_updated
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_else(|| MISSING.to_string()),
        }
    }
}

impl Formattable for PaginatedImages {
    fn format(&self, format: OutputFormat) -> Result<String> {
        render(
            &self.results,
            || self.results.iter().map(ImageDisplay::from).collect(),
            format,
        )
    }
}
