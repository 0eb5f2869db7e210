//! CVE display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{MISSING, truncate_string};
use crate::cli::OutputFormat;
use crate::client::models::{Cve, CveResultForImage};
use crate::error::Result;
use crate::output::{Formattable, render};

/// CVE row for table output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CveDisplay {
    /// CVE identifier
    #[tabled(rename = "ID")]
    pub id: String,

    /// Severity as reported by the scanner
    #[tabled(rename = "SEVERITY")]
    pub severity: String,

    /// Short title
    #[tabled(rename = "TITLE")]
    pub title: String,

    /// Affected packages with their fixed versions
    #[tabled(rename = "FIXED IN")]
    pub fixed_in: String,
}

impl From<&Cve> for CveDisplay {
    fn from(cve: &Cve) -> Self {
        let fixed: Vec<String> = cve
            .package_list
            .iter()
            .filter_map(|p| p.fixed_version.as_ref().map(|v| format!("{} {}", p.name, v)))
            .collect();

        Self {
            id: cve.id.clone(),
            severity: cve.severity.clone().unwrap_or_else(|| MISSING.to_string()),
            title: cve
                .title
                .as_deref()
                .map(|t| truncate_string(t, 60))
                .unwrap_or_else(|| MISSING.to_string()),
            fixed_in: if fixed.is_empty() {
                MISSING.to_string()
            } else {
                truncate_string(&fixed.join(", "), 40)
            },
        }
    }
}

impl Formattable for CveResultForImage {
    fn format(&self, format: OutputFormat) -> Result<String> {
        render(
            self,
            || self.cve_list.iter().map(CveDisplay::from).collect(),
            format,
        )
    }
}
