//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod progress;
pub mod table;

/// Types that can be rendered in every output format
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

/// Render `data` as JSON or YAML, or the rows built by `rows` as a table.
///
/// Structured formats carry the full API data; the table only shows the
/// display columns.
pub fn render<T, D, F>(data: &T, rows: F, format: OutputFormat) -> Result<String>
where
    T: Serialize + ?Sized,
    D: Tabled,
    F: FnOnce() -> Vec<D>,
{
    match format {
        OutputFormat::Table => Ok(table::format_table(&rows())),
        OutputFormat::Json => Ok(json::format_json(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
    }
}

impl<D: Tabled + Serialize> Formattable for Vec<D> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        render(self, || self.iter().collect::<Vec<&D>>(), format)
    }
}
