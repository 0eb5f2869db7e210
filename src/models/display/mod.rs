//! Display model implementations for table output
//!
//! Display models flatten search results into table rows; JSON and YAML
//! output serialize the search results directly.

mod common;
pub mod cve;
pub mod image;
