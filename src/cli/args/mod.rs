//! Shared CLI argument types
//!
//! Global options plus the typed flag values used by the `cve` commands.

mod common;
mod global;
pub mod sort;

pub use common::OutputFormat;
pub use global::GlobalOptions;
pub use sort::{CveListSort, ImageListSort, SortOption, SortValueParser};
